use std::fs;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use dustbin_core::{BinKind, ClassificationReport};
use log::{error, info, warn};
use rand::Rng;

use crate::dataset::{Category, Dataset};
use crate::upload::Uploader;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Wait after each category, like the device between two items
    pub pause: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            pause: Duration::from_secs(2),
        }
    }
}

/// What happened to one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryResult {
    /// No images in the category directory
    Skipped,
    /// Endpoint answered with a success status
    Classified {
        file: PathBuf,
        class: Option<String>,
        command: Option<String>,
        bin: BinKind,
        correct: bool,
    },
    /// Endpoint answered with an error status
    Rejected { status: u16, body: String },
    /// Image could not be read or uploaded
    Failed(String),
}

/// Totals of a simulation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub uploads: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub recycle: u32,
    pub general: u32,
    pub rejected: u32,
    pub failed: u32,
    pub skipped: u32,
}

impl Summary {
    fn record(&mut self, result: &CategoryResult) {
        match result {
            CategoryResult::Skipped => self.skipped += 1,
            CategoryResult::Classified { bin, correct, .. } => {
                self.uploads += 1;
                if *correct {
                    self.correct += 1;
                } else {
                    self.incorrect += 1;
                }
                match bin {
                    BinKind::Recycle => self.recycle += 1,
                    BinKind::General => self.general += 1,
                }
            }
            CategoryResult::Rejected { .. } => {
                self.uploads += 1;
                self.rejected += 1;
            }
            CategoryResult::Failed(_) => self.failed += 1,
        }
    }

    /// Share of correct answers among classified uploads, in percent.
    pub fn accuracy(&self) -> Option<f64> {
        let classified = self.correct + self.incorrect;
        (classified > 0).then(|| f64::from(self.correct) * 100.0 / f64::from(classified))
    }
}

pub struct Simulation<U: Uploader> {
    dataset: Dataset,
    uploader: U,
    config: SimulationConfig,
}

impl<U: Uploader> Simulation<U> {
    pub fn new(dataset: Dataset, uploader: U, config: SimulationConfig) -> Self {
        Self {
            dataset,
            uploader,
            config,
        }
    }

    /// Go through every category once.
    ///
    /// Errors of a single category are logged and do not stop the run.
    pub fn run(&self, rng: &mut impl Rng) -> Result<Summary> {
        info!("--- dustbin simulation started on {} ---", self.dataset.root().display());
        let mut summary = Summary::default();

        for category in self.dataset.categories()? {
            let result = match self.sort_category(&category, rng) {
                Ok(result) => result,
                Err(e) => {
                    error!("processing {}: {:#}", category.name, e);
                    CategoryResult::Failed(format!("{e:#}"))
                }
            };
            summary.record(&result);
            if result != CategoryResult::Skipped && !self.config.pause.is_zero() {
                thread::sleep(self.config.pause);
            }
        }

        match summary.accuracy() {
            Some(accuracy) => info!(
                "--- done: {} uploads, {} correct ({accuracy:.1}%), recycle={} general={} ---",
                summary.uploads, summary.correct, summary.recycle, summary.general
            ),
            None => info!("--- done: {} uploads, nothing classified ---", summary.uploads),
        }
        Ok(summary)
    }

    fn sort_category(&self, category: &Category, rng: &mut impl Rng) -> Result<CategoryResult> {
        let Some(file) = category.pick(rng) else {
            info!(target: "device", "no images found in {}, skipping", category.name);
            return Ok(CategoryResult::Skipped);
        };
        let name = file.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        info!(target: "device", "camera captured {}/{}", category.name, name);

        let jpeg = fs::read(file).with_context(|| format!("read {}", file.display()))?;
        info!(target: "device", "uploading {} bytes", jpeg.len());
        let reply = self.uploader.upload(&jpeg)?;

        if reply.status != 200 {
            let body = String::from_utf8_lossy(&reply.body).into_owned();
            warn!(target: "cloud", "error {}: {}", reply.status, body);
            return Ok(CategoryResult::Rejected {
                status: reply.status,
                body,
            });
        }

        let bin = BinKind::from_reply(reply.status, &reply.body);
        let report = ClassificationReport::parse(&reply.body);
        let class = report.and_then(|r| r.class).map(str::to_string);
        let command = report.and_then(|r| r.command).map(str::to_string);

        info!(
            target: "cloud",
            "detected {}",
            class.as_deref().unwrap_or("-").to_uppercase()
        );
        info!(target: "cloud", "command {}", command.as_deref().unwrap_or("-"));

        let correct = class
            .as_deref()
            .is_some_and(|class| class.contains(category.name.as_str()));
        if correct {
            info!(target: "device", "correct prediction, {} bin", bin);
        } else {
            info!(target: "device", "incorrect prediction, {} bin", bin);
        }

        Ok(CategoryResult::Classified {
            file: file.to_path_buf(),
            class,
            command,
            bin,
            correct,
        })
    }
}
