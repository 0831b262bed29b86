use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;

/// A labelled image folder, one sub-directory per category.
#[derive(Debug, Clone)]
pub struct Dataset {
    root: PathBuf,
}

/// One category directory and the image files in it.
#[derive(Debug, Clone)]
pub struct Category {
    pub name: String,
    pub files: Vec<PathBuf>,
}

impl Dataset {
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            anyhow::bail!("dataset path {} is not a directory", root.display());
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Category directories sorted by name.
    pub fn categories(&self) -> Result<Vec<Category>> {
        let mut categories = Vec::new();
        for entry in fs::read_dir(&self.root)
            .with_context(|| format!("read dataset {}", self.root.display()))?
        {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            categories.push(Category {
                name: name.to_string(),
                files: list_files(&path)?,
            });
        }
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

impl Category {
    /// Random file of the category, `None` when it is empty.
    pub fn pick(&self, rng: &mut impl Rng) -> Option<&Path> {
        self.files.choose(rng).map(PathBuf::as_path)
    }
}

fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read category {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
