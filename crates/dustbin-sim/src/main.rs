use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use dustbin_core::UploadEncoding;

use dustbin_sim::{Dataset, HttpUploader, Simulation, SimulationConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Encoding {
    /// Bare JPEG body, as the firmware sends by default
    Raw,
    /// multipart/form-data with a `file` field, as the cloud function expects
    Multipart,
}

impl From<Encoding> for UploadEncoding {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Raw => UploadEncoding::RawJpeg,
            Encoding::Multipart => UploadEncoding::Multipart,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Smart dustbin device simulation")]
struct Args {
    /// Classification endpoint
    #[arg(long, env = "CLOUD_FUNCTION_URL")]
    url: String,

    /// Dataset root with one directory of images per category
    #[arg(long, env = "DATASET_PATH")]
    dataset: PathBuf,

    /// Pause after each category in milliseconds
    #[arg(long, default_value_t = 2000)]
    pause_ms: u64,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = Encoding::Multipart)]
    encoding: Encoding,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let dataset = Dataset::open(&args.dataset)?;
    let uploader = HttpUploader::new(
        args.url,
        args.encoding.into(),
        Duration::from_secs(args.timeout_secs),
    );
    let config = SimulationConfig {
        pause: Duration::from_millis(args.pause_ms),
    };

    Simulation::new(dataset, uploader, config).run(&mut rand::thread_rng())?;
    Ok(())
}
