//! Host side stand-in for the dustbin.
//!
//! Picks one random image per category of a labelled dataset, uploads it to
//! the classification endpoint and checks the answer against the category.

pub mod dataset;
pub mod simulation;
pub mod upload;

pub use dataset::{Category, Dataset};
pub use simulation::{CategoryResult, Simulation, SimulationConfig, Summary};
pub use upload::{HttpUploader, Reply, Uploader};
