mod classifier;

pub use classifier::HttpClassifier;
