pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

/// Human readable device name
pub const DEVICE_NAME: &str = crate::infrastructure::config::DEVICE.name;
