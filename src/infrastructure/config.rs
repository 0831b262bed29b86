#![allow(clippy::unreadable_literal)]

use dustbin_core::{BinPositions, ServoCalibration, UploadEncoding};

pub(crate) struct WifiConfig {
    pub ssid: &'static str,
    pub password: &'static str,
}

pub(crate) struct DeviceConfig {
    pub name: &'static str,
    pub hostname: &'static str,
}

pub(crate) struct ClassifierConfig {
    pub url: &'static str,
    pub encoding: UploadEncoding,
    pub timeout_secs: u64,
    pub user_agent: &'static str,
}

pub(crate) struct SortingConfig {
    pub interval_ms: u32,
    pub positions: BinPositions,
    pub servo: ServoCalibration,
    /// Time the flap needs to reach its position
    pub servo_settle_ms: u64,
}

pub(crate) struct CameraConfig {
    pub xclk_mhz: u32,
    /// Frames thrown away after power up while exposure settles
    pub warmup_frames: u8,
    pub capture_timeout_ms: u64,
}

pub(crate) const WIFI: WifiConfig = WifiConfig {
    ssid: env!("WIFI_SSID"),
    password: env!("WIFI_PASSWORD"),
};

pub(crate) const DEVICE: DeviceConfig = DeviceConfig {
    name: "Smart Dustbin",
    hostname: "smart-dustbin",
};

pub(crate) const CLASSIFIER: ClassifierConfig = ClassifierConfig {
    url: env!("CLASSIFIER_URL"),
    #[cfg(feature = "multipart-upload")]
    encoding: UploadEncoding::Multipart,
    #[cfg(not(feature = "multipart-upload"))]
    encoding: UploadEncoding::RawJpeg,
    timeout_secs: 20,
    user_agent: concat!("dustbin-firmware/", env!("CARGO_PKG_VERSION")),
};

pub(crate) const SORTING: SortingConfig = SortingConfig {
    interval_ms: 5000,
    positions: BinPositions::new(),
    servo: ServoCalibration::sg90(),
    servo_settle_ms: 400,
};

pub(crate) const CAMERA: CameraConfig = CameraConfig {
    xclk_mhz: 20,
    warmup_frames: 2,
    capture_timeout_ms: 2000,
};

#[macro_export]
macro_rules! servo_gpio {
    ($p:expr) => {
        $p.GPIO21
    };
}

/// OV2640 wiring of ESP32-S3-EYE compatible camera boards
#[macro_export]
macro_rules! camera_pins {
    ($p:expr) => {
        $crate::infrastructure::drivers::CameraPins {
            xclk: $p.GPIO15.into(),
            pclk: $p.GPIO13.into(),
            vsync: $p.GPIO6.into(),
            href: $p.GPIO7.into(),
            sda: $p.GPIO4.into(),
            scl: $p.GPIO5.into(),
            data: [
                $p.GPIO11.into(),
                $p.GPIO9.into(),
                $p.GPIO8.into(),
                $p.GPIO10.into(),
                $p.GPIO12.into(),
                $p.GPIO18.into(),
                $p.GPIO17.into(),
                $p.GPIO16.into(),
            ],
        }
    };
}
