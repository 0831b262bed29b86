use dustbin_core::{Frame, FrameError, FrameSource, extract_jpeg};
use embassy_time::{Duration, Instant, Timer};
use esp_hal::dma::{DmaError, DmaRxBuf};
use esp_hal::dma_buffers;
use esp_hal::gpio::AnyPin;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::lcd_cam::LcdCam;
use esp_hal::lcd_cam::cam::{Camera, Config as CamConfig};
use esp_hal::peripherals::{DMA_CH0, I2C0, LCD_CAM};
use esp_hal::time::Rate;
use log::{info, warn};

use super::ov2640::{Ov2640, SensorError};
use crate::infrastructure::config;

/// Room for one QVGA JPEG with some padding around it
const FRAME_BUFFER_SIZE: usize = 32 * 1024;

#[derive(Debug)]
pub enum CameraError {
    Config,
    Buffer,
    Sensor(SensorError),
    Dma(DmaError),
    /// Frame did not finish within the capture timeout
    Timeout,
    /// A previous capture lost the peripheral
    Unavailable,
    Frame(FrameError),
}

impl From<SensorError> for CameraError {
    fn from(err: SensorError) -> Self {
        CameraError::Sensor(err)
    }
}

/// Pins of a DVP camera module.
pub struct CameraPins {
    pub xclk: AnyPin<'static>,
    pub pclk: AnyPin<'static>,
    pub vsync: AnyPin<'static>,
    pub href: AnyPin<'static>,
    pub sda: AnyPin<'static>,
    pub scl: AnyPin<'static>,
    /// D0..D7 (Y2..Y9 on module silkscreens)
    pub data: [AnyPin<'static>; 8],
}

/// OV2640 camera on the LCD_CAM peripheral.
///
/// The DMA buffer is reused for every capture. A returned frame borrows it,
/// so the next capture can only start once the previous frame is dropped.
pub struct EspCamera {
    camera: Option<Camera<'static>>,
    buffer: Option<DmaRxBuf>,
}

impl EspCamera {
    /// Start the master clock, configure the sensor and warm it up.
    pub async fn new(
        lcd_cam: LCD_CAM<'static>,
        dma: DMA_CH0<'static>,
        i2c: I2C0<'static>,
        pins: CameraPins,
    ) -> Result<Self, CameraError> {
        let (rx_buffer, rx_descriptors, _, _) = dma_buffers!(FRAME_BUFFER_SIZE, 0);
        let buffer =
            DmaRxBuf::new(rx_descriptors, rx_buffer).map_err(|_| CameraError::Buffer)?;

        let [d0, d1, d2, d3, d4, d5, d6, d7] = pins.data;
        let cam_config =
            CamConfig::default().with_frequency(Rate::from_mhz(config::CAMERA.xclk_mhz));
        let lcd_cam = LcdCam::new(lcd_cam);
        let camera = Camera::new(lcd_cam.cam, dma, cam_config)
            .map_err(|_| CameraError::Config)?
            .with_master_clock(pins.xclk)
            .with_pixel_clock(pins.pclk)
            .with_ctrl_pins(pins.vsync, pins.href)
            .with_data0(d0)
            .with_data1(d1)
            .with_data2(d2)
            .with_data3(d3)
            .with_data4(d4)
            .with_data5(d5)
            .with_data6(d6)
            .with_data7(d7);

        let i2c = I2c::new(i2c, I2cConfig::default().with_frequency(Rate::from_khz(100)))
            .map_err(|_| CameraError::Config)?
            .with_sda(pins.sda)
            .with_scl(pins.scl);
        Ov2640::new(i2c).init().await?;

        let mut this = Self {
            camera: Some(camera),
            buffer: Some(buffer),
        };

        for _ in 0..config::CAMERA.warmup_frames {
            if let Err(e) = this.receive().await {
                warn!("camera: warmup frame failed: {:?}", e);
            }
        }
        info!("camera: ready");

        Ok(this)
    }

    /// Run one DMA transfer into the frame buffer.
    async fn receive(&mut self) -> Result<&[u8], CameraError> {
        let (Some(camera), Some(buffer)) = (self.camera.take(), self.buffer.take()) else {
            return Err(CameraError::Unavailable);
        };

        let transfer = match camera.receive(buffer) {
            Ok(transfer) => transfer,
            Err((e, camera, buffer)) => {
                self.camera = Some(camera);
                self.buffer = Some(buffer);
                return Err(CameraError::Dma(e));
            }
        };

        let deadline =
            Instant::now() + Duration::from_millis(config::CAMERA.capture_timeout_ms);
        while !transfer.is_done() {
            if Instant::now() > deadline {
                let (camera, buffer) = transfer.stop();
                self.camera = Some(camera);
                self.buffer = Some(buffer);
                return Err(CameraError::Timeout);
            }
            Timer::after(Duration::from_millis(2)).await;
        }

        let (result, camera, buffer) = transfer.wait();
        self.camera = Some(camera);
        let buffer = self.buffer.insert(buffer);
        result.map_err(CameraError::Dma)?;

        let data = buffer.as_slice();
        let received = buffer.number_of_received_bytes().min(data.len());
        Ok(&data[..received])
    }
}

impl FrameSource for EspCamera {
    type Error = CameraError;

    async fn capture(&mut self) -> Result<Frame<'_>, Self::Error> {
        let raw = self.receive().await?;
        extract_jpeg(raw).map_err(CameraError::Frame)
    }
}
