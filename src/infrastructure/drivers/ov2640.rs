//! OV2640 bring-up over SCCB.
//!
//! Puts the sensor into JPEG output at QVGA. Register values follow the
//! usual OV2640 JPEG init sequence; only what the sorter needs is kept.

use embassy_time::{Duration, Timer};
use esp_hal::Blocking;
use esp_hal::i2c::master::{Error as I2cError, I2c};
use log::debug;

const SCCB_ADDRESS: u8 = 0x30;

/// Register bank select, 0 = DSP, 1 = sensor
const BANK_SELECT: u8 = 0xFF;
const BANK_DSP: u8 = 0x00;
const BANK_SENSOR: u8 = 0x01;

const COM7: u8 = 0x12;
const COM7_SRST: u8 = 0x80;
const PIDH: u8 = 0x0A;
const OV2640_PID: u8 = 0x26;

/// Common sensor and DSP setup
const INIT: &[(u8, u8)] = &[
    (BANK_SELECT, BANK_DSP),
    (0x2C, 0xFF),
    (0x2E, 0xDF),
    (BANK_SELECT, BANK_SENSOR),
    (0x3C, 0x32),
    (0x11, 0x00),
    (0x09, 0x02),
    (0x04, 0x28),
    (0x13, 0xE5),
    (0x14, 0x48),
    (0x2C, 0x0C),
    (0x33, 0x78),
    (0x3A, 0x33),
    (0x3B, 0xFB),
    (0x3E, 0x00),
    (0x43, 0x11),
    (0x16, 0x10),
    (0x39, 0x92),
    (0x35, 0xDA),
    (0x22, 0x1A),
    (0x37, 0xC3),
    (0x23, 0x00),
    (0x34, 0xC0),
    (0x36, 0x1A),
    (0x06, 0x88),
    (0x07, 0xC0),
    (0x0D, 0x87),
    (0x0E, 0x41),
    (0x4C, 0x00),
    (0x48, 0x00),
    (0x5B, 0x00),
    (0x42, 0x03),
    (0x4A, 0x81),
    (0x21, 0x99),
    (0x24, 0x40),
    (0x25, 0x38),
    (0x26, 0x82),
    (0x5C, 0x00),
    (0x63, 0x00),
    (0x61, 0x70),
    (0x62, 0x80),
    (0x7C, 0x05),
    (0x20, 0x80),
    (0x28, 0x30),
    (0x6C, 0x00),
    (0x6D, 0x80),
    (0x6E, 0x00),
    (0x70, 0x02),
    (0x71, 0x94),
    (0x73, 0xC1),
    (0x3D, 0x34),
    (0x5A, 0x57),
    (0x4F, 0xBB),
    (0x50, 0x9C),
    (BANK_SELECT, BANK_DSP),
    (0xE5, 0x7F),
    (0xF9, 0xC0),
    (0x41, 0x24),
    (0xE0, 0x14),
    (0x76, 0xFF),
    (0x33, 0xA0),
    (0x42, 0x20),
    (0x43, 0x18),
    (0x4C, 0x00),
    (0x87, 0xD5),
    (0x88, 0x3F),
    (0xD7, 0x03),
    (0xD9, 0x10),
    (0xD3, 0x82),
    (0xC8, 0x08),
    (0xC9, 0x80),
    (0xC2, 0x0C),
    (0xC3, 0xED),
    (0xDA, 0x00),
    (0xE5, 0x1F),
    (0xE1, 0x67),
    (0xE0, 0x00),
    (0xDD, 0x7F),
    (0x05, 0x00),
];

/// JPEG output format
const JPEG: &[(u8, u8)] = &[
    (BANK_SELECT, BANK_DSP),
    (0xE0, 0x14),
    (0xE1, 0x77),
    (0xE5, 0x1F),
    (0xD7, 0x03),
    (0xDA, 0x10),
    (0xE0, 0x00),
    (BANK_SELECT, BANK_SENSOR),
    (0x04, 0x08),
];

/// 320x240 output window
const QVGA: &[(u8, u8)] = &[
    (BANK_SELECT, BANK_SENSOR),
    (0x12, 0x40),
    (0x17, 0x11),
    (0x18, 0x43),
    (0x19, 0x00),
    (0x1A, 0x4B),
    (0x32, 0x09),
    (0x4F, 0xCA),
    (0x50, 0xA8),
    (0x5A, 0x23),
    (0x6D, 0x00),
    (0x39, 0x12),
    (0x35, 0xDA),
    (0x22, 0x1A),
    (0x37, 0xC3),
    (0x23, 0x00),
    (0x34, 0xC0),
    (0x36, 0x1A),
    (0x06, 0x88),
    (0x07, 0xC0),
    (0x0D, 0x87),
    (0x0E, 0x41),
    (0x4C, 0x00),
    (BANK_SELECT, BANK_DSP),
    (0xE0, 0x04),
    (0xC0, 0x64),
    (0xC1, 0x4B),
    (0x86, 0x35),
    (0x50, 0x89),
    (0x51, 0xC8),
    (0x52, 0x96),
    (0x53, 0x00),
    (0x54, 0x00),
    (0x55, 0x00),
    (0x57, 0x00),
    (0x5A, 0x50),
    (0x5B, 0x3C),
    (0x5C, 0x00),
    (0xE0, 0x00),
];

#[derive(Debug)]
pub enum SensorError {
    Bus(I2cError),
    /// Something answered on the bus, but it is not an OV2640
    UnknownSensor(u8),
}

impl From<I2cError> for SensorError {
    fn from(err: I2cError) -> Self {
        SensorError::Bus(err)
    }
}

pub(super) struct Ov2640<'d> {
    i2c: I2c<'d, Blocking>,
}

impl<'d> Ov2640<'d> {
    pub(super) fn new(i2c: I2c<'d, Blocking>) -> Self {
        Self { i2c }
    }

    /// Reset the sensor and configure JPEG QVGA output.
    ///
    /// The master clock must already be running.
    pub(super) async fn init(&mut self) -> Result<(), SensorError> {
        self.write(BANK_SELECT, BANK_SENSOR)?;
        self.write(COM7, COM7_SRST)?;
        Timer::after(Duration::from_millis(10)).await;

        let pid = self.read(PIDH)?;
        if pid != OV2640_PID {
            return Err(SensorError::UnknownSensor(pid));
        }
        debug!("camera: ov2640 found");

        self.write_table(INIT)?;
        Timer::after(Duration::from_millis(10)).await;
        self.write_table(JPEG)?;
        self.write_table(QVGA)?;

        Ok(())
    }

    fn write_table(&mut self, table: &[(u8, u8)]) -> Result<(), SensorError> {
        for &(reg, value) in table {
            self.write(reg, value)?;
        }
        Ok(())
    }

    fn write(&mut self, reg: u8, value: u8) -> Result<(), SensorError> {
        self.i2c.write(SCCB_ADDRESS, &[reg, value])?;
        Ok(())
    }

    fn read(&mut self, reg: u8) -> Result<u8, SensorError> {
        let mut value = [0u8; 1];
        // SCCB has no repeated start
        self.i2c.write(SCCB_ADDRESS, &[reg])?;
        self.i2c.read(SCCB_ADDRESS, &mut value)?;
        Ok(value[0])
    }
}
