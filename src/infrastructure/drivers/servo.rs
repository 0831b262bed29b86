use dustbin_core::{BinActuator, ServoAngle, ServoCalibration};
use embassy_time::{Duration, Timer};
use esp_hal::gpio::DriveMode;
use esp_hal::gpio::interconnect::PeripheralOutput;
use esp_hal::ledc::channel::{self, ChannelHW as _, ChannelIFace as _};
use esp_hal::ledc::timer::{self, TimerIFace as _};
use esp_hal::ledc::{LSGlobalClkSource, Ledc, LowSpeed};
use esp_hal::peripherals::LEDC;
use esp_hal::time::Rate;
use log::debug;

use crate::infrastructure::config;
use crate::mk_static;

const DUTY_BITS: u8 = 14;

#[derive(Debug)]
pub enum ServoError {
    Timer(timer::Error),
    Channel(channel::Error),
}

/// Hobby servo driven by a low speed LEDC channel.
pub struct EspServo {
    channel: channel::Channel<'static, LowSpeed>,
    calibration: ServoCalibration,
    position: Option<ServoAngle>,
}

impl EspServo {
    /// Configure LEDC timer 0 for the servo refresh rate and bind channel 0
    /// to the pin. The output stays low until the first move.
    pub fn new(
        ledc: LEDC<'static>,
        pin: impl PeripheralOutput<'static>,
        calibration: ServoCalibration,
    ) -> Result<Self, ServoError> {
        let ledc = mk_static!(Ledc<'static>, Ledc::new(ledc));
        ledc.set_global_slow_clock(LSGlobalClkSource::APBClk);

        let lstimer = mk_static!(
            timer::Timer<'static, LowSpeed>,
            ledc.timer::<LowSpeed>(timer::Number::Timer0)
        );
        lstimer
            .configure(timer::config::Config {
                duty: timer::config::Duty::Duty14Bit,
                clock_source: timer::LSClockSource::APBClk,
                frequency: Rate::from_hz(calibration.frequency_hz()),
            })
            .map_err(ServoError::Timer)?;
        let lstimer: &'static timer::Timer<'static, LowSpeed> = lstimer;

        let mut channel = ledc.channel(channel::Number::Channel0, pin);
        channel
            .configure(channel::config::Config {
                timer: lstimer,
                duty_pct: 0,
                drive_mode: DriveMode::PushPull,
            })
            .map_err(ServoError::Channel)?;

        Ok(Self {
            channel,
            calibration,
            position: None,
        })
    }

    /// Servo with the configured calibration.
    pub fn from_config(
        ledc: LEDC<'static>,
        pin: impl PeripheralOutput<'static>,
    ) -> Result<Self, ServoError> {
        Self::new(ledc, pin, config::SORTING.servo)
    }

    /// Move the flap over the general bin.
    pub async fn park(&mut self) -> Result<(), ServoError> {
        self.move_to(config::SORTING.positions.general).await
    }
}

impl BinActuator for EspServo {
    type Error = ServoError;

    async fn move_to(&mut self, angle: ServoAngle) -> Result<(), Self::Error> {
        let duty = self.calibration.duty(angle, DUTY_BITS);
        debug!("servo: {} -> duty {}", angle, duty);
        self.channel.set_duty_hw(duty);

        if self.position != Some(angle) {
            Timer::after(Duration::from_millis(config::SORTING.servo_settle_ms)).await;
        }
        self.position = Some(angle);
        Ok(())
    }
}
