use core::fmt;

/// Highest angle a hobby servo accepts.
pub const MAX_ANGLE: u8 = 180;

/// Servo target angle in degrees, always within `0..=180`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ServoAngle(u8);

impl ServoAngle {
    pub const ZERO: Self = Self(0);
    pub const RIGHT: Self = Self(90);

    /// Create an angle, clamping anything above 180 degrees.
    pub const fn new(degrees: u8) -> Self {
        if degrees > MAX_ANGLE {
            Self(MAX_ANGLE)
        } else {
            Self(degrees)
        }
    }

    pub const fn degrees(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ServoAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}deg", self.0)
    }
}

/// Servo positions of the two bins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinPositions {
    pub recycle: ServoAngle,
    pub general: ServoAngle,
}

impl BinPositions {
    pub const fn new() -> Self {
        Self {
            recycle: ServoAngle::RIGHT,
            general: ServoAngle::ZERO,
        }
    }
}

impl Default for BinPositions {
    fn default() -> Self {
        Self::new()
    }
}

/// PWM pulse parameters of the servo.
///
/// Defaults match an SG90: 500 us at 0 degrees, 2500 us at 180 degrees,
/// 50 Hz refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoCalibration {
    pub min_pulse_us: u32,
    pub max_pulse_us: u32,
    pub period_us: u32,
    pub max_angle: u8,
}

impl ServoCalibration {
    pub const fn sg90() -> Self {
        Self {
            min_pulse_us: 500,
            max_pulse_us: 2500,
            period_us: 20_000,
            max_angle: MAX_ANGLE,
        }
    }

    /// PWM frequency matching the period, 0 for a zero period.
    pub const fn frequency_hz(&self) -> u32 {
        if self.period_us == 0 {
            return 0;
        }
        1_000_000 / self.period_us
    }

    /// Pulse width for the angle.
    pub const fn pulse_us(&self, angle: ServoAngle) -> u32 {
        let max_angle = if self.max_angle == 0 { 1 } else { self.max_angle as u32 };
        let mut degrees = angle.degrees() as u32;
        if degrees > max_angle {
            degrees = max_angle;
        }
        let span = self.max_pulse_us.saturating_sub(self.min_pulse_us);
        let offset = degrees as u64 * span as u64 / max_angle as u64;
        self.min_pulse_us.saturating_add(offset as u32)
    }

    /// Duty value for a PWM timer with `duty_bits` of resolution.
    ///
    /// Never exceeds full duty; a zero period gives no output.
    pub const fn duty(&self, angle: ServoAngle, duty_bits: u8) -> u32 {
        if self.period_us == 0 {
            return 0;
        }
        let max_duty = 1u64 << duty_bits;
        let duty = self.pulse_us(angle) as u64 * max_duty / self.period_us as u64;
        if duty > max_duty { max_duty as u32 } else { duty as u32 }
    }
}

impl Default for ServoCalibration {
    fn default() -> Self {
        Self::sg90()
    }
}
