use crate::hint::BinKind;

/// Running counters of the sorting loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortingStats {
    /// Capture attempts
    pub cycles: u32,
    /// Items sent to the recycle bin
    pub recycle: u32,
    /// Items sent to the general bin
    pub general: u32,
    pub capture_failures: u32,
    pub delivery_failures: u32,
    pub actuation_failures: u32,
}

impl SortingStats {
    pub const fn new() -> Self {
        Self {
            cycles: 0,
            recycle: 0,
            general: 0,
            capture_failures: 0,
            delivery_failures: 0,
            actuation_failures: 0,
        }
    }

    /// Items that reached a bin decision.
    pub const fn sorted(&self) -> u32 {
        self.recycle + self.general
    }

    pub(crate) fn record_bin(&mut self, bin: BinKind) {
        match bin {
            BinKind::Recycle => self.recycle = self.recycle.wrapping_add(1),
            BinKind::General => self.general = self.general.wrapping_add(1),
        }
    }
}
