use core::fmt;

use crate::http::is_success;
use crate::servo::{BinPositions, ServoAngle};

/// Token the classifier puts into the reply when the item is recyclable.
pub const RECYCLE_TOKEN: &[u8] = b"Recycle";

/// Bin the item should be dropped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinKind {
    Recycle,
    General,
}

impl BinKind {
    /// Decide the bin from a classifier reply.
    ///
    /// Only a successful reply that mentions `Recycle` anywhere in the body
    /// selects the recycle bin. Error statuses, empty and malformed bodies
    /// all fall through to the general bin.
    pub fn from_reply(status: u16, body: &[u8]) -> Self {
        if !is_success(status) {
            return BinKind::General;
        }
        if contains(body, RECYCLE_TOKEN) {
            BinKind::Recycle
        } else {
            BinKind::General
        }
    }

    /// Servo angle for this bin.
    pub const fn target_angle(self, positions: &BinPositions) -> ServoAngle {
        match self {
            BinKind::Recycle => positions.recycle,
            BinKind::General => positions.general,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            BinKind::Recycle => "Recycle",
            BinKind::General => "General",
        }
    }
}

impl fmt::Display for BinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}
