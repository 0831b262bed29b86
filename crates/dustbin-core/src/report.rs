use serde::Deserialize;

use crate::material::Material;

/// Structured view of the classifier JSON reply.
///
/// ```json
/// {"status": "success", "class": "paper", "bin": "Recycle", "command": "OPEN_RECYCLE"}
/// ```
///
/// Only used for logging. The bin decision is made by
/// [`BinKind::from_reply`](crate::hint::BinKind::from_reply).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ClassificationReport<'a> {
    #[serde(borrow, default)]
    pub status: Option<&'a str>,
    #[serde(borrow, default)]
    pub class: Option<&'a str>,
    #[serde(borrow, default)]
    pub bin: Option<&'a str>,
    #[serde(borrow, default)]
    pub command: Option<&'a str>,
    #[serde(borrow, default)]
    pub error: Option<&'a str>,
}

impl<'a> ClassificationReport<'a> {
    /// Parse a reply body, `None` when it is not the expected JSON object.
    pub fn parse(body: &'a [u8]) -> Option<Self> {
        serde_json_core::from_slice::<Self>(body)
            .ok()
            .map(|(report, _)| report)
    }

    /// Detected material, when the class is one of the known labels.
    pub fn material(&self) -> Option<Material> {
        self.class.and_then(Material::from_label)
    }
}
