use core::fmt;

use crate::hint::BinKind;

/// Waste categories the cloud classifier answers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Battery,
    Biological,
    BrownGlass,
    Cardboard,
    Clothes,
    GreenGlass,
    Metal,
    Paper,
    Plastic,
    Shoes,
    Trash,
    WhiteGlass,
}

impl Material {
    pub const ALL: [Material; 12] = [
        Material::Battery,
        Material::Biological,
        Material::BrownGlass,
        Material::Cardboard,
        Material::Clothes,
        Material::GreenGlass,
        Material::Metal,
        Material::Paper,
        Material::Plastic,
        Material::Shoes,
        Material::Trash,
        Material::WhiteGlass,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Material::Battery => "battery",
            Material::Biological => "biological",
            Material::BrownGlass => "brown-glass",
            Material::Cardboard => "cardboard",
            Material::Clothes => "clothes",
            Material::GreenGlass => "green-glass",
            Material::Metal => "metal",
            Material::Paper => "paper",
            Material::Plastic => "plastic",
            Material::Shoes => "shoes",
            Material::Trash => "trash",
            Material::WhiteGlass => "white-glass",
        }
    }

    /// Parse a classifier label, ignoring surrounding whitespace and case.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(label))
    }

    /// Whether the backend sends this material to the recycle bin.
    pub const fn is_recyclable(self) -> bool {
        !matches!(
            self,
            Material::Battery | Material::Biological | Material::Trash
        )
    }

    pub const fn bin(self) -> BinKind {
        if self.is_recyclable() {
            BinKind::Recycle
        } else {
            BinKind::General
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
