//! Foil flag derivation from free-text condition fields

use std::fmt;

/// Whether a listing is a foil printing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoilFlag {
    Foil,
    Normal,
}

impl FoilFlag {
    /// Text form used as the second half of a lookup key
    pub fn as_str(self) -> &'static str {
        match self {
            FoilFlag::Foil => "foil",
            FoilFlag::Normal => "normal",
        }
    }

    /// True if `value` is one of the flag's own text forms
    pub fn is_flag_text(value: &str) -> bool {
        value == FoilFlag::Foil.as_str() || value == FoilFlag::Normal.as_str()
    }
}

impl fmt::Display for FoilFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive keyword search over condition text
#[derive(Debug, Clone)]
pub struct FoilDetector {
    keyword: String,
}

impl FoilDetector {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
        }
    }

    pub fn detect(&self, condition: &str) -> FoilFlag {
        if condition.to_lowercase().contains(&self.keyword) {
            FoilFlag::Foil
        } else {
            FoilFlag::Normal
        }
    }
}
