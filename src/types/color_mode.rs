//! Color mode reported by lights and groups.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which color dimension a light last had set.
///
/// Reported by the bridge on reads; on writes it selects which of the
/// overlapping color fields (hue/sat, xy, ct) the light should honor.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ColorMode {
    /// Hue and saturation
    Hs,
    /// CIE chromaticity coordinates
    Xy,
    /// Mired color temperature
    Ct,
}

impl ColorMode {
    /// Parse a color mode from its wire name.
    pub fn create(name: &str) -> Option<Self> {
        ColorMode::from_str(name).ok()
    }
}
