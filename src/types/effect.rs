//! Dynamic light effects.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A dynamic effect a light can run on its own.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Effect {
    /// No effect active
    None,
    /// Cycle through all hues at the current brightness and saturation
    ColorLoop,
}

impl Effect {
    /// Parse an effect from its wire name.
    pub fn create(name: &str) -> Option<Self> {
        Effect::from_str(name).ok()
    }
}
