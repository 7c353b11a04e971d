//! Temporary visual alert modes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A temporary change applied to a light's state to get the user's attention.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Alert {
    /// No alert active
    None,
    /// One breathe cycle
    Select,
    /// Breathe cycles for 15 seconds
    LSelect,
}

impl Alert {
    /// Parse an alert mode from its wire name.
    ///
    /// Returns `None` for unknown names.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::Alert;
    ///
    /// assert_eq!(Alert::create("lselect"), Some(Alert::LSelect));
    /// assert_eq!(Alert::create("strobe"), None);
    /// ```
    pub fn create(name: &str) -> Option<Self> {
        Alert::from_str(name).ok()
    }
}
