//! Sparse state payload for lights and groups.

use serde::{Deserialize, Serialize};

use crate::types::{Alert, ColorMode, Effect};

/// A state object to send to (or read from) a Hue light or group.
///
/// Every field is optional. On writes, absent fields are left unchanged by
/// the bridge and only the fields explicitly set are serialized; on reads,
/// absent fields were not reported by the bridge. Field ranges are the
/// bridge's responsibility and are not validated locally.
///
/// # Creating a state
///
/// You can create a state in two ways:
///
/// 1. **From a single attribute** using the [`From`] trait:
///    ```
///    use hue_bridge_rs::{Alert, LightState};
///    let state = LightState::from(&Alert::Select);
///    ```
///
/// 2. **Builder pattern** for combining multiple attributes:
///    ```
///    use hue_bridge_rs::LightState;
///    let mut state = LightState::new();
///    state.on(true);
///    state.brightness(200);
///    ```
#[serde_with::skip_serializing_none]
#[derive(Default, Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LightState {
    pub(crate) on: Option<bool>,
    pub(crate) bri: Option<u8>,
    pub(crate) hue: Option<u16>,
    pub(crate) sat: Option<u8>,
    pub(crate) xy: Option<[f64; 2]>,
    pub(crate) ct: Option<u16>,
    pub(crate) alert: Option<Alert>,
    pub(crate) effect: Option<Effect>,
    pub(crate) transitiontime: Option<u16>,
    pub(crate) colormode: Option<ColorMode>,
    // groups/rooms only //
    pub(crate) scene: Option<String>,
}

impl LightState {
    /// Create a new empty state.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::LightState;
    ///
    /// let state = LightState::new();
    /// assert!(state.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether no attribute has been set.
    ///
    /// Writing an empty state asks the bridge to change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Set the on/off state.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::LightState;
    ///
    /// let mut state = LightState::new();
    /// state.on(false);
    /// assert_eq!(state.is_on(), Some(false));
    /// ```
    pub fn on(&mut self, on: bool) {
        self.on = Some(on);
    }

    /// Set the brightness (1-254).
    pub fn brightness(&mut self, bri: u8) {
        self.bri = Some(bri);
    }

    /// Set the hue angle (0-65535 maps to 0-360 degrees).
    pub fn hue(&mut self, hue: u16) {
        self.hue = Some(hue);
    }

    /// Set the saturation (0-254).
    pub fn saturation(&mut self, sat: u8) {
        self.sat = Some(sat);
    }

    /// Set the color as CIE chromaticity coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::LightState;
    ///
    /// let mut state = LightState::new();
    /// state.xy(0.675, 0.322); // red
    /// ```
    pub fn xy(&mut self, x: f64, y: f64) {
        self.xy = Some([x, y]);
    }

    /// Set the mired color temperature (153-500).
    pub fn color_temp(&mut self, ct: u16) {
        self.ct = Some(ct);
    }

    /// Set the alert mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::{Alert, LightState};
    ///
    /// let mut state = LightState::new();
    /// state.alert(&Alert::LSelect);
    /// ```
    pub fn alert(&mut self, alert: &Alert) {
        self.alert = Some(alert.clone());
    }

    /// Set the dynamic effect.
    pub fn effect(&mut self, effect: &Effect) {
        self.effect = Some(*effect);
    }

    /// Set the transition time in multiples of 100ms.
    pub fn transition_time(&mut self, deciseconds: u16) {
        self.transitiontime = Some(deciseconds);
    }

    /// Set the color mode the light should honor.
    pub fn color_mode(&mut self, mode: &ColorMode) {
        self.colormode = Some(*mode);
    }

    /// Set the scene to recall. Only meaningful for groups.
    pub fn scene(&mut self, scene: &str) {
        self.scene = Some(scene.to_string());
    }

    /// Get the on/off state, if reported.
    pub fn is_on(&self) -> Option<bool> {
        self.on
    }

    /// Get the brightness, if reported.
    pub fn bri(&self) -> Option<u8> {
        self.bri
    }

    /// Get the hue angle, if reported.
    pub fn hue_value(&self) -> Option<u16> {
        self.hue
    }

    /// Get the saturation, if reported.
    pub fn sat(&self) -> Option<u8> {
        self.sat
    }

    /// Get the chromaticity coordinates, if reported.
    pub fn xy_value(&self) -> Option<[f64; 2]> {
        self.xy
    }

    /// Get the mired color temperature, if reported.
    pub fn ct(&self) -> Option<u16> {
        self.ct
    }

    /// Get the alert mode, if reported.
    pub fn alert_mode(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    /// Get the dynamic effect, if reported.
    pub fn effect_mode(&self) -> Option<Effect> {
        self.effect
    }

    /// Get the color mode, if reported.
    pub fn color_mode_value(&self) -> Option<ColorMode> {
        self.colormode
    }

    /// Get the scene identifier, if reported.
    pub fn scene_id(&self) -> Option<&str> {
        self.scene.as_deref()
    }
}

impl From<&Alert> for LightState {
    fn from(alert: &Alert) -> Self {
        let mut state = LightState::new();
        state.alert(alert);
        state
    }
}

impl From<&Effect> for LightState {
    fn from(effect: &Effect) -> Self {
        let mut state = LightState::new();
        state.effect(effect);
        state
    }
}
