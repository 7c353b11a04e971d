//! Raw light and group snapshots as reported by the bridge.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::state::LightState;

/// Aggregate on/off state of a group's member lights.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GroupAggregate {
    /// At least one member light is on.
    pub any_on: bool,
    /// Every member light is on.
    pub all_on: bool,
}

/// A group (room, zone, luminaire) as reported by the bridge.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroupSnapshot {
    pub name: String,
    #[serde(rename = "type", default)]
    pub group_type: String,
    /// Ids of the member lights.
    #[serde(default)]
    pub lights: Vec<String>,
    pub state: GroupAggregate,
    /// The state last applied to the group as a whole.
    pub action: LightState,
}

impl GroupSnapshot {
    /// Overwrite `action.on` with the aggregate `any_on` flag.
    ///
    /// The bridge's recorded group action can read off while a member light
    /// is still on; a toggle built on the action flag alone would then show
    /// the wrong state. Idempotent; applied once per fetch and never written
    /// back to the bridge.
    pub fn normalize(&mut self) {
        self.action.on = Some(self.state.any_on);
    }
}

/// Normalize every group snapshot in a fetch result. See
/// [`GroupSnapshot::normalize`].
pub fn normalize_groups(groups: &mut HashMap<String, GroupSnapshot>) {
    for group in groups.values_mut() {
        group.normalize();
    }
}

/// A single light as reported by the bridge.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LightSnapshot {
    pub name: String,
    #[serde(rename = "type", default)]
    pub light_type: String,
    #[serde(rename = "modelid", default)]
    pub model_id: String,
    #[serde(rename = "uniqueid", default)]
    pub unique_id: String,
    #[serde(rename = "swversion", default)]
    pub sw_version: String,
    pub state: LightState,
}
