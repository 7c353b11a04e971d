//! Bridge configuration snapshot.

use serde::{Deserialize, Serialize};

/// Read-only configuration of a Hue bridge, as returned by the bridge
/// itself. Fetched after authentication to obtain the canonical bridge id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BridgeConfig {
    #[serde(rename = "apiversion")]
    pub api_version: String,
    /// Stable identifier of the bridge. The bridge reports it uppercased;
    /// callers normalize to lowercase before comparing or storing.
    #[serde(rename = "bridgeid")]
    pub bridge_id: String,
    #[serde(rename = "datastoreversion", default)]
    pub datastore_version: String,
    #[serde(rename = "factorynew", default)]
    pub factory_new: bool,
    pub mac: String,
    #[serde(rename = "modelid")]
    pub model_id: String,
    pub name: String,
    #[serde(rename = "replacesbridgeid", default)]
    pub replaces_bridge_id: Option<String>,
    #[serde(rename = "starterkitid", default)]
    pub starter_kit_id: String,
    #[serde(rename = "swversion")]
    pub sw_version: String,
}
