//! A connection to a single Hue bridge.

use std::collections::HashMap;

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::config::BridgeConfig;
use crate::errors::Error;
use crate::response::{self, decode_create_user};
use crate::snapshot::{GroupSnapshot, LightSnapshot, normalize_groups};
use crate::state::LightState;

type Result<T> = std::result::Result<T, Error>;

#[derive(Serialize)]
struct CreateUserBody<'a> {
    devicetype: &'a str,
}

/// A session against a single Hue bridge.
///
/// A session is identified by the bridge's network address; the bridge id is
/// stable across rediscoveries while the address may change. A session built
/// without a credential can only create one ([`create_user`]); every other
/// call requires a credential, supplied either at construction, via
/// [`authenticate`], or by a successful [`create_user`].
///
/// [`create_user`]: BridgeSession::create_user
/// [`authenticate`]: BridgeSession::authenticate
///
/// # Example
///
/// ```
/// use hue_bridge_rs::BridgeSession;
///
/// let session = BridgeSession::new("192.168.1.40", Some("stored-credential"));
/// assert!(session.is_authenticated());
/// assert!(!session.is_identified());
/// ```
#[derive(Debug, Clone)]
pub struct BridgeSession {
    ip: String,
    id: Option<String>,
    credential: Option<String>,
    client: reqwest::Client,
}

impl BridgeSession {
    /// Create a session for the bridge at `ip`.
    ///
    /// With a credential the session is immediately usable for
    /// authenticated calls; without one, only [`BridgeSession::create_user`]
    /// is available.
    pub fn new(ip: &str, credential: Option<&str>) -> Self {
        BridgeSession {
            ip: ip.to_string(),
            id: None,
            credential: credential.map(String::from),
            client: reqwest::Client::new(),
        }
    }

    /// Create a session from a discovery descriptor with a known id.
    pub(crate) fn with_identity(ip: String, id: String) -> Self {
        BridgeSession {
            ip,
            id: Some(id),
            credential: None,
            client: reqwest::Client::new(),
        }
    }

    /// Network address of the bridge.
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Stable lowercase bridge id, once resolved.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The credential used for authenticated calls, if any.
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Whether authenticated calls can be issued.
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Whether the session is authenticated and the bridge id is resolved.
    pub fn is_identified(&self) -> bool {
        self.is_authenticated() && self.id.is_some()
    }

    /// Attach a previously stored credential to this session.
    pub fn authenticate(&mut self, credential: &str) {
        self.credential = Some(credential.to_string());
    }

    /// Request a new credential from the bridge.
    ///
    /// The bridge only grants one while its link button is pressed. On
    /// success the credential is stored on the session and the bridge
    /// configuration is fetched immediately to resolve the canonical id
    /// (the session may have been constructed manually rather than via
    /// discovery). Returns `Ok(true)` once the session is identified.
    ///
    /// A structured bridge error fails with [`Error::Bridge`] carrying the
    /// device's own description; a response matching neither shape fails
    /// with [`Error::UnrecognizedResponse`].
    pub async fn create_user(&mut self, application_name: &str) -> Result<bool> {
        debug!("creating user on bridge {}", self.ip);

        let url = format!("http://{}/api", self.ip);
        let body = CreateUserBody {
            devicetype: application_name,
        };
        let response: Value = self.client.post(&url).json(&body).send().await?.json().await?;

        let user = decode_create_user(&response)?;
        self.credential = Some(user.username);

        // Force-load the bridge id now that a credential exists.
        let config = self.get_config().await?;
        self.id = Some(config.bridge_id.to_lowercase());
        Ok(true)
    }

    /// Fetch the bridge configuration snapshot, unmodified.
    pub async fn get_config(&self) -> Result<BridgeConfig> {
        let body = self.get("config").await?;
        serde_json::from_value(body).map_err(Error::JsonLoad)
    }

    /// Fetch all groups, keyed by group id, with each snapshot's `action.on`
    /// normalized to the group's `any_on` aggregate.
    pub async fn get_groups(&self) -> Result<HashMap<String, GroupSnapshot>> {
        let body = self.checked_get("groups").await?;
        let mut groups: HashMap<String, GroupSnapshot> =
            serde_json::from_value(body).map_err(Error::JsonLoad)?;
        normalize_groups(&mut groups);
        Ok(groups)
    }

    /// Fetch all lights, keyed by light id.
    pub async fn get_lights(&self) -> Result<HashMap<String, LightSnapshot>> {
        let body = self.checked_get("lights").await?;
        serde_json::from_value(body).map_err(Error::JsonLoad)
    }

    /// Apply a state to a group. Only the set fields are sent; the raw
    /// bridge response is returned untouched.
    pub async fn set_group_state(&self, group_id: &str, state: &LightState) -> Result<Value> {
        debug!("setting state of group {} on bridge {}", group_id, self.ip);
        self.put(&format!("groups/{}/action", group_id), state).await
    }

    /// Apply a state to an individual light. Same contract as
    /// [`BridgeSession::set_group_state`].
    pub async fn set_light_state(&self, light_id: &str, state: &LightState) -> Result<Value> {
        debug!("setting state of light {} on bridge {}", light_id, self.ip);
        self.put(&format!("lights/{}/state", light_id), state).await
    }

    fn require_credential(&self) -> Result<&str> {
        self.credential.as_deref().ok_or(Error::NotAuthenticated)
    }

    fn user_url(&self, path: &str) -> Result<String> {
        Ok(format!(
            "http://{}/api/{}/{}",
            self.ip,
            self.require_credential()?,
            path
        ))
    }

    async fn get(&self, path: &str) -> Result<Value> {
        let url = self.user_url(path)?;
        let body = self.client.get(&url).send().await?.json().await?;
        Ok(body)
    }

    /// GET a read endpoint and classify unauthorized-class bridge errors.
    ///
    /// Error-shaped bodies with another type code are left for the caller's
    /// decode to reject; they are neither swallowed nor classified.
    async fn checked_get(&self, path: &str) -> Result<Value> {
        let body = self.get(path).await?;
        if let Some(error) = response::fetch_error(&body)
            && error.error_type == response::UNAUTHORIZED_USER
        {
            return Err(Error::bridge(error.description));
        }
        Ok(body)
    }

    async fn put(&self, path: &str, state: &LightState) -> Result<Value> {
        let url = self.user_url(path)?;
        let body = self.client.put(&url).json(state).send().await?.json().await?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const CONFIG_BODY: &str = r#"{
        "name": "Philips hue",
        "datastoreversion": "126",
        "swversion": "1962097030",
        "apiversion": "1.62.0",
        "mac": "00:17:88:ab:cd:ef",
        "bridgeid": "001788FFFEABCDEF",
        "factorynew": false,
        "replacesbridgeid": null,
        "modelid": "BSB002",
        "starterkitid": ""
    }"#;

    #[test]
    fn test_session_states() {
        let mut session = BridgeSession::new("10.0.0.5", None);
        assert!(!session.is_authenticated());
        assert!(!session.is_identified());

        session.authenticate("tok");
        assert!(session.is_authenticated());
        assert!(!session.is_identified());
    }

    #[tokio::test]
    async fn test_reads_require_credential() {
        let session = BridgeSession::new("10.0.0.5", None);
        assert_eq!(
            session.get_groups().await.unwrap_err(),
            Error::NotAuthenticated
        );
        assert_eq!(
            session.get_config().await.unwrap_err(),
            Error::NotAuthenticated
        );
    }

    #[tokio::test]
    async fn test_create_user_success_resolves_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api")
            .with_body(r#"[{"success": {"username": "new-credential"}}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/api/new-credential/config")
            .with_body(CONFIG_BODY)
            .create_async()
            .await;

        let mut session = BridgeSession::new(&server.host_with_port(), None);
        assert!(session.create_user("huey#living room").await.unwrap());

        assert_eq!(session.credential(), Some("new-credential"));
        assert_eq!(session.id(), Some("001788fffeabcdef"));
        assert!(session.is_identified());
    }

    #[tokio::test]
    async fn test_create_user_link_button_not_pressed() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api")
            .with_body(r#"[{"error": {"type": 101, "address": "", "description": "link button not pressed"}}]"#)
            .create_async()
            .await;

        let mut session = BridgeSession::new(&server.host_with_port(), None);
        let err = session.create_user("huey").await.unwrap_err();
        assert_eq!(err, Error::bridge("link button not pressed"));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_create_user_unrecognized_response() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api")
            .with_body("[]")
            .create_async()
            .await;

        let mut session = BridgeSession::new(&server.host_with_port(), None);
        assert!(matches!(
            session.create_user("huey").await,
            Err(Error::UnrecognizedResponse)
        ));
    }

    #[tokio::test]
    async fn test_get_groups_normalizes_any_on() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tok/groups")
            .with_body(
                json!({
                    "group1": {
                        "name": "Kitchen",
                        "type": "Room",
                        "lights": ["1"],
                        "state": {"any_on": true, "all_on": false},
                        "action": {"on": false, "bri": 254},
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let session = BridgeSession::new(&server.host_with_port(), Some("tok"));
        let groups = session.get_groups().await.unwrap();
        assert_eq!(groups["group1"].action.is_on(), Some(true));
        assert_eq!(groups["group1"].action.bri(), Some(254));
    }

    #[tokio::test]
    async fn test_get_groups_unauthorized_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tok/groups")
            .with_body(r#"[{"error": {"type": "1", "address": "/groups", "description": "unauthorized user"}}]"#)
            .create_async()
            .await;

        let session = BridgeSession::new(&server.host_with_port(), Some("tok"));
        let err = session.get_groups().await.unwrap_err();
        assert_eq!(err, Error::bridge("unauthorized user"));
    }

    #[tokio::test]
    async fn test_get_lights_other_error_type_not_classified() {
        // type 7 is not the unauthorized class: the body simply fails the
        // map decode, and that failure propagates unswallowed.
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tok/lights")
            .with_body(r#"[{"error": {"type": "7", "address": "/lights", "description": "invalid value"}}]"#)
            .create_async()
            .await;

        let session = BridgeSession::new(&server.host_with_port(), Some("tok"));
        assert!(matches!(
            session.get_lights().await,
            Err(Error::JsonLoad(_))
        ));
    }

    #[tokio::test]
    async fn test_get_lights() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/tok/lights")
            .with_body(
                json!({
                    "1": {
                        "name": "Hallway",
                        "type": "Dimmable light",
                        "modelid": "LWB006",
                        "uniqueid": "00:17:88:01:00:ab:cd:ef-0b",
                        "swversion": "5.105.0",
                        "state": {"on": true, "bri": 180, "reachable": true},
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let session = BridgeSession::new(&server.host_with_port(), Some("tok"));
        let lights = session.get_lights().await.unwrap();
        assert_eq!(lights["1"].name, "Hallway");
        assert_eq!(lights["1"].state.bri(), Some(180));
    }

    #[tokio::test]
    async fn test_set_group_state_serializes_only_set_fields() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/api/tok/groups/1/action")
            .match_body(mockito::Matcher::Json(json!({"on": true, "bri": 100})))
            .with_body(r#"[{"success": {"/groups/1/action/on": true}}]"#)
            .create_async()
            .await;

        let session = BridgeSession::new(&server.host_with_port(), Some("tok"));
        let mut state = LightState::new();
        state.on(true);
        state.brightness(100);

        let raw = session.set_group_state("1", &state).await.unwrap();
        assert!(raw.is_array());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_set_light_state_passthrough() {
        let mut server = mockito::Server::new_async().await;
        // out-of-range values are the bridge's problem; the raw error
        // response comes back untouched
        let body = r#"[{"error": {"type": 7, "address": "/lights/2/state/bri", "description": "invalid value"}}]"#;
        let mock = server
            .mock("PUT", "/api/tok/lights/2/state")
            .with_body(body)
            .create_async()
            .await;

        let session = BridgeSession::new(&server.host_with_port(), Some("tok"));
        let mut state = LightState::new();
        state.brightness(255);

        let raw = session.set_light_state("2", &state).await.unwrap();
        assert_eq!(raw, serde_json::from_str::<Value>(body).unwrap());
        mock.assert_async().await;
    }
}
