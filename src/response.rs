//! Tagged decode types for bridge responses.
//!
//! The v1 bridge API reports failures as an array of `{"error": {...}}`
//! objects and successes either as an array of `{"success": {...}}` objects
//! (writes, user creation) or as a plain JSON object (reads). Everything is
//! decoded into the variants below at the network boundary; call sites never
//! inspect response shapes ad hoc.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::Error;

/// Error type code the bridge uses for unauthorized access
/// (including the link-button-not-pressed state on user creation).
pub(crate) const UNAUTHORIZED_USER: i64 = 1;

/// Structured error payload from the bridge.
#[derive(Debug, Deserialize)]
pub(crate) struct BridgeErrorBody {
    /// Numeric error class. Some firmware versions send it as a JSON
    /// number, others as a decimal string; both are accepted.
    #[serde(rename = "type", deserialize_with = "lenient_error_type")]
    pub error_type: i64,
    #[serde(default)]
    pub address: String,
    pub description: String,
}

/// Credential issued by a successful user creation.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedUser {
    pub username: String,
}

/// A single entry of a bridge result array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ApiResult<T> {
    Success { success: T },
    Error { error: BridgeErrorBody },
}

/// Decode a user-creation response body.
///
/// Bodies matching neither the success nor the error shape fail with
/// [`Error::UnrecognizedResponse`].
pub(crate) fn decode_create_user(body: &Value) -> Result<CreatedUser, Error> {
    let Some(first) = body.as_array().and_then(|items| items.first()) else {
        return Err(Error::UnrecognizedResponse);
    };

    match ApiResult::<CreatedUser>::deserialize(first) {
        Ok(ApiResult::Success { success }) => Ok(success),
        Ok(ApiResult::Error { error }) => Err(Error::bridge(error.description)),
        Err(_) => Err(Error::UnrecognizedResponse),
    }
}

/// Extract the structured error from an error-shaped fetch response.
///
/// Read endpoints answer with a JSON object on success; an array here means
/// the bridge reported an error instead. Returns `None` for success-shaped
/// bodies.
pub(crate) fn fetch_error(body: &Value) -> Option<BridgeErrorBody> {
    let first = body.as_array()?.first()?;
    let error = first.get("error")?;
    BridgeErrorBody::deserialize(error).ok()
}

fn lenient_error_type<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_create_user_success() {
        let body = json!([{"success": {"username": "83b7780291a6ceffbe0bd049104df"}}]);
        let user = decode_create_user(&body).unwrap();
        assert_eq!(user.username, "83b7780291a6ceffbe0bd049104df");
    }

    #[test]
    fn test_decode_create_user_error_carries_description() {
        let body = json!([{
            "error": {
                "type": 101,
                "address": "",
                "description": "link button not pressed"
            }
        }]);

        match decode_create_user(&body) {
            Err(Error::Bridge { description }) => {
                assert_eq!(description, "link button not pressed");
            }
            other => panic!("expected bridge error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_create_user_unrecognized_shapes() {
        for body in [
            json!([]),
            json!([{"neither": {}}]),
            json!({"success": {"username": "not-in-an-array"}}),
            json!("nonsense"),
        ] {
            assert!(matches!(
                decode_create_user(&body),
                Err(Error::UnrecognizedResponse)
            ));
        }
    }

    #[test]
    fn test_fetch_error_numeric_type() {
        let body = json!([{
            "error": {"type": 1, "address": "/groups", "description": "unauthorized user"}
        }]);

        let error = fetch_error(&body).unwrap();
        assert_eq!(error.error_type, UNAUTHORIZED_USER);
        assert_eq!(error.description, "unauthorized user");
        assert_eq!(error.address, "/groups");
    }

    #[test]
    fn test_fetch_error_string_type() {
        let body = json!([{
            "error": {"type": "1", "description": "unauthorized user"}
        }]);

        let error = fetch_error(&body).unwrap();
        assert_eq!(error.error_type, UNAUTHORIZED_USER);
    }

    #[test]
    fn test_fetch_error_none_for_success_shape() {
        let body = json!({"1": {"name": "Kitchen"}});
        assert!(fetch_error(&body).is_none());
    }
}
