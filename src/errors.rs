use thiserror::Error;

/// All error types that can occur when interacting with Hue bridges.
#[derive(Debug, Error)]
pub enum Error {
    /// The bridge returned a structured error payload. The message is the
    /// human-readable description string from the device, verbatim.
    #[error("{description}")]
    Bridge { description: String },

    /// A user-creation response matched neither the success nor the
    /// documented error shape.
    #[error("unknown error occurred")]
    UnrecognizedResponse,

    /// An authenticated call was issued on a session without a credential.
    #[error("session has no credential; call create_user or authenticate first")]
    NotAuthenticated,

    /// A per-bridge store mutation was issued while no bridge is current.
    #[error("no current bridge set")]
    NoCurrentBridge,

    /// An HTTP round trip to the bridge (or the discovery portal) failed.
    #[error("http error: {0:?}")]
    Http(#[from] reqwest::Error),

    /// Failed to deserialize JSON data.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// Failed to serialize data to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// A durable storage operation failed.
    #[error("storage {action} error: {err:?}")]
    Storage { action: String, err: std::io::Error },
}

impl Error {
    /// Create a new bridge error from the device's description string.
    pub fn bridge(description: impl Into<String>) -> Self {
        Error::Bridge {
            description: description.into(),
        }
    }

    /// Create a new storage error
    pub fn storage(action: &str, err: std::io::Error) -> Self {
        Error::Storage {
            action: action.to_string(),
            err,
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
