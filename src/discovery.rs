//! Bridge discovery on the local network.

use std::future::Future;

use log::debug;
use serde::Deserialize;

use crate::errors::Error;
use crate::session::BridgeSession;

type Result<T> = std::result::Result<T, Error>;

/// A candidate bridge descriptor produced by a discovery transport.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveredBridge {
    /// Network address of the bridge on the local network.
    #[serde(rename = "internalipaddress")]
    pub ip: String,
    /// Bridge identifier as reported by the transport; casing is not
    /// guaranteed.
    pub id: String,
}

impl DiscoveredBridge {
    /// Convert this descriptor into a not-yet-authenticated
    /// [`BridgeSession`] with a lowercased id.
    pub fn into_session(self) -> BridgeSession {
        BridgeSession::with_identity(self.ip, self.id.to_lowercase())
    }
}

/// Source of candidate bridge descriptors.
///
/// Timeout and failure policy belong to the transport; an empty result is
/// the normal outcome when no bridge responds in time.
pub trait DiscoveryTransport {
    /// Query the network for candidate bridge descriptors.
    fn search(&self) -> impl Future<Output = Result<Vec<DiscoveredBridge>>> + Send;
}

/// Discover Hue bridges and return an unauthenticated session for each.
///
/// Ids are lowercased regardless of the casing the transport reports.
///
/// # Examples
///
/// ```ignore
/// use hue_bridge_rs::{NupnpDiscovery, discover_bridges};
///
/// let sessions = discover_bridges(&NupnpDiscovery::new()).await?;
/// for session in &sessions {
///     println!("{} at {}", session.id().unwrap_or("?"), session.ip());
/// }
/// ```
pub async fn discover_bridges<T: DiscoveryTransport>(transport: &T) -> Result<Vec<BridgeSession>> {
    let descriptors = transport.search().await?;
    debug!("discovery returned {} candidate bridge(s)", descriptors.len());
    Ok(descriptors
        .into_iter()
        .map(DiscoveredBridge::into_session)
        .collect())
}

/// Discovery via the Hue N-UPnP portal.
///
/// The portal lists the bridges that have phoned home from the caller's
/// public address, so it works without multicast access on the local
/// segment.
#[derive(Debug, Clone)]
pub struct NupnpDiscovery {
    endpoint: String,
    client: reqwest::Client,
}

impl NupnpDiscovery {
    const ENDPOINT: &'static str = "https://discovery.meethue.com";

    pub fn new() -> Self {
        Self::with_endpoint(Self::ENDPOINT)
    }

    /// Use a non-default portal endpoint.
    pub fn with_endpoint(endpoint: &str) -> Self {
        NupnpDiscovery {
            endpoint: endpoint.to_string(),
            client: reqwest::Client::new(),
        }
    }
}

impl Default for NupnpDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl DiscoveryTransport for NupnpDiscovery {
    async fn search(&self) -> Result<Vec<DiscoveredBridge>> {
        let descriptors = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .json()
            .await?;
        Ok(descriptors)
    }
}
