//! # hue_bridge_rs
//!
//! An async Rust library for discovering and controlling Philips Hue
//! bridges over the local network.
//!
//! This crate covers the whole bridge-facing lifecycle: finding bridges,
//! pairing with them, reading and normalizing light/group state, writing
//! state changes, and persisting which bridges have been paired along with
//! per-group UI toggle preferences.
//!
//! ## Quick Start
//!
//! ```ignore
//! use hue_bridge_rs::{LightState, NupnpDiscovery, discover_bridges};
//!
//! async fn turn_kitchen_on() -> Result<(), hue_bridge_rs::Error> {
//!     // Find bridges on the network
//!     let mut sessions = discover_bridges(&NupnpDiscovery::new()).await?;
//!     let session = sessions.first_mut().expect("no bridge found");
//!
//!     // Pair (press the bridge's link button first)
//!     session.create_user("my-app#living room").await?;
//!
//!     // Turn a group on at full brightness
//!     let mut state = LightState::new();
//!     state.on(true);
//!     state.brightness(254);
//!     session.set_group_state("1", &state).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Discovery**: Find bridges via the Hue portal with [`NupnpDiscovery`],
//!   or plug in your own [`DiscoveryTransport`]
//! - **Pairing**: Obtain a credential with [`BridgeSession::create_user`];
//!   the credential is issued once and must be persisted
//! - **State Reads**: Fetch [`BridgeConfig`], groups and lights; group
//!   snapshots are normalized so `action.on` reflects whether any member
//!   light is on
//! - **State Writes**: Sparse [`LightState`] payloads — only the fields you
//!   set are sent, everything else is left unchanged
//! - **Persistence**: [`PersistedStore`] keeps the credential table and
//!   per-group toggle flags durable via [`FileStorage`] or any custom
//!   [`StateStorage`] backend
//!
//! ## Communication
//!
//! All communication with the bridge uses its v1 HTTP API on the local
//! network. Calls are single-shot round trips: no retries, timeouts, or
//! request queuing are layered on by this crate, and transport failures
//! surface to the caller unchanged.

mod config;
mod discovery;
mod errors;
mod response;
mod session;
mod snapshot;
mod state;
mod storage;
mod store;
mod types;

// Re-export public API
pub use config::BridgeConfig;
pub use discovery::{DiscoveredBridge, DiscoveryTransport, NupnpDiscovery, discover_bridges};
pub use errors::Error;
pub use session::BridgeSession;
pub use snapshot::{GroupAggregate, GroupSnapshot, LightSnapshot, normalize_groups};
pub use state::LightState;
pub use storage::{FileStorage, MemoryStorage, StateStorage};
pub use store::{CurrentBridge, CurrentBridgeUser, PersistedStore};
pub use types::{Alert, ColorMode, Effect};
