//! Persisted application state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::Error;
use crate::storage::StateStorage;

type Result<T> = std::result::Result<T, Error>;

/// The subset of state that survives restarts.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    /// Bridges that have been authenticated with, keyed by bridge id.
    #[serde(default)]
    users: HashMap<String, String>,
    /// Group/light toggle flags, keyed by bridge id, then by group name.
    #[serde(default)]
    group_toggle_states: HashMap<String, HashMap<String, bool>>,
}

/// The bridge the caller is currently operating against. Transient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentBridge {
    pub id: String,
    pub ip: String,
}

impl CurrentBridge {
    pub fn new(id: &str, ip: &str) -> Self {
        CurrentBridge {
            id: id.to_string(),
            ip: ip.to_string(),
        }
    }
}

/// The current bridge merged with its stored credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentBridgeUser {
    pub id: String,
    pub ip: String,
    pub credential: String,
}

/// Application state with durable authentication and toggle tables.
///
/// The store is the single source of truth for which bridges have been
/// authenticated and for per-group toggle preferences. All mutation goes
/// through the methods below; each one synchronously re-serializes exactly
/// the persisted subset (`users` and `group_toggle_states` — never the
/// current bridge) through the injected [`StateStorage`] backend.
///
/// Mutations take `&mut self`; a multi-threaded host wraps the store in its
/// own critical section.
///
/// # Example
///
/// ```
/// use hue_bridge_rs::{CurrentBridge, MemoryStorage, PersistedStore};
///
/// let mut store = PersistedStore::open(MemoryStorage::new()).unwrap();
/// store.set_user("001788fffeabcdef", "credential").unwrap();
/// store.set_current_bridge(Some(CurrentBridge::new("001788fffeabcdef", "192.168.1.40"))).unwrap();
///
/// let user = store.current_bridge_user().unwrap();
/// assert_eq!(user.credential, "credential");
/// ```
#[derive(Debug)]
pub struct PersistedStore<S: StateStorage> {
    storage: S,
    state: PersistedState,
    current_bridge: Option<CurrentBridge>,
}

impl<S: StateStorage> PersistedStore<S> {
    /// Open the store, loading any previously persisted snapshot.
    pub fn open(mut storage: S) -> Result<Self> {
        let state = match storage.load()? {
            Some(blob) => serde_json::from_str(&blob).map_err(Error::JsonLoad)?,
            None => PersistedState::default(),
        };
        Ok(PersistedStore {
            storage,
            state,
            current_bridge: None,
        })
    }

    /// Store (or replace) the credential for a bridge.
    pub fn set_user(&mut self, bridge_id: &str, credential: &str) -> Result<()> {
        self.state
            .users
            .insert(bridge_id.to_string(), credential.to_string());
        self.flush()
    }

    /// Remove the credential for a bridge.
    pub fn unset_user(&mut self, bridge_id: &str) -> Result<()> {
        self.state.users.remove(bridge_id);
        self.flush()
    }

    /// The stored credential for a bridge, if any.
    pub fn credential_for(&self, bridge_id: &str) -> Option<&str> {
        self.state.users.get(bridge_id).map(String::as_str)
    }

    /// Replace the current bridge; `None` clears it.
    pub fn set_current_bridge(&mut self, bridge: Option<CurrentBridge>) -> Result<()> {
        self.current_bridge = bridge;
        self.flush()
    }

    /// The current bridge, if set.
    pub fn current_bridge(&self) -> Option<&CurrentBridge> {
        self.current_bridge.as_ref()
    }

    /// Clear the current bridge.
    ///
    /// The bridge's credential intentionally stays in the auth table, so a
    /// later login to the same bridge needs no new pairing.
    pub fn logout_current_bridge(&mut self) -> Result<()> {
        if self.current_bridge.is_some() {
            self.set_current_bridge(None)?;
        }
        Ok(())
    }

    /// Record whether a group should be shown as individual lights, keyed
    /// under the current bridge.
    ///
    /// Fails with [`Error::NoCurrentBridge`] when no bridge is current.
    pub fn set_group_toggle_state(
        &mut self,
        group_name: &str,
        show_individual_lights: bool,
    ) -> Result<()> {
        let Some(bridge) = &self.current_bridge else {
            return Err(Error::NoCurrentBridge);
        };
        self.state
            .group_toggle_states
            .entry(bridge.id.clone())
            .or_default()
            .insert(group_name.to_string(), show_individual_lights);
        self.flush()
    }

    /// The current bridge merged with its stored credential, or `None` if
    /// no bridge is current or it has no stored credential.
    pub fn current_bridge_user(&self) -> Option<CurrentBridgeUser> {
        let bridge = self.current_bridge.as_ref()?;
        let credential = self.state.users.get(&bridge.id)?;
        Some(CurrentBridgeUser {
            id: bridge.id.clone(),
            ip: bridge.ip.clone(),
            credential: credential.clone(),
        })
    }

    /// The toggle table for the current bridge; empty when no bridge is
    /// current or nothing has been toggled yet.
    pub fn current_bridge_group_toggle_states(&self) -> HashMap<String, bool> {
        self.current_bridge
            .as_ref()
            .and_then(|bridge| self.state.group_toggle_states.get(&bridge.id))
            .cloned()
            .unwrap_or_default()
    }

    fn flush(&mut self) -> Result<()> {
        let blob = serde_json::to_string(&self.state).map_err(Error::JsonDump)?;
        self.storage.save(&blob)
    }
}
