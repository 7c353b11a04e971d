//! Discover Hue bridges on the network and pair with the first one found.
//!
//! This example demonstrates:
//! - Discovery of Hue bridges via the N-UPnP portal
//! - Pairing (press the bridge's link button before running)
//! - Persisting the issued credential for later sessions
//!
//! Run with: cargo run --example discover_and_pair

use hue_bridge_rs::{CurrentBridge, FileStorage, NupnpDiscovery, PersistedStore, discover_bridges};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Discovering Hue bridges on the network...");

    let sessions = discover_bridges(&NupnpDiscovery::new()).await?;

    if sessions.is_empty() {
        println!("No bridges found on the network.");
        return Ok(());
    }

    println!("Found {} bridge(s):", sessions.len());
    for session in &sessions {
        println!("  - IP: {}, ID: {}", session.ip(), session.id().unwrap_or("?"));
    }

    let mut session = sessions.into_iter().next().unwrap();
    let mut store = PersistedStore::open(FileStorage::new()?)?;

    // Reuse a stored credential if this bridge has been paired before
    if let Some(credential) = session.id().and_then(|id| store.credential_for(id)) {
        println!("\nBridge already paired, reusing stored credential.");
        let credential = credential.to_string();
        session.authenticate(&credential);
    } else {
        println!("\nPress the link button on the bridge, then press Enter...");
        std::io::stdin().read_line(&mut String::new())?;

        session.create_user("hue-bridge-rs#demo").await?;
        let id = session.id().expect("id resolved by create_user");
        let credential = session.credential().expect("credential issued");
        store.set_user(id, credential)?;
        println!("Paired. Credential persisted.");
    }

    let id = session.id().expect("discovered session has an id").to_string();
    store.set_current_bridge(Some(CurrentBridge::new(&id, session.ip())))?;

    let groups = session.get_groups().await?;
    println!("\n{} group(s) on this bridge:", groups.len());
    for (group_id, group) in &groups {
        let on = group.action.is_on().unwrap_or(false);
        println!(
            "  [{}] {:20} {}",
            group_id,
            group.name,
            if on { "ON" } else { "off" }
        );
    }

    Ok(())
}
