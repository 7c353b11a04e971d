//! CLI application for controlling Hue lights through a bridge.
//!
//! This example demonstrates a command-line interface covering discovery,
//! pairing, and group/light state control.
//!
//! Run with: cargo run --example hue_cli -- --help

use clap::{Parser, Subcommand};
use hue_bridge_rs::{
    Alert, BridgeSession, LightState, NupnpDiscovery, discover_bridges,
};

#[derive(Parser)]
#[command(name = "hue-cli")]
#[command(about = "Control Hue lights from the command line", long_about = None)]
struct Cli {
    /// IP address of the Hue bridge (not required for discover command)
    #[arg(short, long, global = true)]
    ip: Option<String>,

    /// Credential issued by a previous pairing (required for everything but
    /// discover and pair)
    #[arg(short, long, global = true)]
    credential: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover all Hue bridges on the network
    Discover,

    /// Pair with the bridge (press the link button first)
    Pair {
        /// Application name to register, e.g. "my-app#device"
        #[arg(default_value = "hue-bridge-rs#cli")]
        application_name: String,
    },

    /// Show the bridge configuration
    Config,

    /// List all groups and their state
    Groups,

    /// List all lights and their state
    Lights,

    /// Turn a group on
    On {
        /// Group id
        group: String,
    },

    /// Turn a group off
    Off {
        /// Group id
        group: String,
    },

    /// Set a group's brightness (1-254)
    Brightness {
        /// Group id
        group: String,
        /// Brightness level (1-254)
        #[arg(value_parser = clap::value_parser!(u8).range(1..=254))]
        level: u8,
    },

    /// Recall a scene on a group
    Scene {
        /// Group id
        group: String,
        /// Scene identifier as reported by the bridge
        scene: String,
    },

    /// Blink a light to identify it
    Blink {
        /// Light id
        light: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Commands::Discover = cli.command {
        println!("Discovering Hue bridges on the network...");
        let sessions = discover_bridges(&NupnpDiscovery::new()).await?;
        if sessions.is_empty() {
            println!("No bridges found on the network.");
        } else {
            println!("\nFound {} bridge(s):", sessions.len());
            for session in sessions {
                println!(
                    "  IP: {:15}  ID: {}",
                    session.ip(),
                    session.id().unwrap_or("?")
                );
            }
        }
        return Ok(());
    }

    // All other commands require a bridge address
    let ip = cli
        .ip
        .ok_or("bridge IP is required for this command. Use --ip <IP>")?;

    if let Commands::Pair { application_name } = &cli.command {
        let mut session = BridgeSession::new(&ip, None);
        session.create_user(application_name).await?;
        println!("Paired with bridge {}", session.id().unwrap_or("?"));
        println!(
            "Credential (persist this, it cannot be retrieved again):\n  {}",
            session.credential().unwrap_or("?")
        );
        return Ok(());
    }

    let credential = cli
        .credential
        .ok_or("a credential is required. Pair first, then pass --credential <TOKEN>")?;
    let session = BridgeSession::new(&ip, Some(&credential));

    match cli.command {
        Commands::Discover | Commands::Pair { .. } => unreachable!(),

        Commands::Config => {
            let config = session.get_config().await?;
            println!("Bridge: {} ({})", config.name, config.model_id);
            println!("  ID:          {}", config.bridge_id.to_lowercase());
            println!("  API version: {}", config.api_version);
            println!("  SW version:  {}", config.sw_version);
            println!("  MAC:         {}", config.mac);
        }

        Commands::Groups => {
            let groups = session.get_groups().await?;
            println!("{} group(s):", groups.len());
            for (id, group) in groups {
                let on = group.action.is_on().unwrap_or(false);
                println!(
                    "  [{}] {:20} {:3}  ({} lights)",
                    id,
                    group.name,
                    if on { "ON" } else { "off" },
                    group.lights.len()
                );
            }
        }

        Commands::Lights => {
            let lights = session.get_lights().await?;
            println!("{} light(s):", lights.len());
            for (id, light) in lights {
                let on = light.state.is_on().unwrap_or(false);
                println!(
                    "  [{}] {:20} {:3}  {}",
                    id,
                    light.name,
                    if on { "ON" } else { "off" },
                    light.model_id
                );
            }
        }

        Commands::On { group } => {
            let mut state = LightState::new();
            state.on(true);
            session.set_group_state(&group, &state).await?;
            println!("Group {} turned ON", group);
        }

        Commands::Off { group } => {
            let mut state = LightState::new();
            state.on(false);
            session.set_group_state(&group, &state).await?;
            println!("Group {} turned OFF", group);
        }

        Commands::Brightness { group, level } => {
            let mut state = LightState::new();
            state.on(true);
            state.brightness(level);
            session.set_group_state(&group, &state).await?;
            println!("Group {} brightness set to {}", group, level);
        }

        Commands::Scene { group, scene } => {
            let mut state = LightState::new();
            state.scene(&scene);
            session.set_group_state(&group, &state).await?;
            println!("Scene {} recalled on group {}", scene, group);
        }

        Commands::Blink { light } => {
            let state = LightState::from(&Alert::Select);
            session.set_light_state(&light, &state).await?;
            println!("Light {} blinked", light);
        }
    }

    Ok(())
}
