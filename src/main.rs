//! # Axiom Place - placement scenario runner
//!
//! Replays a TOML scenario (screens, panels, clients and window manager
//! events) through the placement engine and prints where every client
//! ended up. Without a scenario it prints the effective configuration.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use axiom_place::{PlacementConfig, Report, Scenario, Session};

#[derive(Parser)]
#[command(name = "axiom-place")]
#[command(about = "Replay window placement scenarios: struts, panels, cascading and maximize")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.config/axiom/place.toml")]
    config: String,

    /// Scenario file to replay
    #[arg(short, long)]
    scenario: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration is read first so `general.debug` can raise the log level
    let loaded = PlacementConfig::load(&cli.config);
    let debug = cli.debug || loaded.as_ref().is_ok_and(|c| c.general.debug);

    // Initialize logging
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    info!("Starting Axiom Place");
    info!(
        "Version: {} ({}, built {})",
        axiom_place::VERSION,
        env!("AXIOM_PLACE_GIT_COMMIT"),
        env!("AXIOM_PLACE_BUILD_DATE")
    );

    let config = match loaded {
        Ok(config) => {
            info!("Configuration loaded from: {}", cli.config);
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            info!("Using default configuration");
            PlacementConfig::default()
        }
    };

    let Some(path) = cli.scenario.as_deref() else {
        let contents =
            toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
        print!("{}", contents);
        return Ok(());
    };

    let scenario = Scenario::load(path)?;
    info!(
        "Replaying {} event(s) from {}",
        scenario.events.len(),
        path
    );

    let mut session = Session::new(&config, &scenario)?;
    let report = session.run(&scenario)?;
    session.shutdown();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &Report) {
    println!("desktop {}", report.desktop);

    for (screen, area) in report.usable.iter().enumerate() {
        println!(
            "screen {} usable {}x{}+{}+{}",
            screen, area.width, area.height, area.x, area.y
        );
    }

    for strut in &report.struts {
        let area = strut.area;
        println!(
            "strut {:#x} {}x{}+{}+{}",
            strut.owner, area.width, area.height, area.x, area.y
        );
    }

    for client in &report.clients {
        println!(
            "client {:#x} {}x{}+{}+{} desktop {}{}",
            client.id,
            client.width,
            client.height,
            client.x,
            client.y,
            client.desktop,
            if client.maximized { " maximized" } else { "" }
        );
    }

    println!("{} frame move(s)", report.moves.len());
}
