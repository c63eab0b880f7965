use std::path::Path;

use anyhow::Result;
use clap::Parser;
use pp_core::config::{DEFAULT_CONFIG_FILE, PrepConfig};

pub mod cli;
pub mod commands;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    // 4. Lancer la commande
    match cli.command {
        cli::Command::Rename { .. } => commands::run_rename(&config.rename),
        cli::Command::Strip { .. } => commands::run_strip(&config.strip),
    }
}

/// Resolve config: --config must exist, plantprep.toml is optional.
fn resolve_config(cli: &cli::Cli) -> Result<PrepConfig> {
    if let Some(ref path) = cli.config {
        return pp_core::config::load_config(path);
    }
    let default = Path::new(DEFAULT_CONFIG_FILE);
    if default.exists() {
        log::info!("Configuration chargée depuis {}", default.display());
        pp_core::config::load_config(default)
    } else {
        log::debug!("Pas de {DEFAULT_CONFIG_FILE}, utilisation des défauts.");
        Ok(PrepConfig::default())
    }
}
