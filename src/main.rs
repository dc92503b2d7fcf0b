//! Collecta - schema-validated content collections for static sites.

use anyhow::Result;
use clap::Parser;
use collecta::{
    build::{build_collections, load_collections},
    cli::{Cli, Commands},
    config::CollectaConfig,
    log, store,
    watch::watch_for_changes_blocking,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log!("error"; "{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = CollectaConfig::load(cli)?;
    let registry = config.registry()?;

    match &cli.command {
        Commands::Check => {
            let collections = load_collections(&registry)?;
            log!(
                "check";
                "ok: {} collections, {} entries",
                collections.len(),
                collections.entry_count()
            );
        }
        Commands::Build { .. } => {
            build_collections(&config, &registry)?;
        }
        Commands::Watch { .. } => {
            // Baseline for change detection in the watch loop
            store::publish(build_collections(&config, &registry)?);
            watch_for_changes_blocking(&config, &registry)?;
        }
    }

    Ok(())
}
