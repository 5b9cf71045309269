mod cli;
mod commands;
mod ui;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use enumerables::{Catalog, CatalogConfig};
use ui::Printer;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let printer = Printer::new();

    if let Command::Demo = cli.command {
        return commands::demo(&printer);
    }

    let config = CatalogConfig::load(cli.catalog.as_deref()).context("loading catalog")?;
    let catalog = Catalog::from_config(&config).context("registering catalog")?;

    match cli.command {
        Command::Values { kind } => commands::values(&catalog, kind.as_deref(), &printer),
        Command::Check { kind, value } => commands::check(&catalog, &kind, &value, &printer),
        Command::Flags {
            kind,
            bits,
            add,
            remove,
        } => commands::flags(&catalog, &kind, bits, &add, &remove, &printer),
        Command::Walk {
            kind,
            initial,
            states,
            note,
        } => commands::walk(&catalog, &kind, &initial, &states, note.as_deref(), &printer),
        Command::Demo => commands::demo(&printer),
    }
}
