//! hwcontrol library root.
//! Exposes the CLI parser, the high-level run() function and the modules
//! shared by the command line and the web front-end.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;
pub mod web;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use tracing_subscriber::EnvFilter;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg),
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Show { .. } => cli::commands::show::handle(&cli.command, cfg),
        Commands::Return { .. }
        | Commands::Hide { .. }
        | Commands::Extend { .. }
        | Commands::Note { .. }
        | Commands::Stock { .. } => cli::commands::actions::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Backup { .. } => cli::commands::backup::handle(&cli.command, cfg),
        Commands::Serve { .. } => cli::commands::serve::handle(&cli.command, cfg),
    }
}

/// Install the global tracing subscriber. `RUST_LOG` wins over the
/// default directive.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (tests running `run` twice) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let default_directive = match cli.command {
        Commands::Serve { .. } => "hwcontrol=info,tower_http=info",
        _ => "hwcontrol=warn",
    };
    init_tracing(default_directive);

    let mut cfg = Config::load()?;

    if let Some(custom) = &cli.data {
        cfg.data_file = utils::path::expand_tilde(custom)
            .to_string_lossy()
            .to_string();
    }

    dispatch(&cli, &cfg)
}
