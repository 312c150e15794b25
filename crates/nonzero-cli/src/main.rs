use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nonzero_core::storage::LoggingConfig;

mod commands;
mod context;
mod logging;

use context::Context;

#[derive(Parser)]
#[command(name = "nonzero", version, about = "NonZero habit analytics")]
struct Cli {
    /// Task snapshot (JSON); defaults to `snapshot.path` from config
    #[arg(long, global = true, value_name = "PATH")]
    snapshot: Option<PathBuf>,

    /// Day to treat as today
    #[arg(long, global = true, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Streak and resilience statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Comeback suggestions for lapsed tasks
    Suggest,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Load config and install logging for commands that read a snapshot.
fn context(
    snapshot: Option<PathBuf>,
    today: Option<NaiveDate>,
    json: bool,
) -> Result<Context, Box<dyn std::error::Error>> {
    let ctx = Context::load(snapshot, today, json)?;
    logging::init(&ctx.config.logging);
    Ok(ctx)
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Stats { action } => context(cli.snapshot, cli.today, cli.json)
            .and_then(|ctx| commands::stats::run(&ctx, action)),
        Commands::Suggest => context(cli.snapshot, cli.today, cli.json)
            .and_then(|ctx| commands::suggest::run(&ctx)),
        // Must work on a broken config file so `config reset` can repair it.
        Commands::Config { action } => {
            logging::init(&LoggingConfig::default());
            commands::config::run(action)
        }
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
