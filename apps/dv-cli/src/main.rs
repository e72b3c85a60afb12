//! # dv-cli
//!
//! Command-line interface for depvet.
//!
//! Checks reported vulnerabilities against a project's `.depvet` policy:
//! - `depvet check` — resolve a vulnerability record against the policy
//! - `depvet policy show` — summarize the policy file
//! - `depvet policy init` — create an empty policy file

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// depvet CLI — decide whether vulnerabilities are covered by policy.
#[derive(Parser)]
#[command(name = "depvet", version, about)]
struct Cli {
    /// Project root directory (defaults to current directory).
    #[arg(long, default_value = ".")]
    project_root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a vulnerability record against the project policy.
    Check(commands::check::CheckArgs),
    /// Inspect or bootstrap the policy file.
    Policy {
        #[command(subcommand)]
        command: commands::policy::PolicyCommands,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interfere with JSON on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root.canonicalize().unwrap_or(cli.project_root);

    match &cli.command {
        Commands::Check(args) => {
            let covered = commands::check::execute(args, &project_root)?;
            if !covered {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Policy { command } => commands::policy::execute(command, &project_root),
    }
}
