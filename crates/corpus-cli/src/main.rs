mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::plan::PlanArgs;
use commands::quick::{FvArgs, PvArgs, SipArgs};
use commands::sensitivity::SensitivityArgs;

/// Retirement corpus planning
#[derive(Parser)]
#[command(
    name = "corpus",
    version,
    about = "Retirement corpus planning with decimal precision",
    long_about = "A CLI for sizing a retirement corpus under traditional, FIRE, Fat FIRE, \
                  Coast FIRE and Barista FIRE models, projecting wealth, and measuring the \
                  gap to the required corpus."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log computation details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a full retirement plan from a JSON/YAML plan
    Plan(PlanArgs),
    /// Vary one assumption and recompute the plan
    Sensitivity(SensitivityArgs),
    /// Future value of a lump sum
    Fv(FvArgs),
    /// Present value of a future amount
    Pv(PvArgs),
    /// Monthly SIP needed to reach a target
    Sip(SipArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "corpus_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Plan(args) => commands::plan::run_plan(args),
        Commands::Sensitivity(args) => commands::sensitivity::run_sensitivity(args),
        Commands::Fv(args) => commands::quick::run_fv(args),
        Commands::Pv(args) => commands::quick::run_pv(args),
        Commands::Sip(args) => commands::quick::run_sip(args),
        Commands::Version => {
            println!("corpus {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
