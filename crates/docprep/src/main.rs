//! docprep command-line entry point.

use clap::{Parser, Subcommand};
use docprep_logging::LogConfig;
use std::process::ExitCode;

mod cli;

/// Environment variable that switches error output to the full cause chain.
const DEBUG_ENV_VAR: &str = "DOCPREP_DEBUG";

#[derive(Parser, Debug)]
#[command(name = "docprep", about = "Documentation source-tree preprocessor", version)]
struct Cli {
    /// Enable verbose logging (debug to stderr)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Classify documentation files and copy them into the output tree
    Process(cli::process::ProcessArgs),

    /// List the built-in classification rules
    Rules {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Process(args) => cli::process::run(args),
        Commands::Rules { json } => cli::rules::run(cli::rules::RulesArgs { json }),
    }
}

fn debug_output_enabled() -> bool {
    std::env::var(DEBUG_ENV_VAR)
        .map(|value| !value.is_empty() && value != "0")
        .unwrap_or(false)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = docprep_logging::init_logging(LogConfig {
        app_name: "docprep",
        verbose: cli.verbose,
    }) {
        eprintln!("Warning: failed to initialize logging: {}", err);
    }

    let verbose = cli.verbose;
    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if verbose || debug_output_enabled() {
                eprintln!("{:?}", err);
            } else {
                eprintln!("ERROR: {:#}", err);
            }
            ExitCode::from(1)
        }
    }
}
