use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod session;
mod trace;

use config::Config;
use error::{format_error_with_suggestions, CliError};

#[derive(Parser)]
#[command(name = "hict")]
#[command(about = "HiCT - contact map navigation and assembly edit tooling")]
#[command(version)]
#[command(long_about = "
Inspect opened Hi-C contact map sessions, replay recorded wheel/trackpad traces
through the resolution-aware zoom controller, and form structural edit requests.

Examples:
  hict inspect session.json
  hict replay session.json trace.jsonl --level 1
  hict edit session.json reverse --start-bin 10 --end-bin 20 --resolution 1000
  hict config --example > hict.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarise the resolution pyramid and assembly of a session
    Inspect {
        /// Session file (open-file response JSON)
        session: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a JSON-lines wheel trace through the zoom controller
    Replay {
        /// Session file (open-file response JSON)
        session: PathBuf,

        /// Trace file, one JSON record per line
        trace: PathBuf,

        /// Resolution level the view starts at
        #[arg(long, default_value = "0")]
        level: usize,

        /// Starting view center in map units (defaults to the map center)
        #[arg(long, num_args = 2, allow_negative_numbers = true, value_names = ["X", "Y"])]
        center: Option<Vec<f64>>,

        /// Print the final report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the request for a structural edit of a bin selection
    Edit {
        /// Session file (open-file response JSON)
        session: PathBuf,

        /// Edit to perform
        #[arg(value_enum)]
        action: EditAction,

        /// First selected bin (the split bin for `split`)
        #[arg(long)]
        start_bin: u64,

        /// Last selected bin, inclusive (defaults to the start bin)
        #[arg(long)]
        end_bin: Option<u64>,

        /// Bin resolution the bins are counted at
        #[arg(long)]
        resolution: u64,

        /// Destination bin for `move`
        #[arg(long)]
        target_bin: Option<u64>,

        /// Name of the new scaffold for `group`
        #[arg(long)]
        name: Option<String>,

        /// Spacer length for `group`
        #[arg(long)]
        spacer: Option<u64>,
    },

    /// Show or write configuration
    Config {
        /// Print an example hict.toml
        #[arg(long)]
        example: bool,

        /// Write the effective configuration to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditAction {
    Group,
    Ungroup,
    Reverse,
    Move,
    Debris,
    Split,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => eprintln!("Error: {}", format_error_with_suggestions(cli_err)),
            None => eprintln!("Error: {:#}", err),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect { session, json } => commands::inspect::execute(&session, json),
        Commands::Replay {
            session,
            trace,
            level,
            center,
            json,
        } => commands::replay::execute(&config, &session, &trace, level, center, json),
        Commands::Edit {
            session,
            action,
            start_bin,
            end_bin,
            resolution,
            target_bin,
            name,
            spacer,
        } => commands::edit::execute(
            &session,
            commands::edit::EditArgs {
                action,
                start_bin,
                end_bin,
                resolution,
                target_bin,
                name,
                spacer,
            },
        ),
        Commands::Config { example, output } => cmd_config(&config, example, output),
    }
}

fn cmd_config(config: &Config, example: bool, output: Option<PathBuf>) -> Result<()> {
    if example {
        print!("{}", Config::example_toml()?);
        return Ok(());
    }
    match output {
        Some(path) => {
            config.save_to_file(&path)?;
            log::info!("Configuration written to: {}", path.display());
        }
        None => print!("{}", toml::to_string_pretty(config).map_err(CliError::from)?),
    }
    Ok(())
}
