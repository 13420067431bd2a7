//! split-ledger CLI
//!
//! Split bills with friends and track running balances.

use std::fs::{self, File};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use split_ledger::config::Config;
use split_ledger::form::split_with_friend;
use split_ledger::report::format_ledger;
use split_ledger::tui::{self, App};
use split_ledger::types::{OutputFormat, Payer};

#[derive(Parser)]
#[command(name = "split-ledger")]
#[command(about = "Split bills with friends and track who owes whom")]
#[command(version)]
struct Cli {
    /// Config file (default: <config dir>/split-ledger/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive ledger (default)
    Tui,

    /// Print the starting roster and balances
    List {
        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },

    /// Split one bill with a friend and print the resulting balances (nothing is saved)
    Split {
        /// Friend name (case-insensitive)
        #[arg(long)]
        friend: String,

        /// Bill total
        #[arg(long)]
        bill: String,

        /// Your share of the bill
        #[arg(long)]
        paid: String,

        /// Who paid the bill
        #[arg(long, value_enum, default_value = "user")]
        payer: PayerArg,

        /// Output format
        #[arg(long, value_enum, default_value = "human")]
        format: OutputFormatArg,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormatArg {
    Human,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => OutputFormat::Human,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum PayerArg {
    User,
    Friend,
}

impl From<PayerArg> for Payer {
    fn from(arg: PayerArg) -> Self {
        match arg {
            PayerArg::User => Payer::User,
            PayerArg::Friend => Payer::Friend,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = Config::load(cli.config.as_deref())
        .map_err(|e| e.to_string())
        .and_then(|config| match cli.command.unwrap_or(Commands::Tui) {
            Commands::Tui => cmd_tui(&config),
            Commands::List { format } => cmd_list(&config, format.into()),
            Commands::Split { friend, bill, paid, payer, format } => {
                cmd_split(&config, &friend, bill, paid, payer.into(), format.into())
            }
        });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// LOGGING
// ============================================================================

/// Log to a file; the TUI owns stdout. RUST_LOG controls the level.
fn init_logging() {
    let log_file = open_log_file().or_else(|_| File::create(null_device()));
    let Ok(log_file) = log_file else {
        return; // logging disabled
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
}

fn open_log_file() -> std::io::Result<File> {
    let dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("split-ledger");
    fs::create_dir_all(&dir)?;
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("split-ledger.log"))
}

fn null_device() -> &'static str {
    if cfg!(windows) { "NUL" } else { "/dev/null" }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn cmd_tui(config: &Config) -> Result<(), String> {
    let app = App::new(config.ledger(), &config.default_image_url);
    tui::run(app).map_err(|e| e.to_string())
}

fn cmd_list(config: &Config, format: OutputFormat) -> Result<(), String> {
    let out = format_ledger(&config.ledger(), format).map_err(|e| e.to_string())?;
    print!("{}", out);
    Ok(())
}

fn cmd_split(
    config: &Config,
    friend: &str,
    bill: String,
    paid: String,
    payer: Payer,
    format: OutputFormat,
) -> Result<(), String> {
    let mut ledger = config.ledger();

    let delta = split_with_friend(&mut ledger, friend, &bill, &paid, payer)
        .map_err(|e| e.to_string())?;
    if format == OutputFormat::Human {
        eprintln!("Balance change for {}: {:+}", friend, delta);
    }

    let out = format_ledger(&ledger, format).map_err(|e| e.to_string())?;
    print!("{}", out);
    Ok(())
}
