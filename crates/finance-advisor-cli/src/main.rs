mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::advisor::RecordsArgs;
use commands::planning::GoalsArgs;

/// Personal finance profiling, recommendations and cash allocation
#[derive(Parser)]
#[command(
    name = "fadv",
    version,
    about = "Personal finance profiling, recommendations and cash allocation",
    long_about = "A CLI that turns income, expense, savings-goal and debt records into a \
                  financial profile, prioritised recommendations and a monthly allocation \
                  plan, with decimal precision. Records are read from --input (JSON or YAML) \
                  or piped JSON on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Totals, balance and monthly recurring projection
    Summary(RecordsArgs),
    /// Derived financial profile (ratios, risk, flags)
    Profile(RecordsArgs),
    /// Prioritised recommendations
    Recommend(RecordsArgs),
    /// Monthly cash-allocation plan
    Allocate(RecordsArgs),
    /// Full analysis with warnings and metadata
    Analyze(RecordsArgs),
    /// Savings-goal progress and debt payoff timelines
    Goals(GoalsArgs),
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

fn init_logging(verbose: bool) {
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Summary(args) => commands::advisor::run_summary(args),
        Commands::Profile(args) => commands::advisor::run_profile(args),
        Commands::Recommend(args) => commands::advisor::run_recommend(args),
        Commands::Allocate(args) => commands::advisor::run_allocate(args),
        Commands::Analyze(args) => commands::advisor::run_analyze(args),
        Commands::Goals(args) => commands::planning::run_goals(args),
        Commands::Version => {
            println!("fadv {}", env!("CARGO_PKG_VERSION"));
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
