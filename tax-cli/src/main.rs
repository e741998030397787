use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tax_core::{CalculationRequest, CalculationResult, TaxEngine};
use tracing::{debug, info};

use tax_cli::config::CliConfig;
use tax_cli::utils::parse_decimal;
use tax_cli::{batch, logging, report};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Nigerian personal and small-business income tax calculator.
#[derive(Debug, Parser)]
#[command(name = "tax-calc", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// CSV rate tables to use instead of the built-in ones.
    #[arg(long, global = true)]
    schedules: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `tax_core=trace`. RUST_LOG takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Calculate the tax for a single taxpayer.
    Calculate {
        /// `individual` or `business`.
        #[arg(long)]
        category: String,

        /// Annual income or turnover, e.g. "1,000,000".
        #[arg(long)]
        income: String,

        /// Reliefs and allowances.
        #[arg(long, default_value = "")]
        reliefs: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Calculate every row of a CSV file (`category,gross_amount,reliefs`).
    Batch {
        #[arg(long)]
        file: PathBuf,

        /// Print the results as a JSON array.
        #[arg(long)]
        json: bool,
    },

    /// Print the rate tables in use.
    Schedules,
}

// ─── commands ────────────────────────────────────────────────────────────────

fn print_cards(
    results: &[CalculationResult],
    engine: &TaxEngine,
    symbol: &str,
) {
    let cards: Vec<String> = results
        .iter()
        .map(|result| report::render_result(result, engine, symbol))
        .collect();
    println!("{}", cards.join("\n\n"));
}

fn run(
    command: Command,
    engine: &TaxEngine,
    symbol: &str,
) -> anyhow::Result<()> {
    match command {
        Command::Calculate {
            category,
            income,
            reliefs,
            json,
        } => {
            let request = CalculationRequest {
                gross_amount: Some(parse_decimal(&income).context("--income")?),
                reliefs: Some(parse_decimal(&reliefs).context("--reliefs")?),
                category,
            };
            let result = engine.calculate_request(request)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_cards(std::slice::from_ref(&result), engine, symbol);
            }
            Ok(())
        }
        Command::Batch { file, json } => {
            let inputs = batch::load_from_file(&file)
                .with_context(|| format!("loading batch '{}'", file.display()))?;
            let results: Vec<CalculationResult> =
                inputs.iter().map(|input| engine.calculate(input)).collect();
            info!(rows = results.len(), "batch calculated");

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print_cards(&results, engine, symbol);
            }
            Ok(())
        }
        Command::Schedules => {
            println!("{}", report::render_schedules(engine, symbol));
            Ok(())
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.log_level.as_deref());
    if let Some(path) = &cli.log_file {
        logging::enable_file_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => CliConfig::default(),
    };
    if cli.log_level.is_none()
        && std::env::var_os("RUST_LOG").is_none()
        && let Some(level) = &config.log_level
    {
        logging::set_log_level(level)?;
    }
    debug!(?config, "configuration loaded");

    let regime = config.regime(cli.schedules.as_deref())?;
    let engine = TaxEngine::new(regime).context("building tax engine")?;

    run(cli.command, &engine, &config.currency_symbol)
}
