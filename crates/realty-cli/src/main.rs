mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::listings::{MatchArgs, ValidateLeadArgs};
use commands::loan::{AmortizationArgs, EmiArgs};
use commands::price::{FormatPriceArgs, FormatUsdArgs, ParsePriceArgs};

/// Indian price formatting, home-loan EMI and listing matching
#[derive(Parser)]
#[command(
    name = "realty",
    version,
    about = "Indian price formatting, home-loan EMI and listing matching",
    long_about = "A CLI for the pricing logic behind a luxury real-estate site: \
                  Indian-notation rupee formatting, lakh/crore shorthand parsing, \
                  EMI and amortization schedules, budget/location listing matching \
                  and enquiry validation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log resolved inputs and results to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Format a rupee amount with Indian digit grouping (₹2,80,00,000)
    FormatPrice(FormatPriceArgs),
    /// Format a dollar amount compactly ($4.2M, $420K)
    FormatUsd(FormatUsdArgs),
    /// Read a price such as "2Cr" or "1.5 Lakh" as rupees
    ParsePrice(ParsePriceArgs),
    /// Calculate the monthly installment and total interest of a home loan
    Emi(EmiArgs),
    /// Year-by-year principal and interest breakdown of a home loan
    Amortization(AmortizationArgs),
    /// Find listings within a budget and location
    Match(MatchArgs),
    /// Check a contact-form enquiry for missing or malformed fields
    ValidateLead(ValidateLeadArgs),
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
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "warn" };
        format!("realty_cli={level},realty_core={level}").into()
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::FormatPrice(args) => commands::price::run_format_price(args),
        Commands::FormatUsd(args) => commands::price::run_format_usd(args),
        Commands::ParsePrice(args) => commands::price::run_parse_price(args),
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Amortization(args) => commands::loan::run_amortization(args),
        Commands::Match(args) => commands::listings::run_match(args),
        Commands::ValidateLead(args) => commands::listings::run_validate_lead(args),
        Commands::Version => {
            println!("realty {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
