mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::currency::ConvertArgs;
use commands::interest::{CompoundInterestArgs, SimpleInterestArgs};
use commands::investments::{FdArgs, LumpsumArgs, RdArgs, SipArgs};
use commands::loans::EmiArgs;
use commands::planning::{InflationArgs, RetirementArgs};
use commands::tax::TaxArgs;

/// Personal-finance calculators
#[derive(Parser)]
#[command(
    name = "fincalc",
    version,
    about = "Personal-finance calculators with decimal precision",
    long_about = "A CLI for everyday personal-finance calculations with decimal precision. \
                  Supports simple and compound interest, loan EMI, SIP and lumpsum \
                  investments, fixed and recurring deposits, inflation impact, \
                  retirement targets, slab-based income tax and currency conversion. \
                  Rates are entered as percentages (12 means 12%). \
                  Set RUST_LOG=debug for diagnostic logging."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Simple interest (P x R x T / 100)
    SimpleInterest(SimpleInterestArgs),
    /// Compound interest with a chosen compounding frequency
    CompoundInterest(CompoundInterestArgs),
    /// Equated monthly installment for a loan
    Emi(EmiArgs),
    /// Maturity of a monthly systematic investment plan
    Sip(SipArgs),
    /// Growth of a one-time investment
    Lumpsum(LumpsumArgs),
    /// Fixed deposit maturity (annual compounding)
    Fd(FdArgs),
    /// Recurring deposit maturity (monthly deposits)
    Rd(RdArgs),
    /// Future cost of today's expenses under inflation
    Inflation(InflationArgs),
    /// Monthly SIP required to reach a retirement corpus
    Retirement(RetirementArgs),
    /// Slab-based income tax with capped deductions
    Tax(TaxArgs),
    /// Convert an amount using a rate snapshot file
    Convert(ConvertArgs),
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

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::SimpleInterest(args) => commands::interest::run_simple_interest(args),
        Commands::CompoundInterest(args) => commands::interest::run_compound_interest(args),
        Commands::Emi(args) => commands::loans::run_emi(args),
        Commands::Sip(args) => commands::investments::run_sip(args),
        Commands::Lumpsum(args) => commands::investments::run_lumpsum(args),
        Commands::Fd(args) => commands::investments::run_fd(args),
        Commands::Rd(args) => commands::investments::run_rd(args),
        Commands::Inflation(args) => commands::planning::run_inflation(args),
        Commands::Retirement(args) => commands::planning::run_retirement(args),
        Commands::Tax(args) => commands::tax::run_tax(args),
        Commands::Convert(args) => commands::currency::run_convert(args),
        Commands::Version => {
            println!("fincalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
