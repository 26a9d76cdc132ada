use clap::Args;
use rust_decimal::Decimal;

use fincalc_core::planning::inflation::{self, InflationInput};
use fincalc_core::planning::retirement::{self, RetirementTargetInput};

use super::{load_input, missing, CommandResult};

/// Arguments for inflation impact
#[derive(Args)]
pub struct InflationArgs {
    /// What the basket costs today
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual inflation rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Years ahead
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the retirement target planner
#[derive(Args)]
pub struct RetirementArgs {
    /// Corpus needed at retirement
    #[arg(long)]
    pub target: Option<Decimal>,

    /// Years left to invest
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Expected annual return in percent (default 12)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_inflation(args: InflationArgs) -> CommandResult {
    let any = args.amount.is_some() || args.rate.is_some() || args.years.is_some();
    let infl_input: InflationInput = load_input(
        args.input.as_deref(),
        any,
        || {
            Ok(InflationInput {
                current_amount: args.amount.ok_or_else(|| missing("amount"))?,
                inflation_rate: args.rate.ok_or_else(|| missing("rate"))?,
                years: args.years.ok_or_else(|| missing("years"))?,
            })
        },
        "inflation impact",
    )?;
    let result = inflation::calculate_inflation_impact(&infl_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_retirement(args: RetirementArgs) -> CommandResult {
    let any = args.target.is_some() || args.years.is_some() || args.rate.is_some();
    // Missing fields are reported by the planner itself.
    let ret_input: RetirementTargetInput = load_input(
        args.input.as_deref(),
        any,
        || {
            Ok(RetirementTargetInput {
                target_corpus: args.target,
                years_to_retirement: args.years,
                expected_return: args.rate,
            })
        },
        "retirement planning",
    )?;
    let result = retirement::plan_retirement_target(&ret_input)?;
    Ok(serde_json::to_value(result)?)
}
