use clap::Args;
use rust_decimal::Decimal;

use fincalc_core::interest::compound::{
    self, CompoundInterestInput, CompoundingFrequency,
};
use fincalc_core::interest::simple::{self, SimpleInterestInput};

use super::{load_input, missing, CommandResult};

/// Arguments for simple interest
#[derive(Args)]
pub struct SimpleInterestArgs {
    /// Principal amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent (e.g. 8 for 8%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Time in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for compound interest
#[derive(Args)]
pub struct CompoundInterestArgs {
    /// Principal amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual nominal rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Time in years
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Compounding frequency: annually, semi-annually, quarterly, monthly, daily, or an integer
    #[arg(long, default_value = "annually")]
    pub frequency: CompoundingFrequency,

    /// Also report the continuous-compounding limit P * e^(RT)
    #[arg(long)]
    pub continuous: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_simple_interest(args: SimpleInterestArgs) -> CommandResult {
    let any = args.principal.is_some() || args.rate.is_some() || args.years.is_some();
    let si_input: SimpleInterestInput = load_input(
        args.input.as_deref(),
        any,
        || {
            Ok(SimpleInterestInput {
                principal: args.principal.ok_or_else(|| missing("principal"))?,
                annual_rate: args.rate.ok_or_else(|| missing("rate"))?,
                years: args.years.ok_or_else(|| missing("years"))?,
            })
        },
        "simple interest",
    )?;
    let result = simple::calculate_simple_interest(&si_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compound_interest(args: CompoundInterestArgs) -> CommandResult {
    let any = args.principal.is_some() || args.rate.is_some() || args.years.is_some();
    let ci_input: CompoundInterestInput = load_input(
        args.input.as_deref(),
        any,
        || {
            Ok(CompoundInterestInput {
                principal: args.principal.ok_or_else(|| missing("principal"))?,
                annual_rate: args.rate.ok_or_else(|| missing("rate"))?,
                years: args.years.ok_or_else(|| missing("years"))?,
                periods_per_year: args.frequency.periods_per_year(),
            })
        },
        "compound interest",
    )?;
    let result = compound::calculate_compound_interest(&ci_input)?;
    let mut value = serde_json::to_value(result)?;

    if args.continuous {
        let limit = compound::continuous_compound_amount(
            ci_input.principal,
            ci_input.annual_rate,
            ci_input.years,
        )?;
        if let Some(obj) = value.get_mut("result").and_then(|r| r.as_object_mut()) {
            obj.insert("continuous_amount".into(), serde_json::to_value(limit)?);
        }
    }
    Ok(value)
}
