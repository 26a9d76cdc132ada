use clap::Args;
use rust_decimal::Decimal;

use fincalc_core::loans::emi::{self, EmiInput};

use super::{load_input, missing, CommandResult};

/// Arguments for EMI / loan payment
#[derive(Args)]
pub struct EmiArgs {
    /// Loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (0 for an interest-free loan)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years (must be a whole number of months)
    #[arg(long)]
    pub years: Option<Decimal>,

    /// Include the month-by-month amortization schedule
    #[arg(long)]
    pub schedule: bool,

    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_emi(args: EmiArgs) -> CommandResult {
    let any = args.principal.is_some() || args.rate.is_some() || args.years.is_some();
    let mut emi_input: EmiInput = load_input(
        args.input.as_deref(),
        any,
        || {
            Ok(EmiInput {
                principal: args.principal.ok_or_else(|| missing("principal"))?,
                annual_rate: args.rate.ok_or_else(|| missing("rate"))?,
                tenure_years: args.years.ok_or_else(|| missing("years"))?,
                include_schedule: args.schedule,
            })
        },
        "EMI",
    )?;
    emi_input.include_schedule |= args.schedule;
    let result = emi::calculate_emi(&emi_input)?;
    Ok(serde_json::to_value(result)?)
}
