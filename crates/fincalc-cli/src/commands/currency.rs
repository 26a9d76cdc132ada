use clap::Args;
use rust_decimal::Decimal;

use fincalc_core::currency::conversion::{
    self, ConversionInput, MultiConversionInput, RateTable,
};

use super::{missing_flag, CommandResult};
use crate::input;

/// Arguments for currency conversion
#[derive(Args)]
pub struct ConvertArgs {
    /// JSON/YAML rate snapshot: { "base": "USD", "as_of": "2024-05-01", "rates": { "INR": "83.2" } }
    #[arg(long)]
    pub rates: String,

    /// Amount to convert
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Source currency code
    #[arg(long)]
    pub from: Option<String>,

    /// Target currency code(s), comma separated
    #[arg(long, value_delimiter = ',')]
    pub to: Vec<String>,
}

pub fn run_convert(args: ConvertArgs) -> CommandResult {
    let rates: RateTable = input::file::read_input(&args.rates)?;
    let amount = args.amount.ok_or_else(|| missing_flag("convert", "amount"))?;
    let from = args.from.ok_or_else(|| missing_flag("convert", "from"))?;
    let on = Some(chrono::Local::now().date_naive());

    match args.to.as_slice() {
        [] => Err(missing_flag("convert", "to").into()),
        [to] => {
            let result = conversion::convert_currency(&ConversionInput {
                amount,
                from,
                to: to.clone(),
                rates,
                on,
            })?;
            Ok(serde_json::to_value(result)?)
        }
        targets => {
            let result = conversion::convert_many(&MultiConversionInput {
                amount,
                from,
                targets: targets.to_vec(),
                rates,
                on,
            })?;
            Ok(serde_json::to_value(result)?)
        }
    }
}
