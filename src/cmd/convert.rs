use clap::Parser;

use crate::config::Config;
use crate::entity::money::{symbol_for, Amount};
use crate::exchange;
use crate::util;

#[derive(Parser, Debug)]
pub struct Args {
    /// Amount to convert
    amount: Amount,
    /// Currency code of the amount
    from: String,
    /// Currency code to convert to
    to: String,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::new()?;

    args.convert(&config)
}

impl Args {
    fn convert(&self, config: &Config) -> anyhow::Result<()> {
        let from = self.from.to_uppercase();
        let to = self.to.to_uppercase();

        let rates = util::rates(config);

        let converted = exchange::convert(self.amount.units(), &from, &to, rates.as_ref());
        let converted = Amount::from_units(converted)?;

        crate::wout!(
            "{}{} = {}{}",
            symbol_for(&from),
            self.amount,
            symbol_for(&to),
            converted
        );

        Ok(())
    }
}
