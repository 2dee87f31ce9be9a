use clap::Parser;

use crate::config::Config;
use crate::entity::date::Month;
use crate::entity::money::{Amount, Currency, Money};
use crate::ledger::Ledger;

#[derive(Parser, Debug)]
pub struct Args {
    /// Spending limit for the month
    #[arg(short, long)]
    amount: Amount,
    /// Currency of the limit (defaults to the configured currency)
    #[arg(short = 'C', long)]
    currency: Option<Currency>,
    /// Month of the budget, formatted as %Y-%m (defaults to the current month)
    #[arg(short, long)]
    month: Option<Month>,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::new()?;

    args.set(&config)
}

impl Args {
    fn set(&self, config: &Config) -> anyhow::Result<()> {
        let ledger = Ledger::new(config)?;

        let month = self.month.unwrap_or_else(Month::current);
        let currency = self.currency.unwrap_or(config.currency);

        let budget = ledger.set_budget(month, Money::new(self.amount, currency))?;

        crate::wout!("Budget for {} set to {}", budget.month, budget.money());

        Ok(())
    }
}
