use clap::Parser;

use crate::config::Config;
use crate::entity::category::Category;
use crate::entity::date::Date;
use crate::entity::expense::Expense;
use crate::entity::money::{Amount, Currency, Money};
use crate::exchange::Rates;
use crate::ledger::Ledger;
use crate::util;

static SUCCESS: &str = "Expense added";

#[derive(Parser, Debug)]
pub struct Args {
    /// Amount spent, in the currency given by --currency
    #[arg(short, long)]
    amount: Amount,
    /// Currency the amount was spent in (defaults to the configured currency)
    #[arg(short = 'C', long)]
    currency: Option<Currency>,
    /// One of Food, Transport, Rent, Bills, Entertainment, Shopping, Healthcare, Other
    #[arg(short, long, default_value = "Other")]
    category: Category,
    /// Day of the expense, formatted as %Y-%m-%d (defaults to today)
    #[arg(short, long, default_value = "")]
    date: Date,
    /// Free text describing the expense
    #[arg(short, long)]
    note: Option<String>,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::new()?;

    args.book(&config)
}

impl Args {
    fn book(self, config: &Config) -> anyhow::Result<()> {
        let currency = self.currency.unwrap_or(config.currency);

        let rates = if currency.canonical() {
            None
        } else {
            util::rates(config)
        };

        let ledger = Ledger::new(config)?;

        let entered = Money::new(self.amount, currency);

        let expense = ledger.record(
            self.date,
            entered,
            self.category,
            self.note,
            rates.as_ref(),
        )?;

        if let Some(warning) = unconverted(entered, &expense, rates.as_ref()) {
            crate::werr!("{}", warning);
        }

        crate::wout!(
            "{}: #{} {} {} on {}",
            SUCCESS,
            expense.id,
            expense.money(),
            expense.category,
            expense.date
        );

        Ok(())
    }
}

/// Warning for an amount that had to be stored as if it were in the canonical currency.
fn unconverted(entered: Money, expense: &Expense, rates: Option<&Rates>) -> Option<String> {
    if rates.is_some() || entered.currency.canonical() {
        return None;
    }

    Some(format!(
        "Warning: {} {} stored as {} unconverted",
        entered.amount,
        entered.currency,
        expense.money()
    ))
}
