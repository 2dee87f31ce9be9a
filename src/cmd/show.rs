use clap::Parser;
use serde::Serialize;

use crate::config::Config;
use crate::entity::category::Category;
use crate::entity::date::{Date, Month};
use crate::entity::money::{Amount, Currency};
use crate::ledger::Ledger;
use crate::util;

#[derive(Parser, Debug)]
pub struct Args {
    /// Display amounts in the currency
    #[arg(short = 'C', long)]
    currency: Option<Currency>,
    /// Select expenses that occurred on the month (%Y-%m)
    #[arg(short, long)]
    month: Option<Month>,
    /// Print selected expenses to the output
    #[arg(short, long, default_value = "/dev/stdout")]
    output: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct Row<'a> {
    id: u64,
    date: Date,
    amount: Amount,
    currency: Currency,
    category: Category,
    note: &'a str,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::new()?;

    args.show(&config)
}

impl Args {
    fn show(&self, config: &Config) -> anyhow::Result<()> {
        let rates = match self.currency.unwrap_or(config.currency) {
            currency if currency.canonical() => None,
            _ => util::rates(config),
        };

        let currency = util::display_currency(self.currency, config, rates.as_ref());

        let ledger = Ledger::new(config)?;

        let mut wtr = csv::Writer::from_path(&self.output)?;

        for expense in ledger.expenses()? {
            if let Some(month) = self.month {
                if !month.contains(expense.date) {
                    continue;
                }
            }

            let money = expense.money().exchange(currency, rates.as_ref())?;

            wtr.serialize(Row {
                id: expense.id,
                date: expense.date,
                amount: money.amount,
                currency: money.currency,
                category: expense.category,
                note: expense.note.as_deref().unwrap_or(""),
            })?;
        }

        wtr.flush()?;

        Ok(())
    }
}
