use clap::Parser;
use prettytable::format::Alignment;
use prettytable::{format, Cell, Row, Table};

use crate::config::Config;
use crate::entity::date::Month;
use crate::entity::money::Currency;
use crate::entity::status::{Breakdown, Share, Standing, Status};
use crate::filter::Filter;
use crate::ledger::Ledger;
use crate::util;

static NO_BUDGET: &str = "No budget set for";
static OVER: &str = "You have exceeded your budget!";
static WITHIN: &str = "You are within budget";
const BAR_WIDTH: usize = 20;

#[derive(Parser, Debug)]
pub struct Args {
    /// Display amounts in the currency
    #[arg(short = 'C', long)]
    currency: Option<Currency>,
    /// Month of the budget, formatted as %Y-%m (defaults to the current month)
    #[arg(short, long)]
    month: Option<Month>,
    /// Only count expenses of the budget month instead of every expense recorded
    #[arg(long)]
    month_only: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::new()?;

    args.report(&config)
}

impl Args {
    fn report(&self, config: &Config) -> anyhow::Result<()> {
        let rates = util::rates(config);

        let currency = util::display_currency(self.currency, config, rates.as_ref());

        let month = self.month.unwrap_or_else(Month::current);
        let filter = Filter::new(month, self.month_only);

        let ledger = Ledger::new(config)?;

        match ledger.budget_status(month, &filter, currency, rates.as_ref())? {
            Some(status) => display_status(month, &status),
            None => {
                let spent = ledger.total_spent(&filter, currency, rates.as_ref())?;
                crate::wout!("{} {} (spent so far: {})", NO_BUDGET, month, spent);
            }
        }

        let breakdown = ledger.category_breakdown(&filter, currency, rates.as_ref())?;

        display_breakdown(&breakdown);

        Ok(())
    }
}

fn display_status(month: Month, status: &Status) {
    let mut table = Table::new();

    table.set_format(format::FormatBuilder::new().padding(2, 3).build());

    table.set_titles(Row::new(vec![Cell::new(&format!("Budget {}", month))
        .with_hspan(2)
        .style_spec("bcFC")]));

    table.add_row(Row::new(vec![
        Cell::new("Budget").style_spec("bFB"),
        util::money_cell(&status.budget, Alignment::RIGHT, None),
    ]));

    table.add_row(Row::new(vec![
        Cell::new("Spent").style_spec("bFB"),
        util::money_cell(&status.spent, Alignment::RIGHT, None),
    ]));

    let (label, value) = match status.standing {
        Standing::UnderBudget(remaining) => ("Remaining", remaining),
        Standing::OverBudget(excess) => ("Over by", excess),
    };

    table.add_row(Row::new(vec![
        Cell::new(label).style_spec("bFB"),
        util::money_cell(&value, Alignment::RIGHT, Some(!status.over())),
    ]));

    table.add_row(Row::new(vec![
        Cell::new(&util::bar(status.progress, BAR_WIDTH)),
        util::percentage_cell(status.progress * 100.0, Alignment::RIGHT),
    ]));

    table.printstd();

    if status.over() {
        crate::wout!("{}", OVER);
    } else {
        crate::wout!("{}", WITHIN);
    }
}

fn display_breakdown(breakdown: &Breakdown) {
    let mut table = Table::new();

    table.set_format(format::FormatBuilder::new().padding(2, 3).build());

    table.set_titles(Row::new(vec![Cell::new("Spending")
        .with_hspan(4)
        .style_spec("bcFC")]));

    table.add_row(Row::new(vec![
        Cell::new("Category").style_spec("bFB"),
        Cell::new("Amount").style_spec("bFB"),
        Cell::new("(%)").style_spec("bFB"),
        Cell::new("Chart").style_spec("bFB"),
    ]));

    for share in &breakdown.shares {
        table.add_row(Row::new(vec![
            Cell::new(share.category.name()),
            util::money_cell(&share.amount, Alignment::RIGHT, None),
            util::percentage_cell(share.percentage, Alignment::RIGHT),
            Cell::new(&chart(share)),
        ]));
    }

    table.add_row(Row::new(vec![
        Cell::new("Total").style_spec("bFB"),
        util::money_cell(&breakdown.total, Alignment::RIGHT, None),
        Cell::new(""),
        Cell::new(""),
    ]));

    table.printstd();
}

/// Bar of the share of total spending of one category.
fn chart(share: &Share) -> String {
    util::bar(share.percentage / 100.0, BAR_WIDTH)
}
