use clap::Parser;
use prettytable::format::Alignment;
use prettytable::{format, Cell, Row, Table};

use crate::config::Config;
use crate::entity::money::{symbol_for, CANONICAL, SUPPORTED};
use crate::exchange::Exchange;

#[derive(Parser, Debug)]
pub struct Args {
    /// Fetch the rates again, ignoring the cached ones
    #[arg(short, long)]
    refresh: bool,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::new()?;

    args.display(&config)
}

impl Args {
    fn display(&self, config: &Config) -> anyhow::Result<()> {
        let rates = if self.refresh {
            Exchange::refresh(config)
        } else {
            Exchange::new(config)
        };

        let rates = match rates {
            Some(rates) => rates,
            None => {
                crate::werr!("Exchange rates are unavailable");
                return Ok(());
            }
        };

        let mut table = Table::new();

        table.set_format(format::FormatBuilder::new().padding(2, 3).build());

        table.set_titles(Row::new(vec![Cell::new(&format!("Rates per 1 {}", CANONICAL))
            .with_hspan(3)
            .style_spec("bcFC")]));

        for currency in SUPPORTED.iter() {
            let rate = match rates.get(currency.code()) {
                Some(rate) => format!("{:.4}", rate),
                None => "-".to_string(),
            };

            table.add_row(Row::new(vec![
                Cell::new(currency.code()).style_spec("bFB"),
                Cell::new(symbol_for(currency.code())),
                Cell::new_align(&rate, Alignment::RIGHT),
            ]));
        }

        table.printstd();

        Ok(())
    }
}
