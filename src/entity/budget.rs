use serde::{Deserialize, Serialize};

use std::fs::File;

use crate::entity::date::Month;
use crate::entity::line::Liner;
use crate::entity::money::{Amount, Currency, Money};
use crate::error::CliError;
use crate::CliResult;

/// Spending limit of a month, kept in the currency it was set in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Budget {
    pub month: Month,
    pub amount: Amount,
    pub currency: Currency,
}

impl Budget {
    pub fn money(&self) -> Money {
        Money::new(self.amount, self.currency)
    }
}

impl Liner for Budget {
    fn headers(&self) -> Vec<&'static str> {
        vec!["Month", "Amount", "Currency"]
    }

    fn month(&self) -> Month {
        self.month
    }

    fn write(&self, wrt: &mut csv::Writer<File>) -> CliResult<()> {
        wrt.serialize(self).map_err(CliError::from)
    }
}
