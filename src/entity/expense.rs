use serde::{Deserialize, Serialize};

use std::fs::File;

use crate::entity::category::Category;
use crate::entity::date::{Date, Month};
use crate::entity::line::Liner;
use crate::entity::money::{Amount, Money};
use crate::error::CliError;
use crate::CliResult;

/// A single expense, always persisted in the canonical currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Expense {
    pub id: u64,
    pub date: Date,
    pub amount: Amount,
    pub category: Category,
    pub note: Option<String>,
}

impl Expense {
    pub fn money(&self) -> Money {
        Money::canonical(self.amount)
    }
}

impl Liner for Expense {
    fn headers(&self) -> Vec<&'static str> {
        vec!["Id", "Date", "Amount", "Category", "Note"]
    }

    fn month(&self) -> Month {
        self.date.month()
    }

    fn write(&self, wrt: &mut csv::Writer<File>) -> CliResult<()> {
        wrt.serialize(self).map_err(CliError::from)
    }
}
