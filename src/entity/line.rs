use enum_dispatch::enum_dispatch;

use std::fs::File;

use crate::entity::budget::Budget;
use crate::entity::date::Month;
use crate::entity::expense::Expense;
use crate::{CliResult, Mode};

#[enum_dispatch]
#[derive(Clone, Debug, PartialEq)]
pub enum Line {
    Expense,
    Budget,
}

impl Line {
    pub fn default(mode: Mode) -> Line {
        match mode {
            Mode::Expenses => Expense::default().into(),
            Mode::Budgets => Budget::default().into(),
        }
    }
}

#[enum_dispatch(Line)]
pub trait Liner {
    fn headers(&self) -> Vec<&'static str>;
    fn month(&self) -> Month;
    fn write(&self, wrt: &mut csv::Writer<File>) -> CliResult<()>;
}
