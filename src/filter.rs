use crate::entity::date::Month;
use crate::entity::line::{Line, Liner};

/// Which expenses count towards the spent total.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    month: Option<Month>,
}

impl Filter {
    /// Every expense ever recorded, regardless of the budget month.
    pub fn lifetime() -> Self {
        Filter { month: None }
    }

    pub fn month(month: Month) -> Self {
        Filter { month: Some(month) }
    }

    pub fn new(month: Month, month_only: bool) -> Self {
        if month_only {
            Filter::month(month)
        } else {
            Filter::lifetime()
        }
    }

    pub fn apply(&self, line: &Line) -> bool {
        match self.month {
            Some(month) => line.month() == month,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::entity::date::Date;
    use crate::entity::expense::Expense;

    fn expense(date: &str) -> Line {
        Expense {
            date: Date::parse(date).unwrap(),
            ..Default::default()
        }
        .into()
    }

    #[test]
    fn lifetime_accepts_everything() {
        let filter = Filter::new(Month::parse("2024-03").unwrap(), false);

        assert!(filter.apply(&expense("2019-01-01")));
        assert!(filter.apply(&expense("2024-03-10")));
    }

    #[test]
    fn month_only_accepts_the_month() {
        let filter = Filter::new(Month::parse("2024-03").unwrap(), true);

        assert!(filter.apply(&expense("2024-03-31")));
        assert!(!filter.apply(&expense("2024-04-01")));
    }
}
