use std::collections::BTreeMap;

use crate::entity::budget::Budget;
use crate::entity::category::Category;
use crate::entity::expense::Expense;
use crate::entity::money::{Amount, Currency, Money, CANONICAL};
use crate::exchange::Rates;
use crate::CliResult;

/// Sum of the canonical amounts shown in `display`.
pub fn spent(
    expenses: &[Expense],
    display: Currency,
    rates: Option<&Rates>,
) -> CliResult<Money> {
    let total = Amount::total(expenses.iter().map(|expense| expense.amount))?;

    Money::canonical(total).exchange(display, rates)
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Standing {
    UnderBudget(Money),
    OverBudget(Money),
}

/// Budget of a month against what was spent, both in the display currency.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Status {
    pub budget: Money,
    pub spent: Money,
    pub standing: Standing,
    /// Share of the budget already spent, within [0, 1].
    pub progress: f64,
}

impl Status {
    pub fn compute(
        budget: &Budget,
        expenses: &[Expense],
        display: Currency,
        rates: Option<&Rates>,
    ) -> CliResult<Status> {
        let limit = budget.money().exchange(display, rates)?;
        let spent = spent(expenses, display, rates)?;

        let remaining = limit.amount.checked_sub(spent.amount)?;

        let (standing, progress) = if remaining.negative() {
            (Standing::OverBudget(Money::new(remaining.abs(), display)), 1.0)
        } else if limit.amount.positive() {
            let progress = spent.amount.units() / limit.amount.units();
            (Standing::UnderBudget(Money::new(remaining, display)), progress)
        } else {
            (Standing::UnderBudget(Money::new(remaining, display)), 0.0)
        };

        Ok(Status {
            budget: limit,
            spent,
            standing,
            progress: progress.max(0.0).min(1.0),
        })
    }

    pub fn over(&self) -> bool {
        matches!(self.standing, Standing::OverBudget(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub category: Category,
    pub amount: Money,
    /// Percentage of the total spent, 0 when nothing was spent.
    pub percentage: f64,
}

/// Spending grouped by category, sorted by amount, largest first.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakdown {
    pub total: Money,
    pub shares: Vec<Share>,
}

impl Breakdown {
    pub fn compute(
        expenses: &[Expense],
        display: Currency,
        rates: Option<&Rates>,
    ) -> CliResult<Breakdown> {
        let total = spent(expenses, display, rates)?;

        let mut sums: BTreeMap<Category, Amount> = BTreeMap::new();

        for expense in expenses {
            let sum = sums.entry(expense.category).or_default();
            *sum = sum.checked_add(expense.amount)?;
        }

        let mut shares = sums
            .into_iter()
            .map(|(category, sum)| -> CliResult<Share> {
                let amount = Money::new(sum, CANONICAL).exchange(display, rates)?;

                let percentage = if total.amount.zero() {
                    0.0
                } else {
                    amount.amount.units() / total.amount.units() * 100.0
                };

                Ok(Share {
                    category,
                    amount,
                    percentage,
                })
            })
            .collect::<CliResult<Vec<_>>>()?;

        shares.sort_by(|a, b| {
            b.amount
                .amount
                .cmp(&a.amount.amount)
                .then(a.category.cmp(&b.category))
        });

        Ok(Breakdown { total, shares })
    }
}
