use crate::config::Config;
use crate::entity::budget::Budget;
use crate::entity::category::Category;
use crate::entity::date::{Date, Month};
use crate::entity::expense::Expense;
use crate::entity::line::Line;
use crate::entity::money::{Currency, Money, CANONICAL};
use crate::entity::status::{self, Breakdown, Status};
use crate::error::CliError;
use crate::exchange::Rates;
use crate::filter::Filter;
use crate::resource::Resource;
use crate::{CliResult, Mode};

/// Owner of the expense and budget files.
///
/// Expenses are stored in the canonical currency, budgets in the currency they were set in.
/// Every derived view converts into the requested display currency when it is read.
pub struct Ledger {
    expenses: Resource,
    budgets: Resource,
}

impl Ledger {
    pub fn new(config: &Config) -> CliResult<Ledger> {
        Ok(Ledger {
            expenses: Resource::new(config, Mode::Expenses)?,
            budgets: Resource::new(config, Mode::Budgets)?,
        })
    }

    /// Records an expense entered in any currency, storing it in the canonical one.
    pub fn record(
        &self,
        date: Date,
        entered: Money,
        category: Category,
        note: Option<String>,
        rates: Option<&Rates>,
    ) -> CliResult<Expense> {
        if !entered.amount.positive() {
            return Err(CliError::InvalidAmount {
                amount: entered.amount.to_string(),
            });
        }

        let canonical = entered.exchange(CANONICAL, rates)?;

        let expense = Expense {
            id: self.next_id()?,
            date,
            amount: canonical.amount,
            category,
            note: note.filter(|value| !value.trim().is_empty()),
        };

        self.expenses.book(&[expense.clone().into()])?;

        log::debug!(
            "Recorded expense {} of {} ({} entered)",
            expense.id,
            canonical,
            entered
        );

        Ok(expense)
    }

    /// Sets the budget of `month`, replacing any previous one.
    pub fn set_budget(&self, month: Month, limit: Money) -> CliResult<Budget> {
        if !limit.amount.positive() {
            return Err(CliError::InvalidAmount {
                amount: limit.amount.to_string(),
            });
        }

        let budget = Budget {
            month,
            amount: limit.amount,
            currency: limit.currency,
        };

        let mut budgets: Vec<Budget> = self
            .budgets()?
            .into_iter()
            .filter(|existing| existing.month != month)
            .collect();

        budgets.push(budget.clone());
        budgets.sort_by_key(|existing| existing.month);

        let lines: Vec<Line> = budgets.into_iter().map(Line::from).collect();

        self.budgets.rewrite(&lines)?;

        log::debug!("Budget for {} set to {}", month, limit);

        Ok(budget)
    }

    pub fn expenses(&self) -> CliResult<Vec<Expense>> {
        self.selected(&Filter::lifetime())
    }

    pub fn budgets(&self) -> CliResult<Vec<Budget>> {
        let budgets = self
            .budgets
            .lines()?
            .into_iter()
            .filter_map(|record| match record {
                Line::Budget(budget) => Some(budget),
                Line::Expense(_) => None,
            })
            .collect();

        Ok(budgets)
    }

    pub fn budget(&self, month: Month) -> CliResult<Option<Budget>> {
        Ok(self
            .budgets()?
            .into_iter()
            .find(|budget| budget.month == month))
    }

    pub fn total_spent(
        &self,
        filter: &Filter,
        display: Currency,
        rates: Option<&Rates>,
    ) -> CliResult<Money> {
        status::spent(&self.selected(filter)?, display, rates)
    }

    /// Status of the budget of `month`, `None` while no budget was set for it.
    pub fn budget_status(
        &self,
        month: Month,
        filter: &Filter,
        display: Currency,
        rates: Option<&Rates>,
    ) -> CliResult<Option<Status>> {
        let budget = match self.budget(month)? {
            Some(budget) => budget,
            None => return Ok(None),
        };

        let expenses = self.selected(filter)?;

        Status::compute(&budget, &expenses, display, rates).map(Some)
    }

    pub fn category_breakdown(
        &self,
        filter: &Filter,
        display: Currency,
        rates: Option<&Rates>,
    ) -> CliResult<Breakdown> {
        Breakdown::compute(&self.selected(filter)?, display, rates)
    }

    fn selected(&self, filter: &Filter) -> CliResult<Vec<Expense>> {
        let mut expenses = Vec::new();

        self.expenses.line(&mut |record| {
            if filter.apply(&record) {
                if let Line::Expense(expense) = record {
                    expenses.push(expense);
                }
            }
            Ok(())
        })?;

        Ok(expenses)
    }

    fn next_id(&self) -> CliResult<u64> {
        let last = self
            .expenses()?
            .iter()
            .map(|expense| expense.id)
            .max()
            .unwrap_or(0);

        Ok(last + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::tests::isolated;
    use crate::entity::money::Amount;
    use crate::entity::status::Standing;

    fn rates() -> Rates {
        vec![("EUR".to_string(), 0.90), ("JPY".to_string(), 150.0)]
            .into_iter()
            .collect()
    }

    fn money(cents: i64, currency: Currency) -> Money {
        Money::new(Amount::new(cents), currency)
    }

    fn date(value: &str) -> Date {
        Date::parse(value).unwrap()
    }

    fn month(value: &str) -> Month {
        Month::parse(value).unwrap()
    }

    #[test]
    fn expenses_are_stored_in_canonical_currency() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();
        let rates = rates();

        let expense = ledger
            .record(
                date("2024-03-02"),
                money(9000, Currency::EUR),
                Category::Food,
                Some("groceries".to_string()),
                Some(&rates),
            )
            .unwrap();

        assert_eq!(expense.amount, Amount::new(10000));

        let stored = ledger.expenses().unwrap();
        assert_eq!(stored, vec![expense]);
        assert_eq!(stored[0].note.as_deref(), Some("groceries"));
    }

    #[test]
    fn expense_ids_increase() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();

        for _ in 0..3 {
            ledger
                .record(date("2024-03-02"), money(100, Currency::USD), Category::Other, None, None)
                .unwrap();
        }

        let ids: Vec<u64> = ledger.expenses().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn non_positive_expense_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();

        for cents in &[0, -500] {
            let result = ledger.record(
                date("2024-03-02"),
                money(*cents, Currency::USD),
                Category::Food,
                None,
                None,
            );

            assert!(matches!(result, Err(CliError::InvalidAmount { .. })));
        }

        assert!(ledger.expenses().unwrap().is_empty());
    }

    #[test]
    fn expenses_are_accepted_without_budget() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();

        ledger
            .record(date("2024-03-02"), money(100, Currency::USD), Category::Rent, None, None)
            .unwrap();

        assert_eq!(ledger.budget(month("2024-03")).unwrap(), None);
        assert_eq!(ledger.expenses().unwrap().len(), 1);
    }

    #[test]
    fn setting_a_budget_twice_keeps_one_entry() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();

        ledger.set_budget(month("2024-03"), money(50000, Currency::EUR)).unwrap();
        ledger.set_budget(month("2024-04"), money(10000, Currency::USD)).unwrap();
        ledger.set_budget(month("2024-03"), money(60000, Currency::EUR)).unwrap();

        let march: Vec<Budget> = ledger
            .budgets()
            .unwrap()
            .into_iter()
            .filter(|budget| budget.month == month("2024-03"))
            .collect();

        assert_eq!(march.len(), 1);
        assert_eq!(march[0].amount, Amount::new(60000));
        assert_eq!(march[0].currency, Currency::EUR);
        assert_eq!(ledger.budgets().unwrap().len(), 2);
    }

    #[test]
    fn non_positive_budget_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();

        let result = ledger.set_budget(month("2024-03"), money(0, Currency::USD));

        assert!(matches!(result, Err(CliError::InvalidAmount { .. })));
        assert_eq!(ledger.budget(month("2024-03")).unwrap(), None);
    }

    #[test]
    fn no_budget_means_no_status() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();

        let status = ledger
            .budget_status(month("2024-03"), &Filter::lifetime(), Currency::USD, None)
            .unwrap();

        assert_eq!(status, None);
    }

    #[test]
    fn status_counts_lifetime_spending_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();

        ledger.set_budget(month("2024-03"), money(40000, Currency::USD)).unwrap();
        ledger
            .record(date("2024-02-27"), money(25000, Currency::USD), Category::Rent, None, None)
            .unwrap();
        ledger
            .record(date("2024-03-02"), money(20000, Currency::USD), Category::Food, None, None)
            .unwrap();

        let lifetime = ledger
            .budget_status(month("2024-03"), &Filter::lifetime(), Currency::USD, None)
            .unwrap()
            .unwrap();

        assert_eq!(
            lifetime.standing,
            Standing::OverBudget(money(5000, Currency::USD))
        );
        assert_eq!(lifetime.progress, 1.0);

        let monthly = ledger
            .budget_status(month("2024-03"), &Filter::month(month("2024-03")), Currency::USD, None)
            .unwrap()
            .unwrap();

        assert_eq!(
            monthly.standing,
            Standing::UnderBudget(money(20000, Currency::USD))
        );
    }

    #[test]
    fn totals_are_shown_in_display_currency() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();
        let rates = rates();

        ledger
            .record(date("2024-03-02"), money(10000, Currency::USD), Category::Food, None, None)
            .unwrap();
        ledger
            .record(date("2024-03-03"), money(5000, Currency::USD), Category::Bills, None, None)
            .unwrap();

        let total = ledger
            .total_spent(&Filter::lifetime(), Currency::JPY, Some(&rates))
            .unwrap();
        assert_eq!(total, money(2250000, Currency::JPY));

        let breakdown = ledger
            .category_breakdown(&Filter::lifetime(), Currency::EUR, Some(&rates))
            .unwrap();
        assert_eq!(breakdown.total, money(13500, Currency::EUR));
        assert_eq!(breakdown.shares[0].category, Category::Food);
        assert!((breakdown.shares[0].percentage - 200.0 / 3.0).abs() < 0.01);
    }

    #[test]
    fn overflowing_totals_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();
        let large = Amount::parse("90000000000000000").unwrap();

        for _ in 0..2 {
            let entered = Money::new(large, Currency::USD);

            ledger
                .record(date("2024-03-02"), entered, Category::Food, None, None)
                .unwrap();
        }

        ledger.set_budget(month("2024-03"), money(40000, Currency::USD)).unwrap();

        let filter = Filter::lifetime();

        assert!(matches!(
            ledger.total_spent(&filter, Currency::USD, None),
            Err(CliError::IncorrectAmount { .. })
        ));
        assert!(ledger
            .budget_status(month("2024-03"), &filter, Currency::USD, None)
            .is_err());
        assert!(ledger.category_breakdown(&filter, Currency::USD, None).is_err());
        let recorded =
            ledger.record(date("2024-03-03"), money(100, Currency::USD), Category::Food, None, None);
        assert!(recorded.is_ok());
    }

    #[test]
    fn out_of_range_conversion_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = Ledger::new(&isolated(dir.path())).unwrap();
        let rates: Rates = vec![("NGN".to_string(), 1e-6)].into_iter().collect();

        let result = ledger.record(
            date("2024-03-02"),
            Money::new(Amount::parse("1e15").unwrap(), Currency::NGN),
            Category::Food,
            None,
            Some(&rates),
        );

        assert!(matches!(result, Err(CliError::IncorrectAmount { .. })));
        assert!(ledger.expenses().unwrap().is_empty());
    }
}
