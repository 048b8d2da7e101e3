//! Budget views: planned spend per item against what was actually spent.

use super::filter::resolve_category;
use crate::{
    models::{BudgetItem, Entry},
    store::LedgerState,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Money left on a budget item. Negative when the item is over budget.
#[must_use]
pub fn budget_due(item: &BudgetItem, spent: Decimal) -> Decimal {
    item.amount - spent
}

/// Expense spent against one expense type in `(year, month)`.
#[must_use]
pub fn spent_for_type(entries: &[Entry], type_id: &str, year: i32, month: u32) -> Decimal {
    entries
        .iter()
        .filter(|entry| {
            entry.is_expense()
                && entry.in_period(year, Some(month))
                && entry.expense_type_id() == Some(type_id)
        })
        .map(Entry::amount)
        .sum()
}

/// Expense totals per expense type for `(year, month)`. Untyped entries are left out.
#[must_use]
pub fn spent_by_type(entries: &[Entry], year: i32, month: u32) -> BTreeMap<String, Decimal> {
    let mut totals = BTreeMap::new();
    for entry in entries
        .iter()
        .filter(|entry| entry.is_expense() && entry.in_period(year, Some(month)))
    {
        if let Some(type_id) = entry.expense_type_id() {
            *totals.entry(type_id.to_string()).or_insert(Decimal::ZERO) += entry.amount();
        }
    }
    totals
}

/// What has been spent against `item` in its own period.
///
/// An item tied to an expense type is measured against that type. An item without a type is
/// measured against everything filed under its category.
#[must_use]
pub fn spent_for_item(ledger: &LedgerState, item: &BudgetItem) -> Decimal {
    match item.expense_type_id.as_deref() {
        Some(type_id) => spent_for_type(ledger.entries(), type_id, item.year, item.month),
        None => ledger
            .entries()
            .iter()
            .filter(|entry| entry.is_expense() && entry.in_period(item.year, Some(item.month)))
            .filter(|entry| resolve_category(ledger, entry) == item.category_id)
            .map(Entry::amount)
            .sum(),
    }
}

/// One budget item with its spend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetLine {
    /// The planned item
    pub item: BudgetItem,
    /// Spent so far
    pub spent: Decimal,
    /// `item.amount - spent`
    pub due: Decimal,
}

impl BudgetLine {
    /// True when more was spent than planned.
    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.due < Decimal::ZERO
    }
}

/// Budget lines for `(year, month)`, optionally restricted to one expense category, by name.
#[must_use]
pub fn budget_lines(
    ledger: &LedgerState,
    year: i32,
    month: u32,
    category_id: Option<&str>,
) -> Vec<BudgetLine> {
    let category = super::filter::filter_value(category_id);
    let mut lines: Vec<BudgetLine> = ledger
        .budget_items()
        .iter()
        .filter(|item| item.year == year && item.month == month)
        .filter(|item| category.is_none_or(|c| item.category_id == c))
        .map(|item| {
            let spent = spent_for_item(ledger, item);
            BudgetLine {
                item: item.clone(),
                spent,
                due: budget_due(item, spent),
            }
        })
        .collect();
    lines.sort_by(|a, b| a.item.name.cmp(&b.item.name));
    lines
}

/// Where the debit side of a [`MonthlyBudget`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitSource {
    /// Recorded income entries for the month
    Income,
    /// The declared budget debit for the month
    Declared,
    /// Neither exists
    Missing,
}

/// Totals for a month's budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyBudget {
    /// Year
    pub year: i32,
    /// Month
    pub month: u32,
    /// Sum of budget items
    pub planned: Decimal,
    /// Sum spent against the budget items
    pub spent: Decimal,
    /// `planned - spent`
    pub remaining: Decimal,
    /// Income available for the month
    pub debit: Decimal,
    /// Where `debit` came from
    pub debit_source: DebitSource,
    /// `debit - planned`
    pub unplanned: Decimal,
}

/// Planned vs spent vs available income for `(year, month)`.
///
/// Recorded income wins over the declared debit; the declaration is the fallback for months
/// whose income has not been entered yet.
#[must_use]
pub fn monthly_budget(ledger: &LedgerState, year: i32, month: u32) -> MonthlyBudget {
    let lines = budget_lines(ledger, year, month, None);
    let planned: Decimal = lines.iter().map(|line| line.item.amount).sum();
    let spent: Decimal = lines.iter().map(|line| line.spent).sum();

    let income: Vec<Decimal> = ledger
        .entries()
        .iter()
        .filter(|entry| entry.is_income() && entry.in_period(year, Some(month)))
        .map(Entry::amount)
        .collect();
    let (debit, debit_source) = if income.is_empty() {
        ledger
            .budget_debit(year, month, None)
            .map_or((Decimal::ZERO, DebitSource::Missing), |declared| {
                (declared.amount, DebitSource::Declared)
            })
    } else {
        (income.into_iter().sum(), DebitSource::Income)
    };

    MonthlyBudget {
        year,
        month,
        planned,
        spent,
        remaining: planned - spent,
        debit,
        debit_source,
        unplanned: debit - planned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::BudgetDebit, test_utils::*};

    fn item(id: &str, name: &str, amount: i64, category: &str, type_id: Option<&str>) -> BudgetItem {
        BudgetItem {
            id: id.to_string(),
            name: name.to_string(),
            amount: Decimal::from(amount),
            year: 2025,
            month: 6,
            category_id: category.to_string(),
            expense_type_id: type_id.map(str::to_string),
        }
    }

    fn ledger() -> LedgerState {
        let mut ledger = ledger_with(vec![
            income(45_000, date(2025, 6, 5)),
            typed_expense(12_000, "other", "t-rent", date(2025, 6, 1)),
            typed_expense(5000, "basar", "t-groceries", date(2025, 6, 8)),
            typed_expense(4000, "basar", "t-groceries", date(2025, 6, 22)),
            typed_expense(2500, "study", "t-tuition", date(2025, 6, 10)),
            typed_expense(9999, "basar", "t-groceries", date(2025, 5, 8)),
        ]);
        ledger.replace_expense_types(vec![
            expense_type("t-rent", "Rent", "c-house"),
            expense_type("t-groceries", "Groceries", "c-food"),
            expense_type("t-tuition", "Tuition", "c-education"),
        ]);
        ledger.replace_budget_items(vec![
            item("b1", "Rent", 12_000, "c-house", Some("t-rent")),
            item("b2", "Groceries", 8000, "c-food", Some("t-groceries")),
            item("b3", "Education", 3000, "c-education", None),
        ]);
        ledger
    }

    #[test]
    fn test_budget_due_is_signed() {
        let rent = item("b1", "Rent", 12_000, "c-house", None);
        assert_eq!(budget_due(&rent, Decimal::from(10_000)), Decimal::from(2000));
        assert_eq!(budget_due(&rent, Decimal::from(12_500)), Decimal::from(-500));
        assert_eq!(budget_due(&rent, Decimal::ZERO), Decimal::from(12_000));
    }

    #[test]
    fn test_spent_for_type_stays_in_period() {
        let ledger = ledger();
        assert_eq!(
            spent_for_type(ledger.entries(), "t-groceries", 2025, 6),
            Decimal::from(9000)
        );
        assert_eq!(
            spent_for_type(ledger.entries(), "t-groceries", 2025, 5),
            Decimal::from(9999)
        );
        assert_eq!(spent_for_type(ledger.entries(), "t-none", 2025, 6), Decimal::ZERO);

        let by_type = spent_by_type(ledger.entries(), 2025, 6);
        assert_eq!(by_type.len(), 3);
        assert_eq!(by_type["t-rent"], Decimal::from(12_000));
    }

    #[test]
    fn test_budget_lines() {
        let ledger = ledger();
        let lines = budget_lines(&ledger, 2025, 6, None);
        let names: Vec<_> = lines.iter().map(|l| l.item.name.as_str()).collect();
        assert_eq!(names, ["Education", "Groceries", "Rent"]);

        let groceries = &lines[1];
        assert_eq!(groceries.spent, Decimal::from(9000));
        assert_eq!(groceries.due, Decimal::from(-1000));
        assert!(groceries.is_over_budget());

        let education = &lines[0];
        assert_eq!(education.spent, Decimal::from(2500));
        assert!(!education.is_over_budget());

        assert_eq!(budget_lines(&ledger, 2025, 6, Some("c-food")).len(), 1);
        assert_eq!(budget_lines(&ledger, 2025, 6, Some("")).len(), 3);
    }

    #[test]
    fn test_monthly_budget_prefers_income() {
        let mut ledger = ledger();
        ledger.replace_budget_debits(vec![
            BudgetDebit::new(2025, 6, None, Decimal::from(40_000)),
            BudgetDebit::new(2025, 7, None, Decimal::from(46_000)),
        ]);

        let june = monthly_budget(&ledger, 2025, 6);
        assert_eq!(june.planned, Decimal::from(23_000));
        assert_eq!(june.spent, Decimal::from(23_500));
        assert_eq!(june.remaining, Decimal::from(-500));
        assert_eq!(june.debit, Decimal::from(45_000));
        assert_eq!(june.debit_source, DebitSource::Income);
        assert_eq!(june.unplanned, Decimal::from(22_000));

        let july = monthly_budget(&ledger, 2025, 7);
        assert_eq!(july.debit, Decimal::from(46_000));
        assert_eq!(july.debit_source, DebitSource::Declared);
        assert_eq!(july.planned, Decimal::ZERO);

        let august = monthly_budget(&ledger, 2025, 8);
        assert_eq!(august.debit_source, DebitSource::Missing);
        assert_eq!(august.debit, Decimal::ZERO);
    }
}
