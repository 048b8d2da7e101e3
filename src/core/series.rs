//! Chart series: spending per day of a month and debit/credit per month of a year.
//!
//! "Debit" is the income side of a budget period and "credit" the expense side.

use super::filter::{filter_value, resolve_category};
use crate::{models::Entry, store::LedgerState};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

/// Number of days in `month` of `year`, or 0 when `month` is not 1 through 12.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.and_then(|next| u32::try_from(next.signed_duration_since(first).num_days()).ok())
        .unwrap_or(0)
}

/// Spending on one day of the month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPoint {
    /// Day of the month, starting at 1
    pub day: u32,
    /// Sum of expense transactions dated that day
    pub credit_total: Decimal,
}

/// One row per calendar day of `(year, month)`, each defaulting to zero.
///
/// Day-notes carry no money and never contribute.
#[must_use]
pub fn daily_series(entries: &[Entry], year: i32, month: u32) -> Vec<DayPoint> {
    let mut points: Vec<DayPoint> = (1..=days_in_month(year, month))
        .map(|day| DayPoint {
            day,
            credit_total: Decimal::ZERO,
        })
        .collect();

    for entry in entries
        .iter()
        .filter(|entry| entry.is_expense() && entry.in_period(year, Some(month)))
    {
        let index = entry.date.day0() as usize;
        if let Some(point) = points.get_mut(index) {
            point.credit_total += entry.amount();
        }
    }
    points
}

/// Income and spending for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthPoint {
    /// Month, 1 through 12
    pub month: u32,
    /// Declared debit, or planned budget when filtered by category
    pub debit_total: Decimal,
    /// Sum of expense transactions
    pub credit_total: Decimal,
}

/// Twelve rows for `year`.
///
/// Without a category filter the debit side is the declared [`crate::models::BudgetDebit`] for
/// the month (zero when none was declared) and the credit side is every expense transaction.
/// With a category filter the debit side is the sum of that category's budget items for the
/// month and the credit side is restricted to entries filed under the category.
///
/// # Arguments
/// * `ledger` - Local Store ledger snapshot
/// * `year` - Year to chart
/// * `category_id` - Expense category to restrict to; `"all"` and `""` mean no filter
#[must_use]
pub fn monthly_series(ledger: &LedgerState, year: i32, category_id: Option<&str>) -> Vec<MonthPoint> {
    let category = filter_value(category_id);
    (1..=12)
        .map(|month| {
            let debit_total = match category {
                None => ledger
                    .budget_debit(year, month, None)
                    .map_or(Decimal::ZERO, |debit| debit.amount),
                Some(category) => ledger
                    .budget_items()
                    .iter()
                    .filter(|item| {
                        item.year == year && item.month == month && item.category_id == category
                    })
                    .map(|item| item.amount)
                    .sum(),
            };
            let credit_total = ledger
                .entries()
                .iter()
                .filter(|entry| entry.is_expense() && entry.in_period(year, Some(month)))
                .filter(|entry| category.is_none_or(|c| resolve_category(ledger, entry) == c))
                .map(Entry::amount)
                .sum();
            MonthPoint {
                month,
                debit_total,
                credit_total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{BudgetDebit, BudgetItem},
        test_utils::*,
    };

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(1900, 2), 28);
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
        assert_eq!(days_in_month(2025, 0), 0);
        assert_eq!(days_in_month(2025, 13), 0);
    }

    #[test]
    fn test_daily_series_respects_month_length() {
        let leap = daily_series(&[], 2024, 2);
        assert_eq!(leap.len(), 29);
        assert_eq!(daily_series(&[], 2025, 2).len(), 28);
        assert!(leap.iter().enumerate().all(|(i, p)| p.day as usize == i + 1));
        assert!(leap.iter().all(|p| p.credit_total.is_zero()));
    }

    #[test]
    fn test_daily_series_excludes_day_notes_and_income() {
        let mut entries = june_scenario();
        entries.push(day_note("basar", date(2025, 6, 3), "paid early"));
        entries.push(expense(200, "basar", date(2025, 6, 8)));

        let series = daily_series(&entries, 2025, 6);
        assert_eq!(series.len(), 30);
        assert_eq!(series[2].credit_total, Decimal::ZERO);
        assert_eq!(series[4].credit_total, Decimal::ZERO);
        assert_eq!(series[0].credit_total, Decimal::from(12_000));
        assert_eq!(series[7].credit_total, Decimal::from(3200));
    }

    #[test]
    fn test_monthly_series_uses_declared_debit() {
        let mut ledger = ledger_with(june_scenario());
        ledger.replace_budget_debits(vec![BudgetDebit::new(2025, 6, None, Decimal::from(45_000))]);

        let series = monthly_series(&ledger, 2025, None);
        assert_eq!(series.len(), 12);
        assert_eq!(series[5].debit_total, Decimal::from(45_000));
        assert_eq!(series[5].credit_total, Decimal::from(15_000));
        assert_eq!(series[4].debit_total, Decimal::ZERO);
        assert_eq!(monthly_series(&ledger, 2025, Some("all")), series);
    }

    #[test]
    fn test_monthly_series_by_category_uses_budget_items() {
        let mut ledger = ledger_with(vec![
            typed_expense(12_000, "other", "t-rent", date(2025, 6, 1)),
            typed_expense(3000, "basar", "t-groceries", date(2025, 6, 8)),
        ]);
        ledger.replace_expense_types(vec![
            expense_type("t-rent", "Rent", "c-house"),
            expense_type("t-groceries", "Groceries", "c-food"),
        ]);
        ledger.replace_budget_items(vec![
            BudgetItem {
                id: "b1".to_string(),
                name: "Rent".to_string(),
                amount: Decimal::from(12_500),
                year: 2025,
                month: 6,
                category_id: "c-house".to_string(),
                expense_type_id: Some("t-rent".to_string()),
            },
            BudgetItem {
                id: "b2".to_string(),
                name: "Food".to_string(),
                amount: Decimal::from(8000),
                year: 2025,
                month: 6,
                category_id: "c-food".to_string(),
                expense_type_id: None,
            },
        ]);

        let house = monthly_series(&ledger, 2025, Some("c-house"));
        assert_eq!(house[5].debit_total, Decimal::from(12_500));
        assert_eq!(house[5].credit_total, Decimal::from(12_000));
        assert_eq!(house[6].debit_total, Decimal::ZERO);
    }
}
