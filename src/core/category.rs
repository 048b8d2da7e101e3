//! Main-category breakdowns for dashboard cards and charts.
//!
//! Grouping always goes through [`MainCategory::classify`], so an entry whose raw category is
//! not a known main category lands under [`MainCategory::Other`] here exactly as it does in
//! filters and series.

use crate::models::{Entry, MainCategory};
use rust_decimal::Decimal;

/// Spending in one main category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    /// Main category
    pub category: MainCategory,
    /// Sum of expense transactions over all given entries
    pub total: Decimal,
    /// Number of expense transactions
    pub count: usize,
    /// Sum restricted to one month, for the monthly variant
    pub monthly_total: Option<Decimal>,
}

impl CategoryTotal {
    const fn zero(category: MainCategory, monthly: bool) -> Self {
        Self {
            category,
            total: Decimal::ZERO,
            count: 0,
            monthly_total: if monthly { Some(Decimal::ZERO) } else { None },
        }
    }
}

/// Per-category totals, one row per requested main category in the order requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryBreakdown {
    /// Rows in request order
    pub rows: Vec<CategoryTotal>,
}

impl CategoryBreakdown {
    /// Row for `category`, if it was requested.
    #[must_use]
    pub fn get(&self, category: MainCategory) -> Option<&CategoryTotal> {
        self.rows.iter().find(|row| row.category == category)
    }

    /// Total for `category`; zero when it was not requested.
    #[must_use]
    pub fn total(&self, category: MainCategory) -> Decimal {
        self.get(category).map_or(Decimal::ZERO, |row| row.total)
    }

    /// Sum over every row.
    #[must_use]
    pub fn grand_total(&self) -> Decimal {
        self.rows.iter().map(|row| row.total).sum()
    }
}

/// Expense totals per main category. Income and day-notes are not counted.
///
/// # Arguments
/// * `entries` - Entries to group, typically already narrowed to a period
/// * `categories` - Main categories to report; entries classified outside this set are dropped
#[must_use]
pub fn category_breakdown(entries: &[Entry], categories: &[MainCategory]) -> CategoryBreakdown {
    breakdown(entries, categories, None)
}

/// Like [`category_breakdown`], with each row also carrying its total for `(year, month)`.
#[must_use]
pub fn monthly_category_breakdown(
    entries: &[Entry],
    categories: &[MainCategory],
    year: i32,
    month: u32,
) -> CategoryBreakdown {
    breakdown(entries, categories, Some((year, month)))
}

fn breakdown(
    entries: &[Entry],
    categories: &[MainCategory],
    period: Option<(i32, u32)>,
) -> CategoryBreakdown {
    let mut rows: Vec<CategoryTotal> = categories
        .iter()
        .map(|&category| CategoryTotal::zero(category, period.is_some()))
        .collect();

    for entry in entries.iter().filter(|entry| entry.is_expense()) {
        let Some(row) = rows
            .iter_mut()
            .find(|row| row.category == entry.main_category())
        else {
            continue;
        };
        row.total += entry.amount();
        row.count += 1;
        if let (Some((year, month)), Some(monthly)) = (period, row.monthly_total.as_mut()) {
            if entry.in_period(year, Some(month)) {
                *monthly += entry.amount();
            }
        }
    }

    CategoryBreakdown { rows }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{core::summary::period_summary, test_utils::*};

    #[test]
    fn test_june_scenario_breakdown() {
        let breakdown = category_breakdown(&june_scenario(), &MainCategory::ALL);

        assert_eq!(breakdown.total(MainCategory::Basar), Decimal::from(3000));
        assert_eq!(breakdown.total(MainCategory::Other), Decimal::from(12_000));
        assert_eq!(breakdown.total(MainCategory::Bebosar), Decimal::ZERO);
        assert_eq!(breakdown.total(MainCategory::Study), Decimal::ZERO);
        assert_eq!(breakdown.total(MainCategory::Medicine), Decimal::ZERO);
        assert_eq!(breakdown.rows.len(), 5);
    }

    #[test]
    fn test_unknown_category_buckets_under_other() {
        let entries = vec![
            expense(700, "groceries", date(2025, 6, 2)),
            expense(300, "", date(2025, 6, 2)),
        ];
        let breakdown = category_breakdown(&entries, &MainCategory::ALL);
        let other = breakdown.get(MainCategory::Other).unwrap();
        assert_eq!(other.total, Decimal::from(1000));
        assert_eq!(other.count, 2);
    }

    #[test]
    fn test_breakdown_partitions_expense_total() {
        let mut entries = june_scenario();
        entries.push(expense(250, "medicine", date(2025, 6, 9)));
        entries.push(expense(90, "bogus", date(2025, 6, 9)));
        entries.push(day_note("study", date(2025, 6, 9), "exam week"));

        let breakdown = category_breakdown(&entries, &MainCategory::ALL);
        let summary = period_summary(&entries, 2025, Some(6));
        assert_eq!(breakdown.grand_total(), summary.total_expense);
        assert_eq!(breakdown.total(MainCategory::Study), Decimal::ZERO);
    }

    #[test]
    fn test_monthly_variant_restricts_monthly_total() {
        let mut entries = june_scenario();
        entries.push(expense(1000, "basar", date(2025, 5, 20)));

        let breakdown =
            monthly_category_breakdown(&entries, &[MainCategory::Basar], 2025, 6);
        let basar = &breakdown.rows[0];
        assert_eq!(basar.total, Decimal::from(4000));
        assert_eq!(basar.monthly_total, Some(Decimal::from(3000)));
        assert_eq!(basar.count, 2);
    }

    #[test]
    fn test_empty_entries_give_zero_rows() {
        let breakdown = monthly_category_breakdown(&[], &MainCategory::ALL, 2025, 1);
        assert!(breakdown
            .rows
            .iter()
            .all(|row| row.total.is_zero() && row.monthly_total == Some(Decimal::ZERO)));
    }
}
