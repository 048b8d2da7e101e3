//! Period rollups: income, expense, and balance for a month or a whole year.

use crate::models::Entry;
use rust_decimal::Decimal;

/// Totals for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodSummary {
    /// Requested year
    pub year: i32,
    /// Requested month, or `None` for a yearly summary
    pub month: Option<u32>,
    /// Sum of income transactions
    pub total_income: Decimal,
    /// Sum of expense transactions
    pub total_expense: Decimal,
    /// `total_income - total_expense`
    pub balance: Decimal,
    /// Number of entries in the period, day-notes included
    pub transaction_count: usize,
}

impl PeriodSummary {
    /// A zero-valued summary labelled with the requested period.
    #[must_use]
    pub const fn empty(year: i32, month: Option<u32>) -> Self {
        Self {
            year,
            month,
            total_income: Decimal::ZERO,
            total_expense: Decimal::ZERO,
            balance: Decimal::ZERO,
            transaction_count: 0,
        }
    }
}

/// Summarizes the entries that fall in `year` (and `month`, when given).
///
/// Day-notes count towards `transaction_count` but move no money. A period with no entries
/// yields [`PeriodSummary::empty`].
///
/// # Arguments
/// * `entries` - Entries to summarize; anything outside the period is ignored
/// * `year` - Year of the period
/// * `month` - Month of the period, or `None` for the whole year
#[must_use]
pub fn period_summary(entries: &[Entry], year: i32, month: Option<u32>) -> PeriodSummary {
    entries
        .iter()
        .filter(|entry| entry.in_period(year, month))
        .fold(PeriodSummary::empty(year, month), |mut summary, entry| {
            if entry.is_income() {
                summary.total_income += entry.amount();
            } else if entry.is_expense() {
                summary.total_expense += entry.amount();
            }
            summary.balance = summary.total_income - summary.total_expense;
            summary.transaction_count += 1;
            summary
        })
}

/// Twelve monthly summaries for `year`, January first.
#[must_use]
pub fn monthly_summaries(entries: &[Entry], year: i32) -> Vec<PeriodSummary> {
    (1..=12)
        .map(|month| period_summary(entries, year, Some(month)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_june_scenario() {
        let entries = june_scenario();
        let summary = period_summary(&entries, 2025, Some(6));

        assert_eq!(summary.total_income, Decimal::from(45_000));
        assert_eq!(summary.total_expense, Decimal::from(15_000));
        assert_eq!(summary.balance, Decimal::from(30_000));
        assert_eq!(summary.transaction_count, 3);
    }

    #[test]
    fn test_empty_period_is_zero_valued() {
        let entries = june_scenario();
        let summary = period_summary(&entries, 2025, Some(7));
        assert_eq!(summary, PeriodSummary::empty(2025, Some(7)));

        let nothing = period_summary(&[], 2024, None);
        assert_eq!(nothing.balance, Decimal::ZERO);
        assert_eq!(nothing.year, 2024);
    }

    #[test]
    fn test_day_note_counted_but_moves_no_money() {
        let mut entries = june_scenario();
        entries.push(day_note("basar", date(2025, 6, 3), "paid early"));
        let summary = period_summary(&entries, 2025, Some(6));

        assert_eq!(summary.transaction_count, 4);
        assert_eq!(summary.total_expense, Decimal::from(15_000));
    }

    #[test]
    fn test_balance_is_exact() {
        let entries = vec![
            income_with("0.10", date(2025, 1, 1)),
            income_with("0.20", date(2025, 1, 2)),
            expense_with("0.30", "other", date(2025, 1, 3)),
        ];
        let summary = period_summary(&entries, 2025, None);
        assert_eq!(summary.balance, Decimal::ZERO);
        assert_eq!(summary.total_income - summary.total_expense, summary.balance);
    }

    #[test]
    fn test_yearly_and_monthly_summaries() {
        let mut entries = june_scenario();
        entries.push(expense(500, "study", date(2025, 2, 11)));
        entries.push(expense(999, "study", date(2024, 2, 11)));

        let year = period_summary(&entries, 2025, None);
        assert_eq!(year.total_expense, Decimal::from(15_500));
        assert_eq!(year.month, None);

        let months = monthly_summaries(&entries, 2025);
        assert_eq!(months.len(), 12);
        assert_eq!(months[1].total_expense, Decimal::from(500));
        assert_eq!(months[5].balance, Decimal::from(30_000));
        assert_eq!(months[0], PeriodSummary::empty(2025, Some(1)));
    }
}
