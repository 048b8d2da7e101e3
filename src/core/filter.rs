//! Filtered entry lists for the expense screens, and day-note lookup.

use crate::{
    models::{Entry, Flow},
    store::LedgerState,
};
use chrono::{Datelike, NaiveDate};

/// `"all"` and the empty string both mean "no filter".
#[must_use]
pub fn is_unfiltered(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.is_empty() || v == "all")
}

/// Normalizes a filter value, mapping `"all"` and `""` to `None`.
#[must_use]
pub fn filter_value(value: Option<&str>) -> Option<&str> {
    if is_unfiltered(value) { None } else { value }
}

/// Category an entry is filed under: its expense type's category when the type is known,
/// otherwise the raw category on the entry.
pub(crate) fn resolve_category<'a>(ledger: &'a LedgerState, entry: &'a Entry) -> &'a str {
    entry
        .expense_type_id()
        .and_then(|type_id| ledger.expense_type(type_id))
        .map_or(entry.category.as_str(), |t| t.category_id.as_str())
}

/// Criteria for [`filtered_entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFilter {
    /// Year to show
    pub year: i32,
    /// Month to show
    pub month: u32,
    /// Restrict to one day of the month
    pub day: Option<u32>,
    /// Expense category id, `"all"`, or empty
    pub category_id: Option<String>,
    /// Expense type id, `"all"`, or empty
    pub type_id: Option<String>,
}

impl EntryFilter {
    /// Everything in `(year, month)`.
    #[must_use]
    pub const fn month(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            day: None,
            category_id: None,
            type_id: None,
        }
    }

    /// Restricts to one day.
    #[must_use]
    pub const fn on_day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    /// Restricts to one expense category.
    #[must_use]
    pub fn in_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    /// Restricts to one expense type.
    #[must_use]
    pub fn of_type(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    fn matches(&self, ledger: &LedgerState, entry: &Entry) -> bool {
        if entry.flow() != Flow::Expense || !entry.in_period(self.year, Some(self.month)) {
            return false;
        }
        if self.day.is_some_and(|day| entry.date.day() != day) {
            return false;
        }
        if let Some(category) = filter_value(self.category_id.as_deref()) {
            if resolve_category(ledger, entry) != category {
                return false;
            }
        }
        if let Some(type_id) = filter_value(self.type_id.as_deref()) {
            if entry.expense_type_id() != Some(type_id) {
                return false;
            }
        }
        true
    }
}

/// Expense-side entries matching `filter`, newest first.
///
/// Day-notes are expense-side and are included, so their text can be shown against the day.
/// Ties on date are broken by creation time, newest first.
#[must_use]
pub fn filtered_entries<'a>(ledger: &'a LedgerState, filter: &EntryFilter) -> Vec<&'a Entry> {
    let mut matching: Vec<&Entry> = ledger
        .entries()
        .iter()
        .filter(|entry| filter.matches(ledger, entry))
        .collect();
    matching.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    matching
}

/// Day-notes recorded for `date` under the raw `category`.
#[must_use]
pub fn day_notes<'a>(entries: &'a [Entry], date: NaiveDate, category: &str) -> Vec<&'a Entry> {
    entries
        .iter()
        .filter(|entry| entry.is_day_note() && entry.date == date && entry.category == category)
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn ledger() -> LedgerState {
        let mut entries = june_scenario();
        entries.push(typed_expense(800, "medicine", "t-pharmacy", date(2025, 6, 20)));
        entries.push(typed_expense(1200, "medicine", "t-pharmacy", date(2025, 6, 3)));
        entries.push(day_note("basar", date(2025, 6, 3), "paid early"));
        entries.push(expense(50, "basar", date(2025, 7, 3)));
        let mut ledger = ledger_with(entries);
        ledger.replace_expense_types(vec![expense_type("t-pharmacy", "Pharmacy", "c-health")]);
        ledger
    }

    #[test]
    fn test_all_and_empty_are_identical() {
        let ledger = ledger();
        let all = filtered_entries(&ledger, &EntryFilter::month(2025, 6).in_category("all"));
        let empty = filtered_entries(&ledger, &EntryFilter::month(2025, 6).in_category(""));
        let none = filtered_entries(&ledger, &EntryFilter::month(2025, 6));
        assert_eq!(all, empty);
        assert_eq!(all, none);
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|e| !e.is_income()));
    }

    #[test]
    fn test_sorted_newest_first() {
        let ledger = ledger();
        let entries = filtered_entries(&ledger, &EntryFilter::month(2025, 6));
        let dates: Vec<_> = entries.iter().map(|e| e.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
        assert_eq!(dates[0], date(2025, 6, 20));
    }

    #[test]
    fn test_day_note_text_is_retrievable_by_day() {
        let ledger = ledger();
        let day_three = filtered_entries(&ledger, &EntryFilter::month(2025, 6).on_day(3));
        assert_eq!(day_three.len(), 2);
        let note = day_three.iter().find(|e| e.is_day_note()).unwrap();
        assert_eq!(note.description.as_deref(), Some("paid early"));

        let notes = day_notes(ledger.entries(), date(2025, 6, 3), "basar");
        assert_eq!(notes.len(), 1);
        assert!(day_notes(ledger.entries(), date(2025, 6, 3), "study").is_empty());
    }

    #[test]
    fn test_category_resolves_through_expense_type() {
        let ledger = ledger();
        let health = filtered_entries(&ledger, &EntryFilter::month(2025, 6).in_category("c-health"));
        assert_eq!(health.len(), 2);

        let by_raw = filtered_entries(&ledger, &EntryFilter::month(2025, 6).in_category("basar"));
        assert_eq!(by_raw.len(), 2);

        let by_type = filtered_entries(
            &ledger,
            &EntryFilter::month(2025, 6).in_category("all").of_type("t-pharmacy"),
        );
        assert_eq!(by_type.len(), 2);
    }

    #[test]
    fn test_is_unfiltered() {
        assert!(is_unfiltered(None));
        assert!(is_unfiltered(Some("")));
        assert!(is_unfiltered(Some("all")));
        assert!(!is_unfiltered(Some("c-health")));
    }
}
