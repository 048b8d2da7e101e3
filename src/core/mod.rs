//! Aggregation engine - pure functions from a Local Store snapshot to derived views.
//!
//! Nothing here mutates its input or fails. Empty input degrades to zero-valued output, and
//! amounts are summed as [`rust_decimal::Decimal`] so balances never drift.

pub mod budget;
pub mod category;
pub mod filter;
pub mod series;
pub mod summary;
pub mod wishlist;

pub use budget::{
    BudgetLine, DebitSource, MonthlyBudget, budget_due, budget_lines, monthly_budget,
    spent_by_type, spent_for_item, spent_for_type,
};
pub use category::{CategoryBreakdown, CategoryTotal, category_breakdown, monthly_category_breakdown};
pub use filter::{EntryFilter, day_notes, filtered_entries, is_unfiltered};
pub use series::{DayPoint, MonthPoint, daily_series, days_in_month, monthly_series};
pub use summary::{PeriodSummary, monthly_summaries, period_summary};
pub use wishlist::{WishGroup, WishlistTotals, group_by_category, items_by_priority, wishlist_totals};
