//! Shared test utilities for `hisab`.
//!
//! This module provides an in-memory remote store, a signed-in sync adapter, and builders for
//! domain records with sensible defaults.

use crate::{
    auth::LocalAuth,
    errors::Result,
    models::{
        Entry, ExpenseType, Flow, NewEntry, WishCategory, WishItem, WishPriorityType,
    },
    store::{AppState, LedgerState, Snapshot, Store},
    sync::{RemoteStore, SyncAdapter, SyncEvent},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::{str::FromStr, sync::Once, time::Duration};
use tokio::sync::mpsc;
use uuid::Uuid;

static TRACING: Once = Once::new();

/// Routes `tracing` output through the test harness at `trace` level.
pub fn init_test_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("hisab=trace")
            .with_test_writer()
            .try_init();
    });
}

/// Creates an in-memory `SQLite` remote store with all tables initialized.
/// This is the standard setup for all sync tests.
pub async fn setup_test_store() -> Result<RemoteStore> {
    init_test_tracing();
    RemoteStore::connect("sqlite::memory:").await
}

/// A sync adapter over a fresh in-memory store with `uid` signed in.
pub async fn signed_in_adapter(uid: &str) -> Result<SyncAdapter<LocalAuth>> {
    let remote = setup_test_store().await?;
    let auth = LocalAuth::new();
    auth.sign_in(uid, Some(format!("{uid}@example.com")));
    Ok(SyncAdapter::new(remote, auth))
}

/// Next snapshot on a subscription channel. Panics on a failure event or after two seconds.
pub async fn next_snapshot(events: &mut mpsc::UnboundedReceiver<SyncEvent>) -> Snapshot {
    match tokio::time::timeout(Duration::from_secs(2), events.recv()).await {
        Ok(Some(SyncEvent::Snapshot(snapshot))) => snapshot,
        Ok(Some(SyncEvent::Failed { collection, error })) => {
            panic!("subscription to {collection} failed: {error}")
        }
        Ok(None) => panic!("subscription channel closed"),
        Err(_) => panic!("no snapshot within two seconds"),
    }
}

/// Waits until `condition` holds for the store. Panics after two seconds.
pub async fn wait_for(store: &Store, condition: impl Fn(&AppState) -> bool) {
    for _ in 0..200 {
        if condition(&*store.read().await) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("store never reached the expected state");
}

/// Shorthand for a calendar date. Panics on an invalid date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

fn stored(entry: NewEntry) -> Entry {
    entry.into_entry(Uuid::new_v4().to_string(), Utc::now())
}

fn decimal(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| panic!("invalid test amount {value}: {e}"))
}

/// An income entry with category `"salary"`.
pub fn income(amount: i64, on: NaiveDate) -> Entry {
    stored(NewEntry::transaction(Flow::Income, Decimal::from(amount), "salary", on))
}

/// An income entry with a decimal amount such as `"0.10"`.
pub fn income_with(amount: &str, on: NaiveDate) -> Entry {
    stored(NewEntry::transaction(Flow::Income, decimal(amount), "salary", on))
}

/// An untyped expense entry.
pub fn expense(amount: i64, category: &str, on: NaiveDate) -> Entry {
    stored(NewEntry::transaction(Flow::Expense, Decimal::from(amount), category, on))
}

/// An untyped expense entry with a decimal amount.
pub fn expense_with(amount: &str, category: &str, on: NaiveDate) -> Entry {
    stored(NewEntry::transaction(Flow::Expense, decimal(amount), category, on))
}

/// An expense entry linked to an expense type.
pub fn typed_expense(amount: i64, category: &str, type_id: &str, on: NaiveDate) -> Entry {
    stored(
        NewEntry::transaction(Flow::Expense, Decimal::from(amount), category, on)
            .with_expense_type(type_id),
    )
}

/// A day-note.
pub fn day_note(category: &str, on: NaiveDate, text: &str) -> Entry {
    stored(NewEntry::day_note(category, on, text))
}

/// The June 2025 scenario: 45000 income, 12000 "other" and 3000 "basar" expenses.
pub fn june_scenario() -> Vec<Entry> {
    vec![
        income(45_000, date(2025, 6, 5)),
        expense(12_000, "other", date(2025, 6, 1)),
        expense(3000, "basar", date(2025, 6, 8)),
    ]
}

/// A ledger holding `entries` and nothing else.
pub fn ledger_with(entries: Vec<Entry>) -> LedgerState {
    let mut ledger = LedgerState::default();
    ledger.replace_entries(entries);
    ledger
}

/// An expense type without a main category or group.
pub fn expense_type(id: &str, name: &str, category_id: &str) -> ExpenseType {
    ExpenseType {
        id: id.to_string(),
        name: name.to_string(),
        category_id: category_id.to_string(),
        main_category_id: None,
        group: None,
    }
}

/// A wishlist priority type.
pub fn priority_type(id: &str, name: &str, order: u32) -> WishPriorityType {
    WishPriorityType {
        id: id.to_string(),
        name: name.to_string(),
        order,
    }
}

/// A wishlist category.
pub fn wish_category(id: &str, name: &str) -> WishCategory {
    WishCategory {
        id: id.to_string(),
        name: name.to_string(),
    }
}

/// A wishlist item.
///
/// # Defaults
/// * `icon_type`: "gift"
pub fn wish_item(
    id: &str,
    name: &str,
    amount: i64,
    priority_id: &str,
    category_id: Option<&str>,
    done: bool,
) -> WishItem {
    WishItem {
        id: id.to_string(),
        name: name.to_string(),
        approximate_amount: Decimal::from(amount),
        priority_id: priority_id.to_string(),
        icon_type: "gift".to_string(),
        category_id: category_id.map(str::to_string),
        done,
    }
}
