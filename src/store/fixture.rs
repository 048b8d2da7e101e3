//! Bootstrap fixture - a static JSON dataset used to hydrate the Local Store when nobody is
//! signed in.
//!
//! The fixture mirrors the combined store:
//!
//! ```json
//! {
//!   "expenses": {
//!     "items": [], "expenseCategories": [], "expenseTypes": [], "budgetItems": [],
//!     "budgetDebitByMonth": { "2025-06": 45000 }
//!   },
//!   "wishlist": { "items": [], "categories": [], "priorities": [] }
//! }
//! ```
//!
//! Each record is a document body plus an `"id"` key. Records without an id get a fresh one.

use super::{AppState, LedgerState, WishlistState, ledger::new_id};
use crate::{
    document::{Document, from_body},
    errors::{Error, Result},
    models::BudgetDebit,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fs, path::Path};
use tracing::{info, warn};

type RawRecord = Map<String, Value>;

/// Ledger half of the fixture.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpensesFixture {
    /// Entry documents
    pub items: Vec<RawRecord>,
    /// Expense category documents
    pub expense_categories: Vec<RawRecord>,
    /// Expense type documents
    pub expense_types: Vec<RawRecord>,
    /// Budget item documents
    pub budget_items: Vec<RawRecord>,
    /// Declared income keyed by `year-month[-categoryId]`
    pub budget_debit_by_month: BTreeMap<String, Decimal>,
}

/// Wishlist half of the fixture.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WishlistFixture {
    /// Wishlist item documents
    pub items: Vec<RawRecord>,
    /// Wishlist category documents
    pub categories: Vec<RawRecord>,
    /// Priority type documents
    pub priorities: Vec<RawRecord>,
}

/// A parsed bootstrap fixture.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    /// Ledger collections
    pub expenses: ExpensesFixture,
    /// Wishlist collections
    pub wishlist: WishlistFixture,
}

impl Fixture {
    /// Parses a fixture document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a fixture file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("Failed to read fixture {}: {}", path.display(), e),
        })?;
        let fixture = Self::from_json(&contents)?;
        info!(path = %path.display(), "Loaded bootstrap fixture");
        Ok(fixture)
    }

    /// The demo dataset bundled with the crate.
    pub fn demo() -> Result<Self> {
        Self::from_json(include_str!("../../fixtures/demo.json"))
    }

    /// Ledger state described by the fixture.
    pub fn to_ledger(&self) -> Result<LedgerState> {
        let mut ledger = LedgerState::default();
        ledger.replace_entries(records(&self.expenses.items)?);
        ledger.replace_expense_categories(records(&self.expenses.expense_categories)?);
        ledger.replace_expense_types(records(&self.expenses.expense_types)?);
        ledger.replace_budget_items(records(&self.expenses.budget_items)?);

        let mut debits = Vec::with_capacity(self.expenses.budget_debit_by_month.len());
        for (key, amount) in &self.expenses.budget_debit_by_month {
            match BudgetDebit::from_key(key, *amount) {
                Some(debit) => debits.push(debit),
                None => warn!(key = %key, "Skipping budget debit with an unreadable key"),
            }
        }
        ledger.replace_budget_debits(debits);
        Ok(ledger)
    }

    /// Wishlist state described by the fixture.
    pub fn to_wishlist(&self) -> Result<WishlistState> {
        let mut wishlist = WishlistState::default();
        wishlist.replace_items(records(&self.wishlist.items)?);
        wishlist.replace_categories(records(&self.wishlist.categories)?);
        wishlist.replace_priorities(records(&self.wishlist.priorities)?);
        Ok(wishlist)
    }

    /// Full Local Store state with no owner.
    pub fn to_state(&self) -> Result<AppState> {
        let mut state = AppState::default();
        *state.ledger_mut() = self.to_ledger()?;
        *state.wishlist_mut() = self.to_wishlist()?;
        Ok(state)
    }
}

fn records<D: Document>(raw: &[RawRecord]) -> Result<Vec<D>> {
    raw.iter()
        .map(|record| {
            let mut body = record.clone();
            let id = match body.remove("id") {
                Some(Value::String(id)) if !id.is_empty() => id,
                Some(Value::Number(n)) => n.to_string(),
                _ => new_id(),
            };
            from_body(id, Value::Object(body))
        })
        .collect()
}
