//! Local Store - the in-process mirror of the signed-in owner's collections.
//!
//! [`Store`] is an explicit context object: create one at startup, clone it into whatever needs
//! it, and reset it wholesale when the owner changes. State changes only through the named
//! transitions on [`LedgerState`] and [`WishlistState`], or through [`AppState::apply_snapshot`]
//! when a subscription delivers a full collection. The store never aggregates; callers run the
//! functions in [`crate::core`] against a read guard.

mod collection;
pub mod fixture;
mod ledger;
mod wishlist;

pub use collection::Collection;
pub use fixture::Fixture;
pub use ledger::LedgerState;
pub use wishlist::WishlistState;

use crate::{
    document::Document,
    errors::{Error, RemoteErrorKind},
    models::{
        BudgetDebit, BudgetItem, Entry, ExpenseCategory, ExpenseType, Preferences, WishCategory,
        WishItem, WishPriorityType,
    },
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

/// A full collection as delivered by a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Snapshot {
    /// Ledger entries
    Entries(Vec<Entry>),
    /// Expense categories
    ExpenseCategories(Vec<ExpenseCategory>),
    /// Expense types
    ExpenseTypes(Vec<ExpenseType>),
    /// Budget items
    BudgetItems(Vec<BudgetItem>),
    /// Declared debits
    BudgetDebits(Vec<BudgetDebit>),
    /// Wishlist items
    WishItems(Vec<WishItem>),
    /// Wishlist categories
    WishCategories(Vec<WishCategory>),
    /// Wishlist priority types
    WishPriorities(Vec<WishPriorityType>),
    /// The owner's preferences document, if one exists
    Preferences(Option<Preferences>),
}

impl Snapshot {
    /// Collection the snapshot belongs to.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        match self {
            Self::Entries(_) => Entry::COLLECTION,
            Self::ExpenseCategories(_) => ExpenseCategory::COLLECTION,
            Self::ExpenseTypes(_) => ExpenseType::COLLECTION,
            Self::BudgetItems(_) => BudgetItem::COLLECTION,
            Self::BudgetDebits(_) => BudgetDebit::COLLECTION,
            Self::WishItems(_) => WishItem::COLLECTION,
            Self::WishCategories(_) => WishCategory::COLLECTION,
            Self::WishPriorities(_) => WishPriorityType::COLLECTION,
            Self::Preferences(_) => Preferences::COLLECTION,
        }
    }

    /// Number of records carried.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Entries(r) => r.len(),
            Self::ExpenseCategories(r) => r.len(),
            Self::ExpenseTypes(r) => r.len(),
            Self::BudgetItems(r) => r.len(),
            Self::BudgetDebits(r) => r.len(),
            Self::WishItems(r) => r.len(),
            Self::WishCategories(r) => r.len(),
            Self::WishPriorities(r) => r.len(),
            Self::Preferences(r) => usize::from(r.is_some()),
        }
    }

    /// True when the snapshot carries no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A document type whose full collection can be wrapped as a [`Snapshot`].
pub trait IntoSnapshot: Document {
    /// Wraps the full collection.
    fn into_snapshot(records: Vec<Self>) -> Snapshot;
}

macro_rules! into_snapshot {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoSnapshot for $ty {
                fn into_snapshot(records: Vec<Self>) -> Snapshot {
                    Snapshot::$variant(records)
                }
            }
        )*
    };
}

into_snapshot! {
    Entry => Entries,
    ExpenseCategory => ExpenseCategories,
    ExpenseType => ExpenseTypes,
    BudgetItem => BudgetItems,
    BudgetDebit => BudgetDebits,
    WishItem => WishItems,
    WishCategory => WishCategories,
    WishPriorityType => WishPriorities,
}

impl IntoSnapshot for Preferences {
    fn into_snapshot(records: Vec<Self>) -> Snapshot {
        Snapshot::Preferences(records.into_iter().next())
    }
}

/// A subscription that ended with an error. Subscriptions do not reconnect by themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    /// Collection whose subscription failed
    pub collection: &'static str,
    /// Remote failure class, when the error came from the remote store
    pub kind: Option<RemoteErrorKind>,
    /// User-facing message
    pub message: String,
    /// When the failure was recorded
    pub at: DateTime<Utc>,
}

impl SyncFailure {
    /// Records `error` against `collection`.
    #[must_use]
    pub fn new(collection: &'static str, error: &Error) -> Self {
        Self {
            collection,
            kind: error.remote_kind(),
            message: error.user_message(),
            at: Utc::now(),
        }
    }
}

/// Everything the Local Store holds for the current owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    owner: Option<String>,
    ledger: LedgerState,
    wishlist: WishlistState,
    preferences: Option<Preferences>,
    sync_failures: Vec<SyncFailure>,
}

impl AppState {
    /// Empty state for `owner` (`None` when nobody is signed in).
    #[must_use]
    pub fn for_owner(owner: Option<String>) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    /// Signed-in owner whose data this is.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Ledger slice.
    #[must_use]
    pub const fn ledger(&self) -> &LedgerState {
        &self.ledger
    }

    /// Ledger slice, for transitions.
    pub const fn ledger_mut(&mut self) -> &mut LedgerState {
        &mut self.ledger
    }

    /// Wishlist slice.
    #[must_use]
    pub const fn wishlist(&self) -> &WishlistState {
        &self.wishlist
    }

    /// Wishlist slice, for transitions.
    pub const fn wishlist_mut(&mut self) -> &mut WishlistState {
        &mut self.wishlist
    }

    /// Owner preferences, once delivered.
    #[must_use]
    pub const fn preferences(&self) -> Option<&Preferences> {
        self.preferences.as_ref()
    }

    /// Replaces the preferences locally.
    pub fn set_preferences(&mut self, preferences: Option<Preferences>) {
        self.preferences = preferences;
    }

    /// Subscription failures recorded since the owner was attached.
    #[must_use]
    pub fn sync_failures(&self) -> &[SyncFailure] {
        &self.sync_failures
    }

    /// Records a terminal subscription failure.
    pub fn record_sync_failure(&mut self, failure: SyncFailure) {
        self.sync_failures.push(failure);
    }

    /// Replaces one collection with a freshly delivered snapshot.
    ///
    /// Applying the same snapshot twice leaves the state unchanged.
    pub fn apply_snapshot(&mut self, snapshot: Snapshot) {
        debug!(
            collection = snapshot.collection(),
            records = snapshot.len(),
            "Applying snapshot"
        );
        match snapshot {
            Snapshot::Entries(r) => self.ledger.replace_entries(r),
            Snapshot::ExpenseCategories(r) => self.ledger.replace_expense_categories(r),
            Snapshot::ExpenseTypes(r) => self.ledger.replace_expense_types(r),
            Snapshot::BudgetItems(r) => self.ledger.replace_budget_items(r),
            Snapshot::BudgetDebits(r) => self.ledger.replace_budget_debits(r),
            Snapshot::WishItems(r) => self.wishlist.replace_items(r),
            Snapshot::WishCategories(r) => self.wishlist.replace_categories(r),
            Snapshot::WishPriorities(r) => self.wishlist.replace_priorities(r),
            Snapshot::Preferences(p) => self.preferences = p,
        }
    }
}

/// Shared handle to the Local Store.
#[derive(Debug, Clone, Default)]
pub struct Store {
    state: Arc<RwLock<AppState>>,
}

impl Store {
    /// Creates an empty store with no owner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for aggregation.
    pub async fn read(&self) -> RwLockReadGuard<'_, AppState> {
        self.state.read().await
    }

    /// Write access for transitions.
    pub async fn write(&self) -> RwLockWriteGuard<'_, AppState> {
        self.state.write().await
    }

    /// A copy of the current state.
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// Swaps in an empty state for a new owner.
    pub async fn reset(&self, owner: Option<String>) {
        let mut state = self.state.write().await;
        info!(owner = owner.as_deref().unwrap_or("<none>"), "Resetting local store");
        *state = AppState::for_owner(owner);
    }

    /// Replaces the whole state with the contents of a bootstrap fixture. Leaves no owner.
    pub async fn hydrate(&self, fixture: &Fixture) -> crate::errors::Result<()> {
        let hydrated = fixture.to_state()?;
        let mut state = self.state.write().await;
        *state = hydrated;
        info!(
            entries = state.ledger.entries().len(),
            wishes = state.wishlist.items().len(),
            "Local store hydrated from fixture"
        );
        Ok(())
    }

    /// Applies a delivered snapshot.
    pub async fn apply(&self, snapshot: Snapshot) {
        self.state.write().await.apply_snapshot(snapshot);
    }
}
