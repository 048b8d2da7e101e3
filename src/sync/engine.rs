//! Sync engine - attaches the Local Store to the signed-in owner's collections.
//!
//! On sign-in the store is reset and one subscription per collection is started. Every
//! subscription feeds a single channel; one apply task drains it and performs the
//! `replaceAll` transition, so the store has exactly one writer for remote data. On sign-out
//! the subscriptions stop and the store is reset, or hydrated from the bootstrap fixture when
//! one is configured.

use super::{Subscription, SyncAdapter, SyncEvent};
use crate::{
    auth::{AuthProvider, AuthUser},
    models::{
        BudgetDebit, BudgetItem, Entry, ExpenseCategory, ExpenseType, Preferences, WishCategory,
        WishItem, WishPriorityType,
    },
    store::{Fixture, Store, SyncFailure},
};
use std::sync::Arc;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

struct Attached {
    owner: String,
    subscriptions: Vec<Subscription>,
    apply: JoinHandle<()>,
}

impl Drop for Attached {
    fn drop(&mut self) {
        self.subscriptions.clear();
        self.apply.abort();
    }
}

async fn apply_events(store: Store, mut events: mpsc::UnboundedReceiver<SyncEvent>) {
    while let Some(event) = events.recv().await {
        match event {
            SyncEvent::Snapshot(snapshot) => store.apply(snapshot).await,
            SyncEvent::Failed { collection, error } => {
                error!(collection, "Subscription ended: {}", error);
                store
                    .write()
                    .await
                    .record_sync_failure(SyncFailure::new(collection, &error));
            }
        }
    }
    debug!("All subscriptions ended");
}

/// Keeps the Local Store in step with whoever is signed in.
pub struct SyncEngine<A> {
    adapter: Arc<SyncAdapter<A>>,
    store: Store,
    fixture: Option<Fixture>,
    attached: Option<Attached>,
}

impl<A: AuthProvider + 'static> SyncEngine<A> {
    /// Engine feeding `store` through `adapter`. Starts detached.
    pub const fn new(adapter: Arc<SyncAdapter<A>>, store: Store) -> Self {
        Self {
            adapter,
            store,
            fixture: None,
            attached: None,
        }
    }

    /// Hydrates from `fixture` whenever nobody is signed in.
    #[must_use]
    pub fn with_fixture(mut self, fixture: Fixture) -> Self {
        self.fixture = Some(fixture);
        self
    }

    /// The store being kept in step.
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Owner currently attached.
    pub fn owner(&self) -> Option<&str> {
        self.attached.as_ref().map(|attached| attached.owner.as_str())
    }

    /// Resets the store for `owner` and subscribes to each of its collections.
    pub async fn attach(&mut self, owner: String) {
        // Stop the previous owner's deliveries before the reset so none land afterwards.
        self.attached = None;
        self.store.reset(Some(owner.clone())).await;

        let (events, rx) = mpsc::unbounded_channel();
        let apply = tokio::spawn(apply_events(self.store.clone(), rx));
        let adapter = &self.adapter;
        let subscriptions = vec![
            adapter.subscribe_events::<Entry>(&owner, events.clone()),
            adapter.subscribe_events::<ExpenseCategory>(&owner, events.clone()),
            adapter.subscribe_events::<ExpenseType>(&owner, events.clone()),
            adapter.subscribe_events::<BudgetItem>(&owner, events.clone()),
            adapter.subscribe_events::<BudgetDebit>(&owner, events.clone()),
            adapter.subscribe_events::<WishItem>(&owner, events.clone()),
            adapter.subscribe_events::<WishCategory>(&owner, events.clone()),
            adapter.subscribe_events::<WishPriorityType>(&owner, events.clone()),
            adapter.subscribe_events::<Preferences>(&owner, events),
        ];
        info!(owner = %owner, subscriptions = subscriptions.len(), "Sync attached");
        self.attached = Some(Attached {
            owner,
            subscriptions,
            apply,
        });
    }

    /// Stops every subscription and resets the store, hydrating the fixture if there is one.
    pub async fn detach(&mut self) {
        if let Some(attached) = self.attached.take() {
            info!(owner = %attached.owner, "Sync detached");
        }
        match &self.fixture {
            Some(fixture) => {
                if let Err(e) = self.store.hydrate(fixture).await {
                    warn!("Failed to hydrate fixture, starting empty: {}", e);
                    self.store.reset(None).await;
                }
            }
            None => self.store.reset(None).await,
        }
    }

    /// Resubscribes the current owner, e.g. after a subscription failed.
    pub async fn refresh(&mut self) {
        if let Some(owner) = self.owner().map(str::to_string) {
            self.attach(owner).await;
        }
    }

    /// Reacts to an auth-state change. A change that keeps the same owner, such as a silent
    /// token refresh, leaves the subscriptions alone.
    pub async fn on_auth_change(&mut self, user: Option<&AuthUser>) {
        match user {
            Some(user) if self.owner() == Some(user.uid.as_str()) => {
                debug!(owner = %user.uid, "Owner unchanged");
            }
            Some(user) => self.attach(user.uid.clone()).await,
            None => self.detach().await,
        }
    }

    /// Follows `changes` until the auth provider goes away.
    pub async fn run(mut self, mut changes: watch::Receiver<Option<AuthUser>>) {
        loop {
            let user = changes.borrow_and_update().clone();
            self.on_auth_change(user.as_ref()).await;
            if changes.changed().await.is_err() {
                break;
            }
        }
        self.detach().await;
        info!("Sync engine stopped");
    }

    /// Runs the engine on its own task, following the adapter's auth provider.
    pub fn spawn(self) -> JoinHandle<()> {
        let changes = self.adapter.auth().watch();
        tokio::spawn(self.run(changes))
    }
}
