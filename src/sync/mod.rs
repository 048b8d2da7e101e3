//! Remote Sync Adapter - authenticated writes and live subscriptions against the remote store.
//!
//! Writes never touch the Local Store. A change becomes visible locally only when the
//! subscription for its collection delivers the next full snapshot, which [`SyncEngine`] applies
//! with `replaceAll` semantics.
//!
//! Every write first requires a signed-in user and forces a token refresh. Validation runs
//! before that, so rejected input never reaches the store. Remote failures are returned to the
//! caller unchanged; nothing here retries.

mod budgets;
/// Owner-auth-change effect driving the subscriptions
pub mod engine;
mod entries;
mod expense_categories;
mod expense_types;
mod preferences;
/// Remote document store
pub mod remote;
/// Live collection subscriptions
pub mod subscription;
mod wishlist;

pub use engine::SyncEngine;
pub use remote::{ChangeNotice, RemoteStore};
pub use subscription::Subscription;

use crate::{
    auth::{AuthProvider, AuthUser},
    document::{Document, Patch, from_body, to_body},
    errors::{Error, Result},
    store::{IntoSnapshot, Snapshot},
};
use tokio::sync::mpsc;
use tracing::debug;

/// What a subscription sends to the single apply task.
#[derive(Debug)]
pub enum SyncEvent {
    /// A full collection was delivered
    Snapshot(Snapshot),
    /// A subscription ended with an error
    Failed {
        /// Collection whose subscription failed
        collection: &'static str,
        /// The failure
        error: Error,
    },
}

/// Authenticated access to the signed-in owner's partition.
#[derive(Debug)]
pub struct SyncAdapter<A> {
    remote: RemoteStore,
    auth: A,
}

impl<A: AuthProvider> SyncAdapter<A> {
    /// Adapter writing to `remote` as whoever `auth` says is signed in.
    pub const fn new(remote: RemoteStore, auth: A) -> Self {
        Self { remote, auth }
    }

    /// The remote store.
    pub const fn remote(&self) -> &RemoteStore {
        &self.remote
    }

    /// The auth provider.
    pub const fn auth(&self) -> &A {
        &self.auth
    }

    /// Requires a signed-in user and forces a token refresh.
    ///
    /// # Returns
    /// The signed-in user, whose uid is the owner partition for the write.
    ///
    /// # Errors
    /// [`Error::NotAuthenticated`] when nobody is signed in.
    pub async fn authorize(&self) -> Result<AuthUser> {
        let user = self.auth.current_user().ok_or(Error::NotAuthenticated)?;
        self.auth.id_token(true).await?;
        Ok(user)
    }

    /// Signed-in user for reads, without a token refresh.
    fn reader(&self) -> Result<AuthUser> {
        self.auth.current_user().ok_or(Error::NotAuthenticated)
    }

    /// Stores `record` under a new store-generated id. The record's own id is ignored.
    pub(crate) async fn create<D: Document + Sync>(&self, record: &D) -> Result<String> {
        let body = to_body(record)?;
        let user = self.authorize().await?;
        self.remote
            .insert(&user.uid, &user.uid, D::COLLECTION, body)
            .await
    }

    /// Stores `record` under its own id, replacing any existing document.
    pub(crate) async fn set<D: Document + Sync>(&self, record: &D) -> Result<()> {
        let body = to_body(record)?;
        let user = self.authorize().await?;
        self.remote
            .set(&user.uid, &user.uid, D::COLLECTION, record.id(), body)
            .await
    }

    /// Merges `patch` into the document `id`. An empty patch writes nothing.
    pub(crate) async fn update<D: Document, P: Patch + Sync>(&self, id: &str, patch: &P) -> Result<()> {
        let fields = patch.to_merge_patch()?;
        let user = self.authorize().await?;
        if fields.is_empty() {
            debug!(collection = D::COLLECTION, id, "Empty patch, nothing to write");
            return Ok(());
        }
        self.remote
            .merge(&user.uid, &user.uid, D::COLLECTION, id, &fields)
            .await
    }

    /// Deletes the document `id`. Deleting a missing document succeeds.
    pub(crate) async fn delete<D: Document>(&self, id: &str) -> Result<()> {
        let user = self.authorize().await?;
        self.remote
            .delete(&user.uid, &user.uid, D::COLLECTION, id)
            .await
    }

    /// Reads the signed-in owner's whole `D` collection once.
    pub async fn list<D: Document>(&self) -> Result<Vec<D>> {
        let user = self.reader()?;
        self.remote
            .list(&user.uid, &user.uid, D::COLLECTION)
            .await?
            .into_iter()
            .map(|(id, body)| from_body(id, body))
            .collect()
    }

    /// Reads one document from the signed-in owner's `D` collection.
    pub async fn get<D: Document>(&self, id: &str) -> Result<Option<D>> {
        let user = self.reader()?;
        self.remote
            .get(&user.uid, &user.uid, D::COLLECTION, id)
            .await?
            .map(|body| from_body(id, body))
            .transpose()
    }

    /// Subscribes to `owner`'s `D` collection as the signed-in user.
    ///
    /// # Arguments
    /// * `owner` - Partition to read; must be the signed-in user's
    /// * `on_data` - Receives the full collection on start and after every change
    /// * `on_error` - Runs once if the subscription fails; delivery stops after it
    pub fn subscribe<D, F, E>(&self, owner: &str, on_data: F, on_error: E) -> Subscription
    where
        D: Document + Send + 'static,
        F: FnMut(Vec<D>) + Send + 'static,
        E: FnOnce(Error) + Send + 'static,
    {
        let principal = self.auth.current_user().map(|user| user.uid);
        subscription::spawn(
            self.remote.clone(),
            principal,
            owner.to_string(),
            on_data,
            on_error,
        )
    }

    /// Subscribes to `owner`'s `D` collection, sending snapshots and the terminal failure to
    /// `events`.
    pub fn subscribe_events<D>(&self, owner: &str, events: mpsc::UnboundedSender<SyncEvent>) -> Subscription
    where
        D: IntoSnapshot + Send + 'static,
    {
        let failures = events.clone();
        self.subscribe::<D, _, _>(
            owner,
            move |records| {
                // The apply task is gone once the engine detaches.
                let _ = events.send(SyncEvent::Snapshot(D::into_snapshot(records)));
            },
            move |error| {
                let _ = failures.send(SyncEvent::Failed {
                    collection: D::COLLECTION,
                    error,
                });
            },
        )
    }
}
