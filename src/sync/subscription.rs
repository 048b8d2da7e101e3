//! Live collection subscriptions.
//!
//! A subscription delivers the full collection once on start and again after every change
//! notice for its collection. A failed read is terminal: `on_error` runs once and the task
//! ends. Resubscribing is the caller's job. Malformed documents are logged and left out of
//! the delivery.

use super::remote::RemoteStore;
use crate::{
    document::{Document, from_body},
    errors::{Error, Result},
};
use tokio::{sync::broadcast::error::RecvError, task::JoinHandle};
use tracing::{debug, warn};

/// A running subscription. Dropping it stops delivery.
#[derive(Debug)]
pub struct Subscription {
    collection: &'static str,
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Collection being delivered.
    #[must_use]
    pub const fn collection(&self) -> &'static str {
        self.collection
    }

    /// Whether the subscription has ended, after an error or an unsubscribe.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stops delivery.
    pub fn unsubscribe(self) {
        debug!(collection = self.collection, "Unsubscribed");
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Reads the whole collection. Documents that no longer parse are skipped, so one bad record
/// does not end delivery of the rest.
async fn load<D: Document>(remote: &RemoteStore, principal: Option<&str>, owner: &str) -> Result<Vec<D>> {
    let principal = principal.ok_or(Error::NotAuthenticated)?;
    let documents = remote.list(principal, owner, D::COLLECTION).await?;
    let mut records = Vec::with_capacity(documents.len());
    for (id, body) in documents {
        match from_body(id.as_str(), body) {
            Ok(record) => records.push(record),
            Err(e) => warn!(collection = D::COLLECTION, id = %id, "Skipping malformed document: {}", e),
        }
    }
    Ok(records)
}

/// Starts delivering `owner`'s `D` collection, reading as `principal`.
pub(crate) fn spawn<D, F, E>(
    remote: RemoteStore,
    principal: Option<String>,
    owner: String,
    mut on_data: F,
    on_error: E,
) -> Subscription
where
    D: Document + Send + 'static,
    F: FnMut(Vec<D>) + Send + 'static,
    E: FnOnce(Error) + Send + 'static,
{
    // Taken before the first read so no change between the read and the wait is missed.
    let mut changes = remote.changes();
    let handle = tokio::spawn(async move {
        debug!(collection = D::COLLECTION, owner = %owner, "Subscription started");
        loop {
            match load::<D>(&remote, principal.as_deref(), &owner).await {
                Ok(records) => on_data(records),
                Err(e) => {
                    warn!(collection = D::COLLECTION, "Subscription failed: {}", e);
                    on_error(e);
                    return;
                }
            }
            loop {
                match changes.recv().await {
                    Ok(notice) if notice.concerns(&owner, D::COLLECTION) => break,
                    Ok(_) => {}
                    Err(RecvError::Lagged(skipped)) => {
                        debug!(collection = D::COLLECTION, skipped, "Change notices lagged, re-reading");
                        break;
                    }
                    Err(RecvError::Closed) => {
                        debug!(collection = D::COLLECTION, "Change channel closed");
                        return;
                    }
                }
            }
        }
    });
    Subscription {
        collection: D::COLLECTION,
        handle,
    }
}
