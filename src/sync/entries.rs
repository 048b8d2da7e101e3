//! Ledger entry collection.

use super::{SyncAdapter, Subscription};
use crate::{
    auth::AuthProvider,
    errors::{Error, Result},
    models::{Entry, EntryPatch, NewEntry},
    validation,
};
use chrono::Utc;
use tracing::info;

impl<A: AuthProvider> SyncAdapter<A> {
    /// Creates an entry and returns its store-generated id.
    pub async fn create_entry(&self, entry: NewEntry) -> Result<String> {
        validation::new_entry(&entry)?;
        let id = self.create(&entry.into_entry(String::new(), Utc::now())).await?;
        info!(id = %id, "Created entry");
        Ok(id)
    }

    /// Merges `patch` into an entry. Changing the date re-stamps month and year.
    ///
    /// The patch is checked against the stored entry first, so a transaction never turns into
    /// a day-note or back.
    pub async fn update_entry(&self, id: &str, patch: &EntryPatch) -> Result<()> {
        validation::entry_patch(patch)?;
        if let Some(current) = self.get::<Entry>(id).await? {
            validation::entry_update(&current, patch)?;
        }
        self.update::<Entry, _>(id, patch).await
    }

    /// Deletes an entry.
    pub async fn delete_entry(&self, id: &str) -> Result<()> {
        self.delete::<Entry>(id).await
    }

    /// Subscribes to `owner`'s entries.
    pub fn subscribe_entries(
        &self,
        owner: &str,
        on_data: impl FnMut(Vec<Entry>) + Send + 'static,
        on_error: impl FnOnce(Error) + Send + 'static,
    ) -> Subscription {
        self.subscribe(owner, on_data, on_error)
    }
}
