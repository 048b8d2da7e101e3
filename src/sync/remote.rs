//! Remote document store.
//!
//! Every owner partition lives in the single `documents` table. Each committed write publishes a
//! [`ChangeNotice`] on a broadcast channel; subscriptions listen for notices about their
//! collection and re-read the full collection when one arrives.
//!
//! Access rule: a principal may only read or write its own partition. Anything else fails with
//! [`RemoteErrorKind::PermissionDenied`](crate::errors::RemoteErrorKind::PermissionDenied).

use crate::{
    config::database::{create_connection, create_tables},
    document::merge_patch,
    entities::{DocumentColumn, DocumentModel, StoredDocument, document},
    errors::{RemoteError, Result},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, sea_query::OnConflict,
};
use serde_json::{Map, Value};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument, trace};
use uuid::Uuid;

const CHANGE_CAPACITY: usize = 256;

/// Published after every committed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeNotice {
    /// Partition that changed
    pub owner_id: String,
    /// Collection that changed
    pub collection: String,
}

impl ChangeNotice {
    /// Whether the notice is about `collection` in `owner`'s partition.
    #[must_use]
    pub fn concerns(&self, owner: &str, collection: &str) -> bool {
        self.owner_id == owner && self.collection == collection
    }
}

/// Handle to the remote document store. Clones share the connection and change channel.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    db: DatabaseConnection,
    changes: broadcast::Sender<ChangeNotice>,
}

fn check_access(principal: &str, owner: &str) -> Result<()> {
    if principal == owner {
        Ok(())
    } else {
        Err(RemoteError::permission_denied(format!(
            "{principal} may not access the partition of {owner}"
        ))
        .into())
    }
}

fn document_key(owner: &str, collection: &str, doc_id: &str) -> (String, String, String) {
    (owner.to_string(), collection.to_string(), doc_id.to_string())
}

impl RemoteStore {
    /// Wraps an open connection whose tables already exist.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        Self { db, changes }
    }

    /// Connects to `database_url` and creates the `documents` table if needed.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let db = create_connection(database_url).await?;
        create_tables(&db).await?;
        info!("Remote store ready");
        Ok(Self::new(db))
    }

    /// The underlying connection.
    #[must_use]
    pub const fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// A new receiver for change notices. Only notices sent after this call are seen.
    #[must_use]
    pub fn changes(&self) -> broadcast::Receiver<ChangeNotice> {
        self.changes.subscribe()
    }

    fn notify(&self, owner: &str, collection: &str) {
        let notice = ChangeNotice {
            owner_id: owner.to_string(),
            collection: collection.to_string(),
        };
        // No receivers just means nobody is subscribed.
        let listeners = self.changes.send(notice).unwrap_or(0);
        trace!(owner, collection, listeners, "Published change notice");
    }

    /// All documents in a collection as `(doc_id, body)`, oldest first.
    pub async fn list(
        &self,
        principal: &str,
        owner: &str,
        collection: &str,
    ) -> Result<Vec<(String, Value)>> {
        check_access(principal, owner)?;
        let rows: Vec<DocumentModel> = StoredDocument::find()
            .filter(DocumentColumn::OwnerId.eq(owner))
            .filter(DocumentColumn::Collection.eq(collection))
            .order_by_asc(DocumentColumn::CreatedAt)
            .order_by_asc(DocumentColumn::DocId)
            .all(&self.db)
            .await?;
        debug!(owner, collection, documents = rows.len(), "Listed collection");
        Ok(rows.into_iter().map(|row| (row.doc_id, row.body)).collect())
    }

    /// One document body, if it exists.
    pub async fn get(
        &self,
        principal: &str,
        owner: &str,
        collection: &str,
        doc_id: &str,
    ) -> Result<Option<Value>> {
        check_access(principal, owner)?;
        let row = StoredDocument::find_by_id(document_key(owner, collection, doc_id))
            .one(&self.db)
            .await?;
        Ok(row.map(|row| row.body))
    }

    /// Stores a new document under a store-generated id and returns the id.
    #[instrument(skip(self, body))]
    pub async fn insert(
        &self,
        principal: &str,
        owner: &str,
        collection: &str,
        body: Value,
    ) -> Result<String> {
        check_access(principal, owner)?;
        let doc_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let row = document::ActiveModel {
            owner_id: Set(owner.to_string()),
            collection: Set(collection.to_string()),
            doc_id: Set(doc_id.clone()),
            body: Set(body),
            created_at: Set(now),
            updated_at: Set(now),
        };
        StoredDocument::insert(row)
            .exec_without_returning(&self.db)
            .await?;
        info!(doc_id = %doc_id, "Inserted document");
        self.notify(owner, collection);
        Ok(doc_id)
    }

    /// Writes a document under a caller-chosen id, replacing the body if it exists.
    #[instrument(skip(self, body))]
    pub async fn set(
        &self,
        principal: &str,
        owner: &str,
        collection: &str,
        doc_id: &str,
        body: Value,
    ) -> Result<()> {
        check_access(principal, owner)?;
        let now = Utc::now();
        let row = document::ActiveModel {
            owner_id: Set(owner.to_string()),
            collection: Set(collection.to_string()),
            doc_id: Set(doc_id.to_string()),
            body: Set(body),
            created_at: Set(now),
            updated_at: Set(now),
        };
        StoredDocument::insert(row)
            .on_conflict(
                OnConflict::columns([
                    DocumentColumn::OwnerId,
                    DocumentColumn::Collection,
                    DocumentColumn::DocId,
                ])
                .update_columns([DocumentColumn::Body, DocumentColumn::UpdatedAt])
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        info!("Set document");
        self.notify(owner, collection);
        Ok(())
    }

    /// Overwrites the top-level fields named in `patch`.
    ///
    /// # Errors
    /// Fails with an unclassified remote error if the document does not exist.
    #[instrument(skip(self, patch))]
    pub async fn merge(
        &self,
        principal: &str,
        owner: &str,
        collection: &str,
        doc_id: &str,
        patch: &Map<String, Value>,
    ) -> Result<()> {
        check_access(principal, owner)?;
        let Some(existing) = StoredDocument::find_by_id(document_key(owner, collection, doc_id))
            .one(&self.db)
            .await?
        else {
            return Err(RemoteError::unclassified(format!(
                "No document {doc_id} in {collection}"
            ))
            .into());
        };

        let mut body = existing.body.clone();
        merge_patch(&mut body, patch);
        let mut row: document::ActiveModel = existing.into();
        row.body = Set(body);
        row.updated_at = Set(Utc::now());
        row.update(&self.db).await?;

        info!(fields = patch.len(), "Merged document");
        self.notify(owner, collection);
        Ok(())
    }

    /// Deletes a document. Deleting a missing document succeeds without publishing a change.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        principal: &str,
        owner: &str,
        collection: &str,
        doc_id: &str,
    ) -> Result<()> {
        check_access(principal, owner)?;
        let result = StoredDocument::delete_by_id(document_key(owner, collection, doc_id))
            .exec(&self.db)
            .await?;
        if result.rows_affected > 0 {
            info!("Deleted document");
            self.notify(owner, collection);
        } else {
            debug!("Document already absent");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{errors::RemoteErrorKind, test_utils::setup_test_store};
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_then_list_in_creation_order() -> Result<()> {
        let remote = setup_test_store().await?;
        let first = remote
            .insert("u1", "u1", "entries", json!({"amount": 1}))
            .await?;
        let second = remote
            .insert("u1", "u1", "entries", json!({"amount": 2}))
            .await?;
        remote
            .insert("u2", "u2", "entries", json!({"amount": 3}))
            .await?;

        let listed = remote.list("u1", "u1", "entries").await?;
        assert_eq!(listed.len(), 2);
        let ids: Vec<_> = listed.iter().map(|(id, _)| id.clone()).collect();
        assert!(ids.contains(&first));
        assert!(ids.contains(&second));
        assert!(remote.list("u1", "u1", "budgetItems").await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_foreign_partition_is_permission_denied() -> Result<()> {
        let remote = setup_test_store().await?;
        remote.insert("u1", "u1", "entries", json!({})).await?;

        let read = remote.list("u2", "u1", "entries").await;
        assert_eq!(
            read.unwrap_err().remote_kind(),
            Some(RemoteErrorKind::PermissionDenied)
        );
        let write = remote.set("u2", "u1", "preferences", "u1", json!({})).await;
        assert_eq!(
            write.unwrap_err().remote_kind(),
            Some(RemoteErrorKind::PermissionDenied)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_set_upserts_and_merge_overwrites_fields() -> Result<()> {
        let remote = setup_test_store().await?;
        remote
            .set("u1", "u1", "budgetDebits", "2025-06", json!({"amount": 100, "year": 2025}))
            .await?;
        remote
            .set("u1", "u1", "budgetDebits", "2025-06", json!({"amount": 200, "year": 2025}))
            .await?;
        assert_eq!(remote.list("u1", "u1", "budgetDebits").await?.len(), 1);

        let patch = json!({"amount": 300}).as_object().cloned().unwrap();
        remote
            .merge("u1", "u1", "budgetDebits", "2025-06", &patch)
            .await?;
        let body = remote
            .get("u1", "u1", "budgetDebits", "2025-06")
            .await?
            .unwrap();
        assert_eq!(body, json!({"amount": 300, "year": 2025}));
        Ok(())
    }

    #[tokio::test]
    async fn test_merge_missing_document_fails() -> Result<()> {
        let remote = setup_test_store().await?;
        let result = remote.merge("u1", "u1", "entries", "nope", &Map::new()).await;
        assert_eq!(
            result.unwrap_err().remote_kind(),
            Some(RemoteErrorKind::Unclassified)
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_writes_publish_change_notices() -> Result<()> {
        let remote = setup_test_store().await?;
        let mut changes = remote.changes();

        let id = remote.insert("u1", "u1", "entries", json!({})).await?;
        let notice = changes.recv().await.unwrap();
        assert!(notice.concerns("u1", "entries"));

        remote.delete("u1", "u1", "entries", &id).await?;
        assert!(changes.recv().await.unwrap().concerns("u1", "entries"));

        // Deleting again is a quiet no-op.
        remote.delete("u1", "u1", "entries", &id).await?;
        assert!(changes.try_recv().is_err());
        Ok(())
    }
}
