//! Normalization boundary between persisted documents and the domain model.
//!
//! Every stored record has a document shape: a serde struct whose optional fields are written
//! as an explicit `null` and read back as `None`, whether the field was `null` or missing.
//! Conversions in both directions happen only here.
//!
//! Partial updates are JSON merge patches produced from the typed `*Patch` structs in
//! [`crate::models`]. The Local Store and the remote store apply them with the same
//! [`merge_patch`], so a remote echo lands on exactly the state a local guess produced.

mod ledger;
mod wishlist;

pub use ledger::{BudgetDebitDoc, BudgetItemDoc, EntryDoc, ExpenseCategoryDoc, ExpenseTypeDoc};
pub use wishlist::{PreferencesDoc, WishCategoryDoc, WishItemDoc, WishPriorityDoc};

use crate::errors::Result;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

/// A record that can be stored as a document in an owner's partition.
pub trait Document: Sized {
    /// Collection name within the owner partition
    const COLLECTION: &'static str;

    /// Persisted shape, without the identifier
    type Fields: Serialize + DeserializeOwned;

    /// Document identifier
    fn id(&self) -> &str;

    /// Domain shape to document shape.
    fn to_fields(&self) -> Self::Fields;

    /// Document shape to domain shape.
    fn from_fields(id: String, fields: Self::Fields) -> Self;
}

/// Serializes a record's document body.
pub fn to_body<D: Document>(record: &D) -> Result<Value> {
    Ok(serde_json::to_value(record.to_fields())?)
}

/// Reads a record from its identifier and document body.
pub fn from_body<D: Document>(id: impl Into<String>, body: Value) -> Result<D> {
    let fields: D::Fields = serde_json::from_value(body)?;
    Ok(D::from_fields(id.into(), fields))
}

/// A typed partial update that serializes to a merge patch.
pub trait Patch: Serialize {
    /// Top-level fields to overwrite. Fields left out of the map stay untouched.
    fn to_merge_patch(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            _ => Ok(Map::new()),
        }
    }

    /// Whether applying the patch would change nothing.
    fn is_empty(&self) -> Result<bool> {
        Ok(self.to_merge_patch()?.is_empty())
    }
}

/// Overwrites the top-level fields of `body` named in `patch`.
pub fn merge_patch(body: &mut Value, patch: &Map<String, Value>) {
    if let Value::Object(fields) = body {
        for (key, value) in patch {
            fields.insert(key.clone(), value.clone());
        }
    }
}

/// Applies a merge patch to a record through its document shape.
pub fn apply_patch<D: Document>(record: &D, patch: &Map<String, Value>) -> Result<D> {
    let mut body = to_body(record)?;
    merge_patch(&mut body, patch);
    from_body(record.id().to_string(), body)
}
