//! Document entity - one stored record of any collection in any owner partition.
//!
//! The remote store keeps every collection in this single table. A row is addressed by
//! `(owner_id, collection, doc_id)`, and `body` holds the document shape defined in
//! [`crate::document`], optional fields included as explicit `null`s.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored document
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    /// Owner partition (the user id)
    #[sea_orm(primary_key, auto_increment = false)]
    pub owner_id: String,
    /// Collection name within the partition (e.g. `"entries"`)
    #[sea_orm(primary_key, auto_increment = false)]
    pub collection: String,
    /// Document identifier within the collection
    #[sea_orm(primary_key, auto_increment = false)]
    pub doc_id: String,
    /// Document body as JSON
    pub body: Json,
    /// When the document was first written
    pub created_at: DateTimeUtc,
    /// When the document was last written
    pub updated_at: DateTimeUtc,
}

/// Documents have no relationships; references between records live inside the bodies
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
