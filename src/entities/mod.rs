//! Entity module - `SeaORM` entity definitions backing the remote store.

pub mod document;

pub use document::{Column as DocumentColumn, Entity as StoredDocument, Model as DocumentModel};
