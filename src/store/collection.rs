//! Id-keyed record collection backing every Local Store slice.

use crate::document::{Document, apply_patch};
use serde_json::{Map, Value};
use tracing::warn;

/// Records of one kind, unique by id. Insertion order is kept but carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Document> Collection<T> {
    /// All records.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Looks up a record by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id() == id)
    }

    /// Inserts a record, replacing any record with the same id.
    pub(crate) fn upsert(&mut self, record: T) {
        match self.position(record.id()) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
    }

    /// Merges a patch into the record with `id`. Unknown ids are a no-op.
    pub(crate) fn patch(&mut self, id: &str, patch: &Map<String, Value>) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        match apply_patch(&self.records[index], patch) {
            Ok(updated) => {
                self.records[index] = updated;
                true
            }
            Err(e) => {
                warn!(collection = T::COLLECTION, id, "Ignoring unusable patch: {}", e);
                false
            }
        }
    }

    /// Mutates every record matching `predicate`, returning how many changed.
    pub(crate) fn modify_where(
        &mut self,
        predicate: impl Fn(&T) -> bool,
        mut change: impl FnMut(&mut T),
    ) -> usize {
        let mut changed = 0;
        for record in self.records.iter_mut().filter(|r| predicate(&**r)) {
            change(record);
            changed += 1;
        }
        changed
    }

    /// Removes the record with `id`. Unknown ids are a no-op.
    pub(crate) fn remove(&mut self, id: &str) -> Option<T> {
        self.position(id).map(|index| self.records.remove(index))
    }

    /// Replaces every record. Duplicate ids collapse to the last occurrence.
    pub(crate) fn replace_all(&mut self, records: Vec<T>) {
        self.records.clear();
        for record in records {
            self.upsert(record);
        }
    }
}
