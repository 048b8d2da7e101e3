//! Wishlist slice of the Local Store: items, categories, and priority types.

use super::{
    collection::Collection,
    ledger::{accepted, new_id, patch_record},
};
use crate::{
    document::Document,
    errors::Result,
    models::{
        NewWishItem, NewWishPriorityType, WishCategory, WishCategoryPatch, WishItem,
        WishItemPatch, WishPriorityPatch, WishPriorityType,
    },
    validation,
};
use tracing::{debug, warn};

/// Wishlist items with their categories and priority types.
///
/// Removing a category clears it from dependent items. Removing a priority type moves
/// dependent items to the highest-ranked surviving priority; when none survives they keep the
/// now-dangling id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistState {
    items: Collection<WishItem>,
    categories: Collection<WishCategory>,
    priorities: Collection<WishPriorityType>,
}

impl WishlistState {
    /// All items.
    #[must_use]
    pub fn items(&self) -> &[WishItem] {
        self.items.as_slice()
    }

    /// One item by id.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&WishItem> {
        self.items.get(id)
    }

    /// All categories.
    #[must_use]
    pub fn categories(&self) -> &[WishCategory] {
        self.categories.as_slice()
    }

    /// One category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&WishCategory> {
        self.categories.get(id)
    }

    /// All priority types, in storage order.
    #[must_use]
    pub fn priorities(&self) -> &[WishPriorityType] {
        self.priorities.as_slice()
    }

    /// Priority types sorted from highest (order 1) to lowest.
    #[must_use]
    pub fn priorities_by_order(&self) -> Vec<&WishPriorityType> {
        let mut sorted: Vec<_> = self.priorities.as_slice().iter().collect();
        sorted.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.name.cmp(&b.name)));
        sorted
    }

    /// One priority type by id.
    #[must_use]
    pub fn priority(&self, id: &str) -> Option<&WishPriorityType> {
        self.priorities.get(id)
    }

    // --- items ---

    /// Adds an item with a fresh id.
    pub fn add_item(&mut self, item: NewWishItem) -> Result<String> {
        validation::new_wish_item(&item)?;
        let id = new_id();
        self.items.upsert(WishItem {
            id: id.clone(),
            name: item.name,
            approximate_amount: item.approximate_amount,
            priority_id: item.priority_id,
            icon_type: item.icon_type,
            category_id: item.category_id,
            done: false,
        });
        Ok(id)
    }

    /// Merges a patch into an item.
    pub fn update_item(&mut self, id: &str, patch: &WishItemPatch) -> bool {
        accepted(WishItem::COLLECTION, id, validation::wish_item_patch(patch))
            && patch_record(&mut self.items, id, patch)
    }

    /// Removes an item.
    pub fn remove_item(&mut self, id: &str) -> bool {
        self.items.remove(id).is_some()
    }

    /// Replaces all items.
    pub fn replace_items(&mut self, items: Vec<WishItem>) {
        self.items.replace_all(items);
    }

    // --- categories ---

    /// Adds a category with a fresh id.
    pub fn add_category(&mut self, name: impl Into<String>) -> Result<String> {
        let name = name.into();
        validation::required("name", &name)?;
        let id = new_id();
        self.categories.upsert(WishCategory {
            id: id.clone(),
            name,
        });
        Ok(id)
    }

    /// Merges a patch into a category.
    pub fn update_category(&mut self, id: &str, patch: &WishCategoryPatch) -> bool {
        patch_record(&mut self.categories, id, patch)
    }

    /// Removes a category and clears it from every item that referenced it.
    pub fn remove_category(&mut self, id: &str) -> bool {
        if self.categories.remove(id).is_none() {
            return false;
        }
        let cleared = self.items.modify_where(
            |item| item.category_id.as_deref() == Some(id),
            |item| item.category_id = None,
        );
        debug!(id, cleared, "Removed wishlist category");
        true
    }

    /// Replaces all categories.
    pub fn replace_categories(&mut self, categories: Vec<WishCategory>) {
        self.categories.replace_all(categories);
    }

    // --- priorities ---

    /// Adds a priority type with a fresh id.
    ///
    /// Order uniqueness is checked by the sync adapter before remote writes, not here.
    pub fn add_priority(&mut self, priority: NewWishPriorityType) -> Result<String> {
        validation::new_priority(&priority)?;
        let id = new_id();
        self.priorities.upsert(WishPriorityType {
            id: id.clone(),
            name: priority.name,
            order: priority.order,
        });
        Ok(id)
    }

    /// Merges a patch into a priority type.
    pub fn update_priority(&mut self, id: &str, patch: &WishPriorityPatch) -> bool {
        accepted(WishPriorityType::COLLECTION, id, validation::priority_patch(patch))
            && patch_record(&mut self.priorities, id, patch)
    }

    /// Removes a priority type and moves its items to the best surviving priority.
    pub fn remove_priority(&mut self, id: &str) -> bool {
        if self.priorities.remove(id).is_none() {
            return false;
        }
        let fallback = self.priorities_by_order().first().map(|p| p.id.clone());
        match fallback {
            Some(fallback) => {
                let moved = self.items.modify_where(
                    |item| item.priority_id == id,
                    |item| item.priority_id.clone_from(&fallback),
                );
                debug!(id, fallback = %fallback, moved, "Reassigned wishlist items after priority removal");
            }
            None => {
                warn!(id, "Removed the last priority type; items keep a dangling priority id");
            }
        }
        true
    }

    /// Replaces all priority types.
    pub fn replace_priorities(&mut self, priorities: Vec<WishPriorityType>) {
        self.priorities.replace_all(priorities);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use rust_decimal::Decimal;

    fn item(name: &str, priority_id: &str, category_id: Option<&str>) -> NewWishItem {
        NewWishItem {
            name: name.to_string(),
            approximate_amount: Decimal::from(1000),
            priority_id: priority_id.to_string(),
            icon_type: "gift".to_string(),
            category_id: category_id.map(str::to_string),
        }
    }

    fn priority(name: &str, order: u32) -> NewWishPriorityType {
        NewWishPriorityType {
            name: name.to_string(),
            order,
        }
    }

    #[test]
    fn test_remove_category_clears_references() {
        let mut wishlist = WishlistState::default();
        let gadgets = wishlist.add_category("Gadgets").unwrap();
        let books = wishlist.add_category("Books").unwrap();
        let p = wishlist.add_priority(priority("High", 1)).unwrap();
        let phone = wishlist.add_item(item("Phone", &p, Some(&gadgets))).unwrap();
        let novel = wishlist.add_item(item("Novel", &p, Some(&books))).unwrap();

        assert!(wishlist.remove_category(&gadgets));
        assert_eq!(wishlist.item(&phone).unwrap().category_id, None);
        assert_eq!(
            wishlist.item(&novel).unwrap().category_id.as_deref(),
            Some(books.as_str())
        );
        assert_eq!(wishlist.items().len(), 2);
    }

    #[test]
    fn test_remove_priority_reassigns_to_survivor() {
        let mut wishlist = WishlistState::default();
        let high = wishlist.add_priority(priority("High", 1)).unwrap();
        let medium = wishlist.add_priority(priority("Medium", 2)).unwrap();
        let low = wishlist.add_priority(priority("Low", 3)).unwrap();
        let bike = wishlist.add_item(item("Bike", &medium, None)).unwrap();

        assert!(wishlist.remove_priority(&medium));
        let reassigned = &wishlist.item(&bike).unwrap().priority_id;
        assert!(reassigned == &high || reassigned == &low);
        assert!(wishlist.priority(reassigned).is_some());
    }

    #[test]
    fn test_remove_last_priority_keeps_dangling_id() {
        let mut wishlist = WishlistState::default();
        let only = wishlist.add_priority(priority("Only", 1)).unwrap();
        let bike = wishlist.add_item(item("Bike", &only, None)).unwrap();

        assert!(wishlist.remove_priority(&only));
        assert!(wishlist.priorities().is_empty());
        assert_eq!(wishlist.item(&bike).unwrap().priority_id, only);
    }

    #[test]
    fn test_invalid_patches_are_rejected() {
        let mut wishlist = WishlistState::default();
        let high = wishlist.add_priority(priority("High", 1)).unwrap();
        let bike = wishlist.add_item(item("Bike", &high, None)).unwrap();
        let before = wishlist.clone();

        let negative = WishItemPatch {
            approximate_amount: Some(Decimal::from(-5)),
            ..Default::default()
        };
        let unranked = WishPriorityPatch {
            order: Some(0),
            ..Default::default()
        };
        assert!(!wishlist.update_item(&bike, &negative));
        assert!(!wishlist.update_priority(&high, &unranked));
        assert_eq!(wishlist, before);

        let cheaper = WishItemPatch {
            approximate_amount: Some(Decimal::from(800)),
            ..Default::default()
        };
        assert!(wishlist.update_item(&bike, &cheaper));
        assert_eq!(wishlist.item(&bike).unwrap().approximate_amount, Decimal::from(800));
    }

    #[test]
    fn test_priorities_by_order() {
        let mut wishlist = WishlistState::default();
        wishlist.add_priority(priority("Low", 3)).unwrap();
        wishlist.add_priority(priority("High", 1)).unwrap();
        wishlist.add_priority(priority("Medium", 2)).unwrap();
        let names: Vec<_> = wishlist
            .priorities_by_order()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["High", "Medium", "Low"]);
    }
}
