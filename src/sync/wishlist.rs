//! Wishlist items, categories, and priority types.
//!
//! Two rules span records here. Priority orders are unique: a write that would reuse another
//! type's order is refused with [`Error::PriorityOrderConflict`]. The check reads the current
//! priorities before writing, so two writers racing each other can still both succeed.
//! Deleting a category or priority rewrites the items that pointed at it; each rewrite is its
//! own write with no transaction around them.

use super::{SyncAdapter, Subscription};
use crate::{
    auth::AuthProvider,
    errors::{Error, Result},
    models::{
        NewWishItem, NewWishPriorityType, WishCategory, WishCategoryPatch, WishItem,
        WishItemPatch, WishPriorityPatch, WishPriorityType,
    },
    validation,
};
use tracing::{debug, info};

impl<A: AuthProvider> SyncAdapter<A> {
    // --- items ---

    /// Creates a wishlist item (not done) and returns its id.
    pub async fn create_wish_item(&self, item: NewWishItem) -> Result<String> {
        validation::new_wish_item(&item)?;
        let record = WishItem {
            id: String::new(),
            name: item.name,
            approximate_amount: item.approximate_amount,
            priority_id: item.priority_id,
            icon_type: item.icon_type,
            category_id: item.category_id,
            done: false,
        };
        let id = self.create(&record).await?;
        info!(id = %id, name = %record.name, "Created wishlist item");
        Ok(id)
    }

    /// Merges `patch` into a wishlist item.
    pub async fn update_wish_item(&self, id: &str, patch: &WishItemPatch) -> Result<()> {
        validation::wish_item_patch(patch)?;
        self.update::<WishItem, _>(id, patch).await
    }

    /// Deletes a wishlist item.
    pub async fn delete_wish_item(&self, id: &str) -> Result<()> {
        self.delete::<WishItem>(id).await
    }

    // --- categories ---

    /// Creates a wishlist category and returns its id.
    pub async fn create_wish_category(&self, name: &str) -> Result<String> {
        validation::required("name", name)?;
        let record = WishCategory {
            id: String::new(),
            name: name.trim().to_string(),
        };
        self.create(&record).await
    }

    /// Renames a wishlist category.
    pub async fn update_wish_category(&self, id: &str, patch: &WishCategoryPatch) -> Result<()> {
        if let Some(name) = &patch.name {
            validation::required("name", name)?;
        }
        self.update::<WishCategory, _>(id, patch).await
    }

    /// Deletes a wishlist category and clears it from every item filed under it.
    pub async fn delete_wish_category(&self, id: &str) -> Result<()> {
        self.delete::<WishCategory>(id).await?;
        let clear = WishItemPatch {
            category_id: Some(None),
            ..Default::default()
        };
        let filed: Vec<WishItem> = self
            .list::<WishItem>()
            .await?
            .into_iter()
            .filter(|item| item.category_id.as_deref() == Some(id))
            .collect();
        for item in &filed {
            self.update::<WishItem, _>(&item.id, &clear).await?;
        }
        info!(id, cleared = filed.len(), "Deleted wishlist category");
        Ok(())
    }

    // --- priorities ---

    /// Refuses `order` if a priority type other than `exclude` already uses it.
    async fn ensure_order_free(&self, order: u32, exclude: Option<&str>) -> Result<()> {
        let clash = self
            .list::<WishPriorityType>()
            .await?
            .into_iter()
            .any(|priority| priority.order == order && Some(priority.id.as_str()) != exclude);
        if clash {
            debug!(order, "Priority order already taken");
            return Err(Error::PriorityOrderConflict { order });
        }
        Ok(())
    }

    /// Creates a priority type and returns its id.
    ///
    /// # Errors
    /// [`Error::PriorityOrderConflict`] if another type already uses the order.
    pub async fn create_priority(&self, priority: NewWishPriorityType) -> Result<String> {
        validation::new_priority(&priority)?;
        self.ensure_order_free(priority.order, None).await?;
        let record = WishPriorityType {
            id: String::new(),
            name: priority.name,
            order: priority.order,
        };
        let id = self.create(&record).await?;
        info!(id = %id, order = record.order, "Created priority type");
        Ok(id)
    }

    /// Merges `patch` into a priority type. Keeping the type's own order is not a conflict.
    ///
    /// # Errors
    /// [`Error::PriorityOrderConflict`] if another type already uses the new order.
    pub async fn update_priority(&self, id: &str, patch: &WishPriorityPatch) -> Result<()> {
        validation::priority_patch(patch)?;
        if let Some(order) = patch.order {
            self.ensure_order_free(order, Some(id)).await?;
        }
        self.update::<WishPriorityType, _>(id, patch).await
    }

    /// Deletes a priority type and moves its items to the surviving type with the lowest order.
    ///
    /// # Errors
    /// [`Error::LastPriorityType`] if it is the only priority type left.
    pub async fn delete_priority(&self, id: &str) -> Result<()> {
        let priorities = self.list::<WishPriorityType>().await?;
        if !priorities.iter().any(|priority| priority.id == id) {
            return self.delete::<WishPriorityType>(id).await;
        }
        let Some(fallback) = priorities
            .iter()
            .filter(|priority| priority.id != id)
            .min_by_key(|priority| priority.order)
        else {
            return Err(Error::LastPriorityType);
        };

        let reassign = WishItemPatch {
            priority_id: Some(fallback.id.clone()),
            ..Default::default()
        };
        let ranked: Vec<WishItem> = self
            .list::<WishItem>()
            .await?
            .into_iter()
            .filter(|item| item.priority_id == id)
            .collect();
        for item in &ranked {
            self.update::<WishItem, _>(&item.id, &reassign).await?;
        }
        self.delete::<WishPriorityType>(id).await?;
        info!(id, fallback = %fallback.id, moved = ranked.len(), "Deleted priority type");
        Ok(())
    }

    // --- subscriptions ---

    /// Subscribes to `owner`'s wishlist items.
    pub fn subscribe_wish_items(
        &self,
        owner: &str,
        on_data: impl FnMut(Vec<WishItem>) + Send + 'static,
        on_error: impl FnOnce(Error) + Send + 'static,
    ) -> Subscription {
        self.subscribe(owner, on_data, on_error)
    }

    /// Subscribes to `owner`'s wishlist categories.
    pub fn subscribe_wish_categories(
        &self,
        owner: &str,
        on_data: impl FnMut(Vec<WishCategory>) + Send + 'static,
        on_error: impl FnOnce(Error) + Send + 'static,
    ) -> Subscription {
        self.subscribe(owner, on_data, on_error)
    }

    /// Subscribes to `owner`'s priority types.
    pub fn subscribe_priorities(
        &self,
        owner: &str,
        on_data: impl FnMut(Vec<WishPriorityType>) + Send + 'static,
        on_error: impl FnOnce(Error) + Send + 'static,
    ) -> Subscription {
        self.subscribe(owner, on_data, on_error)
    }
}
