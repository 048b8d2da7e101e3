//! Budget items and declared period debits.

use super::{SyncAdapter, Subscription};
use crate::{
    auth::AuthProvider,
    errors::{Error, Result},
    models::{BudgetDebit, BudgetItem, BudgetItemPatch, NewBudgetItem},
    validation,
};
use tracing::info;

impl<A: AuthProvider> SyncAdapter<A> {
    /// Creates a budget item and returns its id.
    pub async fn create_budget_item(&self, item: NewBudgetItem) -> Result<String> {
        validation::new_budget_item(&item)?;
        let record = BudgetItem {
            id: String::new(),
            name: item.name,
            amount: item.amount,
            year: item.year,
            month: item.month,
            category_id: item.category_id,
            expense_type_id: item.expense_type_id,
        };
        let id = self.create(&record).await?;
        info!(id = %id, year = record.year, month = record.month, "Created budget item");
        Ok(id)
    }

    /// Merges `patch` into a budget item.
    pub async fn update_budget_item(&self, id: &str, patch: &BudgetItemPatch) -> Result<()> {
        validation::budget_item_patch(patch)?;
        self.update::<BudgetItem, _>(id, patch).await
    }

    /// Deletes a budget item.
    pub async fn delete_budget_item(&self, id: &str) -> Result<()> {
        self.delete::<BudgetItem>(id).await
    }

    /// Declares the income for a period under its `YYYY-MM[-categoryId]` key, replacing any
    /// earlier declaration.
    pub async fn set_budget_debit(&self, debit: &BudgetDebit) -> Result<()> {
        validation::budget_debit(debit)?;
        self.set(debit).await?;
        info!(key = debit.key(), amount = %debit.amount, "Declared budget debit");
        Ok(())
    }

    /// Removes a declared debit by key.
    pub async fn delete_budget_debit(&self, key: &str) -> Result<()> {
        self.delete::<BudgetDebit>(key).await
    }

    /// Subscribes to `owner`'s budget items.
    pub fn subscribe_budget_items(
        &self,
        owner: &str,
        on_data: impl FnMut(Vec<BudgetItem>) + Send + 'static,
        on_error: impl FnOnce(Error) + Send + 'static,
    ) -> Subscription {
        self.subscribe(owner, on_data, on_error)
    }

    /// Subscribes to `owner`'s declared debits.
    pub fn subscribe_budget_debits(
        &self,
        owner: &str,
        on_data: impl FnMut(Vec<BudgetDebit>) + Send + 'static,
        on_error: impl FnOnce(Error) + Send + 'static,
    ) -> Subscription {
        self.subscribe(owner, on_data, on_error)
    }
}
