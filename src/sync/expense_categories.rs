//! Expense category collection.

use super::{SyncAdapter, Subscription};
use crate::{
    auth::AuthProvider,
    errors::{Error, Result},
    models::{ExpenseCategory, ExpenseCategoryPatch, NewExpenseCategory},
    validation,
};
use tracing::info;

impl<A: AuthProvider> SyncAdapter<A> {
    /// Creates an expense category and returns its id.
    pub async fn create_expense_category(&self, category: NewExpenseCategory) -> Result<String> {
        validation::new_expense_category(&category)?;
        let record = ExpenseCategory {
            id: String::new(),
            name: category.name,
            icon: category.icon,
            gradient_preset: category.gradient_preset,
        };
        let id = self.create(&record).await?;
        info!(id = %id, name = %record.name, "Created expense category");
        Ok(id)
    }

    /// Merges `patch` into an expense category.
    pub async fn update_expense_category(&self, id: &str, patch: &ExpenseCategoryPatch) -> Result<()> {
        if let Some(name) = &patch.name {
            validation::required("name", name)?;
        }
        self.update::<ExpenseCategory, _>(id, patch).await
    }

    /// Deletes an expense category. Types and budget items that reference it are left as they
    /// are.
    pub async fn delete_expense_category(&self, id: &str) -> Result<()> {
        self.delete::<ExpenseCategory>(id).await
    }

    /// Subscribes to `owner`'s expense categories.
    pub fn subscribe_expense_categories(
        &self,
        owner: &str,
        on_data: impl FnMut(Vec<ExpenseCategory>) + Send + 'static,
        on_error: impl FnOnce(Error) + Send + 'static,
    ) -> Subscription {
        self.subscribe(owner, on_data, on_error)
    }
}
