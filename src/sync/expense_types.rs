//! Expense type collection.

use super::{SyncAdapter, Subscription};
use crate::{
    auth::AuthProvider,
    errors::{Error, Result},
    models::{ExpenseType, ExpenseTypePatch, NewExpenseType},
    validation,
};
use tracing::info;

impl<A: AuthProvider> SyncAdapter<A> {
    /// Creates an expense type and returns its id.
    pub async fn create_expense_type(&self, expense_type: NewExpenseType) -> Result<String> {
        validation::new_expense_type(&expense_type)?;
        let record = ExpenseType {
            id: String::new(),
            name: expense_type.name,
            category_id: expense_type.category_id,
            main_category_id: expense_type.main_category_id,
            group: expense_type.group,
        };
        let id = self.create(&record).await?;
        info!(id = %id, category = %record.category_id, "Created expense type");
        Ok(id)
    }

    /// Merges `patch` into an expense type.
    pub async fn update_expense_type(&self, id: &str, patch: &ExpenseTypePatch) -> Result<()> {
        if let Some(name) = &patch.name {
            validation::required("name", name)?;
        }
        if let Some(category_id) = &patch.category_id {
            validation::required("categoryId", category_id)?;
        }
        self.update::<ExpenseType, _>(id, patch).await
    }

    /// Deletes an expense type. Entries and budget items keep their reference.
    pub async fn delete_expense_type(&self, id: &str) -> Result<()> {
        self.delete::<ExpenseType>(id).await
    }

    /// Subscribes to `owner`'s expense types.
    pub fn subscribe_expense_types(
        &self,
        owner: &str,
        on_data: impl FnMut(Vec<ExpenseType>) + Send + 'static,
        on_error: impl FnOnce(Error) + Send + 'static,
    ) -> Subscription {
        self.subscribe(owner, on_data, on_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::MainCategory, test_utils::signed_in_adapter};

    #[tokio::test]
    async fn test_optional_fields_survive_round_trip() -> Result<()> {
        let adapter = signed_in_adapter("user-1").await?;
        let id = adapter
            .create_expense_type(NewExpenseType {
                name: "Electricity".to_string(),
                category_id: "c-house".to_string(),
                main_category_id: None,
                group: Some("Utilities".to_string()),
            })
            .await?;

        let patch = ExpenseTypePatch {
            main_category_id: Some(Some(MainCategory::Bebosar)),
            group: Some(None),
            ..Default::default()
        };
        adapter.update_expense_type(&id, &patch).await?;

        let listed = adapter.list::<ExpenseType>().await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].main_category_id, Some(MainCategory::Bebosar));
        assert_eq!(listed[0].group, None);
        assert_eq!(listed[0].category_id, "c-house");

        adapter.delete_expense_type(&id).await?;
        assert!(adapter.list::<ExpenseType>().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_category_is_rejected() -> Result<()> {
        let adapter = signed_in_adapter("user-1").await?;
        let result = adapter
            .create_expense_type(NewExpenseType {
                name: "Rent".to_string(),
                category_id: String::new(),
                main_category_id: None,
                group: None,
            })
            .await;
        assert!(matches!(result, Err(Error::Validation { field: "categoryId", .. })));
        Ok(())
    }
}
