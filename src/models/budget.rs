//! Monthly budget planning: planned spend per expense type and declared income per period.

use rust_decimal::Decimal;
use serde::Serialize;

/// Planned spend for one expense type in one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetItem {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Planned amount
    pub amount: Decimal,
    /// Budget year
    pub year: i32,
    /// Budget month (1-12)
    pub month: u32,
    /// Owning [`crate::models::ExpenseCategory`]
    pub category_id: String,
    /// Planned [`crate::models::ExpenseType`], if any
    pub expense_type_id: Option<String>,
}

/// Input for creating a [`BudgetItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudgetItem {
    /// Display name
    pub name: String,
    /// Planned amount
    pub amount: Decimal,
    /// Budget year
    pub year: i32,
    /// Budget month (1-12)
    pub month: u32,
    /// Owning category
    pub category_id: String,
    /// Planned expense type
    pub expense_type_id: Option<String>,
}

/// Partial update for a [`BudgetItem`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItemPatch {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New planned amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// New owning category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// New expense type link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_type_id: Option<Option<String>>,
}

/// Declared income ("debit") for a period, optionally scoped to one expense category.
///
/// Identified by its key, `YYYY-MM` or `YYYY-MM-<categoryId>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetDebit {
    key: String,
    /// Period year
    pub year: i32,
    /// Period month (1-12)
    pub month: u32,
    /// Category scope, if any
    pub category_id: Option<String>,
    /// Declared amount
    pub amount: Decimal,
}

impl BudgetDebit {
    /// Creates a debit and derives its key.
    #[must_use]
    pub fn new(year: i32, month: u32, category_id: Option<String>, amount: Decimal) -> Self {
        Self {
            key: Self::key_for(year, month, category_id.as_deref()),
            year,
            month,
            category_id,
            amount,
        }
    }

    /// Builds the key for a period and optional category scope.
    #[must_use]
    pub fn key_for(year: i32, month: u32, category_id: Option<&str>) -> String {
        match category_id {
            Some(category) => format!("{year}-{month:02}-{category}"),
            None => format!("{year}-{month:02}"),
        }
    }

    /// Parses a key back into a debit. Returns `None` for malformed keys.
    #[must_use]
    pub fn from_key(key: &str, amount: Decimal) -> Option<Self> {
        let mut parts = key.splitn(3, '-');
        let year = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;
        if !(1..=12).contains(&month) {
            return None;
        }
        let category_id = parts.next().filter(|c| !c.is_empty()).map(str::to_string);
        Some(Self::new(year, month, category_id, amount))
    }

    /// The debit's key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}
