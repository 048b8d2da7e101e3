//! Document shapes for ledger entries, expense classification, and budgets.

use super::{Document, Patch};
use crate::errors::Result;
use crate::models::{
    BudgetDebit, BudgetItem, BudgetItemPatch, Entry, EntryBody, EntryPatch, ExpenseCategory,
    ExpenseCategoryPatch, ExpenseType, ExpenseTypePatch, Flow, GradientPreset, MainCategory,
};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Stored shape of an [`Entry`].
///
/// A day-note is stored as `amount = 0`, `type = "expense"`, `expenseTypeId = null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDoc {
    /// Amount moved
    pub amount: Decimal,
    /// `"income"` or `"expense"`
    #[serde(rename = "type")]
    pub flow: Flow,
    /// Raw category id
    #[serde(default)]
    pub category: Option<String>,
    /// Linked expense type
    #[serde(default)]
    pub expense_type_id: Option<String>,
    /// Free text
    #[serde(default)]
    pub description: Option<String>,
    /// Calendar date
    pub date: NaiveDate,
    /// Denormalized month; derived from `date` when absent
    #[serde(default)]
    pub month: Option<u32>,
    /// Denormalized year; derived from `date` when absent
    #[serde(default)]
    pub year: Option<i32>,
    /// Creation time
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Document for Entry {
    const COLLECTION: &'static str = "entries";
    type Fields = EntryDoc;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> EntryDoc {
        EntryDoc {
            amount: self.amount(),
            flow: self.flow(),
            category: Some(self.category.clone()),
            expense_type_id: self.expense_type_id().map(str::to_string),
            description: self.description.clone(),
            date: self.date,
            month: Some(self.month),
            year: Some(self.year),
            created_at: self.created_at,
        }
    }

    fn from_fields(id: String, fields: EntryDoc) -> Self {
        let body = if fields.amount.is_zero() && fields.expense_type_id.is_none() {
            EntryBody::DayNote
        } else {
            EntryBody::Transaction {
                flow: fields.flow,
                amount: fields.amount,
                expense_type_id: fields.expense_type_id,
            }
        };
        Self {
            id,
            body,
            category: fields
                .category
                .unwrap_or_else(|| MainCategory::Other.id().to_string()),
            description: fields.description,
            month: fields.month.unwrap_or_else(|| fields.date.month()),
            year: fields.year.unwrap_or_else(|| fields.date.year()),
            date: fields.date,
            created_at: fields.created_at,
        }
    }
}

impl Patch for EntryPatch {
    fn to_merge_patch(&self) -> Result<Map<String, Value>> {
        let mut fields = match serde_json::to_value(self)? {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        if let Some(date) = self.date {
            fields.insert("month".to_string(), json!(date.month()));
            fields.insert("year".to_string(), json!(date.year()));
        }
        Ok(fields)
    }
}

/// Stored shape of an [`ExpenseCategory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategoryDoc {
    /// Display name
    pub name: String,
    /// Icon identifier
    #[serde(default)]
    pub icon: Option<String>,
    /// Card gradient
    #[serde(default)]
    pub gradient_preset: Option<GradientPreset>,
}

impl Document for ExpenseCategory {
    const COLLECTION: &'static str = "expenseCategories";
    type Fields = ExpenseCategoryDoc;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> ExpenseCategoryDoc {
        ExpenseCategoryDoc {
            name: self.name.clone(),
            icon: Some(self.icon.clone()),
            gradient_preset: Some(self.gradient_preset),
        }
    }

    fn from_fields(id: String, fields: ExpenseCategoryDoc) -> Self {
        Self {
            id,
            name: fields.name,
            icon: fields.icon.unwrap_or_default(),
            gradient_preset: fields.gradient_preset.unwrap_or(GradientPreset::Slate),
        }
    }
}

impl Patch for ExpenseCategoryPatch {}

/// Stored shape of an [`ExpenseType`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTypeDoc {
    /// Display name
    pub name: String,
    /// Owning expense category
    pub category_id: String,
    /// Raw main category id
    #[serde(default)]
    pub main_category_id: Option<String>,
    /// Grouping label
    #[serde(default)]
    pub group: Option<String>,
}

impl Document for ExpenseType {
    const COLLECTION: &'static str = "expenseTypes";
    type Fields = ExpenseTypeDoc;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> ExpenseTypeDoc {
        ExpenseTypeDoc {
            name: self.name.clone(),
            category_id: self.category_id.clone(),
            main_category_id: self.main_category_id.map(|c| c.id().to_string()),
            group: self.group.clone(),
        }
    }

    fn from_fields(id: String, fields: ExpenseTypeDoc) -> Self {
        Self {
            id,
            name: fields.name,
            category_id: fields.category_id,
            main_category_id: fields
                .main_category_id
                .as_deref()
                .map(MainCategory::classify),
            group: fields.group,
        }
    }
}

impl Patch for ExpenseTypePatch {}

/// Stored shape of a [`BudgetItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItemDoc {
    /// Display name
    pub name: String,
    /// Planned amount
    pub amount: Decimal,
    /// Budget year
    pub year: i32,
    /// Budget month
    pub month: u32,
    /// Owning expense category
    pub category_id: String,
    /// Planned expense type
    #[serde(default)]
    pub expense_type_id: Option<String>,
}

impl Document for BudgetItem {
    const COLLECTION: &'static str = "budgetItems";
    type Fields = BudgetItemDoc;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> BudgetItemDoc {
        BudgetItemDoc {
            name: self.name.clone(),
            amount: self.amount,
            year: self.year,
            month: self.month,
            category_id: self.category_id.clone(),
            expense_type_id: self.expense_type_id.clone(),
        }
    }

    fn from_fields(id: String, fields: BudgetItemDoc) -> Self {
        Self {
            id,
            name: fields.name,
            amount: fields.amount,
            year: fields.year,
            month: fields.month,
            category_id: fields.category_id,
            expense_type_id: fields.expense_type_id,
        }
    }
}

impl Patch for BudgetItemPatch {}

/// Stored shape of a [`BudgetDebit`]. The document id is the debit key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDebitDoc {
    /// Period year
    pub year: i32,
    /// Period month
    pub month: u32,
    /// Category scope
    #[serde(default)]
    pub category_id: Option<String>,
    /// Declared amount
    pub amount: Decimal,
}

impl Document for BudgetDebit {
    const COLLECTION: &'static str = "budgetDebits";
    type Fields = BudgetDebitDoc;

    fn id(&self) -> &str {
        self.key()
    }

    fn to_fields(&self) -> BudgetDebitDoc {
        BudgetDebitDoc {
            year: self.year,
            month: self.month,
            category_id: self.category_id.clone(),
            amount: self.amount,
        }
    }

    fn from_fields(_id: String, fields: BudgetDebitDoc) -> Self {
        Self::new(fields.year, fields.month, fields.category_id, fields.amount)
    }
}
