//! User-defined expense classification: categories and the types grouped under them.

use super::MainCategory;
use serde::{Deserialize, Serialize};

/// Fixed palette of card gradients for an expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientPreset {
    /// Blue tones
    Ocean,
    /// Orange to pink
    Sunset,
    /// Greens
    Forest,
    /// Purple to red
    Berry,
    /// Yellow to orange
    Amber,
    /// Neutral greys; also used for unknown presets
    #[serde(other)]
    Slate,
}

/// Top-level grouping for expense types (e.g. "House", "Business").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseCategory {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Symbolic icon identifier
    pub icon: String,
    /// Card gradient
    pub gradient_preset: GradientPreset,
}

/// Input for creating an [`ExpenseCategory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenseCategory {
    /// Display name
    pub name: String,
    /// Symbolic icon identifier
    pub icon: String,
    /// Card gradient
    pub gradient_preset: GradientPreset,
}

/// Partial update for an [`ExpenseCategory`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategoryPatch {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// New gradient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_preset: Option<GradientPreset>,
}

/// A kind of expense within a category (e.g. "Electricity" under "House").
///
/// `category_id` drives the budget screens; `main_category_id` drives dashboard aggregation.
/// The two axes are independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseType {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Owning [`ExpenseCategory`]
    pub category_id: String,
    /// Dashboard classification
    pub main_category_id: Option<MainCategory>,
    /// Free grouping label
    pub group: Option<String>,
}

/// Input for creating an [`ExpenseType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpenseType {
    /// Display name
    pub name: String,
    /// Owning [`ExpenseCategory`]
    pub category_id: String,
    /// Dashboard classification
    pub main_category_id: Option<MainCategory>,
    /// Free grouping label
    pub group: Option<String>,
}

/// Partial update for an [`ExpenseType`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseTypePatch {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New owning category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    /// New dashboard classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_category_id: Option<Option<MainCategory>>,
    /// New grouping label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Option<String>>,
}
