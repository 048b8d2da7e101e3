//! Wishlist records: things to buy later, grouped by category and ranked by priority.

use rust_decimal::Decimal;
use serde::Serialize;

/// A wishlist grouping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishCategory {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// Partial update for a [`WishCategory`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WishCategoryPatch {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A priority level. `order` is unique across priority types; 1 is the highest priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishPriorityType {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Rank, 1 = highest
    pub order: u32,
}

/// Input for creating a [`WishPriorityType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWishPriorityType {
    /// Display name
    pub name: String,
    /// Rank, 1 = highest
    pub order: u32,
}

/// Partial update for a [`WishPriorityType`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WishPriorityPatch {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New rank
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Something the user would like to buy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishItem {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Rough price
    pub approximate_amount: Decimal,
    /// Assigned [`WishPriorityType`]
    pub priority_id: String,
    /// Symbolic icon identifier
    pub icon_type: String,
    /// Optional [`WishCategory`]
    pub category_id: Option<String>,
    /// Whether the wish has been fulfilled
    pub done: bool,
}

/// Input for creating a [`WishItem`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWishItem {
    /// Display name
    pub name: String,
    /// Rough price
    pub approximate_amount: Decimal,
    /// Assigned priority type
    pub priority_id: String,
    /// Symbolic icon identifier
    pub icon_type: String,
    /// Optional category
    pub category_id: Option<String>,
}

/// Partial update for a [`WishItem`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishItemPatch {
    /// New name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New rough price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approximate_amount: Option<Decimal>,
    /// New priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<String>,
    /// New icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<String>,
    /// New category link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Option<String>>,
    /// Fulfilled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}
