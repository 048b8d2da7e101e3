//! Document shapes for the wishlist and user preferences.

use super::{Document, Patch};
use crate::models::{
    Preferences, Theme, WishCategory, WishCategoryPatch, WishItem, WishItemPatch,
    WishPriorityPatch, WishPriorityType,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stored shape of a [`WishCategory`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishCategoryDoc {
    /// Display name
    pub name: String,
}

impl Document for WishCategory {
    const COLLECTION: &'static str = "wishlistCategories";
    type Fields = WishCategoryDoc;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> WishCategoryDoc {
        WishCategoryDoc {
            name: self.name.clone(),
        }
    }

    fn from_fields(id: String, fields: WishCategoryDoc) -> Self {
        Self {
            id,
            name: fields.name,
        }
    }
}

impl Patch for WishCategoryPatch {}

/// Stored shape of a [`WishPriorityType`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WishPriorityDoc {
    /// Display name
    pub name: String,
    /// Rank, 1 = highest
    pub order: u32,
}

impl Document for WishPriorityType {
    const COLLECTION: &'static str = "wishlistPriorities";
    type Fields = WishPriorityDoc;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> WishPriorityDoc {
        WishPriorityDoc {
            name: self.name.clone(),
            order: self.order,
        }
    }

    fn from_fields(id: String, fields: WishPriorityDoc) -> Self {
        Self {
            id,
            name: fields.name,
            order: fields.order,
        }
    }
}

impl Patch for WishPriorityPatch {}

/// Stored shape of a [`WishItem`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishItemDoc {
    /// Display name
    pub name: String,
    /// Rough price
    pub approximate_amount: Decimal,
    /// Assigned priority type
    pub priority_id: String,
    /// Icon identifier
    #[serde(default)]
    pub icon_type: Option<String>,
    /// Optional category
    #[serde(default)]
    pub category_id: Option<String>,
    /// Fulfilled flag
    #[serde(default)]
    pub done: Option<bool>,
}

impl Document for WishItem {
    const COLLECTION: &'static str = "wishlistItems";
    type Fields = WishItemDoc;

    fn id(&self) -> &str {
        &self.id
    }

    fn to_fields(&self) -> WishItemDoc {
        WishItemDoc {
            name: self.name.clone(),
            approximate_amount: self.approximate_amount,
            priority_id: self.priority_id.clone(),
            icon_type: Some(self.icon_type.clone()),
            category_id: self.category_id.clone(),
            done: Some(self.done),
        }
    }

    fn from_fields(id: String, fields: WishItemDoc) -> Self {
        Self {
            id,
            name: fields.name,
            approximate_amount: fields.approximate_amount,
            priority_id: fields.priority_id,
            icon_type: fields.icon_type.unwrap_or_default(),
            category_id: fields.category_id,
            done: fields.done.unwrap_or(false),
        }
    }
}

impl Patch for WishItemPatch {}

/// Stored shape of [`Preferences`]. The document id is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesDoc {
    /// Light/dark mode
    #[serde(default)]
    pub theme: Option<Theme>,
    /// Accent palette
    #[serde(default)]
    pub color_theme: Option<String>,
}

impl Document for Preferences {
    const COLLECTION: &'static str = "preferences";
    type Fields = PreferencesDoc;

    fn id(&self) -> &str {
        &self.user_id
    }

    fn to_fields(&self) -> PreferencesDoc {
        PreferencesDoc {
            theme: Some(self.theme),
            color_theme: Some(self.color_theme.clone()),
        }
    }

    fn from_fields(id: String, fields: PreferencesDoc) -> Self {
        let defaults = Self::defaults_for(id);
        Self {
            theme: fields.theme.unwrap_or(defaults.theme),
            color_theme: fields.color_theme.unwrap_or(defaults.color_theme),
            user_id: defaults.user_id,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::document::from_body;
    use serde_json::json;

    #[test]
    fn test_wish_item_null_done_reads_as_open() {
        let body = json!({
            "name": "Bicycle", "approximateAmount": 15000, "priorityId": "p1",
            "iconType": "bike", "categoryId": null, "done": null
        });
        let item: WishItem = from_body("w1", body).unwrap();
        assert!(!item.done);
        assert_eq!(item.category_id, None);
        assert_eq!(item.approximate_amount, Decimal::from(15_000));
    }

    #[test]
    fn test_preferences_fill_defaults() {
        let prefs: Preferences = from_body("u1", json!({"theme": "dark"})).unwrap();
        assert_eq!(prefs.theme, Theme::Dark);
        assert_eq!(prefs.color_theme, "default");
        assert_eq!(prefs.user_id, "u1");
    }
}
