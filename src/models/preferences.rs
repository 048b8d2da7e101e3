//! Per-user display preferences, stored as one document keyed by user id.

use serde::{Deserialize, Serialize};

/// Light/dark mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light mode
    Light,
    /// Dark mode
    Dark,
    /// Follow the operating system
    #[default]
    #[serde(other)]
    System,
}

/// Display preferences of one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    /// Owner's user id; also the document id
    pub user_id: String,
    /// Light/dark mode
    pub theme: Theme,
    /// Accent palette name
    pub color_theme: String,
}

impl Preferences {
    /// Default preferences for a user.
    #[must_use]
    pub fn defaults_for(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            theme: Theme::default(),
            color_theme: "default".to_string(),
        }
    }
}
