//! Ledger entries - income and expense transactions plus day-notes.
//!
//! A day-note is a free-text annotation attached to a calendar day within a category. It is
//! modelled as its own [`EntryBody`] variant so that a zero amount is never ambiguous.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fixed top-level classification used for dashboard-level aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MainCategory {
    /// Household shopping
    Basar,
    /// Business
    Bebosar,
    /// Education
    Study,
    /// Health
    Medicine,
    /// Everything not covered above
    Other,
}

impl MainCategory {
    /// Every main category, in display order.
    pub const ALL: [Self; 5] = [
        Self::Basar,
        Self::Bebosar,
        Self::Study,
        Self::Medicine,
        Self::Other,
    ];

    /// Persisted identifier.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Basar => "basar",
            Self::Bebosar => "bebosar",
            Self::Study => "study",
            Self::Medicine => "medicine",
            Self::Other => "other",
        }
    }

    /// Maps a raw category id to a main category. Unknown ids become [`MainCategory::Other`].
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|category| category.id() == raw.trim())
            .unwrap_or(Self::Other)
    }
}

/// Direction of money for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Money coming in (the "debit" side in this domain)
    Income,
    /// Money going out (the "credit" side in this domain)
    Expense,
}

/// What an entry records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryBody {
    /// A real money movement
    Transaction {
        /// Income or expense
        flow: Flow,
        /// Non-negative amount
        amount: Decimal,
        /// Optional link to an [`crate::models::ExpenseType`]
        expense_type_id: Option<String>,
    },
    /// A note attached to a day; carries no money
    DayNote,
}

/// One ledger entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Unique identifier
    pub id: String,
    /// Transaction or day-note payload
    pub body: EntryBody,
    /// Raw category id as stored; see [`MainCategory::classify`]
    pub category: String,
    /// Free text
    pub description: Option<String>,
    /// Calendar date of the entry
    pub date: NaiveDate,
    /// Month of `date`, stamped at write time
    pub month: u32,
    /// Year of `date`, stamped at write time
    pub year: i32,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
}

impl Entry {
    /// Amount of money moved; zero for day-notes.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        match &self.body {
            EntryBody::Transaction { amount, .. } => *amount,
            EntryBody::DayNote => Decimal::ZERO,
        }
    }

    /// Direction as persisted. Day-notes are stored on the expense side.
    #[must_use]
    pub const fn flow(&self) -> Flow {
        match &self.body {
            EntryBody::Transaction { flow, .. } => *flow,
            EntryBody::DayNote => Flow::Expense,
        }
    }

    /// Linked expense type, if any.
    #[must_use]
    pub fn expense_type_id(&self) -> Option<&str> {
        match &self.body {
            EntryBody::Transaction {
                expense_type_id, ..
            } => expense_type_id.as_deref(),
            EntryBody::DayNote => None,
        }
    }

    /// True for day-note annotations.
    #[must_use]
    pub const fn is_day_note(&self) -> bool {
        matches!(self.body, EntryBody::DayNote)
    }

    /// True for income transactions.
    #[must_use]
    pub const fn is_income(&self) -> bool {
        matches!(
            self.body,
            EntryBody::Transaction {
                flow: Flow::Income,
                ..
            }
        )
    }

    /// True for expense transactions (day-notes excluded).
    #[must_use]
    pub const fn is_expense(&self) -> bool {
        matches!(
            self.body,
            EntryBody::Transaction {
                flow: Flow::Expense,
                ..
            }
        )
    }

    /// Normalized main category of this entry.
    #[must_use]
    pub fn main_category(&self) -> MainCategory {
        MainCategory::classify(&self.category)
    }

    /// Whether the entry falls in `year`, and in `month` when one is given.
    ///
    /// Uses the denormalized `year`/`month` fields, not `date`.
    #[must_use]
    pub fn in_period(&self, year: i32, month: Option<u32>) -> bool {
        self.year == year && month.is_none_or(|m| self.month == m)
    }
}

/// Input for creating an entry. Identifier and creation metadata are assigned on add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    /// Transaction or day-note payload
    pub body: EntryBody,
    /// Raw category id
    pub category: String,
    /// Free text
    pub description: Option<String>,
    /// Calendar date
    pub date: NaiveDate,
}

impl NewEntry {
    /// A transaction without an expense type.
    pub fn transaction(flow: Flow, amount: Decimal, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            body: EntryBody::Transaction {
                flow,
                amount,
                expense_type_id: None,
            },
            category: category.into(),
            description: None,
            date,
        }
    }

    /// A day-note carrying `description` for `date` within `category`.
    pub fn day_note(
        category: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            body: EntryBody::DayNote,
            category: category.into(),
            description: Some(description.into()),
            date,
        }
    }

    /// Links the transaction to an expense type. Has no effect on day-notes.
    #[must_use]
    pub fn with_expense_type(mut self, type_id: impl Into<String>) -> Self {
        if let EntryBody::Transaction {
            expense_type_id, ..
        } = &mut self.body
        {
            *expense_type_id = Some(type_id.into());
        }
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builds the stored entry, stamping `month`/`year` from `date`.
    #[must_use]
    pub fn into_entry(self, id: String, created_at: DateTime<Utc>) -> Entry {
        Entry {
            id,
            month: self.date.month(),
            year: self.date.year(),
            body: self.body,
            category: self.category,
            description: self.description,
            date: self.date,
            created_at,
        }
    }
}

/// Partial update for an [`Entry`]. `None` leaves a field untouched; `Some(None)` clears it.
///
/// Changing `date` re-stamps `month` and `year`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    /// New amount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    /// New direction
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub flow: Option<Flow>,
    /// New raw category id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// New expense type link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expense_type_id: Option<Option<String>>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    /// New date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}
