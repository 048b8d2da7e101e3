//! Domain model - plain data for ledger entries, budgets, and the wishlist.
//!
//! Types here carry no persistence concerns. The document shape each one is stored in lives in
//! [`crate::document`].

pub mod budget;
pub mod entry;
pub mod expense;
pub mod preferences;
pub mod wishlist;

pub use budget::{BudgetDebit, BudgetItem, BudgetItemPatch, NewBudgetItem};
pub use entry::{Entry, EntryBody, EntryPatch, Flow, MainCategory, NewEntry};
pub use expense::{
    ExpenseCategory, ExpenseCategoryPatch, ExpenseType, ExpenseTypePatch, GradientPreset,
    NewExpenseCategory, NewExpenseType,
};
pub use preferences::{Preferences, Theme};
pub use wishlist::{
    NewWishItem, NewWishPriorityType, WishCategory, WishCategoryPatch, WishItem, WishItemPatch,
    WishPriorityPatch, WishPriorityType,
};
