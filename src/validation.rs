//! Write-boundary validation.
//!
//! Input is checked here before it reaches the Local Store or the remote store. Aggregation
//! never re-validates.

use crate::{
    errors::{Error, Result},
    models::{
        BudgetDebit, BudgetItemPatch, Entry, EntryBody, EntryPatch, NewBudgetItem, NewEntry,
        NewExpenseCategory, NewExpenseType, NewWishItem, NewWishPriorityType, WishItemPatch,
        WishPriorityPatch,
    },
};
use rust_decimal::Decimal;

/// Amounts are stored as JSON numbers; up to this many significant digits survive exactly.
const MAX_SIGNIFICANT_DIGITS: u32 = 15;

/// Amounts must be zero or positive and fit in a stored number without losing digits.
pub fn amount(field: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(Error::validation(
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    if value.normalize().mantissa().abs() >= 10_i128.pow(MAX_SIGNIFICANT_DIGITS) {
        return Err(Error::validation(
            field,
            format!("must have at most {MAX_SIGNIFICANT_DIGITS} significant digits (got {value})"),
        ));
    }
    Ok(())
}

/// Required text must contain something besides whitespace.
pub fn required(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "must not be empty"));
    }
    Ok(())
}

/// Months are 1 through 12.
pub fn month(value: u32) -> Result<()> {
    if !(1..=12).contains(&value) {
        return Err(Error::validation(
            "month",
            format!("must be between 1 and 12 (got {value})"),
        ));
    }
    Ok(())
}

/// Priority orders start at 1.
pub fn order(value: u32) -> Result<()> {
    if value == 0 {
        return Err(Error::validation("order", "must be 1 or greater"));
    }
    Ok(())
}

/// Checks a new entry. An untyped transaction of zero is ambiguous with a day-note and is
/// rejected; callers record notes with [`NewEntry::day_note`].
pub fn new_entry(entry: &NewEntry) -> Result<()> {
    required("category", &entry.category)?;
    match &entry.body {
        EntryBody::Transaction {
            amount: value,
            expense_type_id,
            ..
        } => {
            amount("amount", *value)?;
            if value.is_zero() && expense_type_id.is_none() {
                return Err(Error::validation(
                    "amount",
                    "must be greater than zero (record a day-note instead)",
                ));
            }
        }
        EntryBody::DayNote => {
            if entry
                .description
                .as_deref()
                .is_none_or(|d| d.trim().is_empty())
            {
                return Err(Error::validation("description", "a day-note needs text"));
            }
        }
    }
    Ok(())
}

/// Checks an entry patch.
pub fn entry_patch(patch: &EntryPatch) -> Result<()> {
    if let Some(value) = patch.amount {
        amount("amount", value)?;
    }
    if let Some(category) = &patch.category {
        required("category", category)?;
    }
    Ok(())
}

/// Checks `patch` against the entry it will be merged into.
///
/// A patch never moves a record between transaction and day-note. A transaction must not end
/// up untyped at zero, and a day-note keeps its text and carries no money fields.
pub fn entry_update(current: &Entry, patch: &EntryPatch) -> Result<()> {
    entry_patch(patch)?;
    match &current.body {
        EntryBody::Transaction {
            amount: value,
            expense_type_id,
            ..
        } => {
            let amount = patch.amount.unwrap_or(*value);
            let typed = match &patch.expense_type_id {
                Some(next) => next.is_some(),
                None => expense_type_id.is_some(),
            };
            if amount.is_zero() && !typed {
                return Err(Error::validation(
                    "amount",
                    "must be greater than zero (record a day-note instead)",
                ));
            }
        }
        EntryBody::DayNote => {
            if patch.amount.is_some() || patch.flow.is_some() {
                return Err(Error::validation("amount", "a day-note carries no money"));
            }
            if matches!(patch.expense_type_id, Some(Some(_))) {
                return Err(Error::validation(
                    "expenseTypeId",
                    "a day-note has no expense type",
                ));
            }
            if matches!(
                &patch.description,
                Some(description) if description.as_deref().is_none_or(|d| d.trim().is_empty())
            ) {
                return Err(Error::validation("description", "a day-note needs text"));
            }
        }
    }
    Ok(())
}

/// Checks a new expense category.
pub fn new_expense_category(category: &NewExpenseCategory) -> Result<()> {
    required("name", &category.name)
}

/// Checks a new expense type.
pub fn new_expense_type(expense_type: &NewExpenseType) -> Result<()> {
    required("name", &expense_type.name)?;
    required("categoryId", &expense_type.category_id)
}

/// Checks a new budget item.
pub fn new_budget_item(item: &NewBudgetItem) -> Result<()> {
    required("name", &item.name)?;
    required("categoryId", &item.category_id)?;
    amount("amount", item.amount)?;
    month(item.month)
}

/// Checks a budget item patch.
pub fn budget_item_patch(patch: &BudgetItemPatch) -> Result<()> {
    if let Some(value) = patch.amount {
        amount("amount", value)?;
    }
    if let Some(name) = &patch.name {
        required("name", name)?;
    }
    Ok(())
}

/// Checks a declared period income.
pub fn budget_debit(debit: &BudgetDebit) -> Result<()> {
    amount("amount", debit.amount)?;
    month(debit.month)
}

/// Checks a new wishlist item.
pub fn new_wish_item(item: &NewWishItem) -> Result<()> {
    required("name", &item.name)?;
    required("priorityId", &item.priority_id)?;
    amount("approximateAmount", item.approximate_amount)
}

/// Checks a wishlist item patch.
pub fn wish_item_patch(patch: &WishItemPatch) -> Result<()> {
    if let Some(value) = patch.approximate_amount {
        amount("approximateAmount", value)?;
    }
    if let Some(name) = &patch.name {
        required("name", name)?;
    }
    Ok(())
}

/// Checks a new priority type.
pub fn new_priority(priority: &NewWishPriorityType) -> Result<()> {
    required("name", &priority.name)?;
    order(priority.order)
}

/// Checks a priority type patch.
pub fn priority_patch(patch: &WishPriorityPatch) -> Result<()> {
    if let Some(value) = patch.order {
        order(value)?;
    }
    if let Some(name) = &patch.name {
        required("name", name)?;
    }
    Ok(())
}
