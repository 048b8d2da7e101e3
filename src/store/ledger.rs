//! Ledger slice of the Local Store: entries, expense classification, and budgets.

use super::collection::Collection;
use crate::{
    document::{Document, Patch},
    errors::Result,
    models::{
        BudgetDebit, BudgetItem, BudgetItemPatch, Entry, EntryPatch, ExpenseCategory,
        ExpenseCategoryPatch, ExpenseType, ExpenseTypePatch, NewBudgetItem, NewEntry,
        NewExpenseCategory, NewExpenseType,
    },
    validation,
};
use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn patch_record<T, P>(collection: &mut Collection<T>, id: &str, patch: &P) -> bool
where
    T: Document,
    P: Patch,
{
    match patch.to_merge_patch() {
        Ok(fields) => collection.patch(id, &fields),
        Err(e) => {
            warn!(collection = T::COLLECTION, id, "Could not serialize patch: {}", e);
            false
        }
    }
}

/// Logs and reports `false` when a patch fails write-boundary validation.
pub(crate) fn accepted(collection: &'static str, id: &str, check: Result<()>) -> bool {
    match check {
        Ok(()) => true,
        Err(e) => {
            warn!(collection, id, "Rejected patch: {}", e);
            false
        }
    }
}

/// Ledger entries, expense categories and types, budget items, and declared debits.
///
/// Fields are private; state changes only through the transitions below. `update_*` and
/// `remove_*` on an unknown id do nothing and report `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    entries: Collection<Entry>,
    expense_categories: Collection<ExpenseCategory>,
    expense_types: Collection<ExpenseType>,
    budget_items: Collection<BudgetItem>,
    budget_debits: Collection<BudgetDebit>,
}

impl LedgerState {
    /// All entries.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        self.entries.as_slice()
    }

    /// One entry by id.
    #[must_use]
    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.get(id)
    }

    /// All expense categories.
    #[must_use]
    pub fn expense_categories(&self) -> &[ExpenseCategory] {
        self.expense_categories.as_slice()
    }

    /// One expense category by id.
    #[must_use]
    pub fn expense_category(&self, id: &str) -> Option<&ExpenseCategory> {
        self.expense_categories.get(id)
    }

    /// All expense types.
    #[must_use]
    pub fn expense_types(&self) -> &[ExpenseType] {
        self.expense_types.as_slice()
    }

    /// One expense type by id.
    #[must_use]
    pub fn expense_type(&self, id: &str) -> Option<&ExpenseType> {
        self.expense_types.get(id)
    }

    /// All budget items.
    #[must_use]
    pub fn budget_items(&self) -> &[BudgetItem] {
        self.budget_items.as_slice()
    }

    /// All declared debits.
    #[must_use]
    pub fn budget_debits(&self) -> &[BudgetDebit] {
        self.budget_debits.as_slice()
    }

    /// Declared debit for a period and optional category scope.
    #[must_use]
    pub fn budget_debit(&self, year: i32, month: u32, category_id: Option<&str>) -> Option<&BudgetDebit> {
        self.budget_debits
            .get(&BudgetDebit::key_for(year, month, category_id))
    }

    // --- entries ---

    /// Adds an entry with a fresh id and creation time.
    pub fn add_entry(&mut self, entry: NewEntry) -> Result<String> {
        validation::new_entry(&entry)?;
        let id = new_id();
        self.entries.upsert(entry.into_entry(id.clone(), Utc::now()));
        debug!(id = %id, "Added entry to local store");
        Ok(id)
    }

    /// Merges a patch into an entry.
    pub fn update_entry(&mut self, id: &str, patch: &EntryPatch) -> bool {
        let Some(current) = self.entries.get(id) else {
            return false;
        };
        accepted(Entry::COLLECTION, id, validation::entry_update(current, patch))
            && patch_record(&mut self.entries, id, patch)
    }

    /// Removes an entry.
    pub fn remove_entry(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Replaces all entries.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        self.entries.replace_all(entries);
    }

    // --- expense categories ---

    /// Adds an expense category with a fresh id.
    pub fn add_expense_category(&mut self, category: NewExpenseCategory) -> Result<String> {
        validation::new_expense_category(&category)?;
        let id = new_id();
        self.expense_categories.upsert(ExpenseCategory {
            id: id.clone(),
            name: category.name,
            icon: category.icon,
            gradient_preset: category.gradient_preset,
        });
        Ok(id)
    }

    /// Merges a patch into an expense category.
    pub fn update_expense_category(&mut self, id: &str, patch: &ExpenseCategoryPatch) -> bool {
        patch_record(&mut self.expense_categories, id, patch)
    }

    /// Removes an expense category. Types and budget items keep their reference.
    pub fn remove_expense_category(&mut self, id: &str) -> bool {
        self.expense_categories.remove(id).is_some()
    }

    /// Replaces all expense categories.
    pub fn replace_expense_categories(&mut self, categories: Vec<ExpenseCategory>) {
        self.expense_categories.replace_all(categories);
    }

    // --- expense types ---

    /// Adds an expense type with a fresh id.
    pub fn add_expense_type(&mut self, expense_type: NewExpenseType) -> Result<String> {
        validation::new_expense_type(&expense_type)?;
        let id = new_id();
        self.expense_types.upsert(ExpenseType {
            id: id.clone(),
            name: expense_type.name,
            category_id: expense_type.category_id,
            main_category_id: expense_type.main_category_id,
            group: expense_type.group,
        });
        Ok(id)
    }

    /// Merges a patch into an expense type.
    pub fn update_expense_type(&mut self, id: &str, patch: &ExpenseTypePatch) -> bool {
        patch_record(&mut self.expense_types, id, patch)
    }

    /// Removes an expense type.
    pub fn remove_expense_type(&mut self, id: &str) -> bool {
        self.expense_types.remove(id).is_some()
    }

    /// Replaces all expense types.
    pub fn replace_expense_types(&mut self, types: Vec<ExpenseType>) {
        self.expense_types.replace_all(types);
    }

    // --- budget items ---

    /// Adds a budget item with a fresh id.
    pub fn add_budget_item(&mut self, item: NewBudgetItem) -> Result<String> {
        validation::new_budget_item(&item)?;
        let id = new_id();
        self.budget_items.upsert(BudgetItem {
            id: id.clone(),
            name: item.name,
            amount: item.amount,
            year: item.year,
            month: item.month,
            category_id: item.category_id,
            expense_type_id: item.expense_type_id,
        });
        Ok(id)
    }

    /// Merges a patch into a budget item.
    pub fn update_budget_item(&mut self, id: &str, patch: &BudgetItemPatch) -> bool {
        accepted(BudgetItem::COLLECTION, id, validation::budget_item_patch(patch))
            && patch_record(&mut self.budget_items, id, patch)
    }

    /// Removes a budget item.
    pub fn remove_budget_item(&mut self, id: &str) -> bool {
        self.budget_items.remove(id).is_some()
    }

    /// Replaces all budget items.
    pub fn replace_budget_items(&mut self, items: Vec<BudgetItem>) {
        self.budget_items.replace_all(items);
    }

    // --- budget debits ---

    /// Declares the income for a period, replacing any earlier declaration for the same key.
    pub fn set_budget_debit(&mut self, debit: BudgetDebit) -> Result<()> {
        validation::budget_debit(&debit)?;
        self.budget_debits.upsert(debit);
        Ok(())
    }

    /// Removes a declared debit by key.
    pub fn remove_budget_debit(&mut self, key: &str) -> bool {
        self.budget_debits.remove(key).is_some()
    }

    /// Replaces all declared debits.
    pub fn replace_budget_debits(&mut self, debits: Vec<BudgetDebit>) {
        self.budget_debits.replace_all(debits);
    }
}
