//! Wishlist views: ranking, totals, and grouping by category.

use crate::{
    models::{WishCategory, WishItem},
    store::WishlistState,
};
use rust_decimal::Decimal;

/// Items ranked by their priority's order, then by name.
///
/// Items whose priority no longer exists sort after every ranked item.
#[must_use]
pub fn items_by_priority(wishlist: &WishlistState) -> Vec<&WishItem> {
    let rank = |item: &WishItem| {
        wishlist
            .priority(&item.priority_id)
            .map_or(u32::MAX, |priority| priority.order)
    };
    let mut items: Vec<&WishItem> = wishlist.items().iter().collect();
    items.sort_by(|a, b| rank(*a).cmp(&rank(*b)).then_with(|| a.name.cmp(&b.name)));
    items
}

/// Counts and amounts split by whether an item is done.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WishlistTotals {
    /// Items still wanted
    pub open_count: usize,
    /// Approximate cost of everything still wanted
    pub open_total: Decimal,
    /// Items already bought
    pub done_count: usize,
    /// Approximate cost of what was bought
    pub done_total: Decimal,
}

/// Totals over `items`.
#[must_use]
pub fn wishlist_totals(items: &[WishItem]) -> WishlistTotals {
    items
        .iter()
        .fold(WishlistTotals::default(), |mut totals, item| {
            if item.done {
                totals.done_count += 1;
                totals.done_total += item.approximate_amount;
            } else {
                totals.open_count += 1;
                totals.open_total += item.approximate_amount;
            }
            totals
        })
}

/// Items filed under one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WishGroup<'a> {
    /// The category, or `None` for uncategorized items
    pub category: Option<&'a WishCategory>,
    /// Items in priority order
    pub items: Vec<&'a WishItem>,
    /// Approximate cost of the open items in the group
    pub open_total: Decimal,
}

/// Groups items by category, categories by name, uncategorized last.
///
/// Categories with no items are kept so they can still be shown. An item pointing at a
/// category that no longer exists is treated as uncategorized.
#[must_use]
pub fn group_by_category(wishlist: &WishlistState) -> Vec<WishGroup<'_>> {
    let ranked = items_by_priority(wishlist);

    let mut categories: Vec<&WishCategory> = wishlist.categories().iter().collect();
    categories.sort_by(|a, b| a.name.cmp(&b.name));

    let mut groups: Vec<WishGroup<'_>> = categories
        .into_iter()
        .map(|category| group(Some(category), &ranked, |item| {
            item.category_id.as_deref() == Some(category.id.as_str())
        }))
        .collect();

    let uncategorized = group(None, &ranked, |item| {
        item.category_id
            .as_deref()
            .is_none_or(|id| wishlist.category(id).is_none())
    });
    if !uncategorized.items.is_empty() {
        groups.push(uncategorized);
    }
    groups
}

fn group<'a>(
    category: Option<&'a WishCategory>,
    ranked: &[&'a WishItem],
    belongs: impl Fn(&WishItem) -> bool,
) -> WishGroup<'a> {
    let items: Vec<&WishItem> = ranked.iter().copied().filter(|item| belongs(*item)).collect();
    let open_total = items
        .iter()
        .filter(|item| !item.done)
        .map(|item| item.approximate_amount)
        .sum();
    WishGroup {
        category,
        items,
        open_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn wishlist() -> WishlistState {
        let mut wishlist = WishlistState::default();
        wishlist.replace_priorities(vec![
            priority_type("p-low", "Low", 3),
            priority_type("p-high", "High", 1),
        ]);
        wishlist.replace_categories(vec![
            wish_category("c-out", "Outdoor"),
            wish_category("c-gad", "Gadgets"),
            wish_category("c-empty", "Books"),
        ]);
        wishlist.replace_items(vec![
            wish_item("w1", "Tent", 9000, "p-low", Some("c-out"), false),
            wish_item("w2", "Bicycle", 18_000, "p-high", Some("c-out"), false),
            wish_item("w3", "Headphones", 4500, "p-high", Some("c-gad"), true),
            wish_item("w4", "Lamp", 1200, "p-gone", None, false),
            wish_item("w5", "Kite", 300, "p-low", Some("c-deleted"), false),
        ]);
        wishlist
    }

    #[test]
    fn test_items_by_priority() {
        let wishlist = wishlist();
        let names: Vec<_> = items_by_priority(&wishlist)
            .iter()
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(names, ["Bicycle", "Headphones", "Kite", "Tent", "Lamp"]);
    }

    #[test]
    fn test_totals_split_done() {
        let totals = wishlist_totals(wishlist().items());
        assert_eq!(totals.open_count, 4);
        assert_eq!(totals.open_total, Decimal::from(28_500));
        assert_eq!(totals.done_count, 1);
        assert_eq!(totals.done_total, Decimal::from(4500));
        assert_eq!(wishlist_totals(&[]), WishlistTotals::default());
    }

    #[test]
    fn test_group_by_category() {
        let wishlist = wishlist();
        let groups = group_by_category(&wishlist);
        let labels: Vec<_> = groups
            .iter()
            .map(|g| g.category.map_or("-", |c| c.name.as_str()))
            .collect();
        assert_eq!(labels, ["Books", "Gadgets", "Outdoor", "-"]);

        assert!(groups[0].items.is_empty());
        assert_eq!(groups[1].open_total, Decimal::ZERO);
        assert_eq!(groups[2].open_total, Decimal::from(27_000));
        assert_eq!(groups[2].items[0].name, "Bicycle");
        assert_eq!(groups[3].items.len(), 2);
    }
}
