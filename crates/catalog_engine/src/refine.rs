use std::cmp::Ordering;

use catalog_core::{CatalogItem, SortKey, SortOrder, PAGE_SIZE};

/// Case-insensitive substring match on the name.
pub fn filter_by_search(items: Vec<CatalogItem>, query: &str) -> Vec<CatalogItem> {
    let needle = query.to_lowercase();
    items
        .into_iter()
        .filter(|item| item.name.to_lowercase().contains(&needle))
        .collect()
}

pub fn filter_by_category(items: Vec<CatalogItem>, category: &str) -> Vec<CatalogItem> {
    items
        .into_iter()
        .filter(|item| item.has_category(category))
        .collect()
}

/// Stable sort. Descending negates the comparator rather than reversing the
/// result, so ties keep input order in both directions. Unrecognized keys
/// leave the order untouched.
pub fn sort_items(items: &mut [CatalogItem], key: &SortKey, order: SortOrder) {
    let compare: fn(&CatalogItem, &CatalogItem) -> Ordering = match key {
        SortKey::Id => |a: &CatalogItem, b: &CatalogItem| a.id.cmp(&b.id),
        SortKey::Name => |a: &CatalogItem, b: &CatalogItem| {
            a.name.to_lowercase().cmp(&b.name.to_lowercase())
        },
        SortKey::Height => |a: &CatalogItem, b: &CatalogItem| a.height.cmp(&b.height),
        SortKey::Weight => |a: &CatalogItem, b: &CatalogItem| a.weight.cmp(&b.weight),
        SortKey::Other(_) => return,
    };
    match order {
        SortOrder::Asc => items.sort_by(compare),
        SortOrder::Desc => items.sort_by(|a, b| compare(a, b).reverse()),
    }
}

/// Cut page `page` (1-based) out of the full result. The flag reports whether
/// anything follows the window.
pub fn window(items: Vec<CatalogItem>, page: u32) -> (Vec<CatalogItem>, bool) {
    let start = (page.max(1) as usize - 1) * PAGE_SIZE;
    let end = start + PAGE_SIZE;
    let has_more = end < items.len();
    let slice = items.into_iter().skip(start).take(PAGE_SIZE).collect();
    (slice, has_more)
}
