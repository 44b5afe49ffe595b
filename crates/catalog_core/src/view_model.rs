use crate::CatalogItem;

/// Why the list is empty, for front ends that show a message instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// Search, category or favorites narrowed the catalog to nothing.
    NoMatches,
    NothingAvailable,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListViewModel {
    pub items: Vec<CatalogItem>,
    pub loading: bool,
    pub error: Option<String>,
    pub has_more: bool,
    pub current_page: u32,
    pub show_placeholders: bool,
    pub show_load_more: bool,
    pub empty_state: Option<EmptyState>,
    pub dirty: bool,
}
