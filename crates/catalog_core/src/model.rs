use url::Url;

pub type ItemId = u64;

const ARTWORK_BASE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// A fully hydrated catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub categories: Vec<String>,
    pub height: u32,
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub stats: Vec<ItemStat>,
    pub traits: Vec<ItemTrait>,
    pub images: ImageRefs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStat {
    pub name: String,
    pub magnitude: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTrait {
    pub name: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageRefs {
    pub front_default: Option<String>,
    pub artwork: Option<String>,
}

impl CatalogItem {
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    /// Official artwork, derived from the identifier when the record carries none.
    pub fn artwork_url(&self) -> String {
        self.images
            .artwork
            .clone()
            .unwrap_or_else(|| artwork_url(self.id))
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn total_stats(&self) -> i64 {
        self.stats.iter().map(|s| s.magnitude).sum()
    }

    pub fn max_stat(&self) -> Option<i64> {
        self.stats.iter().map(|s| s.magnitude).max()
    }
}

/// Lightweight pointer into the catalog, used before hydration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingReference {
    pub name: String,
    pub locator: String,
}

impl ListingReference {
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            locator: locator.into(),
        }
    }

    pub fn id(&self) -> Option<ItemId> {
        id_from_locator(&self.locator)
    }

    /// Key used to hydrate this reference: the numeric id when the locator
    /// carries one, otherwise the name.
    pub fn lookup_key(&self) -> String {
        match self.id() {
            Some(id) => id.to_string(),
            None => self.name.clone(),
        }
    }
}

/// One page of resolved items.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPage {
    pub items: Vec<CatalogItem>,
    pub has_more: bool,
    pub page: u32,
}

/// Recover the numeric identifier from a locator such as `.../pokemon/25/`.
///
/// Takes the last non-empty path segment and requires it to be all digits.
pub fn id_from_locator(locator: &str) -> Option<ItemId> {
    let segment = match Url::parse(locator) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .map(ToOwned::to_owned),
        Err(_) => locator
            .split('/')
            .filter(|s| !s.is_empty())
            .last()
            .map(ToOwned::to_owned),
    }?;
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn artwork_url(id: ItemId) -> String {
    format!("{ARTWORK_BASE}/{id}.png")
}
