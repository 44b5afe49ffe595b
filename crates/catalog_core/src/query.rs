use url::form_urlencoded;

/// Items per page for every paginated branch.
pub const PAGE_SIZE: usize = 20;
/// Lower bound of the bulk fetch used by free-text search.
pub const SEARCH_MIN_FETCH: usize = 200;

const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    Id,
    Name,
    Height,
    Weight,
    /// Unrecognized key, kept verbatim. Sorting with it is a no-op.
    Other(String),
}

impl SortKey {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "id" => SortKey::Id,
            "name" => SortKey::Name,
            "height" => SortKey::Height,
            "weight" => SortKey::Weight,
            other => SortKey::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            SortKey::Id => "id",
            SortKey::Name => "name",
            SortKey::Height => "height",
            SortKey::Weight => "weight",
            SortKey::Other(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Normalized user intent. `None` always means "no constraint".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuerySnapshot {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<SortKey>,
    pub order: Option<SortOrder>,
    pub page: Option<u32>,
    pub favorites: bool,
}

impl QuerySnapshot {
    pub fn order(&self) -> SortOrder {
        self.order.unwrap_or_default()
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    /// True when the snapshot narrows the catalog (search, category or favorites).
    pub fn is_filtered(&self) -> bool {
        self.search.is_some() || self.category.is_some() || self.favorites
    }

    /// Set (`Some`) or clear (`None`) one parameter. Changing anything other
    /// than `page` resets pagination.
    pub fn with_update(&self, key: &str, value: Option<&str>) -> QuerySnapshot {
        let mut pairs: Vec<(String, String)> = self
            .to_pairs()
            .into_iter()
            .filter(|(k, _)| k != key)
            .collect();
        if key != "page" {
            pairs.retain(|(k, _)| k != "page");
        }
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            pairs.push((key.to_string(), value.to_string()));
        }
        parse_query(pairs)
    }

    fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.search {
            pairs.push(("q".to_string(), q.clone()));
        }
        if let Some(category) = &self.category {
            pairs.push(("type".to_string(), category.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.as_str().to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("order".to_string(), order.as_str().to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if self.favorites {
            pairs.push(("favorites".to_string(), "true".to_string()));
        }
        pairs
    }
}

/// Map raw key/value parameters to a snapshot. The first occurrence of a key
/// wins; unknown keys are ignored and malformed values become absent.
pub fn parse_query<I, K, V>(params: I) -> QuerySnapshot
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut snapshot = QuerySnapshot::default();
    let mut seen: Vec<String> = Vec::new();

    for (key, value) in params {
        let key = key.as_ref();
        if seen.iter().any(|k| k == key) {
            continue;
        }
        seen.push(key.to_string());

        let value = value.as_ref();
        if value.is_empty() {
            continue;
        }
        match key {
            "q" => snapshot.search = Some(value.to_string()),
            "type" if value != ALL_CATEGORIES => snapshot.category = Some(value.to_string()),
            "sort" => snapshot.sort = Some(SortKey::parse(value)),
            "order" => snapshot.order = SortOrder::parse(value),
            "page" => snapshot.page = value.parse::<u32>().ok().filter(|page| *page > 0),
            "favorites" => snapshot.favorites = value == "true",
            _ => {}
        }
    }

    snapshot
}

/// Parse a URL query string, with or without the leading `?`.
pub fn parse_query_str(raw: &str) -> QuerySnapshot {
    let raw = raw.strip_prefix('?').unwrap_or(raw);
    parse_query(form_urlencoded::parse(raw.as_bytes()))
}

/// Inverse of [`parse_query_str`]: `q,type,sort,order,page,favorites`, absent
/// fields skipped.
pub fn encode_query(snapshot: &QuerySnapshot) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in snapshot.to_pairs() {
        serializer.append_pair(&key, &value);
    }
    serializer.finish()
}
