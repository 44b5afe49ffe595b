use std::sync::Arc;

use catalog_core::{CatalogItem, QuerySnapshot, ResultPage, PAGE_SIZE, SEARCH_MIN_FETCH};
use engine_logging::{engine_debug, engine_warn};
use futures_util::future::join_all;
use tokio_util::sync::CancellationToken;

use crate::client::CatalogSource;
use crate::favorites::FavoriteSource;
use crate::refine::{filter_by_category, filter_by_search, sort_items, window};
use crate::ResolveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub append: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Favorites,
    Category,
    Search,
    Default,
}

impl Mode {
    fn of(snapshot: &QuerySnapshot) -> Self {
        if snapshot.favorites {
            Mode::Favorites
        } else if snapshot.category.is_some() {
            Mode::Category
        } else if snapshot.search.as_deref().is_some_and(|q| !q.is_empty()) {
            Mode::Search
        } else {
            Mode::Default
        }
    }
}

/// Turns a query snapshot into one page of hydrated items.
///
/// Each branch fetches its candidates, hydrates them concurrently, then
/// filters, sorts and paginates. A cancelled token is checked after every
/// suspension point; work that finishes after cancellation is discarded.
pub struct ResultPipeline {
    source: Arc<dyn CatalogSource>,
    favorites: Arc<dyn FavoriteSource>,
}

impl ResultPipeline {
    pub fn new(source: Arc<dyn CatalogSource>, favorites: Arc<dyn FavoriteSource>) -> Self {
        Self { source, favorites }
    }

    pub fn source(&self) -> &Arc<dyn CatalogSource> {
        &self.source
    }

    pub async fn resolve(
        &self,
        snapshot: &QuerySnapshot,
        request: PageRequest,
        cancel: &CancellationToken,
    ) -> Result<ResultPage, ResolveError> {
        checkpoint(cancel)?;
        let page = request.page.max(1);
        let mode = Mode::of(snapshot);
        engine_debug!(
            "resolve mode={:?} page={} append={}",
            mode,
            page,
            request.append
        );

        let result = match mode {
            Mode::Favorites => self.resolve_favorites(snapshot, page, cancel).await,
            Mode::Category => self.resolve_category(snapshot, page, cancel).await,
            Mode::Search => self.resolve_search(snapshot, page, cancel).await,
            Mode::Default => self.resolve_default(snapshot, page, cancel).await,
        };

        // A failure observed after supersession is reported as cancellation.
        match result {
            Err(ResolveError::Remote(_)) if cancel.is_cancelled() => Err(ResolveError::Cancelled),
            other => other,
        }
    }

    async fn resolve_favorites(
        &self,
        snapshot: &QuerySnapshot,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<ResultPage, ResolveError> {
        let ids = self.favorites.favorite_ids();
        if ids.is_empty() {
            return Ok(ResultPage {
                items: Vec::new(),
                has_more: false,
                page,
            });
        }

        let keys: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let mut items = self.hydrate(&keys).await;
        checkpoint(cancel)?;

        if let Some(q) = snapshot.search.as_deref() {
            items = filter_by_search(items, q);
        }
        if let Some(category) = snapshot.category.as_deref() {
            items = filter_by_category(items, category);
        }
        self.apply_sort(snapshot, &mut items);

        Ok(ResultPage {
            items,
            has_more: false,
            page,
        })
    }

    async fn resolve_category(
        &self,
        snapshot: &QuerySnapshot,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<ResultPage, ResolveError> {
        let category = snapshot.category.as_deref().unwrap_or_default();
        let references = self.source.fetch_category_members(category).await?;
        checkpoint(cancel)?;

        let keys: Vec<String> = references.iter().map(|r| r.lookup_key()).collect();
        let mut items = self.hydrate(&keys).await;
        checkpoint(cancel)?;

        if let Some(q) = snapshot.search.as_deref() {
            items = filter_by_search(items, q);
        }
        self.apply_sort(snapshot, &mut items);

        let (items, has_more) = window(items, page);
        Ok(ResultPage {
            items,
            has_more,
            page,
        })
    }

    async fn resolve_search(
        &self,
        snapshot: &QuerySnapshot,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<ResultPage, ResolveError> {
        let q = snapshot.search.as_deref().unwrap_or_default();
        // Over-fetch so the term is likely represented within one window.
        let limit = SEARCH_MIN_FETCH.max(page as usize * PAGE_SIZE * 2);
        let collection = self.source.fetch_collection_page(0, limit).await?;
        checkpoint(cancel)?;

        let keys: Vec<String> = collection
            .references
            .iter()
            .map(|r| r.lookup_key())
            .collect();
        let items = self.hydrate(&keys).await;
        checkpoint(cancel)?;

        let mut items = filter_by_search(items, q);
        self.apply_sort(snapshot, &mut items);

        let (items, has_more) = window(items, page);
        Ok(ResultPage {
            items,
            has_more,
            page,
        })
    }

    async fn resolve_default(
        &self,
        snapshot: &QuerySnapshot,
        page: u32,
        cancel: &CancellationToken,
    ) -> Result<ResultPage, ResolveError> {
        let offset = (page as usize - 1) * PAGE_SIZE;
        let collection = self.source.fetch_collection_page(offset, PAGE_SIZE).await?;
        checkpoint(cancel)?;

        let keys: Vec<String> = collection
            .references
            .iter()
            .map(|r| r.lookup_key())
            .collect();
        let mut items = self.hydrate(&keys).await;
        checkpoint(cancel)?;

        self.apply_sort(snapshot, &mut items);
        Ok(ResultPage {
            items,
            has_more: collection.has_continuation,
            page,
        })
    }

    /// Fetch every key concurrently; failed hydrations are dropped.
    async fn hydrate(&self, keys: &[String]) -> Vec<CatalogItem> {
        let fetches = keys.iter().map(|key| async move {
            match self.source.fetch_item(key).await {
                Ok(item) => Some(item),
                Err(err) => {
                    engine_warn!("Dropping item {}: {}", key, err);
                    None
                }
            }
        });
        join_all(fetches).await.into_iter().flatten().collect()
    }

    fn apply_sort(&self, snapshot: &QuerySnapshot, items: &mut [CatalogItem]) {
        if let Some(key) = &snapshot.sort {
            sort_items(items, key, snapshot.order());
        }
    }
}

fn checkpoint(cancel: &CancellationToken) -> Result<(), ResolveError> {
    if cancel.is_cancelled() {
        Err(ResolveError::Cancelled)
    } else {
        Ok(())
    }
}
