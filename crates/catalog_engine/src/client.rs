use std::sync::Arc;

use catalog_core::{CatalogItem, ListingReference};
use engine_logging::engine_trace;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::cache::ResponseCache;
use crate::fetch::Fetcher;
use crate::wire::{RawCategoryList, RawCategoryMembers, RawCollection, RawItem};
use crate::{Category, CollectionPage, FailureKind, FetchError};

/// Read-only access to the upstream catalog.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_collection_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<CollectionPage, FetchError>;

    async fn fetch_item(&self, id_or_name: &str) -> Result<CatalogItem, FetchError>;

    async fn fetch_category_members(
        &self,
        category: &str,
    ) -> Result<Vec<ListingReference>, FetchError>;

    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError>;
}

/// HTTP-backed [`CatalogSource`] that memoizes every response for the
/// lifetime of the client.
pub struct CatalogClient {
    fetcher: Arc<dyn Fetcher>,
    base_url: String,
    cache: ResponseCache,
}

impl CatalogClient {
    pub fn new(fetcher: Arc<dyn Fetcher>, base_url: &str) -> Self {
        Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: ResponseCache::new(),
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Serve `key` from the cache or fetch `path`. Only responses that decode
    /// into `T` are cached.
    async fn get_cached<T: DeserializeOwned>(
        &self,
        key: &str,
        path: &str,
    ) -> Result<T, FetchError> {
        if let Some(value) = self.cache.get(key) {
            engine_trace!("cache hit {}", key);
            return decode(key, &value);
        }

        let url = format!("{}{}", self.base_url, path);
        let bytes = self.fetcher.fetch(&url).await?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        let decoded = decode(key, &value)?;
        self.cache.insert(key, value);
        Ok(decoded)
    }
}

fn decode<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T, FetchError> {
    T::deserialize(value)
        .map_err(|err| FetchError::new(FailureKind::Decode, format!("{key}: {err}")))
}

#[async_trait::async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch_collection_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<CollectionPage, FetchError> {
        let raw: RawCollection = self
            .get_cached(
                &format!("pokemon-list-{offset}-{limit}"),
                &format!("/pokemon?offset={offset}&limit={limit}"),
            )
            .await?;
        Ok(CollectionPage {
            total: raw.count,
            has_continuation: raw.next.is_some(),
            references: raw.results.into_iter().map(ListingReference::from).collect(),
        })
    }

    async fn fetch_item(&self, id_or_name: &str) -> Result<CatalogItem, FetchError> {
        let raw: RawItem = self
            .get_cached(
                &format!("pokemon-{id_or_name}"),
                &format!("/pokemon/{id_or_name}"),
            )
            .await?;
        Ok(CatalogItem::from(raw))
    }

    async fn fetch_category_members(
        &self,
        category: &str,
    ) -> Result<Vec<ListingReference>, FetchError> {
        let raw: RawCategoryMembers = self
            .get_cached(
                &format!("pokemon-type-{category}"),
                &format!("/type/{category}"),
            )
            .await?;
        Ok(raw
            .pokemon
            .into_iter()
            .map(|slot| ListingReference::from(slot.pokemon))
            .collect())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        let raw: RawCategoryList = self.get_cached("pokemon-types", "/type").await?;
        Ok(raw
            .results
            .into_iter()
            .zip(1u32..)
            .map(|(named, id)| Category {
                id,
                name: named.name,
            })
            .collect())
    }
}

