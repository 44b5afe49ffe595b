//! Catalog engine: remote client, favorites store and the result pipeline.
mod cache;
mod client;
mod engine;
mod favorites;
mod fetch;
mod persist;
mod pipeline;
mod refine;
mod types;
mod wire;

pub use cache::ResponseCache;
pub use client::{CatalogClient, CatalogSource};
pub use engine::EngineHandle;
pub use favorites::{FavoriteSource, FavoritesStore, FAVORITES_KEY};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use persist::{ensure_store_dir, AtomicFileWriter, PersistError};
pub use pipeline::{PageRequest, ResultPipeline};
pub use refine::{filter_by_category, filter_by_search, sort_items, window};
pub use types::{Category, CollectionPage, EngineEvent, FailureKind, FetchError, ResolveError};
