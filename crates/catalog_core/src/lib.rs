//! Catalog core: data model, query model and the list controller state machine.
mod effect;
mod favorites;
mod model;
mod msg;
mod query;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use favorites::FavoriteSet;
pub use model::{
    artwork_url, display_name, id_from_locator, CatalogItem, ImageRefs, ItemId, ItemStat,
    ItemTrait, ListingReference, ResultPage,
};
pub use msg::Msg;
pub use query::{
    encode_query, parse_query, parse_query_str, QuerySnapshot, SortKey, SortOrder, PAGE_SIZE,
    SEARCH_MIN_FETCH,
};
pub use state::{ListState, RequestId};
pub use update::update;
pub use view_model::{EmptyState, ListViewModel};
