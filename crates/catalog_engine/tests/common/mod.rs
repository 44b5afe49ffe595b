#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use catalog_core::{CatalogItem, ImageRefs, ItemId, ListingReference};
use catalog_engine::{
    CatalogClient, CatalogSource, Category, CollectionPage, FailureKind, FavoriteSource,
    FetchError, FetchSettings, ReqwestFetcher,
};
use serde_json::{json, Value};
use tokio::sync::Notify;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

#[derive(Debug, Clone)]
pub struct Creature {
    pub id: ItemId,
    pub name: String,
    pub types: Vec<String>,
    pub height: u32,
    pub weight: u32,
}

pub fn creature(id: ItemId, name: &str, types: &[&str], height: u32, weight: u32) -> Creature {
    Creature {
        id,
        name: name.to_string(),
        types: types.iter().map(|t| t.to_string()).collect(),
        height,
        weight,
    }
}

/// `count` creatures named `mon-{id}`, ids from 1.
pub fn numbered(count: u64) -> Vec<Creature> {
    (1..=count)
        .map(|id| creature(id, &format!("mon-{id}"), &["normal"], 1, 1))
        .collect()
}

pub fn starters() -> Vec<Creature> {
    vec![
        creature(1, "bulbasaur", &["grass", "poison"], 7, 69),
        creature(2, "ivysaur", &["grass", "poison"], 10, 130),
        creature(3, "venusaur", &["grass", "poison"], 20, 1000),
        creature(4, "charmander", &["fire"], 6, 85),
        creature(5, "charmeleon", &["fire"], 11, 190),
        creature(7, "squirtle", &["water"], 5, 90),
    ]
}

impl Creature {
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "height": self.height,
            "weight": self.weight,
            "base_experience": 64,
            "sprites": {"front_default": format!("front/{}.png", self.id), "other": {}},
            "types": self.types.iter().enumerate().map(|(slot, name)| json!({
                "slot": slot + 1,
                "type": {"name": name, "url": format!("https://x.test/type/{name}/")}
            })).collect::<Vec<_>>(),
            "abilities": [],
            "stats": [{"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": "u"}}],
        })
    }

    pub fn to_item(&self) -> CatalogItem {
        CatalogItem {
            id: self.id,
            name: self.name.clone(),
            categories: self.types.clone(),
            height: self.height,
            weight: self.weight,
            base_experience: Some(64),
            stats: Vec::new(),
            traits: Vec::new(),
            images: ImageRefs::default(),
        }
    }

    pub fn reference(&self, base: &str) -> ListingReference {
        ListingReference::new(self.name.clone(), format!("{base}/pokemon/{}/", self.id))
    }
}

pub fn ids(items: &[CatalogItem]) -> Vec<ItemId> {
    items.iter().map(|item| item.id).collect()
}

struct CollectionResponder {
    base: String,
    creatures: Arc<Vec<Creature>>,
}

impl Respond for CollectionResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut offset = 0usize;
        let mut limit = 20usize;
        for (key, value) in request.url.query_pairs() {
            match key.as_ref() {
                "offset" => offset = value.parse().unwrap_or(0),
                "limit" => limit = value.parse().unwrap_or(20),
                _ => {}
            }
        }
        let total = self.creatures.len();
        let start = offset.min(total);
        let end = (offset + limit).min(total);
        let next = (end < total)
            .then(|| format!("{}/pokemon?offset={end}&limit={limit}", self.base));
        let results: Vec<Value> = self.creatures[start..end]
            .iter()
            .map(|c| json!({"name": c.name, "url": format!("{}/pokemon/{}/", self.base, c.id)}))
            .collect();
        ResponseTemplate::new(200).set_body_json(json!({
            "count": total,
            "next": next,
            "previous": null,
            "results": results,
        }))
    }
}

struct ItemResponder {
    creatures: Arc<Vec<Creature>>,
}

impl Respond for ItemResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let key = request
            .url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .unwrap_or_default()
            .to_string();
        match self
            .creatures
            .iter()
            .find(|c| c.id.to_string() == key || c.name == key)
        {
            Some(c) => ResponseTemplate::new(200).set_body_json(c.to_json()),
            None => ResponseTemplate::new(404),
        }
    }
}

/// Serve `/pokemon` (offset/limit windows) and `/pokemon/{id|name}` from
/// `creatures`. `missing` ids are listed but answer 404 on hydration.
pub async fn mount_catalog(server: &MockServer, creatures: &[Creature], missing: &[ItemId]) {
    let base = server.uri();
    let listed = Arc::new(creatures.to_vec());
    let hydratable = Arc::new(
        creatures
            .iter()
            .filter(|c| !missing.contains(&c.id))
            .cloned()
            .collect::<Vec<_>>(),
    );
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .respond_with(CollectionResponder {
            base,
            creatures: listed,
        })
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/pokemon/[^/]+$"))
        .respond_with(ItemResponder {
            creatures: hydratable,
        })
        .mount(server)
        .await;
}

/// `/type/{name}` listing the given creatures.
pub async fn mount_category(server: &MockServer, name: &str, members: &[Creature]) {
    let base = server.uri();
    let body = json!({
        "name": name,
        "pokemon": members.iter().map(|c| json!({
            "slot": 1,
            "pokemon": {"name": c.name, "url": format!("{base}/pokemon/{}/", c.id)}
        })).collect::<Vec<_>>(),
    });
    Mock::given(method("GET"))
        .and(path(format!("/type/{name}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn client_for(server: &MockServer) -> Arc<CatalogClient> {
    let fetcher = ReqwestFetcher::new(FetchSettings {
        base_url: server.uri(),
        ..FetchSettings::default()
    })
    .expect("fetcher");
    Arc::new(CatalogClient::new(Arc::new(fetcher), &server.uri()))
}

pub struct FixedFavorites(pub Vec<ItemId>);

impl FavoriteSource for FixedFavorites {
    fn favorite_ids(&self) -> Vec<ItemId> {
        self.0.clone()
    }
}

/// In-memory source whose collection fetches can be held at a gate until the
/// test releases them.
pub struct ScriptedSource {
    creatures: Vec<Creature>,
    gates: Mutex<HashMap<usize, Arc<Notify>>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(creatures: Vec<Creature>) -> Self {
        Self {
            creatures,
            gates: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Hold collection fetches at `offset` until the returned gate is notified.
    pub fn gate_offset(&self, offset: usize) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(offset, gate.clone());
        gate
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CatalogSource for ScriptedSource {
    async fn fetch_collection_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> Result<CollectionPage, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().unwrap().get(&offset).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let total = self.creatures.len();
        let start = offset.min(total);
        let end = (offset + limit).min(total);
        Ok(CollectionPage {
            total: total as u64,
            references: self.creatures[start..end]
                .iter()
                .map(|c| c.reference("https://x.test"))
                .collect(),
            has_continuation: end < total,
        })
    }

    async fn fetch_item(&self, id_or_name: &str) -> Result<CatalogItem, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.creatures
            .iter()
            .find(|c| c.id.to_string() == id_or_name || c.name == id_or_name)
            .map(Creature::to_item)
            .ok_or_else(|| FetchError::new(FailureKind::NotFound, id_or_name))
    }

    async fn fetch_category_members(
        &self,
        category: &str,
    ) -> Result<Vec<ListingReference>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .creatures
            .iter()
            .filter(|c| c.types.iter().any(|t| t == category))
            .map(|c| c.reference("https://x.test"))
            .collect())
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Vec::new())
    }
}
