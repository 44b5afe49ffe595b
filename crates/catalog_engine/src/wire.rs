//! Upstream JSON shapes and their conversion into the core model.

use catalog_core::{CatalogItem, ImageRefs, ItemStat, ItemTrait, ListingReference};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct RawNamed {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl From<RawNamed> for ListingReference {
    fn from(raw: RawNamed) -> Self {
        ListingReference::new(raw.name, raw.url)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCollection {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub results: Vec<RawNamed>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCategoryMembers {
    #[serde(default)]
    pub pokemon: Vec<RawMemberSlot>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMemberSlot {
    pub pokemon: RawNamed,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawCategoryList {
    #[serde(default)]
    pub results: Vec<RawNamed>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawItem {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub sprites: RawSprites,
    #[serde(default)]
    pub types: Vec<RawTypeSlot>,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub base_experience: Option<u32>,
    #[serde(default)]
    pub abilities: Vec<RawAbilitySlot>,
    #[serde(default)]
    pub stats: Vec<RawStat>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawSprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<RawOtherSprites>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawOtherSprites {
    #[serde(default, rename = "official-artwork")]
    pub official_artwork: Option<RawArtwork>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawArtwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawTypeSlot {
    #[serde(rename = "type")]
    pub kind: RawNamed,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAbilitySlot {
    pub ability: RawNamed,
    #[serde(default)]
    pub is_hidden: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawStat {
    pub base_stat: i64,
    pub stat: RawNamed,
}

impl From<RawItem> for CatalogItem {
    fn from(raw: RawItem) -> Self {
        let artwork = raw
            .sprites
            .other
            .and_then(|other| other.official_artwork)
            .and_then(|art| art.front_default);
        CatalogItem {
            id: raw.id,
            name: raw.name,
            categories: raw.types.into_iter().map(|slot| slot.kind.name).collect(),
            height: raw.height,
            weight: raw.weight,
            base_experience: raw.base_experience,
            stats: raw
                .stats
                .into_iter()
                .map(|s| ItemStat {
                    name: s.stat.name,
                    magnitude: s.base_stat,
                })
                .collect(),
            traits: raw
                .abilities
                .into_iter()
                .map(|a| ItemTrait {
                    name: a.ability.name,
                    hidden: a.is_hidden,
                })
                .collect(),
            images: ImageRefs {
                front_default: raw.sprites.front_default,
                artwork,
            },
        }
    }
}
