//! Records produced by the list and detail fetchers.
//!
//! # Design
//! Defined independently from the mock-server crate; integration tests catch
//! schema drift. Detail records keep every upstream field: the ones screens
//! use are typed, the rest land in a flattened `extra` map.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Upstream `{name, url}` reference pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Body of `GET /pokemon?limit=N`. Paging links are accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PokemonPage {
    pub results: Vec<NamedResource>,
}

/// List-view projection of a Pokémon.
///
/// `id` is the 1-based position in the list response, not an upstream field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PokemonSummary {
    pub name: String,
    pub url: String,
    pub id: u32,
    pub image: String,
}

impl PokemonSummary {
    /// Identifier encoded in the trailing path segment of `url`, if any.
    ///
    /// `https://pokeapi.co/api/v2/pokemon/25/` yields `Some(25)`.
    pub fn upstream_id(&self) -> Option<u32> {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .and_then(|segment| segment.parse().ok())
    }

    /// False only when the upstream url names a different id.
    pub fn id_matches_upstream(&self) -> bool {
        self.upstream_id().is_none_or(|upstream| upstream == self.id)
    }
}

/// Full Pokémon payload from `GET /pokemon/{id}`.
///
/// Serializing gives back the keys the payload carried; absent options and
/// empty lists are left out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PokemonDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub name: String,
    /// Decimetres.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Hectograms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprites: Option<Sprites>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abilities: Vec<AbilitySlot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<StatSlot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeSlot>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sprites {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_shiny: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub back_shiny: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatSlot {
    pub stat: NamedResource,
    pub base_stat: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeSlot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<u8>,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}
