use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::net::TcpListener;

const FIXTURE: &str = include_str!("../fixtures/pokemon.json");

/// Upstream location used for the `url` field of list entries.
pub const UPSTREAM_POKEMON_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// PokeAPI returns 20 entries when no `limit` is given.
pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Body of `GET /pokemon`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PokemonPage {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Behaviour switches for the mock.
#[derive(Clone, Debug, Default)]
pub struct MockOptions {
    /// Serve detail payloads as `[record]` instead of `record`.
    pub wrap_detail: bool,
}

/// Fixture records in upstream id order.
pub struct Dex {
    records: Vec<Value>,
    wrap_detail: bool,
}

impl Dex {
    fn embedded(options: MockOptions) -> Result<Self, serde_json::Error> {
        let records: Vec<Value> = serde_json::from_str(FIXTURE)?;
        Ok(Self {
            records,
            wrap_detail: options.wrap_detail,
        })
    }

    fn find(&self, key: &str) -> Option<&Value> {
        let key = key.to_ascii_lowercase();
        self.records.iter().find(|record| {
            record["name"].as_str() == Some(key.as_str())
                || record["id"].as_u64().map(|id| id.to_string()) == Some(key.clone())
        })
    }

    fn page(&self, limit: usize, offset: usize) -> PokemonPage {
        let results = self
            .records
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|record| {
                let id = record["id"].as_u64()?;
                let name = record["name"].as_str()?;
                Some(NamedResource {
                    name: name.to_string(),
                    url: format!("{UPSTREAM_POKEMON_URL}/{id}/"),
                })
            })
            .collect();
        PokemonPage {
            count: self.records.len(),
            next: None,
            previous: None,
            results,
        }
    }
}

pub type Db = Arc<Dex>;

pub fn app() -> Router {
    app_with(MockOptions::default())
}

pub fn app_with(options: MockOptions) -> Router {
    let dex = Dex::embedded(options).expect("embedded pokemon fixture must be valid JSON");
    Router::new()
        .route("/pokemon", get(list_pokemon))
        .route("/pokemon/{id}", get(get_pokemon))
        .with_state(Arc::new(dex))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, MockOptions::default()).await
}

pub async fn run_with(listener: TcpListener, options: MockOptions) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(options)).await
}

async fn list_pokemon(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<PokemonPage> {
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    let offset = query.offset.unwrap_or(0);
    tracing::debug!(limit, offset, "list pokemon");
    Json(db.page(limit, offset))
}

async fn get_pokemon(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    let record = db.find(&id).cloned().ok_or_else(|| {
        tracing::debug!(%id, "pokemon not found");
        StatusCode::NOT_FOUND
    })?;
    if db.wrap_detail {
        return Ok(Json(Value::Array(vec![record])));
    }
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dex() -> Dex {
        Dex::embedded(MockOptions::default()).unwrap()
    }

    #[test]
    fn fixture_parses_and_is_ordered_by_id() {
        let dex = dex();
        assert_eq!(dex.records.len(), 25);
        for (index, record) in dex.records.iter().enumerate() {
            assert_eq!(record["id"].as_u64(), Some(index as u64 + 1));
        }
    }

    #[test]
    fn find_by_id_or_name() {
        let dex = dex();
        assert_eq!(dex.find("25").unwrap()["name"], "pikachu");
        assert_eq!(dex.find("Pikachu").unwrap()["id"], 25);
        assert!(dex.find("mewtwo").is_none());
        assert!(dex.find("0").is_none());
    }

    #[test]
    fn page_respects_limit_and_offset() {
        let dex = dex();
        let page = dex.page(3, 0);
        assert_eq!(page.count, 25);
        let names: Vec<_> = page.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["bulbasaur", "ivysaur", "venusaur"]);
        assert_eq!(page.results[0].url, "https://pokeapi.co/api/v2/pokemon/1/");

        let page = dex.page(2, 3);
        assert_eq!(page.results[0].name, "charmander");
        assert_eq!(page.results[0].url, "https://pokeapi.co/api/v2/pokemon/4/");
    }

    #[test]
    fn page_limit_zero_is_empty() {
        assert!(dex().page(0, 0).results.is_empty());
    }

    #[test]
    fn page_limit_is_capped_by_fixture() {
        assert_eq!(dex().page(150, 0).results.len(), 25);
    }

    #[test]
    fn list_query_fields_are_optional() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert!(query.limit.is_none());
        assert!(query.offset.is_none());
    }
}
