//! Stateless request builder and response parser for the PokeAPI.
//!
//! # Design
//! `PokedexClient` holds two base URLs and carries no mutable state between
//! calls. Each fetch is split into a `build_*` method producing an
//! `HttpRequest` and a `parse_*` method consuming an `HttpResponse`; the
//! caller executes the round trip in between.

use serde_json::Value;

use crate::config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_LIST_LIMIT, DEFAULT_SPRITE_BASE_URL};
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{PokemonDetail, PokemonPage, PokemonSummary};

/// Synchronous, stateless client for the Pokémon list and detail endpoints.
#[derive(Debug, Clone)]
pub struct PokedexClient {
    base_url: String,
    sprite_base_url: String,
    default_limit: u32,
}

impl Default for PokedexClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PokedexClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            sprite_base_url: DEFAULT_SPRITE_BASE_URL.to_string(),
            default_limit: DEFAULT_LIST_LIMIT,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
            .with_sprite_base_url(&config.sprite_base_url)
            .with_default_limit(config.list_limit)
    }

    pub fn with_sprite_base_url(mut self, sprite_base_url: &str) -> Self {
        self.sprite_base_url = sprite_base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_default_limit(mut self, limit: u32) -> Self {
        self.default_limit = limit;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    /// `{sprite_base}/{id}.png`.
    pub fn sprite_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{id}.png", self.sprite_base_url)
    }

    pub fn build_list_pokemon(&self, limit: u32) -> HttpRequest {
        let req = HttpRequest::get(format!("{}/pokemon?limit={limit}", self.base_url));
        tracing::debug!(path = %req.path, "built list request");
        req
    }

    /// Rejects identifiers that are empty or contain anything besides ASCII
    /// alphanumerics and `-`, so the id can never reshape the path.
    pub fn build_get_pokemon(&self, id: &str) -> Result<HttpRequest, ApiError> {
        validate_identifier(id)?;
        let req = HttpRequest::get(format!("{}/pokemon/{id}", self.base_url));
        tracing::debug!(path = %req.path, "built detail request");
        Ok(req)
    }

    /// Decorate each list entry with its 1-based position and sprite URL.
    pub fn parse_list_pokemon(&self, response: HttpResponse) -> Result<Vec<PokemonSummary>, ApiError> {
        check_status(&response)?;
        let page: PokemonPage = serde_json::from_str(&response.body)?;

        let summaries: Vec<PokemonSummary> = page
            .results
            .into_iter()
            .zip(1u32..)
            .map(|(entry, id)| PokemonSummary {
                image: self.sprite_url(id),
                name: entry.name,
                url: entry.url,
                id,
            })
            .collect();

        for summary in summaries.iter().filter(|s| !s.id_matches_upstream()) {
            tracing::warn!(
                name = %summary.name,
                id = summary.id,
                upstream = ?summary.upstream_id(),
                "positional id differs from upstream id"
            );
        }
        tracing::debug!(count = summaries.len(), "parsed pokemon list");
        Ok(summaries)
    }

    /// Accepts a bare record or a one-element array wrapping it.
    pub fn parse_get_pokemon(&self, response: HttpResponse) -> Result<PokemonDetail, ApiError> {
        check_status(&response)?;
        let payload: Value = serde_json::from_str(&response.body)?;

        let record = match payload {
            Value::Object(_) => payload,
            Value::Array(items) if items.len() == 1 => {
                tracing::debug!("unwrapping single-element detail payload");
                items.into_iter().next().unwrap_or(Value::Null)
            }
            Value::Array(items) => {
                return Err(ApiError::UnexpectedShape(format!(
                    "expected one record, got an array of {}",
                    items.len()
                )))
            }
            other => {
                return Err(ApiError::UnexpectedShape(format!(
                    "expected an object, got {}",
                    json_kind(&other)
                )))
            }
        };

        if !record.is_object() {
            return Err(ApiError::UnexpectedShape(format!(
                "expected an object inside the array, got {}",
                json_kind(&record)
            )));
        }
        let detail: PokemonDetail = serde_json::from_value(record)?;
        tracing::debug!(name = %detail.name, "parsed pokemon detail");
        Ok(detail)
    }
}

/// Check that positional ids agree with the ids in each entry's upstream url.
///
/// Entries whose url carries no numeric id are accepted.
pub fn verify_positional_ids(summaries: &[PokemonSummary]) -> Result<(), ApiError> {
    match summaries
        .iter()
        .enumerate()
        .find_map(|(position, s)| s.upstream_id().filter(|&up| up != s.id).map(|up| (position, up)))
    {
        Some((position, upstream)) => Err(ApiError::IdMismatch { position, upstream }),
        None => Ok(()),
    }
}

fn validate_identifier(id: &str) -> Result<(), ApiError> {
    let valid = !id.is_empty() && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(ApiError::InvalidIdentifier(id.to_string()))
    }
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
