//! Client configuration.
//!
//! Values come from the environment, falling back to the public PokeAPI
//! endpoints. Lookup is injectable so tests never touch process state.

use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_SPRITE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon";
pub const DEFAULT_LIST_LIMIT: u32 = 150;

pub const BASE_URL_VAR: &str = "POKEDEX_API_URL";
pub const SPRITE_BASE_URL_VAR: &str = "POKEDEX_SPRITE_URL";
pub const LIST_LIMIT_VAR: &str = "POKEDEX_LIST_LIMIT";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidLimit { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    EmptyUrl { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub sprite_base_url: String,
    pub list_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sprite_base_url: DEFAULT_SPRITE_BASE_URL.to_string(),
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Read `POKEDEX_API_URL`, `POKEDEX_SPRITE_URL` and `POKEDEX_LIST_LIMIT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Missing keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(BASE_URL_VAR) {
            config.base_url = non_empty_url(BASE_URL_VAR, &url)?;
        }
        if let Some(url) = lookup(SPRITE_BASE_URL_VAR) {
            config.sprite_base_url = non_empty_url(SPRITE_BASE_URL_VAR, &url)?;
        }
        if let Some(raw) = lookup(LIST_LIMIT_VAR) {
            config.list_limit = raw.trim().parse().map_err(|_| ConfigError::InvalidLimit {
                var: LIST_LIMIT_VAR,
                value: raw.clone(),
            })?;
        }

        tracing::debug!(
            base_url = %config.base_url,
            sprite_base_url = %config.sprite_base_url,
            list_limit = config.list_limit,
            "loaded client config"
        );
        Ok(config)
    }
}

fn non_empty_url(var: &'static str, raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    if url.is_empty() {
        return Err(ConfigError::EmptyUrl { var });
    }
    Ok(url.to_string())
}
