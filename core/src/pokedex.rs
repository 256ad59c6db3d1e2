//! One-call fetchers on top of a `Transport`.
//!
//! `Pokedex` pairs a `PokedexClient` with something that can execute its
//! requests, giving screens the two operations they actually call: fetch the
//! list, fetch one record.

use crate::client::PokedexClient;
use crate::error::ApiError;
use crate::transport::Transport;
use crate::types::{PokemonDetail, PokemonSummary};
use crate::view::DetailView;

#[derive(Debug, Clone)]
pub struct Pokedex<T> {
    client: PokedexClient,
    transport: T,
}

impl<T: Transport> Pokedex<T> {
    pub fn new(client: PokedexClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PokedexClient {
        &self.client
    }

    /// `None` uses the client's default limit (150 unless configured).
    pub fn list_pokemon(&self, limit: Option<u32>) -> Result<Vec<PokemonSummary>, ApiError> {
        let limit = limit.unwrap_or(self.client.default_limit());
        let request = self.client.build_list_pokemon(limit);
        let response = self.transport.execute(&request)?;
        self.client.parse_list_pokemon(response)
    }

    pub fn pokemon_details(&self, id: &str) -> Result<PokemonDetail, ApiError> {
        let request = self.client.build_get_pokemon(id)?;
        let response = self.transport.execute(&request)?;
        self.client.parse_get_pokemon(response)
    }

    /// Fetch a record and project it for the detail screen opened with `id`.
    pub fn detail_view(&self, id: &str) -> Result<DetailView, ApiError> {
        let detail = self.pokemon_details(id)?;
        Ok(DetailView::new(id, &detail, self.client.sprite_url(id)))
    }
}

#[cfg(feature = "blocking")]
impl Pokedex<crate::transport::UreqTransport> {
    /// Client from `ClientConfig::from_env` over a fresh `UreqTransport`.
    pub fn from_env() -> Result<Self, crate::config::ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, crate::config::ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = crate::config::ClientConfig::from_lookup(lookup)?;
        Ok(Self::new(
            PokedexClient::from_config(&config),
            crate::transport::UreqTransport::new(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::{HttpRequest, HttpResponse};

    /// Replays canned responses and records every request path.
    struct Scripted {
        responses: RefCell<Vec<Result<HttpResponse, ApiError>>>,
        seen: RefCell<Vec<String>>,
    }

    impl Scripted {
        fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into_iter().rev().collect()),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.borrow_mut().push(request.path.clone());
            self.responses
                .borrow_mut()
                .pop()
                .unwrap_or_else(|| Err(ApiError::Network("script exhausted".to_string())))
        }
    }

    fn client() -> PokedexClient {
        PokedexClient::new("http://api.test").with_sprite_base_url("http://img.test")
    }

    #[test]
    fn list_uses_default_limit() {
        let transport = Scripted::new(vec![Ok(HttpResponse::new(200, r#"{"results":[]}"#))]);
        let dex = Pokedex::new(client(), &transport);

        assert!(dex.list_pokemon(None).unwrap().is_empty());
        assert_eq!(*transport.seen.borrow(), vec!["http://api.test/pokemon?limit=150"]);
    }

    #[test]
    fn list_with_explicit_limit() {
        let body = r#"{"results":[{"name":"bulbasaur","url":""}]}"#;
        let transport = Scripted::new(vec![Ok(HttpResponse::new(200, body))]);
        let dex = Pokedex::new(client(), &transport);

        let list = dex.list_pokemon(Some(1)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].image, "http://img.test/1.png");
        assert_eq!(*transport.seen.borrow(), vec!["http://api.test/pokemon?limit=1"]);
    }

    #[test]
    fn network_failure_yields_no_data() {
        let transport = Scripted::new(vec![Err(ApiError::Network("offline".to_string()))]);
        let dex = Pokedex::new(client(), &transport);

        let err = dex.pokemon_details("25").unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn invalid_identifier_never_reaches_transport() {
        let transport = Scripted::new(Vec::new());
        let dex = Pokedex::new(client(), &transport);

        let err = dex.pokemon_details("25/../1").unwrap_err();
        assert!(matches!(err, ApiError::InvalidIdentifier(_)));
        assert!(transport.seen.borrow().is_empty());
    }

    #[test]
    fn detail_view_uses_caller_identifier_for_image() {
        let body = r#"[{"id":25,"name":"pikachu","height":4,"weight":60}]"#;
        let transport = Scripted::new(vec![Ok(HttpResponse::new(200, body))]);
        let dex = Pokedex::new(client(), &transport);

        let view = dex.detail_view("25").unwrap();
        assert_eq!(view.title, "Pikachu");
        assert_eq!(view.number, "#25");
        assert_eq!(view.image, "http://img.test/25.png");
        assert_eq!(view.height.as_deref(), Some("0.4 m"));
        assert_eq!(view.weight.as_deref(), Some("6 kg"));
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn from_lookup_wires_config_into_client() {
        let dex = Pokedex::from_lookup(|key| match key {
            "POKEDEX_API_URL" => Some("http://api.test/".to_string()),
            "POKEDEX_SPRITE_URL" => Some("http://img.test".to_string()),
            "POKEDEX_LIST_LIMIT" => Some("12".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(dex.client().base_url(), "http://api.test");
        assert_eq!(dex.client().default_limit(), 12);
        assert_eq!(dex.client().sprite_url(7), "http://img.test/7.png");
    }

    #[cfg(feature = "blocking")]
    #[test]
    fn from_lookup_rejects_bad_limit() {
        let result = Pokedex::from_lookup(|key| (key == "POKEDEX_LIST_LIMIT").then(|| "lots".to_string()));
        assert!(matches!(
            result,
            Err(crate::config::ConfigError::InvalidLimit { .. })
        ));
    }
}
