//! Synchronous PokeAPI client core for the Pokédex screens.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host executes the actual
//! HTTP round trip, keeping the core deterministic and testable. With the
//! default `blocking` feature, `UreqTransport` and `Pokedex` do the round trip
//! for hosts that have no HTTP stack of their own.
//!
//! # Design
//! - `PokedexClient` is stateless: base URLs and a default list limit.
//! - Each fetch is split into `build_*` (produces request) and `parse_*`
//!   (consumes response), so the I/O boundary is explicit.
//! - List entries get a positional id and a derived sprite URL; detail
//!   payloads are returned whole, whether bare or wrapped in a singleton array.
//! - `ScreenModel` tracks request generations so stale responses are dropped.
//! - Types use owned `String` / `Vec` fields to simplify FFI mapping.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod pokedex;
pub mod transport;
pub mod types;
pub mod view;

pub use client::{verify_positional_ids, PokedexClient};
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use lifecycle::{Generation, LoadState, RequestTracker, ScreenModel};
pub use pokedex::Pokedex;
pub use transport::Transport;
#[cfg(feature = "blocking")]
pub use transport::UreqTransport;
pub use types::{AbilitySlot, NamedResource, PokemonDetail, PokemonSummary, Sprites, StatSlot, TypeSlot};
pub use view::{detail_status_message, DetailView, StatRow, SummaryCard};
