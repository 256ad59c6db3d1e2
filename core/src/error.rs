//! Error types for the Pokédex client.
//!
//! # Design
//! Every failure a screen can observe maps to one variant so callers can tell
//! "this Pokémon does not exist" apart from "the network is down" or "the
//! payload was garbage". `Network` is never produced by the parsers; it comes
//! from whatever executes the request (see `transport`).

use thiserror::Error;

/// Errors returned by `PokedexClient` and transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404 for the requested identifier.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-200 status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The response body was not valid JSON or did not fit the record types.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The detail payload was neither an object nor a one-element array.
    #[error("unexpected payload shape: {0}")]
    UnexpectedShape(String),

    /// The identifier cannot be placed in a request path.
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A list entry's positional id disagrees with the id in its upstream url.
    #[error("entry {position} has positional id {} but upstream id {upstream}", .position + 1)]
    IdMismatch { position: usize, upstream: u32 },
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}
