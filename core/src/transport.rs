//! Executing requests built by `PokedexClient`.
//!
//! Hosts that already own an HTTP stack implement `Transport` themselves (or
//! skip it and call `build_*`/`parse_*` directly). `UreqTransport` is the
//! ready-made blocking implementation behind the `blocking` feature.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one HTTP round trip.
///
/// Non-2xx statuses are returned as responses, not errors; only failures
/// that produce no response at all map to `ApiError::Network`.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "blocking")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "blocking")]
mod blocking {
    use super::Transport;
    use crate::error::ApiError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Blocking transport on a shared `ureq` agent.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl UreqTransport {
        pub fn new() -> Self {
            // Status interpretation belongs to the client parsers.
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            let mut builder = match request.method {
                HttpMethod::Get => self.agent.get(&request.path),
            };
            for (key, value) in &request.headers {
                builder = builder.header(key.as_str(), value.as_str());
            }

            let mut response = builder.call().map_err(|e| {
                tracing::warn!(path = %request.path, error = %e, "request failed");
                ApiError::Network(e.to_string())
            })?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    let value = value.to_str().ok()?;
                    Some((name.as_str().to_string(), value.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Network(e.to_string()))?;

            tracing::debug!(path = %request.path, status, "response received");
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
