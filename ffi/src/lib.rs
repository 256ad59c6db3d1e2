//! C-ABI wrapper around `pokedex-core`.
//!
//! # Overview
//! Exposes the list and detail fetchers through `extern "C"` functions so a
//! mobile shell (Swift, Kotlin, a JS bridge) can build requests and parse
//! responses with its own HTTP stack, without linking serde or an async
//! runtime into the host.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiPokedexResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - The C caller owns all returned pointers and must call the matching
//!   `pokedex_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;

use pokedex_core::{ApiError, ClientConfig, HttpResponse, PokedexClient};

use types::*;

/// Borrow a C string as `&str`; `None` for invalid UTF-8.
///
/// # Safety
/// `s` must be non-null and NUL-terminated.
unsafe fn borrow_str<'a>(s: *const c_char) -> Option<&'a str> {
    CStr::from_ptr(s).to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `PokedexClient` bound to `base_url`.
///
/// `sprite_base_url` may be null to use the public sprite repository.
/// Returns null if `base_url` is null, if either URL is not valid UTF-8, or if
/// an internal panic occurs.
/// The caller must free the returned pointer with `pokedex_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_new(
    base_url: *const c_char,
    sprite_base_url: *const c_char,
) -> *mut FfiPokedexClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Some(base_url) = (unsafe { borrow_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let mut client = PokedexClient::new(base_url);
        if !sprite_base_url.is_null() {
            let Some(sprite_base_url) = (unsafe { borrow_str(sprite_base_url) }) else {
                return std::ptr::null_mut();
            };
            client = client.with_sprite_base_url(sprite_base_url);
        }
        Box::into_raw(Box::new(FfiPokedexClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Create a client from `POKEDEX_API_URL`, `POKEDEX_SPRITE_URL` and
/// `POKEDEX_LIST_LIMIT`, falling back to the public PokeAPI.
///
/// Returns null if any variable holds an invalid value.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_new_from_env() -> *mut FfiPokedexClient {
    catch_unwind(|| match ClientConfig::from_env() {
        Ok(config) => Box::into_raw(Box::new(FfiPokedexClient {
            inner: PokedexClient::from_config(&config),
        })),
        Err(_) => std::ptr::null_mut(),
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `pokedex_client_new*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_free(client: *mut FfiPokedexClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

/// The limit list screens should request when the user picked none.
///
/// Returns 0 if `client` is null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_default_limit(client: *const FfiPokedexClient) -> u32 {
    if client.is_null() {
        return 0;
    }
    unsafe { &*client }.inner.default_limit()
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build an HTTP request for the first `limit` Pokémon.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `pokedex_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_build_list_pokemon(
    client: *const FfiPokedexClient,
    limit: u32,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        FfiHttpRequest::from_core(client.inner.build_list_pokemon(limit))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build an HTTP request for a single Pokémon by numeric id or name.
///
/// Returns null if `client` or `id` is null, or if `id` is not a valid
/// identifier (empty, not UTF-8, or anything besides ASCII alphanumerics and
/// `-`).
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_build_get_pokemon(
    client: *const FfiPokedexClient,
    id: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || id.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let Some(id) = (unsafe { borrow_str(id) }) else {
            return std::ptr::null_mut();
        };
        match client.inner.build_get_pokemon(id) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(_) => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Sprite URL for `id`. Free with `pokedex_free_string`.
///
/// Returns null if `client` or `id` is null, or if `id` is not valid UTF-8.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_sprite_url(
    client: *const FfiPokedexClient,
    id: *const c_char,
) -> *mut c_char {
    catch_unwind(|| {
        if client.is_null() || id.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        match unsafe { borrow_str(id) } {
            Some(id) => c_string(client.inner.sprite_url(id)),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as empty; a body that is not UTF-8 is a decode error.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, ApiError> {
    if resp.body.is_null() {
        return Ok(HttpResponse::new(resp.status, ""));
    }
    let body = unsafe { borrow_str(resp.body) }
        .ok_or_else(|| ApiError::Decode("body is not UTF-8".to_string()))?;
    Ok(HttpResponse::new(resp.status, body))
}

/// Parse an HTTP response from a list request.
///
/// Returns a result with `data_tag = SummaryList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_parse_list_pokemon(
    client: *const FfiPokedexClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPokedexResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiPokedexResult::null_arg("client");
        }
        if response.is_null() {
            return FfiPokedexResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let parsed = ffi_response_to_core(unsafe { &*response })
            .and_then(|resp| client.inner.parse_list_pokemon(resp));
        match parsed {
            Ok(summaries) => FfiPokedexResult::ok_summary_list(summaries),
            Err(e) => FfiPokedexResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiPokedexResult::panic("panic in pokedex_parse_list_pokemon"))
}

/// Parse an HTTP response from a detail request. Bare records and
/// single-element arrays are both accepted.
///
/// Returns a result with `data_tag = Detail` on success.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_parse_get_pokemon(
    client: *const FfiPokedexClient,
    response: *const FfiHttpResponse,
) -> *mut FfiPokedexResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiPokedexResult::null_arg("client");
        }
        if response.is_null() {
            return FfiPokedexResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let parsed = ffi_response_to_core(unsafe { &*response })
            .and_then(|resp| client.inner.parse_get_pokemon(resp));
        match parsed {
            Ok(detail) => FfiPokedexResult::ok_detail(detail),
            Err(e) => FfiPokedexResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiPokedexResult::panic("panic in pokedex_parse_get_pokemon"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `pokedex_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
}

/// Free an `FfiPokedexResult` returned by any `pokedex_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_result(result: *mut FfiPokedexResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| unsafe { FfiPokedexResult::free(result) });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| unsafe { drop_c_string(s) });
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
