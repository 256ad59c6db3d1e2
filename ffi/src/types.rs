//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! tagged enums with explicit discriminants. Arrays are allocated as boxed
//! slices so they can be released with the exact length they were built with.
//! Conversion and release helpers live here to keep `lib.rs` focused on the
//! `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use pokedex_core::{ApiError, HttpMethod, PokemonDetail, PokemonSummary};

/// Opaque handle to a `PokedexClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiPokedexClient {
    pub(crate) inner: pokedex_core::PokedexClient,
}

/// Heap C string; interior NULs collapse the value to an empty string.
pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Release a string made by `c_string`. Null is ignored.
pub(crate) unsafe fn drop_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

/// Length as seen by C, saturating at `u32::MAX`.
fn c_len(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Leak `items` as a boxed slice; returns null for an empty vector.
///
/// Lengths are `u32` on the C side, so anything past `u32::MAX` items is
/// dropped before the slice is leaked and the reported length always matches
/// the allocation.
fn into_raw_slice<T>(mut items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = c_len(items.len());
    items.truncate(len as usize);
    let boxed = items.into_boxed_slice();
    (Box::into_raw(boxed) as *mut T, len)
}

/// Reclaim a slice produced by `into_raw_slice`.
unsafe fn from_raw_slice<T>(ptr: *mut T, len: u32) -> Box<[T]> {
    if ptr.is_null() || len == 0 {
        return Box::new([]);
    }
    Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len as usize))
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `pokedex_build_*` functions. The C caller executes the request
/// and passes the response back through `pokedex_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: pokedex_core::HttpRequest) -> *mut Self {
        let headers = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_slice(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: c_string(req.path),
            headers,
            headers_len,
            body: req.body.map_or(std::ptr::null_mut(), c_string),
        }))
    }

    /// Release every allocation owned by a request from `from_core`.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = Box::from_raw(req);
        drop_c_string(req.path);
        drop_c_string(req.body);
        for header in from_raw_slice(req.headers, req.headers_len).iter() {
            drop_c_string(header.key);
            drop_c_string(header.value);
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP request,
/// then passes a pointer to a `pokedex_parse_*` function. The FFI layer reads
/// but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiPokedexResult`.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Http = 2,
    Network = 3,
    Decode = 4,
    UnexpectedShape = 5,
    InvalidIdentifier = 6,
    IdMismatch = 7,
    Panic = 8,
    NullArg = 9,
}

/// Tag that tells `pokedex_free_result` what `FfiPokedexResult::data` points to.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    SummaryList = 1,
    Detail = 2,
}

/// A list entry exposed to C.
#[repr(C)]
pub struct FfiPokemonSummary {
    pub id: u32,
    pub name: *mut c_char,
    pub url: *mut c_char,
    pub image: *mut c_char,
}

/// The list fetch result exposed to C.
#[repr(C)]
pub struct FfiPokemonSummaryList {
    pub items: *mut FfiPokemonSummary,
    pub len: u32,
}

#[repr(C)]
pub struct FfiStat {
    pub name: *mut c_char,
    pub base_stat: u32,
}

#[repr(C)]
pub struct FfiAbility {
    pub name: *mut c_char,
    pub is_hidden: bool,
}

/// A detail record exposed to C.
///
/// Numeric fields are `-1` when the upstream payload omits them.
/// `front_sprite` may be null. `json` holds the complete record, including
/// fields with no typed counterpart here.
#[repr(C)]
pub struct FfiPokemonDetail {
    pub id: i64,
    pub name: *mut c_char,
    pub height: i64,
    pub weight: i64,
    pub front_sprite: *mut c_char,
    pub types: *mut *mut c_char,
    pub types_len: u32,
    pub stats: *mut FfiStat,
    pub stats_len: u32,
    pub abilities: *mut FfiAbility,
    pub abilities_len: u32,
    pub json: *mut c_char,
}

impl FfiPokemonDetail {
    fn from_core(detail: PokemonDetail) -> Self {
        let json = serde_json::to_string(&detail).unwrap_or_default();
        let (types, types_len) =
            into_raw_slice(detail.types.into_iter().map(|t| c_string(t.kind.name)).collect());
        let (stats, stats_len) = into_raw_slice(
            detail
                .stats
                .into_iter()
                .map(|s| FfiStat {
                    name: c_string(s.stat.name),
                    base_stat: s.base_stat,
                })
                .collect(),
        );
        let (abilities, abilities_len) = into_raw_slice(
            detail
                .abilities
                .into_iter()
                .map(|a| FfiAbility {
                    name: c_string(a.ability.name),
                    is_hidden: a.is_hidden,
                })
                .collect(),
        );

        FfiPokemonDetail {
            id: detail.id.map_or(-1, i64::from),
            name: c_string(detail.name),
            height: detail.height.map_or(-1, i64::from),
            weight: detail.weight.map_or(-1, i64::from),
            front_sprite: detail
                .sprites
                .and_then(|s| s.front_default)
                .map_or(std::ptr::null_mut(), c_string),
            types,
            types_len,
            stats,
            stats_len,
            abilities,
            abilities_len,
            json: c_string(json),
        }
    }

    unsafe fn free_fields(&self) {
        drop_c_string(self.name);
        drop_c_string(self.front_sprite);
        drop_c_string(self.json);
        for name in from_raw_slice(self.types, self.types_len).iter() {
            drop_c_string(*name);
        }
        for stat in from_raw_slice(self.stats, self.stats_len).iter() {
            drop_c_string(stat.name);
        }
        for ability in from_raw_slice(self.abilities, self.abilities_len).iter() {
            drop_c_string(ability.name);
        }
    }
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiPokedexResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiPokedexResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiPokedexResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 200,
            data_tag,
            data,
        }))
    }

    fn failure(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiPokedexResult {
            error_code,
            error_message: c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a `FfiPokemonSummaryList`.
    pub(crate) fn ok_summary_list(summaries: Vec<PokemonSummary>) -> *mut Self {
        let items = summaries
            .into_iter()
            .map(|s| FfiPokemonSummary {
                id: s.id,
                name: c_string(s.name),
                url: c_string(s.url),
                image: c_string(s.image),
            })
            .collect();
        let (items, len) = into_raw_slice(items);
        let list = Box::new(FfiPokemonSummaryList { items, len });
        Self::ok(FfiDataTag::SummaryList, Box::into_raw(list) as *mut c_void)
    }

    /// Build a success result carrying a single `FfiPokemonDetail`.
    pub(crate) fn ok_detail(detail: PokemonDetail) -> *mut Self {
        let detail = Box::new(FfiPokemonDetail::from_core(detail));
        Self::ok(FfiDataTag::Detail, Box::into_raw(detail) as *mut c_void)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let (error_code, http_status) = match &err {
            ApiError::NotFound => (FfiErrorCode::NotFound, 404u16),
            ApiError::Http { status, .. } => (FfiErrorCode::Http, *status),
            ApiError::Network(_) => (FfiErrorCode::Network, 0),
            ApiError::Decode(_) => (FfiErrorCode::Decode, 0),
            ApiError::UnexpectedShape(_) => (FfiErrorCode::UnexpectedShape, 0),
            ApiError::InvalidIdentifier(_) => (FfiErrorCode::InvalidIdentifier, 0),
            ApiError::IdMismatch { .. } => (FfiErrorCode::IdMismatch, 0),
        };
        Self::failure(error_code, http_status, err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, 0, msg.to_string())
    }

    /// Release the envelope and whatever `data_tag` says `data` points to.
    pub(crate) unsafe fn free(result: *mut Self) {
        let result = Box::from_raw(result);
        drop_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::SummaryList => {
                let list = Box::from_raw(result.data as *mut FfiPokemonSummaryList);
                for item in from_raw_slice(list.items, list.len).iter() {
                    drop_c_string(item.name);
                    drop_c_string(item.url);
                    drop_c_string(item.image);
                }
            }
            FfiDataTag::Detail => {
                let detail = Box::from_raw(result.data as *mut FfiPokemonDetail);
                detail.free_fields();
            }
            FfiDataTag::None => {}
        }
    }
}
