//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversion functions live here
//! to keep `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use pokedex_core::{ApiError, CatalogItem, DetailRecord, HttpRequest};

/// Opaque handle to a `PokeApi`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiPokeApi {
    pub(crate) inner: pokedex_core::PokeApi,
}

// ---------------------------------------------------------------------------
// Allocation helpers
// ---------------------------------------------------------------------------

/// Heap-allocate `s` as a C string. Interior NULs yield an empty string.
pub(crate) fn into_c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

/// Null stays null; anything else must come from `into_c_string`.
pub(crate) unsafe fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Hand a `Vec` to C as pointer + length. Empty vectors become null.
pub(crate) fn into_raw_array<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let len = items.len() as u32;
    let ptr = Box::into_raw(items.into_boxed_slice()) as *mut T;
    (ptr, len)
}

/// Reclaim an array produced by `into_raw_array`.
pub(crate) unsafe fn from_raw_array<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A GET request described as C-compatible plain data.
///
/// Built by `pokedex_build_*` functions. The C caller executes the request
/// and passes the response back through `pokedex_parse_*`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: into_c_string(k),
                value: into_c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_array(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            url: into_c_string(req.url),
            headers,
            headers_len,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing a request, then
/// passes a pointer to a `pokedex_parse_*` function. The FFI layer reads but
/// does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidRequestUrl = 1,
    Transport = 2,
    HttpStatus = 3,
    Decode = 4,
    Panic = 5,
    NullArg = 6,
}

/// Tag that tells `pokedex_free_result` what `FfiResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    CatalogList = 1,
    Detail = 2,
}

/// One catalog row exposed to C.
#[repr(C)]
pub struct FfiCatalogItem {
    pub id: u64,
    pub name: *mut c_char,
    pub display_name: *mut c_char,
}

#[repr(C)]
pub struct FfiCatalogList {
    pub items: *mut FfiCatalogItem,
    pub len: u32,
}

#[repr(C)]
pub struct FfiTypeSlot {
    pub slot: u32,
    pub name: *mut c_char,
}

#[repr(C)]
pub struct FfiStat {
    pub name: *mut c_char,
    pub base_value: u32,
    pub effort: u32,
}

/// A detail record exposed to C.
///
/// `base_experience` is meaningful only when `has_base_experience` is true.
/// `image_url` is null when the record has no usable image.
#[repr(C)]
pub struct FfiDetailRecord {
    pub id: u64,
    pub name: *mut c_char,
    pub display_name: *mut c_char,
    pub height: u32,
    pub weight: u32,
    pub has_base_experience: bool,
    pub base_experience: u32,
    pub types: *mut FfiTypeSlot,
    pub types_len: u32,
    pub types_display: *mut c_char,
    pub stats: *mut FfiStat,
    pub stats_len: u32,
    pub image_url: *mut c_char,
}

impl FfiDetailRecord {
    fn from_core(record: DetailRecord) -> Self {
        let display_name = into_c_string(record.display_name());
        let types_display = into_c_string(record.types_display());
        let image_url = match record.image_url() {
            Some(url) => into_c_string(url.as_str()),
            None => std::ptr::null_mut(),
        };
        let (types, types_len) = into_raw_array(
            record
                .types
                .into_iter()
                .map(|t| FfiTypeSlot {
                    slot: t.slot,
                    name: into_c_string(t.type_name),
                })
                .collect(),
        );
        let (stats, stats_len) = into_raw_array(
            record
                .stats
                .into_iter()
                .map(|s| FfiStat {
                    name: into_c_string(s.stat_name),
                    base_value: s.base_value,
                    effort: s.effort,
                })
                .collect(),
        );

        FfiDetailRecord {
            id: record.id,
            name: into_c_string(record.name),
            display_name,
            height: record.height,
            weight: record.weight,
            has_base_experience: record.base_experience.is_some(),
            base_experience: record.base_experience.unwrap_or_default(),
            types,
            types_len,
            types_display,
            stats,
            stats_len,
            image_url,
        }
    }

    /// Free every allocation owned by this record (but not the struct itself).
    pub(crate) unsafe fn free_fields(&self) {
        unsafe {
            free_c_string(self.name);
            free_c_string(self.display_name);
            free_c_string(self.types_display);
            free_c_string(self.image_url);
            for t in from_raw_array(self.types, self.types_len) {
                free_c_string(t.name);
            }
            for s in from_raw_array(self.stats, self.stats_len) {
                free_c_string(s.name);
            }
        }
    }
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the parsed payload (tagged by `data_tag`).
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null. `http_status` is set for
/// `HttpStatus` errors and zero otherwise.
#[repr(C)]
pub struct FfiResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            data_tag,
            data,
        }))
    }

    fn err(error_code: FfiErrorCode, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiResult {
            error_code,
            error_message: into_c_string(msg),
            http_status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Build a success result carrying a `FfiCatalogList`.
    pub(crate) fn ok_catalog(items: Vec<CatalogItem>) -> *mut Self {
        let items: Vec<FfiCatalogItem> = items
            .into_iter()
            .map(|item| FfiCatalogItem {
                id: item.id,
                display_name: into_c_string(item.display_name()),
                name: into_c_string(item.name),
            })
            .collect();
        let (items, len) = into_raw_array(items);
        let list = Box::new(FfiCatalogList { items, len });
        Self::ok(FfiDataTag::CatalogList, Box::into_raw(list) as *mut c_void)
    }

    /// Build a success result carrying a single `FfiDetailRecord`.
    pub(crate) fn ok_detail(record: DetailRecord) -> *mut Self {
        let record = Box::new(FfiDetailRecord::from_core(record));
        Self::ok(FfiDataTag::Detail, Box::into_raw(record) as *mut c_void)
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let code = match &err {
            ApiError::InvalidRequestUrl(_) => FfiErrorCode::InvalidRequestUrl,
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::HttpStatus { .. } => FfiErrorCode::HttpStatus,
            ApiError::Decode(_) => FfiErrorCode::Decode,
        };
        Self::err(code, err.status().unwrap_or(0), err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::err(FfiErrorCode::NullArg, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::err(FfiErrorCode::Panic, 0, msg.to_string())
    }
}
