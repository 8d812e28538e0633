//! C-ABI wrapper around `pokedex-core`.
//!
//! # Overview
//! Exposes the sans-IO catalog API through `extern "C"` functions so a host
//! written in any language with a C FFI can build requests, execute them with
//! its own HTTP stack, and hand the responses back for status validation and
//! decoding. The host owns its fetch state; this layer only reports outcomes.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `build_*` / `parse_*` mirror `PokeApi` 1:1. A `build_*` call that
//!   returns null also hands the classified error back through its optional
//!   `error` out-parameter.
//! - A single `FfiResult` envelope with `FfiDataTag` + `void* data` conveys
//!   success payloads and errors uniformly; host-side network failures are
//!   wrapped in the same envelope via `pokedex_result_transport_error`.
//! - The C caller owns all returned pointers and must call the matching
//!   `pokedex_free_*` function to release them.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::catch_unwind;
use std::str::Utf8Error;

use pokedex_core::{ApiError, HttpResponse};

use types::*;

/// Borrow a C string as UTF-8.
///
/// # Safety
/// `s` must be non-null and NUL-terminated.
unsafe fn read_str<'a>(s: *const c_char) -> Result<&'a str, Utf8Error> {
    unsafe { CStr::from_ptr(s) }.to_str()
}

/// Hand a build failure to the caller through `out` (when non-null) and
/// return the null request.
fn build_failed(
    out: *mut *mut FfiResult,
    make: impl FnOnce() -> *mut FfiResult,
) -> *mut FfiHttpRequest {
    if !out.is_null() {
        unsafe { *out = make() };
    }
    std::ptr::null_mut()
}

fn clear_out(out: *mut *mut FfiResult) {
    if !out.is_null() {
        unsafe { *out = std::ptr::null_mut() };
    }
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new client bound to `base_url`.
///
/// Returns null if `base_url` is null or not UTF-8, or if an internal panic
/// occurs.
/// The caller must free the returned pointer with `pokedex_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_new(base_url: *const c_char) -> *mut FfiPokeApi {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(url) = (unsafe { read_str(base_url) }) else {
            return std::ptr::null_mut();
        };
        let api = pokedex_core::PokeApi::new(url);
        Box::into_raw(Box::new(FfiPokeApi { inner: api }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `pokedex_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_client_free(client: *mut FfiPokeApi) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the request for one catalog page.
///
/// Returns null if `client` is null or the URL cannot be composed. In that
/// case, if `error` is non-null, `*error` receives an `FfiResult` describing
/// the failure (free it with `pokedex_free_result`); on success `*error` is
/// set to null. The caller must free the returned request with
/// `pokedex_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_build_catalog(
    client: *const FfiPokeApi,
    limit: u32,
    offset: u32,
    error: *mut *mut FfiResult,
) -> *mut FfiHttpRequest {
    clear_out(error);
    catch_unwind(|| {
        if client.is_null() {
            return build_failed(error, || FfiResult::null_arg("client"));
        }
        let client = unsafe { &*client };
        match client.inner.build_catalog(limit, offset) {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(e) => build_failed(error, || FfiResult::from_error(e)),
        }
    })
    .unwrap_or_else(|_| {
        build_failed(error, || FfiResult::panic("panic in pokedex_build_catalog"))
    })
}

/// Build the request for a single record by numeric id or name.
///
/// Returns null if `client` or `identifier` is null, or if the identifier
/// cannot address a single record (empty, `..`, contains `/`, whitespace,
/// not UTF-8, ...). `error` behaves as in `pokedex_build_catalog`; an
/// unaddressable identifier is reported as `InvalidRequestUrl`.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_build_detail(
    client: *const FfiPokeApi,
    identifier: *const c_char,
    error: *mut *mut FfiResult,
) -> *mut FfiHttpRequest {
    clear_out(error);
    catch_unwind(|| {
        if client.is_null() {
            return build_failed(error, || FfiResult::null_arg("client"));
        }
        if identifier.is_null() {
            return build_failed(error, || FfiResult::null_arg("identifier"));
        }
        let client = unsafe { &*client };
        let result = match unsafe { read_str(identifier) } {
            Ok(identifier) => client.inner.build_detail(identifier),
            Err(e) => Err(ApiError::InvalidRequestUrl(format!("identifier is not UTF-8: {e}"))),
        };
        match result {
            Ok(req) => FfiHttpRequest::from_core(req),
            Err(e) => build_failed(error, || FfiResult::from_error(e)),
        }
    })
    .unwrap_or_else(|_| {
        build_failed(error, || FfiResult::panic("panic in pokedex_build_detail"))
    })
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body reads
/// as empty.
///
/// A 200 body that is not UTF-8 is a decode failure. Other statuses keep
/// their classification, since their bodies are never read.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> Result<HttpResponse, ApiError> {
    if resp.body.is_null() {
        return Ok(HttpResponse::new(resp.status, String::new()));
    }
    match unsafe { read_str(resp.body) } {
        Ok(body) => Ok(HttpResponse::new(resp.status, body)),
        Err(e) if resp.status == 200 => {
            Err(ApiError::Decode(format!("response body is not UTF-8: {e}")))
        }
        Err(_) => Ok(HttpResponse::new(resp.status, String::new())),
    }
}

/// Parse the response to a catalog request.
///
/// Returns a result with `data_tag = CatalogList` on success.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_parse_catalog(
    client: *const FfiPokeApi,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match ffi_response_to_core(resp).and_then(|r| client.inner.parse_catalog(r)) {
            Ok(items) => FfiResult::ok_catalog(items),
            Err(e) => FfiResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in pokedex_parse_catalog"))
}

/// Parse the response to a detail request.
///
/// Returns a result with `data_tag = Detail` on success.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_parse_detail(
    client: *const FfiPokeApi,
    response: *const FfiHttpResponse,
) -> *mut FfiResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiResult::null_arg("client");
        }
        if response.is_null() {
            return FfiResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        match ffi_response_to_core(resp).and_then(|r| client.inner.parse_detail(r)) {
            Ok(record) => FfiResult::ok_detail(record),
            Err(e) => FfiResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in pokedex_parse_detail"))
}

/// Wrap a host-side network failure (no response was obtained) in a result
/// envelope with `error_code = Transport`. A null `message` is allowed.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_result_transport_error(message: *const c_char) -> *mut FfiResult {
    catch_unwind(|| {
        let diagnostic = if message.is_null() {
            "unknown transport failure".to_string()
        } else {
            unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
        };
        FfiResult::from_error(ApiError::Transport(diagnostic))
    })
    .unwrap_or_else(|_| FfiResult::panic("panic in pokedex_result_transport_error"))
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
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        unsafe {
            free_c_string(req.url);
            for h in from_raw_array(req.headers, req.headers_len) {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiResult` returned by any `pokedex_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_result(result: *mut FfiResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        unsafe { free_c_string(result.error_message) };
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::CatalogList => {
                let list = unsafe { Box::from_raw(result.data as *mut FfiCatalogList) };
                for item in unsafe { from_raw_array(list.items, list.len) } {
                    unsafe {
                        free_c_string(item.name);
                        free_c_string(item.display_name);
                    }
                }
            }
            FfiDataTag::Detail => {
                let record = unsafe { Box::from_raw(result.data as *mut FfiDetailRecord) };
                unsafe { record.free_fields() };
            }
            FfiDataTag::None => {}
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn pokedex_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| unsafe { free_c_string(s) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
