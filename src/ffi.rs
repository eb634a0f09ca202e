//! FFI interface for C++ interop
//!
//! Provides C-compatible functions for reading HTML tables.
//! Requests and results are passed as JSON.

use std::ffi::{c_char, CStr, CString};
use std::ptr;

use serde::Serialize;

use crate::error::Error;
use crate::reader::TableReader;
use crate::table::TableRequest;

/// Result struct returned to C++
/// Both pointers are owned by Rust and must be freed via free_table_result
#[repr(C)]
pub struct TableResultFFI {
    /// JSON-serialized result (null-terminated)
    pub json_ptr: *mut c_char,
    /// Error message if reading failed (null-terminated), or null on success
    pub error_ptr: *mut c_char,
}

/// Table contents as cell texts
#[derive(Debug, Serialize)]
pub struct TableOutput {
    pub headings: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read a table from HTML according to the request.
///
/// # Arguments
/// * `html_ptr` - Pointer to HTML content (UTF-8, not necessarily null-terminated)
/// * `html_len` - Length of HTML content in bytes
/// * `request_json` - JSON-serialized TableRequest (null-terminated)
///
/// # Returns
/// TableResultFFI with json_ptr set to `{"headings": [...], "rows": [[...]]}`
/// on success, or error_ptr set on failure
///
/// # Safety
/// - `html_ptr` must point to valid memory of at least `html_len` bytes
/// - `request_json` must be a valid null-terminated C string
/// - Caller must free the result via `free_table_result`
#[no_mangle]
pub unsafe extern "C" fn read_html_table(
    html_ptr: *const c_char,
    html_len: usize,
    request_json: *const c_char,
) -> TableResultFFI {
    let mut reader = match open_reader(html_ptr, html_len, request_json) {
        Ok(r) => r,
        Err(msg) => return make_error_result(&msg),
    };

    match read_output(&mut reader) {
        Ok(output) => make_json_result(&output),
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Read only the headings of a table (convenience function)
///
/// # Safety
/// Same as read_html_table
#[no_mangle]
pub unsafe extern "C" fn html_table_headings(
    html_ptr: *const c_char,
    html_len: usize,
    request_json: *const c_char,
) -> TableResultFFI {
    let mut reader = match open_reader(html_ptr, html_len, request_json) {
        Ok(r) => r,
        Err(msg) => return make_error_result(&msg),
    };

    match reader.headings() {
        Ok(headings) => {
            let names: Vec<&str> = headings.iter().map(|c| c.text.as_str()).collect();
            make_json_result(&names)
        }
        Err(e) => make_error_result(&e.to_string()),
    }
}

/// Free a TableResultFFI returned by this module
///
/// # Safety
/// - `result` must have been returned by `read_html_table` or `html_table_headings`
/// - Must only be called once per result
#[no_mangle]
pub unsafe extern "C" fn free_table_result(result: TableResultFFI) {
    if !result.json_ptr.is_null() {
        drop(CString::from_raw(result.json_ptr));
    }
    if !result.error_ptr.is_null() {
        drop(CString::from_raw(result.error_ptr));
    }
}

// Decode the raw inputs into a reader
unsafe fn open_reader(
    html_ptr: *const c_char,
    html_len: usize,
    request_json: *const c_char,
) -> Result<TableReader, String> {
    let html = if html_ptr.is_null() || html_len == 0 {
        ""
    } else {
        let slice = std::slice::from_raw_parts(html_ptr as *const u8, html_len);
        std::str::from_utf8(slice).map_err(|_| "Invalid UTF-8 in HTML content".to_string())?
    };

    if request_json.is_null() {
        return Err("Request JSON is null".to_string());
    }
    let request_str = CStr::from_ptr(request_json)
        .to_str()
        .map_err(|_| "Invalid UTF-8 in request JSON".to_string())?;

    let request: TableRequest = serde_json::from_str(request_str)
        .map_err(|e| Error::InvalidRequest(e).to_string())?;

    Ok(TableReader::parse(html, request))
}

fn read_output(reader: &mut TableReader) -> crate::error::Result<TableOutput> {
    let headings = reader.headings()?.iter().map(|c| c.text.clone()).collect();
    let rows = reader.rows()?;
    Ok(TableOutput { headings, rows })
}

fn make_json_result<T: Serialize + ?Sized>(value: &T) -> TableResultFFI {
    match serde_json::to_string(value) {
        Ok(json) => match CString::new(json) {
            Ok(cstr) => TableResultFFI {
                json_ptr: cstr.into_raw(),
                error_ptr: ptr::null_mut(),
            },
            Err(_) => make_error_result("Result JSON contains null bytes"),
        },
        Err(e) => make_error_result(&format!("Failed to serialize result: {}", e)),
    }
}

// Helper to create error result
fn make_error_result(msg: &str) -> TableResultFFI {
    let error_cstr = CString::new(msg.replace('\0', " ")).unwrap_or_default();
    TableResultFFI {
        json_ptr: ptr::null_mut(),
        error_ptr: error_cstr.into_raw(),
    }
}
