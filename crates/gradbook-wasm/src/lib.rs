use gradbook::{Envelope, Options, PageRequest};
use serde_json::Value;
use wasm_bindgen::prelude::*;

/// Use wee_alloc as the global allocator for smaller WASM binary size
#[cfg(feature = "size_opt")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Maximum input size in bytes (10 MB)
const MAX_INPUT_SIZE: usize = 10 * 1024 * 1024;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

fn parse_body(json_str: &str) -> Result<Value, String> {
    if json_str.len() > MAX_INPUT_SIZE {
        return Err(format!(
            "Input exceeds maximum size limit of {} bytes",
            MAX_INPUT_SIZE
        ));
    }
    gradbook::parse_body(json_str).map_err(|e| format!("Invalid JSON: {}", e))
}

fn to_json(value: &Value, pretty: bool) -> Result<String, String> {
    if pretty {
        serde_json::to_string_pretty(value).map_err(|e| format!("JSON encoding error: {}", e))
    } else {
        serde_json::to_string(value).map_err(|e| format!("JSON encoding error: {}", e))
    }
}

/// Rename `_id` keys to `id` throughout a JSON response body
#[wasm_bindgen]
pub fn normalize_json(json_str: &str, pretty: bool) -> Result<String, String> {
    let value = gradbook::normalize_value(parse_body(json_str)?, &Options::default());
    to_json(&value, pretty)
}

/// Name the shape of a response body: `enveloped`, `bare_array`, `bare_record` or `empty`
#[wasm_bindgen]
pub fn envelope_kind(json_str: &str) -> Result<String, String> {
    let envelope = Envelope::from_value(parse_body(json_str)?);
    Ok(envelope.kind().as_str().to_string())
}

/// Normalize a listing response and project it to `{data, pagination}`.
/// `page` and `limit` of 0 mean "not requested".
#[wasm_bindgen]
pub fn decode_page_json(json_str: &str, page: u32, limit: u32) -> Result<String, String> {
    let body = gradbook::normalize_value(parse_body(json_str)?, &Options::default());
    let request = PageRequest::new(
        (page > 0).then_some(page as u64),
        (limit > 0).then_some(limit as u64),
    );
    let decoded = Envelope::from_value(body)
        .into_page::<Value>(&request)
        .map_err(|e| format!("Decoding error: {}", e))?;
    let value = serde_json::to_value(&decoded).map_err(|e| format!("JSON encoding error: {}", e))?;
    to_json(&value, false)
}

/// Get the version of the bindings
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
