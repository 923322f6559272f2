//! Client core of the GradBook admin console.
//!
//! - [`normalize`]: rename the backend's `_id` keys to `id` throughout a JSON tree
//! - [`envelope`]: decode `{success, data, message}` envelopes and their bare fallbacks
//! - [`client`] and [`resources`]: authenticated calls for every admin screen
//! - [`store`]: persisted session and UI preferences

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod model;
pub mod normalize;
pub mod options;
pub mod resources;
pub mod store;
pub mod transport;

pub use crate::client::ApiClient;
pub use crate::config::ClientConfig;
pub use crate::envelope::{Envelope, EnvelopeKind, PageRequest};
pub use crate::error::{Error, Result};
pub use crate::normalize::{normalize, normalize_in_place, normalize_value, normalize_with};
pub use crate::options::Options;
pub use crate::store::{FileStore, KeyValueStore, MemoryStore};
pub use crate::transport::{ApiRequest, Method, RawResponse, Transport};

#[cfg(feature = "http")]
pub use crate::transport::HttpTransport;

use std::io::Read;

use serde_json::Value;

/// Parse a response body. An empty or all-whitespace body is `null`.
pub fn parse_body(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(body)?)
}

/// Parse a JSON document and normalize it.
pub fn normalize_str(s: &str, options: &Options) -> Result<Value> {
    Ok(normalize_value(parse_body(s)?, options))
}

pub fn normalize_reader<R: Read>(mut reader: R, options: &Options) -> Result<Value> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    normalize_str(&s, options)
}
