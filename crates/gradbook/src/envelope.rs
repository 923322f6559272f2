//! Decoding of the backend's response shapes.
//!
//! Most endpoints wrap their payload as `{"success": .., "data": .., "message": ..}`,
//! but some return a bare array, a bare object, or nothing at all. [`Envelope`]
//! names each shape once so callers project from a closed set of variants
//! instead of probing the JSON themselves.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::model::{DEFAULT_PAGE_SIZE, Page, Pagination};

/// Requested page, used to synthesize pagination for bare arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRequest {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageRequest {
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self { page, limit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    Enveloped,
    BareArray,
    BareRecord,
    Empty,
}

impl EnvelopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeKind::Enveloped => "enveloped",
            EnvelopeKind::BareArray => "bare_array",
            EnvelopeKind::BareRecord => "bare_record",
            EnvelopeKind::Empty => "empty",
        }
    }
}

impl core::fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// `{"data": ..}` with a truthy payload.
    Enveloped {
        success: Option<bool>,
        data: Value,
        message: Option<String>,
    },
    BareArray(Vec<Value>),
    /// An object without a usable `data` field; treated as the payload itself.
    BareRecord(Map<String, Value>),
    Empty,
}

/// Loose truthiness used by the backend contract: `null`, `false`, `0` and `""` are empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl Envelope {
    pub fn from_value(body: Value) -> Self {
        match body {
            Value::Object(mut map) => {
                if map.get("data").is_some_and(is_truthy) {
                    let data = map.remove("data").unwrap_or_default();
                    Envelope::Enveloped {
                        success: map.get("success").and_then(Value::as_bool),
                        message: map.get("message").and_then(Value::as_str).map(str::to_owned),
                        data,
                    }
                } else {
                    Envelope::BareRecord(map)
                }
            }
            Value::Array(items) => Envelope::BareArray(items),
            _ => Envelope::Empty,
        }
    }

    pub fn kind(&self) -> EnvelopeKind {
        match self {
            Envelope::Enveloped { .. } => EnvelopeKind::Enveloped,
            Envelope::BareArray(_) => EnvelopeKind::BareArray,
            Envelope::BareRecord(_) => EnvelopeKind::BareRecord,
            Envelope::Empty => EnvelopeKind::Empty,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Envelope::Enveloped { message, .. } => message.as_deref(),
            Envelope::BareRecord(map) => map.get("message").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Project a listing. Bare arrays become a single page sized from `request`;
    /// anything else without a payload is an empty first page.
    pub fn into_page<T: DeserializeOwned>(self, request: &PageRequest) -> Result<Page<T>> {
        match self {
            Envelope::Enveloped { data, .. } => Ok(serde_json::from_value(data)?),
            Envelope::BareArray(items) => {
                let total_items = items.len() as u64;
                let data = decode_items(items)?;
                Ok(Page {
                    data,
                    pagination: Pagination {
                        current_page: request.page.filter(|&p| p > 0).unwrap_or(1),
                        total_pages: 1,
                        total_items,
                        items_per_page: request.limit.filter(|&l| l > 0).unwrap_or(DEFAULT_PAGE_SIZE),
                    },
                })
            }
            Envelope::BareRecord(_) | Envelope::Empty => Ok(Page::empty()),
        }
    }

    /// Project an unpaginated collection.
    pub fn into_list<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        match self {
            Envelope::Enveloped { data, .. } => Ok(serde_json::from_value(data)?),
            Envelope::BareArray(items) => decode_items(items),
            Envelope::BareRecord(_) | Envelope::Empty => Ok(Vec::new()),
        }
    }

    /// Project a single entity: the envelope payload when present, else the body itself.
    pub fn into_item<T: DeserializeOwned>(self) -> Result<T> {
        match self {
            Envelope::Enveloped { data, .. } => Ok(serde_json::from_value(data)?),
            Envelope::BareArray(items) => Ok(serde_json::from_value(Value::Array(items))?),
            Envelope::BareRecord(map) => Ok(serde_json::from_value(Value::Object(map))?),
            Envelope::Empty => Err(Error::EmptyBody),
        }
    }

    /// Like [`Envelope::into_item`], but an empty body yields `T::default()`.
    pub fn into_item_or_default<T: DeserializeOwned + Default>(self) -> Result<T> {
        match self {
            Envelope::Empty => Ok(T::default()),
            other => other.into_item(),
        }
    }
}

impl From<Value> for Envelope {
    fn from(body: Value) -> Self {
        Envelope::from_value(body)
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>> {
    items
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(Error::from))
        .collect()
}
