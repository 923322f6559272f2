/// Key used by the document store for primary identifiers.
pub const RESERVED_KEY: &str = "_id";

/// Key the application expects for an entity's identity.
pub const CANONICAL_KEY: &str = "id";

/// Key mapping applied by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Key renamed wherever it appears in an object (default: `_id`)
    pub reserved_key: String,
    /// Key it is renamed to (default: `id`)
    pub canonical_key: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            reserved_key: RESERVED_KEY.to_string(),
            canonical_key: CANONICAL_KEY.to_string(),
        }
    }
}

impl Options {
    pub fn new(reserved_key: impl Into<String>, canonical_key: impl Into<String>) -> Self {
        Self {
            reserved_key: reserved_key.into(),
            canonical_key: canonical_key.into(),
        }
    }
}
