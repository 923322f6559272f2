//! Identifier normalization for API payloads.
//!
//! The backend stores documents keyed by `_id`; the rest of the client expects
//! `id`. Every successful response body goes through [`normalize`] before it is
//! decoded, so the rename happens once, at the boundary, for every nesting level.
//!
//! Rules:
//! - Arrays are rewritten element-wise; order and length are kept
//! - Objects have the reserved key emitted under the canonical key, in the
//!   reserved key's position; every other entry keeps its key and position
//! - When both keys are present the reserved key's value wins, whichever
//!   comes first
//! - Primitives and `null` pass through unchanged
//!
//! The rename pass in [`normalize_in_place`] walks the tree with an explicit
//! work stack. [`normalize`] and [`normalize_with`] clone the input first, and
//! `Clone` and `Drop` of `serde_json::Value` recurse, so very deep trees still
//! cost call stack there. Parsed input is capped by serde_json's recursion
//! limit.

use serde_json::{Map, Value};

use crate::options::Options;

/// Normalize `value` with the default `_id` → `id` mapping, returning a new tree.
pub fn normalize(value: &Value) -> Value {
    normalize_with(value, &Options::default())
}

/// Normalize `value` with a custom key mapping, returning a new tree.
pub fn normalize_with(value: &Value, options: &Options) -> Value {
    let mut out = value.clone();
    normalize_in_place(&mut out, options);
    out
}

/// Normalize an owned tree, reusing its allocations.
pub fn normalize_value(mut value: Value, options: &Options) -> Value {
    normalize_in_place(&mut value, options);
    value
}

/// Rewrite `value` in place. Callers that must keep the original use [`normalize`].
pub fn normalize_in_place(value: &mut Value, options: &Options) {
    if options.reserved_key == options.canonical_key {
        return;
    }
    let mut stack: Vec<&mut Value> = vec![value];
    while let Some(node) = stack.pop() {
        match node {
            Value::Array(items) => stack.extend(items.iter_mut()),
            Value::Object(map) => {
                if map.contains_key(&options.reserved_key) {
                    rename_reserved(map, options);
                }
                stack.extend(map.values_mut());
            }
            _ => {}
        }
    }
}

/// Rebuild `map` with the reserved key renamed, dropping any stale canonical entry.
fn rename_reserved(map: &mut Map<String, Value>, options: &Options) {
    let entries = std::mem::take(map);
    for (key, value) in entries {
        if key == options.canonical_key {
            continue;
        }
        if key == options.reserved_key {
            map.insert(options.canonical_key.clone(), value);
        } else {
            map.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rename_keeps_sibling_order() {
        let input = json!({"name": "Ada", "_id": "u1", "email": "ada@example.edu"});
        let out = normalize(&input);
        let keys: Vec<&str> = out.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "id", "email"]);
    }

    #[test]
    fn test_stale_canonical_before_reserved() {
        let input = json!({"id": "stale", "name": "x", "_id": "fresh"});
        let out = normalize(&input);
        assert_eq!(out, json!({"name": "x", "id": "fresh"}));
    }

    #[test]
    fn test_identical_keys_is_noop() {
        let input = json!({"_id": 1, "id": 2});
        let out = normalize_with(&input, &Options::new("id", "id"));
        assert_eq!(out, input);
    }

    #[test]
    fn test_reserved_value_is_normalized() {
        let input = json!({"_id": {"_id": "inner"}});
        assert_eq!(normalize(&input), json!({"id": {"id": "inner"}}));
    }

    #[test]
    fn test_input_untouched() {
        let input = json!({"_id": 7});
        let _ = normalize(&input);
        assert_eq!(input, json!({"_id": 7}));
    }
}
