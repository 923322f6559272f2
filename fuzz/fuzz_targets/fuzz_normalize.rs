#![no_main]
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fn has_reserved(v: &Value) -> bool {
    match v {
        Value::Object(m) => m.contains_key("_id") || m.values().any(has_reserved),
        Value::Array(a) => a.iter().any(has_reserved),
        _ => false,
    }
}

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(value) = serde_json::from_str::<Value>(s) {
            let once = gradbook::normalize(&value);
            assert!(!has_reserved(&once), "reserved key survived: {}", once);
            assert_eq!(gradbook::normalize(&once), once, "not idempotent");
        }
    }
});
