use gradbook::{Options, normalize, normalize_with};
use serde_json::{Map, Value, json};

fn corpus() -> Vec<Value> {
    vec![
        json!(null),
        json!(42),
        json!("s"),
        json!([1, 2, 3]),
        json!({}),
        json!([]),
        json!({"_id": "x", "a": {"_id": "y"}}),
        json!([{"_id": 1}, {"_id": 2}, null, "x", [{"_id": 3}]]),
        json!({"_id": "x", "id": "stale", "tags": [{"_id": "t1", "name": "ai"}]}),
        json!({"success": true, "data": {"data": [{"_id": "u1", "campus": {"_id": "c1"}}]}}),
    ]
}

#[test]
fn idempotent() {
    for t in corpus() {
        let once = normalize(&t);
        assert_eq!(normalize(&once), once, "not idempotent for {}", t);
    }
}

#[test]
fn renames_at_depth() {
    let v = json!({"_id": "x", "a": {"_id": "y"}});
    assert_eq!(normalize(&v), json!({"id": "x", "a": {"id": "y"}}));
}

#[test]
fn traverses_arrays_in_order() {
    let v = json!([{"_id": 1}, {"_id": 2}]);
    let out = normalize(&v);
    assert_eq!(out, json!([{"id": 1}, {"id": 2}]));
    assert_eq!(out.as_array().map(Vec::len), Some(2));
}

#[test]
fn non_records_pass_through() {
    assert_eq!(normalize(&json!(42)), json!(42));
    assert_eq!(normalize(&json!("s")), json!("s"));
    assert_eq!(normalize(&json!(null)), json!(null));
    assert_eq!(normalize(&json!([1, 2, 3])), json!([1, 2, 3]));
    assert_eq!(normalize(&json!(true)), json!(true));
}

#[test]
fn keeps_other_keys() {
    let out = normalize(&json!({"_id": "x", "name": "y"}));
    assert_eq!(out, json!({"id": "x", "name": "y"}));
}

#[test]
fn reserved_key_wins_tie() {
    assert_eq!(normalize(&json!({"_id": "x", "id": "stale"})), json!({"id": "x"}));
    assert_eq!(normalize(&json!({"id": "stale", "_id": "x"})), json!({"id": "x"}));
}

#[test]
fn empty_structures() {
    assert_eq!(normalize(&json!({})), json!({}));
    assert_eq!(normalize(&json!([])), json!([]));
}

#[test]
fn mixed_sequence() {
    let v = json!([null, 1, "a", false, {"_id": 0}, [], {}]);
    assert_eq!(normalize(&v), json!([null, 1, "a", false, {"id": 0}, [], {}]));
}

fn nested(depth: usize) -> Value {
    let mut v = Value::Null;
    for level in (0..depth).rev() {
        let mut m = Map::new();
        m.insert("_id".to_string(), Value::from(level as u64));
        m.insert("child".to_string(), v);
        v = Value::Object(m);
    }
    v
}

fn check_nested(mut v: &Value, depth: usize) {
    for level in 0..depth {
        let obj = v.as_object().expect("object at every level");
        assert!(!obj.contains_key("_id"), "reserved key left at level {level}");
        assert_eq!(obj.get("id"), Some(&Value::from(level as u64)));
        v = &obj["child"];
    }
    assert_eq!(v, &Value::Null);
}

#[test]
fn deep_nesting_50() {
    let out = normalize(&nested(50));
    check_nested(&out, 50);
}

#[test]
fn deep_nesting_500() {
    let out = normalize(&nested(500));
    check_nested(&out, 500);
}

#[test]
fn custom_key_mapping() {
    let opts = Options::new("uuid", "key");
    let v = json!({"uuid": "a", "_id": "b", "items": [{"uuid": "c"}]});
    assert_eq!(
        normalize_with(&v, &opts),
        json!({"key": "a", "_id": "b", "items": [{"key": "c"}]})
    );
}

#[test]
fn normalize_str_parses_and_renames() -> Result<(), Box<dyn std::error::Error>> {
    let v = gradbook::normalize_str(r#"{"_id": "65f1", "n": [ {"_id": 2} ]}"#, &Options::default())?;
    assert_eq!(v, json!({"id": "65f1", "n": [{"id": 2}]}));
    Ok(())
}

#[test]
fn normalize_reader_empty_is_null() -> Result<(), Box<dyn std::error::Error>> {
    let v = gradbook::normalize_reader("  \n".as_bytes(), &Options::default())?;
    assert_eq!(v, Value::Null);
    Ok(())
}

#[test]
fn parse_body_blank_is_null_and_garbage_errors() -> Result<(), Box<dyn std::error::Error>> {
    assert_eq!(gradbook::parse_body("")?, Value::Null);
    assert_eq!(gradbook::normalize_str(" \t", &Options::default())?, Value::Null);
    assert!(matches!(gradbook::parse_body("Deleted"), Err(gradbook::Error::SerdeJson(_))));
    Ok(())
}
