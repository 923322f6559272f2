#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::{arbitrary, fuzz_target};
use serde_json::{Map, Number, Value};

const MAX_DEPTH: usize = 8;
const MAX_ARRAY_SIZE: usize = 20;
const MAX_OBJECT_SIZE: usize = 20;

/// Keys biased towards the ones the normalizer cares about.
const KEYS: &[&str] = &["_id", "id", "data", "name", "items"];

#[derive(Arbitrary, Debug)]
struct FuzzValue {
    choice: u8,
}

impl FuzzValue {
    fn to_json_value(&self, u: &mut arbitrary::Unstructured, depth: usize) -> arbitrary::Result<Value> {
        if depth >= MAX_DEPTH {
            return Ok(Value::Null);
        }

        Ok(match self.choice % 8 {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: i64 = u.arbitrary()?;
                Value::Number(Number::from(n))
            }
            3 => {
                let s: String = u.arbitrary()?;
                Value::String(s)
            }
            4 | 5 => {
                let size = u.int_in_range(0..=MAX_ARRAY_SIZE)?;
                let mut arr = Vec::with_capacity(size);
                for _ in 0..size {
                    let fv: FuzzValue = u.arbitrary()?;
                    arr.push(fv.to_json_value(u, depth + 1)?);
                }
                Value::Array(arr)
            }
            _ => {
                let size = u.int_in_range(0..=MAX_OBJECT_SIZE)?;
                let mut obj = Map::new();
                for _ in 0..size {
                    let key = if u.arbitrary::<bool>()? {
                        (*u.choose(KEYS)?).to_string()
                    } else {
                        u.arbitrary::<String>()?
                    };
                    let fv: FuzzValue = u.arbitrary()?;
                    obj.insert(key, fv.to_json_value(u, depth + 1)?);
                }
                Value::Object(obj)
            }
        })
    }
}

/// Every object that had `_id` must now carry its (normalized) value under `id`.
fn check(before: &Value, after: &Value) {
    match (before, after) {
        (Value::Object(b), Value::Object(a)) => {
            assert!(!a.contains_key("_id"));
            for (k, bv) in b {
                if k == "id" && b.contains_key("_id") {
                    continue;
                }
                let out_key = if k == "_id" { "id" } else { k.as_str() };
                let av = a.get(out_key).expect("key dropped");
                check(bv, av);
            }
        }
        (Value::Array(b), Value::Array(a)) => {
            assert_eq!(b.len(), a.len());
            for (bv, av) in b.iter().zip(a) {
                check(bv, av);
            }
        }
        (b, a) => assert_eq!(b, a),
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = arbitrary::Unstructured::new(data);

    if let Ok(fv) = u.arbitrary::<FuzzValue>() {
        if let Ok(value) = fv.to_json_value(&mut u, 0) {
            let out = gradbook::normalize(&value);
            check(&value, &out);
            assert_eq!(gradbook::normalize(&out), out);
        }
    }
});
