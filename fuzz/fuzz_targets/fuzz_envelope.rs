#![no_main]
use gradbook::{Envelope, PageRequest};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(value) = serde_json::from_str::<Value>(s) {
            let body = gradbook::normalize(&value);
            let _ = Envelope::from_value(body.clone()).into_page::<Value>(&PageRequest::default());
            let _ = Envelope::from_value(body.clone()).into_list::<Value>();
            let _ = Envelope::from_value(body).into_item::<Value>();
        }
    }
});
