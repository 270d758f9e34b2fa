use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Rounds every decimal value in a JSON tree to 6 decimal places. Decimal
/// fields serialize as strings (rust_decimal's `serde-with-str` feature), so
/// this walks strings that parse cleanly as a `Decimal` as well as bare JSON
/// numbers, leaving everything else (enum tags, names, dates) untouched.
pub fn round_output(value: &mut Value) {
    match value {
        Value::String(s) => {
            if let Ok(d) = Decimal::from_str(s) {
                *s = d.round_dp(6).normalize().to_string();
            }
        }
        Value::Number(n) => {
            if let Some(d) = n.as_f64().and_then(|f| Decimal::from_str(&f.to_string()).ok()) {
                if let Ok(rounded) = serde_json::Number::from_str(&d.round_dp(6).normalize().to_string()) {
                    *n = rounded;
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                round_output(item);
            }
        }
        Value::Object(map) => {
            for (_, v) in map.iter_mut() {
                round_output(v);
            }
        }
        Value::Bool(_) | Value::Null => {}
    }
}
