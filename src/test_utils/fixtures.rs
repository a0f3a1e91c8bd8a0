use chrono::DateTime;
use serde_json::{json, Value};

use crate::model::Reading;

/// A raw page-result element as the consumption API would return it.
pub fn reading_json(consumption: f64, interval_start: &str, interval_end: &str) -> Value {
    json!({
        "consumption": consumption,
        "interval_start": interval_start,
        "interval_end": interval_end,
    })
}

/// A full consumption page body.
pub fn page_body(count: u64, next: Option<&str>, results: Vec<Value>) -> String {
    json!({
        "count": count,
        "next": next,
        "previous": null,
        "results": results,
    })
    .to_string()
}

/// A validated reading from RFC 3339 interval bounds.
pub fn reading(consumption: f64, interval_start: &str, interval_end: &str) -> Reading {
    Reading::new(
        consumption,
        DateTime::parse_from_rfc3339(interval_start).unwrap(),
        DateTime::parse_from_rfc3339(interval_end).unwrap(),
    )
    .unwrap()
}
