use chrono::{DateTime, Utc};
use serde_derive::Serialize;
use std::fmt;

/// Result ordering for consumption queries, by interval period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderBy {
    #[serde(rename = "period")]
    Forward,
    #[serde(rename = "-period")]
    Backward,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OrderBy::Forward => write!(f, "period"),
            OrderBy::Backward => write!(f, "-period"),
        }
    }
}

/// Query options for the consumption endpoints.
///
/// Unset options are omitted from the query string entirely, so the provider
/// applies its own defaults. `page` is 1-based.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsumptionOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_order_by_display() {
        assert_eq!(OrderBy::Forward.to_string(), "period");
        assert_eq!(OrderBy::Backward.to_string(), "-period");
    }

    #[test]
    fn test_unset_options_are_omitted() {
        let opts = ConsumptionOptions::default();
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_set_options_serialize_with_api_names() {
        let opts = ConsumptionOptions {
            period_from: Some(Utc.with_ymd_and_hms(2022, 6, 1, 0, 0, 0).unwrap()),
            period_to: None,
            page_size: Some(25),
            page: Some(2),
            order_by: Some(OrderBy::Backward),
        };
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["page"], 2);
        assert_eq!(json["page_size"], 25);
        assert_eq!(json["order_by"], "-period");
        assert!(json.get("period_to").is_none());
    }
}
