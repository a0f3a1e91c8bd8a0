//! Consumption readings and the decoding of API pages into them.
//!
//! A [`Reading`] is one validated consumption interval. It is immutable after
//! construction, stores its interval bounds in UTC regardless of the offset
//! the provider sent, and deduplicates by the identity of all three of its
//! attributes so it can live in a set.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, TimeZone, Utc};
use serde_derive::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ApiError, ValidationError};

/// One page of consumption results, as returned by the consumption endpoints.
///
/// `results` is kept as raw JSON so that per-element decoding failures can
/// report the offending index and field.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Value>,
}

impl Page {
    /// Decodes a response body into a page.
    ///
    /// A body that is not a JSON object or lacks the `results` field fails
    /// with [`ApiError::MalformedResponse`].
    pub fn decode(body: &str) -> Result<Page, ApiError> {
        serde_json::from_str(body).map_err(ApiError::malformed)
    }
}

/// An immutable, validated consumption reading for one interval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ReadingRepr")]
pub struct Reading {
    consumption: f64,
    interval_start: DateTime<Utc>,
    interval_end: DateTime<Utc>,
}

/// Wire representation of a reading; converted into [`Reading`] through the
/// validating constructor so deserialized data obeys the same invariants.
#[derive(Debug, Deserialize)]
struct ReadingRepr {
    consumption: f64,
    interval_start: DateTime<chrono::FixedOffset>,
    interval_end: DateTime<chrono::FixedOffset>,
}

impl TryFrom<ReadingRepr> for Reading {
    type Error = ValidationError;

    fn try_from(repr: ReadingRepr) -> Result<Self, Self::Error> {
        Reading::new(repr.consumption, repr.interval_start, repr.interval_end)
    }
}

impl Reading {
    /// Creates a reading, validating consumption and coercing both interval
    /// bounds to the equivalent UTC instant.
    ///
    /// The negated comparison also rejects NaN, which keeps the bit-level
    /// equality and hashing below well defined.
    pub fn new<Tz: TimeZone>(
        consumption: f64,
        interval_start: DateTime<Tz>,
        interval_end: DateTime<Tz>,
    ) -> Result<Self, ValidationError> {
        if !(consumption >= 0.0) {
            return Err(ValidationError::NegativeConsumption { value: consumption });
        }
        Ok(Self {
            consumption,
            interval_start: interval_start.with_timezone(&Utc),
            interval_end: interval_end.with_timezone(&Utc),
        })
    }

    pub fn consumption(&self) -> f64 {
        self.consumption
    }

    pub fn interval_start(&self) -> DateTime<Utc> {
        self.interval_start
    }

    pub fn interval_end(&self) -> DateTime<Utc> {
        self.interval_end
    }

    /// Decodes every reading on a page, in provider order.
    ///
    /// The first element that fails validation aborts the decode with an
    /// error naming its index and field.
    pub fn decode_page(page: &Page) -> Result<Vec<Reading>, ApiError> {
        let mut readings = Vec::with_capacity(page.results.len());
        for (index, raw) in page.results.iter().enumerate() {
            readings.push(Self::from_page_element(index, raw)?);
        }
        Ok(readings)
    }

    fn from_page_element(index: usize, raw: &Value) -> Result<Reading, ValidationError> {
        let consumption = require(raw, index, "consumption")?
            .as_f64()
            .ok_or_else(|| ValidationError::element(index, "consumption", "expected a number"))?;
        let interval_start = instant_field(raw, index, "interval_start")?;
        let interval_end = instant_field(raw, index, "interval_end")?;

        Reading::new(consumption, interval_start, interval_end)
            .map_err(|e| ValidationError::element(index, "consumption", e))
    }
}

fn require<'a>(raw: &'a Value, index: usize, field: &'static str) -> Result<&'a Value, ValidationError> {
    raw.get(field)
        .ok_or_else(|| ValidationError::element(index, field, "missing"))
}

fn instant_field(
    raw: &Value,
    index: usize,
    field: &'static str,
) -> Result<DateTime<chrono::FixedOffset>, ValidationError> {
    let text = require(raw, index, field)?
        .as_str()
        .ok_or_else(|| ValidationError::element(index, field, "expected a timestamp string"))?;
    DateTime::parse_from_rfc3339(text).map_err(|e| ValidationError::element(index, field, e))
}

// Identity is the full (consumption, interval_start, interval_end) triple.
// Consumption compares by bit pattern; validation guarantees it is never NaN.
impl PartialEq for Reading {
    fn eq(&self, other: &Self) -> bool {
        self.consumption.to_bits() == other.consumption.to_bits()
            && self.interval_start == other.interval_start
            && self.interval_end == other.interval_end
    }
}

impl Eq for Reading {}

impl Hash for Reading {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.consumption.to_bits().hash(state);
        self.interval_start.hash(state);
        self.interval_end.hash(state);
    }
}
