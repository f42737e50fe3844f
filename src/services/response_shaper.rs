//! Turns query rows into the JSON objects served by the API.
//!
//! Objects are `serde_json::Map`s built with the `preserve_order` feature, so
//! keys serialize in the order the query produced them. Re-inserting a key
//! replaces its value without moving it.

use serde_json::{Map, Value};

use crate::db::TempSummary;

/// Date-keyed object; a repeated date keeps the last value seen
pub fn to_ordered_mapping<V, I>(rows: I) -> Map<String, Value>
where
    V: Into<Value>,
    I: IntoIterator<Item = (String, V)>,
{
    let mut mapping = Map::new();
    for (date, value) in rows {
        mapping.insert(date, value.into());
    }
    mapping
}

/// Station name to observation count
///
/// Keyed by display name rather than station code: two stations sharing a
/// name collapse into one entry holding the later count.
pub fn to_station_mapping<I>(rows: I) -> Map<String, Value>
where
    I: IntoIterator<Item = (String, i64)>,
{
    let mut mapping = Map::new();
    for (name, count) in rows {
        mapping.insert(name, Value::from(count));
    }
    mapping
}

/// Min and max are truncated toward zero; the average is kept as is.
pub fn to_temp_summary(min: f64, avg: f64, max: f64) -> TempSummary {
    TempSummary {
        tmin: min as i64,
        tavg: avg,
        tmax: max as i64,
    }
}
