use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use foundation::GeometryShape;
use serde::Deserialize;
use serde_json::Value;

use crate::record::{CategoryField, EventRecord, Geometry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    Parse(String),
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::Parse(msg) => write!(f, "event feed is not valid JSON: {msg}"),
        }
    }
}

impl std::error::Error for FeedError {}

/// Outcome of ingesting one feed document.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub accepted: usize,
    /// Records dropped for having no usable dated geometry.
    pub dropped: usize,
}

// Wire shapes. These exist only inside ingestion; everything downstream
// works with the normalized types in `record`.

#[derive(Debug, Deserialize)]
struct FeedDocument {
    #[serde(default)]
    item: Vec<RawEvent>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    category: CategoryField,
    geometry: Option<RawGeometryField>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawGeometryField {
    Many(Vec<RawGeometry>),
    One(RawGeometry),
}

impl RawGeometryField {
    fn into_vec(self) -> Vec<RawGeometry> {
        match self {
            RawGeometryField::Many(entries) => entries,
            RawGeometryField::One(entry) => vec![entry],
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    date: Option<String>,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    coordinates: Value,
}

/// Parses a feed document and normalizes its records.
///
/// Geometry entries without a parseable date are skipped; a record that ends
/// up with no geometry at all is dropped and counted in the report. An empty
/// or absent `item` array is not an error.
pub fn ingest(text: &str) -> Result<(Vec<EventRecord>, IngestReport), FeedError> {
    let doc: FeedDocument =
        serde_json::from_str(text).map_err(|e| FeedError::Parse(e.to_string()))?;

    let mut records = Vec::new();
    let mut report = IngestReport::default();
    for raw in doc.item {
        match normalize(raw) {
            Some(record) => {
                report.accepted += 1;
                records.push(record);
            }
            None => report.dropped += 1,
        }
    }
    Ok((records, report))
}

fn normalize(raw: RawEvent) -> Option<EventRecord> {
    let geometries: Vec<Geometry> = raw
        .geometry?
        .into_vec()
        .into_iter()
        .filter_map(|g| {
            let date = parse_timestamp_utc(g.date.as_deref()?)?;
            Some(Geometry {
                date,
                shape: parse_shape(&g.kind, g.coordinates),
            })
        })
        .collect();

    EventRecord::new(raw.title, raw.description, raw.category, geometries)
}

fn parse_shape(kind: &str, coordinates: Value) -> GeometryShape {
    match kind {
        "Point" => serde_json::from_value::<[f64; 2]>(coordinates)
            .map(GeometryShape::Point)
            .unwrap_or(GeometryShape::Unsupported),
        "Polygon" => serde_json::from_value::<Vec<[f64; 2]>>(coordinates)
            .map(GeometryShape::Polygon)
            .unwrap_or(GeometryShape::Unsupported),
        _ => GeometryShape::Unsupported,
    }
}

/// Parses the feed's timestamp flavors to a normalized UTC instant.
///
/// Accepted: RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`, and a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp_utc(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(ndt.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
