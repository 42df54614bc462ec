use chrono::{DateTime, Utc};
use foundation::GeometryShape;
use serde::Deserialize;

/// One category tag from the feed.
///
/// The upstream service converts XML to JSON, so the tag text arrives under
/// either `text` or `#text`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryTag {
    #[serde(alias = "#text")]
    pub text: String,
}

impl CategoryTag {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Category field as it appears on the wire: one tag or an ordered list.
///
/// Tag order is significant for preset resolution; see
/// [`crate::resolver::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CategoryField {
    Many(Vec<CategoryTag>),
    One(CategoryTag),
}

impl CategoryField {
    pub fn tags(&self) -> &[CategoryTag] {
        match self {
            CategoryField::Many(tags) => tags,
            CategoryField::One(tag) => std::slice::from_ref(tag),
        }
    }
}

impl Default for CategoryField {
    fn default() -> Self {
        CategoryField::Many(Vec::new())
    }
}

/// One dated footprint, already normalized to a UTC instant and a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub date: DateTime<Utc>,
    pub shape: GeometryShape,
}

/// A natural-event report, normalized for the browser.
///
/// `geometries` is never empty; a single-geometry document ingests as a
/// one-element list, and multi-date behavior keys on `len() > 1` only.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub title: String,
    pub description: String,
    pub category: CategoryField,
    geometries: Vec<Geometry>,
}

impl EventRecord {
    /// Returns `None` when `geometries` is empty; such records are dropped
    /// at ingestion.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: CategoryField,
        geometries: Vec<Geometry>,
    ) -> Option<Self> {
        if geometries.is_empty() {
            return None;
        }
        Some(Self {
            title: title.into(),
            description: description.into(),
            category,
            geometries,
        })
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub fn has_multiple_dates(&self) -> bool {
        self.geometries.len() > 1
    }

    /// The footprint at `date_index`; out-of-range indices fall back to the
    /// first entry.
    pub fn geometry_at(&self, date_index: usize) -> &Geometry {
        self.geometries
            .get(date_index)
            .unwrap_or(&self.geometries[0])
    }
}
