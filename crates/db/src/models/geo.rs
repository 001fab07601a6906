//! GeoJSON-style point attached to animals.

use bson::{doc, Bson, Document};
use menagerie_core::normalize;
use serde::{Deserialize, Serialize};

/// Type tag written when a client omits one.
pub const DEFAULT_GEO_TYPE: &str = "Point";

/// A type tag plus an ordered list of coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl GeoPoint {
    /// Read a stored `location` subdocument.
    ///
    /// Coordinate elements that are not numeric are dropped, so a malformed
    /// pair can come back with a single element.
    pub fn from_document(doc: &Document) -> Self {
        let kind = normalize::optional_string(doc, "type").unwrap_or_default();
        let coordinates = match doc.get("coordinates") {
            Some(Bson::Array(values)) => {
                let coordinates = normalize::coordinates(values);
                if coordinates.len() != values.len() {
                    tracing::debug!(
                        stored = values.len(),
                        kept = coordinates.len(),
                        "Skipped non-numeric coordinate elements"
                    );
                }
                coordinates
            }
            _ => Vec::new(),
        };
        Self { kind, coordinates }
    }

    pub fn to_document(&self) -> Document {
        doc! {
            "type": self.kind.as_str(),
            "coordinates": self.coordinates.clone(),
        }
    }

    /// Fill in [`DEFAULT_GEO_TYPE`] when the tag is blank.
    pub fn with_default_kind(mut self) -> Self {
        if self.kind.trim().is_empty() {
            self.kind = DEFAULT_GEO_TYPE.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_mixed_numeric_coordinates() {
        let stored = doc! { "type": "Point", "coordinates": [12_i32, 41.9_f64] };
        let point = GeoPoint::from_document(&stored);
        assert_eq!(point.kind, "Point");
        assert_eq!(point.coordinates, vec![12.0, 41.9]);
    }

    #[test]
    fn drops_non_numeric_coordinates() {
        let stored = doc! { "type": "Point", "coordinates": ["12.0", 41.9_f64] };
        assert_eq!(GeoPoint::from_document(&stored).coordinates, vec![41.9]);
    }

    #[test]
    fn missing_parts_read_as_empty() {
        let point = GeoPoint::from_document(&doc! {});
        assert_eq!(point.kind, "");
        assert!(point.coordinates.is_empty());
    }

    #[test]
    fn blank_kind_defaults_to_point() {
        let point = GeoPoint {
            kind: " ".into(),
            coordinates: vec![1.0, 2.0],
        };
        assert_eq!(point.with_default_kind().kind, "Point");
    }

    #[test]
    fn document_round_trip() {
        let point = GeoPoint {
            kind: "Point".into(),
            coordinates: vec![-73.97, 40.77],
        };
        assert_eq!(GeoPoint::from_document(&point.to_document()), point);
    }
}
