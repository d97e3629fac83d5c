//! Candidate found-items returned by the matching service

use crate::{Coordinate, Error, ItemId, Result};
use serde::{Deserialize, Serialize};

/// A found-item record offered as a possible match for a lost-item query.
///
/// Immutable snapshot; claiming is a separate remote call keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    pub id: ItemId,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub location_notes: String,
    /// Stored photo path or URL, if the finder attached one
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CandidateMatch {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Parse a candidate-fetch body.
///
/// The body must be a JSON array; anything else (an object, `null`, a
/// string) is a malformed payload.
pub fn parse_candidates(body: serde_json::Value) -> Result<Vec<CandidateMatch>> {
    match body {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value::<CandidateMatch>(item).map_err(Error::from))
            .collect(),
        other => Err(Error::InvalidData(format!(
            "expected an array of candidates, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_single_candidate_without_image() {
        let body = json!([{
            "id": 1,
            "latitude": 35.0,
            "longitude": 135.7,
            "location_notes": "library",
            "image_url": null
        }]);

        let candidates = parse_candidates(body).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, ItemId(1));
        assert_eq!(candidates[0].coordinate(), Coordinate::new(35.0, 135.7));
        assert_eq!(candidates[0].image_url, None);
    }

    #[test]
    fn test_object_body_is_malformed() {
        let err = parse_candidates(json!({})).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn test_element_missing_coordinates_is_malformed() {
        let err = parse_candidates(json!([{ "id": 3 }])).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
