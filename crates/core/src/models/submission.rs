//! Payloads sent to the matching service and the receipts it returns

use crate::{Category, Coordinate, ImageRef, ItemId, QueryId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fully validated lost-item query, ready to be encoded as multipart form data
#[derive(Debug, Clone, PartialEq)]
pub struct LostItemSubmission {
    pub category: Category,
    pub details: String,
    pub location_notes: String,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub locations: Vec<Coordinate>,
    pub images: Vec<ImageRef>,
    pub quiz_answers: Vec<String>,
}

impl LostItemSubmission {
    /// Text form fields in wire order (files are appended separately)
    pub fn text_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("kind".to_string(), self.category.as_str().to_string()),
            ("details".to_string(), self.details.clone()),
            ("location_notes".to_string(), self.location_notes.clone()),
            ("date_from".to_string(), self.date_from.format("%Y-%m-%d").to_string()),
            ("date_to".to_string(), self.date_to.format("%Y-%m-%d").to_string()),
        ];

        for (i, location) in self.locations.iter().enumerate() {
            fields.push((
                format!("locations[{}][latitude]", i),
                location.latitude.to_string(),
            ));
            fields.push((
                format!("locations[{}][longitude]", i),
                location.longitude.to_string(),
            ));
        }

        for (i, answer) in self.quiz_answers.iter().enumerate() {
            fields.push((format!("quiz_answers[{}]", i), answer.clone()));
        }

        fields
    }
}

/// Response from `POST /api/lost-items`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    #[serde(default)]
    pub message: String,
    pub item_id: QueryId,
}

/// Found-item report, ready to be encoded as multipart form data
#[derive(Debug, Clone, PartialEq)]
pub struct FoundItemSubmission {
    pub category: Category,
    pub date_found: NaiveDate,
    pub location: Coordinate,
    pub location_notes: String,
    pub images: Vec<ImageRef>,
}

impl FoundItemSubmission {
    pub fn text_fields(&self) -> Vec<(String, String)> {
        vec![
            ("kind".to_string(), self.category.as_str().to_string()),
            ("date_found".to_string(), self.date_found.format("%Y-%m-%d").to_string()),
            ("latitude".to_string(), self.location.latitude.to_string()),
            ("longitude".to_string(), self.location.longitude.to_string()),
            ("location_notes".to_string(), self.location_notes.clone()),
        ]
    }
}

/// Response from `POST /api/found-items`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoundReportReceipt {
    #[serde(default)]
    pub message: String,
    pub item_id: ItemId,
}

/// Response from `POST /api/found-items/{id}/claim`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimReceipt {
    #[serde(default)]
    pub message: String,
    pub item_id: ItemId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lost_item_fields_are_indexed() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let submission = LostItemSubmission {
            category: Category::Wallet,
            details: "青いiPhoneケース".to_string(),
            location_notes: "near the north gate".to_string(),
            date_from: date,
            date_to: date,
            locations: vec![Coordinate::new(34.99, 135.75), Coordinate::new(35.01, 135.78)],
            images: vec![],
            quiz_answers: vec!["blue".to_string(), "sticker".to_string()],
        };

        let fields = submission.text_fields();
        let get = |key: &str| {
            fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("kind"), Some("wallet"));
        assert_eq!(get("date_from"), Some("2026-10-01"));
        assert_eq!(get("date_to"), Some("2026-10-01"));
        assert_eq!(get("locations[1][longitude]"), Some("135.78"));
        assert_eq!(get("quiz_answers[1]"), Some("sticker"));
        assert_eq!(get("locations[2][latitude]"), None);
    }

    #[test]
    fn test_receipt_accepts_server_shape() {
        let receipt: SubmissionReceipt =
            serde_json::from_str(r#"{"message":"登録完了","item_id":42}"#).unwrap();
        assert_eq!(receipt.item_id, QueryId(42));
    }
}
