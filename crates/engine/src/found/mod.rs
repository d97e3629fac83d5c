//! Found-item report draft
//!
//! Finders fill in the category, the day it was found, a single tapped map
//! point and exactly two photos before the report can go out.

use crate::query::MediaAttachmentSet;
use crate::service::MatchingService;
use chrono::{Local, NaiveDate};
use finders_core::{
    Category, Coordinate, Error, FoundItemSubmission, FoundReportReceipt, ImageRef, Result,
    ValidationError,
};
use finders_networking::api::FOUND_REPORT_PHOTOS;
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct FoundReportDraft {
    category: Category,
    date_found: NaiveDate,
    location: Option<Coordinate>,
    location_notes: String,
    images: MediaAttachmentSet,
}

impl FoundReportDraft {
    pub fn new() -> Self {
        Self::with_date(Local::now().date_naive())
    }

    pub fn with_date(today: NaiveDate) -> Self {
        Self {
            category: Category::default(),
            date_found: today,
            location: None,
            location_notes: String::new(),
            images: MediaAttachmentSet::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub fn date_found(&self) -> NaiveDate {
        self.date_found
    }

    pub fn set_date_found(&mut self, date: NaiveDate, today: NaiveDate) -> Result<()> {
        if date > today {
            return Err(ValidationError::FutureDate { date }.into());
        }
        self.date_found = date;
        Ok(())
    }

    /// A tap marks where the item was found; a later tap moves the mark
    pub fn tap_map(&mut self, point: Coordinate) -> Result<()> {
        if !point.is_valid() {
            return Err(Error::InvalidData(format!("coordinate out of range: {}", point)));
        }
        self.location = Some(point);
        Ok(())
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    pub fn set_location_notes(&mut self, notes: impl Into<String>) {
        self.location_notes = notes.into();
    }

    pub fn images(&self) -> &MediaAttachmentSet {
        &self.images
    }

    pub fn images_mut(&mut self) -> &mut MediaAttachmentSet {
        &mut self.images
    }

    /// Build the payload, or say what is still missing
    pub fn validate(&self) -> Result<FoundItemSubmission> {
        if self.images.len() != FOUND_REPORT_PHOTOS {
            return Err(ValidationError::AttachmentCount {
                required: FOUND_REPORT_PHOTOS,
                actual: self.images.len(),
            }
            .into());
        }
        let location = self.location.ok_or(ValidationError::MissingItemLocation)?;

        Ok(FoundItemSubmission {
            category: self.category,
            date_found: self.date_found,
            location,
            location_notes: self.location_notes.trim().to_string(),
            images: self.images.as_slice().to_vec(),
        })
    }

    pub async fn submit<S: MatchingService>(&self, service: &S) -> Result<FoundReportReceipt> {
        let submission = self.validate()?;
        match service.submit_found_item(&submission).await {
            Ok(receipt) => {
                info!("Found report accepted as item {}", receipt.item_id);
                Ok(receipt)
            }
            Err(e) => {
                error!("Found report failed: {}", e);
                Err(e)
            }
        }
    }
}

impl Default for FoundReportDraft {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<ImageRef> for FoundReportDraft {
    fn extend<I: IntoIterator<Item = ImageRef>>(&mut self, iter: I) {
        self.images.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finders_core::{
        CandidateMatch, ClaimReceipt, ItemId, LostItemSubmission, QueryId, SubmissionReceipt,
    };
    use std::sync::Mutex;

    #[derive(Default)]
    struct FoundDesk {
        received: Mutex<Vec<FoundItemSubmission>>,
    }

    impl MatchingService for FoundDesk {
        async fn submit_lost_item(&self, _s: &LostItemSubmission) -> Result<SubmissionReceipt> {
            Err(Error::NetworkError("unused".into()))
        }

        async fn fetch_candidates(&self, _q: QueryId) -> Result<Vec<CandidateMatch>> {
            Ok(Vec::new())
        }

        async fn submit_found_item(&self, s: &FoundItemSubmission) -> Result<FoundReportReceipt> {
            self.received.lock().unwrap().push(s.clone());
            Ok(FoundReportReceipt {
                message: "Item registered".into(),
                item_id: ItemId(12),
            })
        }

        async fn claim_item(&self, _i: ItemId) -> Result<ClaimReceipt> {
            Err(Error::NetworkError("unused".into()))
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn photos(n: usize) -> Vec<ImageRef> {
        (0..n).map(|i| ImageRef::new(format!("/tmp/found-{}.jpg", i))).collect()
    }

    #[test]
    fn test_photo_count_checked_first() {
        let mut draft = FoundReportDraft::with_date(day(16));
        draft.extend(photos(1));

        let err = draft.validate().unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::AttachmentCount { required: 2, actual: 1 })
        ));

        draft.extend(photos(1));
        let err = draft.validate().unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::MissingItemLocation)));
    }

    #[test]
    fn test_tap_replaces_location() {
        let mut draft = FoundReportDraft::with_date(day(16));
        draft.tap_map(Coordinate::new(35.0, 135.7)).unwrap();
        draft.tap_map(Coordinate::new(35.02, 135.78)).unwrap();
        assert_eq!(draft.location(), Some(Coordinate::new(35.02, 135.78)));
        assert!(draft.tap_map(Coordinate::new(91.0, 0.0)).is_err());
    }

    #[test]
    fn test_future_found_date_rejected() {
        let mut draft = FoundReportDraft::with_date(day(16));
        assert!(draft.set_date_found(day(17), day(16)).is_err());
        draft.set_date_found(day(10), day(16)).unwrap();
        assert_eq!(draft.date_found(), day(10));
    }

    #[tokio::test]
    async fn test_submit_sends_payload() {
        let desk = FoundDesk::default();
        let mut draft = FoundReportDraft::with_date(day(16));
        draft.set_category(Category::Keys);
        draft.set_location_notes("  gym lockers ");
        draft.tap_map(Coordinate::new(35.02, 135.78)).unwrap();
        draft.extend(photos(2));

        let receipt = draft.submit(&desk).await.unwrap();
        assert_eq!(receipt.item_id, ItemId(12));

        let sent = desk.received.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].category, Category::Keys);
        assert_eq!(sent[0].location_notes, "gym lockers");
        assert_eq!(sent[0].images.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_draft_not_sent() {
        let desk = FoundDesk::default();
        let draft = FoundReportDraft::with_date(day(16));
        assert!(draft.submit(&desk).await.is_err());
        assert!(desk.received.lock().unwrap().is_empty());
    }
}
