//! Found-item report operations with validation

use crate::FindersClient;
use finders_core::{
    ClaimReceipt, Error, FoundItemSubmission, FoundReportReceipt, ItemId, Result, ValidationError,
};
use tracing::info;

/// A found-item report carries exactly this many photos
pub const FOUND_REPORT_PHOTOS: usize = 2;

/// Register a found item
///
/// # Important
/// The matcher compares against exactly two photos of the found item,
/// so any other count is rejected before the request is sent.
pub async fn report_found_item(
    client: &FindersClient,
    submission: &FoundItemSubmission,
) -> Result<FoundReportReceipt> {
    if submission.images.len() != FOUND_REPORT_PHOTOS {
        return Err(ValidationError::AttachmentCount {
            required: FOUND_REPORT_PHOTOS,
            actual: submission.images.len(),
        }
        .into());
    }
    if !submission.location.is_valid() {
        return Err(Error::InvalidData(format!(
            "coordinate out of range: {}",
            submission.location
        )));
    }

    info!("Reporting found {} at {}", submission.category, submission.location);
    client.submit_found_item(submission).await
}

/// Claim a candidate found-item
pub async fn claim_found_item(client: &FindersClient, item_id: ItemId) -> Result<ClaimReceipt> {
    info!("Claiming found item {}", item_id);
    client.claim_item(item_id).await
}
