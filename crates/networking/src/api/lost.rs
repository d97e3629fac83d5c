//! Lost-item query operations with validation

use crate::FindersClient;
use finders_core::{
    CandidateMatch, Error, LostItemSubmission, QueryId, Result, SubmissionReceipt, ValidationError,
};
use tracing::{info, warn};

/// Most candidate locations a single query may carry
pub const MAX_QUERY_LOCATIONS: usize = 3;

/// Submit a lost-item query after checking its shape
///
/// # Arguments
/// * `client` - The matching-service client
/// * `submission` - Composed query; needs 1 to 3 valid locations and no blank answers
pub async fn submit_lost_query(
    client: &FindersClient,
    submission: &LostItemSubmission,
) -> Result<SubmissionReceipt> {
    if submission.locations.is_empty() {
        return Err(ValidationError::MissingLocation.into());
    }
    if submission.locations.len() > MAX_QUERY_LOCATIONS {
        return Err(Error::CapacityExceeded {
            max: MAX_QUERY_LOCATIONS,
        });
    }
    if let Some(bad) = submission.locations.iter().find(|c| !c.is_valid()) {
        return Err(Error::InvalidData(format!("coordinate out of range: {}", bad)));
    }
    if submission.quiz_answers.iter().any(|a| a.trim().is_empty()) {
        return Err(ValidationError::UnansweredQuiz.into());
    }
    if submission.quiz_answers.is_empty() {
        warn!("Submitting lost-item query without verification answers");
    }

    info!(
        "Submitting {} query with {} location(s) and {} image(s)",
        submission.category,
        submission.locations.len(),
        submission.images.len()
    );
    client.submit_lost_item(submission).await
}

/// Fetch candidates for a query
pub async fn fetch_matches(
    client: &FindersClient,
    query_id: QueryId,
) -> Result<Vec<CandidateMatch>> {
    client.fetch_candidates(query_id).await
}
