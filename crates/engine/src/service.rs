//! Collaborators the workflow calls into, and their process-wide owner

use finders_core::{
    CandidateMatch, ClaimReceipt, Coordinate, Error, FoundItemSubmission, FoundReportReceipt,
    ItemId, LostItemSubmission, QueryId, Result, SubmissionReceipt, DEFAULT_CENTER,
};
use finders_networking::{api, ClientConfig, FindersClient};
use finders_persistence::CandidateCache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Remote matching service as seen by the workflow and screens
pub trait MatchingService: Send + Sync {
    fn submit_lost_item(
        &self,
        submission: &LostItemSubmission,
    ) -> impl Future<Output = Result<SubmissionReceipt>> + Send;

    fn fetch_candidates(
        &self,
        query_id: QueryId,
    ) -> impl Future<Output = Result<Vec<CandidateMatch>>> + Send;

    fn submit_found_item(
        &self,
        submission: &FoundItemSubmission,
    ) -> impl Future<Output = Result<FoundReportReceipt>> + Send;

    fn claim_item(&self, item_id: ItemId) -> impl Future<Output = Result<ClaimReceipt>> + Send;

    /// Turn a stored photo reference into something displayable
    fn resolve_image_url(&self, image_url: &str) -> Option<String> {
        let trimmed = image_url.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl MatchingService for FindersClient {
    async fn submit_lost_item(&self, submission: &LostItemSubmission) -> Result<SubmissionReceipt> {
        api::submit_lost_query(self, submission).await
    }

    async fn fetch_candidates(&self, query_id: QueryId) -> Result<Vec<CandidateMatch>> {
        api::fetch_matches(self, query_id).await
    }

    async fn submit_found_item(
        &self,
        submission: &FoundItemSubmission,
    ) -> Result<FoundReportReceipt> {
        api::report_found_item(self, submission).await
    }

    async fn claim_item(&self, item_id: ItemId) -> Result<ClaimReceipt> {
        api::claim_found_item(self, item_id).await
    }

    fn resolve_image_url(&self, image_url: &str) -> Option<String> {
        FindersClient::resolve_image_url(self, image_url)
    }
}

impl<S: MatchingService> MatchingService for Arc<S> {
    fn submit_lost_item(
        &self,
        submission: &LostItemSubmission,
    ) -> impl Future<Output = Result<SubmissionReceipt>> + Send {
        (**self).submit_lost_item(submission)
    }

    fn fetch_candidates(
        &self,
        query_id: QueryId,
    ) -> impl Future<Output = Result<Vec<CandidateMatch>>> + Send {
        (**self).fetch_candidates(query_id)
    }

    fn submit_found_item(
        &self,
        submission: &FoundItemSubmission,
    ) -> impl Future<Output = Result<FoundReportReceipt>> + Send {
        (**self).submit_found_item(submission)
    }

    fn claim_item(&self, item_id: ItemId) -> impl Future<Output = Result<ClaimReceipt>> + Send {
        (**self).claim_item(item_id)
    }

    fn resolve_image_url(&self, image_url: &str) -> Option<String> {
        (**self).resolve_image_url(image_url)
    }
}

/// Source of the device's current position
pub trait LocationProvider: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Result<Coordinate>> + Send;
}

/// A provider that always reports the same point (configured campus center,
/// or a test fixture)
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Result<Coordinate> {
        Ok(self.0)
    }
}

/// Where to center the composing map. Provider failures are not fatal.
pub async fn initial_center<L: LocationProvider>(provider: &L) -> Coordinate {
    match provider.current_position().await {
        Ok(coord) if coord.is_valid() => coord,
        Ok(coord) => {
            warn!("Ignoring out-of-range position {}, using default center", coord);
            DEFAULT_CENTER
        }
        Err(e) => {
            warn!("Position unavailable ({}), using default center", e);
            DEFAULT_CENTER
        }
    }
}

/// Process-wide owner of the matching client and candidate cache.
///
/// Created once with [`ServiceContext::init`] and handed to screens;
/// after [`ServiceContext::dispose`] every accessor fails with
/// `ServiceDisposed`.
pub struct ServiceContext {
    client: Option<Arc<FindersClient>>,
    cache: Arc<CandidateCache>,
}

impl ServiceContext {
    pub fn init(config: &ClientConfig, cache_ttl: Duration) -> Result<Self> {
        let cache = Arc::new(CandidateCache::new(cache_ttl));
        let client = FindersClient::new_with_cache(config, cache.clone())?;

        info!(
            "Service context ready for {} ({})",
            client.base_url(),
            if client.has_token() { "authenticated" } else { "anonymous" }
        );

        Ok(Self {
            client: Some(Arc::new(client)),
            cache,
        })
    }

    pub fn client(&self) -> Result<Arc<FindersClient>> {
        self.client.clone().ok_or(Error::ServiceDisposed)
    }

    pub fn cache(&self) -> &Arc<CandidateCache> {
        &self.cache
    }

    pub fn is_active(&self) -> bool {
        self.client.is_some()
    }

    /// Release the client and drop cached snapshots
    pub fn dispose(&mut self) {
        if self.client.take().is_some() {
            self.cache.clear();
            info!("Service context disposed");
        }
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoFix;

    impl LocationProvider for NoFix {
        async fn current_position(&self) -> Result<Coordinate> {
            Err(Error::NetworkError("permission denied".to_string()))
        }
    }

    #[tokio::test]
    async fn test_initial_center_falls_back() {
        assert_eq!(initial_center(&NoFix).await, DEFAULT_CENTER);

        let here = Coordinate::new(34.99, 135.75);
        assert_eq!(initial_center(&FixedLocation(here)).await, here);
        assert_eq!(
            initial_center(&FixedLocation(Coordinate::new(400.0, 0.0))).await,
            DEFAULT_CENTER
        );
    }

    #[test]
    fn test_dispose_blocks_access() {
        let mut ctx = ServiceContext::init(
            &ClientConfig::new("http://127.0.0.1:5001"),
            Duration::from_secs(60),
        )
        .unwrap();
        assert!(ctx.client().is_ok());

        ctx.dispose();
        assert!(!ctx.is_active());
        assert!(matches!(ctx.client(), Err(Error::ServiceDisposed)));
    }

    #[test]
    fn test_init_rejects_bad_url() {
        let result = ServiceContext::init(&ClientConfig::new("::"), Duration::from_secs(1));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
