//! Candidate results on the map
//!
//! On entry with a query identifier the view fetches candidates once and
//! turns each into a marker with a claim action. Fetch failures of any
//! kind leave the map empty and are only logged; nothing is retried
//! until the query identifier changes.

use crate::claim::ClaimGate;
use crate::lifetime::ScreenLifetime;
use crate::service::MatchingService;
use crate::workflow::SearchHandoff;
use finders_core::{CandidateMatch, Coordinate, ItemId, QueryId, Region};
use tracing::{debug, error, info};

/// Label on each callout's claim button
pub const CLAIM_ACTION_LABEL: &str = "チェックする";

/// Map span used when (re)centering the results map
pub const RESULTS_SPAN: f64 = 0.01;

/// Navigation target of a marker's claim button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimAction {
    pub label: &'static str,
    pub item_id: ItemId,
}

impl ClaimAction {
    /// Open the confirmation screen for this candidate
    pub fn open(&self) -> ClaimGate {
        ClaimGate::new(self.item_id)
    }
}

/// One candidate rendered on the map, with its callout contents
#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub item_id: ItemId,
    pub coordinate: Coordinate,
    pub image_url: Option<String>,
    pub location_notes: String,
    pub action: ClaimAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchStatus {
    Idle,
    Loaded,
    Failed(String),
}

pub struct MatchResultsView {
    query_id: Option<QueryId>,
    center: Coordinate,
    markers: Vec<MapMarker>,
    status: FetchStatus,
    lifetime: ScreenLifetime,
}

impl MatchResultsView {
    pub fn new(center: Coordinate) -> Self {
        Self {
            query_id: None,
            center,
            markers: Vec::new(),
            status: FetchStatus::Idle,
            lifetime: ScreenLifetime::new(),
        }
    }

    pub fn from_handoff(handoff: &SearchHandoff) -> Self {
        Self::new(handoff.center)
    }

    /// Handle for the navigation layer to end this screen
    pub fn lifetime(&self) -> ScreenLifetime {
        self.lifetime.clone()
    }

    /// Enter (or re-enter) the view for `query_id`.
    ///
    /// Fetches only when the identifier differs from the last one seen.
    /// Never fails: errors are logged and yield zero markers.
    pub async fn enter<S: MatchingService>(
        &mut self,
        service: &S,
        query_id: QueryId,
    ) -> &[MapMarker] {
        if self.query_id == Some(query_id) {
            debug!("Results for query {} already fetched", query_id);
            return &self.markers;
        }

        self.query_id = Some(query_id);
        self.markers.clear();
        self.status = FetchStatus::Idle;

        let result = service.fetch_candidates(query_id).await;

        if !self.lifetime.is_alive() {
            info!(
                "Results screen closed before candidates arrived for query {}",
                query_id
            );
            return &self.markers;
        }

        match result {
            Ok(candidates) => {
                self.markers = candidates.iter().map(|c| marker_for(service, c)).collect();
                self.status = FetchStatus::Loaded;
                info!("Showing {} candidate(s) for query {}", self.markers.len(), query_id);
            }
            Err(e) => {
                error!("Failed to fetch candidates for query {}: {}", query_id, e);
                self.status = FetchStatus::Failed(e.to_string());
            }
        }

        &self.markers
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    pub fn marker(&self, item_id: ItemId) -> Option<&MapMarker> {
        self.markers.iter().find(|m| m.item_id == item_id)
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn query_id(&self) -> Option<QueryId> {
        self.query_id
    }

    /// Region the recenter button animates to
    pub fn recenter_region(&self) -> Region {
        Region::around(self.center, RESULTS_SPAN)
    }
}

fn marker_for<S: MatchingService>(service: &S, candidate: &CandidateMatch) -> MapMarker {
    MapMarker {
        item_id: candidate.id,
        coordinate: candidate.coordinate(),
        image_url: candidate
            .image_url
            .as_deref()
            .and_then(|url| service.resolve_image_url(url)),
        location_notes: candidate.location_notes.clone(),
        action: ClaimAction {
            label: CLAIM_ACTION_LABEL,
            item_id: candidate.id,
        },
    }
}
