//! Async driver tying the workflow to the matching service

use super::state::{SearchHandoff, SearchWorkflow, Step};
use crate::lifetime::ScreenLifetime;
use crate::service::MatchingService;
use finders_core::{ErrorKind, Result};
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of one submit press as seen by the screen
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitProgress {
    /// Quiz rendered; collect answers and press again
    QuizReady { questions: usize },
    /// Query accepted; navigate to results
    Submitted(SearchHandoff),
    /// Remote failure; show the notice, answers are kept
    Failed { notice: String, kind: ErrorKind },
    /// The screen went away while the request was in flight
    Discarded,
}

/// One search screen: the workflow, the service it submits to, and the
/// screen's liveness
pub struct SearchSession<S: MatchingService> {
    workflow: SearchWorkflow,
    service: Arc<S>,
    lifetime: ScreenLifetime,
}

impl<S: MatchingService> SearchSession<S> {
    pub fn new(workflow: SearchWorkflow, service: Arc<S>) -> Self {
        Self {
            workflow,
            service,
            lifetime: ScreenLifetime::new(),
        }
    }

    pub fn workflow(&self) -> &SearchWorkflow {
        &self.workflow
    }

    /// Field edits go straight to the workflow
    pub fn workflow_mut(&mut self) -> &mut SearchWorkflow {
        &mut self.workflow
    }

    /// Handle for the navigation layer to end this screen
    pub fn lifetime(&self) -> ScreenLifetime {
        self.lifetime.clone()
    }

    /// Handle a submit press.
    ///
    /// Validation rejections come back as `Err` with the workflow
    /// unchanged. Remote failures are reported as `SubmitProgress::Failed`.
    pub async fn press_submit(&mut self) -> Result<SubmitProgress> {
        let payload = match self.workflow.press_submit()? {
            Step::QuizGenerated { questions } => {
                return Ok(SubmitProgress::QuizReady { questions });
            }
            Step::Submit(payload) => payload,
            other => {
                debug!("Unexpected step after submit press: {:?}", other);
                return Ok(SubmitProgress::Discarded);
            }
        };

        let outcome = self.service.submit_lost_item(&payload).await;

        if !self.lifetime.is_alive() {
            info!("Search screen closed before submission completed, dropping response");
            return Ok(SubmitProgress::Discarded);
        }

        match self.workflow.complete_submission(outcome)? {
            Step::Handoff(handoff) => Ok(SubmitProgress::Submitted(handoff)),
            Step::SubmissionFailed { notice, kind } => Ok(SubmitProgress::Failed { notice, kind }),
            other => {
                debug!("Unexpected step after submission: {:?}", other);
                Ok(SubmitProgress::Discarded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::QuizGenerator;
    use crate::workflow::WorkflowState;
    use chrono::NaiveDate;
    use finders_core::{
        CandidateMatch, ClaimReceipt, Coordinate, Error, FoundItemSubmission,
        FoundReportReceipt, ItemId, LostItemSubmission, QueryId, SubmissionReceipt,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Scripted matching service: pops one outcome per submission
    struct ScriptedService {
        outcomes: Mutex<Vec<Result<SubmissionReceipt>>>,
        calls: AtomicUsize,
        close_on_submit: Mutex<Option<ScreenLifetime>>,
    }

    impl ScriptedService {
        fn new(mut outcomes: Vec<Result<SubmissionReceipt>>) -> Self {
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                calls: AtomicUsize::new(0),
                close_on_submit: Mutex::new(None),
            }
        }
    }

    impl MatchingService for ScriptedService {
        async fn submit_lost_item(
            &self,
            _submission: &LostItemSubmission,
        ) -> Result<SubmissionReceipt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(screen) = self.close_on_submit.lock().unwrap().as_ref() {
                screen.navigate_away();
            }
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(Error::NetworkError("no scripted outcome".into())))
        }

        async fn fetch_candidates(&self, _query_id: QueryId) -> Result<Vec<CandidateMatch>> {
            Ok(Vec::new())
        }

        async fn submit_found_item(
            &self,
            _submission: &FoundItemSubmission,
        ) -> Result<FoundReportReceipt> {
            Err(Error::NetworkError("unused".into()))
        }

        async fn claim_item(&self, _item_id: ItemId) -> Result<ClaimReceipt> {
            Err(Error::NetworkError("unused".into()))
        }
    }

    fn session(service: ScriptedService) -> SearchSession<ScriptedService> {
        let workflow = SearchWorkflow::with_date(
            QuizGenerator::default(),
            NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
        );
        SearchSession::new(workflow, Arc::new(service))
    }

    fn compose(session: &mut SearchSession<ScriptedService>) {
        let wf = session.workflow_mut();
        wf.set_description("青いiPhoneケース").unwrap();
        wf.add_location(Coordinate::new(34.99, 135.75)).unwrap();
    }

    fn answer(session: &mut SearchSession<ScriptedService>) {
        let wf = session.workflow_mut();
        wf.set_answer(0, "blue").unwrap();
        wf.set_answer(1, "cat sticker").unwrap();
    }

    #[tokio::test]
    async fn test_two_presses_submit_once() {
        let service = ScriptedService::new(vec![Ok(SubmissionReceipt {
            message: String::new(),
            item_id: QueryId(21),
        })]);
        let mut session = session(service);
        compose(&mut session);

        assert_eq!(
            session.press_submit().await.unwrap(),
            SubmitProgress::QuizReady { questions: 2 }
        );
        answer(&mut session);

        let progress = session.press_submit().await.unwrap();
        assert_eq!(
            progress,
            SubmitProgress::Submitted(SearchHandoff {
                query_id: QueryId(21),
                center: Coordinate::new(34.99, 135.75),
            })
        );
        assert_eq!(session.service.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_then_retry() {
        let service = ScriptedService::new(vec![
            Err(Error::ServerError {
                status: 500,
                body: "Failed to upload data.".into(),
            }),
            Ok(SubmissionReceipt {
                message: String::new(),
                item_id: QueryId(4),
            }),
        ]);
        let mut session = session(service);
        compose(&mut session);
        session.press_submit().await.unwrap();
        answer(&mut session);

        match session.press_submit().await.unwrap() {
            SubmitProgress::Failed { kind, .. } => assert_eq!(kind, ErrorKind::Server),
            other => panic!("expected failure, got {:?}", other),
        }
        assert_eq!(session.workflow().query().quiz().unwrap().answers()[0], "blue");

        assert!(matches!(
            session.press_submit().await.unwrap(),
            SubmitProgress::Submitted(_)
        ));
        assert_eq!(session.service.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_validation_never_reaches_service() {
        let mut session = session(ScriptedService::new(vec![]));
        assert!(session.press_submit().await.is_err());

        compose(&mut session);
        session.press_submit().await.unwrap();
        assert!(session.press_submit().await.is_err());
        assert_eq!(session.service.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.workflow().state(), &WorkflowState::QuizPending);
    }

    #[tokio::test]
    async fn test_late_response_is_dropped() {
        let service = ScriptedService::new(vec![Ok(SubmissionReceipt {
            message: String::new(),
            item_id: QueryId(8),
        })]);
        let mut session = session(service);
        *session.service.close_on_submit.lock().unwrap() = Some(session.lifetime());
        compose(&mut session);
        session.press_submit().await.unwrap();
        answer(&mut session);

        assert_eq!(session.press_submit().await.unwrap(), SubmitProgress::Discarded);
        assert_eq!(session.workflow().state(), &WorkflowState::Submitting);
    }
}
