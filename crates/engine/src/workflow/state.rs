//! Search workflow state machine
//!
//! `Composing → QuizPending → Submitting → Succeeded | Failed`
//!
//! All phase changes go through [`SearchWorkflow::transition`]. Field
//! edits are not transitions, but they are gated on the current phase:
//! nothing is editable while a submission is in flight or after it
//! succeeded.

use crate::query::ClaimQuery;
use crate::quiz::QuizGenerator;
use chrono::NaiveDate;
use finders_core::{
    Category, Coordinate, Error, ErrorKind, ImageRef, LostItemSubmission, QueryId, Result,
    SubmissionReceipt, DEFAULT_CENTER,
};
use tracing::{debug, info, warn};

/// Where the results screen takes over after a successful submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHandoff {
    pub query_id: QueryId,
    /// First marked location, or the default center
    pub center: Coordinate,
}

/// Current phase of a search session
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowState {
    /// Initial: every field is freely editable
    Composing,
    /// Quiz generated and frozen; the user fills in answers
    QuizPending,
    /// Payload handed to the matching service; non-interactive
    Submitting,
    /// Terminal: the server accepted the query
    Succeeded(SearchHandoff),
    /// Last submission failed. Quiz and answers are preserved and the
    /// session behaves exactly like `QuizPending`; the next user action
    /// settles it back there.
    Failed { message: String },
}

impl WorkflowState {
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowState::Composing => "composing",
            WorkflowState::QuizPending => "quiz pending",
            WorkflowState::Submitting => "submitting",
            WorkflowState::Succeeded(_) => "succeeded",
            WorkflowState::Failed { .. } => "failed",
        }
    }
}

/// Inputs that may move the workflow between phases
#[derive(Debug)]
pub enum WorkflowEvent {
    /// The user pressed the submit button
    SubmitPressed,
    /// The matching service accepted the payload
    SubmissionSucceeded(SubmissionReceipt),
    /// The matching service call failed
    SubmissionFailed(Error),
    /// The user backed out of the quiz to edit the description again
    QuizAborted,
}

/// What the caller must do after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Render the quiz; `questions` may be zero for an empty description
    QuizGenerated { questions: usize },
    /// Send this payload and report back with the outcome
    Submit(LostItemSubmission),
    /// Hand off to the results screen
    Handoff(SearchHandoff),
    /// Surface this notice; the session is back to answering the quiz
    SubmissionFailed { notice: String, kind: ErrorKind },
    /// Back to composing; the quiz was dropped
    Recomposing,
}

/// Owns the one `ClaimQuery` of a search session and drives its phases
#[derive(Debug)]
pub struct SearchWorkflow {
    query: ClaimQuery,
    state: WorkflowState,
    generator: QuizGenerator,
    default_center: Coordinate,
    today: NaiveDate,
}

impl SearchWorkflow {
    pub fn new(generator: QuizGenerator) -> Self {
        Self::with_date(generator, today())
    }

    /// Start a session as of `today` (the lost date defaults to it)
    pub fn with_date(generator: QuizGenerator, today: NaiveDate) -> Self {
        Self {
            query: ClaimQuery::new(today),
            state: WorkflowState::Composing,
            generator,
            default_center: DEFAULT_CENTER,
            today,
        }
    }

    /// Center used for the handoff when no location was marked
    pub fn with_default_center(mut self, center: Coordinate) -> Self {
        self.default_center = center;
        self
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn query(&self) -> &ClaimQuery {
        &self.query
    }

    /// The submit button is disabled while submitting and after success
    pub fn is_submit_enabled(&self) -> bool {
        !matches!(
            self.state,
            WorkflowState::Submitting | WorkflowState::Succeeded(_)
        )
    }

    // ─── Transitions ─────────────────────────────────────────────────

    /// The single transition function.
    ///
    /// Rejected events return an error and leave both the phase and the
    /// query untouched.
    pub fn transition(&mut self, event: WorkflowEvent) -> Result<Step> {
        let from = self.state.name();

        let (next, step) = match (&self.state, event) {
            (WorkflowState::Composing, WorkflowEvent::SubmitPressed) => {
                if let Err(e) = self.query.check_ready_for_quiz() {
                    info!("Submit rejected while composing: {}", e);
                    return Err(e);
                }

                let questions = self
                    .generator
                    .generate(self.query.description(), self.query.category());
                if questions.is_empty() {
                    warn!("Empty description: no verification quiz for this query");
                }
                let count = questions.len();
                self.query.freeze_quiz(questions);

                (WorkflowState::QuizPending, Step::QuizGenerated { questions: count })
            }

            (
                WorkflowState::QuizPending | WorkflowState::Failed { .. },
                WorkflowEvent::SubmitPressed,
            ) => {
                let submission = match self.query.to_submission() {
                    Ok(submission) => submission,
                    Err(e) => {
                        info!("Submit rejected while answering quiz: {}", e);
                        return Err(e);
                    }
                };

                (WorkflowState::Submitting, Step::Submit(submission))
            }

            (WorkflowState::Submitting, WorkflowEvent::SubmissionSucceeded(receipt)) => {
                let handoff = SearchHandoff {
                    query_id: receipt.item_id,
                    center: self.query.locations().first().unwrap_or(self.default_center),
                };
                info!("Query {} accepted by matching service", receipt.item_id);

                (WorkflowState::Succeeded(handoff), Step::Handoff(handoff))
            }

            (WorkflowState::Submitting, WorkflowEvent::SubmissionFailed(err)) => {
                let notice = err.notice();
                let kind = err.kind();
                warn!("Submission failed ({:?}): {}", kind, err);

                (
                    WorkflowState::Failed {
                        message: notice.clone(),
                    },
                    Step::SubmissionFailed { notice, kind },
                )
            }

            (
                WorkflowState::QuizPending | WorkflowState::Failed { .. },
                WorkflowEvent::QuizAborted,
            ) => {
                self.query.discard_quiz();
                (WorkflowState::Composing, Step::Recomposing)
            }

            (_, event) => {
                let action = match event {
                    WorkflowEvent::SubmitPressed => "submit",
                    WorkflowEvent::SubmissionSucceeded(_) => "accept a submission result",
                    WorkflowEvent::SubmissionFailed(_) => "accept a submission failure",
                    WorkflowEvent::QuizAborted => "abort the quiz",
                };
                debug!("Ignored '{}' while {}", action, from);
                return Err(Error::InvalidTransition {
                    state: from,
                    action,
                });
            }
        };

        debug!("Workflow {} → {}", from, next.name());
        self.state = next;
        Ok(step)
    }

    pub fn press_submit(&mut self) -> Result<Step> {
        self.transition(WorkflowEvent::SubmitPressed)
    }

    /// Feed back the outcome of the `Step::Submit` call
    pub fn complete_submission(&mut self, outcome: Result<SubmissionReceipt>) -> Result<Step> {
        match outcome {
            Ok(receipt) => self.transition(WorkflowEvent::SubmissionSucceeded(receipt)),
            Err(err) => self.transition(WorkflowEvent::SubmissionFailed(err)),
        }
    }

    pub fn abort_quiz(&mut self) -> Result<Step> {
        self.transition(WorkflowEvent::QuizAborted)
    }

    // ─── Edits ───────────────────────────────────────────────────────

    /// Edits are allowed until submission; a failed session settles back
    /// into answering the quiz on the first edit.
    fn begin_edit(&mut self, action: &'static str) -> Result<()> {
        match self.state {
            WorkflowState::Composing | WorkflowState::QuizPending => Ok(()),
            WorkflowState::Failed { .. } => {
                debug!("Workflow failed → quiz pending");
                self.state = WorkflowState::QuizPending;
                Ok(())
            }
            WorkflowState::Submitting | WorkflowState::Succeeded(_) => {
                Err(Error::InvalidTransition {
                    state: self.state.name(),
                    action,
                })
            }
        }
    }

    pub fn set_category(&mut self, category: Category) -> Result<()> {
        self.begin_edit("change the category")?;
        self.query.set_category(category)
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<()> {
        self.begin_edit("change the description")?;
        self.query.set_description(description)
    }

    pub fn set_location_notes(&mut self, notes: impl Into<String>) -> Result<()> {
        self.begin_edit("change the location notes")?;
        self.query.set_location_notes(notes);
        Ok(())
    }

    pub fn set_date_lost(&mut self, date: NaiveDate) -> Result<()> {
        self.begin_edit("change the date")?;
        self.query.set_date_lost(date, self.today)
    }

    /// Map tap: add a candidate location
    pub fn add_location(&mut self, coord: Coordinate) -> Result<usize> {
        self.begin_edit("add a location")?;
        self.query.locations_mut().add_point(coord)
    }

    /// Marker tap: remove that location
    pub fn remove_location(&mut self, index: usize) -> Result<Option<Coordinate>> {
        self.begin_edit("remove a location")?;
        Ok(self.query.locations_mut().remove_point(index))
    }

    pub fn clear_locations(&mut self) -> Result<()> {
        self.begin_edit("clear locations")?;
        self.query.locations_mut().clear();
        Ok(())
    }

    pub fn add_attachments<I>(&mut self, images: I) -> Result<()>
    where
        I: IntoIterator<Item = ImageRef>,
    {
        self.begin_edit("attach photos")?;
        self.query.attachments_mut().extend(images);
        Ok(())
    }

    pub fn remove_attachment(&mut self, index: usize) -> Result<Option<ImageRef>> {
        self.begin_edit("remove a photo")?;
        Ok(self.query.attachments_mut().remove(index))
    }

    pub fn set_answer(&mut self, index: usize, answer: impl Into<String>) -> Result<()> {
        if matches!(self.state, WorkflowState::Composing) {
            return Err(Error::InvalidTransition {
                state: self.state.name(),
                action: "answer the quiz",
            });
        }
        self.begin_edit("answer the quiz")?;
        self.query.set_answer(index, answer)
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
