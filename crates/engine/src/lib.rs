//! Campus Finders Engine - Lost-item search workflow, results, and claims

pub mod claim;
pub mod found;
pub mod lifetime;
pub mod query;
pub mod quiz;
pub mod results;
pub mod service;
pub mod workflow;

pub use claim::{ClaimGate, ClaimState};
pub use found::FoundReportDraft;
pub use lifetime::ScreenLifetime;
pub use query::{ClaimQuery, LocationPicker, MediaAttachmentSet, Quiz};
pub use quiz::{QuizGenerator, QuizPolicy};
pub use results::{ClaimAction, FetchStatus, MapMarker, MatchResultsView};
pub use service::{LocationProvider, MatchingService, ServiceContext};
pub use workflow::{
    SearchHandoff, SearchSession, SearchWorkflow, Step, SubmitProgress, WorkflowState,
};
