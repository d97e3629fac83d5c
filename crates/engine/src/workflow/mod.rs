//! Lost-item search workflow

mod session;
mod state;

pub use session::{SearchSession, SubmitProgress};
pub use state::{SearchHandoff, SearchWorkflow, Step, WorkflowEvent, WorkflowState};
