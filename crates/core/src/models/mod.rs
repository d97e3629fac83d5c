//! Data models for lost and found reports

mod candidate;
mod category;
mod submission;

pub use candidate::*;
pub use category::*;
pub use submission::*;
