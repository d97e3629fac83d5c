//! The lost-item query and the components it is assembled from

mod attachments;
mod claim_query;
mod location_picker;

pub use attachments::MediaAttachmentSet;
pub use claim_query::{ClaimQuery, Quiz};
pub use location_picker::{LocationPicker, MAX_LOCATIONS};
