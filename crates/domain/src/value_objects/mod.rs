//! Value objects - immutable, identity-less domain primitives

mod message_id;
mod text_policy;

pub use message_id::{DRAFT_ID_PREFIX, MessageId};
pub use text_policy::TextPolicy;
