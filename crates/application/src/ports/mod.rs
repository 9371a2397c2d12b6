//! Port definitions for the application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these
//! ports.

mod clock;
mod item_store;
mod mailer;
mod text_deriver;

#[cfg(test)]
pub use clock::MockClockPort;
pub use clock::ClockPort;
#[cfg(test)]
pub use item_store::MockItemStorePort;
pub use item_store::{Condition, ItemStoreError, ItemStorePort, WriteOp};
#[cfg(test)]
pub use mailer::MockMailerPort;
pub use mailer::{MailerError, MailerPort};
#[cfg(test)]
pub use text_deriver::MockTextDeriverPort;
pub use text_deriver::{TextDeriverError, TextDeriverPort};
