//! Clock port

use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;

/// Port providing the current time
///
/// Every persisted timestamp flows through this seam so tests can pin it.
/// Implementations return whole-second instants; the item layout stores
/// nothing finer.
#[cfg_attr(test, automock)]
pub trait ClockPort: Send + Sync {
    /// The current instant, UTC
    fn now(&self) -> DateTime<Utc>;
}
