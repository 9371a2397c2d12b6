//! Wall clock

use application::ports::ClockPort;
use chrono::{DateTime, SubsecRound, Utc};

/// Clock reading the system time
///
/// Readings are truncated to whole seconds, the precision the stored item
/// layout carries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(0)
    }
}
