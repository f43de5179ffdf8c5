//! Day/hour/minute/second breakdown of a deadline delta for live display.

use chrono::Duration;
use serde::Serialize;
use std::fmt;

/// A non-negative deadline delta decomposed for rendering. `overdue`
/// distinguishes "time left" from "time past due"; the magnitude is
/// formatted identically either way.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub overdue: bool,
}

impl Countdown {
    /// Negative durations clamp to zero; the engine only hands over
    /// non-negative deltas.
    pub fn from_duration(delta: Duration, overdue: bool) -> Self {
        let total = delta.num_seconds().max(0);
        Self {
            days: total / 86_400,
            hours: (total % 86_400) / 3_600,
            minutes: (total % 3_600) / 60,
            seconds: total % 60,
            overdue,
        }
    }

    pub fn qualifier(&self) -> &'static str {
        if self.overdue {
            "OVERDUE"
        } else {
            "remaining"
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days > 0 {
            write!(f, "{}d ", self.days)?;
        }
        write!(f, "{}h {}m {}s", self.hours, self.minutes, self.seconds)
    }
}
