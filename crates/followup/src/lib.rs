//! Follow-up cadence engine for outreach campaigns.
//!
//! Derives a campaign's lifecycle stage, the recommended next action, and
//! the time to (or past) its next follow-up deadline from the send and
//! response timestamps. Pure and clock-free: callers pass `now` and decide
//! how often to re-evaluate.

pub mod countdown;
pub mod engine;

pub use countdown::Countdown;
pub use engine::{evaluate, FollowUpStage, FollowUpStatus, FollowUpTimeline};
