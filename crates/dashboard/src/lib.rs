//! Presentation-side building blocks for the outreach console —
//! campaign filters, stat rollups, card view models, and the live
//! countdown ticker.

pub mod cards;
pub mod filters;
pub mod stats;
pub mod ticker;

pub use cards::{CampaignCard, VariantPreview};
pub use filters::CampaignFilter;
pub use stats::{CampaignRollup, DashboardSummary, FollowUpRollup};
pub use ticker::CountdownTicker;
