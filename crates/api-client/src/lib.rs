//! REST client for the outreach backend.
//!
//! The backend owns scraping, enrichment, and AI email generation; this
//! crate only issues the documented calls and decodes their payloads.
//! Every call is one request with no retry loop: failures surface to the
//! caller as `DoorReachError`.

pub mod client;
pub mod models;

pub use client::OutreachClient;
pub use models::{
    AckResponse, CampaignDateField, JobAccepted, PipelineRun, PipelineRunList, PipelineRunStatus,
    PipelineValidation, SendEmailRequest, SendEmailResponse, StartPipelineRequest,
    ValidatePipelineRequest,
};
