//! Request and response payloads for the outreach backend API.

use chrono::{DateTime, Utc};
use doorreach_core::types::{EmailVariant, JobStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The four individually writable campaign date fields. Writes go through
/// the generic update-campaign call one field at a time; there are no
/// partial-success semantics to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignDateField {
    Sent,
    FollowUp1,
    FollowUp2,
    FollowUp3,
}

impl CampaignDateField {
    /// Field name as the backend's campaign record spells it.
    pub fn wire_name(&self) -> &'static str {
        match self {
            CampaignDateField::Sent => "sent_timestamp",
            CampaignDateField::FollowUp1 => "followup1_sent_date",
            CampaignDateField::FollowUp2 => "followup2_sent_date",
            CampaignDateField::FollowUp3 => "followup3_sent_date",
        }
    }

    pub fn for_slot(slot: u8) -> Option<Self> {
        match slot {
            1 => Some(CampaignDateField::FollowUp1),
            2 => Some(CampaignDateField::FollowUp2),
            3 => Some(CampaignDateField::FollowUp3),
            _ => None,
        }
    }
}

impl FromStr for CampaignDateField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(CampaignDateField::Sent),
            "followup1" => Ok(CampaignDateField::FollowUp1),
            "followup2" => Ok(CampaignDateField::FollowUp2),
            "followup3" => Ok(CampaignDateField::FollowUp3),
            other => Err(format!("unknown campaign date field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SendEmailRequest {
    pub campaign_id: String,
    pub variation: EmailVariant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub email_id: String,
    pub sent_to: String,
    pub subject: String,
    pub retailer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkRespondedRequest {
    pub campaign_id: String,
    pub response_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateCampaignsRequest {
    pub retailer_ids: Vec<String>,
    pub brand_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrichBulkRequest {
    pub retailer_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessRetailerRequest {
    pub url: String,
    pub generate_followups: bool,
}

/// Backend acknowledgement of a generation job submission.
#[derive(Debug, Clone, Deserialize)]
pub struct JobAccepted {
    pub job_id: Uuid,
    pub status: JobStatus,
}

// ─── Discovery pipeline ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ValidatePipelineRequest {
    pub seed_retailer_urls: Vec<String>,
    pub competitor_brand_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartPipelineRequest {
    pub seed_retailer_urls: Vec<String>,
    pub competitor_brand_urls: Vec<String>,
    pub brand_name: String,
    pub enrich_contacts: bool,
    pub max_enrich: u32,
}

/// Pre-flight check of pipeline inputs before a run is started.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineValidation {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub requirements: PipelineRequirements,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineRequirements {
    pub min_seed_retailers: u32,
    pub min_competitor_brands: u32,
    pub provided_seeds: u32,
    pub provided_competitors: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PipelineRunStatus {
    Queued,
    Running,
    Completed,
    Failed,
}

impl fmt::Display for PipelineRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineRunStatus::Queued => write!(f, "queued"),
            PipelineRunStatus::Running => write!(f, "running"),
            PipelineRunStatus::Completed => write!(f, "completed"),
            PipelineRunStatus::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PipelineStageProgress {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PipelineStats {
    #[serde(default)]
    pub retailers_found: u64,
    #[serde(default)]
    pub retailers_enriched: u64,
    #[serde(default)]
    pub emails_generated: u64,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PipelineRunConfig {
    #[serde(default)]
    pub brand_name: String,
    #[serde(default)]
    pub enrich_contacts: bool,
    #[serde(default)]
    pub max_enrich: u32,
}

/// A retailer surfaced by a discovery run. Distinct from the tracked
/// [`doorreach_core::types::Retailer`]: these are candidates, keyed by
/// domain, with nullable contact data.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveredRetailer {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub url: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub source_types: Vec<String>,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default)]
    pub contact_emails: Option<Vec<String>>,
    #[serde(default)]
    pub enrichment_status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Full state of one discovery run, from queueing through per-stage
/// progress to the discovered retailers.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineRun {
    pub run_id: String,
    pub status: PipelineRunStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub stages: HashMap<String, PipelineStageProgress>,
    #[serde(default)]
    pub stats: PipelineStats,
    #[serde(default)]
    pub retailers: Vec<DiscoveredRetailer>,
    #[serde(default)]
    pub total_retailers: u64,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub config: PipelineRunConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PipelineRunList {
    #[serde(default)]
    pub runs: Vec<PipelineRun>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}
