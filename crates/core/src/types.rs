//! Domain types — outreach campaigns, retailers, generation jobs, stats.
//!
//! These mirror the wire format of the outreach backend: timestamps are
//! ISO-8601 strings or null, record ids are opaque strings, generation job
//! ids are UUIDs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ─── Campaigns ─────────────────────────────────────────────────────────────

/// One outreach campaign against a single retailer ("door"), as tracked by
/// the backend. All four send timestamps plus the response date drive the
/// follow-up status engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachCampaign {
    pub id: String,
    pub retailer_name: String,
    #[serde(default)]
    pub retailer_country: Option<String>,
    #[serde(default)]
    pub retailer_email: Option<String>,
    #[serde(default)]
    pub retailer_notes: Option<String>,
    pub brand_name: String,
    pub status: String,
    #[serde(default)]
    pub ready_to_send: bool,
    #[serde(default)]
    pub chosen_variant: Option<EmailVariant>,
    #[serde(default)]
    pub email_sent: bool,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub sent_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub followup1_sent_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub followup2_sent_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub followup3_sent_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub retailer_responded: bool,
    #[serde(default)]
    pub response_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub intro_email_a: String,
    #[serde(default)]
    pub intro_email_b: String,
    #[serde(default)]
    pub intro_email_c: String,
    #[serde(default)]
    pub followup_1: String,
    #[serde(default)]
    pub followup_2: String,
    #[serde(default)]
    pub followup_3: String,
    #[serde(default)]
    pub personalization_notes: String,
}

/// One of the three AI-generated alternative email drafts for a campaign.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EmailVariant {
    A,
    B,
    C,
}

impl EmailVariant {
    pub const ALL: [EmailVariant; 3] = [EmailVariant::A, EmailVariant::B, EmailVariant::C];

    /// The draft text for this variant on the given campaign.
    pub fn draft<'a>(&self, campaign: &'a OutreachCampaign) -> &'a str {
        match self {
            EmailVariant::A => &campaign.intro_email_a,
            EmailVariant::B => &campaign.intro_email_b,
            EmailVariant::C => &campaign.intro_email_c,
        }
    }
}

impl fmt::Display for EmailVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailVariant::A => write!(f, "A"),
            EmailVariant::B => write!(f, "B"),
            EmailVariant::C => write!(f, "C"),
        }
    }
}

impl FromStr for EmailVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(EmailVariant::A),
            "B" => Ok(EmailVariant::B),
            "C" => Ok(EmailVariant::C),
            other => Err(format!("unknown email variant: {}", other)),
        }
    }
}

// ─── Retailers ─────────────────────────────────────────────────────────────

/// A retail storefront account ("door") with whatever contact data
/// enrichment has produced so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retailer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub contact_emails: Vec<String>,
    #[serde(default)]
    pub contact_names: Vec<String>,
    #[serde(default)]
    pub instagram_handle: Option<String>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub relationship_status: Option<String>,
    #[serde(default)]
    pub enrichment_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_brands: Vec<String>,
}

// ─── Generation jobs ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

/// Retailer analysis block produced by the backend scraper before drafting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerAnalysis {
    pub retailer_name: String,
    pub url: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub store_count: Option<u32>,
    #[serde(default)]
    pub instagram_handle: Option<String>,
    pub curatorial_direction: String,
    pub proof_points_count: u32,
    pub best_proof_point: String,
}

/// One generated intro-email alternative with its validation outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedVariation {
    pub version: String,
    pub differentiator_used: String,
    pub subject: String,
    pub opening_paragraph: String,
    pub body: String,
    pub validation_score: f64,
    #[serde(default)]
    pub validation_issues: Vec<String>,
}

/// One follow-up email draft in the generated sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpDraft {
    pub sequence_number: u32,
    pub days_after_previous: u32,
    pub purpose: String,
    pub subject: String,
    pub body: String,
}

/// Full result of an AI email-generation job for one retailer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub job_id: Uuid,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub analysis: Option<RetailerAnalysis>,
    #[serde(default)]
    pub variations: Vec<GeneratedVariation>,
    #[serde(default)]
    pub followup_sequence: Vec<FollowUpDraft>,
    #[serde(default)]
    pub sequence_count: u32,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub error: Option<String>,
}

// ─── List envelopes ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignList {
    pub campaigns: Vec<OutreachCampaign>,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerList {
    pub retailers: Vec<Retailer>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultList {
    #[serde(default)]
    pub results: Vec<ProcessingResult>,
}

// ─── Backend-computed stats ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignTotals {
    pub total: u64,
    pub sent: u64,
    pub responded: u64,
    pub pending: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerTotals {
    pub total: u64,
    pub with_emails: u64,
    pub enrichment_rate: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceTotals {
    pub response_rate: String,
    pub conversion_rate: String,
}

/// Outreach tracker rollup as computed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutreachStats {
    pub campaigns: CampaignTotals,
    pub retailers: RetailerTotals,
    pub performance: PerformanceTotals,
}

/// Enrichment coverage across the retailer base.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EnrichmentStats {
    #[serde(default)]
    pub total_retailers: u64,
    #[serde(default)]
    pub with_emails: u64,
    #[serde(default)]
    pub by_status: HashMap<String, u64>,
}
