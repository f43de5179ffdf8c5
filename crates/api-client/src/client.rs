//! Async HTTP client for the outreach backend.

use chrono::{DateTime, Utc};
use doorreach_core::config::ApiConfig;
use doorreach_core::error::{DoorReachError, DoorReachResult};
use doorreach_core::types::{
    CampaignList, EnrichmentStats, OutreachStats, ProcessingResult, ResultList, RetailerList,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::models::{
    AckResponse, CampaignDateField, EnrichBulkRequest, GenerateCampaignsRequest, JobAccepted,
    MarkRespondedRequest, PipelineRun, PipelineRunList, PipelineValidation, ProcessRetailerRequest,
    SendEmailRequest, SendEmailResponse, StartPipelineRequest, ValidatePipelineRequest,
};

/// Async HTTP client for the outreach backend REST API.
pub struct OutreachClient {
    http: reqwest::Client,
    base_url: Url,
}

impl OutreachClient {
    pub fn new(config: &ApiConfig) -> DoorReachResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| DoorReachError::Config(format!("invalid API base URL: {}", e)))?;
        let http = reqwest::Client::builder()
            .user_agent("doorreach/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DoorReachError::Transport(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    // ─── Campaign tracker ──────────────────────────────────────────────────

    pub async fn list_campaigns(&self) -> DoorReachResult<CampaignList> {
        self.get_json("/api/airtable/campaigns").await
    }

    pub async fn list_retailers(
        &self,
        skip: u64,
        limit: u64,
        country: Option<&str>,
        status: Option<&str>,
    ) -> DoorReachResult<RetailerList> {
        self.get_json(&retailers_path(skip, limit, country, status))
            .await
    }

    pub async fn outreach_stats(&self) -> DoorReachResult<OutreachStats> {
        self.get_json("/api/airtable/stats").await
    }

    /// Writes one campaign date field. Success or failure only — the
    /// backend has no partial-success semantics for this call.
    pub async fn update_campaign_date(
        &self,
        campaign_id: &str,
        field: CampaignDateField,
        value: DateTime<Utc>,
    ) -> DoorReachResult<AckResponse> {
        debug!(campaign_id, field = field.wire_name(), "Updating campaign date");
        let mut body = serde_json::Map::new();
        body.insert(field.wire_name().to_string(), serde_json::to_value(value)?);
        let resp = self
            .http
            .patch(self.endpoint(&format!("/api/airtable/campaigns/{}", campaign_id)))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }

    // ─── Campaign actions ──────────────────────────────────────────────────

    pub async fn send_email(&self, request: &SendEmailRequest) -> DoorReachResult<SendEmailResponse> {
        debug!(
            campaign_id = %request.campaign_id,
            variation = %request.variation,
            "Sending campaign email"
        );
        self.post_json("/api/campaigns/send-email", request).await
    }

    /// Records a retailer response. The caller supplies the genuine
    /// response timestamp; the client never samples the clock itself.
    pub async fn mark_responded(
        &self,
        campaign_id: &str,
        response_date: DateTime<Utc>,
    ) -> DoorReachResult<AckResponse> {
        let request = MarkRespondedRequest {
            campaign_id: campaign_id.to_string(),
            response_date,
        };
        self.post_json("/api/campaigns/mark-responded", &request).await
    }

    pub async fn generate_campaigns(
        &self,
        retailer_ids: Vec<String>,
        brand_name: &str,
    ) -> DoorReachResult<serde_json::Value> {
        debug!(count = retailer_ids.len(), brand = brand_name, "Generating campaigns in bulk");
        let request = GenerateCampaignsRequest {
            retailer_ids,
            brand_name: brand_name.to_string(),
        };
        self.post_json("/api/campaigns/generate-bulk", &request).await
    }

    // ─── Retailer enrichment ───────────────────────────────────────────────

    pub async fn enrich_retailer(&self, retailer_id: &str) -> DoorReachResult<serde_json::Value> {
        let resp = self
            .http
            .post(self.endpoint(&format!("/api/retailers/{}/enrich", retailer_id)))
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }

    pub async fn enrich_retailers(
        &self,
        retailer_ids: Vec<String>,
    ) -> DoorReachResult<serde_json::Value> {
        let request = EnrichBulkRequest { retailer_ids };
        self.post_json("/api/retailers/enrich-bulk", &request).await
    }

    pub async fn enrichment_stats(&self) -> DoorReachResult<EnrichmentStats> {
        self.get_json("/api/retailers/enrichment-stats").await
    }

    // ─── Discovery pipeline ────────────────────────────────────────────────

    /// Pre-flight check of seed and competitor URLs before starting a run.
    pub async fn validate_pipeline(
        &self,
        request: &ValidatePipelineRequest,
    ) -> DoorReachResult<PipelineValidation> {
        self.post_json("/api/pipeline/validate", request).await
    }

    pub async fn start_pipeline(
        &self,
        request: &StartPipelineRequest,
    ) -> DoorReachResult<PipelineRun> {
        debug!(
            seeds = request.seed_retailer_urls.len(),
            competitors = request.competitor_brand_urls.len(),
            brand = %request.brand_name,
            "Starting discovery pipeline run"
        );
        self.post_json("/api/pipeline/start", request).await
    }

    pub async fn pipeline_status(&self, run_id: &str) -> DoorReachResult<PipelineRun> {
        self.get_json(&format!("/api/pipeline/{}", run_id)).await
    }

    pub async fn list_pipeline_runs(&self) -> DoorReachResult<PipelineRunList> {
        self.get_json("/api/pipeline").await
    }

    // ─── Generation jobs ───────────────────────────────────────────────────

    pub async fn process_retailer(
        &self,
        url: &str,
        generate_followups: bool,
    ) -> DoorReachResult<JobAccepted> {
        let request = ProcessRetailerRequest {
            url: url.to_string(),
            generate_followups,
        };
        self.post_json("/api/process-retailer", &request).await
    }

    pub async fn list_results(&self) -> DoorReachResult<ResultList> {
        self.get_json("/api/results").await
    }

    pub async fn get_result(&self, job_id: Uuid) -> DoorReachResult<ProcessingResult> {
        self.get_json(&format!("/api/results/{}", job_id)).await
    }

    pub async fn delete_result(&self, job_id: Uuid) -> DoorReachResult<serde_json::Value> {
        let resp = self
            .http
            .delete(self.endpoint(&format!("/api/results/{}", job_id)))
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }

    // ─── CSV export links ──────────────────────────────────────────────────

    pub fn campaigns_csv_url(&self) -> String {
        self.endpoint("/api/campaigns/export-csv")
    }

    pub fn retailers_csv_url(&self) -> String {
        self.endpoint("/api/retailers/export/csv")
    }

    // ─── Plumbing ──────────────────────────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> DoorReachResult<T> {
        let resp = self
            .http
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> DoorReachResult<T> {
        let resp = self
            .http
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        decode(resp).await
    }
}

fn retailers_path(skip: u64, limit: u64, country: Option<&str>, status: Option<&str>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("skip", &skip.to_string());
    query.append_pair("limit", &limit.to_string());
    if let Some(country) = country {
        query.append_pair("country", country);
    }
    if let Some(status) = status {
        query.append_pair("status", status);
    }
    format!("/api/airtable/retailers?{}", query.finish())
}

fn transport(e: reqwest::Error) -> DoorReachError {
    DoorReachError::Transport(e.to_string())
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> DoorReachResult<T> {
    let status = resp.status();
    let text = resp.text().await.map_err(transport)?;
    if !status.is_success() {
        return Err(DoorReachError::Api(format!(
            "HTTP {}: {}",
            status.as_u16(),
            extract_detail(&text)
        )));
    }
    serde_json::from_str(&text).map_err(Into::into)
}

/// Pulls the human-readable message out of the backend's error envelope.
/// The backend wraps errors as `{"detail": "..."}"` or
/// `{"detail": {"message": "..."}}`; anything else passes through raw.
fn extract_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail") {
            if let Some(message) = detail.as_str() {
                return message.to_string();
            }
            if let Some(message) = detail.get("message").and_then(|m| m.as_str()) {
                return message.to_string();
            }
        }
    }
    body.to_string()
}
