//! Client-side dashboard rollups.
//!
//! The backend serves its own tracker stats; these rollups are the ones the
//! console derives locally from fetched lists, including the follow-up
//! posture counts that come out of the status engine.

use chrono::{DateTime, Utc};
use doorreach_core::types::{EnrichmentStats, JobStatus, OutreachCampaign, ProcessingResult};
use doorreach_followup::{FollowUpStage, FollowUpTimeline};
use serde::Serialize;

/// Generation-job totals across all results.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CampaignRollup {
    pub total: u64,
    pub completed: u64,
    pub failed: u64,
    pub processing: u64,
    pub total_cost: f64,
}

impl CampaignRollup {
    pub fn from_results(results: &[ProcessingResult]) -> Self {
        let mut rollup = Self {
            total: results.len() as u64,
            ..Self::default()
        };
        for result in results {
            match result.status {
                JobStatus::Completed => rollup.completed += 1,
                JobStatus::Failed => rollup.failed += 1,
                JobStatus::Processing | JobStatus::Queued => rollup.processing += 1,
            }
            rollup.total_cost += result.total_cost;
        }
        rollup
    }
}

/// Follow-up posture counts across the campaign tracker, evaluated at one
/// instant so the numbers on screen are mutually consistent.
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct FollowUpRollup {
    pub total: u64,
    pub not_sent: u64,
    pub waiting: u64,
    pub overdue: u64,
    pub responded: u64,
    pub sequence_complete: u64,
}

impl FollowUpRollup {
    pub fn from_campaigns(campaigns: &[OutreachCampaign], now: DateTime<Utc>) -> Self {
        let mut rollup = Self {
            total: campaigns.len() as u64,
            ..Self::default()
        };
        for campaign in campaigns {
            let stage = FollowUpTimeline::from_campaign(campaign).status_at(now).stage;
            match stage {
                FollowUpStage::NotSent => rollup.not_sent += 1,
                FollowUpStage::Responded => rollup.responded += 1,
                FollowUpStage::AllSent => rollup.sequence_complete += 1,
                _ if stage.is_overdue() => rollup.overdue += 1,
                _ => rollup.waiting += 1,
            }
        }
        rollup
    }
}

/// Everything the overview screen shows in one struct.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub campaigns: CampaignRollup,
    pub followups: FollowUpRollup,
    pub enrichment: EnrichmentStats,
}

impl DashboardSummary {
    pub fn build(
        results: &[ProcessingResult],
        campaigns: &[OutreachCampaign],
        enrichment: EnrichmentStats,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            campaigns: CampaignRollup::from_results(results),
            followups: FollowUpRollup::from_campaigns(campaigns, now),
            enrichment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn result(status: JobStatus, cost: f64) -> ProcessingResult {
        ProcessingResult {
            job_id: Uuid::new_v4(),
            status,
            created_at: t0(),
            completed_at: None,
            analysis: None,
            variations: Vec::new(),
            followup_sequence: Vec::new(),
            sequence_count: 0,
            total_cost: cost,
            error: None,
        }
    }

    fn campaign(sent: Option<DateTime<Utc>>, responded: Option<DateTime<Utc>>) -> OutreachCampaign {
        OutreachCampaign {
            id: "rec001".to_string(),
            retailer_name: "Door".to_string(),
            retailer_country: None,
            retailer_email: None,
            retailer_notes: None,
            brand_name: "ALEXMONHART".to_string(),
            status: "completed".to_string(),
            ready_to_send: true,
            chosen_variant: None,
            email_sent: sent.is_some(),
            email_id: None,
            sent_timestamp: sent,
            followup1_sent_date: None,
            followup2_sent_date: None,
            followup3_sent_date: None,
            retailer_responded: responded.is_some(),
            response_date: responded,
            created_at: t0(),
            intro_email_a: String::new(),
            intro_email_b: String::new(),
            intro_email_c: String::new(),
            followup_1: String::new(),
            followup_2: String::new(),
            followup_3: String::new(),
            personalization_notes: String::new(),
        }
    }

    #[test]
    fn test_campaign_rollup_counts_and_cost() {
        let results = vec![
            result(JobStatus::Completed, 0.42),
            result(JobStatus::Completed, 0.38),
            result(JobStatus::Failed, 0.10),
            result(JobStatus::Processing, 0.0),
            result(JobStatus::Queued, 0.0),
        ];
        let rollup = CampaignRollup::from_results(&results);
        assert_eq!(rollup.total, 5);
        assert_eq!(rollup.completed, 2);
        assert_eq!(rollup.failed, 1);
        assert_eq!(rollup.processing, 2);
        assert!((rollup.total_cost - 0.90).abs() < 1e-9);
    }

    #[test]
    fn test_follow_up_rollup_counts_every_posture() {
        let now = t0() + Duration::days(10);
        let mut all_sent = campaign(Some(t0()), None);
        all_sent.followup1_sent_date = Some(t0() + Duration::days(7));
        all_sent.followup2_sent_date = Some(t0() + Duration::days(14));
        all_sent.followup3_sent_date = Some(t0() + Duration::days(21));

        let campaigns = vec![
            campaign(None, None),
            campaign(Some(t0()), None),                           // overdue
            campaign(Some(t0() + Duration::days(8)), None),       // waiting
            campaign(Some(t0()), Some(t0() + Duration::days(2))), // responded
            all_sent,
        ];

        let rollup = FollowUpRollup::from_campaigns(&campaigns, now);
        assert_eq!(rollup.total, 5);
        assert_eq!(rollup.not_sent, 1);
        assert_eq!(rollup.overdue, 1);
        assert_eq!(rollup.waiting, 1);
        assert_eq!(rollup.responded, 1);
        assert_eq!(rollup.sequence_complete, 1);
    }

    #[test]
    fn test_summary_composes_all_sections() {
        let enrichment = EnrichmentStats {
            total_retailers: 120,
            with_emails: 85,
            by_status: Default::default(),
        };
        let summary = DashboardSummary::build(
            &[result(JobStatus::Completed, 1.0)],
            &[campaign(Some(t0()), None)],
            enrichment,
            t0() + Duration::days(1),
        );
        assert_eq!(summary.campaigns.total, 1);
        assert_eq!(summary.followups.waiting, 1);
        assert_eq!(summary.enrichment.total_retailers, 120);
    }
}
