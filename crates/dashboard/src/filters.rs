//! Campaign list filters for the outreach console.

use chrono::{DateTime, Utc};
use doorreach_core::types::OutreachCampaign;
use doorreach_followup::FollowUpTimeline;
use std::fmt;
use std::str::FromStr;

/// The four list views of the campaign tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CampaignFilter {
    #[default]
    All,
    /// Initial email has gone out.
    Sent,
    /// The follow-up engine reports a missed deadline.
    Overdue,
    /// Sent and still waiting on a reply.
    Waiting,
}

impl CampaignFilter {
    pub fn matches(&self, campaign: &OutreachCampaign, now: DateTime<Utc>) -> bool {
        match self {
            CampaignFilter::All => true,
            CampaignFilter::Sent => campaign.sent_timestamp.is_some(),
            CampaignFilter::Overdue => FollowUpTimeline::from_campaign(campaign)
                .status_at(now)
                .stage
                .is_overdue(),
            CampaignFilter::Waiting => {
                campaign.sent_timestamp.is_some() && !campaign.retailer_responded
            }
        }
    }

    pub fn apply<'a>(
        &self,
        campaigns: &'a [OutreachCampaign],
        now: DateTime<Utc>,
    ) -> Vec<&'a OutreachCampaign> {
        campaigns.iter().filter(|c| self.matches(c, now)).collect()
    }
}

impl fmt::Display for CampaignFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CampaignFilter::All => "all",
            CampaignFilter::Sent => "sent",
            CampaignFilter::Overdue => "overdue",
            CampaignFilter::Waiting => "waiting",
        };
        f.write_str(name)
    }
}

impl FromStr for CampaignFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CampaignFilter::All),
            "sent" => Ok(CampaignFilter::Sent),
            "overdue" => Ok(CampaignFilter::Overdue),
            "waiting" => Ok(CampaignFilter::Waiting),
            other => Err(format!("unknown campaign filter: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn campaign(
        id: &str,
        sent: Option<DateTime<Utc>>,
        responded: Option<DateTime<Utc>>,
    ) -> OutreachCampaign {
        OutreachCampaign {
            id: id.to_string(),
            retailer_name: format!("Retailer {}", id),
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
    fn test_filters_partition_the_list() {
        let now = t0() + Duration::days(10);
        let campaigns = vec![
            campaign("a", None, None),
            campaign("b", Some(t0()), None),                          // overdue at day 10
            campaign("c", Some(t0() + Duration::days(8)), None),      // still counting down
            campaign("d", Some(t0()), Some(t0() + Duration::days(3))), // responded
        ];

        assert_eq!(CampaignFilter::All.apply(&campaigns, now).len(), 4);
        assert_eq!(CampaignFilter::Sent.apply(&campaigns, now).len(), 3);

        let overdue = CampaignFilter::Overdue.apply(&campaigns, now);
        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].id, "b");

        let waiting = CampaignFilter::Waiting.apply(&campaigns, now);
        assert_eq!(waiting.len(), 2);
        assert!(waiting.iter().all(|c| c.id == "b" || c.id == "c"));
    }

    #[test]
    fn test_overdue_uses_the_real_timeline() {
        // Follow-up 1 already went out, so day 10 is inside slot 2's window.
        let mut c = campaign("a", Some(t0()), None);
        c.followup1_sent_date = Some(t0() + Duration::days(7));
        let now = t0() + Duration::days(10);
        assert!(!CampaignFilter::Overdue.matches(&c, now));
        assert!(CampaignFilter::Overdue.matches(&c, t0() + Duration::days(15)));
    }

    #[test]
    fn test_filter_parsing_round_trip() {
        for filter in [
            CampaignFilter::All,
            CampaignFilter::Sent,
            CampaignFilter::Overdue,
            CampaignFilter::Waiting,
        ] {
            assert_eq!(filter.to_string().parse::<CampaignFilter>(), Ok(filter));
        }
        assert!("stale".parse::<CampaignFilter>().is_err());
    }
}
