//! View models for campaign cards.

use chrono::{DateTime, Utc};
use doorreach_core::types::{EmailVariant, OutreachCampaign};
use doorreach_followup::{Countdown, FollowUpTimeline};
use serde::Serialize;

const SNIPPET_LEN: usize = 150;

/// Subject plus a truncated body excerpt for one draft variant. Drafts come
/// from the backend as `Subject: ...\n\n<body>`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct VariantPreview {
    pub variant: EmailVariant,
    pub subject: String,
    pub snippet: String,
}

impl VariantPreview {
    pub fn parse(variant: EmailVariant, draft: &str) -> Self {
        let first = draft.lines().next().unwrap_or("").trim();
        let subject = first.strip_prefix("Subject: ").unwrap_or(first).to_string();
        let body: String = draft.lines().skip(2).collect::<Vec<_>>().join("\n");
        let snippet = body.chars().take(SNIPPET_LEN).collect();
        Self {
            variant,
            subject,
            snippet,
        }
    }
}

/// Everything one campaign card renders: identity, live follow-up status,
/// and the three draft previews. Rebuilt per tick, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignCard {
    pub campaign_id: String,
    pub retailer_name: String,
    pub retailer_email: Option<String>,
    pub retailer_notes: Option<String>,
    pub brand_name: String,
    pub stage: String,
    pub next_action: String,
    pub countdown: Option<Countdown>,
    pub overdue: bool,
    pub variants: Vec<VariantPreview>,
}

impl CampaignCard {
    pub fn build(campaign: &OutreachCampaign, now: DateTime<Utc>) -> Self {
        let status = FollowUpTimeline::from_campaign(campaign).status_at(now);
        let variants = EmailVariant::ALL
            .iter()
            .map(|v| VariantPreview::parse(*v, v.draft(campaign)))
            .collect();
        Self {
            campaign_id: campaign.id.clone(),
            retailer_name: campaign.retailer_name.clone(),
            retailer_email: campaign.retailer_email.clone(),
            retailer_notes: campaign.retailer_notes.clone(),
            brand_name: campaign.brand_name.clone(),
            stage: status.stage.to_string(),
            next_action: status.next_action.to_string(),
            countdown: status.countdown(),
            overdue: status.stage.is_overdue(),
            variants,
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

    #[test]
    fn test_variant_preview_splits_subject_and_body() {
        let draft = "Subject: Your shop and our new line\n\nHi Anna,\nwe noticed your curation...";
        let preview = VariantPreview::parse(EmailVariant::A, draft);
        assert_eq!(preview.subject, "Your shop and our new line");
        assert!(preview.snippet.starts_with("Hi Anna,"));
    }

    #[test]
    fn test_variant_preview_truncates_long_bodies() {
        let body = "x".repeat(400);
        let draft = format!("Subject: s\n\n{}", body);
        let preview = VariantPreview::parse(EmailVariant::B, &draft);
        assert_eq!(preview.snippet.chars().count(), 150);
    }

    #[test]
    fn test_variant_preview_without_subject_prefix() {
        let preview = VariantPreview::parse(EmailVariant::C, "Quick question\n\nbody text");
        assert_eq!(preview.subject, "Quick question");
    }

    #[test]
    fn test_card_carries_live_status() {
        let campaign = OutreachCampaign {
            id: "rec9".to_string(),
            retailer_name: "Studio Shop Berlin".to_string(),
            retailer_country: Some("DE".to_string()),
            retailer_email: Some("hello@studioshop.de".to_string()),
            retailer_notes: None,
            brand_name: "ALEXMONHART".to_string(),
            status: "completed".to_string(),
            ready_to_send: true,
            chosen_variant: None,
            email_sent: true,
            email_id: None,
            sent_timestamp: Some(t0()),
            followup1_sent_date: None,
            followup2_sent_date: None,
            followup3_sent_date: None,
            retailer_responded: false,
            response_date: None,
            created_at: t0(),
            intro_email_a: "Subject: A\n\nbody a".to_string(),
            intro_email_b: "Subject: B\n\nbody b".to_string(),
            intro_email_c: "Subject: C\n\nbody c".to_string(),
            followup_1: String::new(),
            followup_2: String::new(),
            followup_3: String::new(),
            personalization_notes: String::new(),
        };

        let card = CampaignCard::build(&campaign, t0() + Duration::days(8));
        assert_eq!(card.stage, "Follow-up 1 Overdue");
        assert_eq!(card.next_action, "Send follow-up 1 NOW");
        assert!(card.overdue);
        let countdown = card.countdown.expect("overdue card has a countdown");
        assert!(countdown.overdue);
        assert_eq!(countdown.days, 1);
        assert_eq!(card.variants.len(), 3);
        assert_eq!(card.variants[1].subject, "B");
    }
}
