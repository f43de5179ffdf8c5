//! Status derivation for the three-step follow-up sequence.

use chrono::{DateTime, Duration, Utc};
use doorreach_core::types::OutreachCampaign;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::countdown::Countdown;

/// Lifecycle stage of a campaign's outreach sequence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FollowUpStage {
    NotSent,
    InitialSent,
    FollowUp1Sent,
    FollowUp2Sent,
    FollowUp1Overdue,
    FollowUp2Overdue,
    FollowUp3Overdue,
    AllSent,
    Responded,
}

impl FollowUpStage {
    pub fn is_overdue(&self) -> bool {
        matches!(
            self,
            FollowUpStage::FollowUp1Overdue
                | FollowUpStage::FollowUp2Overdue
                | FollowUpStage::FollowUp3Overdue
        )
    }

    /// Terminal stages carry no deadline: nothing is counting down.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FollowUpStage::NotSent | FollowUpStage::AllSent | FollowUpStage::Responded
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            FollowUpStage::NotSent => "Not Sent",
            FollowUpStage::InitialSent => "Initial Sent",
            FollowUpStage::FollowUp1Sent => "Follow-up 1 Sent",
            FollowUpStage::FollowUp2Sent => "Follow-up 2 Sent",
            FollowUpStage::FollowUp1Overdue => "Follow-up 1 Overdue",
            FollowUpStage::FollowUp2Overdue => "Follow-up 2 Overdue",
            FollowUpStage::FollowUp3Overdue => "Follow-up 3 Overdue",
            FollowUpStage::AllSent => "All Sent",
            FollowUpStage::Responded => "Responded",
        }
    }
}

impl fmt::Display for FollowUpStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one evaluation: stage, recommended action, and at most one of
/// `time_remaining` / `overdue_by`. Never cached beyond a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpStatus {
    pub stage: FollowUpStage,
    pub next_action: &'static str,
    pub time_remaining: Option<Duration>,
    pub overdue_by: Option<Duration>,
}

impl FollowUpStatus {
    fn settled(stage: FollowUpStage, next_action: &'static str) -> Self {
        Self {
            stage,
            next_action,
            time_remaining: None,
            overdue_by: None,
        }
    }

    fn pending(stage: FollowUpStage, next_action: &'static str, remaining: Duration) -> Self {
        Self {
            stage,
            next_action,
            time_remaining: Some(remaining),
            overdue_by: None,
        }
    }

    fn overdue(stage: FollowUpStage, next_action: &'static str, by: Duration) -> Self {
        Self {
            stage,
            next_action,
            time_remaining: None,
            overdue_by: Some(by),
        }
    }

    /// Display form of the pending or overdue delta, if one exists.
    pub fn countdown(&self) -> Option<Countdown> {
        if let Some(remaining) = self.time_remaining {
            return Some(Countdown::from_duration(remaining, false));
        }
        self.overdue_by
            .map(|by| Countdown::from_duration(by, true))
    }
}

/// One slot of the fixed cadence. Offsets are anchored to the initial send,
/// never chained off the prior follow-up's actual send time, so a late
/// follow-up does not shift the rest of the schedule.
struct Slot {
    offset_days: i64,
    waiting_stage: FollowUpStage,
    overdue_stage: FollowUpStage,
    due_action: &'static str,
    overdue_action: &'static str,
}

const SLOTS: [Slot; 3] = [
    Slot {
        offset_days: 7,
        waiting_stage: FollowUpStage::InitialSent,
        overdue_stage: FollowUpStage::FollowUp1Overdue,
        due_action: "Follow-up 1 due",
        overdue_action: "Send follow-up 1 NOW",
    },
    Slot {
        offset_days: 14,
        waiting_stage: FollowUpStage::FollowUp1Sent,
        overdue_stage: FollowUpStage::FollowUp2Overdue,
        due_action: "Follow-up 2 due",
        overdue_action: "Send follow-up 2 NOW",
    },
    Slot {
        offset_days: 21,
        waiting_stage: FollowUpStage::FollowUp2Sent,
        overdue_stage: FollowUpStage::FollowUp3Overdue,
        due_action: "Follow-up 3 due",
        overdue_action: "Send follow-up 3 NOW",
    },
];

/// Derives the follow-up status for one campaign at `now`.
///
/// Total over its domain: every combination of present/absent timestamps
/// maps to a defined status. A response short-circuits all scheduling; the
/// first unset follow-up slot otherwise determines the result and later
/// slots are not examined.
pub fn evaluate(
    sent_at: Option<DateTime<Utc>>,
    followup1_at: Option<DateTime<Utc>>,
    followup2_at: Option<DateTime<Utc>>,
    followup3_at: Option<DateTime<Utc>>,
    responded_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> FollowUpStatus {
    let Some(sent) = sent_at else {
        return FollowUpStatus::settled(FollowUpStage::NotSent, "Send initial email");
    };

    if responded_at.is_some() {
        return FollowUpStatus::settled(FollowUpStage::Responded, "Response received");
    }

    let sends = [followup1_at, followup2_at, followup3_at];
    for (slot, followup_at) in SLOTS.iter().zip(sends) {
        if followup_at.is_some() {
            continue;
        }
        let due = sent + Duration::days(slot.offset_days);
        if due > now {
            return FollowUpStatus::pending(slot.waiting_stage, slot.due_action, due - now);
        }
        return FollowUpStatus::overdue(slot.overdue_stage, slot.overdue_action, now - due);
    }

    FollowUpStatus::settled(FollowUpStage::AllSent, "Sequence complete")
}

/// The five timestamps that drive the engine, detached from the full
/// campaign record so evaluation stays cheap per render tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FollowUpTimeline {
    pub sent_at: Option<DateTime<Utc>>,
    pub followup1_at: Option<DateTime<Utc>>,
    pub followup2_at: Option<DateTime<Utc>>,
    pub followup3_at: Option<DateTime<Utc>>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl FollowUpTimeline {
    /// Reads the timeline off a campaign record. A response is only the
    /// stored `response_date`: the engine never synthesizes one from the
    /// clock, and a `retailer_responded` flag with no stored date does not
    /// affect scheduling (the mark-responded call always writes a date).
    pub fn from_campaign(campaign: &OutreachCampaign) -> Self {
        Self {
            sent_at: campaign.sent_timestamp,
            followup1_at: campaign.followup1_sent_date,
            followup2_at: campaign.followup2_sent_date,
            followup3_at: campaign.followup3_sent_date,
            responded_at: campaign.response_date,
        }
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> FollowUpStatus {
        evaluate(
            self.sent_at,
            self.followup1_at,
            self.followup2_at,
            self.followup3_at,
            self.responded_at,
            now,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap()
    }

    fn days(n: i64) -> Duration {
        Duration::days(n)
    }

    #[test]
    fn test_not_sent_overrides_everything() {
        let status = evaluate(
            None,
            Some(t0()),
            Some(t0()),
            Some(t0()),
            Some(t0()),
            t0() + days(30),
        );
        assert_eq!(status.stage, FollowUpStage::NotSent);
        assert_eq!(status.next_action, "Send initial email");
        assert!(status.time_remaining.is_none());
        assert!(status.overdue_by.is_none());
    }

    #[test]
    fn test_responded_short_circuits_scheduling() {
        // Responded with zero follow-ups sent, deep into overdue territory.
        let status = evaluate(
            Some(t0()),
            None,
            None,
            None,
            Some(t0() + days(2)),
            t0() + days(40),
        );
        assert_eq!(status.stage, FollowUpStage::Responded);
        assert_eq!(status.next_action, "Response received");
        assert!(status.countdown().is_none());
    }

    #[test]
    fn test_initial_sent_counts_down_to_day_seven() {
        let status = evaluate(Some(t0()), None, None, None, None, t0() + days(6));
        assert_eq!(status.stage, FollowUpStage::InitialSent);
        assert_eq!(status.next_action, "Follow-up 1 due");
        assert_eq!(status.time_remaining, Some(days(1)));
        assert!(status.overdue_by.is_none());
    }

    #[test]
    fn test_follow_up_one_overdue_past_day_seven() {
        let status = evaluate(Some(t0()), None, None, None, None, t0() + days(8));
        assert_eq!(status.stage, FollowUpStage::FollowUp1Overdue);
        assert_eq!(status.next_action, "Send follow-up 1 NOW");
        assert_eq!(status.overdue_by, Some(days(1)));
        assert!(status.time_remaining.is_none());
    }

    #[test]
    fn test_deadline_instant_itself_is_overdue() {
        let status = evaluate(Some(t0()), None, None, None, None, t0() + days(7));
        assert_eq!(status.stage, FollowUpStage::FollowUp1Overdue);
        assert_eq!(status.overdue_by, Some(Duration::zero()));
    }

    #[test]
    fn test_slot_two_is_anchored_to_initial_send() {
        // Follow-up 1 went out three days late; slot 2 stays due at day 14.
        let status = evaluate(
            Some(t0()),
            Some(t0() + days(10)),
            None,
            None,
            None,
            t0() + days(13),
        );
        assert_eq!(status.stage, FollowUpStage::FollowUp1Sent);
        assert_eq!(status.next_action, "Follow-up 2 due");
        assert_eq!(status.time_remaining, Some(days(1)));
    }

    #[test]
    fn test_slot_three_waits_after_second_follow_up() {
        let status = evaluate(
            Some(t0()),
            Some(t0() + days(7)),
            Some(t0() + days(14)),
            None,
            None,
            t0() + days(16),
        );
        assert_eq!(status.stage, FollowUpStage::FollowUp2Sent);
        assert_eq!(status.next_action, "Follow-up 3 due");
        assert_eq!(status.time_remaining, Some(days(5)));
    }

    #[test]
    fn test_all_sent_has_no_timing_fields() {
        for now_offset in [0, 10, 100, 1000] {
            let status = evaluate(
                Some(t0()),
                Some(t0() + days(7)),
                Some(t0() + days(14)),
                Some(t0() + days(21)),
                None,
                t0() + days(now_offset),
            );
            assert_eq!(status.stage, FollowUpStage::AllSent);
            assert_eq!(status.next_action, "Sequence complete");
            assert!(status.time_remaining.is_none());
            assert!(status.overdue_by.is_none());
        }
    }

    #[test]
    fn test_at_most_one_timing_field_for_any_input() {
        let choices = [None, Some(t0() + days(3))];
        for sent in [None, Some(t0())] {
            for f1 in choices {
                for f2 in choices {
                    for f3 in choices {
                        for responded in choices {
                            let status = evaluate(sent, f1, f2, f3, responded, t0() + days(9));
                            let populated = status.time_remaining.is_some() as u8
                                + status.overdue_by.is_some() as u8;
                            assert!(populated <= 1, "both timing fields set for {:?}", status);
                            if status.stage.is_terminal() {
                                assert_eq!(populated, 0);
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let now = t0() + days(12);
        let first = evaluate(Some(t0()), Some(t0() + days(7)), None, None, None, now);
        let second = evaluate(Some(t0()), Some(t0() + days(7)), None, None, None, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_timeline_ignores_responded_flag_without_date() {
        use doorreach_core::types::OutreachCampaign;

        let campaign = OutreachCampaign {
            id: "rec001".to_string(),
            retailer_name: "Concept Store Oslo".to_string(),
            retailer_country: Some("NO".to_string()),
            retailer_email: Some("buyer@store.no".to_string()),
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
            retailer_responded: true,
            response_date: None,
            created_at: t0(),
            intro_email_a: String::new(),
            intro_email_b: String::new(),
            intro_email_c: String::new(),
            followup_1: String::new(),
            followup_2: String::new(),
            followup_3: String::new(),
            personalization_notes: String::new(),
        };

        let timeline = FollowUpTimeline::from_campaign(&campaign);
        assert!(timeline.responded_at.is_none());
        let status = timeline.status_at(t0() + days(3));
        assert_eq!(status.stage, FollowUpStage::InitialSent);

        let mut responded = campaign;
        responded.response_date = Some(t0() + days(2));
        let status = FollowUpTimeline::from_campaign(&responded).status_at(t0() + days(3));
        assert_eq!(status.stage, FollowUpStage::Responded);
    }
}
