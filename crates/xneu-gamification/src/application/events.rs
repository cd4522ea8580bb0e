//! Domain events raised by the rest of the product

use serde::{Deserialize, Serialize};

use xneu::BadgeId;

use super::XpAward;

/// Things a user did that the engine rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamificationEvent {
    AnalysisCompleted,
    CheckinSubmitted,
    ReportGenerated,
    MatchCreated,
}

/// Fixed reward of a one-off event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EventReward {
    pub xp: u64,
    pub reason: &'static str,
    pub badge: BadgeId,
}

impl GamificationEvent {
    /// Reward for events that do not go through the streak; `None` for check-ins
    pub(crate) fn reward(&self) -> Option<EventReward> {
        match self {
            GamificationEvent::AnalysisCompleted => Some(EventReward {
                xp: 50,
                reason: "analysis-completed",
                badge: BadgeId::FirstAnalysis,
            }),
            GamificationEvent::ReportGenerated => Some(EventReward {
                xp: 30,
                reason: "report-generated",
                badge: BadgeId::FirstReport,
            }),
            GamificationEvent::MatchCreated => Some(EventReward {
                xp: 25,
                reason: "match-created",
                badge: BadgeId::FirstMatch,
            }),
            GamificationEvent::CheckinSubmitted => None,
        }
    }
}

impl std::fmt::Display for GamificationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GamificationEvent::AnalysisCompleted => write!(f, "analysis_completed"),
            GamificationEvent::CheckinSubmitted => write!(f, "checkin_submitted"),
            GamificationEvent::ReportGenerated => write!(f, "report_generated"),
            GamificationEvent::MatchCreated => write!(f, "match_created"),
        }
    }
}

impl std::str::FromStr for GamificationEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "analysis_completed" | "analysis" => Ok(GamificationEvent::AnalysisCompleted),
            "checkin_submitted" | "checkin" => Ok(GamificationEvent::CheckinSubmitted),
            "report_generated" | "report" => Ok(GamificationEvent::ReportGenerated),
            "match_created" | "match" => Ok(GamificationEvent::MatchCreated),
            _ => Err(format!("Unknown event: {}", s)),
        }
    }
}

/// What an event ended up granting
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventOutcome {
    /// XP award of the event itself (check-ins: the daily bonus is not reported here)
    pub xp: Option<XpAward>,
    /// New streak for check-ins, `None` for repeats and other events
    pub streak: Option<u32>,
}
