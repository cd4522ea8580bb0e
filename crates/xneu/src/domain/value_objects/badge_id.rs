//! BadgeId - Identifier of a catalog badge

use serde::{Deserialize, Serialize};

/// Identifier of a badge in the static catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    FirstAnalysis,
    FirstReport,
    FirstMatch,
    #[serde(rename = "streak_3")]
    Streak3,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "streak_30")]
    Streak30,
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "level_10")]
    Level10,
}

impl BadgeId {
    /// Every badge id, in catalog order
    pub const ALL: [BadgeId; 8] = [
        BadgeId::FirstAnalysis,
        BadgeId::FirstReport,
        BadgeId::FirstMatch,
        BadgeId::Streak3,
        BadgeId::Streak7,
        BadgeId::Streak30,
        BadgeId::Level5,
        BadgeId::Level10,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BadgeId::FirstAnalysis => "first_analysis",
            BadgeId::FirstReport => "first_report",
            BadgeId::FirstMatch => "first_match",
            BadgeId::Streak3 => "streak_3",
            BadgeId::Streak7 => "streak_7",
            BadgeId::Streak30 => "streak_30",
            BadgeId::Level5 => "level_5",
            BadgeId::Level10 => "level_10",
        }
    }
}

impl std::fmt::Display for BadgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BadgeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        BadgeId::ALL
            .into_iter()
            .find(|id| id.as_str() == wanted)
            .ok_or_else(|| format!("Unknown badge id: {}", s))
    }
}
