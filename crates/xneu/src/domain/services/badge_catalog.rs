//! Badge Catalog - Static, process-wide badge definitions

use crate::domain::entities::BadgeDefinition;
use crate::domain::value_objects::BadgeId;

/// Level thresholds that unlock a badge when crossed by an XP award
pub const LEVEL_MILESTONES: [(u32, BadgeId); 2] = [(5, BadgeId::Level5), (10, BadgeId::Level10)];

static CATALOG: [BadgeDefinition; 8] = [
    BadgeDefinition {
        id: BadgeId::FirstAnalysis,
        name: "First Analysis",
        emoji: "🧠",
        xp: 100,
        description: "Completed your first brain-type analysis.",
    },
    BadgeDefinition {
        id: BadgeId::FirstReport,
        name: "Report Reader",
        emoji: "📄",
        xp: 50,
        description: "Generated your first detailed report.",
    },
    BadgeDefinition {
        id: BadgeId::FirstMatch,
        name: "Kindred Minds",
        emoji: "🤝",
        xp: 50,
        description: "Made your first compatibility match.",
    },
    BadgeDefinition {
        id: BadgeId::Streak3,
        name: "On Fire",
        emoji: "🔥",
        xp: 75,
        description: "Checked in 3 days in a row.",
    },
    BadgeDefinition {
        id: BadgeId::Streak7,
        name: "Week Warrior",
        emoji: "⚡",
        xp: 150,
        description: "Checked in 7 days in a row.",
    },
    BadgeDefinition {
        id: BadgeId::Streak30,
        name: "Monthly Master",
        emoji: "👑",
        xp: 500,
        description: "Checked in 30 days in a row.",
    },
    BadgeDefinition {
        id: BadgeId::Level5,
        name: "Rising Star",
        emoji: "⭐",
        xp: 0,
        description: "Reached level 5.",
    },
    BadgeDefinition {
        id: BadgeId::Level10,
        name: "Brain Master",
        emoji: "🏆",
        xp: 0,
        description: "Reached level 10.",
    },
];

/// All badge definitions, in catalog order
pub fn all_badges() -> &'static [BadgeDefinition] {
    &CATALOG
}

/// Definition of a known badge
pub fn badge_definition(id: BadgeId) -> BadgeDefinition {
    // CATALOG holds exactly one entry per BadgeId, in BadgeId::ALL order
    CATALOG[id as usize]
}

/// Look up a badge by its string id; unknown ids yield `None`
pub fn find_badge(id: &str) -> Option<BadgeDefinition> {
    id.parse::<BadgeId>().ok().map(badge_definition)
}

/// Level badges for a level change, one pass, no re-check after bonus XP
pub fn level_milestones(previous_level: u32, new_level: u32) -> impl Iterator<Item = BadgeId> {
    LEVEL_MILESTONES
        .into_iter()
        .filter(move |(threshold, _)| new_level >= *threshold && previous_level < *threshold)
        .map(|(_, badge)| badge)
}
