//! Badges - Catalog definitions and earned entries
//!
//! Pure domain entities without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::BadgeId;

/// Static definition of a badge in the process-wide catalog
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BadgeDefinition {
    pub id: BadgeId,
    pub name: &'static str,
    pub emoji: &'static str,
    /// Bonus XP granted the first time the badge is earned (0 = cosmetic)
    pub xp: u64,
    pub description: &'static str,
}

/// A badge held by a user, copied from the catalog at the moment it was earned
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EarnedBadge {
    pub id: BadgeId,
    pub name: String,
    pub emoji: String,
    pub earned_at: DateTime<Utc>,
}

impl EarnedBadge {
    pub fn from_definition(definition: &BadgeDefinition, earned_at: DateTime<Utc>) -> Self {
        Self {
            id: definition.id,
            name: definition.name.to_string(),
            emoji: definition.emoji.to_string(),
            earned_at,
        }
    }
}
