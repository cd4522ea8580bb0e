//! UserGamificationState - XP, level, streak and badges of one user
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BadgeDefinition, EarnedBadge};
use crate::domain::services::level_from_xp;
use crate::domain::value_objects::{BadgeId, LevelProgress};

/// Gamification state embedded in a user record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserGamificationState {
    pub user_id: Uuid,
    /// Lifetime XP, never decreases
    pub xp: u64,
    /// Cached `level_from_xp(xp).level`
    pub level: u32,
    pub streak: u32,
    /// Last check-in that advanced or reset the streak
    pub last_checkin_at: Option<DateTime<Utc>>,
    /// Append-only, in earn order, ids unique
    pub badges: Vec<EarnedBadge>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserGamificationState {
    /// Zero-valued state for a freshly created user
    pub fn new_for_user(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            xp: 0,
            level: 1,
            streak: 0,
            last_checkin_at: None,
            badges: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_badge(&self, id: BadgeId) -> bool {
        self.badges.iter().any(|badge| badge.id == id)
    }

    pub fn level_progress(&self) -> LevelProgress {
        level_from_xp(self.xp)
    }

    /// Add XP and re-derive the cached level.
    ///
    /// Returns the level held before the addition.
    pub fn add_xp(&mut self, amount: u64) -> u32 {
        let previous_level = self.level;
        self.xp = self.xp.saturating_add(amount);
        self.level = level_from_xp(self.xp).level;
        previous_level
    }

    /// Append a badge (with its bonus XP) unless the user already holds it.
    ///
    /// Returns the new entry, or `None` when the badge was already held.
    pub fn earn_badge(
        &mut self,
        definition: &BadgeDefinition,
        now: DateTime<Utc>,
    ) -> Option<&EarnedBadge> {
        if self.has_badge(definition.id) {
            return None;
        }

        self.badges.push(EarnedBadge::from_definition(definition, now));
        if definition.xp > 0 {
            self.add_xp(definition.xp);
        }
        self.badges.last()
    }

    /// Whether the cached level agrees with the one derived from XP
    pub fn is_level_consistent(&self) -> bool {
        self.level == level_from_xp(self.xp).level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::badge_definition;

    fn fresh_state() -> UserGamificationState {
        UserGamificationState::new_for_user(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_new_state_is_zero_valued() {
        let state = fresh_state();
        assert_eq!(state.xp, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.streak, 0);
        assert!(state.last_checkin_at.is_none());
        assert!(state.badges.is_empty());
        assert!(state.is_level_consistent());
    }

    #[test]
    fn test_add_xp_recomputes_level() {
        let mut state = fresh_state();
        state.xp = 90;

        let previous = state.add_xp(15);

        assert_eq!(previous, 1);
        assert_eq!(state.xp, 105);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_earn_badge_once() {
        let mut state = fresh_state();
        let definition = badge_definition(BadgeId::FirstAnalysis);

        assert!(state.earn_badge(&definition, Utc::now()).is_some());
        assert!(state.earn_badge(&definition, Utc::now()).is_none());

        assert_eq!(state.badges.len(), 1);
        assert_eq!(state.xp, 100);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_cosmetic_badge_adds_no_xp() {
        let mut state = fresh_state();
        let definition = badge_definition(BadgeId::Level5);

        let earned = state.earn_badge(&definition, Utc::now()).cloned();

        assert_eq!(earned.map(|b| b.id), Some(BadgeId::Level5));
        assert_eq!(state.xp, 0);
    }

    #[test]
    fn test_badges_keep_earn_order() {
        let mut state = fresh_state();
        for id in [BadgeId::Streak3, BadgeId::FirstMatch, BadgeId::Streak7] {
            state.earn_badge(&badge_definition(id), Utc::now());
        }

        let ids: Vec<BadgeId> = state.badges.iter().map(|b| b.id).collect();
        assert_eq!(
            ids,
            vec![BadgeId::Streak3, BadgeId::FirstMatch, BadgeId::Streak7]
        );
    }
}
