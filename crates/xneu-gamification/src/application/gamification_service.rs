//! Gamification Application Service (Use Case)
//!
//! Awards XP, awards badges and advances daily streaks. Every public
//! operation runs under the user's lock, so nested steps (a level-up badge
//! inside an XP award, the daily XP inside a check-in) see each other's writes.
//!
//! Each operation comes in two flavours:
//! - `try_*` returns the failure to the caller
//! - the plain form logs the failure and degrades to a no-op, so that
//!   bookkeeping never blocks the action that triggered it

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use xneu::domain::{level_milestones, streak_milestones};
use xneu::{
    badge_definition, BadgeId, CheckinCalendar, Clock, EarnedBadge, GamificationRepository,
    LevelProgress, SystemClock, UserGamificationState, DAILY_CHECKIN_XP,
};

use super::events::{EventOutcome, GamificationEvent};
use super::locks::UserLocks;
use super::GamificationError;

const DAILY_CHECKIN_REASON: &str = "daily-checkin";

/// Result of an XP award, before any milestone badge bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct XpAward {
    pub new_xp: u64,
    pub new_level: u32,
    pub level_up: bool,
}

/// Result of a badge award
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "badge", rename_all = "snake_case")]
pub enum BadgeAward {
    Awarded(EarnedBadge),
    AlreadyHeld,
}

/// Read-only view of a user's progress, for dashboards
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub user_id: Uuid,
    pub xp: u64,
    pub progress: LevelProgress,
    pub streak: u32,
    pub last_checkin_at: Option<DateTime<Utc>>,
    pub checked_in_today: bool,
    pub badges: Vec<EarnedBadge>,
}

/// Application service for gamification operations
pub struct GamificationService<R: GamificationRepository, C: Clock = SystemClock> {
    repo: Arc<R>,
    clock: Arc<C>,
    calendar: CheckinCalendar,
    locks: UserLocks,
}

impl<R: GamificationRepository> GamificationService<R> {
    pub fn new(repo: Arc<R>, calendar: CheckinCalendar) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock), calendar)
    }
}

impl<R: GamificationRepository, C: Clock> GamificationService<R, C> {
    pub fn with_clock(repo: Arc<R>, clock: Arc<C>, calendar: CheckinCalendar) -> Self {
        Self {
            repo,
            clock,
            calendar,
            locks: UserLocks::default(),
        }
    }

    pub fn calendar(&self) -> CheckinCalendar {
        self.calendar
    }

    // ============================================
    // Fail-soft operations
    // ============================================

    /// Award XP; `None` when the user is missing or persistence failed
    pub async fn award_xp(&self, user_id: Uuid, amount: u64, reason: &str) -> Option<XpAward> {
        swallow(
            "award_xp",
            user_id,
            self.try_award_xp(user_id, amount, reason).await,
        )
    }

    /// Award a catalog badge once; unknown ids and failures are ignored
    pub async fn award_badge(&self, user_id: Uuid, badge_id: &str) {
        swallow(
            "award_badge",
            user_id,
            self.try_award_badge(user_id, badge_id).await,
        );
    }

    /// Register today's check-in.
    ///
    /// Returns the new streak, or `None` when the user already checked in
    /// today (or the operation failed).
    pub async fn update_streak(&self, user_id: Uuid) -> Option<u32> {
        swallow(
            "update_streak",
            user_id,
            self.try_update_streak(user_id).await,
        )
        .flatten()
    }

    /// Apply the reward of a product event
    pub async fn record_event(&self, user_id: Uuid, event: GamificationEvent) -> EventOutcome {
        swallow(
            "record_event",
            user_id,
            self.try_record_event(user_id, event).await,
        )
        .unwrap_or_default()
    }

    // ============================================
    // Explicit operations
    // ============================================

    pub async fn try_award_xp(
        &self,
        user_id: Uuid,
        amount: u64,
        reason: &str,
    ) -> Result<XpAward, GamificationError> {
        if amount == 0 {
            return Err(GamificationError::InvalidAmount);
        }

        let _guard = self.locks.lock(user_id).await;
        self.award_xp_locked(user_id, amount, reason).await
    }

    pub async fn try_award_badge(
        &self,
        user_id: Uuid,
        badge_id: &str,
    ) -> Result<BadgeAward, GamificationError> {
        let badge = badge_id
            .parse::<BadgeId>()
            .map_err(|_| GamificationError::UnknownBadge(badge_id.to_string()))?;

        let _guard = self.locks.lock(user_id).await;
        self.award_badge_locked(user_id, badge).await
    }

    pub async fn try_update_streak(&self, user_id: Uuid) -> Result<Option<u32>, GamificationError> {
        let _guard = self.locks.lock(user_id).await;
        self.update_streak_locked(user_id).await
    }

    pub async fn try_record_event(
        &self,
        user_id: Uuid,
        event: GamificationEvent,
    ) -> Result<EventOutcome, GamificationError> {
        let _guard = self.locks.lock(user_id).await;

        let Some(reward) = event.reward() else {
            let streak = self.update_streak_locked(user_id).await?;
            return Ok(EventOutcome { xp: None, streak });
        };

        let award = self
            .award_xp_locked(user_id, reward.xp, reward.reason)
            .await?;
        swallow(
            "record_event",
            user_id,
            self.award_badge_locked(user_id, reward.badge).await,
        );

        tracing::debug!("Recorded {} for user {}", event, user_id);

        Ok(EventOutcome {
            xp: Some(award),
            streak: None,
        })
    }

    /// Create zero-valued state for a new user; returns existing state if present
    pub async fn enroll(&self, user_id: Uuid) -> Result<UserGamificationState, GamificationError> {
        let _guard = self.locks.lock(user_id).await;

        if let Some(existing) = self.repo.find_state(user_id).await? {
            return Ok(existing);
        }

        let state = self.repo.create_state(user_id).await?;
        tracing::info!("Enrolled user {} in gamification", user_id);
        Ok(state)
    }

    /// Current progress of a user, `None` when the user does not exist
    pub async fn progress(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProgressSnapshot>, GamificationError> {
        let Some(state) = self.repo.find_state(user_id).await? else {
            return Ok(None);
        };

        let today = self.calendar.day_of(self.clock.now());
        let checked_in_today = state
            .last_checkin_at
            .is_some_and(|at| self.calendar.day_of(at) == today);

        Ok(Some(ProgressSnapshot {
            user_id: state.user_id,
            xp: state.xp,
            progress: state.level_progress(),
            streak: state.streak,
            last_checkin_at: state.last_checkin_at,
            checked_in_today,
            badges: state.badges,
        }))
    }

    // ============================================
    // Steps run while holding the user's lock
    // ============================================

    async fn load(&self, user_id: Uuid) -> Result<UserGamificationState, GamificationError> {
        self.repo
            .find_state(user_id)
            .await?
            .ok_or(GamificationError::UserNotFound(user_id))
    }

    async fn award_xp_locked(
        &self,
        user_id: Uuid,
        amount: u64,
        reason: &str,
    ) -> Result<XpAward, GamificationError> {
        let mut state = self.load(user_id).await?;
        let previous_level = state.add_xp(amount);
        state.updated_at = self.clock.now();

        let saved = self.repo.save_state(&state).await?;
        let award = XpAward {
            new_xp: saved.xp,
            new_level: saved.level,
            level_up: saved.level > previous_level,
        };

        tracing::info!(
            "Awarded {} XP to user {} ({}): {} XP, level {}",
            amount,
            user_id,
            reason,
            award.new_xp,
            award.new_level
        );

        // Single pass: bonus XP of these badges is not checked again
        for badge in level_milestones(previous_level, saved.level) {
            swallow(
                "award_xp",
                user_id,
                self.award_badge_locked(user_id, badge).await,
            );
        }

        Ok(award)
    }

    async fn award_badge_locked(
        &self,
        user_id: Uuid,
        badge: BadgeId,
    ) -> Result<BadgeAward, GamificationError> {
        let mut state = self.load(user_id).await?;
        let definition = badge_definition(badge);
        let now = self.clock.now();

        let Some(earned) = state.earn_badge(&definition, now).cloned() else {
            tracing::debug!("User {} already holds badge {}", user_id, badge);
            return Ok(BadgeAward::AlreadyHeld);
        };
        state.updated_at = now;

        self.repo.save_state(&state).await?;

        tracing::info!(
            "Awarded badge {} {} to user {} (+{} XP)",
            earned.emoji,
            badge,
            user_id,
            definition.xp
        );

        Ok(BadgeAward::Awarded(earned))
    }

    async fn update_streak_locked(&self, user_id: Uuid) -> Result<Option<u32>, GamificationError> {
        let mut state = self.load(user_id).await?;
        let now = self.clock.now();

        let transition = self
            .calendar
            .transition(state.last_checkin_at, now, state.streak);
        let Some(streak) = transition.new_streak() else {
            tracing::debug!("User {} already checked in today", user_id);
            return Ok(None);
        };

        state.streak = streak;
        state.last_checkin_at = Some(now);
        state.updated_at = now;
        self.repo.save_state(&state).await?;

        tracing::info!("User {} checked in: {:?}, streak {}", user_id, transition, streak);

        for badge in streak_milestones(streak) {
            if !state.has_badge(badge) {
                swallow(
                    "update_streak",
                    user_id,
                    self.award_badge_locked(user_id, badge).await,
                );
            }
        }

        swallow(
            "update_streak",
            user_id,
            self.award_xp_locked(user_id, DAILY_CHECKIN_XP, DAILY_CHECKIN_REASON)
                .await,
        );

        Ok(Some(streak))
    }
}

/// Log a failure and turn it into `None`
fn swallow<T>(operation: &str, user_id: Uuid, result: Result<T, GamificationError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(GamificationError::UnknownBadge(id)) => {
            tracing::debug!("{}: ignoring unknown badge '{}' for user {}", operation, id, user_id);
            None
        }
        Err(e) => {
            tracing::warn!("{} failed for user {}: {}", operation, user_id, e);
            None
        }
    }
}
