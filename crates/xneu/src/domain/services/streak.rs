//! Streak - Calendar-day policy and check-in transitions

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Offset, Utc};

use crate::domain::errors::DomainError;
use crate::domain::value_objects::BadgeId;

/// Flat XP granted for every check-in that is not a same-day repeat
pub const DAILY_CHECKIN_XP: u64 = 20;

/// Streak lengths that unlock a badge
pub const STREAK_MILESTONES: [(u32, BadgeId); 3] = [
    (3, BadgeId::Streak3),
    (7, BadgeId::Streak7),
    (30, BadgeId::Streak30),
];

const MAX_OFFSET_MINUTES: i32 = 23 * 60 + 59;

/// Defines what a "calendar day" is for the whole deployment.
///
/// One fixed UTC offset, never the host timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinCalendar {
    offset: FixedOffset,
}

impl CheckinCalendar {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Calendar shifted `minutes` east of UTC (negative = west)
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, DomainError> {
        if !(-MAX_OFFSET_MINUTES..=MAX_OFFSET_MINUTES).contains(&minutes) {
            return Err(DomainError::Validation(format!(
                "UTC offset must be within ±{} minutes, got {}",
                MAX_OFFSET_MINUTES, minutes
            )));
        }

        FixedOffset::east_opt(minutes * 60)
            .map(|offset| Self { offset })
            .ok_or_else(|| DomainError::Validation(format!("Invalid UTC offset: {}", minutes)))
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Calendar date of an instant
    pub fn day_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Decide how a check-in at `now` moves a streak whose last check-in was `last`
    pub fn transition(
        &self,
        last: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        current_streak: u32,
    ) -> StreakTransition {
        next_streak(last.map(|at| self.day_of(at)), self.day_of(now), current_streak)
    }
}

impl Default for CheckinCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

/// Outcome of a check-in against the stored streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// Already checked in on this calendar day
    SameDay,
    /// Last check-in was yesterday
    Continued(u32),
    /// First check-in ever, or at least one day was skipped
    Reset,
}

impl StreakTransition {
    /// Streak after applying the transition, `None` for a same-day repeat
    pub fn new_streak(&self) -> Option<u32> {
        match self {
            StreakTransition::SameDay => None,
            StreakTransition::Continued(streak) => Some(*streak),
            StreakTransition::Reset => Some(1),
        }
    }
}

/// Streak transition between two calendar dates
pub fn next_streak(
    last_day: Option<NaiveDate>,
    today: NaiveDate,
    current: u32,
) -> StreakTransition {
    let Some(last_day) = last_day else {
        return StreakTransition::Reset;
    };

    if last_day == today {
        return StreakTransition::SameDay;
    }

    let yesterday = today.checked_sub_days(Days::new(1));
    if yesterday == Some(last_day) {
        StreakTransition::Continued(current.saturating_add(1))
    } else {
        // Gaps and dates after today both start over
        StreakTransition::Reset
    }
}

/// Streak badges unlocked at `streak`, each checked independently
pub fn streak_milestones(streak: u32) -> impl Iterator<Item = BadgeId> {
    STREAK_MILESTONES
        .into_iter()
        .filter(move |(threshold, _)| streak >= *threshold)
        .map(|(_, badge)| badge)
}
