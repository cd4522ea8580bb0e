//! X-Neu Domain Library
//!
//! Core domain types and interfaces for the X-Neu gamification engine:
//! experience points, derived levels, daily check-in streaks and badges.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (UserGamificationState, EarnedBadge, BadgeDefinition)
//!   - `value_objects/`: Immutable value types (BadgeId, LevelProgress)
//!   - `services/`: Pure domain functions (leveling, streak transitions, badge catalog)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: Clock interface
//!
//! # Usage
//!
//! ```rust
//! use xneu::level_from_xp;
//!
//! let progress = level_from_xp(365);
//! assert_eq!(progress.level, 3);
//! assert_eq!(progress.current_xp, 115);
//! assert_eq!(progress.needed_xp, 225);
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    all_badges, badge_definition, find_badge, level_from_xp, xp_cost, BadgeDefinition, BadgeId,
    CheckinCalendar, DomainError, EarnedBadge, LevelProgress, StreakTransition,
    UserGamificationState, DAILY_CHECKIN_XP,
};
pub use ports::{Clock, GamificationRepository, SystemClock};
