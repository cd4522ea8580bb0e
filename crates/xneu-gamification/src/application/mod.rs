//! Application Layer (Use Cases)
//!
//! Orchestrates domain operations against the gamification repository:
//! awarding XP, awarding badges and advancing daily streaks.

mod error;
mod events;
mod gamification_service;
mod locks;

pub use error::GamificationError;
pub use events::{EventOutcome, GamificationEvent};
pub use gamification_service::{BadgeAward, GamificationService, ProgressSnapshot, XpAward};
