//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - UserGamificationState: XP, level, streak and badges of one user
//! - BadgeDefinition: Static catalog entry
//! - EarnedBadge: Badge held by a user

mod badge;
mod gamification_state;

pub use badge::*;
pub use gamification_state::*;
