//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod badge_id;
mod level_progress;

pub use badge_id::*;
pub use level_progress::*;
