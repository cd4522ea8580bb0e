//! Domain Services
//!
//! Pure functions over domain values: the level schedule, the streak
//! calendar and the badge catalog.

mod badge_catalog;
mod leveling;
mod streak;

pub use badge_catalog::*;
pub use leveling::*;
pub use streak::*;
