//! X-Neu Gamification Engine
//!
//! Use cases (award XP, award badge, update streak) on top of the `xneu`
//! domain library, plus the adapters that back them:
//!
//! - `application/`: `GamificationService`, fail-soft and explicit variants
//! - `adapters/`: Postgres and in-memory repositories, manual clock
//! - `config`: environment-driven settings
//! - `telemetry`: tracing subscriber setup
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use xneu_gamification::{adapters::PgGamificationRepository, GamificationService};
//!
//! let service = GamificationService::new(Arc::new(PgGamificationRepository::new(pool)), calendar);
//! service.award_xp(user_id, 50, "analysis-completed").await;
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod telemetry;

pub use application::{
    BadgeAward, EventOutcome, GamificationError, GamificationEvent, GamificationService,
    ProgressSnapshot, XpAward,
};
pub use config::GamificationConfig;
