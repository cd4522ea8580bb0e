//! Gamification Errors

use thiserror::Error;
use uuid::Uuid;

use xneu::DomainError;

/// Failures of a gamification use case.
///
/// The fail-soft entry points log these and return nothing; the `try_*`
/// variants hand them to the caller.
#[derive(Debug, Error)]
pub enum GamificationError {
    #[error("User not found: {0}")]
    UserNotFound(Uuid),

    #[error("Unknown badge id: {0}")]
    UnknownBadge(String),

    #[error("XP amount must be positive")]
    InvalidAmount,

    #[error(transparent)]
    Domain(#[from] DomainError),
}
