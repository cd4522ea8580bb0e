//! Gamification Repository Port
//!
//! Abstract interface for persisting the gamification part of a user record.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, UserGamificationState};

/// Repository interface for per-user gamification state
#[async_trait]
pub trait GamificationRepository: Send + Sync {
    /// Find the state of a user; `None` when the user does not exist
    async fn find_state(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserGamificationState>, DomainError>;

    /// Persist xp, level, streak, last check-in and any badges not stored yet.
    ///
    /// Fails with `DomainError::NotFound` when the user has no state.
    async fn save_state(
        &self,
        state: &UserGamificationState,
    ) -> Result<UserGamificationState, DomainError>;

    /// Create zero-valued state for a new user
    async fn create_state(&self, user_id: Uuid) -> Result<UserGamificationState, DomainError>;
}
