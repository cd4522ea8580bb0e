//! In-memory implementation of GamificationRepository
//!
//! Used by the CLI simulator and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use xneu::{DomainError, GamificationRepository, UserGamificationState};

/// Process-local store of gamification state
#[derive(Default)]
pub struct InMemoryGamificationRepository {
    states: RwLock<HashMap<Uuid, UserGamificationState>>,
}

impl InMemoryGamificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }
}

#[async_trait]
impl GamificationRepository for InMemoryGamificationRepository {
    async fn find_state(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserGamificationState>, DomainError> {
        Ok(self.states.read().await.get(&user_id).cloned())
    }

    async fn save_state(
        &self,
        state: &UserGamificationState,
    ) -> Result<UserGamificationState, DomainError> {
        let mut states = self.states.write().await;
        let stored = states
            .get_mut(&state.user_id)
            .ok_or_else(|| DomainError::not_found("UserGamificationState", state.user_id))?;

        stored.xp = state.xp;
        stored.level = state.level;
        stored.streak = state.streak;
        stored.last_checkin_at = state.last_checkin_at;
        stored.updated_at = state.updated_at;

        // Badges are append-only: keep stored entries, add the ones not seen yet
        for badge in &state.badges {
            if !stored.has_badge(badge.id) {
                stored.badges.push(badge.clone());
            }
        }

        Ok(stored.clone())
    }

    async fn create_state(&self, user_id: Uuid) -> Result<UserGamificationState, DomainError> {
        let mut states = self.states.write().await;
        let state = states
            .entry(user_id)
            .or_insert_with(|| UserGamificationState::new_for_user(user_id, Utc::now()));
        Ok(state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xneu::{badge_definition, BadgeId};

    #[tokio::test]
    async fn test_save_requires_existing_state() {
        let repo = InMemoryGamificationRepository::new();
        let state = UserGamificationState::new_for_user(Uuid::new_v4(), Utc::now());

        let result = repo.save_state(&state).await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_save_never_drops_badges() {
        let repo = InMemoryGamificationRepository::new();
        let user = Uuid::new_v4();
        let mut state = repo.create_state(user).await.unwrap();
        state.earn_badge(&badge_definition(BadgeId::Streak3), Utc::now());
        repo.save_state(&state).await.unwrap();

        // A stale copy without the badge must not erase it
        let mut stale = UserGamificationState::new_for_user(user, Utc::now());
        stale.xp = 80;
        let saved = repo.save_state(&stale).await.unwrap();

        assert_eq!(saved.xp, 80);
        assert!(saved.has_badge(BadgeId::Streak3));
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let repo = InMemoryGamificationRepository::new();
        let user = Uuid::new_v4();
        let mut state = repo.create_state(user).await.unwrap();
        state.xp = 40;
        repo.save_state(&state).await.unwrap();

        let again = repo.create_state(user).await.unwrap();

        assert_eq!(again.xp, 40);
        assert_eq!(repo.len().await, 1);
    }
}
