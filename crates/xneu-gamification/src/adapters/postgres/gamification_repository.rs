//! PostgreSQL implementation of GamificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use xneu::{BadgeId, DomainError, EarnedBadge, GamificationRepository, UserGamificationState};

/// PostgreSQL implementation of GamificationRepository
pub struct PgGamificationRepository {
    pool: PgPool,
}

impl PgGamificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct StateRow {
    user_id: Uuid,
    xp: i64,
    level: i32,
    streak: i32,
    last_checkin_at: Option<chrono::DateTime<chrono::Utc>>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl StateRow {
    fn into_state(self, badges: Vec<EarnedBadge>) -> Result<UserGamificationState, DomainError> {
        Ok(UserGamificationState {
            user_id: self.user_id,
            xp: u64::try_from(self.xp).map_err(|_| out_of_range("xp", self.xp))?,
            level: u32::try_from(self.level).map_err(|_| out_of_range("level", self.level))?,
            streak: u32::try_from(self.streak).map_err(|_| out_of_range("streak", self.streak))?,
            last_checkin_at: self.last_checkin_at,
            badges,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct BadgeRow {
    badge_id: String,
    name: String,
    emoji: String,
    earned_at: chrono::DateTime<chrono::Utc>,
}

fn repository_error(e: sqlx::Error) -> DomainError {
    DomainError::Repository(e.to_string())
}

fn out_of_range(field: &str, value: impl std::fmt::Display) -> DomainError {
    DomainError::Validation(format!("{} out of range: {}", field, value))
}

async fn load_badges<'e, E>(executor: E, user_id: Uuid) -> Result<Vec<EarnedBadge>, DomainError>
where
    E: sqlx::PgExecutor<'e>,
{
    let rows = sqlx::query_as::<_, BadgeRow>(
        r#"
        SELECT badge_id, name, emoji, earned_at
        FROM user_badges
        WHERE user_id = $1
        ORDER BY earned_at, id
        "#,
    )
    .bind(user_id)
    .fetch_all(executor)
    .await
    .map_err(repository_error)?;

    let badges = rows
        .into_iter()
        .filter_map(|row| match row.badge_id.parse::<BadgeId>() {
            Ok(id) => Some(EarnedBadge {
                id,
                name: row.name,
                emoji: row.emoji,
                earned_at: row.earned_at,
            }),
            Err(e) => {
                tracing::warn!("Skipping stored badge for user {}: {}", user_id, e);
                None
            }
        })
        .collect();

    Ok(badges)
}

#[async_trait]
impl GamificationRepository for PgGamificationRepository {
    async fn find_state(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserGamificationState>, DomainError> {
        let row =
            sqlx::query_as::<_, StateRow>("SELECT * FROM user_gamification WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(repository_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let badges = load_badges(&self.pool, user_id).await?;
        row.into_state(badges).map(Some)
    }

    async fn save_state(
        &self,
        state: &UserGamificationState,
    ) -> Result<UserGamificationState, DomainError> {
        let xp = i64::try_from(state.xp).map_err(|_| out_of_range("xp", state.xp))?;
        let level = i32::try_from(state.level).map_err(|_| out_of_range("level", state.level))?;
        let streak =
            i32::try_from(state.streak).map_err(|_| out_of_range("streak", state.streak))?;

        let mut tx = self.pool.begin().await.map_err(repository_error)?;

        let row = sqlx::query_as::<_, StateRow>(
            r#"
            UPDATE user_gamification
            SET xp = $2, level = $3, streak = $4, last_checkin_at = $5, updated_at = NOW()
            WHERE user_id = $1
            RETURNING *
            "#,
        )
        .bind(state.user_id)
        .bind(xp)
        .bind(level)
        .bind(streak)
        .bind(state.last_checkin_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(repository_error)?
        .ok_or_else(|| DomainError::not_found("UserGamificationState", state.user_id))?;

        // Existing (user, badge) pairs are left untouched
        for badge in &state.badges {
            sqlx::query(
                r#"
                INSERT INTO user_badges (user_id, badge_id, name, emoji, earned_at)
                VALUES ($1, $2, $3, $4, $5)
                ON CONFLICT (user_id, badge_id) DO NOTHING
                "#,
            )
            .bind(state.user_id)
            .bind(badge.id.as_str())
            .bind(&badge.name)
            .bind(&badge.emoji)
            .bind(badge.earned_at)
            .execute(&mut *tx)
            .await
            .map_err(repository_error)?;
        }

        let badges = load_badges(&mut *tx, state.user_id).await?;
        tx.commit().await.map_err(repository_error)?;

        row.into_state(badges)
    }

    async fn create_state(&self, user_id: Uuid) -> Result<UserGamificationState, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO user_gamification (user_id)
            VALUES ($1)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(repository_error)?;

        self.find_state(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("UserGamificationState", user_id))
    }
}
