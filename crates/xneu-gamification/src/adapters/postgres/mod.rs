//! PostgreSQL Repository Implementations

mod gamification_repository;

pub use gamification_repository::PgGamificationRepository;
pub use sqlx::PgPool;

use sqlx::postgres::PgPoolOptions;

use xneu::DomainError;

/// Open a connection pool
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), DomainError> {
    sqlx::migrate!()
        .run(pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))
}
