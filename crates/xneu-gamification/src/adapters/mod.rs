//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod clock;
pub mod memory;
pub mod postgres;

// Re-exports
pub use clock::ManualClock;
pub use memory::InMemoryGamificationRepository;
pub use postgres::PgGamificationRepository;
