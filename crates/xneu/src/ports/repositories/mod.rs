//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod gamification_repository;

pub use gamification_repository::*;
