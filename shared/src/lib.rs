//! Shared domain models for the Amicale backend.
//!
//! Models carry serde derives for the HTTP layer and, behind the `db`
//! feature, `sqlx::FromRow` derives for the persistence layer.

pub mod models;
pub mod util;
