//! Category constants
//!
//! Category rows are only ever read through aggregate SUMs or resolved
//! to their id, so no row struct exists for them.

/// Seeded category ids the dashboard aggregates over.
pub mod ids {
    pub const COTIS_MENSUELLES: i64 = 1;
    pub const AUTRES_COTIS: i64 = 2;
    pub const DONS: i64 = 3;
    pub const FONDS_SOCIAL: i64 = 4;
    pub const ACTIVITES: i64 = 5;
}
