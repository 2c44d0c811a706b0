//! Upcoming event model (dashboard feed)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Evenement {
    pub id: i64,
    pub titre: String,
    pub date_evenement: String,
}
