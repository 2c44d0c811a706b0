//! Dashboard Aggregation Queries
//!
//! Read-only composition over operations, members, arrears history and
//! upcoming events. No mutation happens here.
//!
//! SUM fallbacks are spelled `0.0` so an empty set still yields a REAL
//! column; a bare `0` would decode as INTEGER and fail the `f64` mapping.

use serde::{Deserialize, Serialize};
use shared::models::Evenement;
use sqlx::SqlitePool;

use super::RepoResult;

/// Arrears totals. Sourced from `historiques_arriere` when that ledger has
/// rows, otherwise from the members' own arrears fields (explicit two-step
/// precedence; the fallback cannot know payments, so `montant_paye` is 0).
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArriereStats {
    pub total_arrieres: i64,
    pub montant_du: f64,
    pub montant_paye: f64,
}

/// Global operation count and volume.
#[derive(Debug, Clone, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct OperationStats {
    pub total_operations: i64,
    pub montant_operations: f64,
}

/// Total of `recette` operations for one category.
pub async fn total_recettes_by_categorie(pool: &SqlitePool, categorie_id: i64) -> RepoResult<f64> {
    let total = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(montant), 0.0) FROM operations WHERE type = 'recette' AND categorie_id = ?",
    )
    .bind(categorie_id)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

/// Active members with an arrears start date set.
pub async fn count_membres_en_arriere(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM membres WHERE statut = 'actif' AND date_debut_arriere IS NOT NULL AND date_debut_arriere != ''",
    )
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Arrears totals with the documented precedence: the dedicated history
/// ledger first, the member directory's arrears fields as fallback.
pub async fn arriere_stats(pool: &SqlitePool) -> RepoResult<ArriereStats> {
    let from_history = sqlx::query_as::<_, ArriereStats>(
        "SELECT COUNT(DISTINCT membre_id) AS total_arrieres, COALESCE(SUM(montant_du), 0.0) AS montant_du, COALESCE(SUM(montant_paye), 0.0) AS montant_paye FROM historiques_arriere",
    )
    .fetch_one(pool)
    .await?;
    if from_history.total_arrieres > 0 {
        return Ok(from_history);
    }

    let from_membres = sqlx::query_as::<_, ArriereStats>(
        "SELECT COUNT(*) AS total_arrieres, COALESCE(SUM(montant_arriere), 0.0) AS montant_du, 0.0 AS montant_paye FROM membres WHERE statut = 'actif' AND date_debut_arriere IS NOT NULL AND date_debut_arriere != ''",
    )
    .fetch_one(pool)
    .await?;
    Ok(from_membres)
}

/// Count and volume over every operation.
pub async fn operation_stats(pool: &SqlitePool) -> RepoResult<OperationStats> {
    let stats = sqlx::query_as::<_, OperationStats>(
        "SELECT COUNT(*) AS total_operations, COALESCE(SUM(montant), 0.0) AS montant_operations FROM operations",
    )
    .fetch_one(pool)
    .await?;
    Ok(stats)
}

/// Next five upcoming events, soonest first.
pub async fn upcoming_events(pool: &SqlitePool) -> RepoResult<Vec<Evenement>> {
    let today = shared::util::today();
    let rows = sqlx::query_as::<_, Evenement>(
        "SELECT id, titre, date_evenement FROM evenements WHERE date_evenement >= ? ORDER BY date_evenement ASC LIMIT 5",
    )
    .bind(&today)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// One member's dues total (`recette` operations tied to the member).
pub async fn cotisations_membre(pool: &SqlitePool, membre_id: i64) -> RepoResult<f64> {
    let total = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(montant), 0.0) FROM operations WHERE type = 'recette' AND membre_id = ?",
    )
    .bind(membre_id)
    .fetch_one(pool)
    .await?;
    Ok(total)
}
