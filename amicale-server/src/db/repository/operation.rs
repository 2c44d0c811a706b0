//! Operation Ledger Repository
//!
//! The treasurer ledger is scoped to one category, resolved by name and
//! auto-created on first use. Update and delete verify the operation
//! belongs to that category before mutating.

use shared::models::OperationWithDetails;
use sqlx::SqlitePool;

use super::RepoResult;

/// Name of the category the treasurer ledger lives in.
pub const CATEGORIE_TRESORIER: &str = "Activités Génératrices";

const OPERATION_SELECT: &str = "SELECT o.id, o.type, o.montant, o.date_operation, o.description, o.categorie_id, o.membre_id, m.nom AS membre_nom, m.prenom AS membre_prenom, c.nom AS categorie_nom, o.created_at FROM operations o LEFT JOIN membres m ON o.membre_id = m.id LEFT JOIN categories c ON o.categorie_id = c.id";

/// Validated ledger entry payload.
#[derive(Debug, Clone)]
pub struct NewOperation {
    pub kind: String,
    pub montant: f64,
    pub date_operation: String,
    pub description: Option<String>,
}

/// Resolve the treasurer category id, creating the category when absent.
pub async fn ensure_categorie_tresorier(pool: &SqlitePool) -> RepoResult<i64> {
    let existing =
        sqlx::query_scalar::<_, i64>("SELECT id FROM categories WHERE nom = ? LIMIT 1")
            .bind(CATEGORIE_TRESORIER)
            .fetch_optional(pool)
            .await?;
    if let Some(id) = existing {
        return Ok(id);
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO categories (nom, type, description) VALUES (?, 'recette', 'Revenus et dépenses du trésorier') RETURNING id",
    )
    .bind(CATEGORIE_TRESORIER)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Resolve the treasurer category id without creating it.
pub async fn find_categorie_tresorier(pool: &SqlitePool) -> RepoResult<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM categories WHERE nom = ? LIMIT 1")
        .bind(CATEGORIE_TRESORIER)
        .fetch_optional(pool)
        .await?;
    Ok(id)
}

/// Ledger entries of one category, newest first.
pub async fn find_by_categorie(
    pool: &SqlitePool,
    categorie_id: i64,
) -> RepoResult<Vec<OperationWithDetails>> {
    let sql = format!(
        "{OPERATION_SELECT} WHERE o.categorie_id = ? ORDER BY o.date_operation DESC, o.created_at DESC"
    );
    let rows = sqlx::query_as::<_, OperationWithDetails>(&sql)
        .bind(categorie_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Every operation across all categories, newest first (export surface).
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OperationWithDetails>> {
    let sql = format!("{OPERATION_SELECT} ORDER BY o.date_operation DESC, o.created_at DESC");
    let rows = sqlx::query_as::<_, OperationWithDetails>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a ledger entry into the given category.
pub async fn add(pool: &SqlitePool, categorie_id: i64, data: NewOperation) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO operations (type, categorie_id, montant, date_operation, description, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.kind)
    .bind(categorie_id)
    .bind(data.montant)
    .bind(&data.date_operation)
    .bind(&data.description)
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Update a ledger entry; false when the entry does not exist in the
/// category (ownership check and mutation share the WHERE clause).
pub async fn update(
    pool: &SqlitePool,
    categorie_id: i64,
    id: i64,
    data: NewOperation,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE operations SET type = ?, montant = ?, date_operation = ?, description = ? WHERE id = ? AND categorie_id = ?",
    )
    .bind(&data.kind)
    .bind(data.montant)
    .bind(&data.date_operation)
    .bind(&data.description)
    .bind(id)
    .bind(categorie_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Delete a ledger entry scoped to the category.
pub async fn delete(pool: &SqlitePool, categorie_id: i64, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM operations WHERE id = ? AND categorie_id = ?")
        .bind(id)
        .bind(categorie_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
