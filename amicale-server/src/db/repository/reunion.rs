//! Meeting Repository
//!
//! Meetings own their attendance rows: creation materializes one row per
//! applicable member inside a transaction, and deletion removes the rows
//! explicitly so no orphan attendance survives.

use shared::models::{
    PresenceStats, PresenceStatut, PresenceUpdate, PresenceWithMembre, Reunion, StatsMembre,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::RepoResult;

const REUNION_SELECT: &str = "SELECT r.id, r.type_reunion, r.date_reunion, r.ordre_du_jour, r.description, r.lieu, r.statut_reunion, r.created_by, COALESCE(m.nom_complet, '') AS created_by_name, r.created_at FROM reunions r LEFT JOIN membres m ON r.created_by = m.id";

const PRESENCE_SELECT: &str = "SELECT p.id, p.reunion_id, p.membre_id, p.statut, p.heure_arrivee, p.commentaire, p.created_at, COALESCE(m.nom_complet, '') AS nom_complet, COALESCE(m.telephone, '') AS telephone FROM presences_reunion p LEFT JOIN membres m ON p.membre_id = m.id";

/// Validated insert payload for a meeting.
#[derive(Debug, Clone)]
pub struct NewReunion {
    pub type_reunion: String,
    pub date_reunion: String,
    pub ordre_du_jour: Option<String>,
    pub description: Option<String>,
    pub lieu: Option<String>,
    pub statut_reunion: String,
    pub created_by: Option<i64>,
}

/// Insert a meeting and materialize its attendance roll, all or nothing.
///
/// The member population depends on the meeting kind: `bureau` takes active
/// bureau members, `generale` all active members, and `extraordinaire` (or
/// any unrecognized kind) every member regardless of status. Each row starts
/// as `absent`.
pub async fn create(pool: &SqlitePool, data: NewReunion) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;

    let reunion_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO reunions (type_reunion, date_reunion, ordre_du_jour, description, lieu, statut_reunion, created_by, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.type_reunion)
    .bind(&data.date_reunion)
    .bind(&data.ordre_du_jour)
    .bind(&data.description)
    .bind(&data.lieu)
    .bind(&data.statut_reunion)
    .bind(data.created_by)
    .bind(now)
    .fetch_one(&mut *tx)
    .await?;

    let where_clause = match data.type_reunion.as_str() {
        "bureau" => "WHERE est_membre_bureau = 1 AND statut = 'actif'",
        "generale" => "WHERE statut = 'actif'",
        _ => "",
    };
    let sql = format!("SELECT id FROM membres {where_clause} ORDER BY nom_complet ASC");
    let membre_ids = sqlx::query_scalar::<_, i64>(&sql)
        .fetch_all(&mut *tx)
        .await?;

    for membre_id in membre_ids {
        sqlx::query(
            "INSERT INTO presences_reunion (reunion_id, membre_id, statut, created_at) VALUES (?, ?, 'absent', ?)",
        )
        .bind(reunion_id)
        .bind(membre_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(reunion_id)
}

/// Meetings filtered by optional inclusive date bounds and kind, newest
/// first (date, then creation time).
pub async fn find_all(
    pool: &SqlitePool,
    date_from: Option<&str>,
    date_to: Option<&str>,
    type_reunion: Option<&str>,
) -> RepoResult<Vec<Reunion>> {
    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(REUNION_SELECT);
    let mut first = true;
    let mut push_clause = |qb: &mut QueryBuilder<Sqlite>| {
        qb.push(if first { " WHERE " } else { " AND " });
        first = false;
    };

    if let Some(from) = date_from {
        push_clause(&mut qb);
        qb.push("r.date_reunion >= ").push_bind(from.to_string());
    }
    if let Some(to) = date_to {
        push_clause(&mut qb);
        qb.push("r.date_reunion <= ").push_bind(to.to_string());
    }
    if let Some(kind) = type_reunion {
        push_clause(&mut qb);
        qb.push("r.type_reunion = ").push_bind(kind.to_string());
    }
    qb.push(" ORDER BY r.date_reunion DESC, r.created_at DESC");

    let rows = qb.build_query_as::<Reunion>().fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reunion>> {
    let sql = format!("{REUNION_SELECT} WHERE r.id = ?");
    let row = sqlx::query_as::<_, Reunion>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Attendance counts per status for one meeting.
pub async fn presence_stats(pool: &SqlitePool, reunion_id: i64) -> RepoResult<PresenceStats> {
    let stats = sqlx::query_as::<_, PresenceStats>(
        "SELECT COALESCE(SUM(CASE WHEN statut = 'present' THEN 1 ELSE 0 END), 0) AS presents, COALESCE(SUM(CASE WHEN statut = 'absent' THEN 1 ELSE 0 END), 0) AS absents, COALESCE(SUM(CASE WHEN statut = 'excuse' THEN 1 ELSE 0 END), 0) AS excuses, COALESCE(SUM(CASE WHEN statut = 'retard' THEN 1 ELSE 0 END), 0) AS retards, COUNT(*) AS total FROM presences_reunion WHERE reunion_id = ?",
    )
    .bind(reunion_id)
    .fetch_one(pool)
    .await?;
    Ok(stats)
}

/// Attendance rows with member name/phone, optionally filtered by status,
/// ordered by member name.
pub async fn list_presences(
    pool: &SqlitePool,
    reunion_id: i64,
    statut: Option<PresenceStatut>,
) -> RepoResult<Vec<PresenceWithMembre>> {
    let rows = match statut {
        Some(statut) => {
            let sql = format!(
                "{PRESENCE_SELECT} WHERE p.reunion_id = ? AND p.statut = ? ORDER BY COALESCE(m.nom_complet, '') ASC"
            );
            sqlx::query_as::<_, PresenceWithMembre>(&sql)
                .bind(reunion_id)
                .bind(statut)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!(
                "{PRESENCE_SELECT} WHERE p.reunion_id = ? ORDER BY COALESCE(m.nom_complet, '') ASC"
            );
            sqlx::query_as::<_, PresenceWithMembre>(&sql)
                .bind(reunion_id)
                .fetch_all(pool)
                .await?
        }
    };
    Ok(rows)
}

/// Set one member's attendance for a meeting. Returns false when the
/// (meeting, member) pair has no attendance row.
pub async fn update_presence(
    pool: &SqlitePool,
    reunion_id: i64,
    membre_id: i64,
    statut: PresenceStatut,
    heure_arrivee: Option<&str>,
    commentaire: Option<&str>,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE presences_reunion SET statut = ?, heure_arrivee = ?, commentaire = ? WHERE reunion_id = ? AND membre_id = ?",
    )
    .bind(statut)
    .bind(heure_arrivee)
    .bind(commentaire)
    .bind(reunion_id)
    .bind(membre_id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Apply a batch of attendance updates in one transaction. Entries missing
/// a member id or carrying an unrecognized status are skipped, not fatal.
/// Returns the number of entries applied.
pub async fn bulk_update_presences(
    pool: &SqlitePool,
    reunion_id: i64,
    updates: &[PresenceUpdate],
) -> RepoResult<usize> {
    let mut tx = pool.begin().await?;
    let mut applied = 0usize;

    for entry in updates {
        let Some(membre_id) = entry.membre_id else {
            continue;
        };
        let Some(statut) = entry
            .statut
            .as_deref()
            .and_then(|s| s.parse::<PresenceStatut>().ok())
        else {
            continue;
        };

        let rows = sqlx::query(
            "UPDATE presences_reunion SET statut = ?, heure_arrivee = ?, commentaire = ? WHERE reunion_id = ? AND membre_id = ?",
        )
        .bind(statut)
        .bind(&entry.heure_arrivee)
        .bind(&entry.commentaire)
        .bind(reunion_id)
        .bind(membre_id)
        .execute(&mut *tx)
        .await?;
        applied += rows.rows_affected() as usize;
    }

    tx.commit().await?;
    Ok(applied)
}

/// Delete a meeting and its attendance rows in one transaction.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM presences_reunion WHERE reunion_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    let rows = sqlx::query("DELETE FROM reunions WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(rows.rows_affected() > 0)
}

/// Per-member attendance aggregate across all meetings.
pub async fn stats_membre(pool: &SqlitePool, membre_id: i64) -> RepoResult<StatsMembre> {
    let stats = sqlx::query_as::<_, StatsMembre>(
        "SELECT COUNT(*) AS total_reunions, COALESCE(SUM(CASE WHEN statut = 'present' THEN 1 ELSE 0 END), 0) AS presents, COALESCE(SUM(CASE WHEN statut = 'absent' THEN 1 ELSE 0 END), 0) AS absents, COALESCE(SUM(CASE WHEN statut = 'excuse' THEN 1 ELSE 0 END), 0) AS excuses, COALESCE(SUM(CASE WHEN statut = 'retard' THEN 1 ELSE 0 END), 0) AS retards FROM presences_reunion WHERE membre_id = ?",
    )
    .bind(membre_id)
    .fetch_one(pool)
    .await?;
    Ok(stats)
}
