//! Member Repository

use shared::models::{MembrePublic, MembreUpdate, nom_complet};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const MEMBRE_PUBLIC_SELECT: &str = "SELECT id, username, nom, prenom, nom_complet, telephone, role, statut, est_membre_bureau, date_adhesion, date_debut_arriere, statut_arriere, montant_arriere FROM membres";

/// Validated insert payload. Required fields are concrete by the time a
/// member reaches the repository; derivations happen here.
#[derive(Debug, Clone)]
pub struct NewMembre {
    pub username: String,
    pub nom: String,
    pub prenom: String,
    pub code_pin: String,
    pub telephone: Option<String>,
    pub role: String,
    pub statut: String,
    pub est_membre_bureau: bool,
    pub date_debut_arriere: Option<String>,
    pub montant_arriere: f64,
}

/// Active members, ordered by name. The PIN column is never selected.
pub async fn find_all_actifs(pool: &SqlitePool) -> RepoResult<Vec<MembrePublic>> {
    let sql = format!("{MEMBRE_PUBLIC_SELECT} WHERE statut = 'actif' ORDER BY nom ASC, prenom ASC");
    let rows = sqlx::query_as::<_, MembrePublic>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MembrePublic>> {
    let sql = format!("{MEMBRE_PUBLIC_SELECT} WHERE id = ? LIMIT 1");
    let row = sqlx::query_as::<_, MembrePublic>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Isolated PIN accessor — the only query that touches `code_pin`.
pub async fn find_pin(pool: &SqlitePool, id: i64) -> RepoResult<Option<String>> {
    let pin = sqlx::query_scalar::<_, String>("SELECT code_pin FROM membres WHERE id = ? LIMIT 1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(pin)
}

/// Active bureau members, ordered by name.
pub async fn find_bureau_actifs(pool: &SqlitePool) -> RepoResult<Vec<MembrePublic>> {
    let sql = format!(
        "{MEMBRE_PUBLIC_SELECT} WHERE est_membre_bureau = 1 AND statut = 'actif' ORDER BY nom ASC, prenom ASC"
    );
    let rows = sqlx::query_as::<_, MembrePublic>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a member. Derives `nom_complet`, the arrears status (from the
/// presence of an arrears start date) and the adhesion date. Returns the
/// new id and the derived full name.
pub async fn create(pool: &SqlitePool, data: NewMembre) -> RepoResult<(i64, String)> {
    let complet = nom_complet(&data.prenom, &data.nom);
    let statut_arriere = match data.date_debut_arriere.as_deref() {
        Some(d) if !d.is_empty() => "en_arriere",
        _ => "a_jour",
    };
    let now = shared::util::now_millis();
    let today = shared::util::today();

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO membres (username, nom, prenom, nom_complet, telephone, code_pin, role, statut, est_membre_bureau, date_adhesion, date_debut_arriere, statut_arriere, montant_arriere, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.username.trim())
    .bind(data.nom.trim())
    .bind(data.prenom.trim())
    .bind(&complet)
    .bind(&data.telephone)
    .bind(&data.code_pin)
    .bind(&data.role)
    .bind(&data.statut)
    .bind(data.est_membre_bureau)
    .bind(&today)
    .bind(&data.date_debut_arriere)
    .bind(statut_arriere)
    .bind(data.montant_arriere)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok((id, complet))
}

/// Partial update over the allowed-field whitelist. The full name is
/// recomputed whenever either name component is supplied, merging with the
/// stored value so callers never resupply the other half.
pub async fn update(pool: &SqlitePool, id: i64, data: MembreUpdate) -> RepoResult<()> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound("Membre introuvable".into()))?;

    let complet = if data.nom.is_some() || data.prenom.is_some() {
        let nom = data.nom.as_deref().unwrap_or(&existing.nom);
        let prenom = data.prenom.as_deref().unwrap_or(&existing.prenom);
        Some(nom_complet(prenom, nom))
    } else {
        None
    };

    let rows = sqlx::query(
        "UPDATE membres SET username = COALESCE(?, username), nom = COALESCE(?, nom), prenom = COALESCE(?, prenom), nom_complet = COALESCE(?, nom_complet), telephone = COALESCE(?, telephone), role = COALESCE(?, role), statut = COALESCE(?, statut), est_membre_bureau = COALESCE(?, est_membre_bureau), date_debut_arriere = COALESCE(?, date_debut_arriere), statut_arriere = COALESCE(?, statut_arriere), montant_arriere = COALESCE(?, montant_arriere) WHERE id = ?",
    )
    .bind(&data.username)
    .bind(&data.nom)
    .bind(&data.prenom)
    .bind(&complet)
    .bind(&data.telephone)
    .bind(&data.role)
    .bind(&data.statut)
    .bind(data.est_membre_bureau)
    .bind(&data.date_debut_arriere)
    .bind(&data.statut_arriere)
    .bind(data.montant_arriere)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound("Membre introuvable".into()));
    }
    Ok(())
}

/// Replace the PIN. Returns false when the member does not exist.
pub async fn update_pin(pool: &SqlitePool, id: i64, pin: &str) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE membres SET code_pin = ? WHERE id = ?")
        .bind(pin)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Hard delete. Returns false when no row was removed.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM membres WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
