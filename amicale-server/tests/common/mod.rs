#![allow(dead_code)]

use amicale_server::db::DbService;
use amicale_server::db::repository::membre::{self, NewMembre};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

/// In-memory database with migrations applied. One connection so every
/// query sees the same memory database.
pub async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    DbService::migrate(&pool).await.expect("apply migrations");
    pool
}

pub async fn seed_membre(
    pool: &SqlitePool,
    username: &str,
    nom: &str,
    prenom: &str,
    statut: &str,
    bureau: bool,
) -> i64 {
    let (id, _) = membre::create(
        pool,
        NewMembre {
            username: username.to_string(),
            nom: nom.to_string(),
            prenom: prenom.to_string(),
            code_pin: "1234".to_string(),
            telephone: Some("771234567".to_string()),
            role: "membre".to_string(),
            statut: statut.to_string(),
            est_membre_bureau: bureau,
            date_debut_arriere: None,
            montant_arriere: 0.0,
        },
    )
    .await
    .expect("seed member");
    id
}
