mod common;

use amicale_server::db::repository::dashboard;
use amicale_server::db::repository::operation::{self, NewOperation};
use shared::models::{LedgerStats, categorie_ids};
use sqlx::SqlitePool;

fn op(kind: &str, montant: f64, date: &str) -> NewOperation {
    NewOperation {
        kind: kind.to_string(),
        montant,
        date_operation: date.to_string(),
        description: None,
    }
}

#[tokio::test]
async fn treasurer_category_is_created_once() {
    let pool = common::setup_pool().await;

    assert!(operation::find_categorie_tresorier(&pool).await.unwrap().is_none());

    let first = operation::ensure_categorie_tresorier(&pool).await.unwrap();
    let second = operation::ensure_categorie_tresorier(&pool).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(
        operation::find_categorie_tresorier(&pool).await.unwrap(),
        Some(first)
    );
}

#[tokio::test]
async fn ledger_entries_total_into_stats() {
    let pool = common::setup_pool().await;
    let categorie_id = operation::ensure_categorie_tresorier(&pool).await.unwrap();

    operation::add(&pool, categorie_id, op("recette", 100_000.0, "2026-02-01"))
        .await
        .unwrap();
    operation::add(&pool, categorie_id, op("depense", 40_000.0, "2026-02-05"))
        .await
        .unwrap();

    let rows = operation::find_by_categorie(&pool, categorie_id).await.unwrap();
    assert_eq!(rows.len(), 2);
    // Newest date first.
    assert_eq!(rows[0].date_operation, "2026-02-05");

    let stats = LedgerStats::compute(&rows);
    assert_eq!(stats.total_entrees, 100_000.0);
    assert_eq!(stats.total_sorties, 40_000.0);
    assert_eq!(stats.benefice, 60_000.0);
    assert_eq!(stats.nombre_operations, 2);
}

#[tokio::test]
async fn update_and_delete_are_scoped_to_the_category() {
    let pool = common::setup_pool().await;
    let categorie_id = operation::ensure_categorie_tresorier(&pool).await.unwrap();

    let id = operation::add(&pool, categorie_id, op("recette", 5_000.0, "2026-02-01"))
        .await
        .unwrap();

    // An entry of a seeded category stays out of reach of the ledger.
    let foreign = operation::add(
        &pool,
        categorie_ids::DONS,
        op("recette", 9_000.0, "2026-02-01"),
    )
    .await
    .unwrap();

    assert!(
        operation::update(&pool, categorie_id, id, op("depense", 6_000.0, "2026-02-02"))
            .await
            .unwrap()
    );
    assert!(
        !operation::update(&pool, categorie_id, foreign, op("depense", 1.0, "2026-02-02"))
            .await
            .unwrap()
    );

    assert!(!operation::delete(&pool, categorie_id, foreign).await.unwrap());
    assert!(operation::delete(&pool, categorie_id, id).await.unwrap());
    assert!(operation::find_by_categorie(&pool, categorie_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn aggregates_decode_on_an_empty_database() {
    let pool = common::setup_pool().await;

    // Empty SUMs must come back as REAL zeros, not decode errors.
    assert_eq!(
        dashboard::total_recettes_by_categorie(&pool, categorie_ids::DONS)
            .await
            .unwrap(),
        0.0
    );
    assert_eq!(dashboard::cotisations_membre(&pool, 1).await.unwrap(), 0.0);

    let stats = dashboard::operation_stats(&pool).await.unwrap();
    assert_eq!(stats.total_operations, 0);
    assert_eq!(stats.montant_operations, 0.0);

    let arrieres = dashboard::arriere_stats(&pool).await.unwrap();
    assert_eq!(arrieres.total_arrieres, 0);
    assert_eq!(arrieres.montant_du, 0.0);
    assert_eq!(arrieres.montant_paye, 0.0);

    assert_eq!(dashboard::count_membres_en_arriere(&pool).await.unwrap(), 0);
}

async fn seed_member_en_arriere(pool: &SqlitePool, montant: f64) -> i64 {
    let id = common::seed_membre(pool, "ibra.sow", "Sow", "Ibrahima", "actif", false).await;
    sqlx::query(
        "UPDATE membres SET date_debut_arriere = '2026-01-01', statut_arriere = 'en_arriere', montant_arriere = ? WHERE id = ?",
    )
    .bind(montant)
    .bind(id)
    .execute(pool)
    .await
    .unwrap();
    id
}

#[tokio::test]
async fn arrears_stats_fall_back_to_member_fields() {
    let pool = common::setup_pool().await;
    seed_member_en_arriere(&pool, 15_000.0).await;

    // No history rows: totals come from the member directory.
    let stats = dashboard::arriere_stats(&pool).await.unwrap();
    assert_eq!(stats.total_arrieres, 1);
    assert_eq!(stats.montant_du, 15_000.0);
    assert_eq!(stats.montant_paye, 0.0);
}

#[tokio::test]
async fn arrears_history_takes_precedence_over_member_fields() {
    let pool = common::setup_pool().await;
    let membre_id = seed_member_en_arriere(&pool, 15_000.0).await;

    sqlx::query(
        "INSERT INTO historiques_arriere (membre_id, montant_du, montant_paye, created_at) VALUES (?, 20000, 5000, 0)",
    )
    .bind(membre_id)
    .execute(&pool)
    .await
    .unwrap();

    let stats = dashboard::arriere_stats(&pool).await.unwrap();
    assert_eq!(stats.total_arrieres, 1);
    assert_eq!(stats.montant_du, 20_000.0);
    assert_eq!(stats.montant_paye, 5_000.0);
}

#[tokio::test]
async fn member_dues_sum_only_their_recettes() {
    let pool = common::setup_pool().await;
    let membre_id = common::seed_membre(&pool, "awa.diop", "Diop", "Awa", "actif", false).await;

    sqlx::query(
        "INSERT INTO operations (type, categorie_id, montant, date_operation, membre_id, created_at) VALUES ('recette', ?, 2000, '2026-01-05', ?, 0), ('recette', ?, 3000, '2026-02-05', ?, 0), ('depense', ?, 9000, '2026-02-06', ?, 0)",
    )
    .bind(categorie_ids::COTIS_MENSUELLES)
    .bind(membre_id)
    .bind(categorie_ids::COTIS_MENSUELLES)
    .bind(membre_id)
    .bind(categorie_ids::COTIS_MENSUELLES)
    .bind(membre_id)
    .execute(&pool)
    .await
    .unwrap();

    let total = dashboard::cotisations_membre(&pool, membre_id).await.unwrap();
    assert_eq!(total, 5_000.0);
    assert_eq!(dashboard::cotisations_membre(&pool, 999).await.unwrap(), 0.0);
}

#[tokio::test]
async fn category_totals_count_only_recettes() {
    let pool = common::setup_pool().await;

    sqlx::query(
        "INSERT INTO operations (type, categorie_id, montant, date_operation, created_at) VALUES ('recette', ?, 4000, '2026-01-05', 0), ('depense', ?, 1000, '2026-01-06', 0)",
    )
    .bind(categorie_ids::DONS)
    .bind(categorie_ids::DONS)
    .execute(&pool)
    .await
    .unwrap();

    let total = dashboard::total_recettes_by_categorie(&pool, categorie_ids::DONS)
        .await
        .unwrap();
    assert_eq!(total, 4_000.0);

    let stats = dashboard::operation_stats(&pool).await.unwrap();
    assert_eq!(stats.total_operations, 2);
    assert_eq!(stats.montant_operations, 5_000.0);
}

#[tokio::test]
async fn upcoming_events_are_future_only_soonest_first_max_five() {
    let pool = common::setup_pool().await;

    sqlx::query(
        "INSERT INTO evenements (titre, date_evenement, created_at) VALUES ('Passé', '2020-01-01', 0), ('E1', '2030-01-06', 0), ('E2', '2030-01-01', 0), ('E3', '2030-01-02', 0), ('E4', '2030-01-03', 0), ('E5', '2030-01-04', 0), ('E6', '2030-01-05', 0)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let events = dashboard::upcoming_events(&pool).await.unwrap();
    assert_eq!(events.len(), 5);
    assert_eq!(events[0].titre, "E2");
    assert!(events.iter().all(|e| e.date_evenement >= "2026".to_string()));
}
