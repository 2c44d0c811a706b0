//! Treasurer ledger handlers
//!
//! The ledger lives in a single category resolved by name and created on
//! first use. The dashboard read degrades to an empty ledger on store
//! failure instead of erroring, so the page always renders.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::core::ServerState;
use crate::db::repository::operation::{self, NewOperation};
use crate::utils::{AppError, AppResult, ok, ok_message, ok_with_message};
use shared::models::{LedgerStats, OperationInput, OperationWithDetails};

#[derive(Debug, Deserialize)]
pub struct TresorierQuery {
    pub action: Option<String>,
    pub id: Option<String>,
}

pub async fn dispatch_get(
    State(state): State<ServerState>,
    Query(query): Query<TresorierQuery>,
) -> AppResult<Response> {
    let action = query.action.as_deref().unwrap_or("dashboard");

    match action {
        "dashboard" => dashboard(&state).await,
        "delete" => delete_by_query(&state, &query).await,
        "add" | "update" => Err(AppError::MethodNotAllowed("Méthode POST requise".into())),
        other => Err(AppError::not_found(format!("Action inconnue: {other}"))),
    }
}

pub async fn dispatch_post(
    State(state): State<ServerState>,
    Query(query): Query<TresorierQuery>,
    body: Option<axum::Json<Value>>,
) -> AppResult<Response> {
    let action = query.action.as_deref().unwrap_or("dashboard");
    let body = body.map(|axum::Json(v)| v).unwrap_or(Value::Null);

    match action {
        "add" => add(&state, body).await,
        "update" => update(&state, body).await,
        "delete" => delete_by_body(&state, body).await,
        "dashboard" => Err(AppError::MethodNotAllowed("Méthode GET requise".into())),
        other => Err(AppError::not_found(format!("Action inconnue: {other}"))),
    }
}

#[derive(Serialize)]
struct DashboardData {
    operations: Vec<OperationWithDetails>,
    stats: LedgerStats,
    categorie_id: i64,
}

/// GET — the ledger with its running totals. Store failures degrade to an
/// empty ledger.
async fn dashboard(state: &ServerState) -> AppResult<Response> {
    let categorie_id = match operation::ensure_categorie_tresorier(&state.pool).await {
        Ok(id) => id,
        Err(err) => {
            warn!(error = %err, "Résolution de la catégorie trésorier impossible");
            return Ok(ok(DashboardData {
                operations: Vec::new(),
                stats: LedgerStats::default(),
                categorie_id: 0,
            })
            .into_response());
        }
    };

    let operations = match operation::find_by_categorie(&state.pool, categorie_id).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "Lecture des opérations impossible");
            Vec::new()
        }
    };
    let stats = LedgerStats::compute(&operations);

    Ok(ok(DashboardData {
        operations,
        stats,
        categorie_id,
    })
    .into_response())
}

fn parse_input(body: Value) -> AppResult<OperationInput> {
    serde_json::from_value(body).map_err(|_| AppError::validation("Données JSON invalides"))
}

fn to_new_operation(input: &OperationInput) -> NewOperation {
    NewOperation {
        kind: input.kind.clone().unwrap_or_else(|| "recette".into()),
        montant: input.montant.unwrap_or(0.0),
        date_operation: input
            .date_operation
            .clone()
            .unwrap_or_else(shared::util::today),
        description: input.description.clone(),
    }
}

/// POST ?action=add — defaults: type `recette`, montant 0, date today.
async fn add(state: &ServerState, body: Value) -> AppResult<Response> {
    let input = parse_input(body)?;
    let categorie_id = operation::ensure_categorie_tresorier(&state.pool).await?;

    let id = operation::add(&state.pool, categorie_id, to_new_operation(&input)).await?;

    #[derive(Serialize)]
    struct Data {
        id: i64,
    }
    Ok((
        StatusCode::CREATED,
        ok_with_message(Data { id }, "Opération ajoutée avec succès"),
    )
        .into_response())
}

/// POST ?action=update — scoped to the treasurer category.
async fn update(state: &ServerState, body: Value) -> AppResult<Response> {
    let input = parse_input(body)?;
    let id = input
        .id
        .ok_or_else(|| AppError::validation("ID de l'opération manquant"))?;
    let categorie_id = operation::ensure_categorie_tresorier(&state.pool).await?;

    let updated = operation::update(&state.pool, categorie_id, id, to_new_operation(&input)).await?;
    if !updated {
        return Err(AppError::not_found("Opération non trouvée ou non autorisée"));
    }
    Ok(ok_message("Opération modifiée avec succès").into_response())
}

/// GET ?action=delete&id=N
async fn delete_by_query(state: &ServerState, query: &TresorierQuery) -> AppResult<Response> {
    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| AppError::validation("ID de l'opération manquant"))?;
    let id = crate::utils::validation::parse_id(raw, "ID")?;
    delete(state, id).await
}

/// POST ?action=delete with `{ "id": N }`
async fn delete_by_body(state: &ServerState, body: Value) -> AppResult<Response> {
    let input = parse_input(body)?;
    let id = input
        .id
        .ok_or_else(|| AppError::validation("ID de l'opération manquant"))?;
    delete(state, id).await
}

async fn delete(state: &ServerState, id: i64) -> AppResult<Response> {
    let categorie_id = operation::ensure_categorie_tresorier(&state.pool).await?;

    let deleted = operation::delete(&state.pool, categorie_id, id).await?;
    if !deleted {
        return Err(AppError::not_found("Opération non trouvée"));
    }
    Ok(ok_message("Opération supprimée avec succès").into_response())
}
