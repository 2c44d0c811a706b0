//! Meeting handlers
//!
//! Action-routed endpoints over `/api/reunions`. Meeting creation
//! materializes the attendance roll transactionally; deletion removes the
//! roll with the meeting.

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ServerState;
use crate::db::repository::reunion::{self, NewReunion};
use crate::export;
use crate::utils::validation::parse_id;
use crate::utils::{AppError, AppResult, ok, ok_message};
use shared::models::{PresenceStats, PresenceStatut, PresenceUpdate, Reunion, StatsMembre};

#[derive(Debug, Deserialize)]
pub struct ReunionQuery {
    pub action: Option<String>,
    pub id: Option<String>,
    pub membre_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub type_reunion: Option<String>,
    pub statut: Option<String>,
}

pub async fn dispatch_get(
    State(state): State<ServerState>,
    Query(query): Query<ReunionQuery>,
) -> AppResult<Response> {
    let action = query
        .action
        .as_deref()
        .ok_or_else(|| AppError::validation("Action manquante"))?;

    match action {
        "all" => all(&state, &query).await,
        "details" => details(&state, &query, false).await,
        "details_full" => details(&state, &query, true).await,
        "list_presence" => list_presence(&state, &query).await,
        "export_excel" => export_excel(&state, &query).await,
        "stats_membre" => stats_membre(&state, &query).await,
        "delete" => delete(&state, &query).await,
        "add" | "update_presence" | "bulk_update_presence" => {
            Err(AppError::MethodNotAllowed("POST requis".into()))
        }
        other => Err(AppError::not_found(format!("Action inconnue: {other}"))),
    }
}

pub async fn dispatch_post(
    State(state): State<ServerState>,
    Query(query): Query<ReunionQuery>,
    body: Option<axum::Json<Value>>,
) -> AppResult<Response> {
    let action = query
        .action
        .as_deref()
        .ok_or_else(|| AppError::validation("Action manquante"))?;
    let body = body.map(|axum::Json(v)| v).unwrap_or(Value::Null);

    match action {
        "add" => add(&state, body).await,
        "update_presence" => update_presence(&state, body).await,
        "bulk_update_presence" => bulk_update_presence(&state, body).await,
        other => Err(AppError::not_found(format!("Action inconnue: {other}"))),
    }
}

/// DELETE /api/reunions?action=delete&id=N
pub async fn dispatch_delete(
    State(state): State<ServerState>,
    Query(query): Query<ReunionQuery>,
) -> AppResult<Response> {
    delete(&state, &query).await
}

/// GET ?action=all — optional date bounds and kind filter.
async fn all(state: &ServerState, query: &ReunionQuery) -> AppResult<Response> {
    let rows = reunion::find_all(
        &state.pool,
        query.date_from.as_deref(),
        query.date_to.as_deref(),
        query.type_reunion.as_deref(),
    )
    .await?;
    Ok(ok(rows).into_response())
}

#[derive(Serialize)]
struct DetailsResponse {
    success: bool,
    reunion: Reunion,
    stats: PresenceStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    participation: Option<f64>,
}

/// GET ?action=details / details_full — meeting plus attendance counts;
/// the full variant adds the participation percentage.
async fn details(state: &ServerState, query: &ReunionQuery, full: bool) -> AppResult<Response> {
    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| AppError::validation("ID manquant"))?;
    let id = parse_id(raw, "ID")?;

    let found = reunion::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Réunion introuvable"))?;
    let stats = reunion::presence_stats(&state.pool, id).await?;
    let participation = full.then(|| stats.participation());

    Ok(axum::Json(DetailsResponse {
        success: true,
        reunion: found,
        stats,
        participation,
    })
    .into_response())
}

/// GET ?action=list_presence&id=N[&statut=...]
async fn list_presence(state: &ServerState, query: &ReunionQuery) -> AppResult<Response> {
    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| AppError::validation("id manquant"))?;
    let id = parse_id(raw, "id")?;

    let statut = match query.statut.as_deref() {
        Some(s) => Some(
            s.parse::<PresenceStatut>()
                .map_err(|_| AppError::validation("Statut invalide"))?,
        ),
        None => None,
    };

    let rows = reunion::list_presences(&state.pool, id, statut).await?;
    Ok(ok(rows).into_response())
}

/// GET ?action=export_excel&id=N — tab-delimited roll, `.xls` download.
async fn export_excel(state: &ServerState, query: &ReunionQuery) -> AppResult<Response> {
    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| AppError::validation("ID manquant"))?;
    let id = parse_id(raw, "ID")?;

    let rows = reunion::list_presences(&state.pool, id, None).await?;
    let body = export::presence_roll(&rows);

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.ms-excel; charset=utf-8".to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=presence_reunion_{id}.xls"),
            ),
        ],
        body,
    )
        .into_response())
}

/// GET ?action=stats_membre&membre_id=N
async fn stats_membre(state: &ServerState, query: &ReunionQuery) -> AppResult<Response> {
    let raw = query
        .membre_id
        .as_deref()
        .ok_or_else(|| AppError::validation("membre_id manquant"))?;
    let membre_id = parse_id(raw, "membre_id")?;

    let stats = reunion::stats_membre(&state.pool, membre_id).await?;

    #[derive(Serialize)]
    struct Data {
        stats: StatsMembre,
    }
    Ok(ok(Data { stats }).into_response())
}

#[derive(Serialize)]
struct AddResponse {
    success: bool,
    message: String,
    reunion_id: i64,
}

/// POST ?action=add — insert the meeting and its attendance roll, all or
/// nothing.
async fn add(state: &ServerState, body: Value) -> AppResult<Response> {
    let data: shared::models::ReunionCreate = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Données JSON invalides"))?;

    let (Some(type_reunion), Some(date_reunion)) =
        (data.type_reunion.clone(), data.date_reunion.clone())
    else {
        return Err(AppError::validation(
            "Paramètres requis: type_reunion, date_reunion",
        ));
    };

    let reunion_id = reunion::create(
        &state.pool,
        NewReunion {
            type_reunion,
            date_reunion,
            ordre_du_jour: data.ordre_du_jour,
            description: data.description,
            lieu: data.lieu,
            statut_reunion: data.statut_reunion.unwrap_or_else(|| "planifiee".into()),
            created_by: data.created_by,
        },
    )
    .await?;

    Ok(axum::Json(AddResponse {
        success: true,
        message: "Réunion créée".into(),
        reunion_id,
    })
    .into_response())
}

#[derive(Debug, Deserialize)]
struct UpdatePresenceBody {
    reunion_id: Option<i64>,
    #[serde(flatten)]
    entry: PresenceUpdate,
}

/// POST ?action=update_presence — single attendance mutation; unknown
/// statuses are rejected without touching the row.
async fn update_presence(state: &ServerState, body: Value) -> AppResult<Response> {
    let data: UpdatePresenceBody = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Données JSON invalides"))?;

    let (Some(reunion_id), Some(membre_id), Some(raw_statut)) = (
        data.reunion_id,
        data.entry.membre_id,
        data.entry.statut.as_deref(),
    ) else {
        return Err(AppError::validation(
            "Paramètres manquants: reunion_id, membre_id, statut",
        ));
    };

    let statut = raw_statut
        .parse::<PresenceStatut>()
        .map_err(|_| AppError::validation("Statut invalide"))?;

    reunion::update_presence(
        &state.pool,
        reunion_id,
        membre_id,
        statut,
        data.entry.heure_arrivee.as_deref(),
        data.entry.commentaire.as_deref(),
    )
    .await?;

    Ok(ok_message("Statut mis à jour").into_response())
}

#[derive(Debug, Deserialize)]
struct BulkUpdateBody {
    reunion_id: Option<i64>,
    updates: Option<Vec<PresenceUpdate>>,
}

/// POST ?action=bulk_update_presence — one transaction; invalid entries
/// are skipped, not fatal.
async fn bulk_update_presence(state: &ServerState, body: Value) -> AppResult<Response> {
    let data: BulkUpdateBody = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Paramètres invalides"))?;

    let (Some(reunion_id), Some(updates)) = (data.reunion_id, data.updates) else {
        return Err(AppError::validation("Paramètres invalides"));
    };

    let applied = reunion::bulk_update_presences(&state.pool, reunion_id, &updates).await?;

    #[derive(Serialize)]
    struct Data {
        applied: usize,
    }
    Ok(
        crate::utils::ok_with_message(Data { applied }, "Présences mises à jour")
            .into_response(),
    )
}

/// Remove the meeting and its attendance rows.
async fn delete(state: &ServerState, query: &ReunionQuery) -> AppResult<Response> {
    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| AppError::validation("ID manquant"))?;
    let id = parse_id(raw, "ID")?;

    reunion::delete(&state.pool, id).await?;
    Ok(ok_message("Réunion supprimée").into_response())
}
