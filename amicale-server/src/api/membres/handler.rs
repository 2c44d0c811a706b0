//! Member Directory handlers
//!
//! Action-routed endpoints over `/api/membres`. Read actions ride GET,
//! mutations ride POST; asking for a mutation over GET yields 405.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::ServerState;
use crate::db::repository::membre::{self, NewMembre};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, parse_id, validate_optional_text, validate_pin,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ok, ok_message, ok_with_message};
use shared::models::{MembreCreate, MembrePublic, MembreUpdate};

#[derive(Debug, Deserialize)]
pub struct MembreQuery {
    pub action: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
struct MembresList {
    membres: Vec<MembrePublic>,
    count: usize,
}

pub async fn dispatch_get(
    State(state): State<ServerState>,
    Query(query): Query<MembreQuery>,
) -> AppResult<Response> {
    let action = query
        .action
        .as_deref()
        .ok_or_else(|| AppError::validation("Paramètre 'action' manquant"))?;

    match action {
        "all" => all(&state).await,
        "get" => get_membre(&state, &query).await,
        "get_pin" => get_pin(&state, &query).await,
        "get_bureau_members" => get_bureau_members(&state).await,
        "create" | "update" | "update_pin" | "delete" => {
            Err(AppError::MethodNotAllowed("Méthode POST requise".into()))
        }
        other => Err(AppError::not_found(format!("Action inconnue: {other}"))),
    }
}

pub async fn dispatch_post(
    State(state): State<ServerState>,
    Query(query): Query<MembreQuery>,
    body: Option<axum::Json<Value>>,
) -> AppResult<Response> {
    let action = query
        .action
        .as_deref()
        .ok_or_else(|| AppError::validation("Paramètre 'action' manquant"))?;
    let body = body.map(|axum::Json(v)| v).unwrap_or(Value::Null);

    match action {
        "create" => create(&state, body).await,
        "update" => update(&state, body).await,
        "update_pin" => update_pin(&state, body).await,
        "delete" => delete(&state, body).await,
        "all" | "get" | "get_pin" | "get_bureau_members" => {
            Err(AppError::MethodNotAllowed("Méthode GET requise".into()))
        }
        other => Err(AppError::not_found(format!("Action inconnue: {other}"))),
    }
}

/// GET ?action=all — active members, PIN excluded.
async fn all(state: &ServerState) -> AppResult<Response> {
    let membres = membre::find_all_actifs(&state.pool).await?;
    let count = membres.len();
    Ok(ok(MembresList { membres, count }).into_response())
}

/// GET ?action=get&id=N — single member, PIN excluded.
async fn get_membre(state: &ServerState, query: &MembreQuery) -> AppResult<Response> {
    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| AppError::validation("Paramètre 'id' manquant"))?;
    let id = parse_id(raw, "ID de membre")?;

    let found = membre::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Membre introuvable avec l'ID: {id}")))?;

    #[derive(Serialize)]
    struct Data {
        membre: MembrePublic,
    }
    Ok(ok(Data { membre: found }).into_response())
}

/// GET ?action=get_pin&id=N — isolated PIN accessor.
async fn get_pin(state: &ServerState, query: &MembreQuery) -> AppResult<Response> {
    let raw = query
        .id
        .as_deref()
        .ok_or_else(|| AppError::validation("Paramètre 'id' manquant"))?;
    let id = parse_id(raw, "ID de membre")?;

    let code_pin = membre::find_pin(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Membre introuvable ou PIN non défini"))?;

    #[derive(Serialize)]
    struct Data {
        code_pin: String,
    }
    Ok(ok(Data { code_pin }).into_response())
}

/// GET ?action=get_bureau_members — active bureau members.
async fn get_bureau_members(state: &ServerState) -> AppResult<Response> {
    let membres = membre::find_bureau_actifs(&state.pool).await?;
    let count = membres.len();
    Ok(ok(MembresList { membres, count }).into_response())
}

/// POST ?action=create
async fn create(state: &ServerState, body: Value) -> AppResult<Response> {
    let data: MembreCreate = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Données JSON invalides"))?;

    let (Some(username), Some(nom), Some(prenom), Some(code_pin)) = (
        data.username.clone(),
        data.nom.clone(),
        data.prenom.clone(),
        data.code_pin.clone(),
    ) else {
        return Err(AppError::validation("Champs obligatoires manquants"));
    };

    validate_required_text(&username, "username", MAX_NAME_LEN)?;
    validate_required_text(&nom, "nom", MAX_NAME_LEN)?;
    validate_required_text(&prenom, "prenom", MAX_NAME_LEN)?;
    validate_optional_text(&data.telephone, "telephone", MAX_NAME_LEN)?;
    validate_pin(&code_pin)?;

    let (id, nom_complet) = membre::create(
        &state.pool,
        NewMembre {
            username,
            nom,
            prenom,
            code_pin,
            telephone: data.telephone,
            role: data.role.unwrap_or_else(|| "membre".into()),
            statut: data.statut.unwrap_or_else(|| "actif".into()),
            est_membre_bureau: data.est_membre_bureau.unwrap_or(false),
            date_debut_arriere: data.date_debut_arriere,
            montant_arriere: data.montant_arriere.unwrap_or(0.0),
        },
    )
    .await?;

    #[derive(Serialize)]
    struct Data {
        id: i64,
        nom_complet: String,
    }
    Ok((
        StatusCode::CREATED,
        ok_with_message(Data { id, nom_complet }, "Membre créé avec succès"),
    )
        .into_response())
}

#[derive(Debug, Deserialize)]
struct UpdateBody {
    id: Option<i64>,
    #[serde(flatten)]
    fields: MembreUpdate,
}

/// POST ?action=update — partial update over the allowed whitelist.
async fn update(state: &ServerState, body: Value) -> AppResult<Response> {
    let data: UpdateBody = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Données JSON invalides"))?;
    let id = data
        .id
        .ok_or_else(|| AppError::validation("ID du membre manquant"))?;

    if data.fields.is_empty() {
        return Err(AppError::validation("Aucune donnée à mettre à jour"));
    }
    validate_optional_text(&data.fields.nom, "nom", MAX_NAME_LEN)?;
    validate_optional_text(&data.fields.prenom, "prenom", MAX_NAME_LEN)?;
    validate_optional_text(&data.fields.telephone, "telephone", MAX_NOTE_LEN)?;

    membre::update(&state.pool, id, data.fields).await?;
    Ok(ok_message("Membre mis à jour avec succès").into_response())
}

#[derive(Debug, Deserialize)]
struct PinBody {
    id: Option<i64>,
    code_pin: Option<String>,
}

/// POST ?action=update_pin
async fn update_pin(state: &ServerState, body: Value) -> AppResult<Response> {
    let data: PinBody = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Données JSON invalides"))?;
    let (Some(id), Some(code_pin)) = (data.id, data.code_pin) else {
        return Err(AppError::validation("ID et code PIN manquants"));
    };
    validate_pin(&code_pin)?;

    if membre::update_pin(&state.pool, id, &code_pin).await? {
        Ok(ok_message("Code PIN mis à jour avec succès").into_response())
    } else {
        Err(AppError::not_found(
            "Membre non trouvé ou aucune modification effectuée",
        ))
    }
}

#[derive(Debug, Deserialize)]
struct DeleteBody {
    id: Option<i64>,
}

/// POST ?action=delete — hard delete.
async fn delete(state: &ServerState, body: Value) -> AppResult<Response> {
    let data: DeleteBody = serde_json::from_value(body)
        .map_err(|_| AppError::validation("Données JSON invalides"))?;
    let id = data
        .id
        .ok_or_else(|| AppError::validation("ID du membre manquant"))?;

    if membre::delete(&state.pool, id).await? {
        Ok(ok_message("Membre supprimé avec succès").into_response())
    } else {
        Err(AppError::not_found("Membre non trouvé"))
    }
}
