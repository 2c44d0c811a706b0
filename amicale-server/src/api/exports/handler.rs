//! CSV export handlers
//!
//! Each handler fetches rows, hands them to the formatters in
//! [`crate::export`] and serves the result as a timestamped download.

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::core::ServerState;
use crate::db::repository::{membre, operation};
use crate::export;
use crate::utils::{AppError, AppResult};

fn csv_download(filename: String, body: String) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={filename}"),
            ),
        ],
        body,
    )
        .into_response()
}

/// GET /api/exports/membres — active member directory.
pub async fn export_membres(State(state): State<ServerState>) -> AppResult<Response> {
    let membres = membre::find_all_actifs(&state.pool).await?;
    let body = export::membres_csv(&membres);
    Ok(csv_download(export::export_filename("membres"), body))
}

/// GET /api/exports/operations — every operation, all categories.
pub async fn export_operations(State(state): State<ServerState>) -> AppResult<Response> {
    let operations = operation::find_all(&state.pool).await?;
    let body = export::operations_csv(&operations);
    Ok(csv_download(export::export_filename("operations"), body))
}

/// GET /api/exports/tresorier — the treasurer ledger only. Errors when the
/// ledger category does not exist yet.
pub async fn export_tresorier(State(state): State<ServerState>) -> AppResult<Response> {
    let categorie_id = operation::find_categorie_tresorier(&state.pool)
        .await?
        .ok_or_else(|| AppError::not_found("Catégorie trésorier introuvable"))?;

    let operations = operation::find_by_categorie(&state.pool, categorie_id).await?;
    let body = export::tresorier_csv(&operations);
    Ok(csv_download(export::export_filename("tresorier"), body))
}
