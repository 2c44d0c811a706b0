//! Dashboard handlers
//!
//! One read endpoint whose payload shape depends on the caller's role:
//! every role sees the arrears count, upcoming events and donation total;
//! `admin` and `tresorier` add the treasury aggregates; `admin` and
//! `membre` add the caller's own dues total. Unrecognized roles get the
//! shared fields alone.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::dashboard::{self, ArriereStats, OperationStats};
use crate::utils::validation::parse_id;
use crate::utils::{AppError, AppResult};
use shared::models::Evenement;
use shared::models::categorie_ids;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub action: Option<String>,
    pub role: Option<String>,
    pub membre_id: Option<String>,
}

#[derive(Serialize)]
struct DashboardResponse {
    success: bool,
    #[serde(flatten)]
    view: DashboardView,
}

/// Role-shaped payload. Serialized untagged so each role's fields land at
/// the top level of the response.
#[derive(Serialize)]
#[serde(untagged)]
enum DashboardView {
    Admin {
        arrieres: i64,
        events: Vec<Evenement>,
        tot_dons: f64,
        tot_mensuelles: f64,
        tot_autres: f64,
        arriere_stats: ArriereStats,
        operation_stats: OperationStats,
        mes_cotisations: f64,
    },
    Tresorier {
        arrieres: i64,
        events: Vec<Evenement>,
        tot_dons: f64,
        tot_mensuelles: f64,
        tot_autres: f64,
        arriere_stats: ArriereStats,
        operation_stats: OperationStats,
    },
    Membre {
        arrieres: i64,
        events: Vec<Evenement>,
        tot_dons: f64,
        mes_cotisations: f64,
    },
    /// Unknown roles: shared fields only.
    Base {
        arrieres: i64,
        events: Vec<Evenement>,
        tot_dons: f64,
    },
}

pub async fn dispatch_get(
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Response> {
    let action = query.action.as_deref().unwrap_or("stats");
    match action {
        "stats" => stats(&state, &query).await,
        other => Err(AppError::not_found(format!("Action inconnue: {other}"))),
    }
}

/// GET ?action=stats[&role=...][&membre_id=N]
async fn stats(state: &ServerState, query: &DashboardQuery) -> AppResult<Response> {
    let role = query.role.as_deref().unwrap_or("membre");
    let pool = &state.pool;

    let arrieres = dashboard::count_membres_en_arriere(pool).await?;
    let events = dashboard::upcoming_events(pool).await?;
    let tot_dons = dashboard::total_recettes_by_categorie(pool, categorie_ids::DONS).await?;

    let view = match role {
        "admin" | "tresorier" => {
            let tot_mensuelles =
                dashboard::total_recettes_by_categorie(pool, categorie_ids::COTIS_MENSUELLES)
                    .await?;
            let mut tot_autres = 0.0;
            for id in [
                categorie_ids::AUTRES_COTIS,
                categorie_ids::FONDS_SOCIAL,
                categorie_ids::ACTIVITES,
            ] {
                tot_autres += dashboard::total_recettes_by_categorie(pool, id).await?;
            }
            let arriere_stats = dashboard::arriere_stats(pool).await?;
            let operation_stats = dashboard::operation_stats(pool).await?;

            if role == "admin" {
                let mes_cotisations = cotisations(state, query).await?;
                DashboardView::Admin {
                    arrieres,
                    events,
                    tot_dons,
                    tot_mensuelles,
                    tot_autres,
                    arriere_stats,
                    operation_stats,
                    mes_cotisations,
                }
            } else {
                DashboardView::Tresorier {
                    arrieres,
                    events,
                    tot_dons,
                    tot_mensuelles,
                    tot_autres,
                    arriere_stats,
                    operation_stats,
                }
            }
        }
        "membre" => {
            let mes_cotisations = cotisations(state, query).await?;
            DashboardView::Membre {
                arrieres,
                events,
                tot_dons,
                mes_cotisations,
            }
        }
        _ => DashboardView::Base {
            arrieres,
            events,
            tot_dons,
        },
    };

    Ok(axum::Json(DashboardResponse {
        success: true,
        view,
    })
    .into_response())
}

/// The caller's dues total; 0 when no member id was given.
async fn cotisations(state: &ServerState, query: &DashboardQuery) -> AppResult<f64> {
    match query.membre_id.as_deref() {
        Some(raw) => {
            let membre_id = parse_id(raw, "membre_id")?;
            Ok(dashboard::cotisations_membre(&state.pool, membre_id).await?)
        }
        None => Ok(0.0),
    }
}
