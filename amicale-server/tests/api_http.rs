mod common;

use amicale_server::api::build_app;
use amicale_server::core::{Config, ServerState};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app() -> Router {
    let pool = common::setup_pool().await;
    let state = ServerState::with_pool(Config::with_overrides(":memory:", 0), pool);
    build_app(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn member_listing_returns_envelope_with_count() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/membres?action=all")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["count"], json!(0));
    assert!(body["data"]["membres"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn missing_action_is_a_400_and_unknown_action_a_404() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/membres"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(false));

    let response = app.oneshot(get("/api/membres?action=bogus")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn mutations_over_get_yield_405() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/membres?action=create")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Méthode POST requise"));
}

#[tokio::test]
async fn member_creation_round_trips_through_the_api() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post(
            "/api/membres?action=create",
            json!({
                "username": "awa.diop",
                "nom": "Diop",
                "prenom": "Awa",
                "code_pin": "1234",
                "telephone": "771234567"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["nom_complet"], json!("Awa Diop"));
    let id = body["data"]["id"].as_i64().unwrap();

    let response = app
        .oneshot(get(&format!("/api/membres?action=get&id={id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["data"]["membre"]["nom_complet"], json!("Awa Diop"));
    // The PIN never leaves through the public projection.
    assert!(body["data"]["membre"].get("code_pin").is_none());
}

#[tokio::test]
async fn member_creation_rejects_a_malformed_pin() {
    let app = test_app().await;

    let response = app
        .oneshot(post(
            "/api/membres?action=create",
            json!({
                "username": "awa.diop",
                "nom": "Diop",
                "prenom": "Awa",
                "code_pin": "12ab"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        json!("Le code PIN doit contenir exactement 4 chiffres")
    );
}

#[tokio::test]
async fn meeting_creation_and_details_with_participation() {
    let app = test_app().await;

    // Two active members; the general meeting rolls both.
    for (username, nom, prenom) in [("a", "Diop", "Awa"), ("b", "Sow", "Ibrahima")] {
        let response = app
            .clone()
            .oneshot(post(
                "/api/membres?action=create",
                json!({"username": username, "nom": nom, "prenom": prenom, "code_pin": "1234"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .clone()
        .oneshot(post(
            "/api/reunions?action=add",
            json!({"type_reunion": "generale", "date_reunion": "2026-09-01"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], json!("Réunion créée"));
    let reunion_id = body["reunion_id"].as_i64().unwrap();

    let response = app
        .oneshot(get(&format!(
            "/api/reunions?action=details_full&id={reunion_id}"
        )))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["stats"]["total"], json!(2));
    assert_eq!(body["stats"]["absents"], json!(2));
    assert_eq!(body["participation"], json!(0.0));
}

#[tokio::test]
async fn treasurer_dashboard_bootstraps_its_category() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(post(
            "/api/tresorier?action=add",
            json!({"type": "recette", "montant": 100000.0, "date_operation": "2026-02-01"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.oneshot(get("/api/tresorier")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body["data"]["categorie_id"].as_i64().unwrap() > 0);
    assert_eq!(body["data"]["stats"]["total_entrees"], json!(100000.0));
    assert_eq!(body["data"]["operations"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn dashboard_shape_depends_on_role() {
    let app = test_app().await;

    let response = app
        .clone()
        .oneshot(get("/api/dashboard?role=tresorier"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.get("tot_mensuelles").is_some());
    assert!(body.get("arriere_stats").is_some());
    assert!(body.get("mes_cotisations").is_none());

    let response = app.oneshot(get("/api/dashboard")).await.unwrap();
    let body = body_json(response).await;
    assert!(body.get("tot_mensuelles").is_none());
    assert_eq!(body["mes_cotisations"], json!(0.0));
}

#[tokio::test]
async fn unknown_role_gets_shared_fields_only() {
    let app = test_app().await;

    let response = app
        .oneshot(get("/api/dashboard?role=secretaire"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert!(body.get("arrieres").is_some());
    assert!(body.get("tot_dons").is_some());
    assert!(body.get("mes_cotisations").is_none());
    assert!(body.get("tot_mensuelles").is_none());
}

#[tokio::test]
async fn member_export_is_a_csv_download() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/exports/membres")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv; charset=utf-8"
    );
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=membres_"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.starts_with('\u{feff}'));
    assert!(text.contains("ID;Username;Nom"));
}

#[tokio::test]
async fn treasurer_export_requires_the_category() {
    let app = test_app().await;

    let response = app.oneshot(get("/api/exports/tresorier")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
