//! API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. Audit logger → 2. Cache-Control: no-store

use std::sync::Arc;

use axum::http::header::{HeaderValue, CACHE_CONTROL};
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router.
///
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/medicines", get(endpoints::medicines::list))
        .route("/scan", post(endpoints::scan::scan))
        .route("/accounts", get(endpoints::accounts::list))
        .route(
            "/accounts/:phone",
            put(endpoints::accounts::save).get(endpoints::accounts::get),
        )
        .route(
            "/accounts/:phone/profiles",
            post(endpoints::accounts::add_profile),
        )
        .route(
            "/session",
            get(endpoints::session::get)
                .put(endpoints::session::set)
                .delete(endpoints::session::clear),
        )
        .with_state(ctx)
        // Middleware stack (innermost first, outermost last):
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(axum::middleware::from_fn(middleware::audit::log_access));

    Router::new().nest("/api", routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::scanner::KnowledgeBase;

    /// Router over the bundled knowledge base and a temp database.
    /// The tempdir guard must be kept alive for the duration of the test.
    fn test_app() -> (Router, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let core = CoreState::new(
            KnowledgeBase::bundled().unwrap(),
            tmp.path().join("medsafe.db"),
        )
        .unwrap();
        (api_router(Arc::new(core)), tmp)
    }

    fn make_request(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn response_json(response: Response<Body>) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        app.clone()
            .oneshot(make_request(method, uri, body))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn health_response_shape() {
        let (app, _tmp) = test_app();
        let response = send(&app, "GET", "/api/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CACHE_CONTROL).unwrap(), "no-store");

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let (app, _tmp) = test_app();
        let response = send(&app, "GET", "/api/nonexistent", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn medicines_in_catalog_order() {
        let (app, _tmp) = test_app();
        let json = response_json(send(&app, "GET", "/api/medicines", None).await).await;
        let names: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["name"].as_str().unwrap())
            .collect();
        assert_eq!(names.len(), 8);
        assert_eq!(names[0], "Paracetamol");
    }

    #[tokio::test]
    async fn scan_returns_result_and_view() {
        let (app, _tmp) = test_app();
        let response = send(
            &app,
            "POST",
            "/api/scan",
            Some(serde_json::json!({"medicine_1": "Ibuprofen", "medicine_2": "Aspirin"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["result"]["risk_level"], "Unsafe");
        assert_eq!(json["result"]["findings"][0]["kind"], "interaction");
        assert_eq!(json["view"]["variant"], "danger");
        assert_eq!(json["view"]["summary"], "Analysis for Ibuprofen + Aspirin");
    }

    #[tokio::test]
    async fn scan_with_inline_form_profile() {
        let (app, _tmp) = test_app();
        let json = response_json(
            send(
                &app,
                "POST",
                "/api/scan",
                Some(serde_json::json!({
                    "medicine_1": "Cetirizine",
                    "medicine_2": "Amoxicillin",
                    "profile": {"stomach": "true", "pregnant": false, "allergies": "amoxicillin"}
                })),
            )
            .await,
        )
        .await;
        assert_eq!(json["result"]["risk_level"], "Unsafe");
        assert_eq!(
            json["view"]["findings"][0]["heading"],
            "Personal Warning (Allergy)"
        );
    }

    #[tokio::test]
    async fn scan_without_names_reports_unknowns() {
        let (app, _tmp) = test_app();
        let json = response_json(
            send(&app, "POST", "/api/scan", Some(serde_json::json!({}))).await,
        )
        .await;
        assert_eq!(json["result"]["risk_level"], "Safe");
        assert_eq!(json["result"]["findings"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn scan_rejects_malformed_body() {
        let (app, _tmp) = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/scan")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn account_profile_and_scan_by_reference() {
        let (app, _tmp) = test_app();

        let response = send(
            &app,
            "PUT",
            "/api/accounts/555-0100",
            Some(serde_json::json!({"name": "Dana", "email": "dana@example.com"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &app,
            "POST",
            "/api/accounts/555-0100/profiles",
            Some(serde_json::json!({"pregnant": "true", "age": "31"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let stored = response_json(response).await;
        assert_eq!(stored["pregnant"], true);
        let profile_id = stored["id"].as_str().unwrap().to_string();

        let account =
            response_json(send(&app, "GET", "/api/accounts/555-0100", None).await).await;
        assert_eq!(account["profiles"].as_array().unwrap().len(), 1);

        let json = response_json(
            send(
                &app,
                "POST",
                "/api/scan",
                Some(serde_json::json!({
                    "medicine_1": "Warfarin",
                    "medicine_2": "Cetirizine",
                    "profile_ref": {"phone": "555-0100", "profile_id": profile_id}
                })),
            )
            .await,
        )
        .await;
        assert_eq!(json["result"]["risk_level"], "Unsafe");
        assert_eq!(json["result"]["findings"][0]["reason"], "pregnancy");
    }

    #[tokio::test]
    async fn inline_profile_takes_precedence_over_reference() {
        let (app, _tmp) = test_app();
        let json = response_json(
            send(
                &app,
                "POST",
                "/api/scan",
                Some(serde_json::json!({
                    "medicine_1": "Cetirizine",
                    "medicine_2": "Amoxicillin",
                    "profile": {},
                    "profile_ref": {"phone": "nobody", "profile_id": uuid::Uuid::new_v4()}
                })),
            )
            .await,
        )
        .await;
        assert_eq!(json["result"]["risk_level"], "Safe");
    }

    #[tokio::test]
    async fn unresolved_profile_ref_returns_404() {
        let (app, _tmp) = test_app();
        let response = send(
            &app,
            "POST",
            "/api/scan",
            Some(serde_json::json!({
                "medicine_1": "Cetirizine",
                "medicine_2": "Amoxicillin",
                "profile_ref": {"phone": "nobody", "profile_id": uuid::Uuid::new_v4()}
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_account_returns_404() {
        let (app, _tmp) = test_app();
        let response = send(&app, "GET", "/api/accounts/missing", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &app,
            "POST",
            "/api/accounts/missing/profiles",
            Some(serde_json::json!({"pregnant": true})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_accounts_after_save() {
        let (app, _tmp) = test_app();
        send(
            &app,
            "PUT",
            "/api/accounts/1",
            Some(serde_json::json!({"name": "A", "email": "a@example.com"})),
        )
        .await;
        let json = response_json(send(&app, "GET", "/api/accounts", None).await).await;
        assert_eq!(json[0]["phone"], "1");
    }

    #[tokio::test]
    async fn session_lifecycle() {
        let (app, _tmp) = test_app();

        let empty = response_json(send(&app, "GET", "/api/session", None).await).await;
        assert!(empty["phone"].is_null());

        let response = send(
            &app,
            "PUT",
            "/api/session",
            Some(serde_json::json!({"phone": "555-0100"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "unknown account");

        send(
            &app,
            "PUT",
            "/api/accounts/555-0100",
            Some(serde_json::json!({"name": "Dana", "email": "dana@example.com"})),
        )
        .await;
        let session = response_json(
            send(
                &app,
                "PUT",
                "/api/session",
                Some(serde_json::json!({"phone": "555-0100"})),
            )
            .await,
        )
        .await;
        assert_eq!(session["phone"], "555-0100");
        assert!(session["profile_id"].is_null());

        let response = send(&app, "DELETE", "/api/session", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cleared = response_json(send(&app, "GET", "/api/session", None).await).await;
        assert!(cleared["phone"].is_null());
    }

    #[tokio::test]
    async fn session_rejects_foreign_profile() {
        let (app, _tmp) = test_app();
        send(
            &app,
            "PUT",
            "/api/accounts/1",
            Some(serde_json::json!({"name": "A", "email": "a@example.com"})),
        )
        .await;
        let response = send(
            &app,
            "PUT",
            "/api/session",
            Some(serde_json::json!({"phone": "1", "profile_id": uuid::Uuid::new_v4()})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn scan_accepts_null_conditions() {
        let (app, _tmp) = test_app();
        let response = send(
            &app,
            "POST",
            "/api/scan",
            Some(serde_json::json!({
                "medicine_1": "Ibuprofen",
                "medicine_2": "Cetirizine",
                "profile": {
                    "conditions": null,
                    "stomach": true,
                    "stomachSensitive": "true"
                }
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = response_json(response).await;
        assert_eq!(json["result"]["risk_level"], "Caution");
        assert_eq!(json["result"]["findings"][0]["reason"], "stomach_sensitivity");
    }

    #[tokio::test]
    async fn padded_phone_resolves_to_same_account() {
        let (app, _tmp) = test_app();
        let response = send(
            &app,
            "PUT",
            "/api/accounts/%20555",
            Some(serde_json::json!({"name": "Dana", "email": "dana@example.com"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await["phone"], "555");

        let response = send(&app, "GET", "/api/accounts/%20555", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &app,
            "POST",
            "/api/accounts/555%20/profiles",
            Some(serde_json::json!({"pregnant": true})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(
            &app,
            "PUT",
            "/api/session",
            Some(serde_json::json!({"phone": " 555 "})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response_json(response).await["phone"], "555");
    }
}
