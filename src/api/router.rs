//! Screen API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Layers (outermost → innermost): CORS → access log → handler.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the screen API router.
pub fn screen_api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/home", get(endpoints::home::feed))
        .route("/doctor/catalog", get(endpoints::doctor::catalog))
        .route("/doctor/sessions", post(endpoints::doctor::open))
        .route(
            "/doctor/sessions/:id",
            get(endpoints::doctor::view).delete(endpoints::doctor::close),
        )
        .route(
            "/doctor/sessions/:id/actions",
            post(endpoints::doctor::apply),
        )
        .route(
            "/doctor/sessions/:id/submit",
            post(endpoints::doctor::submit),
        )
        .route("/profile", get(endpoints::profile::view))
        .route("/profile/actions", post(endpoints::profile::apply))
        .with_state(ctx);

    // The web view is served from its own origin (capacitor://, http://localhost).
    Router::new()
        .nest("/api", api)
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tokio::sync::Notify;
    use tower::ServiceExt;

    use super::*;
    use crate::prediction::{MockPredictionClient, PredictionError, PredictionResponse};

    fn test_core_state(client: MockPredictionClient) -> (Arc<CoreState>, Arc<MockPredictionClient>) {
        let client = Arc::new(client);
        (Arc::new(CoreState::new(client.clone())), client)
    }

    fn default_core() -> Arc<CoreState> {
        test_core_state(MockPredictionClient::new(PredictionResponse::default())).0
    }

    fn make_request(method: &str, uri: &str, body: Option<&str>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn response_json(response: axum::http::Response<Body>) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 65536)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn send(core: &Arc<CoreState>, req: Request<Body>) -> axum::http::Response<Body> {
        screen_api_router(core.clone()).oneshot(req).await.unwrap()
    }

    async fn open_session(core: &Arc<CoreState>) -> String {
        let response = send(core, make_request("POST", "/api/doctor/sessions", None)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = response_json(response).await;
        json["session_id"].as_str().unwrap().to_string()
    }

    async fn act(core: &Arc<CoreState>, id: &str, action: &str) -> serde_json::Value {
        let uri = format!("/api/doctor/sessions/{id}/actions");
        let response = send(core, make_request("POST", &uri, Some(action))).await;
        assert_eq!(response.status(), StatusCode::OK, "action {action}");
        response_json(response).await
    }

    async fn fill_malaria_form(core: &Arc<CoreState>, id: &str) -> serde_json::Value {
        act(core, id, r#"{"action":"select_disease","disease":"Malaria"}"#).await;
        act(core, id, r#"{"action":"toggle_symptom","label":"Fever"}"#).await;
        act(core, id, r#"{"action":"set_age","value":"30"}"#).await;
        act(core, id, r#"{"action":"set_weight","value":"70"}"#).await;
        act(core, id, r#"{"action":"set_region","region":"Haiti"}"#).await;
        act(core, id, r#"{"action":"set_gender","gender":"Female"}"#).await
    }

    #[tokio::test]
    async fn health_response_shape() {
        let core = default_core();
        let response = send(&core, make_request("GET", "/api/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["app"], "eMedic");
        assert_eq!(json["open_sessions"], 0);
        assert!(!json["version"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn home_response_shape() {
        let core = default_core();
        let response = send(&core, make_request("GET", "/api/home", None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["title"], "Welcome to eMedic");
        assert_eq!(json["cards"].as_array().unwrap().len(), 5);
        assert_eq!(json["quick_links"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn catalog_lists_three_diseases() {
        let core = default_core();
        let response = send(&core, make_request("GET", "/api/doctor/catalog", None)).await;
        let json = response_json(response).await;
        assert_eq!(json[0]["disease"], "Malaria");
        assert_eq!(json[1]["symptoms"][2], "Body Aches");
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let core = default_core();
        let response = send(&core, make_request("GET", "/api/nonexistent", None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn new_session_view_is_empty() {
        let core = default_core();
        let response = send(&core, make_request("POST", "/api/doctor/sessions", None)).await;
        let json = response_json(response).await;
        assert!(json["opened_at"].is_string());
        assert!(json["view"]["selected_disease"].is_null());
        assert_eq!(json["view"]["symptoms"].as_array().unwrap().len(), 0);
        assert_eq!(json["view"]["can_submit"], false);
        assert_eq!(json["view"]["phase"], "idle");
        assert_eq!(json["view"]["patient"]["region"], "Sub-Saharan Africa");
    }

    #[tokio::test]
    async fn actions_drive_the_view() {
        let core = default_core();
        let id = open_session(&core).await;

        let view = fill_malaria_form(&core, &id).await;
        assert_eq!(view["selected_disease"], "Malaria");
        assert_eq!(view["symptoms"].as_array().unwrap().len(), 15);
        assert_eq!(view["symptoms"][0]["label"], "Fever");
        assert_eq!(view["symptoms"][0]["checked"], true);
        assert_eq!(view["can_submit"], true);
        assert_eq!(view["submit_label"], "Predict Treatment");

        let uri = format!("/api/doctor/sessions/{id}");
        let response = send(&core, make_request("GET", &uri, None)).await;
        let json = response_json(response).await;
        assert_eq!(json["patient"]["gender"], "Female");
    }

    #[tokio::test]
    async fn unknown_disease_is_rejected() {
        let core = default_core();
        let id = open_session(&core).await;
        let uri = format!("/api/doctor/sessions/{id}/actions");
        let response = send(
            &core,
            make_request("POST", &uri, Some(r#"{"action":"select_disease","disease":"Cholera"}"#)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(json["error"]["message"].as_str().unwrap().contains("Cholera"));
    }

    #[tokio::test]
    async fn malformed_profile_action_returns_400() {
        let core = default_core();
        for body in [r#"{"action":"fly"}"#, "not json"] {
            let response =
                send(&core, make_request("POST", "/api/profile/actions", Some(body))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
            let json = response_json(response).await;
            assert_eq!(json["error"]["code"], "BAD_REQUEST");
        }

        let response = send(&core, make_request("POST", "/api/profile/actions", None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_session_returns_404() {
        let core = default_core();
        let uri = format!("/api/doctor/sessions/{}", uuid::Uuid::new_v4());
        let response = send(&core, make_request("GET", &uri, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn malformed_session_id_returns_400() {
        let core = default_core();
        let response = send(&core, make_request("GET", "/api/doctor/sessions/not-a-uuid", None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn submit_incomplete_form_returns_409() {
        let core = default_core();
        let id = open_session(&core).await;
        let uri = format!("/api/doctor/sessions/{id}/submit");
        let response = send(&core, make_request("POST", &uri, None)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = response_json(response).await;
        assert_eq!(json["error"]["code"], "SUBMIT_DISABLED");
    }

    #[tokio::test]
    async fn submit_success_returns_result_lines() {
        let (core, client) = test_core_state(MockPredictionClient::new(PredictionResponse {
            selected_disease: Some("Malaria".into()),
            recommended_drug: Some("Artemether-Lumefantrine".into()),
            dosage: Some("20/120mg".into()),
            tip: Some("Rest".into()),
            ..Default::default()
        }));
        let id = open_session(&core).await;
        fill_malaria_form(&core, &id).await;

        let uri = format!("/api/doctor/sessions/{id}/submit");
        let response = send(&core, make_request("POST", &uri, None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["phase"], "succeeded");
        assert_eq!(json["diagnosis"]["recommended_drug"], "Artemether-Lumefantrine");
        assert_eq!(json["diagnosis"]["tablets_per_day"], 0.0);
        assert!(json["diagnosis"]["adjustment_message"].is_null());
        assert_eq!(json["result_lines"].as_array().unwrap().len(), 4);
        assert!(json["error"].is_null());

        let sent = client.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].disease, "Malaria");
        assert_eq!(sent[0].age, 30);
    }

    #[tokio::test]
    async fn submit_transport_failure_lands_in_view() {
        let (core, _) = test_core_state(MockPredictionClient::failing(
            PredictionError::Connection("http://localhost:5000/predict".into()),
        ));
        let id = open_session(&core).await;
        fill_malaria_form(&core, &id).await;

        let uri = format!("/api/doctor/sessions/{id}/submit");
        let response = send(&core, make_request("POST", &uri, None)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["phase"], "failed");
        assert_eq!(json["error"], "Failed to fetch diagnosis");
        assert!(json["diagnosis"].is_null());
    }

    #[tokio::test]
    async fn duplicate_submit_while_pending_returns_409() {
        let gate = Arc::new(Notify::new());
        let (core, client) = test_core_state(
            MockPredictionClient::new(PredictionResponse::default()).with_gate(gate.clone()),
        );
        let id = open_session(&core).await;
        fill_malaria_form(&core, &id).await;

        let uri = format!("/api/doctor/sessions/{id}/submit");
        let first = {
            let core = core.clone();
            let uri = uri.clone();
            tokio::spawn(async move { send(&core, make_request("POST", &uri, None)).await })
        };

        // Wait until the first request has reached the prediction client.
        while client.requests().is_empty() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let view_uri = format!("/api/doctor/sessions/{id}");
        let pending = response_json(send(&core, make_request("GET", &view_uri, None)).await).await;
        assert_eq!(pending["loading"], true);
        assert_eq!(pending["submit_label"], "Diagnosing...");

        let second = send(&core, make_request("POST", &uri, None)).await;
        assert_eq!(second.status(), StatusCode::CONFLICT);

        gate.notify_one();
        let first = first.await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn dropped_submit_request_leaves_session_usable() {
        let gate = Arc::new(Notify::new());
        let (core, client) = test_core_state(
            MockPredictionClient::new(PredictionResponse {
                selected_disease: Some("Malaria".into()),
                ..Default::default()
            })
            .with_gate(gate.clone()),
        );
        let id = open_session(&core).await;
        fill_malaria_form(&core, &id).await;

        // The web view goes away before the service answers.
        let uri = format!("/api/doctor/sessions/{id}/submit");
        let dropped = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            send(&core, make_request("POST", &uri, None)),
        )
        .await;
        assert!(dropped.is_err());

        gate.notify_one();
        let view_uri = format!("/api/doctor/sessions/{id}");
        let mut view = serde_json::Value::Null;
        for _ in 0..200 {
            view = response_json(send(&core, make_request("GET", &view_uri, None)).await).await;
            if view["loading"] == false {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        assert_eq!(view["phase"], "succeeded");
        assert_eq!(view["can_submit"], true);

        gate.notify_one();
        let resubmit = send(&core, make_request("POST", &uri, None)).await;
        assert_eq!(resubmit.status(), StatusCode::OK);
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn closing_session_while_pending_discards_result() {
        let gate = Arc::new(Notify::new());
        let (core, client) = test_core_state(
            MockPredictionClient::new(PredictionResponse::default()).with_gate(gate.clone()),
        );
        let id = open_session(&core).await;
        fill_malaria_form(&core, &id).await;

        let uri = format!("/api/doctor/sessions/{id}/submit");
        let pending = {
            let core = core.clone();
            tokio::spawn(async move { send(&core, make_request("POST", &uri, None)).await })
        };
        while client.requests().is_empty() {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        let close_uri = format!("/api/doctor/sessions/{id}");
        let closed = send(&core, make_request("DELETE", &close_uri, None)).await;
        assert_eq!(closed.status(), StatusCode::NO_CONTENT);

        gate.notify_one();
        let response = pending.await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(core.doctor_session_count(), 0);
    }

    #[tokio::test]
    async fn profile_edit_and_save() {
        let core = default_core();

        let response = send(&core, make_request("GET", "/api/profile", None)).await;
        let json = response_json(response).await;
        assert_eq!(json["user"]["name"], "John Doe");
        assert_eq!(json["notifications_enabled"], true);

        for action in [
            r#"{"action":"toggle_edit"}"#,
            r#"{"action":"update_field","field":"name","value":"Ada Obi"}"#,
            r#"{"action":"set_new_health_entry","text":" Asthma "}"#,
            r#"{"action":"add_health_entry"}"#,
            r#"{"action":"toggle_edit"}"#,
        ] {
            let response =
                send(&core, make_request("POST", "/api/profile/actions", Some(action))).await;
            assert_eq!(response.status(), StatusCode::OK, "action {action}");
        }

        let json = response_json(send(&core, make_request("GET", "/api/profile", None)).await).await;
        assert_eq!(json["editing"], false);
        assert_eq!(json["user"]["name"], "Ada Obi");
        assert_eq!(json["user"]["health_history"][1], "Asthma");
        assert_eq!(json["edit_button_label"], "Edit Profile");
    }

    #[tokio::test]
    async fn cors_preflight_is_answered() {
        let core = default_core();
        let req = Request::builder()
            .method("OPTIONS")
            .uri("/api/doctor/sessions")
            .header("Origin", "capacitor://localhost")
            .header("Access-Control-Request-Method", "POST")
            .body(Body::empty())
            .unwrap();
        let response = send(&core, req).await;
        assert!(response.status().is_success());
        assert!(response.headers().contains_key("access-control-allow-origin"));
    }
}
