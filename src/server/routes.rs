//! Router assembly.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::state::AppState;
use super::{export, session, update};

/// Upload size limit for bulk update workbooks.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Build the application router with all endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/login", post(session::login))
        .route("/api/logout", post(session::logout))
        .route("/api/export", post(export::export))
        .route("/api/update", post(update::update))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// GET /health
///
/// Liveness probe; does not touch JIRA.
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::JiraClient;
    use crate::config::{AppConfig, AppCredentials, JiraConfig};
    use crate::flatten::Cell;
    use crate::sheet;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use axum::http::StatusCode;

    /// A server whose JIRA client points at a port nothing listens on, so
    /// every upstream call fails fast. Cookie persistence is on, matching a
    /// browser session.
    fn test_server() -> TestServer {
        let config = AppConfig {
            jira: JiraConfig {
                base_url: "http://localhost:1".to_string(),
                username: "svc-jira".to_string(),
                password: "secret".to_string(),
            },
            credentials: AppCredentials {
                username: "staff".to_string(),
                password: "hunter2".to_string(),
            },
            bind_addr: "127.0.0.1:0".parse().unwrap(),
        };
        let jira = JiraClient::new(&config.jira).unwrap();
        let app = build_router(AppState::new(config, jira));
        TestServer::builder().save_cookies().build(app).unwrap()
    }

    async fn login(server: &TestServer) {
        let response = server
            .post("/api/login")
            .json(&serde_json::json!({ "username": "staff", "password": "hunter2" }))
            .await;
        response.assert_status_ok();
    }

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[tokio::test]
    async fn test_health_is_open() {
        let server = test_server();
        server.get("/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn test_login_with_wrong_credentials_is_401() {
        let server = test_server();
        let response = server
            .post("/api/login")
            .json(&serde_json::json!({ "username": "staff", "password": "wrong" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.json::<serde_json::Value>()["message"],
            "Invalid credentials"
        );
    }

    #[tokio::test]
    async fn test_export_without_session_is_401() {
        let server = test_server();
        let response = server
            .post("/api/export")
            .json(&serde_json::json!({ "status": "Open" }))
            .await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_export_with_no_criteria_is_400() {
        let server = test_server();
        login(&server).await;

        let response = server.post("/api/export").json(&serde_json::json!({})).await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<serde_json::Value>()["message"],
            "no search criteria provided"
        );
    }

    #[tokio::test]
    async fn test_export_with_unreachable_jira_is_500() {
        let server = test_server();
        login(&server).await;

        let response = server
            .post("/api/export")
            .json(&serde_json::json!({ "status": "Open" }))
            .await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_update_without_field_is_400() {
        let server = test_server();
        login(&server).await;

        let workbook =
            sheet::encode_workbook(&headers(&["Issue Key", "Value"]), &[]).unwrap();
        let form = MultipartForm::new()
            .add_part("file", Part::bytes(workbook).file_name("update.xlsx"));

        let response = server.post("/api/update").multipart(form).await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_update_with_header_only_workbook_is_400() {
        let server = test_server();
        login(&server).await;

        let workbook =
            sheet::encode_workbook(&headers(&["Issue Key", "Value"]), &[]).unwrap();
        let form = MultipartForm::new()
            .add_text("jiraField", "T-Shirt Size")
            .add_part("file", Part::bytes(workbook).file_name("update.xlsx"));

        let response = server.post("/api/update").multipart(form).await;
        response.assert_status_bad_request();
        assert_eq!(
            response.json::<serde_json::Value>()["message"],
            "spreadsheet must contain at least 2 rows (header + data)"
        );
    }

    #[tokio::test]
    async fn test_update_tallies_unreachable_rows_as_failed() {
        let server = test_server();
        login(&server).await;

        let rows = vec![
            vec![Cell::from("PROJ-1"), Cell::from("M")],
            vec![Cell::from(""), Cell::from("L")],
        ];
        let workbook =
            sheet::encode_workbook(&headers(&["Issue Key", "Value"]), &rows).unwrap();
        let form = MultipartForm::new()
            .add_text("jiraField", "customfield_10500")
            .add_part("file", Part::bytes(workbook).file_name("update.xlsx"));

        let response = server.post("/api/update").multipart(form).await;
        response.assert_status_ok();

        // Row 1 reaches the (unreachable) JIRA and fails; row 2 is skipped.
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["totalRows"], 2);
        assert_eq!(body["updated"], 0);
        assert_eq!(body["failed"], 2);
    }

    #[tokio::test]
    async fn test_logout_clears_the_session() {
        let server = test_server();
        login(&server).await;
        server.post("/api/logout").await.assert_status_ok();

        let response = server.post("/api/export").json(&serde_json::json!({})).await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
