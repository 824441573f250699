//! Local web server for the SurfSensei form.
//!
//! Endpoints:
//! - GET / - Single-page form
//! - GET /api/session/default - Default form values
//! - GET /api/status - Which requests are in flight
//! - POST /api/recommendation - Get a recommendation for a session
//! - POST /api/autofill - Fill live conditions into a session
//! - POST /api/feedback - Record a verdict on the last recommendation
//! - GET /api/feedback - Feedback history

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::error::{classify_message, ErrorHint, SurfError};
use crate::models::{Accuracy, FeedbackRecord, RecommendationOutcome, SessionInput};
use crate::shell::{Shell, ShellStatus};

// === Request/Response Types ===

#[derive(Debug, Deserialize)]
pub struct AutofillRequest {
    pub session: SessionInput,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub accuracy: Accuracy,
    #[serde(default)]
    pub comments: String,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub acknowledged: bool,
}

/// Error body returned to the page.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    /// `config`, `connectivity` or `other`.
    pub hint: &'static str,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, message: String, hint: ErrorHint) -> Self {
        let hint = match hint {
            ErrorHint::Config => "config",
            ErrorHint::Connectivity => "connectivity",
            ErrorHint::Other => "other",
        };
        Self {
            status,
            body: ErrorBody {
                error: message,
                hint,
            },
        }
    }

    /// Map a failed recommendation to the message the user sees.
    fn recommendation(err: &SurfError) -> Self {
        let hint = classify_message(&err.to_string());
        Self::new(status_for(err), err.recommendation_message(), hint)
    }
}

impl From<SurfError> for ApiError {
    fn from(err: SurfError) -> Self {
        let hint = classify_message(&err.to_string());
        Self::new(status_for(&err), err.to_string(), hint)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text(), ErrorHint::Other)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn status_for(err: &SurfError) -> StatusCode {
    match err {
        SurfError::Busy(_) => StatusCode::CONFLICT,
        SurfError::MissingComment => StatusCode::UNPROCESSABLE_ENTITY,
        SurfError::MissingSpots | SurfError::MissingApiKey => StatusCode::BAD_REQUEST,
        SurfError::EmptyResponse
        | SurfError::Transport(_)
        | SurfError::InvalidAutofillFormat(_)
        | SurfError::AutofillFailed(_) => StatusCode::BAD_GATEWAY,
        SurfError::ParseFailure | SurfError::PersistenceDegraded(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

// === Server Lifecycle ===

pub fn router(shell: Arc<Shell>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/session/default", get(default_session))
        .route("/api/status", get(status))
        .route("/api/recommendation", post(recommend))
        .route("/api/autofill", post(autofill))
        .route("/api/feedback", get(history).post(submit_feedback))
        .layer(CorsLayer::permissive())
        .with_state(shell)
}

/// Start the server.
pub async fn start_server(shell: Shell, port: u16, open_browser: bool) -> Result<()> {
    let app = router(Arc::new(shell));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("SurfSensei server starting on http://{addr}");
    println!("SurfSensei running at http://{addr}");

    if open_browser {
        let _ = open::that(format!("http://{addr}"));
    }

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

// === Handlers ===

async fn index_handler() -> Html<&'static str> {
    Html(include_str!("ui.html"))
}

async fn default_session() -> Json<SessionInput> {
    Json(SessionInput::default())
}

async fn status(State(shell): State<Arc<Shell>>) -> Json<ShellStatus> {
    Json(shell.status())
}

async fn recommend(
    State(shell): State<Arc<Shell>>,
    payload: Result<Json<SessionInput>, JsonRejection>,
) -> Result<Json<RecommendationOutcome>, ApiError> {
    let Json(input) = payload?;
    shell
        .recommend(&input)
        .await
        .map(Json)
        .map_err(|e| ApiError::recommendation(&e))
}

async fn autofill(
    State(shell): State<Arc<Shell>>,
    payload: Result<Json<AutofillRequest>, JsonRejection>,
) -> Result<Json<SessionInput>, ApiError> {
    let Json(req) = payload?;
    let mut session = req.session;
    shell.autofill(&mut session).await?;
    Ok(Json(session))
}

async fn submit_feedback(
    State(shell): State<Arc<Shell>>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let Json(req) = payload?;
    shell.submit_feedback(req.accuracy, &req.comments)?;
    Ok(Json(FeedbackResponse { acknowledged: true }))
}

async fn history(State(shell): State<Arc<Shell>>) -> Json<Vec<FeedbackRecord>> {
    Json(shell.history())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::error::RequestKind;
    use crate::gemini::ModelClient;
    use crate::store::MemoryStore;

    struct SilentModel;

    #[async_trait]
    impl ModelClient for SilentModel {
        async fn generate(&self, _: &str, _: &str) -> Result<String, SurfError> {
            Err(SurfError::EmptyResponse)
        }

        async fn generate_with_search(&self, _: &str) -> Result<String, SurfError> {
            Err(SurfError::EmptyResponse)
        }
    }

    /// Serve the router on an ephemeral port and return its base URL.
    async fn spawn_app() -> String {
        let shell = Shell::new(Arc::new(SilentModel), Arc::new(MemoryStore::default()));
        let app = router(Arc::new(shell));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn busy_maps_to_conflict() {
        let err = ApiError::from(SurfError::Busy(RequestKind::Autofill));
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[test]
    fn validation_errors() {
        assert_eq!(
            ApiError::from(SurfError::MissingComment).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        let err = ApiError::from(SurfError::MissingSpots);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.error, "Please enter a spot name first.");
    }

    #[test]
    fn missing_key_is_a_config_problem() {
        let err = ApiError::from(SurfError::MissingApiKey);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body.hint, "config");
    }

    #[test]
    fn recommendation_errors_carry_display_hint() {
        let err = ApiError::recommendation(&SurfError::Transport(
            "Gemini API returned 400 Bad Request: API key not valid".into(),
        ));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.body.hint, "config");
        assert_eq!(
            err.body.error,
            "Failed to get recommendation. Please check your API key configuration."
        );

        let err = ApiError::recommendation(&SurfError::Transport("Network error: refused".into()));
        assert_eq!(err.body.hint, "connectivity");
    }

    #[test]
    fn autofill_failure_has_single_message() {
        let err = ApiError::from(SurfError::AutofillFailed(Box::new(SurfError::EmptyResponse)));
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            err.body.error,
            "Could not auto-fill conditions. Please enter them manually."
        );
    }

    #[tokio::test]
    async fn feedback_endpoint_validates_and_acknowledges() {
        let base = spawn_app().await;
        let client = reqwest::Client::new();

        let resp = client
            .post(format!("{base}/api/feedback"))
            .json(&json!({"accuracy": "inaccurate", "comments": "  "}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 422);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(
            body["error"],
            "A comment is required when marking a forecast inaccurate."
        );

        let resp = client
            .post(format!("{base}/api/feedback"))
            .json(&json!({"accuracy": "accurate"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body, json!({"acknowledged": true}));

        let history: Value = client
            .get(format!("{base}/api/feedback"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(history.as_array().unwrap().len(), 1);
        assert_eq!(history[0]["accuracy"], "accurate");
    }

    #[tokio::test]
    async fn malformed_body_gets_json_error() {
        let base = spawn_app().await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/api/recommendation"))
            .header("content-type", "application/json")
            .body(r#"{"spots": "#)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status().as_u16(), 400);
        let body: Value = resp.json().await.unwrap();
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert_eq!(body["hint"], "other");
    }

    #[tokio::test]
    async fn recommendation_failure_maps_to_bad_gateway() {
        let base = spawn_app().await;
        let resp = reqwest::Client::new()
            .post(format!("{base}/api/recommendation"))
            .json(&json!({"spots": "Rincon"}))
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status().as_u16(), 502);
        let body: Value = resp.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("empty response"));
    }

    #[test]
    fn page_drops_stale_result_when_resubmitting() {
        let page = include_str!("ui.html");
        let submit = page
            .split("$('session-form').addEventListener('submit'")
            .nth(1)
            .unwrap();
        let reset = submit
            .find("for (const id of ['result', 'feedback-form', 'thanks']) $(id).classList.add('hidden');")
            .unwrap();
        let request = submit.find("await api('/api/recommendation'").unwrap();
        assert!(reset < request);
    }

    #[test]
    fn page_tolerates_non_json_error_bodies() {
        let page = include_str!("ui.html");
        assert!(page.contains("const text = await res.text();"));
        assert!(!page.contains("await res.json()"));
    }

    #[test]
    fn feedback_request_comments_default_to_empty() {
        let req: FeedbackRequest = serde_json::from_str(r#"{"accuracy":"accurate"}"#).unwrap();
        assert_eq!(req.accuracy, Accuracy::Accurate);
        assert!(req.comments.is_empty());
    }
}
