//! HTTP request handlers

use super::state::AppState;
use crate::resolver::{Answer, Outcome, Question};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::time::Instant;

/// Answer payload for `/api/ask`
#[derive(Debug, Serialize)]
pub struct AskResponse {
    #[serde(flatten)]
    pub answer: Answer,
    pub status: Outcome,
}

/// Error payload for rejected requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
}

/// Template context for the home page
#[derive(Debug, Serialize)]
struct IndexPage<'a> {
    instance_name: &'a str,
    version: &'a str,
}

/// Home page handler
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let page = IndexPage {
        instance_name: state.instance_name(),
        version: crate::VERSION,
    };

    match state.templates.render("index.html", &page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
        }
    }
}

/// Question handler
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let question = match payload {
        Ok(Json(body)) => body
            .get("question")
            .and_then(|q| q.as_str())
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(Question::from),
        Err(rejection) => {
            tracing::debug!("Rejected /api/ask body: {}", rejection);
            None
        }
    };

    let Some(question) = question else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Invalid question input.",
            }),
        )
            .into_response();
    };

    let start = Instant::now();
    let (answer, status) = match state.resolver.try_resolve(&question).await {
        Ok(answer) => (answer, Outcome::Answered),
        Err(e) => {
            let outcome = e.outcome();
            (Answer::from(e), outcome)
        }
    };
    state.metrics.record(status, start.elapsed());

    Json(AskResponse { answer, status }).into_response()
}

/// Stats handler
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.snapshot())
}

/// Health check handler
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION
    }))
}
