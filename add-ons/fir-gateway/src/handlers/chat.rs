//! Chatbot handlers: route the query through `ChatAssistant` and record the exchange in
//! the user's history when the caller identifies itself.

use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;

/// Latest exchanges returned by the history endpoint.
const HISTORY_LIMIT: usize = 50;

#[derive(serde::Deserialize)]
pub(crate) struct ChatQuery {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    user_id: Option<String>,
}

type ApiError = (StatusCode, axum::Json<serde_json::Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, axum::Json(serde_json::json!({ "error": message.into() })))
}

/// POST /chatbot/api/query – answers a free-text chat query.
pub(crate) async fn chat_query(
    State(state): State<AppState>,
    body: Result<Json<ChatQuery>, JsonRejection>,
) -> Result<axum::Json<fir_core::ChatReply>, ApiError> {
    let Json(req) = body.map_err(|e| {
        tracing::warn!(target: "fir::gateway", error = %e, "Rejected chatbot request body");
        api_error(StatusCode::BAD_REQUEST, "No query provided")
    })?;
    let query = req
        .query
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No query provided"))?;
    let query = query.trim();
    if query.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Empty query"));
    }
    tracing::info!(target: "fir::gateway", query_len = query.chars().count(), "Chatbot query received");

    let reply = state.assistant.respond(query);

    if let Some(user_id) = req.user_id.as_deref().filter(|s| !s.trim().is_empty()) {
        if let Err(e) = state.history.append(user_id, query, &reply.text) {
            tracing::warn!(target: "fir::gateway", user_id, error = %e, "Failed to record chat history");
        }
    }
    Ok(axum::Json(reply))
}

/// GET /chatbot/api/history/:user_id – the user's latest exchanges, oldest first.
pub(crate) async fn chat_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<axum::Json<serde_json::Value>, ApiError> {
    let history = state.history.recent(&user_id, HISTORY_LIMIT).map_err(|e| {
        tracing::error!(target: "fir::gateway", user_id = %user_id, error = %e, "History read failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(axum::Json(serde_json::json!({ "history": history })))
}

/// DELETE /chatbot/api/history/:user_id – forgets the user's exchanges.
pub(crate) async fn clear_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<axum::Json<serde_json::Value>, ApiError> {
    let removed = state.history.clear(&user_id).map_err(|e| {
        tracing::error!(target: "fir::gateway", user_id = %user_id, error = %e, "History clear failed");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;
    Ok(axum::Json(serde_json::json!({ "removed": removed })))
}

/// GET /chatbot/api/test – liveness probe used by the chat UI.
pub(crate) async fn chat_test() -> axum::Json<serde_json::Value> {
    tracing::info!(target: "fir::gateway", "Chatbot test endpoint called");
    axum::Json(serde_json::json!({
        "status": "success",
        "message": "API is working",
        "time": chrono::Local::now().to_rfc3339(),
    }))
}
