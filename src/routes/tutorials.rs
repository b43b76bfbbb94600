//! Tutorial JSON API.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::error_response;
use crate::services::tutorial;
use crate::state::{AppState, SubmitError, Tutorial};

#[derive(Deserialize)]
pub struct SubmitBody {
    #[serde(default)]
    pub topic: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialListResponse {
    pub tutorials: Vec<Tutorial>,
    pub selected_id: Option<Uuid>,
    pub is_busy: bool,
}

pub(crate) fn submit_error_to_status(err: SubmitError) -> StatusCode {
    match err {
        SubmitError::EmptyTopic => StatusCode::BAD_REQUEST,
        SubmitError::InFlight => StatusCode::CONFLICT,
    }
}

/// `GET /api/tutorials`: all records, newest first, plus the selection.
pub async fn list_tutorials(State(state): State<AppState>) -> Json<TutorialListResponse> {
    let store = state.tutorials.read().await;
    Json(TutorialListResponse {
        tutorials: store.tutorials().to_vec(),
        selected_id: store.selected_id(),
        is_busy: store.is_busy(),
    })
}

/// `POST /api/tutorials`: submit a topic; answers with the pending record.
pub async fn create_tutorial(State(state): State<AppState>, Json(body): Json<SubmitBody>) -> Response {
    match tutorial::submit(&state, &body.topic).await {
        Ok(record) => (StatusCode::ACCEPTED, Json(record)).into_response(),
        Err(e) => error_response(submit_error_to_status(e), &e),
    }
}

/// `GET /api/tutorials/{id}`: one record.
pub async fn get_tutorial(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Tutorial>, StatusCode> {
    let store = state.tutorials.read().await;
    store
        .get(id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// `POST /api/tutorials/{id}/select`: move the selection pointer.
pub async fn select_tutorial(State(state): State<AppState>, Path(id): Path<Uuid>) -> StatusCode {
    let mut store = state.tutorials.write().await;
    if store.select(id) { StatusCode::NO_CONTENT } else { StatusCode::NOT_FOUND }
}

#[cfg(test)]
#[path = "tutorials_test.rs"]
mod tests;
