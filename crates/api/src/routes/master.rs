use axum::{
    extract::{Path, Query, State},
    Json,
};
use salon_types::api::{AddClientNoteRequest, BookingResponse};
use serde::{Deserialize, Serialize};
use validator::Validate;
use utoipa::ToSchema;

use crate::middleware::{AppState, AuthCaller};
use crate::response::{self, ApiError};

/// Marks a booking attended.
pub async fn mark_done(
    AuthCaller(caller): AuthCaller,
    State(state): State<AppState>,
    Path((_master_id, id)): Path<(i64, i64)>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.orchestrator.mark_done(&caller, id).await.map_err(response::from_app_error)?;
    Ok(Json(booking))
}

/// Marks a booking a no-show.
pub async fn mark_no_show(
    AuthCaller(caller): AuthCaller,
    State(state): State<AppState>,
    Path((_master_id, id)): Path<(i64, i64)>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.orchestrator.mark_no_show(&caller, id).await.map_err(response::from_app_error)?;
    Ok(Json(booking))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_history_limit")]
    pub limit: i64,
}

fn default_history_limit() -> i64 {
    50
}

/// Full booking history for a client, restricted to the assigned master or
/// an admin.
pub async fn client_history(
    AuthCaller(caller): AuthCaller,
    State(state): State<AppState>,
    Path((_master_id, user_id)): Path<(i64, i64)>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<BookingResponse>>, ApiError> {
    let history = state.orchestrator.list_client_history(&caller, user_id, query.limit).await.map_err(response::from_app_error)?;
    Ok(Json(history))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClientNoteResponse {
    pub note: Option<String>,
}

/// Reads a master's private note about a client.
pub async fn get_client_note(
    AuthCaller(caller): AuthCaller,
    State(state): State<AppState>,
    Path((master_id, user_id)): Path<(i64, i64)>,
) -> Result<Json<ClientNoteResponse>, ApiError> {
    let note = state.orchestrator.get_client_note(&caller, master_id, user_id).await.map_err(response::from_app_error)?;
    Ok(Json(ClientNoteResponse { note }))
}

/// Writes a master's private note about a client.
pub async fn put_client_note(
    AuthCaller(caller): AuthCaller,
    State(state): State<AppState>,
    Path((master_id, user_id)): Path<(i64, i64)>,
    Json(payload): Json<AddClientNoteRequest>,
) -> Result<(), ApiError> {
    payload.validate().map_err(|e| response::bad_request(e.to_string()))?;
    state.orchestrator.add_client_note(&caller, master_id, user_id, &payload.note).await.map_err(response::from_app_error)
}
