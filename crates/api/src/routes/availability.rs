use axum::{
    extract::{Query, State},
    Json,
};
use salon_types::api::{AvailableDaysQuery, AvailableDaysResponse, AvailableSlotsQuery, AvailableSlotsResponse};
use validator::Validate;

use crate::middleware::AppState;
use crate::response::{self, ApiError};

/// Days within a calendar month that have at least one open slot.
pub async fn available_days(
    State(state): State<AppState>,
    Query(query): Query<AvailableDaysQuery>,
) -> Result<Json<AvailableDaysResponse>, ApiError> {
    query.validate().map_err(|e| response::bad_request(e.to_string()))?;
    let days = state
        .orchestrator
        .available_days(query.master_id, query.year, query.month, &query.service_ids)
        .await
        .map_err(response::from_app_error)?;
    Ok(Json(AvailableDaysResponse { days }))
}

/// Local `HH:MM` start times open on a given day.
pub async fn available_slots(
    State(state): State<AppState>,
    Query(query): Query<AvailableSlotsQuery>,
) -> Result<Json<AvailableSlotsResponse>, ApiError> {
    query.validate().map_err(|e| response::bad_request(e.to_string()))?;
    let slots = state
        .orchestrator
        .available_slots(query.master_id, query.date, &query.service_ids)
        .await
        .map_err(response::from_app_error)?;
    Ok(Json(AvailableSlotsResponse { slots }))
}
