use axum::{extract::State, Json};
use salon_types::api::{MasterResponse, ServiceResponse};
use serde::Deserialize;

use crate::middleware::AppState;
use crate::response::{self, ApiError};

/// Lists every active service.
pub async fn list_services(State(state): State<AppState>) -> Result<Json<Vec<ServiceResponse>>, ApiError> {
    let services = state.orchestrator.list_services().await.map_err(response::from_app_error)?;
    Ok(Json(services))
}

#[derive(Debug, Deserialize)]
pub struct ListMastersQuery {
    /// Comma-separated service ids a master must offer ALL of.
    pub service_ids: String,
}

/// Lists masters that offer every requested service.
pub async fn list_masters(
    State(state): State<AppState>,
    axum::extract::Query(query): axum::extract::Query<ListMastersQuery>,
) -> Result<Json<Vec<MasterResponse>>, ApiError> {
    let ids: Vec<String> = query.service_ids.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect();
    let masters = state.orchestrator.list_masters_for_services(&ids).await.map_err(response::from_app_error)?;
    Ok(Json(masters))
}
