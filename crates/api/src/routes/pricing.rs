use axum::{
    extract::{Query, State},
    Json,
};
use salon_types::api::{PriceQuoteQuery, PriceQuoteResponse};
use validator::Validate;

use crate::middleware::AppState;
use crate::response::{self, ApiError};

/// Quotes the original/final price for a service selection under a given
/// payment method.
pub async fn price_quote(State(state): State<AppState>, Query(query): Query<PriceQuoteQuery>) -> Result<Json<PriceQuoteResponse>, ApiError> {
    query.validate().map_err(|e| response::bad_request(e.to_string()))?;
    let quote = state
        .orchestrator
        .price_quote(&query.service_ids, query.payment_method, query.master_id)
        .await
        .map_err(response::from_app_error)?;
    Ok(Json(quote))
}
