use axum::{
    extract::{Path, Query, State},
    Json,
};
use salon_types::api::{
    BookingResponse, ConfirmPaymentRequest, CreateBookingRequest, CreateInvoiceResponse, FinalizeRequest, HoldRequest,
    ListBookingsQuery, PaginatedBookings, RateRequest, RescheduleRequest,
};
use validator::Validate;

use crate::middleware::{AppState, AuthCaller};
use crate::response::{self, ApiError};

/// Places a hold on a slot.
pub async fn hold(
    AuthCaller(caller): AuthCaller,
    State(state): State<AppState>,
    Json(payload): Json<HoldRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    payload.validate().map_err(|e| response::bad_request(e.to_string()))?;
    let booking = state
        .orchestrator
        .hold(caller.user_id, &payload.service_ids, payload.starts_at, payload.master_id, payload.payment_method)
        .await
        .map_err(response::from_app_error)?;
    Ok(Json(booking))
}

/// Holds and finalizes in one call.
pub async fn book(
    AuthCaller(caller): AuthCaller,
    State(state): State<AppState>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    payload.validate().map_err(|e| response::bad_request(e.to_string()))?;
    let booking = state
        .orchestrator
        .create_booking(caller.user_id, &payload.service_ids, payload.starts_at, payload.master_id, payload.payment_method)
        .await
        .map_err(response::from_app_error)?;
    Ok(Json(booking))
}

/// Confirms a held booking, transitioning to `confirmed` (cash) or
/// `pending_payment` plus an invoice (online).
pub async fn finalize(
    AuthCaller(_caller): AuthCaller,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<FinalizeRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.orchestrator.finalize(id, payload.payment_method).await.map_err(response::from_app_error)?;
    Ok(Json(booking))
}

/// Re-issues an invoice for an already pending-payment booking.
pub async fn create_invoice(
    AuthCaller(_caller): AuthCaller,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CreateInvoiceResponse>, ApiError> {
    let invoice = state.orchestrator.create_invoice(id).await.map_err(response::from_app_error)?;
    Ok(Json(invoice))
}

/// Records a payment provider's confirmation against a booking. The
/// payment provider calls this once it has settled the invoice created by
/// [`create_invoice`]; no caller auth is required since the provider is
/// not an authenticated client of this API.
pub async fn confirm_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ConfirmPaymentRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    payload.validate().map_err(|e| response::bad_request(e.to_string()))?;
    let booking = state
        .orchestrator
        .confirm_payment(id, &payload.payment_provider, &payload.payment_id)
        .await
        .map_err(response::from_app_error)?;
    Ok(Json(booking))
}

/// Cancels a booking outside the client lock window.
pub async fn cancel(AuthCaller(caller): AuthCaller, State(state): State<AppState>, Path(id): Path<i64>) -> Result<(), ApiError> {
    state.orchestrator.cancel(caller.user_id, id).await.map_err(response::from_app_error)
}

/// Reschedules a booking to a new start time.
pub async fn reschedule(
    AuthCaller(caller): AuthCaller,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Json<BookingResponse>, ApiError> {
    let booking = state.orchestrator.reschedule(caller.user_id, id, payload.new_starts_at).await.map_err(response::from_app_error)?;
    Ok(Json(booking))
}

/// Rates a `done` booking exactly once.
pub async fn rate(
    AuthCaller(caller): AuthCaller,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<RateRequest>,
) -> Result<(), ApiError> {
    payload.validate().map_err(|e| response::bad_request(e.to_string()))?;
    state.orchestrator.rate(caller.user_id, id, payload.rating, payload.comment).await.map_err(response::from_app_error)
}

/// Lists the caller's own bookings, paginated.
pub async fn list_bookings(
    AuthCaller(caller): AuthCaller,
    State(state): State<AppState>,
    Query(query): Query<ListBookingsQuery>,
) -> Result<Json<PaginatedBookings>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let result = state.orchestrator.list_bookings(caller.user_id, query.mode, page).await.map_err(response::from_app_error)?;
    Ok(Json(result))
}
