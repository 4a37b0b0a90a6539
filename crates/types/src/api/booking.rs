use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::enums::{BookingListMode, BookingStatus, PaymentMethod};

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct HoldRequest {
    #[validate(length(min = 1, message = "at least one service is required"))]
    pub service_ids: Vec<String>,
    pub master_id: i64,
    pub starts_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, message = "at least one service is required"))]
    pub service_ids: Vec<String>,
    pub master_id: i64,
    pub starts_at: DateTime<Utc>,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FinalizeRequest {
    pub payment_method: PaymentMethod,
}

/// Reported by the payment provider once it has settled a booking's
/// invoice, identifying itself and the payment it collected.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ConfirmPaymentRequest {
    #[validate(length(min = 1, max = 64, message = "payment_provider is required"))]
    pub payment_provider: String,
    #[validate(length(min = 1, max = 255, message = "payment_id is required"))]
    pub payment_id: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RescheduleRequest {
    pub new_starts_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RateRequest {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i16,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AddClientNoteRequest {
    #[validate(length(min = 1, max = 2000))]
    pub note: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ListBookingsQuery {
    #[serde(default)]
    pub mode: BookingListMode,
    #[serde(default)]
    pub page: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingItemResponse {
    pub service_id: String,
    pub position: i32,
    pub price_cents_snapshot: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: i64,
    pub user_id: i64,
    pub master_id: i64,
    pub status: BookingStatus,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub original_price_cents: i64,
    pub final_price_cents: i64,
    pub discount_applied: Option<String>,
    pub cash_hold_expires_at: Option<DateTime<Utc>>,
    pub paid_at: Option<DateTime<Utc>>,
    pub items: Vec<BookingItemResponse>,
    pub invoice_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedBookings {
    pub items: Vec<BookingResponse>,
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateInvoiceResponse {
    pub invoice_url: String,
}
