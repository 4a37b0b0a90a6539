use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::enums::PaymentMethod;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct PriceQuoteQuery {
    #[validate(length(min = 1))]
    pub service_ids: Vec<String>,
    pub payment_method: PaymentMethod,
    pub master_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PerServicePrice {
    pub service_id: String,
    pub minutes: i32,
    pub price_cents: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AggregateResponse {
    pub total_minutes: i32,
    pub total_price_cents: i64,
    pub currency: String,
    pub per_service: Vec<PerServicePrice>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PriceQuoteResponse {
    pub original_price_cents: i64,
    pub final_price_cents: i64,
    pub discount_amount_cents: i64,
    pub discount_percent_applied: i64,
    pub currency: String,
    pub duration_minutes: i32,
}
