use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AvailableDaysQuery {
    pub master_id: i64,
    #[validate(range(min = 2000, max = 2100))]
    pub year: i32,
    #[validate(range(min = 1, max = 12))]
    pub month: u32,
    #[validate(length(min = 1))]
    pub service_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailableDaysResponse {
    pub days: Vec<u32>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AvailableSlotsQuery {
    pub master_id: i64,
    pub date: chrono::NaiveDate,
    #[validate(length(min = 1))]
    pub service_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AvailableSlotsResponse {
    /// Local `HH:MM` strings in the salon timezone.
    pub slots: Vec<String>,
}
