use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub price_cents: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MasterResponse {
    pub id: i64,
    pub display_name: String,
    pub bio: Option<serde_json::Value>,
    pub is_active: bool,
}
