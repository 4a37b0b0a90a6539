use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A bookable service, identified by an opaque string id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub duration_minutes: Option<i32>,
}
