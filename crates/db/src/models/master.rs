use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;

/// A service provider.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Master {
    pub id: i64,
    pub external_id: Option<String>,
    pub display_name: String,
    pub bio: Option<JsonValue>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Junction row with an optional per-master duration override.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MasterService {
    pub master_id: i64,
    pub service_id: String,
    pub duration_minutes_override: Option<i32>,
}
