use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// A runtime-mutable setting value, typed rather than coerced at each call
/// site.
///
/// Values are persisted as strings; [`SettingValue::parse`] recovers the
/// typed form on read, and [`SettingValue::to_storage_string`] is its
/// inverse for `set`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Json(JsonValue),
}

impl SettingValue {
    /// Parses a stored string into its typed form. Explicit JSON blobs
    /// (objects/arrays) are kept verbatim; bare scalars auto-coerce to
    /// bool/int/float when unambiguous, else fall back to a plain string.
    /// This never fails: an unparseable value degrades to `String`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(json) = serde_json::from_str::<JsonValue>(trimmed) {
                return Self::Json(json);
            }
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "true" => return Self::Bool(true),
            "false" => return Self::Bool(false),
            _ => {}
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Self::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Self::Float(f);
        }
        Self::String(raw.to_string())
    }

    pub fn to_storage_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::String(s) => s.clone(),
            Self::Json(j) => j.to_string(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Recognized setting keys consulted by the core, with documented
/// defaults. Centralized here so `salon-core`,
/// `salon-jobs`, and `salon-api` agree on the literal key strings.
pub mod keys {
    pub const RESERVATION_HOLD_MINUTES: (&str, i64) = ("reservation_hold_minutes", 10);
    pub const RESERVATION_EXPIRE_CHECK_SECONDS: (&str, i64) = ("reservation_expire_check_seconds", 30);
    pub const CLIENT_CANCEL_LOCK_HOURS: (&str, i64) = ("client_cancel_lock_hours", 3);
    pub const CLIENT_RESCHEDULE_LOCK_HOURS: (&str, i64) = ("client_reschedule_lock_hours", 3);
    pub const SLOT_DURATION_MINUTES: (&str, i64) = ("slot_duration_minutes", 60);
    pub const CALENDAR_MAX_DAYS_AHEAD: (&str, i64) = ("calendar_max_days_ahead", 365);
    pub const SAME_DAY_LEAD_MINUTES: (&str, i64) = ("same_day_lead_minutes", 0);
    pub const ONLINE_PAYMENT_DISCOUNT_PERCENT: (&str, i64) = ("online_payment_discount_percent", 5);
    pub const ONLINE_PAYMENTS_ENABLED: (&str, bool) = ("online_payments_enabled", true);
    pub const REMINDERS_CHECK_SECONDS: (&str, i64) = ("reminders_check_seconds", 60);
    pub const REMINDER_LEAD_MINUTES: (&str, i64) = ("reminder_lead_minutes", 1440);
    pub const CLEANUP_CHECK_SECONDS: (&str, i64) = ("cleanup_check_seconds", 900);
    pub const NO_SHOW_GRACE_HOURS: (&str, i64) = ("no_show_grace_hours", 2);
    pub const DEFAULT_PAGE_SIZE: (&str, i64) = ("default_page_size", 20);
    /// Generic business-day fallback consulted only when a master has no
    /// `WeeklySchedule` rows configured at all, so the slot calculator
    /// stays total rather than reporting "closed every day".
    pub const DEFAULT_DAY_START_HOUR: (&str, i64) = ("default_day_start_hour", 9);
    pub const DEFAULT_DAY_END_HOUR: (&str, i64) = ("default_day_end_hour", 18);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bool_variants() {
        assert_eq!(SettingValue::parse("true"), SettingValue::Bool(true));
        assert_eq!(SettingValue::parse("false"), SettingValue::Bool(false));
        assert_eq!(SettingValue::parse("0"), SettingValue::Int(0));
        assert_eq!(SettingValue::parse("1"), SettingValue::Int(1));
    }

    #[test]
    fn parses_int_before_float() {
        assert_eq!(SettingValue::parse("42"), SettingValue::Int(42));
        assert_eq!(SettingValue::parse("4.5"), SettingValue::Float(4.5));
    }

    #[test]
    fn parses_json_blob_verbatim() {
        let v = SettingValue::parse(r#"{"a": 1}"#);
        assert!(matches!(v, SettingValue::Json(_)));
    }

    #[test]
    fn falls_back_to_string() {
        assert_eq!(
            SettingValue::parse("Europe/Warsaw"),
            SettingValue::String("Europe/Warsaw".to_string())
        );
    }

    #[test]
    fn storage_roundtrip_for_int() {
        let v = SettingValue::Int(10);
        assert_eq!(SettingValue::parse(&v.to_storage_string()), v);
    }
}
