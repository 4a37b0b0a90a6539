use chrono_tz::Tz;

/// Boot-time configuration assembled once from the environment and passed
/// explicitly to the components that need it.
///
/// Per-request tunables (hold minutes, lock hours, discount percent, ...)
/// live in [`crate::settings::Store`] instead, since those are meant to
/// change at runtime without a restart; `CoreConfig` only holds the
/// handful of values that genuinely are process-wide constants for the
/// life of the binary.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub default_language: String,
    pub default_currency: String,
    pub business_timezone: Tz,
    /// External ids of boot-time admins, unioned with `User.is_admin` at
    /// resolution time.
    pub admin_external_ids: Vec<String>,
}

impl CoreConfig {
    /// Reads `DEFAULT_LANGUAGE`, `DEFAULT_CURRENCY`, `BUSINESS_TIMEZONE`,
    /// `ADMIN_IDS` from the environment, falling back to sane
    /// defaults rather than panicking — only `DATABASE_URL` is a hard
    /// requirement for the process to boot, and that's read by the
    /// binary crates, not here.
    pub fn from_env() -> Self {
        let default_language = std::env::var("DEFAULT_LANGUAGE").unwrap_or_else(|_| "en".to_string());
        let default_currency = std::env::var("DEFAULT_CURRENCY").unwrap_or_else(|_| "USD".to_string());
        let business_timezone = std::env::var("BUSINESS_TIMEZONE")
            .ok()
            .and_then(|tz| tz.parse::<Tz>().ok())
            .unwrap_or(chrono_tz::UTC);
        let admin_external_ids = std::env::var("ADMIN_IDS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            default_language,
            default_currency,
            business_timezone,
            admin_external_ids,
        }
    }
}
