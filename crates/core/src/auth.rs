//! Authorization: role resolution consumed by the
//! lifecycle orchestrator and, upstream, by the façade's `Principal`
//! extractor. No session/token verification happens here — the caller's
//! external id is assumed already authenticated.

use crate::config::CoreConfig;
use salon_db::models::User;
use salon_db::queries::{masters, users};
use salon_types::Role;
use sqlx::PgPool;

/// Admin status is the union of the boot-time `ADMIN_IDS` list and the
/// `User.is_admin` flag.
pub async fn is_admin(pool: &PgPool, config: &CoreConfig, external_id: &str) -> Result<bool, sqlx::Error> {
    if config.admin_external_ids.iter().any(|id| id == external_id) {
        return Ok(true);
    }
    users::is_admin(pool, external_id).await
}

/// Master status is bare presence in the `masters` table.
pub async fn is_master(pool: &PgPool, external_id: &str) -> Result<bool, sqlx::Error> {
    masters::is_master(pool, external_id).await
}

/// Resolves (and lazily creates) the internal user id behind an external
/// id, upserting on first contact.
pub async fn resolve_user(pool: &PgPool, external_id: &str) -> Result<User, sqlx::Error> {
    if let Some(user) = users::find_by_external_id(pool, external_id).await? {
        return Ok(user);
    }
    users::upsert_profile(pool, external_id, None, None, None, None).await
}

/// Highest role the external id currently holds: admin takes precedence
/// over master, which takes precedence over the client default.
pub async fn resolve_role(pool: &PgPool, config: &CoreConfig, external_id: &str) -> Result<Role, sqlx::Error> {
    if is_admin(pool, config, external_id).await? {
        return Ok(Role::Admin);
    }
    if is_master(pool, external_id).await? {
        return Ok(Role::Master);
    }
    Ok(Role::Client)
}

/// A fully-resolved caller, built once per request by the façade and
/// threaded through every orchestrator operation that needs authorization —
/// role checks are invoked by the orchestrator and by the façade middleware.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user_id: i64,
    pub is_admin: bool,
    /// Internal master-row id, if this caller is a master.
    pub master_id: Option<i64>,
}

impl Caller {
    /// Whether this caller is the assigned master of `master_id`, or an
    /// admin — the master of a booking and any admin may also perform
    /// master-side mutations.
    pub fn can_act_as_master_of(&self, master_id: i64) -> bool {
        self.is_admin || self.master_id == Some(master_id)
    }
}

/// Resolves the full [`Caller`] for an already-authenticated external id.
pub async fn resolve_caller(pool: &PgPool, config: &CoreConfig, external_id: &str) -> Result<Caller, sqlx::Error> {
    let user = resolve_user(pool, external_id).await?;
    let admin = is_admin(pool, config, external_id).await?;
    let master_id = masters::find_by_external_id(pool, external_id).await?.map(|m| m.id);
    Ok(Caller { user_id: user.id, is_admin: admin, master_id })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_ids_list_is_trimmed_and_filtered_at_boot() {
        std::env::set_var("ADMIN_IDS", " 1 , , 2");
        let config = CoreConfig::from_env();
        assert_eq!(config.admin_external_ids, vec!["1".to_string(), "2".to_string()]);
        std::env::remove_var("ADMIN_IDS");
    }
}
