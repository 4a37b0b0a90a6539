use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use salon_core::{Caller, CoreConfig};
use sqlx::PgPool;
use std::sync::Arc;

/// Application state shared by every handler: the lifecycle orchestrator
/// plus the raw pieces handlers occasionally need directly (the pool, for
/// `Caller` resolution; the config, for admin ids already folded into
/// `resolve_caller`).
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<salon_core::Orchestrator>,
    pub pool: PgPool,
    pub config: CoreConfig,
}

/// Extractor for an authenticated caller.
///
/// Real messaging-platform authentication is out of scope; the façade
/// trusts whatever external id arrives in `Authorization: Bearer
/// <external_id>` and resolves it to a full [`Caller`] (role, master
/// linkage), the same shape of resolution a messaging-platform chat id
/// would go through.
pub struct AuthCaller(pub Caller);

/// Extractor for an optional authenticated caller — used by endpoints that
/// behave differently for anonymous visitors (e.g. the public catalog).
pub struct OptionalAuthCaller(pub Option<Caller>);

async fn external_id_from_parts(parts: &mut Parts) -> Option<String> {
    let TypedHeader(Authorization(bearer)) =
        parts.extract::<TypedHeader<Authorization<Bearer>>>().await.ok()?;
    Some(bearer.token().to_string())
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthCaller
where
    S: Send + Sync,
    AppState: axum::extract::FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let external_id = external_id_from_parts(parts)
            .await
            .ok_or_else(|| (StatusCode::UNAUTHORIZED, "missing or invalid Authorization header".to_string()))?;

        let app_state = AppState::from_ref(state);
        let caller = salon_core::auth::resolve_caller(&app_state.pool, &app_state.config, &external_id)
            .await
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("database error: {}", e)))?;

        Ok(AuthCaller(caller))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthCaller
where
    S: Send + Sync,
    AppState: axum::extract::FromRef<S>,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(external_id) = external_id_from_parts(parts).await else {
            return Ok(OptionalAuthCaller(None));
        };

        let app_state = AppState::from_ref(state);
        match salon_core::auth::resolve_caller(&app_state.pool, &app_state.config, &external_id).await {
            Ok(caller) => Ok(OptionalAuthCaller(Some(caller))),
            Err(_) => Ok(OptionalAuthCaller(None)),
        }
    }
}

