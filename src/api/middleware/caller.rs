//! Bearer token authentication
//!
//! Resolves the `Authorization: Bearer <token>` header into a [`Caller`].
//! A request without the header is anonymous; a header that is malformed or
//! carries an unknown token is rejected with 401.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::access::Caller;
use crate::infrastructure::auth::hash_token;

/// Extractor for the caller behind a request
#[derive(Debug, Clone)]
pub struct CurrentCaller(pub Caller);

impl FromRequestParts<AppState> for CurrentCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // Already resolved by the request logging middleware
        if let Some(caller) = parts.extensions.get::<Caller>() {
            return Ok(CurrentCaller(caller.clone()));
        }

        match resolve_caller(&parts.headers, state).await {
            Ok(caller) => Ok(CurrentCaller(caller)),
            Err(err) => {
                warn!(status = %err.status, error = %err, "Rejected caller credentials");
                Err(err)
            }
        }
    }
}

/// Resolve the caller behind the request headers
pub async fn resolve_caller(headers: &HeaderMap, state: &AppState) -> Result<Caller, ApiError> {
    let Some(token) = extract_bearer_token(headers)? else {
        return Ok(Caller::anonymous());
    };

    let account = state
        .accounts
        .find_by_token_hash(&hash_token(&token))
        .await
        .map_err(ApiError::from)?;

    match account {
        Some(account) => {
            debug!(account = %account.email(), "Authenticated caller");
            Ok(Caller::account(account))
        }
        None => {
            debug!(
                token_prefix = %token.chars().take(4).collect::<String>(),
                "Unknown token"
            );
            Err(ApiError::unauthorized("Invalid token."))
        }
    }
}

/// Read the bearer token, if an Authorization header is present
fn extract_bearer_token(headers: &HeaderMap) -> Result<Option<String>, ApiError> {
    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid token header. Invalid characters."))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty() && !token.contains(' '));

    match token {
        Some(token) => Ok(Some(token.to_string())),
        None => {
            debug!("Malformed Authorization header");
            Err(ApiError::unauthorized(
                "Invalid token header. Expected 'Authorization: Bearer <token>'.",
            ))
        }
    }
}
