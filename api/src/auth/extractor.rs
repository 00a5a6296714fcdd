use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use mcontrol_common::views::SessionClaims;
use tracing::debug;

use crate::{
    auth::{AuthError, TokenIssuer},
    context::ApiContext,
    error::ApiError,
};

/// Extractor that REQUIRES a valid session token.
///
/// Rejects with 401 when the `Authorization` header carries no token and with
/// 403 when the token fails verification, so the handler body never runs for
/// unauthenticated requests.
///
/// # Examples
///
/// ```rust,ignore
/// use mcontrol_api::auth::Auth;
///
/// pub async fn get_state(
///     State(ctx): State<ApiContext>,
///     Auth(claims): Auth,  // ← extracts the verified claims
/// ) -> Result<Json<MachineState>, ApiError> {
///     // ...
/// }
/// ```
pub struct Auth(pub SessionClaims);

impl FromRequestParts<ApiContext> for Auth {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &ApiContext,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        let result = authenticate(&state.tokens, &parts.headers)
            .map(Auth)
            .map_err(ApiError::from);

        async move { result }
    }
}

fn authenticate(tokens: &TokenIssuer, headers: &HeaderMap) -> Result<SessionClaims, AuthError> {
    let token = bearer_token(headers).ok_or(AuthError::MissingToken)?;

    tokens.verify(token).inspect_err(|e| {
        debug!(error = %e, "Rejected session token");
    })
}

/// The token part of an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .split(' ')
        .nth(1)
        .filter(|token| !token.is_empty())
}
