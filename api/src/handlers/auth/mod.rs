use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use chrono::Utc;
use mcontrol_common::{
    params::AuthLoginParams,
    views::{ApiErrorResponse, AuthLoginResponse, AuthVerifyResponse},
};
use tracing::info;

use crate::{auth::Auth, context::ApiContext, error::ApiError};


#[utoipa::path(
    post,
    path = "/api/login",
    tags = ["auth"],
    request_body(content = AuthLoginParams, content_type = "application/json"),
    responses(
        (status = 200, description = "Successful login", body = AuthLoginResponse),
        (status = 401, description = "Wrong password", body = ApiErrorResponse),
    )
)]
pub async fn auth_login(
    State(ctx): State<ApiContext>,
    body: Result<Json<AuthLoginParams>, JsonRejection>,
) -> Result<Json<AuthLoginResponse>, ApiError> {
    let Json(body) = body.map_err(ApiError::LoginBody)?;
    ctx.passwords.verify(body.password).await?;
    let token = ctx.tokens.issue()?;

    info!("Dashboard login succeeded");

    Ok(Json(AuthLoginResponse {
        token,
        message: "Login exitoso".into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/verify",
    tags = ["auth"],
    responses((status = 200, description = "Token is valid", body = AuthVerifyResponse))
)]
pub async fn auth_verify(Auth(claims): Auth) -> Json<AuthVerifyResponse> {
    Json(AuthVerifyResponse {
        valid: true,
        user: claims,
        timestamp: Utc::now(),
    })
}
