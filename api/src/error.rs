use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use mcontrol_common::views::ApiErrorResponse;
use mcontrol_db::storage::StoreError;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Endpoint not found")]
    NotFound,

    #[error("Missing bearer token")]
    MissingToken,

    #[error(transparent)]
    InvalidToken(AuthError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Login failed: {0}")]
    Login(#[source] AuthError),

    #[error("Unreadable login body: {0}")]
    LoginBody(#[source] JsonRejection),

    #[error("Reading state failed: {0}")]
    StateRead(#[source] StoreError),

    #[error("Updating state failed: {0}")]
    StateWrite(#[source] StoreError),

    #[error("Unreadable state body: {0}")]
    StateBody(#[source] JsonRejection),
}

impl ApiError {
    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MissingToken | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::InvalidToken(_) => StatusCode::FORBIDDEN,
            Self::Login(_)
            | Self::LoginBody(_)
            | Self::StateRead(_)
            | Self::StateWrite(_)
            | Self::StateBody(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => Self::MissingToken,
            AuthError::InvalidToken(_) => Self::InvalidToken(err),
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            _ => Self::Login(err),
        }
    }
}

impl From<ApiError> for ApiErrorResponse {
    fn from(err: ApiError) -> Self {
        #[cfg(debug_assertions)]
        let details = err.status_code().is_server_error().then(|| err.to_string());

        #[cfg(not(debug_assertions))]
        let details = None;

        ApiErrorResponse {
            error: match &err {
                ApiError::NotFound => "Endpoint not found".into(),
                ApiError::MissingToken => "Token requerido".into(),
                ApiError::InvalidToken(_) => "Token inválido".into(),
                ApiError::InvalidCredentials => "Contraseña incorrecta".into(),
                ApiError::Login(_) | ApiError::LoginBody(_) => "Error del servidor".into(),
                ApiError::StateRead(_) => "Error al obtener el estado".into(),
                ApiError::StateWrite(_) | ApiError::StateBody(_) => {
                    "Error al actualizar el estado".into()
                }
            },

            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!("Error returned by handler: {self}");
        } else {
            tracing::warn!(status = status_code.as_u16(), "Request rejected: {self}");
        }

        (status_code, Json(Into::<ApiErrorResponse>::into(self))).into_response()
    }
}
