use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct AuthLoginParams {
    /// The shared dashboard password.
    pub password: String,
}
