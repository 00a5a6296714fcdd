//! Output views for the various functions within mcontrol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

mod auth;
pub use auth::*;

mod machine;
pub use machine::*;

mod state;
pub use state::*;

/// Response for the health endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"OK"` when the process is serving requests.
    pub status: String,

    pub timestamp: DateTime<Utc>,
}

/// An error response for an API endpoint. This is used to return errors to the
/// client in a consistent format.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// A human-readable message describing the error that occurred.
    pub error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
