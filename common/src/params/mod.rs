//! Input parameters for the various functions within mcontrol.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

mod auth;
pub use auth::*;

/// A partial state document sent with `PUT /api/state`.
///
/// Every top-level key present replaces the stored field of the same name
/// wholesale. Keys that are absent leave the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct UpdateStateParams(pub Map<String, Value>);

impl UpdateStateParams {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
