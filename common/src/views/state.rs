use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::EntryId;

/// The full dashboard state as served by `GET /api/state`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineState {
    /// Machines keyed by machine id, each value shaped like
    /// [`Machine`](super::Machine).
    #[schema(value_type = Object)]
    pub machines: Map<String, Value>,

    /// Parts inventory, each entry shaped like [`SparePart`].
    #[schema(value_type = Vec<SparePart>)]
    pub spare_parts: Vec<Value>,

    /// Log of past actions, oldest first, each shaped like [`HistoryEntry`].
    #[schema(value_type = Vec<HistoryEntry>)]
    pub history: Vec<Value>,

    /// The component currently selected in the UI, if any.
    #[schema(value_type = Option<Object>)]
    pub current_component: Option<Value>,

    /// The spare part currently selected in the UI, if any.
    #[schema(value_type = Option<Object>)]
    pub current_spare_part: Option<Value>,

    /// Whether the spare part editor is open.
    pub edit_spare_part: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct SparePart {
    pub id: EntryId,
    pub description: String,

    /// Free-form list of the machines this part fits.
    pub compatibility: String,

    pub quantity: i64,

    /// Path or URL of the part's picture. May be empty.
    pub image: String,
}

/// A single action taken on a machine. Entries are only ever appended.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: EntryId,
    pub date: String,
    pub time: String,

    /// Id of the machine the action was taken on.
    pub machine: String,

    pub component: String,
    pub action: String,
    pub reason: String,

    /// Id of the spare part used, if one was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spare_part: Option<EntryId>,
}

/// Response for `PUT /api/state`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct UpdateStateResponse {
    pub success: bool,
    pub message: String,
}
