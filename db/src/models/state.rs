use mcontrol_common::views::{MachineRegistry, MachineState};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fixed_data;

/// The `_id` of the one and only state record.
pub const STATE_ID: &str = "current";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbState {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(default)]
    pub machines: MachineRegistry,

    /// Entries as the client sent them, each checked against `SparePart`.
    #[serde(default)]
    pub spare_parts: Vec<Value>,

    /// Entries as the client sent them, each checked against `HistoryEntry`.
    #[serde(default)]
    pub history: Vec<Value>,

    #[serde(default)]
    pub current_component: Option<Value>,

    #[serde(default)]
    pub current_spare_part: Option<Value>,

    #[serde(default)]
    pub edit_spare_part: bool,
}

impl DbState {
    /// A record with no machines, no parts, no history and nothing selected.
    pub fn empty() -> Self {
        Self {
            id: STATE_ID.into(),
            machines: MachineRegistry::new(),
            spare_parts: Vec::new(),
            history: Vec::new(),
            current_component: None,
            current_spare_part: None,
            edit_spare_part: false,
        }
    }

    /// The record materialized on first read of an empty store.
    pub fn seeded() -> Self {
        Self {
            machines: fixed_data::machines(),
            ..Self::empty()
        }
    }
}

impl From<DbState> for MachineState {
    fn from(value: DbState) -> Self {
        Self {
            machines: value.machines.to_object(),
            spare_parts: value.spare_parts,
            history: value.history,
            current_component: value.current_component,
            current_spare_part: value.current_spare_part,
            edit_spare_part: value.edit_spare_part,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_state_defaults() {
        let state = DbState::seeded();

        assert_eq!(state.id, STATE_ID);
        assert_eq!(state.machines.len(), 12);
        assert!(state.spare_parts.is_empty());
        assert!(state.history.is_empty());
        assert_eq!(state.current_component, None);
        assert_eq!(state.current_spare_part, None);
        assert!(!state.edit_spare_part);
    }

    #[test]
    fn test_view_uses_wire_field_names() {
        let view: MachineState = DbState::seeded().into();
        let json = serde_json::to_value(&view).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "currentComponent",
                "currentSparePart",
                "editSparePart",
                "history",
                "machines",
                "spareParts",
            ]
        );
        assert!(object["currentComponent"].is_null());
        assert_eq!(object["machines"].as_object().unwrap().len(), 12);
    }

    #[test]
    fn test_missing_fields_deserialize_to_empty() {
        let state: DbState = serde_json::from_str(r#"{ "_id": "current" }"#).unwrap();
        assert_eq!(state, DbState::empty());
    }
}
