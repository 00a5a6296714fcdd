//! Merging a client-submitted partial state into the stored record.

use mcontrol_common::{
    params::UpdateStateParams,
    views::{HistoryEntry, MachineRegistry, MachineRegistryError, SparePart},
};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::DbState;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("field 'machines' must be an object")]
    MachinesNotObject,

    #[error(transparent)]
    Machine(#[from] MachineRegistryError),

    #[error("field '{field}' is malformed: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Applies `patch` on top of `existing`, or on top of an empty record when
/// there is none yet.
///
/// Every known top-level key in the patch replaces the whole field. For
/// `machines` that means machines missing from the patch are dropped. Keys
/// absent from the patch keep their stored value, and unknown keys are
/// ignored. Either every field is applied or, on the first malformed one,
/// none are.
///
/// Machines, spare parts and history entries are checked against their typed
/// views but stored exactly as sent.
pub fn apply_patch(
    existing: Option<DbState>,
    patch: &UpdateStateParams,
) -> Result<DbState, SyncError> {
    let mut state = existing.unwrap_or_else(DbState::empty);

    for (key, value) in patch.fields() {
        match key {
            "machines" => {
                let Value::Object(object) = value else {
                    return Err(SyncError::MachinesNotObject);
                };
                state.machines = MachineRegistry::from_object(object.clone())?;
            }
            "spareParts" => state.spare_parts = entries::<SparePart>("spareParts", value)?,
            "history" => state.history = entries::<HistoryEntry>("history", value)?,
            "currentComponent" => state.current_component = selection(value),
            "currentSparePart" => state.current_spare_part = selection(value),
            "editSparePart" => state.edit_spare_part = field("editSparePart", value)?,
            other => debug!(key = other, "Ignoring unknown state field"),
        }
    }

    Ok(state)
}

fn field<T: DeserializeOwned>(field: &'static str, value: &Value) -> Result<T, SyncError> {
    T::deserialize(value).map_err(|source| SyncError::Field { field, source })
}

/// Checks that `value` is a list of `T` and keeps the entries as sent.
fn entries<T: DeserializeOwned>(
    field: &'static str,
    value: &Value,
) -> Result<Vec<Value>, SyncError> {
    Vec::<T>::deserialize(value).map_err(|source| SyncError::Field { field, source })?;
    Ok(value.as_array().cloned().unwrap_or_default())
}

fn selection(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        other => Some(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use mcontrol_common::views::{MachineKind, MachineState};
    use serde_json::{Map, json};

    use super::*;

    fn patch(value: Value) -> UpdateStateParams {
        UpdateStateParams::new(value.as_object().cloned().unwrap())
    }

    #[test]
    fn test_machines_are_replaced_not_merged() {
        let incoming = json!({
            "X1": { "id": "X1", "name": "Nueva", "type": "SIMPLE", "operational": false }
        });

        let state =
            apply_patch(Some(DbState::seeded()), &patch(json!({ "machines": incoming }))).unwrap();

        assert_eq!(state.machines.len(), 1);
        assert!(state.machines.get("S").is_none());

        let view: MachineState = state.into();
        assert_eq!(Value::Object(view.machines), incoming);
    }

    #[test]
    fn test_patch_without_machines_keeps_them() {
        let before = DbState::seeded();
        let state = apply_patch(
            Some(before.clone()),
            &patch(json!({
                "spareParts": [{
                    "id": "p1",
                    "description": "belt",
                    "compatibility": "S",
                    "quantity": 3,
                    "image": ""
                }]
            })),
        )
        .unwrap();

        assert_eq!(state.machines, before.machines);
        assert_eq!(state.history, before.history);
        assert_eq!(state.spare_parts.len(), 1);
        assert_eq!(state.spare_parts[0]["description"], "belt");
        assert_eq!(state.spare_parts[0]["quantity"], 3);
    }

    #[test]
    fn test_absent_record_starts_empty() {
        let state = apply_patch(None, &patch(json!({ "editSparePart": true }))).unwrap();

        assert!(state.machines.is_empty());
        assert!(state.spare_parts.is_empty());
        assert!(state.edit_spare_part);
    }

    #[test]
    fn test_absent_record_takes_patch_machines() {
        let state = apply_patch(
            None,
            &patch(json!({
                "machines": {
                    "alineador": { "id": "alineador", "name": "A", "type": "SIMPLE", "operational": true }
                }
            })),
        )
        .unwrap();

        assert_eq!(
            state.machines.get("alineador").map(|m| m.kind),
            Some(MachineKind::Simple)
        );
    }

    #[test]
    fn test_selections_accept_values_and_null() {
        let mut before = DbState::seeded();
        before.current_spare_part = Some(json!("p1"));

        let state = apply_patch(
            Some(before),
            &patch(json!({
                "currentComponent": { "machine": "S", "segment": "F3" },
                "currentSparePart": null
            })),
        )
        .unwrap();

        assert_eq!(
            state.current_component,
            Some(json!({ "machine": "S", "segment": "F3" }))
        );
        assert_eq!(state.current_spare_part, None);
    }

    #[test]
    fn test_history_is_replaced_wholesale() {
        let entry = json!({
            "id": "h1",
            "date": "2024-05-02",
            "time": "08:15",
            "machine": "S",
            "component": "F3",
            "action": "desactivar",
            "reason": "rotura",
            "sparePart": "p1"
        });

        let state = apply_patch(
            Some(DbState::seeded()),
            &patch(json!({ "history": [entry.clone()] })),
        )
        .unwrap();

        assert_eq!(state.history, vec![entry]);
    }

    #[test]
    fn test_history_keeps_entries_as_sent() {
        let entries = json!([
            {
                "id": 1714636500000i64,
                "date": "2024-05-02",
                "time": "08:15",
                "machine": "S",
                "component": "F3",
                "action": "activar",
                "reason": "reparado"
            },
            {
                "id": "h2",
                "date": "2024-05-02",
                "time": "09:00",
                "machine": "bolsas",
                "component": "selladora",
                "action": "desactivar",
                "reason": "rotura",
                "sparePart": 17,
                "operator": "turno B"
            }
        ]);

        let state = apply_patch(None, &patch(json!({ "history": entries.clone() }))).unwrap();

        let view: MachineState = state.into();
        assert_eq!(Value::Array(view.history), entries);
    }

    #[test]
    fn test_history_entry_missing_fields_fails() {
        let result = apply_patch(
            None,
            &patch(json!({ "history": [{ "id": "h1", "machine": "S" }] })),
        );

        assert!(matches!(
            result,
            Err(SyncError::Field { field: "history", .. })
        ));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let before = DbState::seeded();
        let state = apply_patch(
            Some(before.clone()),
            &patch(json!({ "_id": "other", "theme": "dark" })),
        )
        .unwrap();

        assert_eq!(state, before);
    }

    #[test]
    fn test_malformed_field_fails_whole_patch() {
        let result = apply_patch(
            Some(DbState::seeded()),
            &patch(json!({ "editSparePart": true, "spareParts": 5 })),
        );

        assert!(matches!(
            result,
            Err(SyncError::Field { field: "spareParts", .. })
        ));
    }

    #[test]
    fn test_machines_must_be_an_object() {
        let result = apply_patch(None, &patch(json!({ "machines": [] })));
        assert!(matches!(result, Err(SyncError::MachinesNotObject)));
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let before = DbState::seeded();
        let state = apply_patch(Some(before.clone()), &UpdateStateParams::new(Map::new())).unwrap();
        assert_eq!(state, before);
    }
}
