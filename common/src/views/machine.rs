use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;

/// How a machine's components are laid out. Decides which of the optional
/// component fields on [`Machine`] are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineKind {
    /// Segments plus a vibration pump.
    SegmentBased,

    /// A list of named devices.
    DeviceBased,

    /// No components beyond the operational flag.
    Simple,

    /// A grid of devices, one row per machine.
    GridBased,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    pub id: String,

    /// Human-readable name shown on the dashboard.
    pub name: String,

    #[serde(rename = "type")]
    pub kind: MachineKind,

    /// Whether the machine as a whole is running.
    pub operational: bool,

    /// Only populated for [`MachineKind::SegmentBased`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,

    /// Only populated for [`MachineKind::SegmentBased`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vibration_pump: Option<VibrationPump>,

    /// Only populated for [`MachineKind::DeviceBased`] and
    /// [`MachineKind::GridBased`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devices: Option<Vec<Device>>,
}

/// An id chosen by the client. Older dashboards use strings, newer ones use
/// millisecond timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, ToSchema)]
#[serde(untagged)]
pub enum EntryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for EntryId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl PartialEq<&str> for EntryId {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Self::Text(s) if s == other)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct Segment {
    pub id: EntryId,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct VibrationPump {
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct Device {
    pub id: EntryId,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Error)]
#[error("machine '{id}' is malformed: {source}")]
pub struct MachineRegistryError {
    pub id: String,
    #[source]
    pub source: serde_json::Error,
}

/// The machine registry keyed by machine id.
///
/// On the wire the registry is a plain JSON object whose keys are machine
/// ids and whose values are [`Machine`] objects. Values are checked against
/// [`Machine`] on the way in but kept as sent, so fields the dashboard adds
/// survive. [`MachineRegistry::from_object`] and [`MachineRegistry::to_object`]
/// round-trip exactly: same key set, same values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MachineRegistry(BTreeMap<String, Value>);

impl MachineRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an object-of-objects into a registry. Keys are kept as given,
    /// even when they differ from the nested `id` field.
    pub fn from_object(object: Map<String, Value>) -> Result<Self, MachineRegistryError> {
        for (id, value) in &object {
            Machine::deserialize(value).map_err(|source| MachineRegistryError {
                id: id.clone(),
                source,
            })?;
        }

        Ok(Self(object.into_iter().collect()))
    }

    /// Writes the registry back out as a plain object-of-objects.
    pub fn to_object(&self) -> Map<String, Value> {
        self.0
            .iter()
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect()
    }

    pub fn insert(&mut self, machine: Machine) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(&machine)?;
        self.0.insert(machine.id, value);
        Ok(())
    }

    /// The typed view of machine `id`, without any extra fields.
    pub fn get(&self, id: &str) -> Option<Machine> {
        self.0
            .get(id)
            .and_then(|value| Machine::deserialize(value).ok())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Machine> for MachineRegistry {
    fn from_iter<I: IntoIterator<Item = Machine>>(iter: I) -> Self {
        let mut registry = Self::new();
        for machine in iter {
            // `Machine` is made of strings, integers, bools and lists of
            // those, none of which fail to serialize.
            registry
                .insert(machine)
                .expect("typed machines always serialize");
        }
        registry
    }
}
