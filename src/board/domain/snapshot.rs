//! Persisted board document.

use super::{Responsible, Task};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Everything the board writes to its backing store.
///
/// UI fields are never part of the snapshot. Missing lists read back as
/// empty because realtime stores drop empty arrays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Responsibles in insertion order.
    #[serde(rename = "responsaveis", default)]
    pub responsibles: Vec<Responsible>,
    /// Tasks in insertion order.
    #[serde(rename = "tarefas", default)]
    pub tasks: Vec<Task>,
    /// Distribution history written by other clients, carried unchanged.
    #[serde(rename = "distribuicaoHistorico", default)]
    pub distribution_history: Map<String, Value>,
}

impl BoardSnapshot {
    /// Returns whether the snapshot holds no responsibles and no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.responsibles.is_empty() && self.tasks.is_empty()
    }

    /// Serializes the snapshot as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] on failure.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a snapshot from JSON. A JSON `null` document yields `None`.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] on malformed input.
    pub fn from_json(raw: &str) -> Result<Option<Self>, serde_json::Error> {
        serde_json::from_str(raw)
    }
}
