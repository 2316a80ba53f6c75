//! Serializable view of the result set.

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::outputs::{OutputId, OutputState};

/// Lifecycle status of an output, flattened for serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutputStatus {
    Unset,
    Stale,
    Computed,
    Error,
}

impl From<&OutputState> for OutputStatus {
    fn from(state: &OutputState) -> Self {
        match state {
            OutputState::Unset => OutputStatus::Unset,
            OutputState::Stale => OutputStatus::Stale,
            OutputState::Computed(_) => OutputStatus::Computed,
            OutputState::Error(_) => OutputStatus::Error,
        }
    }
}

/// One output as reported to sinks: name, status, and either a value or an
/// error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub name: String,
    pub status: OutputStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Engine {
    /// Snapshot of every output, in registry order.
    pub fn snapshot(&self) -> Vec<OutputRecord> {
        OutputId::ALL
            .iter()
            .map(|id| {
                let state = self.state(*id);
                OutputRecord {
                    name: id.name().to_string(),
                    status: OutputStatus::from(state),
                    value: state.value(),
                    error: match state {
                        OutputState::Error(reason) => Some(reason.to_string()),
                        _ => None,
                    },
                }
            })
            .collect()
    }
}
