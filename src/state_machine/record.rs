//! Storable form of a [`StateMachine`]: the current value plus the full log.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::graph::TransitionGraph;
use super::state::{LogEntry, StateMachine};
use crate::enumeration::Enumeration;
use crate::error::EnumError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub value: String,
    pub log: Vec<LogEntry>,
}

impl StateMachine {
    pub fn to_record(&self) -> StateRecord {
        StateRecord {
            value: self.value().to_string(),
            log: self.log().to_vec(),
        }
    }

    /// Rebuild a machine from a stored record, keeping the log as written.
    ///
    /// The chain of entries must be intact and every state must still be a
    /// member of the domain. Edges are not rechecked: they were enforced when
    /// each transition happened and the graph may have changed since.
    pub fn restore(graph: &Arc<TransitionGraph>, record: StateRecord) -> Result<Self, EnumError> {
        let corrupt = |reason: String| EnumError::CorruptLog {
            kind: graph.kind().to_string(),
            reason,
        };

        let Some(genesis) = record.log.first() else {
            return Err(corrupt("log is empty".into()));
        };
        if let Some(from) = &genesis.from {
            return Err(corrupt(format!("first entry comes from {from:?}")));
        }

        let mut previous: Option<&LogEntry> = None;
        for (index, entry) in record.log.iter().enumerate() {
            Enumeration::of(graph.domain(), entry.to.as_str())?;
            if let Some(prev) = previous {
                if entry.from.as_deref() != Some(prev.to.as_str()) {
                    return Err(corrupt(format!(
                        "entry {index} comes from {:?} but the previous state is {:?}",
                        entry.from, prev.to
                    )));
                }
                if entry.at < prev.at {
                    return Err(corrupt(format!("entry {index} is older than its predecessor")));
                }
            }
            previous = Some(entry);
        }

        let last = previous.map(|entry| entry.to.as_str()).unwrap_or_default();
        if record.value != last {
            return Err(corrupt(format!(
                "value {:?} does not match last entry {last:?}",
                record.value
            )));
        }

        let current = Enumeration::of(graph.domain(), record.value)?;
        Ok(StateMachine::from_parts(Arc::clone(graph), current, record.log))
    }
}
