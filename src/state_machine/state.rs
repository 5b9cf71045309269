use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::graph::TransitionGraph;
use crate::enumeration::Enumeration;
use crate::error::EnumError;

/// One line of the audit trail.
///
/// The genesis entry written at construction has `from = None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub at: DateTime<Utc>,
    pub from: Option<String>,
    pub to: String,
    pub note: Option<String>,
}

/// An enumeration value bound to a [`TransitionGraph`] with an append-only log.
///
/// Transitions never touch the receiver: each returns a new machine whose log
/// is the old one plus a single entry, so older versions stay valid.
#[derive(Debug, Clone)]
pub struct StateMachine {
    graph: Arc<TransitionGraph>,
    current: Enumeration,
    log: Vec<LogEntry>,
}

impl StateMachine {
    /// Start from `initial`, which must be one of the graph's initial states.
    pub fn of(graph: &Arc<TransitionGraph>, initial: impl Into<String>) -> Result<Self, EnumError> {
        let initial = initial.into();
        if !graph.is_initial(&initial) {
            debug!(kind = graph.kind(), state = %initial, "rejected initial state");
            return Err(EnumError::IllegalInitialState {
                kind: graph.kind().to_string(),
                value: initial,
            });
        }
        let current = Enumeration::of(graph.domain(), initial)?;

        let genesis = LogEntry {
            at: Utc::now(),
            from: None,
            to: current.value().to_string(),
            note: None,
        };
        debug!(kind = graph.kind(), state = current.value(), "state machine started");

        Ok(Self {
            graph: Arc::clone(graph),
            current,
            log: vec![genesis],
        })
    }

    /// Reassemble a machine from parts already checked by the caller.
    pub(super) fn from_parts(
        graph: Arc<TransitionGraph>,
        current: Enumeration,
        log: Vec<LogEntry>,
    ) -> Self {
        Self {
            graph,
            current,
            log,
        }
    }

    pub fn transition(&self, to: impl Into<String>) -> Result<Self, EnumError> {
        self.derive(to.into(), None)
    }

    pub fn transition_with_note(
        &self,
        to: impl Into<String>,
        note: impl Into<String>,
    ) -> Result<Self, EnumError> {
        self.derive(to.into(), Some(note.into()))
    }

    fn derive(&self, to: String, note: Option<String>) -> Result<Self, EnumError> {
        let target = Enumeration::of(self.graph.domain(), to)?;
        let from = self.current.value();

        if !self.graph.can_transition(from, target.value()) {
            debug!(
                kind = self.kind(),
                from,
                to = target.value(),
                "rejected transition"
            );
            return Err(EnumError::IllegalTransition {
                kind: self.kind().to_string(),
                from: from.to_string(),
                to: target.value().to_string(),
            });
        }

        // Never stamp an entry earlier than its predecessor, even if the
        // wall clock stepped back.
        let at = self
            .log
            .last()
            .map_or_else(Utc::now, |last| Utc::now().max(last.at));

        let mut log = Vec::with_capacity(self.log.len() + 1);
        log.extend_from_slice(&self.log);
        log.push(LogEntry {
            at,
            from: Some(from.to_string()),
            to: target.value().to_string(),
            note,
        });
        debug!(kind = self.kind(), from, to = target.value(), "state transition");

        Ok(Self {
            graph: Arc::clone(&self.graph),
            current: target,
            log,
        })
    }

    pub fn current(&self) -> &Enumeration {
        &self.current
    }

    pub fn value(&self) -> &str {
        self.current.value()
    }

    pub fn kind(&self) -> &str {
        self.graph.kind()
    }

    pub fn graph(&self) -> &Arc<TransitionGraph> {
        &self.graph
    }

    pub fn can_transition(&self, to: &str) -> bool {
        self.graph.can_transition(self.value(), to)
    }

    /// Targets reachable from the current state; `None` means unrestricted.
    pub fn possible_transitions(&self) -> Option<&[String]> {
        self.graph.possible_transitions_from(self.value())
    }

    pub fn possible_transitions_from(&self, state: &str) -> Option<&[String]> {
        self.graph.possible_transitions_from(state)
    }

    pub fn is_terminal(&self) -> bool {
        self.graph.is_terminal(self.value())
    }

    pub fn has_been_at_state(&self, state: &str) -> bool {
        self.log.iter().any(|entry| entry.to == state)
    }

    /// Every entry since genesis, oldest first.
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }
}
