use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::EnumDomain;
use crate::error::EnumError;

/// Legal initial states and outgoing edges for one state kind.
///
/// A state with no entry in the edge map is unrestricted: every domain
/// member is reachable from it. A state whose entry is an empty list is
/// terminal. [`possible_transitions_from`](Self::possible_transitions_from)
/// keeps the two apart as `None` versus `Some(&[])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionGraph {
    domain: Arc<EnumDomain>,
    initial: Vec<String>,
    edges: BTreeMap<String, Vec<String>>,
}

impl TransitionGraph {
    pub fn builder(domain: Arc<EnumDomain>) -> GraphBuilder {
        GraphBuilder {
            domain,
            initial: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn domain(&self) -> &Arc<EnumDomain> {
        &self.domain
    }

    pub fn kind(&self) -> &str {
        self.domain.kind()
    }

    pub fn initial_states(&self) -> &[String] {
        &self.initial
    }

    pub fn is_initial(&self, state: &str) -> bool {
        self.initial.iter().any(|s| s == state)
    }

    /// `None` when `state` is unrestricted, otherwise its targets (empty for
    /// a terminal state).
    pub fn possible_transitions_from(&self, state: &str) -> Option<&[String]> {
        self.edges.get(state).map(Vec::as_slice)
    }

    /// Whether `to` is a domain member reachable from `from`.
    pub fn can_transition(&self, from: &str, to: &str) -> bool {
        if !self.domain.is_member(&to.to_string()) {
            return false;
        }
        match self.possible_transitions_from(from) {
            None => true,
            Some(targets) => targets.iter().any(|t| t == to),
        }
    }

    pub fn is_terminal(&self, state: &str) -> bool {
        self.possible_transitions_from(state)
            .is_some_and(<[String]>::is_empty)
    }

    pub fn is_unrestricted(&self, state: &str) -> bool {
        !self.edges.contains_key(state)
    }
}

/// Declares a [`TransitionGraph`] over an already registered domain.
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    domain: Arc<EnumDomain>,
    initial: Vec<String>,
    edges: Vec<(String, Vec<String>)>,
}

impl GraphBuilder {
    pub fn initial(mut self, state: impl Into<String>) -> Self {
        self.initial.push(state.into());
        self
    }

    pub fn edges<I, S>(mut self, from: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.edges
            .push((from.into(), targets.into_iter().map(Into::into).collect()));
        self
    }

    /// Declares `state` with an empty edge list.
    pub fn terminal(self, state: impl Into<String>) -> Self {
        self.edges(state, Vec::<String>::new())
    }

    /// Checks every referenced state against the domain.
    pub fn build(self) -> Result<TransitionGraph, EnumError> {
        let kind = self.domain.kind().to_string();
        let check = |state: &String, role: &str| {
            if self.domain.is_member(state) {
                Ok(())
            } else {
                Err(EnumError::definition(
                    &kind,
                    format!("{role} state {state:?} is not a member"),
                ))
            }
        };

        if self.initial.is_empty() {
            return Err(EnumError::definition(&kind, "no initial states"));
        }
        let mut initial: Vec<String> = Vec::with_capacity(self.initial.len());
        for state in &self.initial {
            check(state, "initial")?;
            if !initial.contains(state) {
                initial.push(state.clone());
            }
        }

        let mut edges = BTreeMap::new();
        for (from, targets) in &self.edges {
            check(from, "source")?;
            let mut deduped: Vec<String> = Vec::with_capacity(targets.len());
            for target in targets {
                check(target, "target")?;
                if !deduped.contains(target) {
                    deduped.push(target.clone());
                }
            }
            if edges.insert(from.clone(), deduped).is_some() {
                return Err(EnumError::definition(
                    &kind,
                    format!("edges from {from:?} declared twice"),
                ));
            }
        }

        Ok(TransitionGraph {
            domain: self.domain,
            initial,
            edges,
        })
    }
}
