//! Declarative value domains.
//!
//! A [`ValueDomain`] is the closed set of admissible primitives for one kind,
//! listed once through [`DomainBuilder`] in definition order. A
//! [`FlagDomain`] is a `u64` domain that has passed the power-of-two shape
//! check, which is the only way to obtain one.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use tracing::debug;

use crate::error::EnumError;

/// Largest flag domain whose full mask still fits in a `u64`.
pub const MAX_FLAGS: usize = 63;

/// Domain of string-valued enumerations and states.
pub type EnumDomain = ValueDomain<String>;

/// The ordered, duplicate-free `{name -> value}` listing of a kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDomain<V> {
    kind: String,
    entries: Vec<(String, V)>,
}

impl<V> ValueDomain<V>
where
    V: Clone + Eq + Hash + fmt::Display,
{
    pub fn builder(kind: impl Into<String>) -> DomainBuilder<V> {
        DomainBuilder {
            kind: kind.into(),
            entries: Vec::new(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Admissible values in definition order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Symbolic names in definition order.
    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn entries(&self) -> &[(String, V)] {
        &self.entries
    }

    pub fn is_member(&self, value: &V) -> bool {
        self.entries.iter().any(|(_, v)| v == value)
    }

    /// Reverse lookup from a value to the name it was declared under.
    pub fn name_of(&self, value: &V) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, v)| v == value)
            .map(|(name, _)| name.as_str())
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Fails unless `value` is a member, mapping it to `InvalidValue`.
    pub(crate) fn ensure_member(&self, value: &V) -> Result<(), EnumError> {
        if self.is_member(value) {
            Ok(())
        } else {
            Err(EnumError::invalid(&self.kind, value))
        }
    }
}

impl ValueDomain<u64> {
    /// Checks that the values, sorted ascending, are exactly `1, 2, 4, ...`.
    ///
    /// The check depends only on the declaration, never on a particular
    /// bitmask, so it can run once when the kind is registered.
    pub fn assert_flag_shape(&self) -> Result<(), EnumError> {
        if self.size() > MAX_FLAGS {
            return Err(EnumError::definition(
                &self.kind,
                format!("{} flags exceed the limit of {MAX_FLAGS}", self.size()),
            ));
        }

        let mut sorted: Vec<u64> = self.values().copied().collect();
        sorted.sort_unstable();
        for (position, flag) in sorted.into_iter().enumerate() {
            let expected = 1u64 << position;
            if flag != expected {
                return Err(EnumError::definition(
                    &self.kind,
                    format!("expected flag {expected} at position {position}, found {flag}"),
                ));
            }
        }
        Ok(())
    }
}

/// Collects `{name -> value}` pairs for one kind.
#[derive(Debug, Clone)]
pub struct DomainBuilder<V> {
    kind: String,
    entries: Vec<(String, V)>,
}

impl<V> DomainBuilder<V>
where
    V: Clone + Eq + Hash + fmt::Display,
{
    pub fn value(mut self, name: impl Into<String>, value: V) -> Self {
        self.entries.push((name.into(), value));
        self
    }

    /// Registers the domain, rejecting blank kinds and duplicate names or values.
    pub fn build(self) -> Result<ValueDomain<V>, EnumError> {
        if self.kind.trim().is_empty() {
            return Err(EnumError::definition(&self.kind, "kind name is empty"));
        }

        let mut names = HashSet::new();
        let mut values = HashSet::new();
        for (name, value) in &self.entries {
            if !names.insert(name.as_str()) {
                return Err(EnumError::definition(
                    &self.kind,
                    format!("name {name} declared twice"),
                ));
            }
            if !values.insert(value) {
                return Err(EnumError::definition(
                    &self.kind,
                    format!("value {value} declared twice"),
                ));
            }
        }

        debug!(kind = %self.kind, size = self.entries.len(), "registered domain");
        Ok(ValueDomain {
            kind: self.kind,
            entries: self.entries,
        })
    }
}

/// A `u64` domain whose constants form a contiguous power-of-two sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDomain {
    domain: ValueDomain<u64>,
    limit: u64,
}

impl FlagDomain {
    pub fn new(domain: ValueDomain<u64>) -> Result<Self, EnumError> {
        domain.assert_flag_shape()?;
        let limit = 1u64 << domain.size();
        Ok(Self { domain, limit })
    }

    pub fn domain(&self) -> &ValueDomain<u64> {
        &self.domain
    }

    pub fn kind(&self) -> &str {
        self.domain.kind()
    }

    pub fn size(&self) -> usize {
        self.domain.size()
    }

    /// Exclusive upper bound for a bitmask, `2^size`.
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Whether `bits` is a constructible mask: non-zero and below the limit.
    pub fn accepts(&self, bits: u64) -> bool {
        bits > 0 && bits < self.limit
    }
}
