use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::domain::EnumDomain;
use crate::error::EnumError;

/// One admissible value of a string-valued kind.
///
/// Only [`Enumeration::of`] creates instances, so holding one proves the
/// value belongs to its domain.
#[derive(Debug, Clone)]
pub struct Enumeration {
    domain: Arc<EnumDomain>,
    value: String,
}

impl Enumeration {
    pub fn of(domain: &Arc<EnumDomain>, value: impl Into<String>) -> Result<Self, EnumError> {
        let value = value.into();
        domain.ensure_member(&value)?;
        Ok(Self {
            domain: Arc::clone(domain),
            value,
        })
    }

    /// One instance per domain value, in definition order.
    pub fn all_as_objects(domain: &Arc<EnumDomain>) -> Vec<Self> {
        domain
            .values()
            .filter(|value| !value.is_empty())
            .map(|value| Self {
                domain: Arc::clone(domain),
                value: value.clone(),
            })
            .collect()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> &str {
        self.domain.kind()
    }

    pub fn domain(&self) -> &Arc<EnumDomain> {
        &self.domain
    }

    /// The symbolic name the value was declared under.
    pub fn name(&self) -> &str {
        self.domain.name_of(&self.value).unwrap_or_default()
    }

    pub fn is(&self, other: &str) -> bool {
        self.value == other
    }

    pub fn is_any<S: AsRef<str>>(&self, candidates: &[S]) -> bool {
        candidates.iter().any(|c| self.is(c.as_ref()))
    }

    pub fn is_not(&self, other: &str) -> bool {
        !self.is(other)
    }

    pub fn is_not_any<S: AsRef<str>>(&self, candidates: &[S]) -> bool {
        !self.is_any(candidates)
    }
}

impl PartialEq for Enumeration {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.value == other.value
    }
}

impl Eq for Enumeration {}

impl fmt::Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Serialize for Enumeration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}
