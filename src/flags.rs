//! Bitmask sets over a [`FlagDomain`].
//!
//! A [`FlagSet`] is built from a non-zero mask below `2^size`. Derived sets
//! from [`FlagSet::remove`] may reach zero, the "no flags" state, which is
//! never accepted by [`FlagSet::of`].

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::domain::FlagDomain;
use crate::error::EnumError;

#[derive(Debug, Clone)]
pub struct FlagSet {
    domain: Arc<FlagDomain>,
    bits: u64,
}

impl FlagSet {
    pub fn of(domain: &Arc<FlagDomain>, bits: u64) -> Result<Self, EnumError> {
        if !domain.accepts(bits) {
            return Err(EnumError::invalid(domain.kind(), bits));
        }
        Ok(Self::derive(domain, bits))
    }

    /// One single-flag set per domain constant, in definition order.
    pub fn all_as_objects(domain: &Arc<FlagDomain>) -> Vec<Self> {
        domain
            .domain()
            .values()
            .filter(|&&flag| flag != 0)
            .map(|&flag| Self::derive(domain, flag))
            .collect()
    }

    fn derive(domain: &Arc<FlagDomain>, bits: u64) -> Self {
        Self {
            domain: Arc::clone(domain),
            bits,
        }
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn kind(&self) -> &str {
        self.domain.kind()
    }

    pub fn domain(&self) -> &Arc<FlagDomain> {
        &self.domain
    }

    /// True only after every flag has been removed.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// `flags` equals the whole current mask.
    pub fn has_exact(&self, flags: u64) -> bool {
        self.bits == flags
    }

    /// `flags` shares at least one bit with the current mask.
    pub fn has_any(&self, flags: u64) -> bool {
        self.bits & flags != 0
    }

    /// Exact match or any overlap.
    ///
    /// For a single flag this reads as plain membership. For a combined mask
    /// it is "any of", so `has(READ | WRITE)` holds when only `READ` is set.
    /// Use [`has_exact`](Self::has_exact) or [`has_any`](Self::has_any) when
    /// the distinction matters at the call site.
    pub fn has(&self, flags: u64) -> bool {
        self.has_exact(flags) || self.has_any(flags)
    }

    pub fn has_not(&self, flags: u64) -> bool {
        !self.has(flags)
    }

    /// New set with `flags` added. Fails if the union reaches `2^size`.
    pub fn add(&self, flags: u64) -> Result<Self, EnumError> {
        let bits = self.bits | flags;
        if bits >= self.domain.limit() {
            return Err(EnumError::invalid(self.kind(), bits));
        }
        Ok(Self::derive(&self.domain, bits))
    }

    /// New set with `flags` cleared. The result is a subset of the current
    /// mask, so it is always in range.
    pub fn remove(&self, flags: u64) -> Self {
        Self::derive(&self.domain, self.bits & !flags)
    }

    /// Names of the constants set in this mask, in definition order.
    pub fn named_values(&self) -> Vec<&str> {
        self.domain
            .domain()
            .entries()
            .iter()
            .filter(|(_, flag)| self.has_any(*flag))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

impl PartialEq for FlagSet {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.bits == other.bits
    }
}

impl Eq for FlagSet {}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits)
    }
}

impl Serialize for FlagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValueDomain;

    const READ: u64 = 1;
    const WRITE: u64 = 1 << 1;
    const EXEC: u64 = 1 << 2;
    const SHARE: u64 = 1 << 3;

    fn perms() -> Arc<FlagDomain> {
        let domain = ValueDomain::builder("Permission")
            .value("READ", READ)
            .value("WRITE", WRITE)
            .value("EXEC", EXEC)
            .value("SHARE", SHARE)
            .build()
            .unwrap();
        Arc::new(FlagDomain::new(domain).unwrap())
    }

    #[test]
    fn of_accepts_exactly_the_open_range() {
        let domain = perms();
        for bits in 1..16 {
            assert!(FlagSet::of(&domain, bits).is_ok(), "bits {bits}");
        }
        assert_eq!(
            FlagSet::of(&domain, 0).unwrap_err(),
            EnumError::invalid("Permission", 0)
        );
        assert!(FlagSet::of(&domain, 16).is_err());
        assert!(FlagSet::of(&domain, u64::MAX).is_err());
    }

    #[test]
    fn has_is_reflexive_on_current_bits() {
        let domain = perms();
        for bits in 1..16 {
            let set = FlagSet::of(&domain, bits).unwrap();
            assert!(set.has(bits));
            assert!(set.has_exact(bits));
        }
    }

    #[test]
    fn has_single_flag_is_membership() {
        let set = FlagSet::of(&perms(), READ | EXEC).unwrap();
        assert!(set.has(READ));
        assert!(set.has(EXEC));
        assert!(set.has_not(WRITE));
        assert!(set.has_not(SHARE));
    }

    #[test]
    fn has_combined_mask_is_any_of() {
        let set = FlagSet::of(&perms(), READ).unwrap();
        assert!(set.has(READ | WRITE));
        assert!(set.has_any(READ | WRITE));
        assert!(!set.has_exact(READ | WRITE));
        assert!(set.has_not(WRITE | SHARE));
    }

    #[test]
    fn add_is_idempotent_and_commutative() {
        let set = FlagSet::of(&perms(), READ).unwrap();
        let once = set.add(WRITE).unwrap();
        assert_eq!(once.add(WRITE).unwrap(), once);
        assert_eq!(
            set.add(WRITE).unwrap().add(EXEC).unwrap(),
            set.add(EXEC).unwrap().add(WRITE).unwrap()
        );
        assert_eq!(once.bits(), READ | WRITE);
        // The receiver is unchanged.
        assert_eq!(set.bits(), READ);
    }

    #[test]
    fn add_rejects_out_of_range_result() {
        let set = FlagSet::of(&perms(), READ).unwrap();
        let err = set.add(16).unwrap_err();
        assert_eq!(err, EnumError::invalid("Permission", 17));
    }

    #[test]
    fn remove_is_idempotent_and_undoes_add() {
        let set = FlagSet::of(&perms(), READ | EXEC).unwrap();
        let removed = set.remove(EXEC);
        assert_eq!(removed.remove(EXEC), removed);
        assert_eq!(set.add(SHARE).unwrap().remove(SHARE), set);
        // Removing a bit that is not set is a no-op.
        assert_eq!(set.remove(WRITE), set);
    }

    #[test]
    fn remove_never_fails_even_to_empty() {
        let set = FlagSet::of(&perms(), WRITE).unwrap();
        let empty = set.remove(WRITE | 1024);
        assert!(empty.is_empty());
        assert_eq!(empty.bits(), 0);
        assert!(empty.named_values().is_empty());
        assert!(FlagSet::of(&perms(), empty.bits()).is_err());
    }

    #[test]
    fn named_values_follow_definition_order() {
        let set = FlagSet::of(&perms(), SHARE | READ | WRITE).unwrap();
        assert_eq!(set.named_values(), ["READ", "WRITE", "SHARE"]);
    }

    #[test]
    fn all_as_objects_yields_one_set_per_flag() {
        let all = FlagSet::all_as_objects(&perms());
        let bits: Vec<u64> = all.iter().map(FlagSet::bits).collect();
        assert_eq!(bits, [READ, WRITE, EXEC, SHARE]);
    }

    #[test]
    fn display_and_serialize_emit_bits() {
        let set = FlagSet::of(&perms(), READ | SHARE).unwrap();
        assert_eq!(set.to_string(), "9");
        assert_eq!(serde_json::to_string(&set).unwrap(), "9");
    }
}
