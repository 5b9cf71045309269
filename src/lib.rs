//! Closed-set value types: enumerations, bitmask flags and auditable state
//! machines.
//!
//! Kinds are declared once, either through the builders in [`domain`] and
//! [`state_machine`] or from a TOML [`config`] loaded into a [`Catalog`].
//! Every value type is immutable; operations that look like mutation return
//! a new value.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod enumeration;
pub mod error;
pub mod flags;
pub mod state_machine;

pub use catalog::{Catalog, KindRef};
pub use config::CatalogConfig;
pub use domain::{DomainBuilder, EnumDomain, FlagDomain, ValueDomain};
pub use enumeration::Enumeration;
pub use error::{CatalogError, EnumError};
pub use flags::FlagSet;
pub use state_machine::{GraphBuilder, LogEntry, StateMachine, StateRecord, TransitionGraph};
