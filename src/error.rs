use thiserror::Error;

/// Failures raised by domains, enumerations, flag sets and state machines.
///
/// `DomainDefinition` is a defect in how a kind was declared and surfaces at
/// registration. Every other variant is a value-level rejection: the caller
/// gets nothing back and any prior value stays untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumError {
    #[error("invalid definition for {kind}: {reason}")]
    DomainDefinition { kind: String, reason: String },

    #[error("{value:?} is not a valid {kind}")]
    InvalidValue { kind: String, value: String },

    #[error("{kind} can't start from {value:?}")]
    IllegalInitialState { kind: String, value: String },

    #[error("{kind} can't transition from {from:?} to {to:?}")]
    IllegalTransition {
        kind: String,
        from: String,
        to: String,
    },

    #[error("corrupt {kind} log: {reason}")]
    CorruptLog { kind: String, reason: String },
}

impl EnumError {
    pub(crate) fn definition(kind: &str, reason: impl Into<String>) -> Self {
        Self::DomainDefinition {
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(kind: &str, value: impl ToString) -> Self {
        Self::InvalidValue {
            kind: kind.to_string(),
            value: value.to_string(),
        }
    }
}

/// Errors from loading and registering a catalog of kinds.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Domain(#[from] EnumError),

    #[error("Unknown kind: {0}")]
    UnknownKind(String),

    #[error("Kind declared twice: {0}")]
    DuplicateKind(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_display() {
        let err = EnumError::invalid("Color", "purple");
        assert_eq!(err.to_string(), "\"purple\" is not a valid Color");
    }

    #[test]
    fn illegal_transition_display() {
        let err = EnumError::IllegalTransition {
            kind: "Step".into(),
            from: "Paso1".into(),
            to: "Paso4".into(),
        };
        assert_eq!(
            err.to_string(),
            "Step can't transition from \"Paso1\" to \"Paso4\""
        );
    }

    #[test]
    fn catalog_error_wraps_domain_error() {
        let err: CatalogError = EnumError::definition("Perm", "gap at 4").into();
        assert!(matches!(err, CatalogError::Domain(_)));
        assert_eq!(err.to_string(), "invalid definition for Perm: gap at 4");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EnumError>();
        assert_send_sync::<CatalogError>();
    }
}
