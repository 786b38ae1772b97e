//! # Error Types
//!
//! Every failure the helpers registry can report. All of them are usage errors
//! raised synchronously at the call site; the registry never retries or
//! recovers internally.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HelpersError {
    /// A helper or namespace is already bound under this name
    #[error("the name {name} is already bound in {namespace}")]
    DuplicateName { name: String, namespace: String },

    /// A bare namespace was invoked as if it were a helper
    #[error("the helper being called was not registered: {path}")]
    UnregisteredHelper { path: String },

    /// `register` was called on a helper instead of a namespace
    #[error(
        "helper functions cannot be used to register new helper functions; \
         use a namespace instead ({helper} is a helper)"
    )]
    LeafRegistration { helper: String },

    #[error("'{name}' is a reserved name and cannot be used in a helpers namespace")]
    ReservedName { name: String },

    #[error("invalid helper name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// The callable has no declared name to derive a registration name from
    #[error("cannot derive a helper name from {type_name}; register it with an explicit name")]
    AnonymousHelper { type_name: String },

    #[error("{helper} is a helper, not a namespace; cannot resolve '{attribute}' through it")]
    NotANamespace { helper: String, attribute: String },

    #[error("helper {helper} has signature {expected}, but was called as {requested}")]
    SignatureMismatch {
        helper: String,
        expected: String,
        requested: String,
    },

    #[error("the helpers registry is not attached to the current session")]
    NotAttached,

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<config::ConfigError> for HelpersError {
    fn from(error: config::ConfigError) -> Self {
        HelpersError::ConfigurationError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HelpersError>;
