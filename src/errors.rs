//! Core error taxonomy.
//!
//! Every failure is local and synchronous: the operation that triggered it
//! returns the error and leaves the container in its pre-call state. Retry
//! policy, if any, belongs to the caller.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid name: '{name}'")]
    InvalidName { name: String },

    #[error("name already exists: '{name}'")]
    DuplicateName { name: String },

    #[error("key not found: '{key}'")]
    KeyNotFound { key: String },

    #[error("set not found: '{name}'")]
    SetNotFound { name: String },

    #[error("cyclic set reference: '{name}'")]
    CyclicSetReference { name: String },

    #[error("reserved name: '{name}'")]
    ReservedName { name: String },

    #[error("set '{name}' is defined by an expression")]
    ExpressionSet { name: String },

    #[error("name sequence exhausted for prefix '{prefix}'")]
    NameSequenceExhausted { prefix: String },

    #[error("no {level} is selected")]
    NoSelection { level: String },

    #[error("unknown level: '{level}'")]
    UnknownLevel { level: String },
}

pub type CoreResult<T> = Result<T, CoreError>;
