//! Error types for the resolution and class-composition engine
//!
//! This module provides structured error types using thiserror. The engine
//! raises exactly the errors below and never catches or re-wraps errors that
//! originate inside user hooks; those travel through [`ResolveError::Hook`]
//! untouched.

use crate::types::ClassId;
use thiserror::Error;

/// Main error type for lookup, subscription and class-construction operations
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Lookup missed and no fallback was registered, or the fallback declined
    #[error("attribute '{name}' not found in namespace '{namespace}'")]
    AttributeNotFound { namespace: String, name: String },

    /// The resolved base list cannot be linearized into a consistent ancestor
    /// ordering. Reported at class-definition time, never later at use time.
    #[error("cannot create a consistent ancestor ordering for class '{class}' (bases: {bases})")]
    InconsistentAncestorOrdering { class: String, bases: String },

    /// The raw construction primitive was handed a base that is not a class
    /// object. Callers building classes dynamically must resolve bases first.
    #[error(
        "base of class '{class}' is not a class object (got {found}). Run the base list through resolve_bases() before construct()."
    )]
    NonClassBase { class: String, found: String },

    /// Neither the metatype nor any class in the mro provides item access
    #[error("type '{class}' is not subscriptable")]
    ClassNotSubscriptable { class: String },

    /// A class id minted by a different registry (or a stale id) was used
    #[error("class id {id:?} is not registered in this registry")]
    UnknownClass { id: ClassId },

    /// Carrier for arbitrary errors raised inside a user hook. The engine
    /// propagates these unmodified to whoever triggered the operation.
    #[error("hook error: {0}")]
    Hook(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Configuration errors
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl ResolveError {
    /// Shorthand for the most common error in the crate.
    pub fn attribute_not_found(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::AttributeNotFound {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Wrap an arbitrary hook failure for propagation.
    pub fn hook(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Hook(Box::new(err))
    }

    /// Get a stable status code for this error type.
    ///
    /// Returns a string identifier that can be used in structured output
    /// for programmatic error handling.
    pub fn status_code(&self) -> &'static str {
        match self {
            Self::AttributeNotFound { .. } => "ATTRIBUTE_NOT_FOUND",
            Self::InconsistentAncestorOrdering { .. } => "INCONSISTENT_ANCESTOR_ORDERING",
            Self::NonClassBase { .. } => "NON_CLASS_BASE",
            Self::ClassNotSubscriptable { .. } => "CLASS_NOT_SUBSCRIPTABLE",
            Self::UnknownClass { .. } => "UNKNOWN_CLASS",
            Self::Hook(_) => "HOOK_ERROR",
            Self::Config { .. } => "CONFIG_ERROR",
        }
    }
}

/// Result type alias for engine operations
pub type ResolveResult<T> = Result<T, ResolveError>;
