//! The dynamic value type flowing through the engine.
//!
//! `Value` is deliberately small: just enough of a host object model for
//! namespaces, class bodies, subscription payloads and base lists. Anything
//! richer lives behind [`HostObject`], the capability-probe seam: instead of
//! probing for specially-named attributes, the engine asks an object whether
//! it carries a given hook and skips it otherwise.

use crate::class::bases::SubstituteBases;
use crate::types::ClassId;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An opaque host object carried inside a [`Value`].
///
/// Implementors opt into engine hooks by overriding the capability accessors;
/// the default answers are "this object does not carry that hook".
pub trait HostObject: fmt::Debug + Send + Sync {
    /// Human-readable type name, used in diagnostics and error messages.
    fn type_name(&self) -> &str;

    /// Get as Any for downcasting (needed for host-specific operations)
    fn as_any(&self) -> &dyn Any;

    /// Capability probe: the base-substitution hook, if this object carries
    /// one. Objects without it are kept unchanged when they appear in a base
    /// list.
    fn substitution(&self) -> Option<&dyn SubstituteBases> {
        None
    }
}

/// A value in the host object model.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Str(String),
    Tuple(Vec<Value>),
    /// Reference to a finalized class object in a registry
    Class(ClassId),
    /// Opaque host object, probed for capabilities via [`HostObject`]
    Object(Arc<dyn HostObject>),
}

impl Value {
    /// Human-readable type name, used in diagnostics and error messages.
    pub fn type_name(&self) -> &str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
            Value::Tuple(_) => "tuple",
            Value::Class(_) => "class",
            Value::Object(obj) => obj.type_name(),
        }
    }

    /// Borrow the contained host object as a concrete type, if it is one.
    pub fn downcast_object<T: 'static>(&self) -> Option<&T> {
        match self {
            Value::Object(obj) => obj.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// True if this value is a class reference.
    pub fn is_class(&self) -> bool {
        matches!(self, Value::Class(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Class(a), Value::Class(b)) => a == b,
            // Host objects compare by identity, not structure
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<ClassId> for Value {
    fn from(v: ClassId) -> Self {
        Value::Class(v)
    }
}
