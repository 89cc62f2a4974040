//! Namespaces with fallback attribute resolution.
//!
//! A [`Namespace`] is a plain name-to-value mapping owned by a single
//! enclosing unit of code (a module, a class body, an instance). It may carry
//! at most one fallback resolver, attached at construction time; the fallback
//! is consulted only when normal lookup misses, and its result is never
//! cached, so dynamic behavior such as lazy loading or deprecation warnings
//! runs once per miss.

use crate::error::{ResolveError, ResolveResult};
use crate::value::Value;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Fallback resolver consulted on lookup miss.
///
/// The resolver receives exactly the missing identifier. It either returns a
/// value, declines by returning [`ResolveError::AttributeNotFound`] (the
/// engine re-raises it naming the owning namespace), or fails with any other
/// error, which propagates to the caller unmodified.
///
/// Implemented for any `Fn(&str) -> ResolveResult<Value>` closure.
pub trait AttrFallback: Send + Sync {
    fn resolve(&self, name: &str) -> ResolveResult<Value>;
}

impl<F> AttrFallback for F
where
    F: Fn(&str) -> ResolveResult<Value> + Send + Sync,
{
    fn resolve(&self, name: &str) -> ResolveResult<Value> {
        self(name)
    }
}

/// A mapping from identifier to value with optional fallback resolution.
pub struct Namespace {
    name: String,
    bindings: HashMap<String, Value>,
    fallback: Option<Box<dyn AttrFallback>>,
}

impl Namespace {
    /// Create a namespace without a fallback resolver. Missed lookups fail
    /// immediately.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bindings: HashMap::new(),
            fallback: None,
        }
    }

    /// Create a namespace with a fallback resolver.
    ///
    /// This is the only way to attach a fallback: a namespace carries at most
    /// one for its whole lifetime, so there is no setter to call twice.
    pub fn with_fallback(name: impl Into<String>, fallback: impl AttrFallback + 'static) -> Self {
        Self {
            name: name.into(),
            bindings: HashMap::new(),
            fallback: Some(Box::new(fallback)),
        }
    }

    /// The name of the owning unit of code, used in error messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bind a value to an identifier, replacing any previous binding.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Remove a binding, returning its value if present.
    pub fn unbind(&mut self, name: &str) -> Option<Value> {
        self.bindings.remove(name)
    }

    /// Raw access to a binding. Never consults the fallback.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// True if the identifier is bound through normal lookup.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// True if a fallback resolver is attached.
    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Full attribute lookup: normal lookup first, then the fallback.
    ///
    /// The fallback is never consulted for identifiers present through normal
    /// lookup, and a hit costs nothing extra. On miss, a declining fallback
    /// surfaces as the same error a genuinely absent attribute produces.
    pub fn lookup(&self, name: &str) -> ResolveResult<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Ok(value.clone());
        }

        match &self.fallback {
            Some(fallback) => {
                trace!(namespace = %self.name, name, "lookup miss, consulting fallback");
                match fallback.resolve(name) {
                    Ok(value) => Ok(value),
                    Err(ResolveError::AttributeNotFound { .. }) => {
                        // The fallback declined; re-raise naming this namespace
                        Err(ResolveError::attribute_not_found(&self.name, name))
                    }
                    // Any other fallback error propagates unmodified
                    Err(other) => Err(other),
                }
            }
            None => Err(ResolveError::attribute_not_found(&self.name, name)),
        }
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("name", &self.name)
            .field("bindings", &self.bindings.len())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}
