//! Base substitution: resolving non-class entries in a declared base list.
//!
//! Substitution runs once per class definition, before the class object is
//! constructed, and only through the explicit resolution phase; the raw
//! construction primitive never performs it.

use crate::error::ResolveResult;
use crate::types::ClassId;
use crate::value::Value;

/// Outcome of a single substitution hook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Substitution {
    /// Replace the entry with this class object
    Replace(ClassId),
    /// The "no substitution" signal: drop the entry from the resolved list
    Remove,
}

/// Capability carried by objects that can stand in for a class in a base
/// list.
///
/// The hook receives the entire original base tuple, enabling
/// context-sensitive substitution. Errors other than the structured
/// [`Substitution`] outcomes propagate to the class definition site
/// unmodified.
pub trait SubstituteBases: Send + Sync {
    fn substitute(&self, original_bases: &[Value]) -> ResolveResult<Substitution>;
}

/// A base list after the substitution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBases {
    /// The cleaned base list, ready for construction. Order is preserved
    /// positionally except for removals.
    pub bases: Vec<Value>,
    /// The pre-substitution tuple, present iff substitution altered anything.
    pub orig_bases: Option<Vec<Value>>,
}

impl ResolvedBases {
    /// True if substitution changed the declared base list.
    pub fn changed(&self) -> bool {
        self.orig_bases.is_some()
    }
}
