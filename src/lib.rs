//! classforge: pluggable attribute resolution and dynamic class composition.
//!
//! Two hook mechanisms over a small embedded object model:
//!
//! - [`Namespace`] intercepts failed attribute lookups and delegates them to a
//!   user-supplied fallback resolver, consulted only on miss.
//! - [`ClassRegistry`] finalizes class objects with a class-level subscription
//!   hook (`C[item]` on the class itself, overridable by the class's governing
//!   metatype) and a base-substitution hook that resolves non-class entries in
//!   a declared base list before linearization.
//!
//! Base resolution and raw construction are deliberately separate phases:
//! [`ClassRegistry::construct`] never substitutes bases, so fully dynamic call
//! sites pay for resolution only when they ask for it via
//! [`ClassRegistry::resolve_bases`] (or use [`ClassRegistry::define`], which
//! composes the two).

// Debug macro for consistent debug output
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {
        if $crate::config::is_global_debug_enabled() {
            eprintln!("DEBUG: {}", format!($($arg)*));
        }
    };
}

pub mod alias;
pub mod class;
pub mod config;
pub mod error;
pub mod namespace;
pub mod types;
pub mod value;

// Explicit exports for better API clarity
pub use alias::{AliasFactory, GenericAlias};
pub use class::bases::{ResolvedBases, SubstituteBases, Substitution};
pub use class::subscript::{ClassGetItem, InstanceGetItem, Metatype};
pub use class::{ClassBody, ClassObject, ClassRegistry, Instance};
pub use config::Settings;
pub use error::{ResolveError, ResolveResult};
pub use namespace::{AttrFallback, Namespace};
pub use types::{ClassCounter, ClassId};
pub use value::{HostObject, Value};
