//! Subscription hooks: item access on class objects and instances.
//!
//! Class-level subscription (`C[item]`) is a class-scoped operation: the hook
//! always receives the subscribed class explicitly, never an instance, and no
//! special decoration is needed to mark it so. Dispatch order is fixed: the
//! governing metatype's item access wins over any class-level hook found
//! through the mro.

use crate::class::{ClassRegistry, Instance};
use crate::error::ResolveResult;
use crate::types::ClassId;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Class-level subscription hook.
///
/// `cls` is the class the subscription was performed on, which may be a
/// subclass of the class that defined the hook. The return value is
/// unconstrained; the canonical hook builds a parameterized alias.
///
/// Implemented for any matching `Fn` closure.
pub trait ClassGetItem: Send + Sync {
    fn class_getitem(
        &self,
        registry: &ClassRegistry,
        cls: ClassId,
        item: &Value,
    ) -> ResolveResult<Value>;
}

impl<F> ClassGetItem for F
where
    F: Fn(&ClassRegistry, ClassId, &Value) -> ResolveResult<Value> + Send + Sync,
{
    fn class_getitem(
        &self,
        registry: &ClassRegistry,
        cls: ClassId,
        item: &Value,
    ) -> ResolveResult<Value> {
        self(registry, cls, item)
    }
}

/// Instance-level item access, unrelated to class subscription.
///
/// Resolved through the instance's class mro, like any inherited behavior.
pub trait InstanceGetItem: Send + Sync {
    fn get_item(
        &self,
        registry: &ClassRegistry,
        instance: &Instance,
        item: &Value,
    ) -> ResolveResult<Value>;
}

impl<F> InstanceGetItem for F
where
    F: Fn(&ClassRegistry, &Instance, &Value) -> ResolveResult<Value> + Send + Sync,
{
    fn get_item(
        &self,
        registry: &ClassRegistry,
        instance: &Instance,
        item: &Value,
    ) -> ResolveResult<Value> {
        self(registry, instance, item)
    }
}

/// The governing meta-level type of a class.
///
/// When a metatype defines its own item access it takes precedence over the
/// class-level subscription hook; the class hook is a fallback for classes
/// whose metatype leaves subscription undefined.
pub struct Metatype {
    name: String,
    getitem: Option<Arc<dyn ClassGetItem>>,
}

impl Metatype {
    /// A metatype with no item-access behavior of its own.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            getitem: None,
        }
    }

    /// A metatype whose own item access overrides class-level hooks.
    pub fn with_getitem(name: impl Into<String>, hook: impl ClassGetItem + 'static) -> Self {
        Self {
            name: name.into(),
            getitem: Some(Arc::new(hook)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn getitem(&self) -> Option<&Arc<dyn ClassGetItem>> {
        self.getitem.as_ref()
    }
}

impl fmt::Debug for Metatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metatype")
            .field("name", &self.name)
            .field("getitem", &self.getitem.is_some())
            .finish()
    }
}
