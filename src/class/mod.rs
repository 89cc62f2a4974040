//! Class objects and the registry that finalizes them.
//!
//! The registry owns every finalized class and exposes the two construction
//! primitives the engine deliberately keeps separate:
//!
//! - [`ClassRegistry::resolve_bases`], the explicit substitution phase over a
//!   declared base list;
//! - [`ClassRegistry::construct`], raw construction from an already-resolved
//!   base list, which never substitutes anything.
//!
//! [`ClassRegistry::define`] composes the two, the way declarative class
//! syntax would, and is the only path that records `orig_bases`.

pub mod bases;
mod mro;
pub mod subscript;

use crate::config::Settings;
use crate::error::{ResolveError, ResolveResult};
use crate::namespace::Namespace;
use crate::types::{ClassCounter, ClassId};
use crate::value::Value;
use bases::{ResolvedBases, Substitution};
use std::fmt;
use std::sync::Arc;
use subscript::{ClassGetItem, InstanceGetItem, Metatype};
use tracing::{debug, trace};

/// A finalized class object.
///
/// Holds the declared bases, the computed ancestor ordering, the preserved
/// original base tuple when substitution rewrote anything, the class body
/// namespace, and the optional hooks this class carries.
pub struct ClassObject {
    name: String,
    bases: Vec<ClassId>,
    mro: Vec<ClassId>,
    orig_bases: Option<Vec<Value>>,
    namespace: Namespace,
    metatype: Option<Arc<Metatype>>,
    class_getitem: Option<Arc<dyn ClassGetItem>>,
    instance_getitem: Option<Arc<dyn InstanceGetItem>>,
}

impl ClassObject {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared bases after resolution, in declaration order.
    pub fn bases(&self) -> &[ClassId] {
        &self.bases
    }

    /// Linear ancestor ordering, starting with this class.
    pub fn mro(&self) -> &[ClassId] {
        &self.mro
    }

    /// The pre-substitution base tuple. Present only when base resolution
    /// changed the declared list.
    pub fn orig_bases(&self) -> Option<&[Value]> {
        self.orig_bases.as_deref()
    }

    /// The class body namespace.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The governing metatype, if any.
    pub fn metatype(&self) -> Option<&Metatype> {
        self.metatype.as_deref()
    }

    /// True if this class itself defines the subscription hook.
    pub fn defines_class_getitem(&self) -> bool {
        self.class_getitem.is_some()
    }
}

impl fmt::Debug for ClassObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassObject")
            .field("name", &self.name)
            .field("bases", &self.bases)
            .field("mro", &self.mro)
            .field("orig_bases", &self.orig_bases.is_some())
            .field("metatype", &self.metatype.as_ref().map(|m| m.name()))
            .field("class_getitem", &self.class_getitem.is_some())
            .field("instance_getitem", &self.instance_getitem.is_some())
            .finish()
    }
}

/// The namespace body handed to class construction, plus the hooks the new
/// class opts into.
pub struct ClassBody {
    attrs: Namespace,
    metatype: Option<Arc<Metatype>>,
    class_getitem: Option<Arc<dyn ClassGetItem>>,
    instance_getitem: Option<Arc<dyn InstanceGetItem>>,
}

impl ClassBody {
    pub fn new() -> Self {
        Self {
            attrs: Namespace::new("<class body>"),
            metatype: None,
            class_getitem: None,
            instance_getitem: None,
        }
    }

    /// Bind an attribute in the class body.
    pub fn attr(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attrs.bind(name, value);
        self
    }

    /// Replace the body namespace wholesale (e.g. to attach a fallback
    /// resolver to the class body).
    pub fn namespace(mut self, namespace: Namespace) -> Self {
        self.attrs = namespace;
        self
    }

    /// Set an explicit governing metatype. Without one, the metatype is
    /// inherited from the first base.
    pub fn metatype(mut self, metatype: Metatype) -> Self {
        self.metatype = Some(Arc::new(metatype));
        self
    }

    /// Opt into the class-level subscription hook.
    pub fn class_getitem(mut self, hook: impl ClassGetItem + 'static) -> Self {
        self.class_getitem = Some(Arc::new(hook));
        self
    }

    /// Opt into instance-level item access.
    pub fn instance_getitem(mut self, hook: impl InstanceGetItem + 'static) -> Self {
        self.instance_getitem = Some(Arc::new(hook));
        self
    }
}

impl Default for ClassBody {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ClassBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassBody")
            .field("attrs", &self.attrs)
            .field("metatype", &self.metatype.as_ref().map(|m| m.name()))
            .field("class_getitem", &self.class_getitem.is_some())
            .field("instance_getitem", &self.instance_getitem.is_some())
            .finish()
    }
}

/// A minimal instance of a finalized class.
#[derive(Debug)]
pub struct Instance {
    class: ClassId,
    attrs: Namespace,
}

impl Instance {
    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn attrs(&self) -> &Namespace {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Namespace {
        &mut self.attrs
    }
}

/// Owner of all finalized class objects and home of the hook engine.
#[derive(Debug)]
pub struct ClassRegistry {
    classes: Vec<ClassObject>,
    counter: ClassCounter,
    settings: Settings,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            classes: Vec::new(),
            counter: ClassCounter::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Borrow a finalized class object.
    pub fn class(&self, id: ClassId) -> ResolveResult<&ClassObject> {
        self.classes
            .get((id.value() - 1) as usize)
            .ok_or(ResolveError::UnknownClass { id })
    }

    /// Convenience accessor for hook implementations.
    pub fn class_name(&self, id: ClassId) -> ResolveResult<&str> {
        Ok(self.class(id)?.name())
    }

    /// Resolve a declared base list: the explicit substitution phase.
    ///
    /// Class entries and non-class entries without the substitution
    /// capability pass through unchanged; entries carrying the capability are
    /// invoked with the entire original tuple and either replaced by the
    /// class they return or removed when they signal "no substitution".
    /// `orig_bases` is recorded iff anything changed.
    pub fn resolve_bases(&self, declared: &[Value]) -> ResolveResult<ResolvedBases> {
        let mut resolved = Vec::with_capacity(declared.len());
        let mut changed = false;

        for entry in declared {
            match entry {
                Value::Object(obj) => match obj.substitution() {
                    Some(hook) => match hook.substitute(declared)? {
                        Substitution::Replace(id) => {
                            trace!(entry = entry.type_name(), replacement = id.value(), "base substituted");
                            resolved.push(Value::Class(id));
                            changed = true;
                        }
                        Substitution::Remove => {
                            trace!(entry = entry.type_name(), "base removed by substitution hook");
                            changed = true;
                        }
                    },
                    // The engine offers resolution, it does not reject
                    // non-class bases outright
                    None => resolved.push(entry.clone()),
                },
                other => resolved.push(other.clone()),
            }
        }

        if self.settings.resolution.dedupe_resolved_bases {
            let mut seen: Vec<ClassId> = Vec::new();
            resolved.retain(|value| match value {
                Value::Class(id) => {
                    if seen.contains(id) {
                        changed = true;
                        false
                    } else {
                        seen.push(*id);
                        true
                    }
                }
                _ => true,
            });
        }

        debug_print!("resolve_bases: {} entries in, {} out, changed={changed}", declared.len(), resolved.len());

        Ok(ResolvedBases {
            bases: resolved,
            orig_bases: changed.then(|| declared.to_vec()),
        })
    }

    /// The raw construction primitive: build a class from a name, an
    /// already-resolved base list and a namespace body.
    ///
    /// Performs **no** base substitution: every base must already be a class
    /// object. Dynamic callers who need substitution run
    /// [`resolve_bases`](Self::resolve_bases) first; this keeps the
    /// unconditional primitive free of implicit transformation cost.
    pub fn construct(&mut self, name: &str, bases: &[Value], body: ClassBody) -> ResolveResult<ClassId> {
        let mut base_ids = Vec::with_capacity(bases.len());
        for base in bases {
            match base {
                Value::Class(id) => {
                    // Also validates the id belongs to this registry
                    self.class(*id)?;
                    base_ids.push(*id);
                }
                other => {
                    return Err(ResolveError::NonClassBase {
                        class: name.to_string(),
                        found: other.type_name().to_string(),
                    });
                }
            }
        }

        let id = self.counter.next_id();

        let classes = &self.classes;
        let mro = mro::linearize(id, &base_ids, |cid| {
            classes[(cid.value() - 1) as usize].mro()
        })
        .ok_or_else(|| ResolveError::InconsistentAncestorOrdering {
            class: name.to_string(),
            bases: self.render_bases(&base_ids),
        })?;

        // Explicit metatype wins, else the first base's metatype governs
        let metatype = body.metatype.clone().or_else(|| {
            base_ids
                .first()
                .and_then(|&b| self.classes[(b.value() - 1) as usize].metatype.clone())
        });

        debug!(class = name, id = id.value(), mro_len = mro.len(), "finalized class");

        self.classes.push(ClassObject {
            name: name.to_string(),
            bases: base_ids,
            mro,
            orig_bases: None,
            namespace: body.attrs,
            metatype,
            class_getitem: body.class_getitem,
            instance_getitem: body.instance_getitem,
        });

        Ok(id)
    }

    /// The declarative definition path: resolve the base list, construct the
    /// class, and preserve the original tuple when resolution changed it.
    pub fn define(&mut self, name: &str, bases: &[Value], body: ClassBody) -> ResolveResult<ClassId> {
        let resolved = self.resolve_bases(bases)?;
        let id = self.construct(name, &resolved.bases, body)?;
        if let Some(orig) = resolved.orig_bases {
            self.classes[(id.value() - 1) as usize].orig_bases = Some(orig);
        }
        Ok(id)
    }

    /// Subscribe a class object: `C[item]`.
    ///
    /// Dispatch order: the governing metatype's item access wins; otherwise
    /// the first subscription hook found along the mro is invoked with the
    /// subscribed class (not the defining ancestor) as its explicit first
    /// argument.
    pub fn subscribe(&self, cls: ClassId, item: &Value) -> ResolveResult<Value> {
        let class = self.class(cls)?;

        if let Some(metatype) = &class.metatype {
            if let Some(hook) = metatype.getitem() {
                trace!(class = %class.name, metatype = metatype.name(), "metatype item access takes precedence");
                return hook.class_getitem(self, cls, item);
            }
        }

        for &ancestor in class.mro() {
            if let Some(hook) = &self.class(ancestor)?.class_getitem {
                trace!(class = %class.name, defined_by = ancestor.value(), "dispatching class subscription hook");
                return hook.class_getitem(self, cls, item);
            }
        }

        Err(ResolveError::ClassNotSubscriptable {
            class: class.name.clone(),
        })
    }

    /// Create a bare instance of a finalized class.
    pub fn instantiate(&self, cls: ClassId) -> ResolveResult<Instance> {
        let class = self.class(cls)?;
        Ok(Instance {
            class: cls,
            attrs: Namespace::new(format!("{} instance", class.name)),
        })
    }

    /// Instance-level item access, resolved through the class mro.
    /// Independent of class-level subscription.
    pub fn subscribe_instance(&self, instance: &Instance, item: &Value) -> ResolveResult<Value> {
        let class = self.class(instance.class)?;
        for &ancestor in class.mro() {
            if let Some(hook) = &self.class(ancestor)?.instance_getitem {
                return hook.get_item(self, instance, item);
            }
        }
        Err(ResolveError::ClassNotSubscriptable {
            class: class.name.clone(),
        })
    }

    /// Normal class attribute lookup through the ancestor ordering.
    ///
    /// Each ancestor's body namespace is consulted with its own lookup rules
    /// (including any fallback it carries); the first hit wins.
    pub fn class_attr(&self, cls: ClassId, name: &str) -> ResolveResult<Value> {
        let class = self.class(cls)?;
        for &ancestor in class.mro() {
            match self.class(ancestor)?.namespace.lookup(name) {
                Ok(value) => return Ok(value),
                Err(ResolveError::AttributeNotFound { .. }) => continue,
                Err(other) => return Err(other),
            }
        }
        Err(ResolveError::attribute_not_found(&class.name, name))
    }

    /// Instance attribute lookup: the instance namespace first, then the
    /// class mro.
    pub fn instance_attr(&self, instance: &Instance, name: &str) -> ResolveResult<Value> {
        match instance.attrs.lookup(name) {
            Ok(value) => return Ok(value),
            Err(ResolveError::AttributeNotFound { .. }) => {}
            Err(other) => return Err(other),
        }
        self.class_attr(instance.class, name)
    }

    /// True if `child` has `parent` anywhere in its ancestor ordering.
    pub fn is_subclass(&self, child: ClassId, parent: ClassId) -> ResolveResult<bool> {
        Ok(self.class(child)?.mro.contains(&parent))
    }

    fn render_bases(&self, bases: &[ClassId]) -> String {
        bases
            .iter()
            .map(|&b| {
                self.class(b)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|_| format!("<unknown {}>", b.value()))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}
