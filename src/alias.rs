//! Parameterized aliases: the canonical use of both class hooks.
//!
//! A [`GenericAlias`] pairs an origin class with argument data. It is the
//! usual result of class subscription (`List[int]`), and it carries the
//! base-substitution capability so it can appear in a base list and be
//! replaced by its origin before linearization.

use crate::class::ClassRegistry;
use crate::class::bases::{SubstituteBases, Substitution};
use crate::class::subscript::ClassGetItem;
use crate::error::ResolveResult;
use crate::types::ClassId;
use crate::value::{HostObject, Value};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// An object representing a class parameterized by extra argument data,
/// remembering which class it originated from.
#[derive(Debug, Clone)]
pub struct GenericAlias {
    origin: ClassId,
    origin_name: String,
    args: Vec<Value>,
}

impl GenericAlias {
    pub fn new(origin: ClassId, origin_name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            origin,
            origin_name: origin_name.into(),
            args,
        }
    }

    /// The class this alias was created from.
    pub fn origin(&self) -> ClassId {
        self.origin
    }

    pub fn origin_name(&self) -> &str {
        &self.origin_name
    }

    /// The subscription arguments the alias carries.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Wrap the alias as an engine value.
    pub fn into_value(self) -> Value {
        Value::Object(Arc::new(self))
    }

    fn render_arg(arg: &Value) -> String {
        match arg {
            Value::None => "None".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Str(s) => s.clone(),
            Value::Tuple(items) => {
                let inner: Vec<_> = items.iter().map(Self::render_arg).collect();
                format!("({})", inner.join(", "))
            }
            Value::Class(id) => format!("<class {}>", id.value()),
            Value::Object(obj) => obj.type_name().to_string(),
        }
    }
}

impl fmt::Display for GenericAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<_> = self.args.iter().map(Self::render_arg).collect();
        write!(f, "{}[{}]", self.origin_name, args.join(", "))
    }
}

impl HostObject for GenericAlias {
    fn type_name(&self) -> &str {
        "GenericAlias"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn substitution(&self) -> Option<&dyn SubstituteBases> {
        Some(self)
    }
}

impl SubstituteBases for GenericAlias {
    /// An alias in a base list stands for its origin class.
    fn substitute(&self, _original_bases: &[Value]) -> ResolveResult<Substitution> {
        Ok(Substitution::Replace(self.origin))
    }
}

/// The canonical subscription hook: `C[item]` yields a [`GenericAlias`] with
/// origin `C`. A tuple payload spreads into the alias arguments; anything
/// else becomes a single argument.
pub struct AliasFactory;

impl ClassGetItem for AliasFactory {
    fn class_getitem(
        &self,
        registry: &ClassRegistry,
        cls: ClassId,
        item: &Value,
    ) -> ResolveResult<Value> {
        let origin_name = registry.class_name(cls)?.to_string();
        let args = match item {
            Value::Tuple(items) => items.clone(),
            other => vec![other.clone()],
        };
        Ok(GenericAlias::new(cls, origin_name, args).into_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_form() {
        let alias = GenericAlias::new(
            ClassId::new(1).unwrap(),
            "List",
            vec![Value::Str("int".into())],
        );
        assert_eq!(alias.to_string(), "List[int]");

        let pair = GenericAlias::new(
            ClassId::new(2).unwrap(),
            "Dict",
            vec![Value::Str("str".into()), Value::Int(3)],
        );
        assert_eq!(pair.to_string(), "Dict[str, 3]");
    }

    #[test]
    fn test_alias_substitution_yields_origin() {
        let origin = ClassId::new(7).unwrap();
        let alias = GenericAlias::new(origin, "Base", vec![]);
        let outcome = alias.substitute(&[]).unwrap();
        assert_eq!(outcome, Substitution::Replace(origin));
    }
}
