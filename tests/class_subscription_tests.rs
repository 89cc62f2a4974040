//! Tests for class-level subscription dispatch
//!
//! Verifies the dispatch order of `C[item]`: metatype item access first, then
//! the subscription hook found through the mro with the subscribed class
//! passed explicitly, and that instance-level item access is a completely
//! independent mechanism.

use classforge::{
    AliasFactory, ClassBody, ClassId, ClassRegistry, GenericAlias, Instance, Metatype,
    ResolveError, Value,
};

#[test]
fn test_subscription_hook_receives_subscribed_class() {
    println!("\n=== Testing Class Subscription Hook ===");

    let mut registry = ClassRegistry::new();
    let list = registry
        .construct(
            "List",
            &[],
            ClassBody::new().class_getitem(|registry: &ClassRegistry, cls: ClassId, item: &Value| {
                let name = registry.class_name(cls)?;
                let item = match item {
                    Value::Str(s) => s.clone(),
                    other => other.type_name().to_string(),
                };
                Ok(Value::Str(format!("{name}[{item}]")))
            }),
        )
        .unwrap();

    let result = registry.subscribe(list, &Value::Str("int".into())).unwrap();
    println!("  List[int] = {result:?}");
    assert_eq!(result, Value::Str("List[int]".into()));

    println!("✓ Hook receives the class explicitly and its result is returned as-is");
}

#[test]
fn test_subscription_inherited_through_mro() {
    println!("\n=== Testing Subscription Inheritance ===");

    let mut registry = ClassRegistry::new();
    let generic = registry
        .construct(
            "Generic",
            &[],
            ClassBody::new().class_getitem(|registry: &ClassRegistry, cls: ClassId, _item: &Value| {
                // The receiving class must be the subscribed subclass, not
                // the ancestor that defined the hook
                Ok(Value::Str(registry.class_name(cls)?.to_string()))
            }),
        )
        .unwrap();
    let mapping = registry
        .construct("Mapping", &[Value::Class(generic)], ClassBody::new())
        .unwrap();

    assert!(!registry.class(mapping).unwrap().defines_class_getitem());
    let result = registry.subscribe(mapping, &Value::Int(0)).unwrap();
    println!("  Mapping[0] dispatched to Generic's hook, bound to {result:?}");
    assert_eq!(result, Value::Str("Mapping".into()));

    println!("✓ Subscription hook is found via normal inheritance and bound to the subclass");
}

#[test]
fn test_instance_subscription_is_independent() {
    println!("\n=== Testing Class vs Instance Subscription Independence ===");

    let mut registry = ClassRegistry::new();
    let c = registry
        .construct(
            "Container",
            &[],
            ClassBody::new()
                .class_getitem(|_: &ClassRegistry, _cls: ClassId, _item: &Value| {
                    Ok(Value::Str("class-level".into()))
                })
                .instance_getitem(|_: &ClassRegistry, _inst: &Instance, item: &Value| {
                    // Unrelated behavior: echo the index back doubled
                    match item {
                        Value::Int(i) => Ok(Value::Int(i * 2)),
                        other => Ok(other.clone()),
                    }
                }),
        )
        .unwrap();

    let class_result = registry.subscribe(c, &Value::Int(21)).unwrap();
    println!("  Container[21] = {class_result:?}");
    assert_eq!(class_result, Value::Str("class-level".into()));

    let instance = registry.instantiate(c).unwrap();
    let instance_result = registry.subscribe_instance(&instance, &Value::Int(21)).unwrap();
    println!("  instance[21] = {instance_result:?}");
    assert_eq!(instance_result, Value::Int(42));

    println!("✓ Class subscription and instance item access are separate mechanisms");
}

#[test]
fn test_metatype_item_access_wins() {
    println!("\n=== Testing Metatype Precedence ===");

    let mut registry = ClassRegistry::new();
    let meta = Metatype::with_getitem("Meta", |_: &ClassRegistry, _cls: ClassId, _item: &Value| {
        Ok(Value::Str("metatype".into()))
    });
    let c = registry
        .construct(
            "Configured",
            &[],
            ClassBody::new()
                .metatype(meta)
                .class_getitem(|_: &ClassRegistry, _cls: ClassId, _item: &Value| {
                    Ok(Value::Str("class hook".into()))
                }),
        )
        .unwrap();

    let result = registry.subscribe(c, &Value::Int(1)).unwrap();
    println!("  Configured[1] = {result:?}");
    assert_eq!(result, Value::Str("metatype".into()));

    println!("✓ Meta-level item access takes priority over the class-level hook");
}

#[test]
fn test_unsubscriptable_class() {
    println!("\n=== Testing Unsubscriptable Class ===");

    let mut registry = ClassRegistry::new();
    let plain = registry.construct("Plain", &[], ClassBody::new()).unwrap();

    let err = registry.subscribe(plain, &Value::Int(0)).unwrap_err();
    println!("  Plain[0] = {err}");
    assert!(matches!(
        err,
        ResolveError::ClassNotSubscriptable { ref class } if class == "Plain"
    ));

    println!("✓ Classes with no hook anywhere in the mro reject subscription");
}

#[test]
fn test_alias_factory_builds_parameterized_alias() {
    println!("\n=== Testing Canonical Alias Factory ===");

    let mut registry = ClassRegistry::new();
    let list = registry
        .construct("List", &[], ClassBody::new().class_getitem(AliasFactory))
        .unwrap();

    let single = registry.subscribe(list, &Value::Str("int".into())).unwrap();
    let alias = single
        .downcast_object::<GenericAlias>()
        .expect("subscription should produce a GenericAlias");
    println!("  List[int] = {alias}");
    assert_eq!(alias.origin(), list);
    assert_eq!(alias.to_string(), "List[int]");

    // A tuple payload spreads into the alias arguments
    let pair = registry
        .subscribe(
            list,
            &Value::Tuple(vec![Value::Str("str".into()), Value::Str("int".into())]),
        )
        .unwrap();
    let alias = pair.downcast_object::<GenericAlias>().unwrap();
    println!("  List[str, int] = {alias}");
    assert_eq!(alias.args().len(), 2);
    assert_eq!(alias.to_string(), "List[str, int]");

    println!("✓ Canonical usage returns a parameterized alias remembering its origin");
}
