mod common;

use common::{MockTypeSystem, class, int, new_named, signatures};
use grail_api::models::TypeRef;
use grail_groovy::inference::InferContext;
use grail_groovy::resolve::{ConstructorResolver, named_arguments_type};
use grail_groovy::syntax::{ArgumentList, CodeReference, Expr, NamedArgument, NewExpr};

fn map() -> TypeRef {
    class("java.util.Map")
}

#[test]
fn map_constructor_wins_over_no_arg_constructor() {
    let ts = MockTypeSystem::new()
        .add_class("com.example.Config", None)
        .add_constructor("com.example.Config", vec![])
        .add_constructor("com.example.Config", vec![("values", map())]);
    let ctx = InferContext::new(&ts);
    let resolver = ConstructorResolver::default();

    let expr = new_named("Config", vec![("a", Expr::int("1")), ("b", Expr::int("2"))]);
    let results = resolver.resolve_uncached(&expr, false, &ctx);
    assert_eq!(signatures(&results), vec!["Config(java.util.Map values)"]);
    assert!(results[0].is_valid());
}

#[test]
fn map_inheritor_parameter_counts_as_map() {
    let ts = MockTypeSystem::new()
        .add_class("com.example.Config", None)
        .add_constructor("com.example.Config", vec![])
        .add_constructor(
            "com.example.Config",
            vec![("values", class("java.util.LinkedHashMap"))],
        );
    let ctx = InferContext::new(&ts);
    let resolver = ConstructorResolver::default();

    let results = resolver.resolve_uncached(&new_named("Config", vec![("a", Expr::int("1"))]), false, &ctx);
    assert_eq!(
        signatures(&results),
        vec!["Config(java.util.LinkedHashMap values)"]
    );
}

#[test]
fn falls_back_to_no_arg_constructor() {
    let ts = MockTypeSystem::new()
        .add_class("com.example.Person", None)
        .add_constructor("com.example.Person", vec![])
        .add_constructor("com.example.Person", vec![("name", class("java.lang.String"))]);
    let ctx = InferContext::new(&ts);
    let resolver = ConstructorResolver::default();

    let expr = new_named("Person", vec![("name", Expr::string("Ada")), ("age", Expr::int("36"))]);
    let results = resolver.resolve_uncached(&expr, false, &ctx);
    assert_eq!(signatures(&results), vec!["Person()"]);
}

#[test]
fn falls_back_to_implicit_default_constructor() {
    let ts = MockTypeSystem::new().add_class("com.example.Bean", None);
    let ctx = InferContext::new(&ts);
    let resolver = ConstructorResolver::default();

    let results = resolver.resolve_uncached(&new_named("Bean", vec![("id", Expr::int("7"))]), false, &ctx);
    assert_eq!(results.len(), 1);
    assert!(results[0].is_class_only());
    assert!(results[0].is_valid());
}

#[test]
fn object_parameter_is_not_a_map_constructor() {
    let ts = MockTypeSystem::new()
        .add_class("com.example.Holder", None)
        .add_constructor("com.example.Holder", vec![])
        .add_constructor("com.example.Holder", vec![("value", class("java.lang.Object"))]);
    let ctx = InferContext::new(&ts);
    let resolver = ConstructorResolver::default();

    let results = resolver.resolve_uncached(&new_named("Holder", vec![("a", Expr::int("1"))]), false, &ctx);
    assert_eq!(signatures(&results), vec!["Holder()"]);
}

#[test]
fn without_map_or_no_arg_constructor_map_is_a_plain_argument() {
    let ts = MockTypeSystem::new()
        .add_class("com.example.Holder", None)
        .add_constructor("com.example.Holder", vec![("value", class("java.lang.Object"))]);
    let ctx = InferContext::new(&ts);
    let resolver = ConstructorResolver::default();

    let results = resolver.resolve_uncached(&new_named("Holder", vec![("a", Expr::int("1"))]), false, &ctx);
    assert_eq!(signatures(&results), vec!["Holder(java.lang.Object value)"]);
    assert!(results[0].is_valid());

    // The map does not convert to a primitive.
    let strict = MockTypeSystem::new()
        .add_class("com.example.Strict", None)
        .add_constructor("com.example.Strict", vec![("x", int())]);
    let ctx = InferContext::new(&strict);
    let results = resolver.resolve_uncached(&new_named("Strict", vec![("x", Expr::int("1"))]), false, &ctx);
    assert!(results.is_empty());
}

#[test]
fn varargs_constructor_accepts_named_arguments_as_properties() {
    let ts = MockTypeSystem::new()
        .add_class("com.example.Loose", None)
        .add_varargs_constructor("com.example.Loose", "xs", int());
    let ctx = InferContext::new(&ts);
    let resolver = ConstructorResolver::default();

    let results = resolver.resolve_uncached(&new_named("Loose", vec![("x", Expr::int("1"))]), false, &ctx);
    assert_eq!(signatures(&results), vec!["Loose(int... xs)"]);
}

#[test]
fn mixed_named_and_positional_pass_map_first() {
    let ts = MockTypeSystem::new()
        .add_class("com.example.Node", None)
        .add_constructor("com.example.Node", vec![("id", int())])
        .add_constructor("com.example.Node", vec![("attrs", map()), ("id", int())]);
    let ctx = InferContext::new(&ts);
    let resolver = ConstructorResolver::default();

    let expr = NewExpr::of(CodeReference::new("Node")).with_arguments(ArgumentList {
        named: vec![NamedArgument::new("color", Expr::string("red"))],
        positional: vec![Expr::int("1")],
    });
    let results = resolver.resolve_uncached(&expr, false, &ctx);
    assert_eq!(signatures(&results), vec!["Node(java.util.Map attrs, int id)"]);
}

#[test]
fn named_argument_type_keeps_labels_in_order() {
    let ts = MockTypeSystem::new();
    let ctx = InferContext::new(&ts);
    let ty = named_arguments_type(
        &[
            NamedArgument::new("b", Expr::string("x")),
            NamedArgument::new("a", Expr::Opaque("f()".into())),
        ],
        &ctx,
    );
    assert_eq!(ty.to_string(), "[b: java.lang.String, a: ?unknown]");
}
