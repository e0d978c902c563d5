mod common;

use common::{Fixture, point_record};
use symscope_api::{
    AccessSpecifier, CompilationUnit, ConstructorNode, ImportNode, MethodNode, ParameterNode,
    TypeDeclNode, TypeParameterNode, TypeRef,
};
use symscope_core::{
    CanonicalConstructorPolicy, RecordDeclaration, ResolveError, ResolvedType, ResolverConfig,
    SourceRef, TypeDeclaration, Universe,
};
use std::sync::Arc;

fn declaration(universe: &Universe, name: &str) -> Arc<dyn TypeDeclaration> {
    universe.solve_type(name).expect("declaration should be solvable")
}

#[test]
fn point_ancestors_are_record_then_comparable() {
    let universe = Fixture::new().decl("geo", point_record()).build();
    let point = declaration(&universe, "geo.Point");

    for accept in [true, false] {
        let ancestors = point.ancestors(accept).unwrap();
        let names: Vec<String> = ancestors.iter().map(|a| a.qualified_name()).collect();
        assert_eq!(names, vec!["java.lang.Record", "java.lang.Comparable"]);

        let comparable = &ancestors[1];
        assert_eq!(comparable.type_arguments().len(), 1);
        let arg = comparable.type_argument(0).unwrap();
        assert_eq!(
            arg.as_reference().map(|r| r.qualified_name()),
            Some("geo.Point".to_string())
        );
    }
}

#[test]
fn point_interfaces_and_components() {
    let universe = Fixture::new().decl("geo", point_record()).build();
    let point = declaration(&universe, "geo.Point");
    let point = point.as_record().expect("declared as a record");

    let interfaces = point.interfaces().unwrap();
    let names: Vec<String> = interfaces.iter().map(|i| i.qualified_name()).collect();
    assert_eq!(names, vec!["java.lang.Comparable"]);
    assert_eq!(interfaces[0].type_arguments().len(), 1);
    match &interfaces[0].type_arguments()[0] {
        ResolvedType::Lazy(slot) => assert!(!slot.is_forced()),
        other => panic!("expected a lazy slot, got {other:?}"),
    }
    let arg = interfaces[0].type_argument(0).unwrap();
    assert_eq!(
        arg.as_reference().map(|r| r.qualified_name()),
        Some("geo.Point".to_string())
    );

    let components: Vec<(String, String)> = point
        .components()
        .iter()
        .map(|c| (c.name().to_string(), c.type_ref().to_string()))
        .collect();
    assert_eq!(
        components,
        vec![
            ("x".to_string(), "int".to_string()),
            ("y".to_string(), "int".to_string())
        ]
    );
}

#[test]
fn point_has_one_canonical_constructor() {
    let universe = Fixture::new().decl("geo", point_record()).build();
    let point = declaration(&universe, "geo.Point");
    let constructors = point.constructors();
    assert_eq!(constructors.len(), 1);

    let canonical = &constructors[0];
    assert!(canonical.is_implicit());
    assert_eq!(canonical.name(), "Point");
    assert_eq!(canonical.access_specifier(), AccessSpecifier::Public);
    assert_eq!(canonical.param_count(), 2);
    assert_eq!(canonical.param(0).unwrap().name(), "x");
    assert_eq!(canonical.param(1).unwrap().name(), "y");
    assert_eq!(
        canonical.param(1).unwrap().resolve_type().unwrap(),
        ResolvedType::Primitive("int".to_string())
    );
    assert!(matches!(
        canonical.param(2),
        Err(ResolveError::IndexOutOfBounds { index: 2, len: 2 })
    ));
    assert_eq!(canonical.declaring_type().qualified_name(), "geo.Point");
    assert_eq!(canonical.signature(), "Point(int, int)");
}

#[test]
fn canonical_constructor_parameters_match_components() {
    for n in 0..5 {
        let mut node = TypeDeclNode::record("Tuple");
        for i in 0..n {
            node = node.with_component(format!("c{i}"), TypeRef::raw("java.lang.String"));
        }
        let universe = Fixture::new().decl("t", node).build();
        let tuple = declaration(&universe, "t.Tuple");
        let canonical = tuple
            .constructors()
            .into_iter()
            .last()
            .expect("canonical constructor is always present");

        assert_eq!(canonical.param_count(), n);
        assert_eq!(canonical.params(), tuple.as_record().unwrap().components());
    }
}

#[test]
fn canonical_constructor_exception_queries_always_fail() {
    let universe = Fixture::new().decl("geo", point_record()).build();
    let point = declaration(&universe, "geo.Point");
    let canonical = point.constructors().pop().unwrap();

    assert_eq!(canonical.specified_exception_count(), 0);
    for index in [0, 1, 7, usize::MAX] {
        assert!(matches!(
            canonical.specified_exception(index),
            Err(ResolveError::UnsupportedOperation(_))
        ));
    }
}

#[test]
fn unresolvable_comparable_depends_on_policy() {
    // No prelude: neither java.lang.Record nor Comparable can be found.
    let universe = Fixture::bare().decl("geo", point_record()).build();
    let point = declaration(&universe, "geo.Point");

    assert!(point.ancestors(true).unwrap().is_empty());
    match point.ancestors(false) {
        Err(ResolveError::UnresolvedAncestor { declaration, .. }) => {
            assert_eq!(declaration, "geo.Point")
        }
        other => panic!("expected UnresolvedAncestor, got {other:?}"),
    }
    assert!(point.as_record().unwrap().interfaces().is_err());
}

#[test]
fn unresolvable_interface_only() {
    let node = TypeDeclNode::record("Point")
        .with_component("x", TypeRef::raw("int"))
        .implements(TypeRef::generic("Comparabel", vec![TypeRef::raw("Point")]));
    let universe = Fixture::new().decl("geo", node).build();
    let point = declaration(&universe, "geo.Point");

    let names: Vec<String> = point
        .ancestors(true)
        .unwrap()
        .iter()
        .map(|a| a.qualified_name())
        .collect();
    assert_eq!(names, vec!["java.lang.Record"]);

    match point.ancestors(false) {
        Err(ResolveError::UnresolvedAncestor { name, .. }) => {
            assert_eq!(name, "Comparabel<Point>")
        }
        other => panic!("expected UnresolvedAncestor, got {other:?}"),
    }
}

#[test]
fn explicit_constructors_come_first() {
    let node = point_record()
        .with_constructor(
            ConstructorNode::new(vec![ParameterNode::new("both", TypeRef::raw("int"))])
                .with_modifiers(&["public"]),
        )
        .with_constructor(ConstructorNode::compact());
    let universe = Fixture::new().decl("geo", node).build();
    let point = declaration(&universe, "geo.Point");
    let constructors = point.constructors();

    let signatures: Vec<String> = constructors.iter().map(|c| c.signature()).collect();
    assert_eq!(signatures, vec!["Point(int)", "Point(int, int)"]);
    assert!(!constructors[0].is_implicit());
    assert!(constructors[1].is_implicit());
}

#[test]
fn explicit_canonical_is_duplicated_by_default() {
    let node = point_record().with_constructor(ConstructorNode::new(vec![
        ParameterNode::new("x", TypeRef::raw("int")),
        ParameterNode::new("y", TypeRef::raw("int")),
    ]));
    let universe = Fixture::new().decl("geo", node.clone()).build();
    let constructors = declaration(&universe, "geo.Point").constructors();
    assert_eq!(constructors.len(), 2);
    assert_eq!(constructors[0].signature(), constructors[1].signature());

    let universe = Fixture::new()
        .decl("geo", node)
        .config(
            ResolverConfig::default()
                .with_canonical_constructor_policy(CanonicalConstructorPolicy::SkipWhenDeclared),
        )
        .build();
    let constructors = declaration(&universe, "geo.Point").constructors();
    assert_eq!(constructors.len(), 1);
    assert!(!constructors[0].is_implicit());
}

#[test]
fn skip_policy_keeps_canonical_when_types_differ() {
    let node = point_record().with_constructor(ConstructorNode::new(vec![
        ParameterNode::new("x", TypeRef::raw("long")),
        ParameterNode::new("y", TypeRef::raw("long")),
    ]));
    let universe = Fixture::new()
        .decl("geo", node)
        .config(
            ResolverConfig::default()
                .with_canonical_constructor_policy(CanonicalConstructorPolicy::SkipWhenDeclared),
        )
        .build();
    let constructors = declaration(&universe, "geo.Point").constructors();
    assert_eq!(constructors.len(), 2);
    assert!(constructors[1].is_implicit());
}

#[test]
fn skip_policy_compares_resolved_parameter_types() {
    // record Label(String text) { Label(java.lang.String text) { ... } }
    let node = TypeDeclNode::record("Label")
        .with_component("text", TypeRef::raw("String"))
        .with_constructor(ConstructorNode::new(vec![ParameterNode::new(
            "text",
            TypeRef::raw("java.lang.String"),
        )]));
    let universe = Fixture::new()
        .decl("ui", node)
        .config(
            ResolverConfig::default()
                .with_canonical_constructor_policy(CanonicalConstructorPolicy::SkipWhenDeclared),
        )
        .build();
    let constructors = declaration(&universe, "ui.Label").constructors();
    assert_eq!(constructors.len(), 1);
    assert!(!constructors[0].is_implicit());
}

#[test]
fn implicit_fields_and_accessors() {
    let node = point_record()
        .with_method(MethodNode::new("x", TypeRef::raw("int")).with_modifiers(&["public"]))
        .with_method(
            MethodNode::new("distance", TypeRef::raw("double"))
                .with_parameters(vec![ParameterNode::new("other", TypeRef::raw("Point"))]),
        );
    let universe = Fixture::new().decl("geo", node).build();
    let point = declaration(&universe, "geo.Point");

    let fields = point.fields();
    assert_eq!(fields.len(), 2);
    assert!(fields.iter().all(|f| f.is_implicit()));
    assert!(fields
        .iter()
        .all(|f| f.access_specifier() == AccessSpecifier::Private));
    assert_eq!(fields[0].qualified_name(), "geo.Point#x");

    let methods: Vec<(String, bool)> = point
        .methods()
        .iter()
        .map(|m| (m.signature(), m.is_implicit()))
        .collect();
    assert_eq!(
        methods,
        vec![
            ("x()".to_string(), false),
            ("distance(Point)".to_string(), false),
            ("y()".to_string(), true),
        ]
    );

    let distance = &point.methods()[1];
    let param = distance.parameters()[0].resolve_type().unwrap();
    assert_eq!(
        param.as_reference().map(|r| r.qualified_name()),
        Some("geo.Point".to_string())
    );
}

#[test]
fn generic_record_type_parameters() {
    let node = TypeDeclNode::record("Pair")
        .with_type_parameter(TypeParameterNode::new("A"))
        .with_type_parameter(TypeParameterNode::bounded(
            "B",
            vec![TypeRef::raw("Number")],
        ))
        .with_component("first", TypeRef::raw("A"))
        .with_component("second", TypeRef::generic("java.util.List", vec![TypeRef::raw("B")]));
    let universe = Fixture::new().decl("util", node).build();
    let pair = declaration(&universe, "util.Pair");

    let params = pair.type_parameters();
    assert_eq!(params.len(), 2);
    assert_eq!(params[1].qualified_name(), "util.Pair.B");
    let bound = params[1].resolve_bounds().unwrap();
    assert_eq!(
        bound[0].as_reference().map(|r| r.qualified_name()),
        Some("java.lang.Number".to_string())
    );

    let canonical = pair.constructors().pop().unwrap();
    assert_eq!(canonical.type_parameters(), params);
    match canonical.param(0).unwrap().resolve_type().unwrap() {
        ResolvedType::TypeVariable(tv) => {
            assert_eq!(tv.name, "A");
            assert_eq!(tv.declarer, "util.Pair");
        }
        other => panic!("expected a type variable, got {other:?}"),
    }
    let second = canonical.param(1).unwrap().resolve_type().unwrap();
    let list = second.as_reference().unwrap();
    assert_eq!(list.qualified_name(), "java.util.List");
    assert!(matches!(
        list.type_argument(0).unwrap(),
        ResolvedType::TypeVariable(_)
    ));
}

#[test]
fn qualified_name_decomposition() {
    let unit = CompilationUnit::new(Some("geo.shapes")).with_type(
        TypeDeclNode::class("Canvas")
            .with_member(TypeDeclNode::record("Point").with_annotation("Deprecated")),
    );
    let universe = Fixture::new().unit(unit).build();
    let point = declaration(&universe, "geo.shapes.Canvas.Point");

    assert!(point.is_record());
    assert_eq!(point.name(), "Point");
    assert_eq!(point.package_name(), "geo.shapes");
    assert_eq!(point.class_name(), "Canvas.Point");
    assert_eq!(
        point.fully_qualified_name().as_deref(),
        Some("geo.shapes.Canvas.Point")
    );
    assert_eq!(
        point.container_type().map(|c| c.qualified_name()),
        Some("geo.shapes.Canvas".to_string())
    );
    assert!(point.has_directly_annotation("java.lang.Deprecated"));
    assert!(!point.has_directly_annotation("java.lang.FunctionalInterface"));

    let canvas = declaration(&universe, "geo.shapes.Canvas");
    assert!(canvas.has_internal_type("geo.shapes.Canvas.Point"));
    assert!(!canvas.is_record());
}

#[test]
fn detached_record_has_no_ancestors() {
    let universe = Fixture::new().build();
    let point = RecordDeclaration::detached(point_record(), universe).unwrap();

    assert_eq!(point.fully_qualified_name(), None);
    assert!(point.ancestors(false).unwrap().is_empty());
    assert!(point.interfaces().unwrap().is_empty());
    assert_eq!(point.constructors().len(), 1);
}

#[test]
fn record_view_requires_a_record_node() {
    let universe = Fixture::new().build();
    let unit = Arc::new(CompilationUnit::new(Some("geo")).with_type(TypeDeclNode::class("Shape")));
    let shape = SourceRef::top_level(unit, 0).unwrap();
    assert!(matches!(
        RecordDeclaration::new(shape, universe),
        Err(ResolveError::NotARecord(name)) if name == "geo.Shape"
    ));
}

#[test]
fn records_are_assignable_to_their_ancestors() {
    let universe = Fixture::new().decl("geo", point_record()).build();
    let point = declaration(&universe, "geo.Point");
    let comparable = declaration(&universe, "java.lang.Comparable");
    let base = declaration(&universe, "java.lang.Record");
    let object = declaration(&universe, "java.lang.Object");

    assert!(comparable.is_assignable_by_declaration(point.as_ref()));
    assert!(base.is_assignable_by_declaration(point.as_ref()));
    assert!(object.is_assignable_by_declaration(point.as_ref()));
    assert!(!point.is_assignable_by_declaration(comparable.as_ref()));
}

#[test]
fn annotations_match_by_resolved_name_only() {
    let unit = CompilationUnit::new(Some("app"))
        .with_import(ImportNode::single("x.Marker"))
        .with_type(
            TypeDeclNode::record("Tagged")
                .with_annotation("Marker")
                .with_annotation("Missing"),
        );
    let universe = Fixture::new()
        .decl("x", TypeDeclNode::interface("Marker"))
        .unit(unit)
        .build();
    let tagged = declaration(&universe, "app.Tagged");

    assert!(tagged.has_directly_annotation("x.Marker"));
    assert!(!tagged.has_directly_annotation("Marker"));
    assert!(!tagged.has_directly_annotation("app.Marker"));
    assert!(!tagged.has_directly_annotation("Missing"));
}
