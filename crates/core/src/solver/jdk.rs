//! Minimal JDK metadata, enough to resolve the ancestors of ordinary source
//! types without a real class path.

use super::stub::{StubTypeSolver, TypeStub};
use symscope_api::{
    ConstructorNode, MethodNode, ParameterNode, TypeDeclNode, TypeParameterNode, TypeRef,
};

fn public_method(name: &str, return_type: TypeRef, params: Vec<ParameterNode>) -> MethodNode {
    MethodNode::new(name, return_type)
        .with_parameters(params)
        .with_modifiers(&["public"])
}

fn abstract_method(name: &str, return_type: TypeRef, params: Vec<ParameterNode>) -> MethodNode {
    MethodNode::new(name, return_type)
        .with_parameters(params)
        .with_modifiers(&["public", "abstract"])
}

fn public_no_arg_constructor() -> ConstructorNode {
    ConstructorNode::new(Vec::new()).with_modifiers(&["public"])
}

fn self_comparable(qualified_name: &str) -> TypeRef {
    TypeRef::generic("java.lang.Comparable", vec![TypeRef::raw(qualified_name)])
}

fn java_lang() -> Vec<TypeStub> {
    let object = TypeDeclNode::class("Object")
        .with_modifiers(&["public"])
        .with_constructor(public_no_arg_constructor())
        .with_method(public_method("toString", TypeRef::raw("java.lang.String"), vec![]))
        .with_method(public_method("hashCode", TypeRef::raw("int"), vec![]))
        .with_method(public_method(
            "equals",
            TypeRef::raw("boolean"),
            vec![ParameterNode::new("obj", TypeRef::raw("java.lang.Object"))],
        ));

    let record = TypeDeclNode::class("Record")
        .with_modifiers(&["public", "abstract"])
        .extends(TypeRef::raw("java.lang.Object"))
        .with_constructor(ConstructorNode::new(Vec::new()).with_modifiers(&["protected"]));

    let comparable = TypeDeclNode::interface("Comparable")
        .with_modifiers(&["public"])
        .with_type_parameter(TypeParameterNode::new("T"))
        .with_method(abstract_method(
            "compareTo",
            TypeRef::raw("int"),
            vec![ParameterNode::new("o", TypeRef::raw("T"))],
        ));

    let enumeration = TypeDeclNode::class("Enum")
        .with_modifiers(&["public", "abstract"])
        .with_type_parameter(TypeParameterNode::bounded(
            "E",
            vec![TypeRef::generic("java.lang.Enum", vec![TypeRef::raw("E")])],
        ))
        .extends(TypeRef::raw("java.lang.Object"))
        .implements(TypeRef::generic("java.lang.Comparable", vec![TypeRef::raw("E")]))
        .implements(TypeRef::raw("java.io.Serializable"))
        .with_method(public_method("name", TypeRef::raw("java.lang.String"), vec![]))
        .with_method(public_method("ordinal", TypeRef::raw("int"), vec![]));

    let string = TypeDeclNode::class("String")
        .with_modifiers(&["public", "final"])
        .extends(TypeRef::raw("java.lang.Object"))
        .implements(TypeRef::raw("java.io.Serializable"))
        .implements(self_comparable("java.lang.String"))
        .with_constructor(public_no_arg_constructor())
        .with_method(public_method("length", TypeRef::raw("int"), vec![]))
        .with_method(public_method("isEmpty", TypeRef::raw("boolean"), vec![]));

    let number = TypeDeclNode::class("Number")
        .with_modifiers(&["public", "abstract"])
        .extends(TypeRef::raw("java.lang.Object"))
        .implements(TypeRef::raw("java.io.Serializable"))
        .with_constructor(public_no_arg_constructor())
        .with_method(abstract_method("intValue", TypeRef::raw("int"), vec![]));

    let integer = TypeDeclNode::class("Integer")
        .with_modifiers(&["public", "final"])
        .extends(TypeRef::raw("java.lang.Number"))
        .implements(self_comparable("java.lang.Integer"))
        .with_constructor(
            ConstructorNode::new(vec![ParameterNode::new("value", TypeRef::raw("int"))])
                .with_modifiers(&["public"]),
        )
        .with_method(public_method("intValue", TypeRef::raw("int"), vec![]));

    let cloneable = TypeDeclNode::interface("Cloneable").with_modifiers(&["public"]);

    let runnable = TypeDeclNode::interface("Runnable")
        .with_modifiers(&["public"])
        .with_method(abstract_method("run", TypeRef::raw("void"), vec![]));

    let iterable = TypeDeclNode::interface("Iterable")
        .with_modifiers(&["public"])
        .with_type_parameter(TypeParameterNode::new("T"));

    let deprecated = TypeDeclNode::interface("Deprecated").with_modifiers(&["public"]);
    let functional = TypeDeclNode::interface("FunctionalInterface").with_modifiers(&["public"]);

    [
        object,
        record,
        comparable,
        enumeration,
        string,
        number,
        integer,
        cloneable,
        runnable,
        iterable,
        deprecated,
        functional,
    ]
    .into_iter()
    .map(|node| TypeStub::new("java.lang", node))
    .collect()
}

fn java_io() -> Vec<TypeStub> {
    vec![TypeStub::new(
        "java.io",
        TypeDeclNode::interface("Serializable").with_modifiers(&["public"]),
    )]
}

fn java_util() -> Vec<TypeStub> {
    let collection = TypeDeclNode::interface("Collection")
        .with_modifiers(&["public"])
        .with_type_parameter(TypeParameterNode::new("E"))
        .implements(TypeRef::generic("java.lang.Iterable", vec![TypeRef::raw("E")]))
        .with_method(abstract_method("size", TypeRef::raw("int"), vec![]))
        .with_method(abstract_method(
            "add",
            TypeRef::raw("boolean"),
            vec![ParameterNode::new("e", TypeRef::raw("E"))],
        ));

    let list = TypeDeclNode::interface("List")
        .with_modifiers(&["public"])
        .with_type_parameter(TypeParameterNode::new("E"))
        .implements(TypeRef::generic("java.util.Collection", vec![TypeRef::raw("E")]))
        .with_method(abstract_method(
            "get",
            TypeRef::raw("E"),
            vec![ParameterNode::new("index", TypeRef::raw("int"))],
        ));

    vec![
        TypeStub::new("java.util", collection),
        TypeStub::new("java.util", list),
    ]
}

impl StubTypeSolver {
    /// Stubs for the handful of JDK types every Java program leans on:
    /// `Object`, `Record`, `Enum`, `Comparable`, `String`, boxed numbers,
    /// `Serializable` and the core collection interfaces.
    pub fn jdk_prelude() -> Self {
        let mut solver = Self::new();
        for stub in java_lang().into_iter().chain(java_io()).chain(java_util()) {
            solver.add(stub);
        }
        solver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::TypeDeclaration;
    use crate::solver::Universe;

    #[test]
    fn prelude_covers_the_java_lang_essentials() {
        let prelude = StubTypeSolver::jdk_prelude();
        for name in [
            "java.lang.Object",
            "java.lang.Record",
            "java.lang.Enum",
            "java.lang.Comparable",
            "java.lang.String",
            "java.io.Serializable",
            "java.util.List",
        ] {
            assert!(prelude.contains(name), "missing {name}");
        }
    }

    #[test]
    fn prelude_ancestors_resolve_among_themselves() {
        let universe = Universe::new(StubTypeSolver::jdk_prelude());
        let list = universe.solve_type("java.util.List").unwrap();
        let names: Vec<String> = list
            .all_ancestors(false)
            .unwrap()
            .iter()
            .map(|a| a.qualified_name())
            .collect();
        assert_eq!(names, vec!["java.util.Collection", "java.lang.Iterable"]);

        let object = universe.solve_type("java.lang.Object").unwrap();
        assert!(object.ancestors(false).unwrap().is_empty());
    }
}
