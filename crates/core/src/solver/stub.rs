//! Precompiled-metadata backend.
//!
//! A [`TypeStub`] describes a type whose source is not available, e.g. a
//! library class. All names inside a stub are written fully qualified.

use super::{TypeSolver, Universe};
use crate::declarations::{Decl, StubTypeDeclaration};
use crate::error::Result;
use crate::naming::{self, TYPE_SEPARATOR};
use crate::symbol::SymbolReference;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use symscope_api::TypeDeclNode;

/// Metadata of one precompiled type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeStub {
    pub package: String,
    /// Dotted for nested types, e.g. `Map.Entry`
    pub class_name: String,
    pub node: TypeDeclNode,
}

impl TypeStub {
    pub fn new(package: impl Into<String>, node: TypeDeclNode) -> Self {
        let class_name = node.name.clone();
        Self {
            package: package.into(),
            class_name,
            node,
        }
    }

    pub fn qualified_name(&self) -> String {
        naming::qualify(&self.package, &self.class_name)
    }

    /// Stubs for the member types, at any depth.
    fn nested(&self) -> Vec<TypeStub> {
        let mut out = Vec::new();
        for member in &self.node.members {
            let stub = TypeStub {
                package: self.package.clone(),
                class_name: format!("{}{}{}", self.class_name, TYPE_SEPARATOR, member.name),
                node: member.clone(),
            };
            out.extend(stub.nested());
            out.push(stub);
        }
        out
    }
}

/// Solves names against a fixed set of type stubs.
#[derive(Debug, Default, Clone)]
pub struct StubTypeSolver {
    stubs: IndexMap<String, Arc<TypeStub>>,
}

impl StubTypeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stub and its member types. A later stub with the same
    /// qualified name replaces the earlier one.
    pub fn add(&mut self, stub: TypeStub) {
        for nested in stub.nested() {
            self.stubs.insert(nested.qualified_name(), Arc::new(nested));
        }
        self.stubs.insert(stub.qualified_name(), Arc::new(stub));
    }

    pub fn with_stub(mut self, stub: TypeStub) -> Self {
        self.add(stub);
        self
    }

    /// Loads a JSON array of stubs.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let stubs: Vec<TypeStub> = serde_json::from_str(json)?;
        let mut solver = Self::new();
        for stub in stubs {
            solver.add(stub);
        }
        Ok(solver)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn len(&self) -> usize {
        self.stubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stubs.is_empty()
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.stubs.contains_key(qualified_name)
    }

    pub fn qualified_names(&self) -> impl Iterator<Item = &str> {
        self.stubs.keys().map(String::as_str)
    }
}

impl TypeSolver for StubTypeSolver {
    fn solve(&self, name: &str, universe: &Universe) -> SymbolReference {
        self.stubs
            .get(name)
            .map(|stub| {
                Arc::new(StubTypeDeclaration::new(Arc::clone(stub), universe.clone())) as Decl
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symscope_api::TypeRef;

    #[test]
    fn nested_stubs_are_indexed_by_dotted_name() {
        let entry = TypeDeclNode::interface("Entry")
            .with_type_parameter(symscope_api::TypeParameterNode::new("K"));
        let map = TypeDeclNode::interface("Map").with_member(entry);
        let solver = StubTypeSolver::new().with_stub(TypeStub::new("java.util", map));

        assert!(solver.contains("java.util.Map"));
        assert!(solver.contains("java.util.Map.Entry"));
        assert_eq!(solver.len(), 2);
    }

    #[test]
    fn solves_only_exact_names() {
        let universe = Universe::new(
            StubTypeSolver::new().with_stub(TypeStub::new("java.lang", TypeDeclNode::class("Object"))),
        );
        assert!(universe.solve("java.lang.Object").is_solved());
        assert!(!universe.solve("Object").is_solved());
        assert!(!universe.solve("java.lang.Obj").is_solved());
    }

    #[test]
    fn loads_stubs_from_json() {
        let stub = TypeStub::new(
            "geo",
            TypeDeclNode::class("Shape").implements(TypeRef::raw("java.lang.Cloneable")),
        );
        let json = serde_json::to_string(&vec![stub.clone()]).unwrap();
        let solver = StubTypeSolver::from_json_str(&json).unwrap();
        assert_eq!(solver.qualified_names().collect::<Vec<_>>(), vec!["geo.Shape"]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stubs.json");
        std::fs::write(&path, json).unwrap();
        assert!(StubTypeSolver::from_json_file(&path).unwrap().contains("geo.Shape"));
    }
}
