//! Source backend: solves names against compilation units held in memory.

use super::{TypeSolver, Universe};
use crate::declarations::declaration_for;
use crate::error::Result;
use crate::source::SourceRef;
use crate::symbol::SymbolReference;
use indexmap::IndexMap;
use std::sync::Arc;
use symscope_api::CompilationUnit;

/// Indexes every top-level and member type of its units by qualified name
/// (`pkg.Outer.Inner`).
#[derive(Debug, Default, Clone)]
pub struct MemoryTypeSolver {
    units: Vec<Arc<CompilationUnit>>,
    index: IndexMap<String, (usize, Vec<usize>)>,
}

impl MemoryTypeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and indexes a unit. A type declared again under the same
    /// qualified name shadows the earlier declaration.
    pub fn add_unit(&mut self, unit: CompilationUnit) -> Result<()> {
        unit.validate()?;
        let unit_idx = self.units.len();
        let unit = Arc::new(unit);
        for (idx, decl) in unit.types.iter().enumerate() {
            let mut stack = vec![(unit.qualify(&decl.name), vec![idx], decl)];
            while let Some((qualified_name, path, node)) = stack.pop() {
                for (member_idx, member) in node.members.iter().enumerate() {
                    let mut member_path = path.clone();
                    member_path.push(member_idx);
                    stack.push((
                        format!("{}.{}", qualified_name, member.name),
                        member_path,
                        member,
                    ));
                }
                self.index.insert(qualified_name, (unit_idx, path));
            }
        }
        self.units.push(unit);
        Ok(())
    }

    pub fn with_unit(mut self, unit: CompilationUnit) -> Result<Self> {
        self.add_unit(unit)?;
        Ok(self)
    }

    pub fn units(&self) -> &[Arc<CompilationUnit>] {
        &self.units
    }

    pub fn qualified_names(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Location of the declaration named `qualified_name`.
    pub fn source(&self, qualified_name: &str) -> Option<SourceRef> {
        let (unit_idx, path) = self.index.get(qualified_name)?;
        let unit = self.units.get(*unit_idx)?;
        SourceRef::new(Arc::clone(unit), path.clone())
    }
}

impl TypeSolver for MemoryTypeSolver {
    fn solve(&self, name: &str, universe: &Universe) -> SymbolReference {
        self.source(name)
            .map(|source| declaration_for(source, universe.clone()))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symscope_api::{TypeDeclNode, TypeRef};

    fn unit() -> CompilationUnit {
        CompilationUnit::new(Some("geo")).with_type(
            TypeDeclNode::class("Outer")
                .with_member(TypeDeclNode::record("Point").with_component("x", TypeRef::raw("int")))
                .with_member(TypeDeclNode::class("Inner").with_member(TypeDeclNode::enumeration("Axis"))),
        )
    }

    #[test]
    fn indexes_nested_types() {
        let solver = MemoryTypeSolver::new().with_unit(unit()).unwrap();
        let mut names: Vec<&str> = solver.qualified_names().collect();
        names.sort();
        assert_eq!(
            names,
            vec!["geo.Outer", "geo.Outer.Inner", "geo.Outer.Inner.Axis", "geo.Outer.Point"]
        );
        assert_eq!(
            solver.source("geo.Outer.Inner.Axis").map(|s| s.path().to_vec()),
            Some(vec![0, 1, 0])
        );
    }

    #[test]
    fn solve_is_exact_and_picks_the_declaration_kind() {
        let universe = Universe::new(MemoryTypeSolver::new().with_unit(unit()).unwrap());
        let point = universe.solve_type("geo.Outer.Point").unwrap();
        assert!(point.is_record());
        assert!(!universe.solve("Point").is_solved());
    }

    #[test]
    fn rejects_invalid_units() {
        let bad = CompilationUnit::new(None).with_type(
            TypeDeclNode::record("P").extends(TypeRef::raw("Base")),
        );
        assert!(MemoryTypeSolver::new().add_unit(bad).is_err());
    }
}
