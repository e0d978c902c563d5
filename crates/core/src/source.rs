//! Handles on type declarations inside a compilation unit.

use std::fmt;
use std::sync::Arc;
use symscope_api::{CompilationUnit, TypeDeclKind, TypeDeclNode};

/// Position of a type declaration node: its unit plus the index path
/// `types[path[0]].members[path[1]]...`.
///
/// The enclosing declaration is reached by dropping the last index, so a
/// nested declaration never owns its container.
#[derive(Clone)]
pub struct SourceRef {
    unit: Arc<CompilationUnit>,
    path: Vec<usize>,
    detached: bool,
}

impl SourceRef {
    /// Returns `None` when `path` does not lead to a node.
    pub fn new(unit: Arc<CompilationUnit>, path: Vec<usize>) -> Option<Self> {
        Self::locate(&unit, &path)?;
        Some(Self {
            unit,
            path,
            detached: false,
        })
    }

    pub(crate) fn from_parts(
        unit: Arc<CompilationUnit>,
        path: Vec<usize>,
        detached: bool,
    ) -> Option<Self> {
        let mut source = Self::new(unit, path)?;
        source.detached = detached;
        Some(source)
    }

    /// Top-level type `index` of `unit`.
    pub fn top_level(unit: Arc<CompilationUnit>, index: usize) -> Option<Self> {
        Self::new(unit, vec![index])
    }

    /// Wraps a node that is not part of any compilation unit.
    ///
    /// Such a declaration has no fully qualified name.
    pub fn detached(node: TypeDeclNode) -> Self {
        let unit = CompilationUnit::new(None).with_type(node);
        Self {
            unit: Arc::new(unit),
            path: vec![0],
            detached: true,
        }
    }

    fn locate<'u>(unit: &'u CompilationUnit, path: &[usize]) -> Option<&'u TypeDeclNode> {
        let (first, rest) = path.split_first()?;
        let mut node = unit.types.get(*first)?;
        for idx in rest {
            node = node.members.get(*idx)?;
        }
        Some(node)
    }

    pub fn node(&self) -> &TypeDeclNode {
        let mut node = &self.unit.types[self.path[0]];
        for idx in &self.path[1..] {
            node = &node.members[*idx];
        }
        node
    }

    pub fn unit(&self) -> &Arc<CompilationUnit> {
        &self.unit
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    pub fn enclosing(&self) -> Option<SourceRef> {
        if self.path.len() < 2 {
            return None;
        }
        Some(Self {
            unit: Arc::clone(&self.unit),
            path: self.path[..self.path.len() - 1].to_vec(),
            detached: self.detached,
        })
    }

    pub fn member(&self, index: usize) -> Option<SourceRef> {
        self.node().members.get(index)?;
        let mut path = self.path.clone();
        path.push(index);
        Some(Self {
            unit: Arc::clone(&self.unit),
            path,
            detached: self.detached,
        })
    }

    /// Member type named `name`, following dots into deeper members.
    pub fn member_by_name(&self, name: &str) -> Option<SourceRef> {
        let mut current = self.clone();
        for segment in name.split('.') {
            let (idx, _) = current.node().member(segment)?;
            current = current.member(idx)?;
        }
        Some(current)
    }

    /// This declaration and every enclosing one, outermost first.
    pub fn lineage(&self) -> Vec<SourceRef> {
        (1..=self.path.len())
            .map(|len| Self {
                unit: Arc::clone(&self.unit),
                path: self.path[..len].to_vec(),
                detached: self.detached,
            })
            .collect()
    }

    /// Whether the body of this declaration cannot see the type parameters
    /// of enclosing declarations.
    ///
    /// Top-level types, records, enums, interfaces, explicitly `static`
    /// members and members of interfaces are all static contexts.
    pub fn is_static_context(&self) -> bool {
        let node = self.node();
        if node.kind != TypeDeclKind::Class || node.modifiers.iter().any(|m| m == "static") {
            return true;
        }
        match self.enclosing() {
            Some(outer) => outer.node().kind == TypeDeclKind::Interface,
            None => true,
        }
    }

    /// Simple names from the outermost declaration down, e.g. `Outer.Inner`.
    pub fn class_name(&self) -> String {
        let mut names = Vec::with_capacity(self.path.len());
        let mut node = &self.unit.types[self.path[0]];
        names.push(node.name.as_str());
        for idx in &self.path[1..] {
            node = &node.members[*idx];
            names.push(node.name.as_str());
        }
        names.join(".")
    }

    pub fn package_name(&self) -> String {
        self.unit.package.clone().unwrap_or_default()
    }

    pub fn qualified_name(&self) -> String {
        self.unit.qualify(&self.class_name())
    }

    /// Same node of the same unit instance.
    pub fn same_node(&self, other: &SourceRef) -> bool {
        Arc::ptr_eq(&self.unit, &other.unit) && self.path == other.path
    }
}

impl fmt::Debug for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRef")
            .field("qualified_name", &self.qualified_name())
            .field("path", &self.path)
            .field("detached", &self.detached)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Arc<CompilationUnit> {
        Arc::new(
            CompilationUnit::new(Some("geo")).with_type(
                TypeDeclNode::class("Outer").with_member(
                    TypeDeclNode::interface("Shape")
                        .with_member(TypeDeclNode::record("Point")),
                ),
            ),
        )
    }

    #[test]
    fn names_follow_the_path() {
        let outer = SourceRef::top_level(unit(), 0).unwrap();
        let point = outer.member_by_name("Shape.Point").unwrap();
        assert_eq!(point.path(), &[0, 0, 0]);
        assert_eq!(point.class_name(), "Outer.Shape.Point");
        assert_eq!(point.qualified_name(), "geo.Outer.Shape.Point");
        assert_eq!(point.enclosing().unwrap().node().name, "Shape");
        assert_eq!(point.lineage().len(), 3);
    }

    #[test]
    fn only_inner_classes_see_enclosing_type_parameters() {
        let unit = Arc::new(
            CompilationUnit::new(Some("app")).with_type(
                TypeDeclNode::class("Outer")
                    .with_member(TypeDeclNode::class("Inner"))
                    .with_member(TypeDeclNode::class("Nested").with_modifiers(&["static"]))
                    .with_member(TypeDeclNode::record("Pair"))
                    .with_member(
                        TypeDeclNode::interface("Api").with_member(TypeDeclNode::class("Impl")),
                    ),
            ),
        );
        let outer = SourceRef::top_level(unit, 0).unwrap();
        assert!(outer.is_static_context());
        assert!(!outer.member_by_name("Inner").unwrap().is_static_context());
        assert!(outer.member_by_name("Nested").unwrap().is_static_context());
        assert!(outer.member_by_name("Pair").unwrap().is_static_context());
        assert!(outer.member_by_name("Api.Impl").unwrap().is_static_context());
    }

    #[test]
    fn invalid_paths_are_rejected() {
        assert!(SourceRef::new(unit(), vec![]).is_none());
        assert!(SourceRef::new(unit(), vec![0, 3]).is_none());
    }

    #[test]
    fn detached_node_has_no_package() {
        let detached = SourceRef::detached(TypeDeclNode::record("Loose"));
        assert!(detached.is_detached());
        assert_eq!(detached.qualified_name(), "Loose");
        assert!(detached.enclosing().is_none());
    }
}
