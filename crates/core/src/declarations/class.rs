//! Classes, interfaces and enums from source.

use super::adapter::SourceTypeAdapter;
use super::constructor::{Constructor, DefaultConstructor};
use super::members::{FieldDeclaration, MethodDeclaration, TypeParameterDeclaration};
use super::{Decl, TypeDeclaration};
use crate::ancestors::{self, Superclass};
use crate::error::Result;
use crate::solver::Universe;
use crate::source::SourceRef;
use crate::symbol::SymbolReference;
use crate::types::ReferenceType;
use std::sync::Arc;
use symscope_api::{AccessSpecifier, TypeDeclKind, TypeRef};

const ENUM_BASE_TYPE: &str = "java.lang.Enum";

#[derive(Clone, Debug)]
pub struct SourceTypeDeclaration {
    adapter: SourceTypeAdapter,
}

impl SourceTypeDeclaration {
    pub fn new(source: SourceRef, universe: Universe) -> Self {
        Self {
            adapter: SourceTypeAdapter::new(source, universe),
        }
    }

    pub fn source(&self) -> &SourceRef {
        self.adapter.source()
    }

    pub fn solve_type(&self, name: &str) -> Result<SymbolReference> {
        self.adapter.solve_type(name)
    }

    pub fn solve_member_type(&self, name: &str) -> SymbolReference {
        self.adapter.solve_member_type(name)
    }
}

impl TypeDeclaration for SourceTypeDeclaration {
    fn name(&self) -> String {
        self.adapter.name()
    }

    fn qualified_name(&self) -> String {
        self.adapter.qualified_name()
    }

    fn fully_qualified_name(&self) -> Option<String> {
        self.adapter.fully_qualified_name()
    }

    fn package_name(&self) -> String {
        self.adapter.package_name()
    }

    fn class_name(&self) -> String {
        self.adapter.class_name()
    }

    fn kind(&self) -> TypeDeclKind {
        self.adapter.node().kind
    }

    fn access_specifier(&self) -> AccessSpecifier {
        self.adapter.access_specifier()
    }

    fn type_parameters(&self) -> Vec<TypeParameterDeclaration> {
        self.adapter.type_parameters()
    }

    fn container_type(&self) -> Option<Decl> {
        self.adapter.container_type()
    }

    fn internal_types(&self) -> Vec<Decl> {
        self.adapter.internal_types()
    }

    /// Interfaces list what they extend; classes fall back to the root
    /// type and enums to `java.lang.Enum<Self>` when no superclass is written.
    fn ancestors(&self, accept_incomplete: bool) -> Result<Vec<ReferenceType>> {
        let node = self.adapter.node();
        let config = self.adapter.universe().config();
        let enum_base = TypeRef::generic(ENUM_BASE_TYPE, vec![TypeRef::raw(node.name.clone())]);
        let superclass = match node.kind {
            TypeDeclKind::Interface => Superclass::None,
            TypeDeclKind::Enum => Superclass::Declared(&enum_base),
            TypeDeclKind::Class | TypeDeclKind::Record => match &node.superclass {
                Some(written) => Superclass::Declared(written),
                None => Superclass::Implicit(&config.root_type),
            },
        };
        ancestors::direct_ancestors(
            self,
            &self.adapter.env(),
            superclass,
            &node.interfaces,
            accept_incomplete,
        )
    }

    fn fields(&self) -> Vec<FieldDeclaration> {
        self.adapter.declared_fields()
    }

    fn methods(&self) -> Vec<MethodDeclaration> {
        self.adapter.declared_methods()
    }

    /// A class or enum without written constructors gets the default one.
    fn constructors(&self) -> Vec<Arc<dyn Constructor>> {
        let declaring: Decl = Arc::new(self.clone());
        let declared = self.adapter.declared_constructors(&declaring);
        if declared.is_empty() && !self.is_interface() {
            vec![Arc::new(DefaultConstructor::new(declaring))]
        } else {
            declared
        }
    }

    fn has_directly_annotation(&self, qualified_name: &str) -> bool {
        self.adapter.has_directly_annotation(qualified_name)
    }

    fn universe(&self) -> &Universe {
        self.adapter.universe()
    }
}
