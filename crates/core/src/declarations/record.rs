//! Record declarations from source.

use super::adapter::SourceTypeAdapter;
use super::constructor::Constructor;
use super::members::{
    FieldDeclaration, MethodDeclaration, ParameterDeclaration, TypeParameterDeclaration,
};
use super::{Decl, TypeDeclaration};
use crate::ancestors::{self, Superclass};
use crate::error::{ResolveError, Result};
use crate::solver::Universe;
use crate::source::SourceRef;
use crate::symbol::SymbolReference;
use crate::synthesis;
use crate::types::{ReferenceType, TypeEnv};
use std::sync::Arc;
use symscope_api::{AccessSpecifier, TypeDeclKind, TypeDeclNode};

/// A `record` declaration: components declared once in the header, with the
/// canonical constructor, private fields and accessors implied by them.
#[derive(Clone, Debug)]
pub struct RecordDeclaration {
    adapter: SourceTypeAdapter,
}

impl RecordDeclaration {
    pub fn new(source: SourceRef, universe: Universe) -> Result<Self> {
        if source.node().kind != TypeDeclKind::Record {
            return Err(ResolveError::NotARecord(source.qualified_name()));
        }
        Ok(Self::from_source(source, universe))
    }

    /// A record node that is not part of any compilation unit.
    pub fn detached(node: TypeDeclNode, universe: Universe) -> Result<Self> {
        Self::new(SourceRef::detached(node), universe)
    }

    pub(crate) fn from_source(source: SourceRef, universe: Universe) -> Self {
        Self {
            adapter: SourceTypeAdapter::new(source, universe),
        }
    }

    pub fn source(&self) -> &SourceRef {
        self.adapter.source()
    }

    pub fn env(&self) -> TypeEnv {
        self.adapter.env()
    }

    /// Header components in declared order, exactly as written.
    pub fn components(&self) -> Vec<ParameterDeclaration> {
        let env = self.env();
        self.adapter
            .node()
            .components
            .iter()
            .map(|c| ParameterDeclaration::new(c, env.clone()))
            .collect()
    }

    pub fn record_components(&self) -> Vec<ParameterDeclaration> {
        self.components()
    }

    /// Methods written in the body, without the implicit accessors.
    pub fn declared_methods(&self) -> Vec<MethodDeclaration> {
        self.adapter.declared_methods()
    }

    pub fn all_fields(&self) -> Vec<FieldDeclaration> {
        self.fields()
    }

    /// Declared interfaces; fails on the first one that does not resolve.
    pub fn interfaces(&self) -> Result<Vec<ReferenceType>> {
        ancestors::interfaces(self, &self.env(), &self.adapter.node().interfaces, false)
    }

    /// Constructors written in the body, without the synthesized one.
    pub fn explicit_constructors(&self) -> Vec<Arc<dyn Constructor>> {
        let declaring: Decl = Arc::new(self.clone());
        self.adapter.declared_constructors(&declaring)
    }

    /// Resolves a type name as seen from inside this record's body.
    pub fn solve_type(&self, name: &str) -> Result<SymbolReference> {
        self.adapter.solve_type(name)
    }

    /// Member types of this record only.
    pub fn solve_member_type(&self, name: &str) -> SymbolReference {
        self.adapter.solve_member_type(name)
    }

    fn implicit_fields(&self) -> Vec<FieldDeclaration> {
        let env = self.env();
        let declaring_type = self.qualified_name();
        self.adapter
            .node()
            .components
            .iter()
            .map(|c| FieldDeclaration {
                name: c.name.clone(),
                type_ref: c.type_ref.clone(),
                access: AccessSpecifier::Private,
                is_static: false,
                is_implicit: true,
                declaring_type: declaring_type.clone(),
                env: env.clone(),
            })
            .collect()
    }

    fn implicit_accessors(&self, declared: &[MethodDeclaration]) -> Vec<MethodDeclaration> {
        let env = self.env();
        let declaring_type = self.qualified_name();
        self.adapter
            .node()
            .components
            .iter()
            .filter(|c| {
                !declared
                    .iter()
                    .any(|m| m.name == c.name && m.parameters.is_empty())
            })
            .map(|c| MethodDeclaration {
                name: c.name.clone(),
                return_type: c.type_ref.clone(),
                parameters: Vec::new(),
                type_parameters: Vec::new(),
                throws: Vec::new(),
                access: AccessSpecifier::Public,
                is_static: false,
                is_abstract: false,
                is_implicit: true,
                declaring_type: declaring_type.clone(),
                env: env.clone(),
            })
            .collect()
    }
}

impl TypeDeclaration for RecordDeclaration {
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
        TypeDeclKind::Record
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

    fn ancestors(&self, accept_incomplete: bool) -> Result<Vec<ReferenceType>> {
        let config = self.adapter.universe().config();
        ancestors::direct_ancestors(
            self,
            &self.env(),
            Superclass::Implicit(&config.record_base_type),
            &self.adapter.node().interfaces,
            accept_incomplete,
        )
    }

    /// Component fields first, then fields written in the body.
    fn fields(&self) -> Vec<FieldDeclaration> {
        let mut fields = self.implicit_fields();
        fields.extend(self.adapter.declared_fields());
        fields
    }

    /// Written methods, then accessors for components the body leaves out.
    fn methods(&self) -> Vec<MethodDeclaration> {
        let mut methods = self.adapter.declared_methods();
        let accessors = self.implicit_accessors(&methods);
        methods.extend(accessors);
        methods
    }

    fn constructors(&self) -> Vec<Arc<dyn Constructor>> {
        synthesis::record_constructors(self)
    }

    fn has_directly_annotation(&self, qualified_name: &str) -> bool {
        self.adapter.has_directly_annotation(qualified_name)
    }

    fn universe(&self) -> &Universe {
        self.adapter.universe()
    }

    fn as_record(&self) -> Option<&RecordDeclaration> {
        Some(self)
    }
}
