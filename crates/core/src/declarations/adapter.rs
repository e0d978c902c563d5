//! Operations shared by every source-backed declaration kind.

use super::constructor::{Constructor, DeclaredConstructor};
use super::members::{FieldDeclaration, MethodDeclaration, TypeParameterDeclaration};
use super::{Decl, declaration_for};
use crate::context::ScopeChain;
use crate::error::Result;
use crate::solver::Universe;
use crate::source::SourceRef;
use crate::symbol::SymbolReference;
use crate::types::TypeEnv;
use std::sync::Arc;
use symscope_api::{AccessSpecifier, FieldNode, MethodNode, TypeDeclKind, TypeDeclNode};

/// Adapts a syntax node to the declaration capability.
#[derive(Clone, Debug)]
pub struct SourceTypeAdapter {
    source: SourceRef,
    universe: Universe,
}

impl SourceTypeAdapter {
    pub fn new(source: SourceRef, universe: Universe) -> Self {
        Self { source, universe }
    }

    pub fn source(&self) -> &SourceRef {
        &self.source
    }

    pub fn node(&self) -> &TypeDeclNode {
        self.source.node()
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Environment for type expressions written in this declaration's body.
    pub fn env(&self) -> TypeEnv {
        TypeEnv::for_source(self.source.clone(), self.universe.clone())
    }

    pub fn scope_chain(&self) -> ScopeChain {
        ScopeChain::for_declaration(&self.source, self.universe.clone())
    }

    pub fn name(&self) -> String {
        self.node().name.clone()
    }

    pub fn qualified_name(&self) -> String {
        self.source.qualified_name()
    }

    pub fn fully_qualified_name(&self) -> Option<String> {
        if self.source.is_detached() {
            None
        } else {
            Some(self.source.qualified_name())
        }
    }

    pub fn package_name(&self) -> String {
        self.source.package_name()
    }

    pub fn class_name(&self) -> String {
        self.source.class_name()
    }

    fn in_interface(&self) -> bool {
        self.source
            .enclosing()
            .is_some_and(|e| e.node().kind == TypeDeclKind::Interface)
    }

    /// Members of an interface without an access keyword are public.
    pub fn access_specifier(&self) -> AccessSpecifier {
        let node = self.node();
        let written = node.access_specifier();
        if written == AccessSpecifier::PackagePrivate && self.in_interface() {
            AccessSpecifier::Public
        } else {
            written
        }
    }

    pub fn type_parameters(&self) -> Vec<TypeParameterDeclaration> {
        let env = self.env();
        let declarer = self.qualified_name();
        self.node()
            .type_parameters
            .iter()
            .map(|tp| TypeParameterDeclaration::new(tp, declarer.clone(), env.clone()))
            .collect()
    }

    pub fn container_type(&self) -> Option<Decl> {
        self.source
            .enclosing()
            .map(|e| declaration_for(e, self.universe.clone()))
    }

    pub fn internal_types(&self) -> Vec<Decl> {
        (0..self.node().members.len())
            .filter_map(|idx| self.source.member(idx))
            .map(|member| declaration_for(member, self.universe.clone()))
            .collect()
    }

    /// Member types only; no parent delegation.
    pub fn solve_member_type(&self, name: &str) -> SymbolReference {
        self.source
            .member_by_name(name)
            .map(|member| declaration_for(member, self.universe.clone()))
            .into()
    }

    /// Full scope-chain lookup from inside this declaration's body.
    pub fn solve_type(&self, name: &str) -> Result<SymbolReference> {
        self.scope_chain().resolve_type(name)
    }

    fn in_interface_body(&self) -> bool {
        self.node().kind == TypeDeclKind::Interface
    }

    pub fn field(&self, node: &FieldNode) -> FieldDeclaration {
        FieldDeclaration::from_node(
            node,
            self.qualified_name(),
            self.in_interface_body(),
            self.env(),
        )
    }

    pub fn declared_fields(&self) -> Vec<FieldDeclaration> {
        self.node().fields.iter().map(|f| self.field(f)).collect()
    }

    pub fn method(&self, node: &MethodNode) -> MethodDeclaration {
        MethodDeclaration::from_node(
            node,
            self.qualified_name(),
            self.in_interface_body(),
            self.env(),
        )
    }

    pub fn declared_methods(&self) -> Vec<MethodDeclaration> {
        self.node().methods.iter().map(|m| self.method(m)).collect()
    }

    /// Constructors written in the body, compact record constructors excluded.
    pub fn declared_constructors(&self, declaring: &Decl) -> Vec<Arc<dyn Constructor>> {
        let env = self.env();
        self.node()
            .constructors
            .iter()
            .filter(|c| !c.is_compact)
            .map(|c| {
                Arc::new(DeclaredConstructor::new(Arc::clone(declaring), c.clone(), env.clone()))
                    as Arc<dyn Constructor>
            })
            .collect()
    }

    /// Compares the qualified names the written annotations resolve to.
    /// Unresolvable annotations match nothing.
    pub fn has_directly_annotation(&self, qualified_name: &str) -> bool {
        let node = self.node();
        let chain = self.scope_chain();
        node.annotations.iter().any(|a| {
            chain
                .resolve_type(a)
                .ok()
                .and_then(|r| r.into_declaration())
                .is_some_and(|d| d.qualified_name() == qualified_name)
        })
    }
}
