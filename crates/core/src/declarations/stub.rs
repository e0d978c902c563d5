//! Declarations backed by precompiled type stubs.

use super::constructor::{Constructor, DeclaredConstructor};
use super::members::{FieldDeclaration, MethodDeclaration, TypeParameterDeclaration};
use super::{Decl, TypeDeclaration};
use crate::ancestors::{self, Superclass};
use crate::error::Result;
use crate::naming::{self, TYPE_SEPARATOR};
use crate::solver::{TypeStub, Universe};
use crate::types::{ReferenceType, TypeEnv};
use std::sync::Arc;
use symscope_api::{AccessSpecifier, TypeDeclKind};

const ENUM_BASE_TYPE: &str = "java.lang.Enum";

#[derive(Clone, Debug)]
pub struct StubTypeDeclaration {
    stub: Arc<TypeStub>,
    universe: Universe,
}

impl StubTypeDeclaration {
    pub fn new(stub: Arc<TypeStub>, universe: Universe) -> Self {
        Self { stub, universe }
    }

    pub fn stub(&self) -> &TypeStub {
        &self.stub
    }

    fn env(&self) -> TypeEnv {
        TypeEnv::for_qualified(
            self.stub.qualified_name(),
            self.stub
                .node
                .type_parameters
                .iter()
                .map(|tp| tp.name.clone())
                .collect(),
            self.universe.clone(),
        )
    }
}

impl TypeDeclaration for StubTypeDeclaration {
    fn name(&self) -> String {
        self.stub.node.name.clone()
    }

    fn qualified_name(&self) -> String {
        self.stub.qualified_name()
    }

    fn package_name(&self) -> String {
        self.stub.package.clone()
    }

    fn class_name(&self) -> String {
        self.stub.class_name.clone()
    }

    fn kind(&self) -> TypeDeclKind {
        self.stub.node.kind
    }

    fn access_specifier(&self) -> AccessSpecifier {
        self.stub.node.access_specifier()
    }

    fn type_parameters(&self) -> Vec<TypeParameterDeclaration> {
        let env = self.env();
        let declarer = self.qualified_name();
        self.stub
            .node
            .type_parameters
            .iter()
            .map(|tp| TypeParameterDeclaration::new(tp, declarer.clone(), env.clone()))
            .collect()
    }

    fn container_type(&self) -> Option<Decl> {
        if !self.stub.class_name.contains(TYPE_SEPARATOR) {
            return None;
        }
        let qualified_name = self.qualified_name();
        naming::parent_name(&qualified_name)
            .and_then(|parent| self.universe.solve(parent).into_declaration())
    }

    fn internal_types(&self) -> Vec<Decl> {
        let qualified_name = self.qualified_name();
        self.stub
            .node
            .members
            .iter()
            .filter_map(|member| {
                self.universe
                    .solve(&naming::qualify(&qualified_name, &member.name))
                    .into_declaration()
            })
            .collect()
    }

    fn ancestors(&self, accept_incomplete: bool) -> Result<Vec<ReferenceType>> {
        let node = &self.stub.node;
        let config = self.universe.config();
        let superclass = match (node.kind, &node.superclass) {
            (TypeDeclKind::Interface, _) => Superclass::None,
            (TypeDeclKind::Record, _) => Superclass::Implicit(&config.record_base_type),
            (_, Some(written)) => Superclass::Declared(written),
            (TypeDeclKind::Enum, None) => Superclass::Implicit(ENUM_BASE_TYPE),
            (TypeDeclKind::Class, None) => Superclass::Implicit(&config.root_type),
        };
        ancestors::direct_ancestors(
            self,
            &self.env(),
            superclass,
            &node.interfaces,
            accept_incomplete,
        )
    }

    fn fields(&self) -> Vec<FieldDeclaration> {
        let in_interface = self.is_interface();
        self.stub
            .node
            .fields
            .iter()
            .map(|f| FieldDeclaration::from_node(f, self.qualified_name(), in_interface, self.env()))
            .collect()
    }

    fn methods(&self) -> Vec<MethodDeclaration> {
        let in_interface = self.is_interface();
        self.stub
            .node
            .methods
            .iter()
            .map(|m| {
                MethodDeclaration::from_node(m, self.qualified_name(), in_interface, self.env())
            })
            .collect()
    }

    /// Exactly the constructors the metadata lists.
    fn constructors(&self) -> Vec<Arc<dyn Constructor>> {
        let declaring: Decl = Arc::new(self.clone());
        let env = self.env();
        self.stub
            .node
            .constructors
            .iter()
            .map(|c| {
                Arc::new(DeclaredConstructor::new(
                    Arc::clone(&declaring),
                    c.clone(),
                    env.clone(),
                )) as Arc<dyn Constructor>
            })
            .collect()
    }

    fn has_directly_annotation(&self, qualified_name: &str) -> bool {
        let env = self.env();
        self.stub.node.annotations.iter().any(|a| {
            env.resolve_name(a)
                .ok()
                .and_then(|r| r.into_declaration())
                .is_some_and(|d| d.qualified_name() == qualified_name)
        })
    }

    fn universe(&self) -> &Universe {
        &self.universe
    }
}
