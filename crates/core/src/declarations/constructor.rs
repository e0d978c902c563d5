//! Constructors: written ones, the implicit default one, and the synthesized
//! canonical record constructor.

use super::members::{ParameterDeclaration, TypeParameterDeclaration};
use super::record::RecordDeclaration;
use super::{Decl, TypeDeclaration};
use crate::error::{ResolveError, Result};
use crate::naming::build_member_fqn;
use crate::types::{ResolvedType, TypeEnv};
use std::fmt;
use std::sync::Arc;
use symscope_api::{AccessSpecifier, ConstructorNode};

pub trait Constructor: Send + Sync + fmt::Debug {
    /// Simple name of the declaring type.
    fn name(&self) -> String;

    fn declaring_type(&self) -> Decl;

    fn access_specifier(&self) -> AccessSpecifier;

    fn params(&self) -> Vec<ParameterDeclaration>;

    fn param_count(&self) -> usize {
        self.params().len()
    }

    fn param(&self, index: usize) -> Result<ParameterDeclaration> {
        let params = self.params();
        let len = params.len();
        params
            .into_iter()
            .nth(index)
            .ok_or(ResolveError::IndexOutOfBounds { index, len })
    }

    fn type_parameters(&self) -> Vec<TypeParameterDeclaration>;

    fn specified_exception_count(&self) -> usize;

    fn specified_exception(&self, index: usize) -> Result<ResolvedType>;

    /// Not written in the source.
    fn is_implicit(&self) -> bool {
        false
    }

    /// `Name(T1, T2)` using the written parameter types.
    fn signature(&self) -> String {
        let params: Vec<String> = self
            .params()
            .iter()
            .map(|p| p.type_ref().to_string())
            .collect();
        format!("{}({})", self.name(), params.join(", "))
    }
}

/// A constructor written in a source or stub declaration.
#[derive(Debug)]
pub struct DeclaredConstructor {
    declaring: Decl,
    node: ConstructorNode,
    env: TypeEnv,
}

impl DeclaredConstructor {
    pub fn new(declaring: Decl, node: ConstructorNode, env: TypeEnv) -> Self {
        let declarer = build_member_fqn(&declaring.qualified_name(), &declaring.name());
        let env = env.with_type_parameters(&node.type_parameters, &declarer);
        Self {
            declaring,
            node,
            env,
        }
    }
}

impl Constructor for DeclaredConstructor {
    fn name(&self) -> String {
        self.declaring.name()
    }

    fn declaring_type(&self) -> Decl {
        Arc::clone(&self.declaring)
    }

    fn access_specifier(&self) -> AccessSpecifier {
        AccessSpecifier::from_modifiers(&self.node.modifiers)
    }

    fn params(&self) -> Vec<ParameterDeclaration> {
        self.node
            .parameters
            .iter()
            .map(|p| ParameterDeclaration::new(p, self.env.clone()))
            .collect()
    }

    fn type_parameters(&self) -> Vec<TypeParameterDeclaration> {
        let declarer = build_member_fqn(&self.declaring.qualified_name(), &self.name());
        self.node
            .type_parameters
            .iter()
            .map(|tp| TypeParameterDeclaration::new(tp, declarer.clone(), self.env.clone()))
            .collect()
    }

    fn specified_exception_count(&self) -> usize {
        self.node.throws.len()
    }

    fn specified_exception(&self, index: usize) -> Result<ResolvedType> {
        let written = self
            .node
            .throws
            .get(index)
            .ok_or(ResolveError::IndexOutOfBounds {
                index,
                len: self.node.throws.len(),
            })?;
        self.env.convert(written)
    }
}

/// The no-argument constructor of a class that declares none.
#[derive(Debug)]
pub struct DefaultConstructor {
    declaring: Decl,
}

impl DefaultConstructor {
    pub fn new(declaring: Decl) -> Self {
        Self { declaring }
    }
}

impl Constructor for DefaultConstructor {
    fn name(&self) -> String {
        self.declaring.name()
    }

    fn declaring_type(&self) -> Decl {
        Arc::clone(&self.declaring)
    }

    /// Same access as the class.
    fn access_specifier(&self) -> AccessSpecifier {
        self.declaring.access_specifier()
    }

    fn params(&self) -> Vec<ParameterDeclaration> {
        Vec::new()
    }

    fn type_parameters(&self) -> Vec<TypeParameterDeclaration> {
        Vec::new()
    }

    fn specified_exception_count(&self) -> usize {
        0
    }

    fn specified_exception(&self, _index: usize) -> Result<ResolvedType> {
        Err(ResolveError::UnsupportedOperation(
            "the default constructor does not throw exceptions".to_string(),
        ))
    }

    fn is_implicit(&self) -> bool {
        true
    }
}

/// The all-components constructor implied by a record header.
///
/// Parameter `i` is component `i` of the record, read from the record on
/// every call rather than copied.
#[derive(Debug, Clone)]
pub struct CanonicalConstructor {
    record: RecordDeclaration,
}

impl CanonicalConstructor {
    pub fn new(record: RecordDeclaration) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &RecordDeclaration {
        &self.record
    }
}

impl Constructor for CanonicalConstructor {
    fn name(&self) -> String {
        self.record.name()
    }

    fn declaring_type(&self) -> Decl {
        Arc::new(self.record.clone())
    }

    fn access_specifier(&self) -> AccessSpecifier {
        AccessSpecifier::Public
    }

    fn params(&self) -> Vec<ParameterDeclaration> {
        self.record.components()
    }

    fn param_count(&self) -> usize {
        self.record.source().node().components.len()
    }

    fn type_parameters(&self) -> Vec<TypeParameterDeclaration> {
        self.record.type_parameters()
    }

    fn specified_exception_count(&self) -> usize {
        0
    }

    fn specified_exception(&self, _index: usize) -> Result<ResolvedType> {
        Err(ResolveError::UnsupportedOperation(
            "the canonical record constructor does not throw exceptions".to_string(),
        ))
    }

    fn is_implicit(&self) -> bool {
        true
    }
}
