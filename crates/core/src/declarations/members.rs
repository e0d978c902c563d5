//! Field, method, parameter and type-parameter declarations.
//!
//! Members keep their written types and resolve them on request through the
//! [`TypeEnv`] of the scope they were declared in.

use crate::error::Result;
use crate::naming::build_member_fqn;
use crate::types::{ResolvedType, TypeEnv};
use symscope_api::{
    AccessSpecifier, FieldNode, MethodNode, ParameterNode, TypeParameterNode, TypeRef,
};

/// A method or constructor parameter, or a record component.
#[derive(Clone, Debug)]
pub struct ParameterDeclaration {
    name: String,
    type_ref: TypeRef,
    is_varargs: bool,
    env: TypeEnv,
}

impl ParameterDeclaration {
    pub fn new(node: &ParameterNode, env: TypeEnv) -> Self {
        Self {
            name: node.name.clone(),
            type_ref: node.type_ref.clone(),
            is_varargs: node.is_varargs,
            env,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The type as written.
    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn is_varargs(&self) -> bool {
        self.is_varargs
    }

    pub fn resolve_type(&self) -> Result<ResolvedType> {
        self.env.convert(&self.type_ref)
    }
}

/// Parameters compare by what is written, not by where they were resolved.
impl PartialEq for ParameterDeclaration {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.type_ref == other.type_ref
            && self.is_varargs == other.is_varargs
    }
}

#[derive(Clone, Debug)]
pub struct TypeParameterDeclaration {
    name: String,
    declarer: String,
    bounds: Vec<TypeRef>,
    env: TypeEnv,
}

impl TypeParameterDeclaration {
    pub fn new(node: &TypeParameterNode, declarer: impl Into<String>, env: TypeEnv) -> Self {
        Self {
            name: node.name.clone(),
            declarer: declarer.into(),
            bounds: node.bounds.clone(),
            env,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified name of the declaring type or member.
    pub fn declarer(&self) -> &str {
        &self.declarer
    }

    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.declarer, self.name)
    }

    pub fn bounds(&self) -> &[TypeRef] {
        &self.bounds
    }

    pub fn resolve_bounds(&self) -> Result<Vec<ResolvedType>> {
        self.bounds.iter().map(|b| self.env.convert(b)).collect()
    }
}

impl PartialEq for TypeParameterDeclaration {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.declarer == other.declarer && self.bounds == other.bounds
    }
}

#[derive(Clone, Debug)]
pub struct FieldDeclaration {
    pub(crate) name: String,
    pub(crate) type_ref: TypeRef,
    pub(crate) access: AccessSpecifier,
    pub(crate) is_static: bool,
    /// Implied by a record component rather than written in the body
    pub(crate) is_implicit: bool,
    pub(crate) declaring_type: String,
    pub(crate) env: TypeEnv,
}

impl FieldDeclaration {
    /// A field written in a body. Interface fields are implicitly public
    /// and static.
    pub(crate) fn from_node(
        node: &FieldNode,
        declaring_type: String,
        in_interface: bool,
        env: TypeEnv,
    ) -> Self {
        let written = AccessSpecifier::from_modifiers(&node.modifiers);
        Self {
            name: node.name.clone(),
            type_ref: node.type_ref.clone(),
            access: if in_interface {
                AccessSpecifier::Public
            } else {
                written
            },
            is_static: in_interface || node.modifiers.iter().any(|m| m == "static"),
            is_implicit: false,
            declaring_type,
            env,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> String {
        build_member_fqn(&self.declaring_type, &self.name)
    }

    pub fn type_ref(&self) -> &TypeRef {
        &self.type_ref
    }

    pub fn access_specifier(&self) -> AccessSpecifier {
        self.access
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_implicit(&self) -> bool {
        self.is_implicit
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn resolve_type(&self) -> Result<ResolvedType> {
        self.env.convert(&self.type_ref)
    }
}

#[derive(Clone, Debug)]
pub struct MethodDeclaration {
    pub(crate) name: String,
    pub(crate) return_type: TypeRef,
    pub(crate) parameters: Vec<ParameterDeclaration>,
    pub(crate) type_parameters: Vec<TypeParameterDeclaration>,
    pub(crate) throws: Vec<TypeRef>,
    pub(crate) access: AccessSpecifier,
    pub(crate) is_static: bool,
    pub(crate) is_abstract: bool,
    /// A record accessor the body does not spell out
    pub(crate) is_implicit: bool,
    pub(crate) declaring_type: String,
    pub(crate) env: TypeEnv,
}

impl MethodDeclaration {
    /// A method written in a body; `env` is the body's environment and is
    /// extended with the method's own type parameters.
    pub(crate) fn from_node(
        node: &MethodNode,
        declaring_type: String,
        in_interface: bool,
        env: TypeEnv,
    ) -> Self {
        let declarer = build_member_fqn(&declaring_type, &node.name);
        let env = env.with_type_parameters(&node.type_parameters, &declarer);
        let written = AccessSpecifier::from_modifiers(&node.modifiers);
        let has = |m: &str| node.modifiers.iter().any(|x| x == m);
        Self {
            name: node.name.clone(),
            return_type: node.return_type.clone(),
            parameters: node
                .parameters
                .iter()
                .map(|p| ParameterDeclaration::new(p, env.clone()))
                .collect(),
            type_parameters: node
                .type_parameters
                .iter()
                .map(|tp| TypeParameterDeclaration::new(tp, declarer.clone(), env.clone()))
                .collect(),
            throws: node.throws.clone(),
            access: if in_interface && written == AccessSpecifier::PackagePrivate {
                AccessSpecifier::Public
            } else {
                written
            },
            is_static: has("static"),
            is_abstract: has("abstract")
                || (in_interface && !has("default") && !has("static") && !has("private")),
            is_implicit: false,
            declaring_type,
            env,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified_name(&self) -> String {
        build_member_fqn(&self.declaring_type, &self.name)
    }

    /// `name(T1, T2)` using the written parameter types.
    pub fn signature(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| p.type_ref().to_string())
            .collect();
        format!("{}({})", self.name, params.join(", "))
    }

    pub fn return_type(&self) -> &TypeRef {
        &self.return_type
    }

    pub fn parameters(&self) -> &[ParameterDeclaration] {
        &self.parameters
    }

    pub fn type_parameters(&self) -> &[TypeParameterDeclaration] {
        &self.type_parameters
    }

    pub fn specified_exceptions(&self) -> &[TypeRef] {
        &self.throws
    }

    pub fn access_specifier(&self) -> AccessSpecifier {
        self.access
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn is_implicit(&self) -> bool {
        self.is_implicit
    }

    pub fn declaring_type(&self) -> &str {
        &self.declaring_type
    }

    pub fn resolve_return_type(&self) -> Result<ResolvedType> {
        self.env.convert(&self.return_type)
    }
}
