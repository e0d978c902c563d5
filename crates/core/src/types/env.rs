//! Conversion of syntactic type expressions into semantic types.

use super::lazy::LazyType;
use super::resolved::{ReferenceType, ResolvedType, TypeVariable};
use crate::context::{ScopeChain, ScopedName};
use crate::declarations::Decl;
use crate::error::{ResolveError, Result};
use crate::solver::Universe;
use crate::source::SourceRef;
use crate::symbol::SymbolReference;
use symscope_api::{TypeParameterNode, TypeRef};

/// Where names in a type expression are looked up.
#[derive(Clone, Debug)]
pub enum ScopeAnchor {
    /// Inside the body of a source declaration
    Source(SourceRef),
    /// Inside a precompiled declaration, whose names are already qualified
    Qualified {
        qualified_name: String,
        type_parameters: Vec<String>,
    },
}

/// Everything needed to resolve a type expression later: the universe and
/// the scope the expression was written in.
#[derive(Clone, Debug)]
pub struct TypeEnv {
    universe: Universe,
    anchor: ScopeAnchor,
    /// Type parameters of the method or constructor being resolved
    locals: Vec<TypeVariable>,
}

impl TypeEnv {
    pub fn for_source(source: SourceRef, universe: Universe) -> Self {
        Self {
            universe,
            anchor: ScopeAnchor::Source(source),
            locals: Vec::new(),
        }
    }

    pub fn for_qualified(
        qualified_name: impl Into<String>,
        type_parameters: Vec<String>,
        universe: Universe,
    ) -> Self {
        Self {
            universe,
            anchor: ScopeAnchor::Qualified {
                qualified_name: qualified_name.into(),
                type_parameters,
            },
            locals: Vec::new(),
        }
    }

    /// Brings the type parameters of a generic method or constructor into scope.
    pub fn with_type_parameters(mut self, params: &[TypeParameterNode], declarer: &str) -> Self {
        self.locals.extend(params.iter().map(|p| TypeVariable {
            name: p.name.clone(),
            declarer: declarer.to_string(),
        }));
        self
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn anchor(&self) -> &ScopeAnchor {
        &self.anchor
    }

    pub fn same_scope(&self, other: &TypeEnv) -> bool {
        if !self.universe.same_universe(&other.universe) || self.locals != other.locals {
            return false;
        }
        match (&self.anchor, &other.anchor) {
            (ScopeAnchor::Source(a), ScopeAnchor::Source(b)) => a.same_node(b),
            (
                ScopeAnchor::Qualified {
                    qualified_name: a, ..
                },
                ScopeAnchor::Qualified {
                    qualified_name: b, ..
                },
            ) => a == b,
            _ => false,
        }
    }

    /// Resolves a type name as written in this scope.
    pub fn resolve_name(&self, name: &str) -> Result<SymbolReference> {
        match &self.anchor {
            ScopeAnchor::Source(source) => {
                ScopeChain::for_declaration(source, self.universe.clone()).resolve_type(name)
            }
            ScopeAnchor::Qualified { qualified_name, .. } => Ok(self
                .universe
                .solve(name)
                .or_else(|| self.universe.solve(&format!("{}.{}", qualified_name, name)))
                .or_else(|| {
                    if name.contains('.') {
                        SymbolReference::Unsolved
                    } else {
                        self.universe.solve(&format!("java.lang.{}", name))
                    }
                })),
        }
    }

    /// Resolves an undotted name to a type or an in-scope type parameter.
    ///
    /// Method and constructor type parameters come first. Inside source the
    /// scope chain then decides, innermost declaration first.
    pub fn resolve_simple_name(&self, name: &str) -> Result<ScopedName> {
        if let Some(local) = self.locals.iter().rev().find(|tv| tv.name == name) {
            return Ok(ScopedName::Variable(local.clone()));
        }
        match &self.anchor {
            ScopeAnchor::Source(source) => {
                ScopeChain::for_declaration(source, self.universe.clone()).resolve_name(name)
            }
            ScopeAnchor::Qualified {
                qualified_name,
                type_parameters,
            } => {
                if type_parameters.iter().any(|tp| tp == name) {
                    return Ok(ScopedName::Variable(TypeVariable {
                        name: name.to_string(),
                        declarer: qualified_name.clone(),
                    }));
                }
                self.resolve_name(name).map(ScopedName::Type)
            }
        }
    }

    /// Resolves a class or interface name, retrying a long dotted name with
    /// its last two segments (`a.b.Outer.Inner` → `Outer.Inner`).
    pub fn solve_class_name(&self, name: &str) -> Result<Decl> {
        let mut reference = self.resolve_name(name)?;
        if !reference.is_solved() {
            let segments: Vec<&str> = name.split('.').collect();
            if segments.len() > 2 {
                let local_name = segments[segments.len() - 2..].join(".");
                reference = self.resolve_name(&local_name)?;
            }
        }
        reference
            .into_declaration()
            .ok_or_else(|| ResolveError::UnsolvedSymbol(name.to_string()))
    }

    pub fn convert(&self, ty: &TypeRef) -> Result<ResolvedType> {
        match ty {
            TypeRef::Raw(name) if ty.is_primitive() => Ok(ResolvedType::Primitive(name.clone())),
            TypeRef::Raw(_) if ty.is_void() => Ok(ResolvedType::Void),
            TypeRef::Raw(name) if name.contains('.') => {
                Ok(ResolvedType::Reference(self.reference_with_args(name, &[])?))
            }
            TypeRef::Raw(name) => match self.resolve_simple_name(name)? {
                ScopedName::Variable(tv) => Ok(ResolvedType::TypeVariable(tv)),
                ScopedName::Type(reference) => {
                    let declaration = reference
                        .into_declaration()
                        .ok_or_else(|| ResolveError::UnsolvedSymbol(name.clone()))?;
                    Ok(ResolvedType::Reference(ReferenceType::new(declaration, Vec::new())))
                }
            },
            TypeRef::Generic { base, args } => {
                let name = match base.as_ref() {
                    TypeRef::Raw(name) => name,
                    other => return Err(ResolveError::UnsolvedSymbol(other.to_string())),
                };
                Ok(ResolvedType::Reference(self.reference_with_args(name, args)?))
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                let mut resolved = self.convert(element)?;
                for _ in 0..(*dimensions).max(1) {
                    resolved = ResolvedType::Array(Box::new(resolved));
                }
                Ok(resolved)
            }
            TypeRef::Wildcard {
                bound,
                is_upper_bound,
            } => {
                let bound = match bound {
                    Some(b) => Some(Box::new(self.convert(b)?)),
                    None => None,
                };
                Ok(ResolvedType::Wildcard {
                    bound,
                    is_upper_bound: *is_upper_bound,
                })
            }
            TypeRef::Unknown => Err(ResolveError::UnsolvedSymbol(ty.to_string())),
        }
    }

    /// Converts a supertype expression. Anything other than a class or
    /// interface type counts as unresolved.
    pub fn to_reference_type(&self, ty: &TypeRef) -> Result<ReferenceType> {
        match ty {
            TypeRef::Raw(name) if !ty.is_primitive() && !ty.is_void() => {
                self.reference_with_args(name, &[])
            }
            TypeRef::Generic { .. } => self.convert(ty)?.into_reference(),
            _ => Err(ResolveError::UnsolvedSymbol(ty.to_string())),
        }
    }

    fn reference_with_args(&self, name: &str, args: &[TypeRef]) -> Result<ReferenceType> {
        let declaration = self.solve_class_name(name)?;
        let type_arguments = args
            .iter()
            .map(|arg| ResolvedType::Lazy(LazyType::new(self.clone(), arg.clone())))
            .collect();
        Ok(ReferenceType::new(declaration, type_arguments))
    }
}
