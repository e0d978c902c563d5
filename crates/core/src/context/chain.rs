//! Scope context chain for type-name lookup.

use super::unit::resolve_in_unit;
use crate::declarations::declaration_for;
use crate::error::{ResolveError, Result};
use crate::solver::Universe;
use crate::source::SourceRef;
use crate::symbol::SymbolReference;
use crate::types::TypeVariable;
use std::sync::Arc;
use symscope_api::CompilationUnit;
use tracing::trace;

/// Identifier for a scope within one chain.
pub type ScopeId = usize;

/// Kind of scope
#[derive(Debug, Clone)]
pub enum ScopeKind {
    /// Terminal scope: file-level types, imports, then the name solver
    CompilationUnit {
        unit: Arc<CompilationUnit>,
        detached: bool,
    },
    /// Body of a type declaration
    TypeBody(SourceRef),
}

/// A scope and a lookup-only link to its parent.
#[derive(Debug, Clone)]
pub struct ScopeContext {
    pub id: ScopeId,
    pub parent_id: Option<ScopeId>,
    pub kind: ScopeKind,
}

/// What a simple name in a type expression denotes.
#[derive(Debug, Clone)]
pub enum ScopedName {
    Type(SymbolReference),
    Variable(TypeVariable),
}

/// Scopes around one syntax position, built per query.
#[derive(Debug, Clone)]
pub struct ScopeChain {
    scopes: Vec<ScopeContext>,
    universe: Universe,
}

impl ScopeChain {
    /// A chain with no scopes; fill it with [`ScopeChain::push`].
    pub fn new(universe: Universe) -> Self {
        Self {
            scopes: Vec::new(),
            universe,
        }
    }

    /// Compilation unit scope, then one body scope per declaration from the
    /// outermost type down to `source`.
    pub fn for_declaration(source: &SourceRef, universe: Universe) -> Self {
        let mut chain = Self::new(universe);
        let mut parent = Some(chain.push(
            None,
            ScopeKind::CompilationUnit {
                unit: Arc::clone(source.unit()),
                detached: source.is_detached(),
            },
        ));
        for scope in source.lineage() {
            parent = Some(chain.push(parent, ScopeKind::TypeBody(scope)));
        }
        chain
    }

    /// Register a new scope under `parent_id`.
    pub fn push(&mut self, parent_id: Option<ScopeId>, kind: ScopeKind) -> ScopeId {
        let id = self.scopes.len();
        self.scopes.push(ScopeContext {
            id,
            parent_id,
            kind,
        });
        id
    }

    pub fn get(&self, id: ScopeId) -> Option<&ScopeContext> {
        self.scopes.get(id)
    }

    /// The most recently pushed scope.
    pub fn innermost(&self) -> Option<ScopeId> {
        self.scopes.last().map(|s| s.id)
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Resolve `name` starting from the innermost scope.
    pub fn resolve_type(&self, name: &str) -> Result<SymbolReference> {
        let start = self.innermost().ok_or_else(|| {
            ResolveError::InternalInvariant("type lookup on an empty scope chain".to_string())
        })?;
        self.resolve_type_from(start, name)
    }

    /// Resolve `name` as a type or a type variable, innermost scope first.
    ///
    /// Each type body answers with its own name and member types before its
    /// type parameters. Once a static context has been left behind, type
    /// parameters of the enclosing bodies are no longer visible.
    pub fn resolve_name(&self, name: &str) -> Result<ScopedName> {
        let start = self.innermost().ok_or_else(|| {
            ResolveError::InternalInvariant("name lookup on an empty scope chain".to_string())
        })?;
        self.walk(start, name, true)
    }

    /// Resolve `name` starting from `start` and walking up parent links.
    ///
    /// In a type body: the body's own simple name, then its member types,
    /// then `Own.Rest` retried as `Rest` in the same body, then the parent.
    /// The compilation unit scope is terminal and never delegates further.
    pub fn resolve_type_from(&self, start: ScopeId, name: &str) -> Result<SymbolReference> {
        match self.walk(start, name, false)? {
            ScopedName::Type(reference) => Ok(reference),
            ScopedName::Variable(tv) => Err(ResolveError::InternalInvariant(format!(
                "type-only lookup of {} produced a type variable",
                tv.name
            ))),
        }
    }

    fn walk(&self, start: ScopeId, name: &str, variables: bool) -> Result<ScopedName> {
        let mut current = start;
        let mut name = name;
        let mut variables = variables;

        loop {
            let scope = self.scopes.get(current).ok_or_else(|| {
                ResolveError::InternalInvariant(format!("unknown scope id {}", current))
            })?;

            let source = match &scope.kind {
                ScopeKind::CompilationUnit { unit, detached } => {
                    return Ok(ScopedName::Type(resolve_in_unit(
                        unit,
                        *detached,
                        name,
                        &self.universe,
                    )));
                }
                ScopeKind::TypeBody(source) => source,
            };

            let node = source.node();
            if node.name == name {
                return Ok(ScopedName::Type(SymbolReference::solved(declaration_for(
                    source.clone(),
                    self.universe.clone(),
                ))));
            }

            if let Some(member) = source.member_by_name(name) {
                return Ok(ScopedName::Type(SymbolReference::solved(declaration_for(
                    member,
                    self.universe.clone(),
                ))));
            }

            if let Some(rest) = name
                .strip_prefix(node.name.as_str())
                .and_then(|r| r.strip_prefix('.'))
            {
                if !rest.is_empty() {
                    name = rest;
                    continue;
                }
            }

            if variables {
                if node.type_parameters.iter().any(|tp| tp.name == name) {
                    return Ok(ScopedName::Variable(TypeVariable {
                        name: name.to_string(),
                        declarer: source.qualified_name(),
                    }));
                }
                if source.is_static_context() {
                    variables = false;
                }
            }

            match scope.parent_id {
                Some(parent) => {
                    trace!(name, from = %node.name, "delegating type lookup to parent scope");
                    current = parent;
                }
                None => {
                    return Err(ResolveError::InternalInvariant(format!(
                        "scope of {} has no parent while resolving {}",
                        source.qualified_name(),
                        name
                    )));
                }
            }
        }
    }
}
