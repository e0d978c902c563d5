//! Name solvers: the pluggable backends mapping names to declarations.
//!
//! A backend only answers "which declaration has this name". The
//! declarations it hands out are bound to the [`Universe`] they were solved
//! in, so their own lookups (ancestors, member types) see every backend and
//! not just the one that produced them.

mod combined;
mod jdk;
mod memory;
mod stub;

pub use combined::CombinedTypeSolver;
pub use memory::MemoryTypeSolver;
pub use stub::{StubTypeSolver, TypeStub};

use crate::config::ResolverConfig;
use crate::declarations::Decl;
use crate::error::{ResolveError, Result};
use crate::symbol::SymbolReference;
use std::fmt;
use std::sync::Arc;

/// Maps a qualified name to at most one declaration.
///
/// Implementations must be pure with respect to their contents: the same
/// name always yields the same answer. Ambiguity is the backend's own
/// business; the interface never returns more than one declaration.
pub trait TypeSolver: Send + Sync {
    fn solve(&self, name: &str, universe: &Universe) -> SymbolReference;
}

/// A resolution universe: the solver every declaration resolves against,
/// plus the resolver configuration.
#[derive(Clone)]
pub struct Universe {
    solver: Arc<dyn TypeSolver>,
    config: Arc<ResolverConfig>,
}

impl Universe {
    pub fn new(solver: impl TypeSolver + 'static) -> Self {
        Self::from_shared(Arc::new(solver))
    }

    pub fn from_shared(solver: Arc<dyn TypeSolver>) -> Self {
        Self {
            solver,
            config: Arc::new(ResolverConfig::default()),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn solver(&self) -> &Arc<dyn TypeSolver> {
        &self.solver
    }

    pub fn solve(&self, name: &str) -> SymbolReference {
        self.solver.solve(name, self)
    }

    /// Like [`Universe::solve`], with `Unsolved` turned into an error.
    pub fn solve_type(&self, name: &str) -> Result<Decl> {
        self.solve(name)
            .into_declaration()
            .ok_or_else(|| ResolveError::UnsolvedSymbol(name.to_string()))
    }

    pub fn same_universe(&self, other: &Universe) -> bool {
        Arc::ptr_eq(&self.solver, &other.solver)
    }
}

impl fmt::Debug for Universe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Universe")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
