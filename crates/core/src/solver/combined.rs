use super::{TypeSolver, Universe};
use crate::symbol::SymbolReference;
use std::sync::Arc;
use tracing::trace;

/// Asks its backends in registration order; the first `Solved` answer wins.
#[derive(Default, Clone)]
pub struct CombinedTypeSolver {
    solvers: Vec<Arc<dyn TypeSolver>>,
}

impl CombinedTypeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, solver: impl TypeSolver + 'static) {
        self.solvers.push(Arc::new(solver));
    }

    pub fn add_shared(&mut self, solver: Arc<dyn TypeSolver>) {
        self.solvers.push(solver);
    }

    pub fn with(mut self, solver: impl TypeSolver + 'static) -> Self {
        self.add(solver);
        self
    }

    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }
}

impl TypeSolver for CombinedTypeSolver {
    fn solve(&self, name: &str, universe: &Universe) -> SymbolReference {
        for (idx, solver) in self.solvers.iter().enumerate() {
            let reference = solver.solve(name, universe);
            if reference.is_solved() {
                trace!(name, backend = idx, "solved");
                return reference;
            }
        }
        SymbolReference::Unsolved
    }
}

impl std::fmt::Debug for CombinedTypeSolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombinedTypeSolver")
            .field("backends", &self.solvers.len())
            .finish()
    }
}
