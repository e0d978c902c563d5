use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use symscope_api::{CompilationUnit, TypeDeclNode, TypeRef};
use symscope_core::{
    CombinedTypeSolver, MemoryTypeSolver, ResolverConfig, StubTypeSolver, SymbolReference,
    TypeSolver, Universe,
};

/// Builds a resolution universe out of in-memory units.
///
/// Can be built using a fluent API.
#[derive(Default)]
pub struct Fixture {
    units: Vec<CompilationUnit>,
    with_prelude: bool,
    config: ResolverConfig,
}

#[allow(dead_code)]
impl Fixture {
    /// A fixture that also sees the JDK prelude stubs.
    pub fn new() -> Self {
        Self {
            with_prelude: true,
            ..Self::default()
        }
    }

    /// A fixture that only sees its own units.
    pub fn bare() -> Self {
        Self::default()
    }

    pub fn unit(mut self, unit: CompilationUnit) -> Self {
        self.units.push(unit);
        self
    }

    /// Adds a unit with a single top-level declaration.
    pub fn decl(self, package: &str, decl: TypeDeclNode) -> Self {
        self.unit(CompilationUnit::new(Some(package)).with_type(decl))
    }

    pub fn config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    fn solver(self) -> (CombinedTypeSolver, ResolverConfig) {
        symscope_core::logging::init_test_logging();
        let mut memory = MemoryTypeSolver::new();
        for unit in self.units {
            memory.add_unit(unit).expect("fixture unit should be valid");
        }
        let mut combined = CombinedTypeSolver::new().with(memory);
        if self.with_prelude {
            combined.add(StubTypeSolver::jdk_prelude());
        }
        (combined, self.config)
    }

    pub fn build(self) -> Universe {
        let (solver, config) = self.solver();
        Universe::new(solver).with_config(config)
    }

    /// Like [`Fixture::build`], with every solver call counted.
    pub fn build_counting(self) -> (Universe, Arc<CountingSolver>) {
        let (solver, config) = self.solver();
        let counting = Arc::new(CountingSolver::new(solver));
        let universe =
            Universe::from_shared(Arc::clone(&counting) as Arc<dyn TypeSolver>).with_config(config);
        (universe, counting)
    }
}

/// Records every name it is asked for before delegating.
pub struct CountingSolver {
    inner: Box<dyn TypeSolver>,
    calls: AtomicUsize,
    names: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl CountingSolver {
    pub fn new(inner: impl TypeSolver + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            calls: AtomicUsize::new(0),
            names: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn names(&self) -> Vec<String> {
        self.names.lock().unwrap().clone()
    }

    pub fn reset(&self) {
        self.calls.store(0, Ordering::SeqCst);
        self.names.lock().unwrap().clear();
    }
}

impl TypeSolver for CountingSolver {
    fn solve(&self, name: &str, universe: &Universe) -> SymbolReference {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names.lock().unwrap().push(name.to_string());
        self.inner.solve(name, universe)
    }
}

/// `package geo; record Point(int x, int y) implements Comparable<Point> {}`
#[allow(dead_code)]
pub fn point_record() -> TypeDeclNode {
    TypeDeclNode::record("Point")
        .with_modifiers(&["public"])
        .with_component("x", TypeRef::raw("int"))
        .with_component("y", TypeRef::raw("int"))
        .implements(TypeRef::generic("Comparable", vec![TypeRef::raw("Point")]))
}
