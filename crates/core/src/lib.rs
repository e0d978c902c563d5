//! Semantic resolution core for Java type declarations.
//!
//! Names are resolved through a [`context::ScopeChain`] that ends at the
//! compilation unit and, finally, at a pluggable [`solver::TypeSolver`].
//! Declarations from source, from stubs, and records with their implied
//! members all answer through the [`declarations::TypeDeclaration`] trait.

mod ancestors;
pub mod config;
pub mod context;
pub mod declarations;
pub mod error;
pub mod logging;
pub mod naming;
pub mod solver;
pub mod source;
pub mod symbol;
pub mod synthesis;
pub mod types;

pub use config::{CanonicalConstructorPolicy, ResolverConfig};
pub use context::{ScopeChain, ScopeContext, ScopeId, ScopeKind, ScopedName};
pub use declarations::{
    CanonicalConstructor, Constructor, Decl, RecordDeclaration, SourceTypeDeclaration,
    StubTypeDeclaration, TypeDeclaration, declaration_for,
};
pub use error::{ResolveError, Result};
pub use solver::{
    CombinedTypeSolver, MemoryTypeSolver, StubTypeSolver, TypeSolver, TypeStub, Universe,
};
pub use source::SourceRef;
pub use symbol::SymbolReference;
pub use types::{LazyType, ReferenceType, ResolvedType, TypeEnv, TypeVariable};
