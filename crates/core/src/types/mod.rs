pub mod env;
pub mod lazy;
pub mod resolved;

pub use env::{ScopeAnchor, TypeEnv};
pub use lazy::LazyType;
pub use resolved::{ReferenceType, ResolvedType, TypeVariable};
