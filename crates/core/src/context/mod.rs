pub mod chain;
mod unit;

pub use chain::{ScopeChain, ScopeContext, ScopeId, ScopeKind, ScopedName};
