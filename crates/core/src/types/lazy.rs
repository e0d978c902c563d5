use super::env::TypeEnv;
use super::resolved::{ReferenceType, ResolvedType};
use crate::error::Result;
use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;
use symscope_api::TypeRef;
use tracing::trace;

/// A type argument resolved on first use.
///
/// Ancestor lists wrap every generic argument in one of these, which is what
/// lets `record Point(...) implements Comparable<Point>` be built without
/// resolving `Point` while `Point` itself is being resolved. Clones share the
/// memo slot; concurrent first callers block on the cell and exactly one
/// result is kept.
#[derive(Clone)]
pub struct LazyType {
    inner: Arc<LazyInner>,
}

struct LazyInner {
    env: TypeEnv,
    expr: TypeRef,
    value: OnceCell<ResolvedType>,
}

impl LazyType {
    pub fn new(env: TypeEnv, expr: TypeRef) -> Self {
        Self {
            inner: Arc::new(LazyInner {
                env,
                expr,
                value: OnceCell::new(),
            }),
        }
    }

    /// Resolves the expression once and returns the memoized value after.
    ///
    /// A failed resolution is not memoized; resolution is deterministic, so
    /// a later call fails the same way.
    pub fn force(&self) -> Result<ResolvedType> {
        self.inner
            .value
            .get_or_try_init(|| {
                trace!(expr = %self.inner.expr, "forcing lazy type argument");
                self.inner.env.convert(&self.inner.expr)
            })
            .cloned()
    }

    pub fn force_reference(&self) -> Result<ReferenceType> {
        self.force()?.into_reference()
    }

    /// The memoized value, without forcing.
    pub fn peek(&self) -> Option<&ResolvedType> {
        self.inner.value.get()
    }

    pub fn is_forced(&self) -> bool {
        self.inner.value.get().is_some()
    }

    pub fn expression(&self) -> &TypeRef {
        &self.inner.expr
    }

    pub fn environment(&self) -> &TypeEnv {
        &self.inner.env
    }
}

impl PartialEq for LazyType {
    /// Never forces a slot that neither side has forced: two unforced slots
    /// are equal when they hold the same expression in the same scope.
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.inner, &other.inner) {
            return true;
        }
        match (self.peek(), other.peek()) {
            (Some(a), Some(b)) => a == b,
            (None, None) => {
                self.inner.expr == other.inner.expr && self.inner.env.same_scope(&other.inner.env)
            }
            (Some(forced), None) => other.force().map(|v| v == *forced).unwrap_or(false),
            (None, Some(forced)) => self.force().map(|v| v == *forced).unwrap_or(false),
        }
    }
}

impl fmt::Debug for LazyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(value) => f.debug_tuple("LazyType").field(value).finish(),
            None => f
                .debug_tuple("LazyType")
                .field(&format_args!("unforced {}", self.inner.expr))
                .finish(),
        }
    }
}

impl fmt::Display for LazyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "{}", self.inner.expr),
        }
    }
}
