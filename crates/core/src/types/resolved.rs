use super::lazy::LazyType;
use crate::declarations::Decl;
use crate::error::{ResolveError, Result};
use std::fmt;

/// A type parameter used as a type, e.g. the `T` in `List<T>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVariable {
    pub name: String,
    /// Qualified name of the type or member declaring the parameter
    pub declarer: String,
}

/// A semantic type, as opposed to the syntactic [`symscope_api::TypeRef`].
#[derive(Clone, Debug)]
pub enum ResolvedType {
    Reference(ReferenceType),
    TypeVariable(TypeVariable),
    Primitive(String),
    Array(Box<ResolvedType>),
    Wildcard {
        bound: Option<Box<ResolvedType>>,
        is_upper_bound: bool,
    },
    /// Not resolved until someone looks at it
    Lazy(LazyType),
    Null,
    Void,
}

impl ResolvedType {
    pub fn is_reference(&self) -> bool {
        matches!(self, ResolvedType::Reference(_))
    }

    pub fn as_reference(&self) -> Option<&ReferenceType> {
        match self {
            ResolvedType::Reference(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_lazy(&self) -> bool {
        matches!(self, ResolvedType::Lazy(_))
    }

    /// Forces a lazy slot; any other variant is returned as is.
    pub fn forced(&self) -> Result<ResolvedType> {
        match self {
            ResolvedType::Lazy(lazy) => lazy.force(),
            other => Ok(other.clone()),
        }
    }

    pub fn into_reference(self) -> Result<ReferenceType> {
        match self.forced()? {
            ResolvedType::Reference(r) => Ok(r),
            other => Err(ResolveError::UnsupportedOperation(format!(
                "{} is not a reference type",
                other
            ))),
        }
    }
}

impl PartialEq for ResolvedType {
    fn eq(&self, other: &Self) -> bool {
        use ResolvedType::*;
        match (self, other) {
            (Lazy(a), Lazy(b)) => a == b,
            // The concrete side is already resolved, so forcing the lazy one
            // is allowed here.
            (Lazy(lazy), concrete) | (concrete, Lazy(lazy)) => lazy
                .force()
                .map(|value| value == *concrete)
                .unwrap_or(false),
            (Reference(a), Reference(b)) => a == b,
            (TypeVariable(a), TypeVariable(b)) => a == b,
            (Primitive(a), Primitive(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (
                Wildcard {
                    bound: a,
                    is_upper_bound: ua,
                },
                Wildcard {
                    bound: b,
                    is_upper_bound: ub,
                },
            ) => ua == ub && a == b,
            (Null, Null) | (Void, Void) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolvedType::Reference(r) => write!(f, "{}", r),
            ResolvedType::TypeVariable(tv) => f.write_str(&tv.name),
            ResolvedType::Primitive(name) => f.write_str(name),
            ResolvedType::Array(element) => write!(f, "{}[]", element),
            ResolvedType::Wildcard {
                bound,
                is_upper_bound,
            } => match bound {
                Some(b) if *is_upper_bound => write!(f, "? extends {}", b),
                Some(b) => write!(f, "? super {}", b),
                None => f.write_str("?"),
            },
            ResolvedType::Lazy(lazy) => write!(f, "{}", lazy),
            ResolvedType::Null => f.write_str("null"),
            ResolvedType::Void => f.write_str("void"),
        }
    }
}

/// A declaration instantiated with type arguments.
///
/// Argument slots may still be lazy; nothing here forces them unless asked.
#[derive(Clone)]
pub struct ReferenceType {
    declaration: Decl,
    type_arguments: Vec<ResolvedType>,
}

impl ReferenceType {
    pub fn new(declaration: Decl, type_arguments: Vec<ResolvedType>) -> Self {
        Self {
            declaration,
            type_arguments,
        }
    }

    /// Use of a declaration without type arguments.
    pub fn raw(declaration: Decl) -> Self {
        Self::new(declaration, Vec::new())
    }

    pub fn declaration(&self) -> &Decl {
        &self.declaration
    }

    pub fn qualified_name(&self) -> String {
        self.declaration.qualified_name()
    }

    /// Argument slots as stored, lazy ones included.
    pub fn type_arguments(&self) -> &[ResolvedType] {
        &self.type_arguments
    }

    /// Forces every lazy slot.
    pub fn forced_type_arguments(&self) -> Result<Vec<ResolvedType>> {
        self.type_arguments.iter().map(|arg| arg.forced()).collect()
    }

    pub fn type_argument(&self, index: usize) -> Result<ResolvedType> {
        self.type_arguments
            .get(index)
            .ok_or(ResolveError::IndexOutOfBounds {
                index,
                len: self.type_arguments.len(),
            })?
            .forced()
    }

    pub fn is_raw(&self) -> bool {
        self.type_arguments.is_empty()
    }
}

impl PartialEq for ReferenceType {
    fn eq(&self, other: &Self) -> bool {
        self.declaration.qualified_name() == other.declaration.qualified_name()
            && self.type_arguments == other.type_arguments
    }
}

impl fmt::Debug for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceType")
            .field("declaration", &self.declaration.qualified_name())
            .field("type_arguments", &self.type_arguments)
            .finish()
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.declaration.qualified_name())?;
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.type_arguments.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}
