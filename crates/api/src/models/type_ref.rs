use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive type keywords of the language.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "boolean", "byte", "short", "char", "int", "long", "float", "double",
];

/// A syntactic type expression, exactly as written in the source.
///
/// Nothing in a `TypeRef` is resolved: `Raw("Entry")` may name a nested type,
/// an imported type, a type parameter, or nothing at all.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "kind", content = "data")]
pub enum TypeRef {
    /// Primitive keyword or (possibly dotted) type name, e.g. "int", "Map.Entry"
    Raw(String),

    /// Generic instantiation (e.g., Comparable<Point>)
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Array type (e.g., String[])
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    /// Wildcard type (e.g., ? extends Number)
    Wildcard {
        bound: Option<Box<TypeRef>>,
        is_upper_bound: bool, // true: extends, false: super
    },

    Unknown,
}

impl TypeRef {
    /// Helper to create a Raw type
    pub fn raw(s: impl Into<String>) -> Self {
        TypeRef::Raw(s.into())
    }

    /// Helper to create a generic instantiation of a named type
    pub fn generic(base: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            base: Box::new(TypeRef::Raw(base.into())),
            args,
        }
    }

    pub fn array(element: TypeRef, dimensions: usize) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            dimensions,
        }
    }

    /// The written name of the named type at the root of this expression.
    pub fn base_name(&self) -> Option<&str> {
        match self {
            TypeRef::Raw(name) => Some(name),
            TypeRef::Generic { base, .. } => base.base_name(),
            _ => None,
        }
    }

    pub fn type_arguments(&self) -> &[TypeRef] {
        match self {
            TypeRef::Generic { args, .. } => args,
            _ => &[],
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Raw(name) if PRIMITIVE_TYPES.contains(&name.as_str()))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, TypeRef::Raw(name) if name == "void")
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Unknown
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Raw(name) => f.write_str(name),
            TypeRef::Generic { base, args } => {
                write!(f, "{}<", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                write!(f, "{}", element)?;
                for _ in 0..*dimensions {
                    f.write_str("[]")?;
                }
                Ok(())
            }
            TypeRef::Wildcard {
                bound,
                is_upper_bound,
            } => match bound {
                Some(b) if *is_upper_bound => write!(f, "? extends {}", b),
                Some(b) => write!(f, "? super {}", b),
                None => f.write_str("?"),
            },
            TypeRef::Unknown => f.write_str("<unknown>"),
        }
    }
}
