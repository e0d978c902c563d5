use crate::declarations::Decl;
use std::fmt;

/// Outcome of a name lookup. "Not found" is a value, never an error.
#[derive(Clone)]
pub enum SymbolReference {
    Solved(Decl),
    Unsolved,
}

impl SymbolReference {
    pub fn solved(decl: Decl) -> Self {
        SymbolReference::Solved(decl)
    }

    pub fn unsolved() -> Self {
        SymbolReference::Unsolved
    }

    pub fn is_solved(&self) -> bool {
        matches!(self, SymbolReference::Solved(_))
    }

    pub fn declaration(&self) -> Option<&Decl> {
        match self {
            SymbolReference::Solved(decl) => Some(decl),
            SymbolReference::Unsolved => None,
        }
    }

    pub fn into_declaration(self) -> Option<Decl> {
        match self {
            SymbolReference::Solved(decl) => Some(decl),
            SymbolReference::Unsolved => None,
        }
    }

    /// Keeps a solved result, otherwise tries `f`.
    pub fn or_else<F: FnOnce() -> SymbolReference>(self, f: F) -> SymbolReference {
        match self {
            SymbolReference::Solved(_) => self,
            SymbolReference::Unsolved => f(),
        }
    }
}

impl From<Option<Decl>> for SymbolReference {
    fn from(decl: Option<Decl>) -> Self {
        match decl {
            Some(decl) => SymbolReference::Solved(decl),
            None => SymbolReference::Unsolved,
        }
    }
}

impl fmt::Debug for SymbolReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolReference::Solved(decl) => write!(f, "Solved({})", decl.qualified_name()),
            SymbolReference::Unsolved => f.write_str("Unsolved"),
        }
    }
}
