use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    /// Strict ancestor resolution hit a supertype name that does not resolve.
    #[error("Unresolved ancestor {name} of {declaration}")]
    UnresolvedAncestor { declaration: String, name: String },
    #[error("Unsolved symbol: {0}")]
    UnsolvedSymbol(String),
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    /// A scope chain was walked past its terminal context.
    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
    #[error("Ancestor walk of {declaration} exceeded depth {depth}")]
    RecursionLimit { declaration: String, depth: usize },
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("{0} is not a record declaration")]
    NotARecord(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Syntax model error: {0}")]
    Api(#[from] symscope_api::ApiError),
}

impl ResolveError {
    /// Whether this is a plain "name did not resolve" outcome, as opposed to
    /// a broken chain or a contract violation.
    pub fn is_unsolved(&self) -> bool {
        matches!(
            self,
            ResolveError::UnsolvedSymbol(_) | ResolveError::UnresolvedAncestor { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ResolveError>;
