//! Syntax-model interface shared between a Java front end and the resolution core.
//!
//! A parser (tree-sitter, javac bridge, or a JSON dump from another process)
//! lowers source text into these plain data types. The resolution core in
//! `symscope-core` only ever reads them.

pub mod error;
pub mod models;

pub use error::{ApiError, ApiResult};
pub use models::*;
