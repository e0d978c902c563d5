pub mod access;
pub mod syntax;
pub mod type_ref;

pub use access::*;
pub use syntax::*;
pub use type_ref::*;
