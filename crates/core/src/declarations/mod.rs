//! Declaration capability and its source-, stub- and synthesis-backed
//! implementations.
//!
//! Every backend adapts its own representation to [`TypeDeclaration`];
//! consumers never see which one they hold.

mod adapter;
mod class;
mod constructor;
mod members;
mod record;
mod stub;

pub use adapter::SourceTypeAdapter;
pub use class::SourceTypeDeclaration;
pub use constructor::{CanonicalConstructor, Constructor, DeclaredConstructor, DefaultConstructor};
pub use members::{
    FieldDeclaration, MethodDeclaration, ParameterDeclaration, TypeParameterDeclaration,
};
pub use record::RecordDeclaration;
pub use stub::StubTypeDeclaration;

use crate::ancestors;
use crate::error::Result;
use crate::solver::Universe;
use crate::source::SourceRef;
use crate::types::{ReferenceType, ResolvedType};
use std::fmt;
use std::sync::Arc;
use symscope_api::{AccessSpecifier, TypeDeclKind};

/// Shared, read-only handle on a type declaration.
pub type Decl = Arc<dyn TypeDeclaration>;

/// A class, interface, enum or record, wherever it came from.
///
/// Identity is the qualified name. Implementations are immutable views and
/// hold only lookup links (never ownership) to their enclosing declaration.
pub trait TypeDeclaration: Send + Sync + fmt::Debug {
    fn name(&self) -> String;

    fn qualified_name(&self) -> String;

    /// `None` for a declaration detached from any compilation unit.
    fn fully_qualified_name(&self) -> Option<String> {
        Some(self.qualified_name())
    }

    fn package_name(&self) -> String;

    /// Qualified name without the package, e.g. `Outer.Inner`.
    fn class_name(&self) -> String;

    fn kind(&self) -> TypeDeclKind;

    fn access_specifier(&self) -> AccessSpecifier;

    fn type_parameters(&self) -> Vec<TypeParameterDeclaration>;

    fn container_type(&self) -> Option<Decl>;

    /// Member types declared directly in this declaration.
    fn internal_types(&self) -> Vec<Decl>;

    /// Direct supertypes: the superclass (or its implicit equivalent) first,
    /// then interfaces in written order.
    ///
    /// With `accept_incomplete` an unresolvable supertype is left out;
    /// otherwise it fails with [`crate::ResolveError::UnresolvedAncestor`].
    fn ancestors(&self, accept_incomplete: bool) -> Result<Vec<ReferenceType>>;

    fn fields(&self) -> Vec<FieldDeclaration>;

    fn methods(&self) -> Vec<MethodDeclaration>;

    fn constructors(&self) -> Vec<Arc<dyn Constructor>>;

    /// Whether an annotation resolving to `qualified_name` is written on
    /// this declaration.
    fn has_directly_annotation(&self, qualified_name: &str) -> bool;

    fn universe(&self) -> &Universe;

    fn as_record(&self) -> Option<&RecordDeclaration> {
        None
    }

    fn is_record(&self) -> bool {
        self.as_record().is_some()
    }

    fn is_interface(&self) -> bool {
        self.kind() == TypeDeclKind::Interface
    }

    fn is_root_type(&self) -> bool {
        self.qualified_name() == self.universe().config().root_type
    }

    /// Whether `qualified_name` names a member type nested at any depth.
    fn has_internal_type(&self, qualified_name: &str) -> bool {
        self.internal_types()
            .iter()
            .any(|t| t.qualified_name() == qualified_name || t.has_internal_type(qualified_name))
    }

    /// Transitive supertypes, breadth first, each listed once.
    fn all_ancestors(&self, accept_incomplete: bool) -> Result<Vec<ReferenceType>> {
        ancestors::all_ancestors(self, accept_incomplete)
    }

    fn is_assignable_by(&self, ty: &ResolvedType) -> bool {
        ancestors::is_assignable_by(self, ty)
    }

    fn is_assignable_by_declaration(&self, other: &dyn TypeDeclaration) -> bool {
        ancestors::is_assignable_by_declaration(self, other)
    }
}

/// Wraps a source node in the declaration type matching its kind.
pub fn declaration_for(source: SourceRef, universe: Universe) -> Decl {
    match source.node().kind {
        TypeDeclKind::Record => Arc::new(RecordDeclaration::from_source(source, universe)),
        _ => Arc::new(SourceTypeDeclaration::new(source, universe)),
    }
}
