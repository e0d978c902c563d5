//! Members implied by a declaration rather than written in it.

use crate::config::CanonicalConstructorPolicy;
use crate::declarations::{
    CanonicalConstructor, Constructor, ParameterDeclaration, RecordDeclaration, TypeDeclaration,
};
use crate::types::ResolvedType;
use std::sync::Arc;
use tracing::trace;

/// Explicit constructors in written order, followed by the canonical one.
///
/// Under [`CanonicalConstructorPolicy::Always`] the canonical constructor is
/// appended even when the body already declares one with the same
/// signature.
pub fn record_constructors(record: &RecordDeclaration) -> Vec<Arc<dyn Constructor>> {
    let mut constructors = record.explicit_constructors();
    let policy = record.universe().config().canonical_constructor_policy;
    if policy == CanonicalConstructorPolicy::SkipWhenDeclared
        && declares_canonical(record, &constructors)
    {
        trace!(record = %record.qualified_name(), "canonical constructor written explicitly");
        return constructors;
    }
    constructors.push(Arc::new(CanonicalConstructor::new(record.clone())));
    constructors
}

/// Whether one of `explicit` takes the record components in order, compared
/// by resolved type (`String` and `java.lang.String` are the same).
pub fn declares_canonical(record: &RecordDeclaration, explicit: &[Arc<dyn Constructor>]) -> bool {
    let components = record.components();
    explicit.iter().any(|constructor| {
        constructor.param_count() == components.len()
            && components.iter().enumerate().all(|(i, component)| {
                constructor
                    .param(i)
                    .is_ok_and(|param| same_parameter_type(&param, component))
            })
    })
}

fn same_parameter_type(a: &ParameterDeclaration, b: &ParameterDeclaration) -> bool {
    if a.type_ref() == b.type_ref() {
        return true;
    }
    match (a.resolve_type(), b.resolve_type()) {
        (Ok(a), Ok(b)) => same_type(&a, &b),
        _ => false,
    }
}

/// Structural equality with every lazy argument forced. Unresolvable sides
/// are never equal.
fn same_type(a: &ResolvedType, b: &ResolvedType) -> bool {
    let (Ok(a), Ok(b)) = (a.forced(), b.forced()) else {
        return false;
    };
    match (&a, &b) {
        (ResolvedType::Reference(x), ResolvedType::Reference(y)) => {
            x.qualified_name() == y.qualified_name()
                && x.type_arguments().len() == y.type_arguments().len()
                && x
                    .type_arguments()
                    .iter()
                    .zip(y.type_arguments())
                    .all(|(p, q)| same_type(p, q))
        }
        (ResolvedType::Array(x), ResolvedType::Array(y)) => same_type(x, y),
        (
            ResolvedType::Wildcard {
                bound: x,
                is_upper_bound: ux,
            },
            ResolvedType::Wildcard {
                bound: y,
                is_upper_bound: uy,
            },
        ) => {
            ux == uy
                && match (x, y) {
                    (Some(x), Some(y)) => same_type(x, y),
                    (None, None) => true,
                    _ => false,
                }
        }
        _ => a == b,
    }
}
