//! Ancestor resolution and the assignability checks built on it.
//!
//! Every declaration kind funnels its direct supertypes through
//! [`direct_ancestors`], so the incomplete-list policy and the self/nesting
//! rejection behave the same for source, stub and record declarations.

use crate::declarations::TypeDeclaration;
use crate::error::{ResolveError, Result};
use crate::types::{ReferenceType, ResolvedType, TypeEnv};
use std::collections::{HashSet, VecDeque};
use symscope_api::TypeRef;
use tracing::{debug, warn};

const CLONEABLE: &str = "java.lang.Cloneable";
const SERIALIZABLE: &str = "java.io.Serializable";

/// The superclass slot of a declaration.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Superclass<'a> {
    /// Not written; solved by qualified name straight from the universe
    Implicit(&'a str),
    /// Written in the declaration; resolved from its scope
    Declared(&'a TypeRef),
    /// Interfaces
    None,
}

/// Direct supertypes: the superclass slot first, then `interfaces` in
/// written order. The order is never changed and duplicates are kept.
pub(crate) fn direct_ancestors<D: TypeDeclaration + ?Sized>(
    decl: &D,
    env: &TypeEnv,
    superclass: Superclass<'_>,
    interfaces: &[TypeRef],
    accept_incomplete: bool,
) -> Result<Vec<ReferenceType>> {
    let mut ancestors = Vec::new();
    if decl.is_root_type() {
        return Ok(ancestors);
    }
    let Some(own_name) = decl.fully_qualified_name() else {
        debug!(declaration = %decl.name(), "no qualified name, no ancestors");
        return Ok(ancestors);
    };

    let candidate = match superclass {
        Superclass::Implicit(name) => Some((
            name.to_string(),
            decl.universe().solve_type(name).map(ReferenceType::raw),
        )),
        Superclass::Declared(written) => Some((written.to_string(), env.to_reference_type(written))),
        Superclass::None => None,
    };
    if let Some((written, resolved)) = candidate {
        admit(&own_name, &written, resolved, accept_incomplete, &mut ancestors)?;
    }
    for written in interfaces {
        let resolved = env.to_reference_type(written);
        admit(
            &own_name,
            &written.to_string(),
            resolved,
            accept_incomplete,
            &mut ancestors,
        )?;
    }
    Ok(ancestors)
}

/// Resolves interface expressions alone, with the same policy.
pub(crate) fn interfaces<D: TypeDeclaration + ?Sized>(
    decl: &D,
    env: &TypeEnv,
    interfaces: &[TypeRef],
    accept_incomplete: bool,
) -> Result<Vec<ReferenceType>> {
    direct_ancestors(decl, env, Superclass::None, interfaces, accept_incomplete)
}

fn admit(
    own_name: &str,
    written: &str,
    resolved: Result<ReferenceType>,
    accept_incomplete: bool,
    ancestors: &mut Vec<ReferenceType>,
) -> Result<()> {
    match resolved {
        Ok(candidate) => {
            if is_ancestor(&candidate, own_name) {
                ancestors.push(candidate);
            } else {
                debug!(
                    declaration = own_name,
                    candidate = %candidate.qualified_name(),
                    "candidate is the declaration itself or encloses it"
                );
            }
            Ok(())
        }
        Err(e) if e.is_unsolved() => {
            if accept_incomplete {
                debug!(declaration = own_name, ancestor = written, "omitting unresolved ancestor");
                Ok(())
            } else {
                Err(ResolveError::UnresolvedAncestor {
                    declaration: own_name.to_string(),
                    name: written.to_string(),
                })
            }
        }
        Err(e) => Err(e),
    }
}

/// An enclosing type is never an ancestor of its member types, and nothing
/// is its own ancestor.
fn is_ancestor(candidate: &ReferenceType, own_name: &str) -> bool {
    let declaration = candidate.declaration();
    declaration.qualified_name() != own_name && !declaration.has_internal_type(own_name)
}

/// Breadth-first walk over transitive supertypes, each listed once by
/// qualified name.
///
/// The walk stops after `max_ancestor_depth` levels. With
/// `accept_incomplete` the truncated list is returned; otherwise
/// [`ResolveError::RecursionLimit`] is raised.
pub(crate) fn all_ancestors<D: TypeDeclaration + ?Sized>(
    decl: &D,
    accept_incomplete: bool,
) -> Result<Vec<ReferenceType>> {
    let max_depth = decl.universe().config().max_ancestor_depth;
    let own_name = decl.qualified_name();
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(own_name.clone());

    let mut result = Vec::new();
    let mut queue: VecDeque<(ReferenceType, usize)> = decl
        .ancestors(accept_incomplete)?
        .into_iter()
        .map(|a| (a, 1))
        .collect();

    while let Some((ancestor, depth)) = queue.pop_front() {
        if !seen.insert(ancestor.qualified_name()) {
            continue;
        }
        if depth > max_depth {
            if accept_incomplete {
                warn!(
                    declaration = %own_name,
                    depth = max_depth,
                    "ancestor walk truncated at the depth bound"
                );
                break;
            }
            return Err(ResolveError::RecursionLimit {
                declaration: own_name,
                depth: max_depth,
            });
        }
        for parent in ancestor.declaration().ancestors(accept_incomplete)? {
            if !seen.contains(&parent.qualified_name()) {
                queue.push_back((parent, depth + 1));
            }
        }
        result.push(ancestor);
    }
    Ok(result)
}

/// Whether a value of type `ty` can be assigned to `decl` without
/// conversion. Boxing is not considered.
pub(crate) fn is_assignable_by<D: TypeDeclaration + ?Sized>(decl: &D, ty: &ResolvedType) -> bool {
    match ty {
        ResolvedType::Null => true,
        ResolvedType::Reference(reference) => {
            is_assignable_by_declaration(decl, reference.declaration().as_ref())
        }
        ResolvedType::Lazy(lazy) => lazy
            .force()
            .map(|forced| is_assignable_by(decl, &forced))
            .unwrap_or(false),
        ResolvedType::Array(_) => {
            let name = decl.qualified_name();
            decl.is_root_type() || name == CLONEABLE || name == SERIALIZABLE
        }
        ResolvedType::TypeVariable(_) | ResolvedType::Wildcard { .. } => decl.is_root_type(),
        ResolvedType::Primitive(_) | ResolvedType::Void => false,
    }
}

pub(crate) fn is_assignable_by_declaration<D: TypeDeclaration + ?Sized>(
    decl: &D,
    other: &dyn TypeDeclaration,
) -> bool {
    let name = decl.qualified_name();
    if other.qualified_name() == name || decl.is_root_type() {
        return true;
    }
    match other.all_ancestors(true) {
        Ok(ancestors) => ancestors.iter().any(|a| a.qualified_name() == name),
        Err(e) => {
            debug!(target_type = %name, error = %e, "assignability walk failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ResolverConfig;
    use crate::solver::{CombinedTypeSolver, MemoryTypeSolver, StubTypeSolver, Universe};
    use symscope_api::{CompilationUnit, TypeDeclNode};

    fn universe_with(unit: CompilationUnit) -> Universe {
        Universe::new(
            CombinedTypeSolver::new()
                .with(MemoryTypeSolver::new().with_unit(unit).unwrap())
                .with(StubTypeSolver::jdk_prelude()),
        )
    }

    fn names(refs: &[ReferenceType]) -> Vec<String> {
        refs.iter().map(|r| r.qualified_name()).collect()
    }

    #[test]
    fn class_without_superclass_extends_the_root() {
        let universe = universe_with(
            CompilationUnit::new(Some("app")).with_type(TypeDeclNode::class("Service")),
        );
        let service = universe.solve_type("app.Service").unwrap();
        assert_eq!(names(&service.ancestors(false).unwrap()), vec!["java.lang.Object"]);
    }

    #[test]
    fn unresolved_interface_fails_only_in_strict_mode() {
        let universe = universe_with(
            CompilationUnit::new(Some("app")).with_type(
                TypeDeclNode::class("Service")
                    .implements(TypeRef::raw("Missing"))
                    .implements(TypeRef::raw("Runnable")),
            ),
        );
        let service = universe.solve_type("app.Service").unwrap();
        assert_eq!(
            names(&service.ancestors(true).unwrap()),
            vec!["java.lang.Object", "java.lang.Runnable"]
        );
        match service.ancestors(false) {
            Err(ResolveError::UnresolvedAncestor { declaration, name }) => {
                assert_eq!(declaration, "app.Service");
                assert_eq!(name, "Missing");
            }
            other => panic!("expected UnresolvedAncestor, got {other:?}"),
        }
    }

    #[test]
    fn enclosing_type_is_not_an_ancestor() {
        // class Outer { class Inner extends Outer {} }
        let universe = universe_with(
            CompilationUnit::new(Some("app")).with_type(
                TypeDeclNode::class("Outer")
                    .with_member(TypeDeclNode::class("Inner").extends(TypeRef::raw("Outer"))),
            ),
        );
        let inner = universe.solve_type("app.Outer.Inner").unwrap();
        assert!(inner.ancestors(false).unwrap().is_empty());
    }

    #[test]
    fn all_ancestors_are_breadth_first_and_unique() {
        let universe = universe_with(
            CompilationUnit::new(Some("app"))
                .with_type(
                    TypeDeclNode::class("Base")
                        .implements(TypeRef::raw("java.io.Serializable")),
                )
                .with_type(
                    TypeDeclNode::class("Derived")
                        .extends(TypeRef::raw("Base"))
                        .implements(TypeRef::raw("java.io.Serializable")),
                ),
        );
        let derived = universe.solve_type("app.Derived").unwrap();
        assert_eq!(
            names(&derived.all_ancestors(false).unwrap()),
            vec!["app.Base", "java.io.Serializable", "java.lang.Object"]
        );
    }

    #[test]
    fn depth_bound_truncates_or_fails() {
        let universe = universe_with(
            CompilationUnit::new(Some("app"))
                .with_type(TypeDeclNode::class("A"))
                .with_type(TypeDeclNode::class("B").extends(TypeRef::raw("A")))
                .with_type(TypeDeclNode::class("C").extends(TypeRef::raw("B"))),
        )
        .with_config(ResolverConfig::default().with_max_ancestor_depth(2));
        let c = universe.solve_type("app.C").unwrap();

        assert_eq!(names(&c.all_ancestors(true).unwrap()), vec!["app.B", "app.A"]);
        assert!(matches!(
            c.all_ancestors(false),
            Err(ResolveError::RecursionLimit { depth: 2, .. })
        ));
    }

    #[test]
    fn assignability_follows_ancestors() {
        let universe = universe_with(
            CompilationUnit::new(Some("app"))
                .with_type(TypeDeclNode::interface("Shape"))
                .with_type(TypeDeclNode::class("Circle").implements(TypeRef::raw("Shape"))),
        );
        let shape = universe.solve_type("app.Shape").unwrap();
        let circle = universe.solve_type("app.Circle").unwrap();
        let object = universe.solve_type("java.lang.Object").unwrap();

        assert!(shape.is_assignable_by_declaration(circle.as_ref()));
        assert!(!circle.is_assignable_by_declaration(shape.as_ref()));
        assert!(object.is_assignable_by_declaration(shape.as_ref()));

        let circle_type = ResolvedType::Reference(ReferenceType::raw(circle));
        assert!(shape.is_assignable_by(&circle_type));
        assert!(shape.is_assignable_by(&ResolvedType::Null));
        assert!(!shape.is_assignable_by(&ResolvedType::Primitive("int".into())));
        assert!(object.is_assignable_by(&ResolvedType::Array(Box::new(
            ResolvedType::Primitive("int".into())
        ))));
    }
}
