//! Compilation-unit level lookup, the terminal step of every scope chain.

use crate::declarations::declaration_for;
use crate::solver::Universe;
use crate::source::SourceRef;
use crate::symbol::SymbolReference;
use std::sync::Arc;
use symscope_api::CompilationUnit;

/// Lookup order: types declared in this file, single-type imports, the
/// unit's own package, `java.lang`, on-demand imports, then the name taken
/// as already qualified.
pub(crate) fn resolve_in_unit(
    unit: &Arc<CompilationUnit>,
    detached: bool,
    name: &str,
    universe: &Universe,
) -> SymbolReference {
    let (head, tail) = match name.split_once('.') {
        Some((head, tail)) => (head, Some(tail)),
        None => (name, None),
    };

    // 1. Types declared in this file
    if let Some(index) = unit.types.iter().position(|t| t.name == head) {
        let found = SourceRef::from_parts(Arc::clone(unit), vec![index], detached).and_then(
            |top| match tail {
                Some(tail) => top.member_by_name(tail),
                None => Some(top),
            },
        );
        if let Some(found) = found {
            return SymbolReference::solved(declaration_for(found, universe.clone()));
        }
    }

    // 2. Single-type imports
    for import in unit.imports.iter().filter(|i| !i.is_wildcard && !i.is_static) {
        if import.simple_name() == head {
            let candidate = match tail {
                Some(tail) => format!("{}.{}", import.name, tail),
                None => import.name.clone(),
            };
            let found = universe.solve(&candidate);
            if found.is_solved() {
                return found;
            }
        }
    }

    // 3. Same package
    if let Some(pkg) = unit.package.as_deref().filter(|p| !p.is_empty()) {
        let found = universe.solve(&format!("{}.{}", pkg, name));
        if found.is_solved() {
            return found;
        }
    }

    // 4. Implicit java.lang import
    if tail.is_none() {
        let found = universe.solve(&format!("java.lang.{}", name));
        if found.is_solved() {
            return found;
        }
    }

    // 5. On-demand imports
    for import in unit.imports.iter().filter(|i| i.is_wildcard && !i.is_static) {
        let found = universe.solve(&format!("{}.{}", import.name, name));
        if found.is_solved() {
            return found;
        }
    }

    // 6. Already qualified
    universe.solve(name)
}
