//! Candidate selection.
//!
//! Purely syntactic: a class is a candidate when the first entry of its base list is the bare
//! identifier `Record`, or the bare identifier `Data` on a class not itself named `Record`.
//! Qualified (`RecGen.Record`) and generic (`Record<T>`) spellings never match.

use recgen_core::lang::conventions::{DATA_BASE, RECORD_BASE};

use super::semantic::{ClassSyntax, DeclKind};

pub fn select_candidate(decl: &dyn ClassSyntax) -> bool {
    if decl.kind() != DeclKind::Class {
        return false;
    }
    let Some(first) = decl.first_base().and_then(|base| base.simple_identifier()) else {
        return false;
    };
    first == RECORD_BASE || (first == DATA_BASE && decl.name() != RECORD_BASE)
}

/// Keep the candidates of `decls`, in order.
pub fn select_candidates<D: ClassSyntax>(decls: &[D]) -> Vec<&D> {
    decls.iter().filter(|decl| select_candidate(*decl)).collect()
}
