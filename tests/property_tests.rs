//! Property-based tests for recgen
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use recgen::backend::normalize::{normalize_type_name, strip_internal_namespace};
use recgen::backend::selector::select_candidate;
use recgen::backend::semantic::{BaseTypeSyntax, ClassDeclaration, DeclId, DeclKind};
use recgen::CodeWriter;

fn ident() -> impl Strategy<Value = String> {
    "[A-Za-z_][A-Za-z0-9_]{0,8}"
}

fn dotted() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(ident(), 1..5)
}

// =============================================================================
// Normalizer Properties
// =============================================================================

#[cfg(test)]
mod normalize_tests {
    use super::*;

    proptest! {
        /// Property: the result never contains a namespace separator
        #[test]
        fn normalized_names_have_no_dots(name in "[A-Za-z0-9_.<>, ]{0,40}") {
            prop_assert!(!normalize_type_name(&name).contains('.'));
        }

        /// Property: normalizing twice is the same as normalizing once
        #[test]
        fn normalize_is_idempotent(name in "[A-Za-z0-9_.<>, ]{0,40}") {
            let once = normalize_type_name(&name);
            prop_assert_eq!(normalize_type_name(&once), once);
        }

        /// Property: a qualified non-generic name keeps only its last segment
        #[test]
        fn qualified_name_keeps_last_segment(segments in dotted()) {
            let name = segments.join(".");
            prop_assert_eq!(normalize_type_name(&name), segments[segments.len() - 1].clone());
        }

        /// Property: qualifiers on both the type and a single argument are dropped
        #[test]
        fn single_argument_generic(outer in dotted(), inner in dotted()) {
            let name = format!("{}<{}>", outer.join("."), inner.join("."));
            let expected = format!("{}<{}>", outer[outer.len() - 1], inner[inner.len() - 1]);
            prop_assert_eq!(normalize_type_name(&name), expected);
        }

        /// Property: an empty prefix never changes the name
        #[test]
        fn empty_prefix_is_identity(name in "[A-Za-z0-9_.<>]{0,30}") {
            prop_assert_eq!(strip_internal_namespace(&name, ""), name);
        }
    }
}

// =============================================================================
// CodeWriter Properties
// =============================================================================

#[cfg(test)]
mod writer_tests {
    use super::*;

    proptest! {
        /// Property: balanced braces bring the depth back to zero
        #[test]
        fn balanced_braces_return_to_zero(depth in 0usize..12) {
            let mut w = CodeWriter::new();
            for _ in 0..depth {
                w.add("{");
            }
            prop_assert_eq!(w.depth(), depth);
            for _ in 0..depth {
                w.add("}");
            }
            prop_assert_eq!(w.depth(), 0);
        }

        /// Property: each single-line add produces one line, indented to the current depth
        #[test]
        fn single_line_add_is_indented(text in "[a-z =;]{1,20}", depth in 0usize..6) {
            let mut w = CodeWriter::with_indent("  ");
            for _ in 0..depth {
                w.add("{");
            }
            w.add(&text);
            let lines = w.lines();
            prop_assert_eq!(lines.len(), depth + 1);
            prop_assert_eq!(lines[depth].clone(), format!("{}{}", "  ".repeat(depth), text));
        }

        /// Property: appended text is prefixed to the next added line
        #[test]
        fn append_prefixes_next_line(head in "[a-z]{1,10}", tail in "[a-z]{1,10}") {
            let mut w = CodeWriter::new();
            w.append(&head);
            prop_assert!(w.has_pending());
            w.add(&tail);
            prop_assert!(!w.has_pending());
            prop_assert_eq!(w.lines().to_vec(), vec![format!("{head}{tail}")]);
        }

        /// Property: unmatched closing braces never underflow
        #[test]
        fn closing_braces_saturate(extra in 1usize..5) {
            let mut w = CodeWriter::new();
            for _ in 0..extra {
                w.add("}");
            }
            prop_assert_eq!(w.depth(), 0);
            let all_close = w.lines().iter().all(|l| l == "}");
            prop_assert!(all_close);
        }
    }
}

// =============================================================================
// Selector Properties
// =============================================================================

#[cfg(test)]
mod selector_tests {
    use super::*;

    fn decl(name: &str, base: Option<BaseTypeSyntax>) -> ClassDeclaration {
        ClassDeclaration {
            id: DeclId(0),
            name: name.to_string(),
            kind: DeclKind::Class,
            first_base: base,
            is_partial: true,
            namespace: String::new(),
            source_path: String::new(),
        }
    }

    proptest! {
        /// Property: any class with `Record` as its bare first base is selected
        #[test]
        fn record_base_always_selected(name in ident()) {
            prop_assert!(select_candidate(&decl(&name, Some(BaseTypeSyntax::Identifier("Record".into())))));
        }

        /// Property: other bare bases are never selected
        #[test]
        fn other_bases_never_selected(name in ident(), base in ident()) {
            prop_assume!(base != "Record" && base != "Data");
            prop_assert!(!select_candidate(&decl(&name, Some(BaseTypeSyntax::Identifier(base)))));
        }
    }
}
