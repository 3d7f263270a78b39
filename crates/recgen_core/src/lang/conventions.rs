//! Well-known names the generator relies on.
//!
//! These are the names declared by the generator's support library (the base kinds, the member
//! attributes) together with the naming conventions it derives behaviour from (type-name prefixes,
//! output file naming).
//!
//! ## Examples
//! ```rust
//! use recgen_core::lang::conventions;
//!
//! assert_eq!(conventions::output_file_name("Player", "cs"), "Player.gen.cs");
//! ```

/// Simple name of the record base kind.
pub const RECORD_BASE: &str = "Record";

/// Simple name of the plain-data base kind.
pub const DATA_BASE: &str = "Data";

/// Normalized type names starting with this prefix denote nested data-field members.
pub const DATA_FIELD_PREFIX: &str = "DataField";

/// Normalized type names starting with this prefix are list members, which the generator rejects.
pub const LIST_PREFIX: &str = "List";

/// Suffix that may be omitted when an attribute is written at a use site (`[K]` for `KAttribute`).
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Prefix stripped from fully-qualified member types.
pub const DEFAULT_INTERNAL_NAMESPACE: &str = "RecGen.";

/// Metadata name of the key attribute.
pub const DEFAULT_KEY_ATTRIBUTE: &str = "RecGen.KAttribute";

/// Metadata name of the extra (X) attribute.
pub const DEFAULT_X_ATTRIBUTE: &str = "RecGen.XAttribute";

/// Metadata name of the legacy range attribute.
pub const DEFAULT_RANGE_ATTRIBUTE: &str = "RecGen.RangeAttribute";

/// Id of the single diagnostic reported when a generation pass fails.
pub const DIAGNOSTIC_ID: &str = "RECGEN001";

/// Title of the failed-pass diagnostic.
pub const DIAGNOSTIC_TITLE: &str = "Unexpected Error";

/// Category of the failed-pass diagnostic.
pub const DIAGNOSTIC_CATEGORY: &str = "Design";

/// Infix between a class name and the output extension.
pub const GENERATED_SUFFIX: &str = ".gen";

/// Default extension of generated files.
pub const DEFAULT_OUTPUT_EXTENSION: &str = "cs";

/// Build the output name for a generated class: `<class>.gen.<ext>`.
pub fn output_file_name(class_name: &str, extension: &str) -> String {
    format!("{class_name}{GENERATED_SUFFIX}.{extension}")
}
