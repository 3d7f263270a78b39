//! Define the reserved keyword vocabulary for the declaration language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings and
//! categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Accessor words (`get`, `set`, `init`) and `where` are contextual and stay identifiers.
//!
//! ## Examples
//! ```rust
//! use recgen_core::lang::keywords::{self, KeywordCategory, KeywordId};
//!
//! assert_eq!(keywords::from_str("sealed"), Some(KeywordId::Sealed));
//! assert_eq!(keywords::category(KeywordId::Int), KeywordCategory::BuiltinType);
//! assert_eq!(keywords::from_str("get"), None);
//! ```

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Declarations
    Using,
    Namespace,
    Class,
    Struct,
    Interface,
    Enum,
    Event,
    Delegate,
    Operator,
    Implicit,
    Explicit,

    // Modifiers
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Sealed,
    Abstract,
    Partial,
    Readonly,
    Const,
    New,
    Override,
    Virtual,
    Extern,
    Volatile,
    Required,
    Async,
    Unsafe,

    // Builtin types
    Void,
    Bool,
    Byte,
    Sbyte,
    Short,
    Ushort,
    Int,
    Uint,
    Long,
    Ulong,
    Float,
    Double,
    Decimal,
    Char,
    String,
    Object,

    // Literals
    True,
    False,
    Null,
    This,
}

/// High-level grouping used by the parser and by tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    Declaration,
    Modifier,
    BuiltinType,
    Literal,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Declarations
    info(KeywordId::Using, "using", KeywordCategory::Declaration),
    info(KeywordId::Namespace, "namespace", KeywordCategory::Declaration),
    info(KeywordId::Class, "class", KeywordCategory::Declaration),
    info(KeywordId::Struct, "struct", KeywordCategory::Declaration),
    info(KeywordId::Interface, "interface", KeywordCategory::Declaration),
    info(KeywordId::Enum, "enum", KeywordCategory::Declaration),
    info(KeywordId::Event, "event", KeywordCategory::Declaration),
    info(KeywordId::Delegate, "delegate", KeywordCategory::Declaration),
    info(KeywordId::Operator, "operator", KeywordCategory::Declaration),
    info(KeywordId::Implicit, "implicit", KeywordCategory::Declaration),
    info(KeywordId::Explicit, "explicit", KeywordCategory::Declaration),
    // Modifiers
    info(KeywordId::Public, "public", KeywordCategory::Modifier),
    info(KeywordId::Private, "private", KeywordCategory::Modifier),
    info(KeywordId::Protected, "protected", KeywordCategory::Modifier),
    info(KeywordId::Internal, "internal", KeywordCategory::Modifier),
    info(KeywordId::Static, "static", KeywordCategory::Modifier),
    info(KeywordId::Sealed, "sealed", KeywordCategory::Modifier),
    info(KeywordId::Abstract, "abstract", KeywordCategory::Modifier),
    info(KeywordId::Partial, "partial", KeywordCategory::Modifier),
    info(KeywordId::Readonly, "readonly", KeywordCategory::Modifier),
    info(KeywordId::Const, "const", KeywordCategory::Modifier),
    info(KeywordId::New, "new", KeywordCategory::Modifier),
    info(KeywordId::Override, "override", KeywordCategory::Modifier),
    info(KeywordId::Virtual, "virtual", KeywordCategory::Modifier),
    info(KeywordId::Extern, "extern", KeywordCategory::Modifier),
    info(KeywordId::Volatile, "volatile", KeywordCategory::Modifier),
    info(KeywordId::Required, "required", KeywordCategory::Modifier),
    info(KeywordId::Async, "async", KeywordCategory::Modifier),
    info(KeywordId::Unsafe, "unsafe", KeywordCategory::Modifier),
    // Builtin types
    info(KeywordId::Void, "void", KeywordCategory::BuiltinType),
    info(KeywordId::Bool, "bool", KeywordCategory::BuiltinType),
    info(KeywordId::Byte, "byte", KeywordCategory::BuiltinType),
    info(KeywordId::Sbyte, "sbyte", KeywordCategory::BuiltinType),
    info(KeywordId::Short, "short", KeywordCategory::BuiltinType),
    info(KeywordId::Ushort, "ushort", KeywordCategory::BuiltinType),
    info(KeywordId::Int, "int", KeywordCategory::BuiltinType),
    info(KeywordId::Uint, "uint", KeywordCategory::BuiltinType),
    info(KeywordId::Long, "long", KeywordCategory::BuiltinType),
    info(KeywordId::Ulong, "ulong", KeywordCategory::BuiltinType),
    info(KeywordId::Float, "float", KeywordCategory::BuiltinType),
    info(KeywordId::Double, "double", KeywordCategory::BuiltinType),
    info(KeywordId::Decimal, "decimal", KeywordCategory::BuiltinType),
    info(KeywordId::Char, "char", KeywordCategory::BuiltinType),
    info(KeywordId::String, "string", KeywordCategory::BuiltinType),
    info(KeywordId::Object, "object", KeywordCategory::BuiltinType),
    // Literals
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    info(KeywordId::Null, "null", KeywordCategory::Literal),
    info(KeywordId::This, "this", KeywordCategory::Literal),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` if `id` is a declaration/member modifier.
pub fn is_modifier(id: KeywordId) -> bool {
    category(id) == KeywordCategory::Modifier
}

/// Return `true` if `id` names a builtin type (`int`, `string`, ...).
pub fn is_builtin_type(id: KeywordId) -> bool {
    category(id) == KeywordCategory::BuiltinType
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling.
///
/// ## Returns
/// - `Some(KeywordId)` if the spelling is reserved, `None` otherwise.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}
