//! Abstract Syntax Tree definitions for the declaration language
//!
//! The tree only models what a declaration-level consumer needs: namespaces, `using` directives,
//! type declarations, and member signatures. Expression bodies (initializers, method bodies,
//! attribute arguments) are kept as source [`Span`]s and never parsed.

use std::fmt;

use recgen_core::lang::keywords::{self, KeywordId};

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Slice `source` by this span, or `None` if the span is out of range.
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start..self.end)
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceFile {
    pub usings: Vec<Spanned<UsingDirective>>,
    pub items: Vec<Spanned<Item>>,
}

/// Top-level and namespace-level items.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Namespace(NamespaceDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
}

// ============================================================================
// Names and directives
// ============================================================================

/// A dotted name: `System.Collections.Generic`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QualifiedName {
    pub segments: Vec<Ident>,
}

impl QualifiedName {
    pub fn new(segments: Vec<Ident>) -> Self {
        Self { segments }
    }

    /// Last segment (the simple name), or `""` for an empty name.
    pub fn last(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    pub fn is_simple(&self) -> bool {
        self.segments.len() == 1
    }

    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

/// `using A.B;`, `using static A.B;`, `using X = A.B;`, optionally prefixed with `global`.
#[derive(Debug, Clone, PartialEq)]
pub struct UsingDirective {
    pub path: QualifiedName,
    pub alias: Option<Ident>,
    pub is_static: bool,
    pub is_global: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceDecl {
    pub name: QualifiedName,
    /// `namespace A.B;` rather than `namespace A.B { ... }`
    pub file_scoped: bool,
    pub usings: Vec<Spanned<UsingDirective>>,
    pub items: Vec<Spanned<Item>>,
}

// ============================================================================
// Modifiers and attributes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
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
}

impl Modifier {
    /// Map a modifier keyword to its AST modifier.
    pub fn from_keyword(id: KeywordId) -> Option<Self> {
        let m = match id {
            KeywordId::Public => Modifier::Public,
            KeywordId::Private => Modifier::Private,
            KeywordId::Protected => Modifier::Protected,
            KeywordId::Internal => Modifier::Internal,
            KeywordId::Static => Modifier::Static,
            KeywordId::Sealed => Modifier::Sealed,
            KeywordId::Abstract => Modifier::Abstract,
            KeywordId::Partial => Modifier::Partial,
            KeywordId::Readonly => Modifier::Readonly,
            KeywordId::Const => Modifier::Const,
            KeywordId::New => Modifier::New,
            KeywordId::Override => Modifier::Override,
            KeywordId::Virtual => Modifier::Virtual,
            KeywordId::Extern => Modifier::Extern,
            KeywordId::Volatile => Modifier::Volatile,
            KeywordId::Required => Modifier::Required,
            KeywordId::Async => Modifier::Async,
            KeywordId::Unsafe => Modifier::Unsafe,
            _ => return None,
        };
        Some(m)
    }

    pub fn keyword(self) -> KeywordId {
        match self {
            Modifier::Public => KeywordId::Public,
            Modifier::Private => KeywordId::Private,
            Modifier::Protected => KeywordId::Protected,
            Modifier::Internal => KeywordId::Internal,
            Modifier::Static => KeywordId::Static,
            Modifier::Sealed => KeywordId::Sealed,
            Modifier::Abstract => KeywordId::Abstract,
            Modifier::Partial => KeywordId::Partial,
            Modifier::Readonly => KeywordId::Readonly,
            Modifier::Const => KeywordId::Const,
            Modifier::New => KeywordId::New,
            Modifier::Override => KeywordId::Override,
            Modifier::Virtual => KeywordId::Virtual,
            Modifier::Extern => KeywordId::Extern,
            Modifier::Volatile => KeywordId::Volatile,
            Modifier::Required => KeywordId::Required,
            Modifier::Async => KeywordId::Async,
            Modifier::Unsafe => KeywordId::Unsafe,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", keywords::as_str(self.keyword()))
    }
}

/// Modifier list in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Modifiers(pub Vec<Modifier>);

impl Modifiers {
    pub fn has(&self, m: Modifier) -> bool {
        self.0.contains(&m)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single attribute inside an attribute list: `[Target: Name(args)]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: QualifiedName,
    /// `assembly`, `field`, `return`, ...
    pub target: Option<Ident>,
    /// Span of the argument list including parentheses, if present.
    pub args: Option<Span>,
}

// ============================================================================
// Type declarations
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Struct,
    Interface,
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClassKind::Class => "class",
            ClassKind::Struct => "struct",
            ClassKind::Interface => "interface",
        };
        write!(f, "{s}")
    }
}

/// `class`, `struct` and `interface` declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub attributes: Vec<Spanned<Attribute>>,
    pub modifiers: Modifiers,
    pub kind: ClassKind,
    pub name: Spanned<Ident>,
    pub type_params: Vec<Ident>,
    /// Base list entries in source order (first entry is the base class, if any).
    pub bases: Vec<Spanned<TypeRef>>,
    pub members: Vec<Spanned<Member>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumDecl {
    pub attributes: Vec<Spanned<Attribute>>,
    pub modifiers: Modifiers,
    pub name: Spanned<Ident>,
    pub underlying: Option<Spanned<TypeRef>>,
    pub variants: Vec<Spanned<EnumVariant>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumVariant {
    pub name: Ident,
    pub value: Option<Span>,
}

// ============================================================================
// Members
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldDecl),
    Property(PropertyDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
    Class(ClassDecl),
    Enum(EnumDecl),
    /// Events, indexers, operators, destructors and delegates: recognised and skipped.
    Other,
}

/// `int a = 1, b;`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub attributes: Vec<Spanned<Attribute>>,
    pub modifiers: Modifiers,
    pub ty: Spanned<TypeRef>,
    pub declarators: Vec<Spanned<VariableDeclarator>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub name: Ident,
    /// Span of the initializer expression (after `=`).
    pub initializer: Option<Span>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDecl {
    pub attributes: Vec<Spanned<Attribute>>,
    pub modifiers: Modifiers,
    pub ty: Spanned<TypeRef>,
    pub name: Spanned<Ident>,
    pub accessors: Vec<Accessor>,
    /// `int X => expr;`
    pub expression_body: Option<Span>,
    /// `int X { get; set; } = expr;`
    pub initializer: Option<Span>,
}

impl PropertyDecl {
    pub fn has_getter(&self) -> bool {
        self.expression_body.is_some() || self.accessors.iter().any(|a| a.kind == AccessorKind::Get)
    }

    /// `set` or `init`.
    pub fn has_setter(&self) -> bool {
        self.accessors
            .iter()
            .any(|a| matches!(a.kind, AccessorKind::Set | AccessorKind::Init))
    }

    /// Every accessor lacks a body (`{ get; set; }`).
    pub fn is_auto(&self) -> bool {
        self.expression_body.is_none() && !self.accessors.is_empty() && self.accessors.iter().all(|a| !a.has_body)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessorKind {
    Get,
    Set,
    Init,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Accessor {
    pub kind: AccessorKind,
    pub modifiers: Modifiers,
    pub has_body: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub attributes: Vec<Spanned<Attribute>>,
    pub modifiers: Modifiers,
    pub return_type: Spanned<TypeRef>,
    pub name: Spanned<Ident>,
    pub type_params: Vec<Ident>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub attributes: Vec<Spanned<Attribute>>,
    pub modifiers: Modifiers,
    pub name: Spanned<Ident>,
}

// ============================================================================
// Types
// ============================================================================

/// Syntactic type reference.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeRef {
    /// `Foo`, `A.B.Foo`, `List<int>`; generic arguments apply to the last segment.
    Named {
        name: QualifiedName,
        args: Vec<Spanned<TypeRef>>,
    },
    /// `int`, `string`, ...
    Builtin(KeywordId),
    /// `T[]`, `T[,]`
    Array { element: Box<Spanned<TypeRef>>, rank: usize },
    /// `T?`
    Nullable(Box<Spanned<TypeRef>>),
    /// `(int, string)`
    Tuple(Vec<Spanned<TypeRef>>),
}

impl TypeRef {
    /// Simple identifier form: a single-segment name without generic arguments.
    pub fn as_simple_identifier(&self) -> Option<&str> {
        match self {
            TypeRef::Named { name, args } if name.is_simple() && args.is_empty() => Some(name.last()),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named { name, args } => {
                write!(f, "{name}")?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", arg.node)?;
                    }
                    write!(f, ">")?;
                }
                Ok(())
            }
            TypeRef::Builtin(id) => write!(f, "{}", keywords::as_str(*id)),
            TypeRef::Array { element, rank } => {
                write!(f, "{}[{}]", element.node, ",".repeat(rank.saturating_sub(1)))
            }
            TypeRef::Nullable(inner) => write!(f, "{}?", inner.node),
            TypeRef::Tuple(elems) => {
                write!(f, "(")?;
                for (i, e) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", e.node)?;
                }
                write!(f, ")")
            }
        }
    }
}
