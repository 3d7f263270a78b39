//! The semantic-analysis capability the generator is written against.
//!
//! The backend never sees a parser or a symbol table directly. A host (the in-repo compilation, or
//! a test double) implements [`SemanticModel`] and hands over [`ClassDeclaration`] syntax views;
//! everything downstream is expressed in the types of this module.

use std::fmt;

/// Identifies one class declaration site known to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(pub usize);

/// Identifies one resolved type known to the host.
///
/// Partial declarations of the same type share a `TypeId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub usize);

/// Canonical identity of an attribute type: its fully-qualified metadata name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttributeId(pub String);

impl AttributeId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Declaration syntax view
// ============================================================================

/// Syntactic kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Class,
    Struct,
    Interface,
}

/// The syntactic shape of a base-list entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseTypeSyntax {
    /// `Record`
    Identifier(String),
    /// `A.Record`
    Qualified(String),
    /// `Record<T>`
    Generic(String),
    /// Anything else (`int`, tuples, arrays)
    Other(String),
}

impl BaseTypeSyntax {
    /// The identifier text when the entry is a bare identifier.
    pub fn simple_identifier(&self) -> Option<&str> {
        match self {
            BaseTypeSyntax::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

/// What the candidate selector may look at.
pub trait ClassSyntax {
    fn name(&self) -> &str;
    fn kind(&self) -> DeclKind;
    /// First entry of the base list, `None` when the declaration has no base list.
    fn first_base(&self) -> Option<&BaseTypeSyntax>;
}

/// One class declaration site, as the host reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDeclaration {
    pub id: DeclId,
    pub name: String,
    pub kind: DeclKind,
    pub first_base: Option<BaseTypeSyntax>,
    /// `partial` modifier on this declaration site
    pub is_partial: bool,
    /// Enclosing namespace in dotted form, empty for the global namespace
    pub namespace: String,
    pub source_path: String,
}

impl ClassSyntax for ClassDeclaration {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> DeclKind {
        self.kind
    }

    fn first_base(&self) -> Option<&BaseTypeSyntax> {
        self.first_base.as_ref()
    }
}

// ============================================================================
// Symbols
// ============================================================================

/// Semantic kind of a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    /// Referenced but not resolvable
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessibility {
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

/// A resolved (or unresolved) type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSymbol {
    /// `None` for types the host cannot resolve (their members are unknown)
    pub id: Option<TypeId>,
    pub name: String,
    pub namespace: String,
    pub kind: TypeKind,
    pub accessibility: Accessibility,
    pub is_sealed: bool,
    pub is_static: bool,
}

impl TypeSymbol {
    /// Dotted `Namespace.Name`, or just `Name` in the global namespace.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

/// A type as it appears in a member declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeReference {
    /// Fully-qualified display text: `A.B.List<C.D.Bar>`, `int[]`, `int?`
    pub display: String,
    pub kind: TypeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Property,
}

/// A field or property of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSymbol {
    pub name: String,
    pub kind: MemberKind,
    pub ty: TypeReference,
    pub accessibility: Accessibility,
    pub is_const: bool,
    /// `static`, or implied by `const`
    pub is_static: bool,
    /// `readonly` field, or property without a setter
    pub is_readonly: bool,
    pub is_auto_property: bool,
    /// Host handle for the declaration site, `None` for members without source
    pub site: Option<usize>,
}

impl MemberSymbol {
    pub fn has_declaration_site(&self) -> bool {
        self.site.is_some()
    }
}

// ============================================================================
// The capability
// ============================================================================

/// Semantic analysis over a set of declarations.
///
/// All queries are read-only; a model is shared by every candidate of a pass.
pub trait SemanticModel {
    /// Every class declaration site, in source order.
    fn declarations(&self) -> Vec<ClassDeclaration>;

    /// The type declared by `decl`, or `None` when the site does not declare a type.
    fn declared_type(&self, decl: DeclId) -> Option<TypeSymbol>;

    /// Direct base class of `ty`.
    fn base_type(&self, ty: &TypeSymbol) -> Option<TypeSymbol>;

    /// Fields and properties of `ty` in declaration order (partials merged in source order).
    fn members(&self, ty: &TypeSymbol) -> Vec<MemberSymbol>;

    /// Canonical identities of the attributes at the member's declaration site.
    fn attributes(&self, member: &MemberSymbol) -> Vec<AttributeId>;

    /// Source text of the member's initializer expression.
    fn initializer_text(&self, member: &MemberSymbol) -> Option<String>;

    /// Look up a type by metadata name (`RecGen.KAttribute`).
    fn type_by_metadata_name(&self, name: &str) -> Option<AttributeId>;
}
