//! In-memory compilation: parsed files → symbol table → [`SemanticModel`].
//!
//! [`Compilation::build`] runs in two phases. The first walks every file and registers each type
//! under its fully-qualified name, merging partial declarations. The second binds each declaration
//! site: its base class and its fields and properties, with member types resolved and rendered in
//! fully-qualified form.
//!
//! ## Name lookup
//!
//! A name is looked up, in order, as a nested type of each containing type (innermost first),
//! relative to each enclosing namespace (innermost first, ending at the global namespace), through
//! `using` aliases, and finally inside each `using` namespace. Attribute names are tried with the
//! `Attribute` suffix first, then as written. Generic arity is not part of a type's identity.

use std::collections::HashMap;

use recgen_core::lang::conventions::ATTRIBUTE_SUFFIX;
use recgen_core::lang::keywords::{self, KeywordId};
use recgen_syntax::ast::{
    Attribute, ClassDecl, ClassKind, EnumDecl, Item, Member, Modifier, Modifiers, QualifiedName, SourceFile, Span,
    Spanned, TypeRef, UsingDirective,
};
use recgen_syntax::diagnostics::CompileError;
use recgen_syntax::parser;

use crate::backend::semantic::{
    Accessibility, AttributeId, BaseTypeSyntax, ClassDeclaration, DeclId, DeclKind, MemberKind, MemberSymbol,
    SemanticModel, TypeId, TypeKind, TypeReference, TypeSymbol,
};

// ============================================================================
// Inputs
// ============================================================================

/// One parsed source file.
#[derive(Debug, Clone)]
pub struct ParsedUnit {
    pub path: String,
    pub source: String,
    pub file: SourceFile,
}

/// Syntax errors of one file.
#[derive(Debug, Clone)]
pub struct FileErrors {
    pub path: String,
    pub source: String,
    pub errors: Vec<CompileError>,
}

impl ParsedUnit {
    /// Lex and parse `source`.
    ///
    /// ## Errors
    /// The file's syntax errors, with the source kept for rendering.
    pub fn parse(path: impl Into<String>, source: impl Into<String>) -> Result<Self, FileErrors> {
        let path = path.into();
        let source = source.into();
        match parser::parse_source(&source) {
            Ok(file) => Ok(Self { path, source, file }),
            Err(errors) => Err(FileErrors { path, source, errors }),
        }
    }
}

// ============================================================================
// Symbol table
// ============================================================================

#[derive(Debug, Clone)]
enum BaseRef {
    Resolved(TypeId),
    /// Base named in source but not declared anywhere: simple name only.
    Unresolved(String),
}

#[derive(Debug, Clone)]
struct TypeEntry {
    name: String,
    namespace: String,
    /// `Ns.Outer.Inner`
    full_name: String,
    containing: Option<TypeId>,
    kind: TypeKind,
    accessibility: Accessibility,
    is_sealed: bool,
    is_static: bool,
    is_partial: bool,
    base: Option<BaseRef>,
    members: Vec<usize>,
}

#[derive(Debug, Clone)]
struct MemberEntry {
    unit: usize,
    name: String,
    kind: MemberKind,
    ty: TypeReference,
    accessibility: Accessibility,
    is_const: bool,
    is_static: bool,
    is_readonly: bool,
    is_auto_property: bool,
    attributes: Vec<AttributeId>,
    initializer: Option<Span>,
}

#[derive(Debug, Clone)]
struct DeclEntry {
    decl: ClassDeclaration,
    type_id: TypeId,
}

/// Lookup context of a declaration site.
#[derive(Debug, Clone, Default)]
struct Scope {
    namespace: Vec<String>,
    usings: Vec<UsingDirective>,
    containing: Option<TypeId>,
}

impl Scope {
    fn namespace_name(&self) -> String {
        self.namespace.join(".")
    }
}

/// A class declaration waiting to be bound in the second phase.
struct Site {
    unit: usize,
    type_id: TypeId,
    class: ClassDecl,
    outer: Scope,
}

/// Symbols for a set of parsed files.
#[derive(Debug, Default)]
pub struct Compilation {
    units: Vec<ParsedUnit>,
    types: Vec<TypeEntry>,
    by_name: HashMap<String, TypeId>,
    decls: Vec<DeclEntry>,
    members: Vec<MemberEntry>,
}

impl Compilation {
    /// Build the symbol table for `units`.
    #[tracing::instrument(skip_all, fields(units = units.len()))]
    pub fn build(units: Vec<ParsedUnit>) -> Self {
        let mut comp = Compilation {
            units,
            ..Compilation::default()
        };

        let global_usings: Vec<UsingDirective> = comp
            .units
            .iter()
            .flat_map(|u| u.file.usings.iter())
            .filter(|u| u.node.is_global)
            .map(|u| u.node.clone())
            .collect();

        let mut sites = Vec::new();
        for unit in 0..comp.units.len() {
            let file = comp.units[unit].file.clone();
            let mut usings = global_usings.clone();
            usings.extend(file.usings.iter().filter(|u| !u.node.is_global).map(|u| u.node.clone()));
            let scope = Scope {
                usings,
                ..Scope::default()
            };
            comp.declare_items(unit, &file.items, &scope, &mut sites);
        }

        for site in &sites {
            comp.bind(site);
        }

        tracing::debug!(
            types = comp.types.len(),
            declarations = comp.decls.len(),
            members = comp.members.len(),
            "compilation built"
        );
        comp
    }

    /// Parse every `(path, source)` pair and build the compilation.
    ///
    /// ## Errors
    /// The syntax errors of every file that failed to parse.
    pub fn from_sources<I, P, S>(sources: I) -> Result<Self, Vec<FileErrors>>
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<String>,
        S: Into<String>,
    {
        let mut units = Vec::new();
        let mut failures = Vec::new();
        for (path, source) in sources {
            match ParsedUnit::parse(path, source) {
                Ok(unit) => units.push(unit),
                Err(errors) => failures.push(errors),
            }
        }
        if failures.is_empty() {
            Ok(Self::build(units))
        } else {
            Err(failures)
        }
    }

    pub fn units(&self) -> &[ParsedUnit] {
        &self.units
    }

    /// Fully-qualified names of every declared type, in declaration order.
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.full_name.as_str()).collect()
    }

    // ========================================================================
    // Phase 1: declare
    // ========================================================================

    fn declare_items(&mut self, unit: usize, items: &[Spanned<Item>], scope: &Scope, sites: &mut Vec<Site>) {
        for item in items {
            match &item.node {
                Item::Namespace(ns) => {
                    let mut inner = scope.clone();
                    inner.namespace.extend(ns.name.segments.iter().cloned());
                    inner.usings.extend(ns.usings.iter().map(|u| u.node.clone()));
                    self.declare_items(unit, &ns.items, &inner, sites);
                }
                Item::Class(class) => self.declare_class(unit, class, scope, sites),
                Item::Enum(decl) => self.declare_enum(decl, scope),
            }
        }
    }

    fn declare_class(&mut self, unit: usize, class: &ClassDecl, scope: &Scope, sites: &mut Vec<Site>) {
        let kind = match class.kind {
            ClassKind::Class => TypeKind::Class,
            ClassKind::Struct => TypeKind::Struct,
            ClassKind::Interface => TypeKind::Interface,
        };
        let type_id = self.declare_type(&class.name.node, kind, &class.modifiers, scope);

        self.decls.push(DeclEntry {
            decl: ClassDeclaration {
                id: DeclId(self.decls.len()),
                name: class.name.node.clone(),
                kind: match class.kind {
                    ClassKind::Class => DeclKind::Class,
                    ClassKind::Struct => DeclKind::Struct,
                    ClassKind::Interface => DeclKind::Interface,
                },
                first_base: class.bases.first().map(|b| base_syntax(&b.node)),
                is_partial: class.modifiers.has(Modifier::Partial),
                namespace: scope.namespace_name(),
                source_path: self.units[unit].path.clone(),
            },
            type_id,
        });
        sites.push(Site {
            unit,
            type_id,
            class: class.clone(),
            outer: scope.clone(),
        });

        let inner = Scope {
            containing: Some(type_id),
            ..scope.clone()
        };
        for member in &class.members {
            match &member.node {
                Member::Class(nested) => self.declare_class(unit, nested, &inner, sites),
                Member::Enum(nested) => self.declare_enum(nested, &inner),
                _ => {}
            }
        }
    }

    fn declare_enum(&mut self, decl: &EnumDecl, scope: &Scope) {
        self.declare_type(&decl.name.node, TypeKind::Enum, &decl.modifiers, scope);
    }

    /// Register (or merge into) the type `name` in `scope`.
    fn declare_type(&mut self, name: &str, kind: TypeKind, modifiers: &Modifiers, scope: &Scope) -> TypeId {
        let (namespace, full_name) = match scope.containing {
            Some(outer) => {
                let outer = &self.types[outer.0];
                (outer.namespace.clone(), format!("{}.{}", outer.full_name, name))
            }
            None => {
                let namespace = scope.namespace_name();
                let full_name = if namespace.is_empty() {
                    name.to_string()
                } else {
                    format!("{namespace}.{name}")
                };
                (namespace, full_name)
            }
        };
        let is_partial = modifiers.has(Modifier::Partial);
        let explicit = accessibility(modifiers);

        if let Some(&id) = self.by_name.get(&full_name) {
            let entry = &mut self.types[id.0];
            if !(is_partial && entry.is_partial) {
                tracing::warn!(name = %full_name, "type declared more than once; merging declarations");
            }
            entry.is_partial &= is_partial;
            entry.is_sealed |= modifiers.has(Modifier::Sealed);
            entry.is_static |= modifiers.has(Modifier::Static);
            if let Some(access) = explicit {
                entry.accessibility = access;
            }
            return id;
        }

        let id = TypeId(self.types.len());
        let default_access = if scope.containing.is_some() {
            Accessibility::Private
        } else {
            Accessibility::Internal
        };
        self.types.push(TypeEntry {
            name: name.to_string(),
            namespace,
            full_name: full_name.clone(),
            containing: scope.containing,
            kind,
            accessibility: explicit.unwrap_or(default_access),
            is_sealed: modifiers.has(Modifier::Sealed),
            is_static: modifiers.has(Modifier::Static),
            is_partial,
            base: None,
            members: Vec::new(),
        });
        self.by_name.insert(full_name, id);
        id
    }

    // ========================================================================
    // Phase 2: bind
    // ========================================================================

    fn bind(&mut self, site: &Site) {
        let base = match (&self.types[site.type_id.0].base, site.class.kind) {
            (None, ClassKind::Class) => site.class.bases.first().and_then(|b| self.base_ref(&b.node, &site.outer)),
            _ => None,
        };
        let members = self.site_members(site);

        let first = self.members.len();
        self.members.extend(members);
        let entry = &mut self.types[site.type_id.0];
        if base.is_some() {
            entry.base = base;
        }
        entry.members.extend(first..self.members.len());
    }

    fn base_ref(&self, ty: &TypeRef, scope: &Scope) -> Option<BaseRef> {
        let TypeRef::Named { name, .. } = ty else {
            return None;
        };
        match self.resolve(name, scope) {
            Some(id) if self.types[id.0].kind == TypeKind::Class => Some(BaseRef::Resolved(id)),
            // Interfaces (and anything else that is not a class) do not make a base class.
            Some(_) => None,
            None => Some(BaseRef::Unresolved(name.last().to_string())),
        }
    }

    fn site_members(&self, site: &Site) -> Vec<MemberEntry> {
        let scope = Scope {
            containing: Some(site.type_id),
            ..site.outer.clone()
        };
        let default_access = if site.class.kind == ClassKind::Interface {
            Accessibility::Public
        } else {
            Accessibility::Private
        };

        let mut out = Vec::new();
        for member in &site.class.members {
            match &member.node {
                Member::Field(field) => {
                    let ty = self.reference(&field.ty.node, &scope);
                    let attributes = self.attribute_ids(&field.attributes, "field", &scope);
                    let is_const = field.modifiers.has(Modifier::Const);
                    for declarator in &field.declarators {
                        out.push(MemberEntry {
                            unit: site.unit,
                            name: declarator.node.name.clone(),
                            kind: MemberKind::Field,
                            ty: ty.clone(),
                            accessibility: accessibility(&field.modifiers).unwrap_or(default_access),
                            is_const,
                            is_static: is_const || field.modifiers.has(Modifier::Static),
                            is_readonly: field.modifiers.has(Modifier::Readonly),
                            is_auto_property: false,
                            attributes: attributes.clone(),
                            initializer: declarator.node.initializer,
                        });
                    }
                }
                Member::Property(prop) => out.push(MemberEntry {
                    unit: site.unit,
                    name: prop.name.node.clone(),
                    kind: MemberKind::Property,
                    ty: self.reference(&prop.ty.node, &scope),
                    accessibility: accessibility(&prop.modifiers).unwrap_or(default_access),
                    is_const: false,
                    is_static: prop.modifiers.has(Modifier::Static),
                    is_readonly: !prop.has_setter(),
                    is_auto_property: prop.is_auto(),
                    attributes: self.attribute_ids(&prop.attributes, "property", &scope),
                    initializer: prop.initializer,
                }),
                _ => {}
            }
        }
        out
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    fn lookup(&self, name: &str) -> Option<TypeId> {
        self.by_name.get(name).copied()
    }

    fn resolve(&self, name: &QualifiedName, scope: &Scope) -> Option<TypeId> {
        let dotted = name.dotted();

        let mut containing = scope.containing;
        while let Some(id) = containing {
            let entry = &self.types[id.0];
            if let Some(found) = self.lookup(&format!("{}.{dotted}", entry.full_name)) {
                return Some(found);
            }
            containing = entry.containing;
        }

        for len in (0..=scope.namespace.len()).rev() {
            let prefix = scope.namespace[..len].join(".");
            let key = if prefix.is_empty() {
                dotted.clone()
            } else {
                format!("{prefix}.{dotted}")
            };
            if let Some(found) = self.lookup(&key) {
                return Some(found);
            }
        }

        let (first, rest) = name.segments.split_first()?;
        for using in scope.usings.iter().filter(|u| u.alias.as_ref() == Some(first)) {
            let mut segments = using.path.segments.clone();
            segments.extend(rest.iter().cloned());
            if let Some(found) = self.lookup(&segments.join(".")) {
                return Some(found);
            }
        }

        scope
            .usings
            .iter()
            .filter(|u| u.alias.is_none() && !u.is_static)
            .find_map(|u| self.lookup(&format!("{}.{dotted}", u.path.dotted())))
    }

    /// Canonical identities of the attributes that apply to the member itself.
    fn attribute_ids(&self, attributes: &[Spanned<Attribute>], target: &str, scope: &Scope) -> Vec<AttributeId> {
        attributes
            .iter()
            .filter(|a| a.node.target.as_deref().is_none_or(|t| t == target))
            .filter_map(|a| {
                let id = self.resolve_attribute(&a.node.name, scope);
                if id.is_none() {
                    tracing::debug!(attribute = %a.node.name, "attribute type not resolved");
                }
                id
            })
            .collect()
    }

    fn resolve_attribute(&self, name: &QualifiedName, scope: &Scope) -> Option<AttributeId> {
        let mut suffixed = name.clone();
        if let Some(last) = suffixed.segments.last_mut() {
            last.push_str(ATTRIBUTE_SUFFIX);
        }
        self.resolve(&suffixed, scope)
            .or_else(|| self.resolve(name, scope))
            .map(|id| AttributeId::new(&self.types[id.0].full_name))
    }

    /// Fully-qualified display text and kind of a member type.
    fn reference(&self, ty: &TypeRef, scope: &Scope) -> TypeReference {
        match ty {
            TypeRef::Builtin(id) => TypeReference {
                display: keywords::as_str(*id).to_string(),
                kind: match id {
                    KeywordId::String | KeywordId::Object => TypeKind::Class,
                    _ => TypeKind::Struct,
                },
            },
            TypeRef::Named { name, args } => {
                let (mut display, kind) = match self.resolve(name, scope) {
                    Some(id) => (self.types[id.0].full_name.clone(), self.types[id.0].kind),
                    None => (name.dotted(), TypeKind::Error),
                };
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(|a| self.reference(&a.node, scope).display).collect();
                    display = format!("{display}<{}>", args.join(", "));
                }
                TypeReference { display, kind }
            }
            TypeRef::Array { element, rank } => TypeReference {
                display: format!(
                    "{}[{}]",
                    self.reference(&element.node, scope).display,
                    ",".repeat(rank.saturating_sub(1))
                ),
                kind: TypeKind::Class,
            },
            TypeRef::Nullable(inner) => {
                let inner = self.reference(&inner.node, scope);
                TypeReference {
                    display: format!("{}?", inner.display),
                    // `T?` over a value type is `Nullable<T>`, itself a struct.
                    kind: match inner.kind {
                        TypeKind::Enum | TypeKind::Struct => TypeKind::Struct,
                        other => other,
                    },
                }
            }
            TypeRef::Tuple(elems) => {
                let elems: Vec<String> = elems.iter().map(|e| self.reference(&e.node, scope).display).collect();
                TypeReference {
                    display: format!("({})", elems.join(", ")),
                    kind: TypeKind::Struct,
                }
            }
        }
    }

    fn symbol(&self, id: TypeId) -> TypeSymbol {
        let entry = &self.types[id.0];
        TypeSymbol {
            id: Some(id),
            name: entry.name.clone(),
            namespace: entry.namespace.clone(),
            kind: entry.kind,
            accessibility: entry.accessibility,
            is_sealed: entry.is_sealed,
            is_static: entry.is_static,
        }
    }

    fn member_entry(&self, member: &MemberSymbol) -> Option<&MemberEntry> {
        self.members.get(member.site?)
    }
}

impl SemanticModel for Compilation {
    fn declarations(&self) -> Vec<ClassDeclaration> {
        self.decls.iter().map(|d| d.decl.clone()).collect()
    }

    fn declared_type(&self, decl: DeclId) -> Option<TypeSymbol> {
        self.decls.get(decl.0).map(|d| self.symbol(d.type_id))
    }

    fn base_type(&self, ty: &TypeSymbol) -> Option<TypeSymbol> {
        match self.types.get(ty.id?.0)?.base.as_ref()? {
            BaseRef::Resolved(id) => Some(self.symbol(*id)),
            BaseRef::Unresolved(name) => Some(TypeSymbol {
                id: None,
                name: name.clone(),
                namespace: String::new(),
                kind: TypeKind::Error,
                accessibility: Accessibility::Public,
                is_sealed: false,
                is_static: false,
            }),
        }
    }

    fn members(&self, ty: &TypeSymbol) -> Vec<MemberSymbol> {
        let Some(entry) = ty.id.and_then(|id| self.types.get(id.0)) else {
            return Vec::new();
        };
        entry
            .members
            .iter()
            .map(|&site| {
                let m = &self.members[site];
                MemberSymbol {
                    name: m.name.clone(),
                    kind: m.kind,
                    ty: m.ty.clone(),
                    accessibility: m.accessibility,
                    is_const: m.is_const,
                    is_static: m.is_static,
                    is_readonly: m.is_readonly,
                    is_auto_property: m.is_auto_property,
                    site: Some(site),
                }
            })
            .collect()
    }

    fn attributes(&self, member: &MemberSymbol) -> Vec<AttributeId> {
        self.member_entry(member).map(|m| m.attributes.clone()).unwrap_or_default()
    }

    fn initializer_text(&self, member: &MemberSymbol) -> Option<String> {
        let entry = self.member_entry(member)?;
        let span = entry.initializer?;
        let text = span.slice(&self.units[entry.unit].source)?.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    fn type_by_metadata_name(&self, name: &str) -> Option<AttributeId> {
        self.lookup(name).map(|id| AttributeId::new(&self.types[id.0].full_name))
    }
}

fn accessibility(modifiers: &Modifiers) -> Option<Accessibility> {
    let public = modifiers.has(Modifier::Public);
    let protected = modifiers.has(Modifier::Protected);
    let internal = modifiers.has(Modifier::Internal);
    let private = modifiers.has(Modifier::Private);
    match (public, protected, internal, private) {
        (true, ..) => Some(Accessibility::Public),
        (_, true, true, _) => Some(Accessibility::ProtectedInternal),
        (_, true, _, true) => Some(Accessibility::PrivateProtected),
        (_, true, ..) => Some(Accessibility::Protected),
        (_, _, true, _) => Some(Accessibility::Internal),
        (.., true) => Some(Accessibility::Private),
        _ => None,
    }
}

fn base_syntax(ty: &TypeRef) -> BaseTypeSyntax {
    match ty {
        TypeRef::Named { name, args } if args.is_empty() && name.is_simple() => {
            BaseTypeSyntax::Identifier(name.last().to_string())
        }
        TypeRef::Named { args, .. } if args.is_empty() => BaseTypeSyntax::Qualified(ty.to_string()),
        TypeRef::Named { .. } => BaseTypeSyntax::Generic(ty.to_string()),
        other => BaseTypeSyntax::Other(other.to_string()),
    }
}
