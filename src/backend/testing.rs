//! In-memory [`SemanticModel`] for backend unit tests.

use std::collections::HashSet;

use super::semantic::*;

pub(crate) struct FakeMember {
    symbol: MemberSymbol,
    attributes: Vec<AttributeId>,
    initializer: Option<String>,
}

impl FakeMember {
    fn new(name: &str, display: &str, kind: MemberKind) -> Self {
        Self {
            symbol: MemberSymbol {
                name: name.to_string(),
                kind,
                ty: TypeReference {
                    display: display.to_string(),
                    kind: TypeKind::Struct,
                },
                accessibility: Accessibility::Private,
                is_const: false,
                is_static: false,
                is_readonly: false,
                is_auto_property: kind == MemberKind::Property,
                site: Some(0),
            },
            attributes: Vec::new(),
            initializer: None,
        }
    }

    pub(crate) fn field(name: &str, display: &str) -> Self {
        Self::new(name, display, MemberKind::Field)
    }

    pub(crate) fn property(name: &str, display: &str) -> Self {
        Self::new(name, display, MemberKind::Property)
    }

    pub(crate) fn public(mut self) -> Self {
        self.symbol.accessibility = Accessibility::Public;
        self
    }

    pub(crate) fn protected(mut self) -> Self {
        self.symbol.accessibility = Accessibility::Protected;
        self
    }

    pub(crate) fn constant(mut self) -> Self {
        self.symbol.is_const = true;
        self.symbol.is_static = true;
        self
    }

    pub(crate) fn statik(mut self) -> Self {
        self.symbol.is_static = true;
        self
    }

    pub(crate) fn readonly(mut self) -> Self {
        self.symbol.is_readonly = true;
        self
    }

    pub(crate) fn enum_type(mut self) -> Self {
        self.symbol.ty.kind = TypeKind::Enum;
        self
    }

    pub(crate) fn attr(mut self, name: &str) -> Self {
        self.attributes.push(AttributeId::new(name));
        self
    }

    pub(crate) fn init(mut self, text: &str) -> Self {
        self.initializer = Some(text.to_string());
        self
    }

    pub(crate) fn without_site(mut self) -> Self {
        self.symbol.site = None;
        self
    }
}

pub(crate) struct FakeClass {
    name: String,
    namespace: String,
    kind: DeclKind,
    first_base: Option<BaseTypeSyntax>,
    base: Option<String>,
    is_public: bool,
    is_sealed: bool,
    is_static: bool,
    is_partial: bool,
    has_symbol: bool,
    members: Vec<FakeMember>,
}

impl FakeClass {
    /// `public partial class <name>` in namespace `Game`, no base list.
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: "Game".to_string(),
            kind: DeclKind::Class,
            first_base: None,
            base: None,
            is_public: true,
            is_sealed: false,
            is_static: false,
            is_partial: true,
            has_symbol: true,
            members: Vec::new(),
        }
    }

    /// Derive from `name`, written as a bare identifier.
    pub(crate) fn base(mut self, name: &str) -> Self {
        self.first_base = Some(BaseTypeSyntax::Identifier(name.to_string()));
        self.base = Some(name.to_string());
        self
    }

    pub(crate) fn base_syntax(mut self, syntax: BaseTypeSyntax) -> Self {
        self.first_base = Some(syntax);
        self
    }

    pub(crate) fn kind(mut self, kind: DeclKind) -> Self {
        self.kind = kind;
        self
    }

    pub(crate) fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = namespace.to_string();
        self
    }

    pub(crate) fn internal(mut self) -> Self {
        self.is_public = false;
        self
    }

    pub(crate) fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    pub(crate) fn not_partial(mut self) -> Self {
        self.is_partial = false;
        self
    }

    pub(crate) fn without_symbol(mut self) -> Self {
        self.has_symbol = false;
        self
    }

    pub(crate) fn member(mut self, member: FakeMember) -> Self {
        self.members.push(member);
        self
    }
}

#[derive(Default)]
pub(crate) struct FakeModel {
    classes: Vec<FakeClass>,
    attribute_types: HashSet<String>,
}

impl FakeModel {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_attribute_type(mut self, name: &str) -> Self {
        self.attribute_types.insert(name.to_string());
        self
    }

    /// Model with the support attributes and the `Record`/`Data` bases registered.
    pub(crate) fn with_support() -> Self {
        Self::new()
            .with_attribute_type("RecGen.KAttribute")
            .with_attribute_type("RecGen.XAttribute")
            .with_attribute_type("RecGen.RangeAttribute")
            .class(FakeClass::new("Data").namespace("RecGen").not_partial())
            .class(FakeClass::new("Record").namespace("RecGen").not_partial().base("Data"))
    }

    pub(crate) fn class(mut self, class: FakeClass) -> Self {
        self.classes.push(class);
        self
    }

    fn symbol(&self, index: usize) -> TypeSymbol {
        let class = &self.classes[index];
        TypeSymbol {
            id: Some(TypeId(index)),
            name: class.name.clone(),
            namespace: class.namespace.clone(),
            kind: TypeKind::Class,
            accessibility: if class.is_public {
                Accessibility::Public
            } else {
                Accessibility::Internal
            },
            is_sealed: class.is_sealed,
            is_static: class.is_static,
        }
    }

    /// Members are addressed by `(class index << 16) | member index`.
    fn member(&self, member: &MemberSymbol) -> Option<&FakeMember> {
        let site = member.site?;
        self.classes.get(site >> 16)?.members.get(site & 0xffff)
    }
}

impl SemanticModel for FakeModel {
    fn declarations(&self) -> Vec<ClassDeclaration> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| ClassDeclaration {
                id: DeclId(i),
                name: c.name.clone(),
                kind: c.kind,
                first_base: c.first_base.clone(),
                is_partial: c.is_partial,
                namespace: c.namespace.clone(),
                source_path: format!("{}.cs", c.name),
            })
            .collect()
    }

    fn declared_type(&self, decl: DeclId) -> Option<TypeSymbol> {
        let class = self.classes.get(decl.0)?;
        class.has_symbol.then(|| self.symbol(decl.0))
    }

    fn base_type(&self, ty: &TypeSymbol) -> Option<TypeSymbol> {
        let base = self.classes.get(ty.id?.0)?.base.as_ref()?;
        match self.classes.iter().position(|c| &c.name == base) {
            Some(index) => Some(self.symbol(index)),
            None => Some(TypeSymbol {
                id: None,
                name: base.clone(),
                namespace: String::new(),
                kind: TypeKind::Error,
                accessibility: Accessibility::Public,
                is_sealed: false,
                is_static: false,
            }),
        }
    }

    fn members(&self, ty: &TypeSymbol) -> Vec<MemberSymbol> {
        let Some(id) = ty.id else {
            return Vec::new();
        };
        self.classes[id.0]
            .members
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let mut symbol = m.symbol.clone();
                symbol.site = symbol.site.map(|_| (id.0 << 16) | i);
                symbol
            })
            .collect()
    }

    fn attributes(&self, member: &MemberSymbol) -> Vec<AttributeId> {
        self.member(member).map(|m| m.attributes.clone()).unwrap_or_default()
    }

    fn initializer_text(&self, member: &MemberSymbol) -> Option<String> {
        self.member(member)?.initializer.clone()
    }

    fn type_by_metadata_name(&self, name: &str) -> Option<AttributeId> {
        self.attribute_types.contains(name).then(|| AttributeId::new(name))
    }
}
