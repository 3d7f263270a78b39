//! The entity model handed to renderers.
//!
//! [`ClassInfo`] and [`FieldInfo`] are built by the extractor, consumed by one renderer call and
//! dropped. Both are immutable once built: the `with_*` methods consume the value and only exist
//! to finish construction.

use recgen_core::lang::conventions;
use serde::Serialize;

/// Which recognised base a class derives from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BaseClassKind {
    #[default]
    Record,
    Data,
}

impl BaseClassKind {
    /// `Data` only for the exact simple name `"Data"`; every other name (including `""`) is a record.
    pub fn from_base_name(name: &str) -> Self {
        if name == conventions::DATA_BASE {
            BaseClassKind::Data
        } else {
            BaseClassKind::Record
        }
    }
}

/// One field or property, own or inherited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    name: String,
    full_type: String,
    #[serde(rename = "type")]
    ty: String,
    initialization: String,
    is_public: bool,
    is_const: bool,
    is_static: bool,
    is_readonly: bool,
    is_property: bool,
    is_auto_property: bool,
    is_enum: bool,
    is_data_field: bool,
    is_key: bool,
    is_x: bool,
}

impl FieldInfo {
    /// A private, non-static field with no initializer and no attributes.
    ///
    /// `is_data_field` follows from `ty`.
    pub fn new(name: impl Into<String>, full_type: impl Into<String>, ty: impl Into<String>) -> Self {
        let ty = ty.into();
        Self {
            name: name.into(),
            full_type: full_type.into(),
            is_data_field: ty.starts_with(conventions::DATA_FIELD_PREFIX),
            ty,
            initialization: String::new(),
            is_public: false,
            is_const: false,
            is_static: false,
            is_readonly: false,
            is_property: false,
            is_auto_property: false,
            is_enum: false,
            is_key: false,
            is_x: false,
        }
    }

    pub fn with_initialization(mut self, text: impl Into<String>) -> Self {
        self.initialization = text.into();
        self
    }

    pub fn with_public(mut self, value: bool) -> Self {
        self.is_public = value;
        self
    }

    pub fn with_const(mut self, value: bool) -> Self {
        self.is_const = value;
        self
    }

    pub fn with_static(mut self, value: bool) -> Self {
        self.is_static = value;
        self
    }

    pub fn with_readonly(mut self, value: bool) -> Self {
        self.is_readonly = value;
        self
    }

    pub fn with_property(mut self, is_property: bool, is_auto: bool) -> Self {
        self.is_property = is_property;
        self.is_auto_property = is_property && is_auto;
        self
    }

    pub fn with_enum(mut self, value: bool) -> Self {
        self.is_enum = value;
        self
    }

    pub fn with_key(mut self, value: bool) -> Self {
        self.is_key = value;
        self
    }

    pub fn with_x(mut self, value: bool) -> Self {
        self.is_x = value;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified type with the internal namespace removed.
    pub fn full_type(&self) -> &str {
        &self.full_type
    }

    /// Namespace-free type name.
    pub fn ty(&self) -> &str {
        &self.ty
    }

    /// Initializer source text, empty when there is none.
    pub fn initialization(&self) -> &str {
        &self.initialization
    }

    pub fn has_initialization(&self) -> bool {
        !self.initialization.is_empty()
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn is_private(&self) -> bool {
        !self.is_public
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_readonly(&self) -> bool {
        self.is_readonly
    }

    pub fn is_property(&self) -> bool {
        self.is_property
    }

    pub fn is_auto_property(&self) -> bool {
        self.is_auto_property
    }

    pub fn is_enum(&self) -> bool {
        self.is_enum
    }

    pub fn is_data_field(&self) -> bool {
        self.is_data_field
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    pub fn is_x(&self) -> bool {
        self.is_x
    }
}

/// One eligible class declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassInfo {
    name: String,
    namespace: String,
    source_file_path: String,
    base_class: String,
    base_kind: BaseClassKind,
    is_public: bool,
    is_sealed: bool,
    is_static: bool,
    is_partial: bool,
    fields: Vec<FieldInfo>,
}

impl ClassInfo {
    /// A class with no base, no flags and no fields.
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        source_file_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            source_file_path: source_file_path.into(),
            base_class: String::new(),
            base_kind: BaseClassKind::Record,
            is_public: false,
            is_sealed: false,
            is_static: false,
            is_partial: false,
            fields: Vec::new(),
        }
    }

    /// Record the simple name of the base class; decides [`BaseClassKind`].
    pub fn with_base_class(mut self, name: impl Into<String>) -> Self {
        self.base_class = name.into();
        self.base_kind = BaseClassKind::from_base_name(&self.base_class);
        self
    }

    pub fn with_flags(mut self, is_public: bool, is_sealed: bool, is_static: bool) -> Self {
        self.is_public = is_public;
        self.is_sealed = is_sealed;
        self.is_static = is_static;
        self
    }

    pub fn with_partial(mut self, value: bool) -> Self {
        self.is_partial = value;
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldInfo>) -> Self {
        self.fields = fields;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dotted namespace, empty for the global namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn source_file_path(&self) -> &str {
        &self.source_file_path
    }

    /// Simple name of the direct base class, empty when unknown.
    pub fn base_class(&self) -> &str {
        &self.base_class
    }

    pub fn base_kind(&self) -> BaseClassKind {
        self.base_kind
    }

    pub fn is_data(&self) -> bool {
        self.base_kind == BaseClassKind::Data
    }

    pub fn is_record(&self) -> bool {
        !self.is_data()
    }

    pub fn is_public(&self) -> bool {
        self.is_public
    }

    pub fn is_private(&self) -> bool {
        !self.is_public
    }

    pub fn is_sealed(&self) -> bool {
        self.is_sealed
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn is_partial(&self) -> bool {
        self.is_partial
    }

    /// Inherited members first, then own members, each in declaration order.
    pub fn fields(&self) -> &[FieldInfo] {
        &self.fields
    }
}
