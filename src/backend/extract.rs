//! Metadata extraction: declaration + semantic model → [`ClassInfo`].

use super::model::{ClassInfo, FieldInfo};
use super::normalize::{normalize_type_name, strip_internal_namespace};
use super::registry::AttributeRegistry;
use super::semantic::{Accessibility, ClassDeclaration, MemberKind, MemberSymbol, SemanticModel, TypeKind};
use crate::config::GeneratorConfig;

/// Build the entity model for one declaration.
///
/// Members of the direct base class come first, then the class's own members. When the model
/// cannot resolve the declaration to a type, the result carries only the syntactic facts (name,
/// namespace, partial flag, path) and no fields.
#[tracing::instrument(skip_all, fields(class = %decl.name))]
pub fn extract_class(
    decl: &ClassDeclaration,
    model: &dyn SemanticModel,
    registry: &AttributeRegistry,
    config: &GeneratorConfig,
) -> ClassInfo {
    let Some(symbol) = model.declared_type(decl.id) else {
        tracing::debug!("declaration has no type symbol");
        return ClassInfo::new(&decl.name, &decl.namespace, &decl.source_path).with_partial(decl.is_partial);
    };

    let mut info = ClassInfo::new(&decl.name, &symbol.namespace, &decl.source_path).with_partial(decl.is_partial);

    let mut members = Vec::new();
    if let Some(base) = model.base_type(&symbol) {
        info = info.with_base_class(&base.name);
        members.extend(model.members(&base));
    }
    members.extend(model.members(&symbol));

    let fields = members
        .iter()
        .map(|member| extract_field(member, model, registry, config))
        .collect();

    info.with_flags(
        symbol.accessibility == Accessibility::Public,
        symbol.is_sealed,
        symbol.is_static,
    )
    .with_fields(fields)
}

fn extract_field(
    member: &MemberSymbol,
    model: &dyn SemanticModel,
    registry: &AttributeRegistry,
    config: &GeneratorConfig,
) -> FieldInfo {
    let is_property = member.kind == MemberKind::Property;
    let mut field = FieldInfo::new(
        &member.name,
        strip_internal_namespace(&member.ty.display, &config.internal_namespace),
        normalize_type_name(&member.ty.display),
    )
    .with_property(is_property, member.is_auto_property)
    .with_enum(member.ty.kind == TypeKind::Enum)
    .with_public(member.accessibility == Accessibility::Public)
    .with_const(!is_property && member.is_const)
    .with_static(member.is_static || member.is_const)
    .with_readonly(member.is_readonly);

    if member.has_declaration_site() {
        if let Some(text) = model.initializer_text(member) {
            field = field.with_initialization(text);
        }
        let attributes = model.attributes(member);
        field = field
            .with_key(attributes.iter().any(|a| registry.is_key(a)))
            .with_x(attributes.iter().any(|a| registry.is_x(a)));
    }
    field
}
