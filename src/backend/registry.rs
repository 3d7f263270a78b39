//! Attribute identities resolved once per generation pass.

use super::semantic::{AttributeId, SemanticModel};
use crate::config::GeneratorConfig;

/// Canonical identities of the marker attributes.
///
/// Built by the driver at the start of every pass and passed by reference to the extractor.
/// An identity that does not resolve matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeRegistry {
    key: Option<AttributeId>,
    x: Option<AttributeId>,
    // Resolved for parity with the support library; no behavior reads it.
    range: Option<AttributeId>,
}

impl AttributeRegistry {
    pub fn resolve(model: &dyn SemanticModel, config: &GeneratorConfig) -> Self {
        let registry = Self {
            key: model.type_by_metadata_name(&config.key_attribute),
            x: model.type_by_metadata_name(&config.x_attribute),
            range: model.type_by_metadata_name(&config.range_attribute),
        };
        if registry.key.is_none() {
            tracing::debug!(name = %config.key_attribute, "key attribute not resolved");
        }
        if registry.x.is_none() {
            tracing::debug!(name = %config.x_attribute, "x attribute not resolved");
        }
        registry
    }

    pub fn is_key(&self, id: &AttributeId) -> bool {
        self.key.as_ref() == Some(id)
    }

    pub fn is_x(&self, id: &AttributeId) -> bool {
        self.x.as_ref() == Some(id)
    }

    pub fn key(&self) -> Option<&AttributeId> {
        self.key.as_ref()
    }

    pub fn x(&self) -> Option<&AttributeId> {
        self.x.as_ref()
    }

    pub fn range(&self) -> Option<&AttributeId> {
        self.range.as_ref()
    }
}
