//! Field eligibility: which members a renderer may emit boilerplate for.

use recgen_core::lang::conventions::LIST_PREFIX;

use super::errors::GenError;
use super::model::{ClassInfo, FieldInfo};

/// The members of a class split by role, order preserved.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PartitionedFields<'a> {
    /// Public, writable, instance members
    pub fields: Vec<&'a FieldInfo>,
    /// Instance members marked with the X attribute, whatever their accessibility
    pub xfields: Vec<&'a FieldInfo>,
}

impl<'a> PartitionedFields<'a> {
    /// Eligible members carrying the key attribute.
    pub fn keys(&self) -> impl Iterator<Item = &'a FieldInfo> + '_ {
        self.fields.iter().copied().filter(|f| f.is_key())
    }
}

impl ClassInfo {
    /// Split the members into eligible fields and X fields.
    ///
    /// Static and const members are skipped first; X members are collected before the
    /// accessibility and read-only checks apply.
    ///
    /// ## Errors
    /// [`GenError::UnsupportedType`] for the first eligible member whose type is a `List`.
    pub fn partition_fields(&self) -> Result<PartitionedFields<'_>, GenError> {
        let mut out = PartitionedFields::default();
        for field in self.fields() {
            if field.is_static() || field.is_const() {
                continue;
            }
            if field.is_x() {
                out.xfields.push(field);
                continue;
            }
            if field.is_private() || field.is_readonly() {
                continue;
            }
            if field.ty().starts_with(LIST_PREFIX) {
                return Err(GenError::UnsupportedType {
                    class: self.name().to_string(),
                    field: field.name().to_string(),
                    ty: field.ty().to_string(),
                });
            }
            out.fields.push(field);
        }
        Ok(out)
    }
}
