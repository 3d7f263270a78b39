//! Template renderers.
//!
//! A [`Renderer`] turns one [`ClassInfo`] into lines on a [`CodeWriter`]. Renderers never indent;
//! braces on their own line drive the writer's indentation.

use super::errors::GenError;
use super::fields::PartitionedFields;
use super::model::{ClassInfo, FieldInfo};
use super::writer::CodeWriter;

/// Produces the companion source for one class.
pub trait Renderer {
    /// ## Errors
    /// Any [`GenError`] aborts the candidate (and, with the default boundary, the pass).
    fn render(&self, class: &ClassInfo, out: &mut CodeWriter) -> Result<(), GenError>;
}

/// Emits a `partial class` with member-name tables, `CopyTo`, `Reset` and, for record classes,
/// `KeyEquals`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialClassRenderer;

impl Renderer for PartialClassRenderer {
    fn render(&self, class: &ClassInfo, out: &mut CodeWriter) -> Result<(), GenError> {
        let parts = class.partition_fields()?;

        out.add("// <auto-generated/>");
        out.add("#nullable disable");
        if !class.namespace().is_empty() {
            out.add(&format!("namespace {}", class.namespace()));
            out.add("{");
        }

        let access = if class.is_public() { "public" } else { "internal" };
        out.add(&format!("{access} partial class {}", class.name()));
        out.add("{");

        name_table(out, "FieldNames", parts.fields.iter().copied());
        name_table(out, "KeyNames", parts.keys());
        name_table(out, "ExtraNames", parts.xfields.iter().copied());

        out.blank();
        copy_to(class, &parts, out);
        out.blank();
        reset(&parts, out);
        if class.is_record() {
            out.blank();
            key_equals(class, &parts, out);
        }

        out.add("}");
        if !class.namespace().is_empty() {
            out.add("}");
        }
        Ok(())
    }
}

fn name_table<'a>(out: &mut CodeWriter, table: &str, fields: impl Iterator<Item = &'a FieldInfo>) {
    let names: Vec<String> = fields.map(|f| format!("\"{}\"", f.name())).collect();
    if names.is_empty() {
        out.add(&format!(
            "public static readonly string[] {table} = System.Array.Empty<string>();"
        ));
    } else {
        out.add(&format!("public static readonly string[] {table} = {{ {} }};", names.join(", ")));
    }
}

fn copy_to(class: &ClassInfo, parts: &PartitionedFields<'_>, out: &mut CodeWriter) {
    out.add(&format!("public void CopyTo({} other)", class.name()));
    out.add("{");
    for field in &parts.fields {
        if field.is_data_field() {
            out.add(&format!("{0}.CopyTo(other.{0});", field.name()));
        } else {
            out.add(&format!("other.{0} = {0};", field.name()));
        }
    }
    out.add("}");
}

fn reset(parts: &PartitionedFields<'_>, out: &mut CodeWriter) {
    out.add("public void Reset()");
    out.add("{");
    for field in &parts.fields {
        if field.has_initialization() {
            out.add(&format!("{} = {};", field.name(), field.initialization()));
        } else if field.is_data_field() {
            out.add(&format!("{}.Reset();", field.name()));
        } else {
            out.add(&format!("{} = default;", field.name()));
        }
    }
    out.add("}");
}

fn key_equals(class: &ClassInfo, parts: &PartitionedFields<'_>, out: &mut CodeWriter) {
    out.add(&format!("public bool KeyEquals({} other)", class.name()));
    out.add("{");
    out.add("if (other == null) return false;");
    let comparisons: Vec<String> = parts
        .keys()
        .map(|f| {
            if f.is_data_field() {
                format!("{0}.Equals(other.{0})", f.name())
            } else {
                format!("{0} == other.{0}", f.name())
            }
        })
        .collect();
    if comparisons.is_empty() {
        out.add("return true;");
    } else {
        out.add(&format!("return {};", comparisons.join(" && ")));
    }
    out.add("}");
}
