//! Generation backend
//!
//! Turns class declarations into companion source text. The backend only talks to the host
//! through [`semantic::SemanticModel`]; it has no knowledge of the declaration frontend.
//!
//! The pipeline, per candidate:
//! 1. [`selector`] picks classes whose first base is `Record` or `Data`
//! 2. [`extract`] builds a [`model::ClassInfo`] (type names via [`normalize`], attribute flags via
//!    [`registry`])
//! 3. a [`render::Renderer`] writes lines to a [`writer::CodeWriter`], using [`fields`] to decide
//!    which members qualify
//! 4. [`driver`] hands the text to a [`driver::SourceSink`] and turns failures into diagnostics

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod driver;
pub mod errors;
pub mod extract;
pub mod fields;
pub mod model;
pub mod normalize;
pub mod registry;
pub mod render;
pub mod selector;
pub mod semantic;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use driver::{Diagnostic, GenerationPass, PassOutput, Severity, SourceSink};
pub use errors::{GenError, PassError};
pub use model::{BaseClassKind, ClassInfo, FieldInfo};
pub use render::{PartialClassRenderer, Renderer};
pub use semantic::SemanticModel;
pub use writer::CodeWriter;
