#![forbid(unsafe_code)]
//! recgen: metadata extractor and boilerplate generator
//!
//! recgen reads C#-like class declarations, selects the classes whose first base is `Record` or
//! `Data`, extracts a [`ClassInfo`] model for each (own and inherited fields, attribute flags,
//! normalized type names), and renders per-class boilerplate through an indentation-aware
//! [`CodeWriter`].
//!
//! - `frontend`: parsing and the in-memory [`Compilation`]
//! - `backend`: selection, extraction, rendering and the generation pass, written against the
//!   [`SemanticModel`] trait only
//! - `config`: [`GeneratorConfig`]
//! - `cli`: the `recgen` command line
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `backend` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **Pass failures**: A failing candidate never panics or aborts the host; it becomes a single warning diagnostic.

pub mod backend;
pub mod cli;
pub mod config;
pub mod frontend;

pub use frontend::{ast, lexer, parser};

pub use backend::{
    ClassInfo, CodeWriter, Diagnostic, FieldInfo, GenerationPass, PartialClassRenderer, PassOutput, Renderer,
    SemanticModel,
};
pub use config::{ErrorBoundary, GeneratorConfig};
pub use frontend::Compilation;
