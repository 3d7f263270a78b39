//! Error types for the generation backend.
//!
//! A missing symbol is never an error. Everything here aborts at least one candidate.

use thiserror::Error;

/// Failure while rendering or emitting one class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenError {
    #[error("{class}: Unsupported Type: {ty} for {field}")]
    UnsupportedType { class: String, field: String, ty: String },

    #[error("duplicate generated source name '{name}'")]
    DuplicateSource { name: String },

    #[error("{class}: {message}")]
    Render { class: String, message: String },
}

/// Stage of the pipeline a [`PassError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Render,
    Emit,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Render => write!(f, "render"),
            Stage::Emit => write!(f, "emit"),
        }
    }
}

/// A [`GenError`] caught at the pass boundary, with where it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{source}")]
pub struct PassError {
    pub candidate: String,
    pub stage: Stage,
    #[source]
    pub source: GenError,
}

impl PassError {
    pub fn new(candidate: impl Into<String>, stage: Stage, source: GenError) -> Self {
        Self {
            candidate: candidate.into(),
            stage,
            source,
        }
    }

    /// One-line trace of where the error was raised.
    pub fn trace(&self) -> String {
        format!("at {} of '{}'\n", self.stage, self.candidate)
    }
}
