//! Generator configuration.
//!
//! Every knob has a default matching the support namespace shipped with the prelude, so
//! `GeneratorConfig::default()` is what a plain `recgen generate` run uses.

use recgen_core::lang::conventions;

/// How far a failure inside a generation pass reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorBoundary {
    /// The first failure stops the pass; one diagnostic is reported for the whole pass.
    #[default]
    Pass,
    /// Each failing candidate gets its own diagnostic and the pass continues.
    Candidate,
}

/// Generator configuration
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Namespace prefix removed from fully-qualified member types (`full_type`)
    pub internal_namespace: String,
    /// Metadata name of the key attribute
    pub key_attribute: String,
    /// Metadata name of the extra-member attribute
    pub x_attribute: String,
    /// Metadata name of the range attribute (resolved, never consulted)
    pub range_attribute: String,
    /// Extension of generated files, without the dot
    pub output_extension: String,
    pub error_boundary: ErrorBoundary,
    /// Text emitted once per indentation level
    pub indent: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            internal_namespace: conventions::DEFAULT_INTERNAL_NAMESPACE.to_string(),
            key_attribute: conventions::DEFAULT_KEY_ATTRIBUTE.to_string(),
            x_attribute: conventions::DEFAULT_X_ATTRIBUTE.to_string(),
            range_attribute: conventions::DEFAULT_RANGE_ATTRIBUTE.to_string(),
            output_extension: conventions::DEFAULT_OUTPUT_EXTENSION.to_string(),
            error_boundary: ErrorBoundary::Pass,
            indent: "\t".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the namespace prefix stripped from fully-qualified types.
    ///
    /// A bare namespace (`Acme.Gen`) gets the trailing `.` appended.
    pub fn with_internal_namespace(mut self, namespace: impl Into<String>) -> Self {
        let mut namespace = namespace.into();
        if !namespace.is_empty() && !namespace.ends_with('.') {
            namespace.push('.');
        }
        self.internal_namespace = namespace;
        self
    }

    pub fn with_key_attribute(mut self, name: impl Into<String>) -> Self {
        self.key_attribute = name.into();
        self
    }

    pub fn with_x_attribute(mut self, name: impl Into<String>) -> Self {
        self.x_attribute = name.into();
        self
    }

    pub fn with_range_attribute(mut self, name: impl Into<String>) -> Self {
        self.range_attribute = name.into();
        self
    }

    /// Set the generated file extension; a leading `.` is ignored.
    pub fn with_output_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.output_extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_error_boundary(mut self, boundary: ErrorBoundary) -> Self {
        self.error_boundary = boundary;
        self
    }

    /// Set the indentation unit
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Output name for a generated class: `<class>.gen.<ext>`.
    pub fn output_name(&self, class_name: &str) -> String {
        conventions::output_file_name(class_name, &self.output_extension)
    }
}
