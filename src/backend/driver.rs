//! The generation pass: selector → extractor → renderer → writer → sink.

use recgen_core::lang::conventions;

use super::errors::{GenError, PassError, Stage};
use super::extract::extract_class;
use super::model::ClassInfo;
use super::registry::AttributeRegistry;
use super::render::Renderer;
use super::selector::select_candidates;
use super::semantic::{ClassDeclaration, SemanticModel};
use super::writer::CodeWriter;
use crate::config::{ErrorBoundary, GeneratorConfig};

// ============================================================================
// Host output
// ============================================================================

/// Failed passes are reported as warnings only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A report handed to the host when a pass (or candidate) fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    /// The `RECGEN001` warning for a failed pass.
    ///
    /// The message carries the failing candidate, the error text and the trace with line breaks
    /// removed.
    pub fn from_pass_error(err: &PassError) -> Self {
        let trace = err.trace().replace('\n', " ").replace('\r', "");
        Self {
            id: conventions::DIAGNOSTIC_ID,
            title: conventions::DIAGNOSTIC_TITLE,
            category: conventions::DIAGNOSTIC_CATEGORY,
            severity: Severity::Warning,
            message: format!("Error for object: {} {} {}", err.candidate, err.source, trace.trim_end()),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]: {}: {}", self.severity, self.id, self.title, self.message)
    }
}

/// Where generated sources and diagnostics go.
pub trait SourceSink {
    /// ## Errors
    /// [`GenError::DuplicateSource`] when `name` was already added.
    fn add_source(&mut self, name: &str, text: String) -> Result<(), GenError>;

    fn report_diagnostic(&mut self, diagnostic: Diagnostic);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSource {
    pub name: String,
    pub text: String,
}

/// In-memory [`SourceSink`].
#[derive(Debug, Default)]
pub struct PassOutput {
    pub sources: Vec<GeneratedSource>,
    pub diagnostics: Vec<Diagnostic>,
}

impl PassOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self, name: &str) -> Option<&str> {
        self.sources.iter().find(|s| s.name == name).map(|s| s.text.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name.as_str()).collect()
    }
}

impl SourceSink for PassOutput {
    fn add_source(&mut self, name: &str, text: String) -> Result<(), GenError> {
        if self.sources.iter().any(|s| s.name == name) {
            return Err(GenError::DuplicateSource { name: name.to_string() });
        }
        self.sources.push(GeneratedSource {
            name: name.to_string(),
            text,
        });
        Ok(())
    }

    fn report_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

// ============================================================================
// Pass
// ============================================================================

/// Counts for one completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub candidates: usize,
    pub generated: usize,
    pub failed: usize,
}

/// One generation pass. Holds configuration only; nothing carries over between runs.
#[derive(Debug, Clone, Default)]
pub struct GenerationPass {
    config: GeneratorConfig,
}

impl GenerationPass {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate sources for every candidate in `declarations`.
    ///
    /// Failures never escape: they become [`Diagnostic`]s on `sink`. Under
    /// [`ErrorBoundary::Pass`] the first failure stops the loop; sources already added stay.
    #[tracing::instrument(skip_all, fields(declarations = declarations.len()))]
    pub fn run(
        &self,
        model: &dyn SemanticModel,
        declarations: &[ClassDeclaration],
        renderer: &dyn Renderer,
        sink: &mut dyn SourceSink,
    ) -> PassSummary {
        let registry = AttributeRegistry::resolve(model, &self.config);
        let candidates = select_candidates(declarations);
        let mut summary = PassSummary {
            candidates: candidates.len(),
            ..PassSummary::default()
        };

        for decl in candidates {
            tracing::debug!(class = %decl.name, "generating candidate");
            match self.generate(decl, model, &registry, renderer, sink) {
                Ok(()) => summary.generated += 1,
                Err(err) => {
                    summary.failed += 1;
                    let diagnostic = Diagnostic::from_pass_error(&err);
                    tracing::warn!(id = diagnostic.id, "{}", diagnostic.message);
                    sink.report_diagnostic(diagnostic);
                    if self.config.error_boundary == ErrorBoundary::Pass {
                        break;
                    }
                }
            }
        }
        summary
    }

    /// [`run`](Self::run) over every declaration the model knows.
    pub fn run_model(
        &self,
        model: &dyn SemanticModel,
        renderer: &dyn Renderer,
        sink: &mut dyn SourceSink,
    ) -> PassSummary {
        let declarations = model.declarations();
        self.run(model, &declarations, renderer, sink)
    }

    /// Entity models for every candidate, without rendering.
    pub fn extract_all(&self, model: &dyn SemanticModel) -> Vec<ClassInfo> {
        let registry = AttributeRegistry::resolve(model, &self.config);
        let declarations = model.declarations();
        select_candidates(&declarations)
            .into_iter()
            .map(|decl| extract_class(decl, model, &registry, &self.config))
            .collect()
    }

    fn generate(
        &self,
        decl: &ClassDeclaration,
        model: &dyn SemanticModel,
        registry: &AttributeRegistry,
        renderer: &dyn Renderer,
        sink: &mut dyn SourceSink,
    ) -> Result<(), PassError> {
        let class = extract_class(decl, model, registry, &self.config);

        let mut out = CodeWriter::with_indent(&self.config.indent);
        renderer
            .render(&class, &mut out)
            .map_err(|e| PassError::new(class.name(), Stage::Render, e))?;

        let name = self.config.output_name(class.name());
        sink.add_source(&name, out.source())
            .map_err(|e| PassError::new(class.name(), Stage::Emit, e))?;
        tracing::debug!(%name, "emitted source");
        Ok(())
    }
}
