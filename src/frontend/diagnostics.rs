//! User-facing rendering of syntax errors.
//!
//! [`CompileError`]s carry byte spans into their source file; this module turns them into
//! `miette` diagnostics with the offending range labelled.

use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme, NamedSource, SourceSpan};
use recgen_syntax::diagnostics::CompileError;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(recgen::syntax))]
pub struct SyntaxDiagnostic {
    message: String,
    #[source_code]
    src: NamedSource<String>,
    #[label("{label}")]
    span: SourceSpan,
    label: String,
    #[help]
    help: Option<String>,
}

impl SyntaxDiagnostic {
    pub fn new(path: &str, source: &str, err: &CompileError) -> Self {
        let start = err.span.start.min(source.len());
        let end = err.span.end.clamp(start, source.len());

        let mut message = format!("{}: {}", err.kind, err.message);
        for note in &err.notes {
            message.push_str("\nnote: ");
            message.push_str(note);
        }

        Self {
            message,
            src: NamedSource::new(path, source.to_string()),
            span: SourceSpan::from((start, end - start)),
            label: "here".to_string(),
            help: (!err.hints.is_empty()).then(|| err.hints.join("\n")),
        }
    }
}

/// Render one error with source context, without colors.
pub fn format_error(path: &str, source: &str, err: &CompileError) -> String {
    let diagnostic = SyntaxDiagnostic::new(path, source, err);
    let mut out = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
    if handler.render_report(&mut out, &diagnostic).is_err() {
        // Fall back to a plain line when the report cannot be laid out.
        let (line, col) = recgen_syntax::diagnostics::line_col(source, err.span.start);
        return format!("{path}:{line}:{col}: {}: {}\n", err.kind, err.message);
    }
    out
}

/// Render every error of one file.
pub fn format_errors(path: &str, source: &str, errors: &[CompileError]) -> String {
    errors.iter().map(|e| format_error(path, source, e)).collect()
}
