//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::backend::selector::select_candidates;
use crate::backend::{GenerationPass, PartialClassRenderer, PassOutput, SemanticModel};
use crate::config::GeneratorConfig;
use crate::frontend::{Compilation, ParsedUnit, diagnostics, lexer, parser};

use super::prelude::prelude_unit;
use super::{CliError, CliResult, ExitCode, InputArgs};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions
/// while parsing.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// File-system and serialization failures of a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Cannot access file '{path}': {source}")]
    Access { path: String, source: io::Error },

    #[error("Source file '{path}' is too large ({size} bytes, max {max} bytes)")]
    TooLarge { path: String, size: u64, max: u64 },

    #[error("Error reading file '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("Error writing '{path}': {source}")]
    Write { path: String, source: io::Error },

    #[error("Output directory '{0}' contains path traversal (..)")]
    OutputTraversal(String),

    #[error("Cannot serialize class models: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::failure(err.to_string())
    }
}

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> Result<String, CommandError> {
    let metadata = fs::metadata(file_path).map_err(|source| CommandError::Access {
        path: file_path.to_string(),
        source,
    })?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CommandError::TooLarge {
            path: file_path.to_string(),
            size: metadata.len(),
            max: MAX_SOURCE_SIZE,
        });
    }

    fs::read_to_string(file_path).map_err(|source| CommandError::Read {
        path: file_path.to_string(),
        source,
    })
}

/// Reject output directories that climb out of the working tree.
fn validate_output_dir(out_dir: &Path) -> Result<(), CommandError> {
    if out_dir.components().any(|c| matches!(c, std::path::Component::ParentDir)) {
        return Err(CommandError::OutputTraversal(out_dir.display().to_string()));
    }
    if out_dir.is_absolute() {
        tracing::warn!("Using absolute output path: {}", out_dir.display());
    }
    Ok(())
}

// ============================================================================
// Compilation
// ============================================================================

/// Read, parse and bind every input file (plus the prelude unless disabled).
///
/// Syntax errors of all files are reported together.
pub fn load_compilation(input: &InputArgs) -> CliResult<Compilation> {
    let mut units = Vec::new();
    if !input.no_prelude {
        units.push(prelude_unit()?);
    }

    let mut msg = String::new();
    for file in &input.files {
        let path = file.to_string_lossy();
        let source = read_source(&path)?;
        match ParsedUnit::parse(path.to_string(), source) {
            Ok(unit) => units.push(unit),
            Err(e) => msg.push_str(&diagnostics::format_errors(&e.path, &e.source, &e.errors)),
        }
    }
    if !msg.is_empty() {
        return Err(CliError::failure(msg.trim_end()));
    }

    Ok(Compilation::build(units))
}

/// Run one generation pass over `input` without touching the file system.
pub fn generate_sources(input: &InputArgs, config: &GeneratorConfig) -> CliResult<PassOutput> {
    let compilation = load_compilation(input)?;
    let pass = GenerationPass::new(config.clone());
    let mut output = PassOutput::new();
    let summary = pass.run_model(&compilation, &PartialClassRenderer, &mut output);
    tracing::info!(
        candidates = summary.candidates,
        generated = summary.generated,
        failed = summary.failed,
        "generation pass finished"
    );
    Ok(output)
}

/// Write every generated source into `out_dir`, returning the written paths.
pub fn write_sources(output: &PassOutput, out_dir: &Path) -> Result<Vec<PathBuf>, CommandError> {
    validate_output_dir(out_dir)?;
    fs::create_dir_all(out_dir).map_err(|source| CommandError::Write {
        path: out_dir.display().to_string(),
        source,
    })?;

    let mut written = Vec::with_capacity(output.sources.len());
    for generated in &output.sources {
        let path = out_dir.join(&generated.name);
        fs::write(&path, &generated.text).map_err(|source| CommandError::Write {
            path: path.display().to_string(),
            source,
        })?;
        written.push(path);
    }
    Ok(written)
}

// ============================================================================
// Commands
// ============================================================================

/// Generate and write sources.
///
/// Pass diagnostics are warnings: they are printed but the command still succeeds.
pub fn generate(input: &InputArgs, config: &GeneratorConfig, out_dir: &Path) -> CliResult<ExitCode> {
    let output = generate_sources(input, config)?;
    for diagnostic in &output.diagnostics {
        eprintln!("{diagnostic}");
    }

    let written = write_sources(&output, out_dir)?;
    for path in &written {
        println!("Generated: {}", path.display());
    }
    println!(
        "\n✓ {} file(s) generated, {} warning(s)",
        written.len(),
        output.diagnostics.len()
    );
    Ok(ExitCode::SUCCESS)
}

/// Extracted class models as JSON.
pub fn inspect_json(input: &InputArgs, config: &GeneratorConfig, pretty: bool) -> CliResult<String> {
    let compilation = load_compilation(input)?;
    let classes = GenerationPass::new(config.clone()).extract_all(&compilation);
    let json = if pretty {
        serde_json::to_string_pretty(&classes)
    } else {
        serde_json::to_string(&classes)
    };
    Ok(json.map_err(CommandError::from)?)
}

/// Print the extracted class models.
pub fn inspect(input: &InputArgs, config: &GeneratorConfig, pretty: bool) -> CliResult<ExitCode> {
    println!("{}", inspect_json(input, config, pretty)?);
    Ok(ExitCode::SUCCESS)
}

/// `Namespace.Name (path)` for every candidate declaration.
pub fn candidate_lines(input: &InputArgs) -> CliResult<Vec<String>> {
    let compilation = load_compilation(input)?;
    let declarations = compilation.declarations();
    Ok(select_candidates(&declarations)
        .into_iter()
        .map(|decl| {
            let name = if decl.namespace.is_empty() {
                decl.name.clone()
            } else {
                format!("{}.{}", decl.namespace, decl.name)
            };
            format!("{name} ({})", decl.source_path)
        })
        .collect())
}

/// List candidates.
pub fn candidates(input: &InputArgs) -> CliResult<ExitCode> {
    for line in candidate_lines(input)? {
        println!("{line}");
    }
    Ok(ExitCode::SUCCESS)
}

/// Lex and display tokens.
pub fn lex_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = match lexer::lex(&source) {
        Ok(toks) => toks,
        Err(errs) => {
            let msg = diagnostics::format_errors(file_path, &source, &errs);
            return Err(CliError::failure(msg.trim_end()));
        }
    };

    for tok in &tokens {
        println!("{:?}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Parse and display the syntax tree.
pub fn parse_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    match parser::parse_source(&source) {
        Ok(file) => {
            println!("{:#?}", file);
            Ok(ExitCode::SUCCESS)
        }
        Err(errs) => {
            let msg = diagnostics::format_errors(file_path, &source, &errs);
            Err(CliError::failure(msg.trim_end()))
        }
    }
}
