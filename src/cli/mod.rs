//! CLI module for recgen
//!
//! ## Commands
//!
//! - `generate <files..>` - Run one generation pass and write `<Class>.gen.<ext>` files
//! - `inspect <files..>` - Print the extracted class models as JSON
//! - `candidates <files..>` - List the classes a pass would generate for
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `prelude` - Embedded support-library declarations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod prelude;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::config::{ErrorBoundary, GeneratorConfig};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Metadata extractor and boilerplate generator for Record/Data classes
#[derive(Parser, Debug)]
#[command(name = "recgen")]
#[command(version = VERSION)]
#[command(about = "Generate boilerplate for Record/Data class declarations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE")]
    pub lex_file: Option<PathBuf>,

    /// Parse only (debug)
    #[arg(long = "parse", value_name = "FILE")]
    pub parse_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one generation pass and write the generated files
    Generate {
        #[command(flatten)]
        input: InputArgs,
        /// Output directory (default: current directory)
        #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Extension of generated files
        #[arg(long = "ext", value_name = "EXT")]
        ext: Option<String>,
        /// Keep generating after a candidate fails instead of stopping the pass
        #[arg(long = "per-candidate")]
        per_candidate: bool,
        /// Indent generated code with this many spaces instead of a tab
        #[arg(long = "indent-spaces", value_name = "N")]
        indent_spaces: Option<usize>,
    },

    /// Print the extracted class models as JSON
    Inspect {
        #[command(flatten)]
        input: InputArgs,
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// List the classes a generation pass would pick up
    Candidates {
        #[command(flatten)]
        input: InputArgs,
    },
}

/// Inputs and naming options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Declaration source files
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
    /// Do not add the built-in support declarations (`Data`, `Record`, `K`, `X`, `Range`)
    #[arg(long = "no-prelude")]
    pub no_prelude: bool,
    /// Namespace prefix stripped from member types
    #[arg(long = "internal-namespace", value_name = "NS")]
    pub internal_namespace: Option<String>,
    /// Metadata name of the key attribute
    #[arg(long = "key-attribute", value_name = "NAME")]
    pub key_attribute: Option<String>,
    /// Metadata name of the extra (X) attribute
    #[arg(long = "x-attribute", value_name = "NAME")]
    pub x_attribute: Option<String>,
}

impl InputArgs {
    /// Generator configuration with the naming overrides applied.
    pub fn config(&self) -> GeneratorConfig {
        let mut config = GeneratorConfig::new();
        if let Some(ns) = &self.internal_namespace {
            config = config.with_internal_namespace(ns);
        }
        if let Some(name) = &self.key_attribute {
            config = config.with_key_attribute(name);
        }
        if let Some(name) = &self.x_attribute {
            config = config.with_x_attribute(name);
        }
        config
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = cli.lex_file {
        return commands::lex_file(&file.to_string_lossy());
    }
    if let Some(file) = cli.parse_file {
        return commands::parse_file(&file.to_string_lossy());
    }

    match cli.command {
        Some(Command::Generate {
            input,
            out_dir,
            ext,
            per_candidate,
            indent_spaces,
        }) => {
            let config = generate_config(&input, ext.as_deref(), per_candidate, indent_spaces);
            let out_dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
            commands::generate(&input, &config, &out_dir)
        }
        Some(Command::Inspect { input, pretty }) => commands::inspect(&input, &input.config(), pretty),
        Some(Command::Candidates { input }) => commands::candidates(&input),
        // No command - clap prints usage for `--help`; a bare invocation is an error
        None => Err(CliError::failure("No command given. Run `recgen --help` for usage.")),
    }
}

fn generate_config(
    input: &InputArgs,
    ext: Option<&str>,
    per_candidate: bool,
    indent_spaces: Option<usize>,
) -> GeneratorConfig {
    let mut config = input.config();
    if let Some(ext) = ext {
        config = config.with_output_extension(ext);
    }
    if per_candidate {
        config = config.with_error_boundary(ErrorBoundary::Candidate);
    }
    if let Some(n) = indent_spaces {
        config = config.with_indent(" ".repeat(n));
    }
    config
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_generate() {
        let cli = Cli::try_parse_from(["recgen", "generate", "a.cs", "b.cs", "-o", "out", "--ext", "txt"]).unwrap();
        if let Some(Command::Generate {
            input, out_dir, ext, ..
        }) = cli.command
        {
            assert_eq!(input.files.len(), 2);
            assert_eq!(out_dir, Some(PathBuf::from("out")));
            assert_eq!(ext.as_deref(), Some("txt"));
        } else {
            panic!("Expected Generate command");
        }
    }

    #[test]
    fn test_cli_generate_requires_files() {
        assert!(Cli::try_parse_from(["recgen", "generate"]).is_err());
    }

    #[test]
    fn test_generate_config_from_flags() {
        let cli = Cli::try_parse_from([
            "recgen",
            "generate",
            "a.cs",
            "--per-candidate",
            "--indent-spaces",
            "4",
            "--ext",
            ".g",
            "--internal-namespace",
            "Core",
            "--key-attribute",
            "Core.KeyAttribute",
        ])
        .unwrap();
        let Some(Command::Generate {
            input,
            ext,
            per_candidate,
            indent_spaces,
            ..
        }) = cli.command
        else {
            panic!("Expected Generate command");
        };
        let config = generate_config(&input, ext.as_deref(), per_candidate, indent_spaces);
        assert_eq!(config.error_boundary, ErrorBoundary::Candidate);
        assert_eq!(config.indent, "    ");
        assert_eq!(config.output_extension, "g");
        assert_eq!(config.internal_namespace, "Core.");
        assert_eq!(config.key_attribute, "Core.KeyAttribute");
        assert_eq!(config.x_attribute, "RecGen.XAttribute");
    }

    #[test]
    fn test_cli_parse_inspect() {
        let cli = Cli::try_parse_from(["recgen", "inspect", "a.cs", "--pretty", "--no-prelude"]).unwrap();
        if let Some(Command::Inspect { input, pretty }) = cli.command {
            assert!(pretty);
            assert!(input.no_prelude);
        } else {
            panic!("Expected Inspect command");
        }
    }

    #[test]
    fn test_cli_parse_candidates() {
        let cli = Cli::try_parse_from(["recgen", "candidates", "a.cs"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Candidates { .. })));
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["recgen", "--lex", "a.cs"]).unwrap();
        assert!(cli.lex_file.is_some());

        let cli = Cli::try_parse_from(["recgen", "--parse", "a.cs"]).unwrap();
        assert!(cli.parse_file.is_some());
    }

    #[test]
    fn test_no_command_is_an_error() {
        let cli = Cli::try_parse_from(["recgen"]).unwrap();
        let err = execute(cli).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
