//! Integration tests for recgen: declarations in, generated sources and diagnostics out

use std::fs;
use std::process::Command;

use recgen::backend::{PassError, Severity};
use recgen::cli::prelude::{PRELUDE_PATH, PRELUDE_SOURCE};
use recgen::{Compilation, ErrorBoundary, GenerationPass, GeneratorConfig, PartialClassRenderer, PassOutput};

/// Build a compilation of the prelude plus one user file
fn compile(source: &str) -> Compilation {
    Compilation::from_sources([(PRELUDE_PATH, PRELUDE_SOURCE), ("game.cs", source)]).expect("sources parse")
}

fn run_pass(source: &str, config: GeneratorConfig) -> PassOutput {
    let mut out = PassOutput::new();
    GenerationPass::new(config).run_model(&compile(source), &PartialClassRenderer, &mut out);
    out
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_candidate_selection() {
    let source = r#"
namespace Game
{
    public partial class A : Record { }
    public partial class B : Data { }
    public partial class C : RecGen.Record { }
    public partial class D : IComparable, Record { }
    public partial struct E : Record { }
    public partial class F { }
    public partial class G : Record<int> { }
}
"#;
    let out = run_pass(source, GeneratorConfig::new());
    assert_eq!(out.names(), vec!["A.gen.cs", "B.gen.cs"]);
    assert!(out.diagnostics.is_empty());
}

#[test]
fn test_user_declared_record_base_is_not_a_candidate() {
    let source = "namespace Other { public abstract class Data { } public abstract class Record : Data { } }";
    let comp = Compilation::from_sources([("bases.cs", source)]).expect("parses");
    let infos = GenerationPass::default().extract_all(&comp);
    assert!(infos.is_empty());
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_extracted_model() {
    let source = r#"
namespace RecGen { public class DataFieldInt { } }
namespace Game.Model
{
    public sealed partial class Player : Record
    {
        [K] private int id;
        [X] public System.Collections.Generic.Dictionary<string, int> Cache;
        public DataFieldInt Hp;
        public RecGen.DataFieldInt Mp = new RecGen.DataFieldInt();
    }
}
"#;
    let infos = GenerationPass::default().extract_all(&compile(source));
    assert_eq!(infos.len(), 1);
    let player = &infos[0];
    assert_eq!(player.name(), "Player");
    assert_eq!(player.namespace(), "Game.Model");
    assert_eq!(player.source_file_path(), "game.cs");
    assert_eq!(player.base_class(), "Record");
    assert!(player.is_record() && player.is_public() && player.is_sealed() && player.is_partial());

    let fields = player.fields();
    assert!(fields[0].is_key() && fields[0].is_private());
    assert!(fields[1].is_x());
    assert_eq!(fields[1].full_type(), "System.Collections.Generic.Dictionary<string, int>");
    assert_eq!(fields[1].ty(), "Dictionary<string, int>");
    assert_eq!(fields[2].full_type(), "DataFieldInt");
    assert!(fields[2].is_data_field());
    assert_eq!(fields[3].initialization(), "new RecGen.DataFieldInt()");
}

#[test]
fn test_inherited_members_come_first() {
    let source = r#"
public abstract class Data { public int Version; }
public partial class Stats : Data { public int Str; }
"#;
    let comp = Compilation::from_sources([("stats.cs", source)]).expect("parses");
    let infos = GenerationPass::default().extract_all(&comp);
    let names: Vec<_> = infos[0].fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["Version", "Str"]);
    assert!(infos[0].is_data());
}

#[test]
fn test_inspect_json_shape() {
    let source = "public partial class P : Record { [K] public int Id = 7; }";
    let infos = GenerationPass::default().extract_all(&compile(source));
    let json = serde_json::to_value(&infos).expect("serializes");
    let field = &json[0]["fields"][0];
    assert_eq!(json[0]["name"], "P");
    assert_eq!(field["type"], "int");
    assert_eq!(field["initialization"], "7");
    assert_eq!(field["is_key"], true);
}

// ============================================================================
// Pass behaviour
// ============================================================================

const WITH_LIST: &str = r#"
namespace Game
{
    public partial class First : Record { public int A; }
    public partial class Bag : Record { public System.Collections.Generic.List<int> Items; }
    public partial class Last : Data { public int Z; }
}
"#;

#[test]
fn test_list_member_fails_the_whole_pass() {
    let out = run_pass(WITH_LIST, GeneratorConfig::new());
    assert_eq!(out.names(), vec!["First.gen.cs"]);
    assert_eq!(out.diagnostics.len(), 1);

    let diagnostic = &out.diagnostics[0];
    assert_eq!(diagnostic.id, "RECGEN001");
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert!(diagnostic.message.starts_with("Error for object: Bag Bag: Unsupported Type: List<int> for Items"));
    assert!(!diagnostic.message.contains('\n'));
}

#[test]
fn test_per_candidate_boundary_keeps_going() {
    let config = GeneratorConfig::new().with_error_boundary(ErrorBoundary::Candidate);
    let out = run_pass(WITH_LIST, config);
    assert_eq!(out.names(), vec!["First.gen.cs", "Last.gen.cs"]);
    assert_eq!(out.diagnostics.len(), 1);
}

#[test]
fn test_repeated_passes_are_identical() {
    let comp = compile(WITH_LIST);
    let pass = GenerationPass::new(GeneratorConfig::new().with_error_boundary(ErrorBoundary::Candidate));
    let mut first = PassOutput::new();
    let mut second = PassOutput::new();
    pass.run_model(&comp, &PartialClassRenderer, &mut first);
    pass.run_model(&comp, &PartialClassRenderer, &mut second);
    assert_eq!(first.sources, second.sources);
    assert_eq!(first.diagnostics, second.diagnostics);
}

#[test]
fn test_pass_error_is_a_std_error() {
    fn assert_error<E: std::error::Error>() {}
    assert_error::<PassError>();
}

// ============================================================================
// Binary
// ============================================================================

#[test]
fn test_generate_command_writes_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("game.cs");
    fs::write(&input, WITH_LIST).expect("write input");
    let out_dir = dir.path().join("out");

    let output = Command::new(env!("CARGO_BIN_EXE_recgen"))
        .arg("generate")
        .arg(&input)
        .arg("-o")
        .arg(&out_dir)
        .arg("--per-candidate")
        .output()
        .expect("run recgen");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning[RECGEN001]"));
    assert!(out_dir.join("First.gen.cs").exists());
    assert!(out_dir.join("Last.gen.cs").exists());
    assert!(!out_dir.join("Bag.gen.cs").exists());
}

#[test]
fn test_syntax_error_exits_with_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("bad.cs");
    fs::write(&input, "namespace Game { class { } }").expect("write input");

    let output = Command::new(env!("CARGO_BIN_EXE_recgen"))
        .arg("candidates")
        .arg(&input)
        .output()
        .expect("run recgen");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("bad.cs"));
}
