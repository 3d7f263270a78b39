//! Support-library declarations compiled alongside user files.
//!
//! The generator keys off the `Data`/`Record` base kinds and the `K`/`X`/`Range` member
//! attributes. User sources normally reference them without declaring them, so `generate` adds
//! this unit to every compilation unless `--no-prelude` is given.

use crate::frontend::ParsedUnit;
use crate::frontend::diagnostics;

use super::{CliError, CliResult};

/// Path the prelude is reported under.
pub const PRELUDE_PATH: &str = "<recgen-prelude>";

pub const PRELUDE_SOURCE: &str = r#"global using RecGen;

namespace RecGen
{
    public sealed class KAttribute : System.Attribute { }
    public sealed class XAttribute : System.Attribute { }
    public sealed class RangeAttribute : System.Attribute
    {
        public RangeAttribute(int min, int max) { }
    }

    public abstract class Data { }
    public abstract class Record : Data { }
}
"#;

/// Parse the embedded prelude.
pub fn prelude_unit() -> CliResult<ParsedUnit> {
    ParsedUnit::parse(PRELUDE_PATH, PRELUDE_SOURCE).map_err(|e| {
        let msg = diagnostics::format_errors(&e.path, &e.source, &e.errors);
        CliError::failure(format!("internal error: prelude failed to parse\n{}", msg.trim_end()))
    })
}
