#![no_main]

use libfuzzer_sys::fuzz_target;
use recgen::cli::prelude::{PRELUDE_PATH, PRELUDE_SOURCE};
use recgen::{Compilation, ErrorBoundary, GenerationPass, GeneratorConfig, PartialClassRenderer, PassOutput};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Anything that parses must bind and run a pass without panicking
    if let Ok(comp) = Compilation::from_sources([(PRELUDE_PATH, PRELUDE_SOURCE), ("fuzz.cs", s)]) {
        let pass = GenerationPass::new(GeneratorConfig::new().with_error_boundary(ErrorBoundary::Candidate));
        let mut out = PassOutput::new();
        pass.run_model(&comp, &PartialClassRenderer, &mut out);
    }
});
