/// Parse a token stream into an AST [`SourceFile`].
///
/// This is the main public entrypoint for parsing.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `recgen_syntax::lexer`.
///
/// ## Errors
/// Returns `Err(Vec<CompileError>)` if parsing fails.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token]) -> Result<SourceFile, Vec<CompileError>> {
    Parser::new(tokens).parse()
}

/// Lex and parse `source` in one step.
///
/// ## Errors
/// Returns the lexer's errors if lexing fails, otherwise the parser's.
pub fn parse_source(source: &str) -> Result<SourceFile, Vec<CompileError>> {
    let tokens = lexer::lex(source)?;
    parse(&tokens)
}
