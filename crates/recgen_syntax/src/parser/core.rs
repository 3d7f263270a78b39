/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".
///
/// A namespace-level entry: either a `using` directive or an item.
enum NamespaceMember {
    Using(Spanned<UsingDirective>),
    Item(Spanned<Item>),
}

/// Parser state.
///
/// ## Notes
/// - The parser is single-pass and recovers from errors by synchronizing at member and
///   declaration boundaries (`;`, brace groups, type keywords).
pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<CompileError>,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// ## Parameters
    /// - `tokens`: Token stream produced by `recgen_syntax::lexer` (terminated by `Eof`).
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`SourceFile`].
    ///
    /// ## Errors
    /// Returns a list of [`CompileError`]s if parsing fails. The parser attempts
    /// to recover and continue after an error to report multiple issues in one pass.
    pub fn parse(mut self) -> Result<SourceFile, Vec<CompileError>> {
        if self.tokens.is_empty() {
            return Ok(SourceFile::default());
        }

        let mut file = SourceFile::default();
        self.namespace_members(false, &mut file.usings, &mut file.items);

        if self.errors.is_empty() {
            Ok(file)
        } else {
            Err(self.errors)
        }
    }

    /// Parse namespace-level entries until EOF (or a closing `}` when `in_block`).
    fn namespace_members(
        &mut self,
        in_block: bool,
        usings: &mut Vec<Spanned<UsingDirective>>,
        items: &mut Vec<Spanned<Item>>,
    ) {
        while !self.is_at_end() && !(in_block && self.check_punct(PunctuationId::RBrace)) {
            let start_pos = self.pos;
            match self.namespace_member() {
                Ok(Some(NamespaceMember::Using(u))) => usings.push(u),
                Ok(Some(NamespaceMember::Item(item))) => items.push(item),
                Ok(None) => {}
                Err(e) => {
                    self.errors.push(e);
                    self.synchronize(start_pos);
                }
            }
        }
    }
}
