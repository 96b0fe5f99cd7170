//!
//! Comments.
//!

use avjs_macros::{ECMARef, Spanned};

use crate::{
    common::{Source, Span},
    lexing::{
        utils::{unicode::is_line_terminator, ErrorKind, Lex, LexError, LexResult, SourceStream},
        Context,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
    ///
    /// `// ...`
    ///
    Single,

    ///
    /// `/* ... */`
    ///
    Multi,

    ///
    /// `<!-- ...`
    ///
    HtmlOpen,

    ///
    /// `--> ...`
    ///
    HtmlClose,

    ///
    /// `#! ...`, only at the very start of a source.
    ///
    Hashbang,
}

///
/// ```js
/// // Comments
/// /* of either type. */
/// ```
///
#[ECMARef("Comment", "https://tc39.es/ecma262/#sec-comments")]
#[derive(Debug, Clone, Spanned)]
pub struct Comment {
    kind: CommentKind,
    span: Span,

    ///
    /// Span of the contents of this comment
    ///
    inner: Span,

    ///
    /// Does this (multi-line) comment contain a line terminator?
    ///
    has_line_terminator: bool,
}

impl Comment {
    pub fn kind(&self) -> CommentKind {
        self.kind
    }

    pub fn inner(&self) -> Span {
        self.inner
    }

    pub fn has_line_terminator(&self) -> bool {
        self.has_line_terminator
    }

    ///
    /// Scan a comment running to the end of the line,
    /// starting with the ASCII `opener`.
    ///
    /// The line terminator is left in the stream.
    ///
    pub(crate) fn lex_line<S: Source>(
        input: &mut SourceStream<S>,
        opener: &str,
        kind: CommentKind,
    ) -> Self {
        let start = input.index();
        for _ in 0..opener.len() {
            input.advance();
        }

        let inner = input.take_while(|ch| !is_line_terminator(*ch));

        Self {
            kind,
            span: Span::new(start, inner.end()),
            inner,
            has_line_terminator: false,
        }
    }

    fn lex_block<S: Source>(input: &mut SourceStream<S>) -> LexResult<Self> {
        let start = input.position();
        input.advance();
        input.advance();

        let contents = input.index();
        let mut has_line_terminator = false;
        loop {
            if input.upcoming("*/") {
                let inner = Span::new(contents, input.index());
                input.advance();
                input.advance();

                return Ok(Self {
                    kind: CommentKind::Multi,
                    span: Span::new(start.index, input.index()),
                    inner,
                    has_line_terminator,
                });
            }

            match input.advance() {
                Some(ch) if is_line_terminator(ch) => has_line_terminator = true,
                Some(_) => (),
                None => return Err(LexError::new(ErrorKind::UnterminatedComment, start)),
            }
        }
    }
}

impl Lex for Comment {
    fn peek<S: Source>(input: &SourceStream<S>) -> bool {
        input.upcoming("//") || input.upcoming("/*")
    }

    fn lex<S: Source>(input: &mut SourceStream<S>, _: Context) -> LexResult<Self> {
        if input.upcoming("/*") {
            return Self::lex_block(input);
        }

        Ok(Self::lex_line(input, "//", CommentKind::Single))
    }
}
