//!
//! ## Line Terminators
//!
//! These signify the end of lines (although technically [LineTerminatorSequence]s do!)
//!

use avjs_macros::{ECMARef, Spanned};

use crate::{
    common::{Source, Span},
    lexing::{
        utils::{unicode::is_line_terminator, ErrorKind, Lex, LexResult, SourceStream},
        Context,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTerminatorKind {
    CRLF,
    LF,
    CR,
    LS,
    PS,
}

///
/// One logical line break: `<CR><LF>` counts once.
///
#[ECMARef(
    "LineTerminatorSequence",
    "https://tc39.es/ecma262/#sec-line-terminators"
)]
#[derive(Debug, Spanned)]
pub struct LineTerminatorSequence {
    span: Span,
    kind: LineTerminatorKind,
}

impl LineTerminatorSequence {
    pub fn kind(&self) -> LineTerminatorKind {
        self.kind
    }
}

impl Lex for LineTerminatorSequence {
    fn peek<S: Source>(input: &SourceStream<S>) -> bool {
        input.upcoming(|ch: &char| is_line_terminator(*ch))
    }

    fn lex<S: Source>(input: &mut SourceStream<S>, _: Context) -> LexResult<Self> {
        let start = input.index();
        let kind = match input.peek() {
            Some('\n') => LineTerminatorKind::LF,
            Some('\r') if input.upcoming("\r\n") => LineTerminatorKind::CRLF,
            Some('\r') => LineTerminatorKind::CR,
            Some('\u{2028}') => LineTerminatorKind::LS,
            Some('\u{2029}') => LineTerminatorKind::PS,
            Some(ch) => return Err(input.error(ErrorKind::IllegalCharacter(ch))),
            None => return Err(input.error(ErrorKind::IllegalCharacter('\0'))),
        };

        input.consume_line_terminator();

        Ok(Self {
            span: Span::new(start, input.index()),
            kind,
        })
    }
}
