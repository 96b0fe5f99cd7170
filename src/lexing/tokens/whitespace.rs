//!
//! ## Whitespace
//!
//! Skipped between tokens.
//!

use avjs_macros::{ECMARef, Spanned};

use crate::{
    common::{Source, Span},
    lexing::{
        utils::{unicode::is_whitespace, Lex, LexResult, SourceStream},
        Context,
    },
};

///
/// A run of whitespace, not including line terminators.
///
#[ECMARef("WhiteSpace", "https://tc39.es/ecma262/#sec-white-space")]
#[derive(Debug, Spanned)]
pub struct WhiteSpace {
    span: Span,
}

impl Lex for WhiteSpace {
    fn peek<S: Source>(input: &SourceStream<S>) -> bool {
        input.upcoming(|ch: &char| is_whitespace(*ch))
    }

    fn lex<S: Source>(input: &mut SourceStream<S>, _: Context) -> LexResult<Self> {
        Ok(Self {
            span: input.take_while(|ch| is_whitespace(*ch)),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        common::{file::SourceFile, Source, Spanned},
        lexing::{utils::Lex, Context},
    };

    use super::WhiteSpace;

    #[test]
    fn whitespace() {
        let source = SourceFile::dummy_file("\t\u{0B}\u{0C} \u{A0}\u{FEFF}\u{3000}x");
        let input = &mut source.stream();
        assert!(<WhiteSpace as Lex>::peek(input));
        let ws = WhiteSpace::lex(input, Context::empty()).expect("Valid parse");
        assert_eq!(ws.span().len(), 7);
        assert_eq!(input.peek(), Some('x'));
        assert!(!<WhiteSpace as Lex>::peek(input));
    }
}
