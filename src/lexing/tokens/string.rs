//!
//! ## String literals
//!

use avjs_macros::{ECMARef, Spanned};

use crate::{
    common::{Source, Span},
    lexing::{
        utils::{ErrorKind, Lex, LexError, LexResult, SourceStream},
        Context,
    },
};

use super::escapes::{CharacterValue, EscapePlace, EscapeSequence};

///
/// ```js
/// "double-quoted"
/// 'single-quoted'
/// ```
///
#[ECMARef(
    "StringLiteral",
    "https://tc39.es/ecma262/#sec-literals-string-literals"
)]
#[derive(Debug, Clone, Spanned)]
pub struct StringLiteral {
    span: Span,
    quote: char,

    ///
    /// The cooked value: escapes decoded,
    /// line continuations removed.
    ///
    value: String,
}

impl StringLiteral {
    pub fn quote(&self) -> char {
        self.quote
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn into_value(self) -> String {
        self.value
    }
}

impl Lex for StringLiteral {
    fn peek<S: Source>(input: &SourceStream<S>) -> bool {
        input.upcoming("\"") || input.upcoming("'")
    }

    fn lex<S: Source>(input: &mut SourceStream<S>, context: Context) -> LexResult<Self> {
        let start = input.position();
        let quote = input.advance().unwrap_or('"');
        let mut units = vec![];

        loop {
            match input.peek() {
                Some(ch) if ch == quote => {
                    input.advance();
                    break;
                }
                // <LS> and <PS> are allowed, the other two are not.
                None | Some('\r' | '\n') => {
                    return Err(LexError::new(ErrorKind::UnterminatedString, start))
                }
                Some('\\') => {
                    let escape = EscapeSequence::lex(input, context, EscapePlace::String)
                        .map_err(|err| match err.kind() {
                            ErrorKind::UnterminatedString => {
                                LexError::new(ErrorKind::UnterminatedString, start)
                            }
                            _ => err,
                        })?;
                    let mut buf = [0; 2];
                    units.extend_from_slice(escape.cv(&mut buf));
                }
                Some(_) => {
                    input.advance_into(&mut units);
                }
            }
        }

        Ok(Self {
            span: Span::new(start.index, input.index()),
            quote,
            value: String::from_utf16_lossy(&units),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        common::{file::SourceFile, Source, Spanned},
        lexing::{
            utils::{ErrorKind, Lex, LexResult},
            Context,
        },
    };

    use super::StringLiteral;

    fn string_in(text: &str, context: Context) -> LexResult<StringLiteral> {
        let source = SourceFile::dummy_file(text);
        StringLiteral::lex(&mut source.stream(), context)
    }

    fn string(text: &str) -> LexResult<StringLiteral> {
        string_in(text, Context::empty())
    }

    #[test]
    fn plain() {
        let text = "'Hello, world! (no escapes here)'";
        let literal = string(text).expect("Valid parse");
        assert_eq!(literal.value(), &text[1..text.len() - 1]);
        assert_eq!(literal.quote(), '\'');
        assert_eq!(literal.span().len(), text.len());

        assert_eq!(string("\"it's\"").unwrap().value(), "it's");
        assert_eq!(string("''").unwrap().value(), "");
    }

    #[test]
    fn escaped() {
        assert_eq!(
            string(r#""tab:\t quote:\" hex:\x41 uni:\u00e9 astral:\u{1F600}""#)
                .unwrap()
                .value(),
            "tab:\t quote:\" hex:A uni:\u{e9} astral:\u{1F600}"
        );
        assert_eq!(string("'\u{1F600}'").unwrap().value(), "\u{1F600}");
        assert_eq!(string("'a\\\r\nb'").unwrap().value(), "ab");
        assert_eq!(string("'\\101\\0'").unwrap().value(), "A\0");
    }

    #[test]
    fn separators_allowed() {
        assert_eq!(
            string("'a\u{2028}b\u{2029}c'").unwrap().value(),
            "a\u{2028}b\u{2029}c"
        );
    }

    #[test]
    fn unterminated() {
        for text in ["\"abc", "'abc\ndef'", "'abc\r'", "'abc\\"] {
            let err = string(text).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UnterminatedString, "{text:?}");
        }
    }

    #[test]
    fn strict() {
        assert_eq!(
            string_in("'\\07'", Context::STRICT).unwrap_err().kind(),
            &ErrorKind::OctalEscapeInStrict
        );
        assert_eq!(string_in("'\\0'", Context::STRICT).unwrap().value(), "\0");
    }
}
