//!
//! ## Identifiers
//!
//! Plain ASCII names take a fast path straight over the code units;
//! escapes and anything beyond ASCII fall back to decoding one
//! code point at a time.
//!

use avjs_macros::{ECMARef, Spanned};

use crate::{
    common::{Source, Span},
    lexing::{
        utils::{
            unicode::{ascii_flags, is_id_continue, is_id_start, CharFlags},
            ErrorKind, Lex, LexError, LexResult, SourceStream,
        },
        Context,
    },
};

use super::{escapes::lex_unicode_escape, keyword, Token, TokenFlags};

///
/// > Identifier Names are tokens that are interpreted
/// > according to the grammar given in the Unicode Standard Annex #31,
/// > with some small modifications.
///
#[ECMARef("IdentifierName", "https://tc39.es/ecma262/#prod-IdentifierName")]
#[derive(Debug, Clone, Spanned)]
pub struct IdentifierName {
    span: Span,

    ///
    /// The name, with escapes decoded.
    ///
    name: String,

    ///
    /// Was any part of this name spelled with an escape?
    ///
    escaped: bool,
}

impl IdentifierName {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn into_name(self) -> String {
        self.name
    }

    pub fn is_escaped(&self) -> bool {
        self.escaped
    }

    ///
    /// Classify this name: a keyword of some sort, or an identifier.
    ///
    /// Reserved words spelled with escapes can never act as keywords,
    /// so they get their own tokens for the parser to reject.
    ///
    pub fn token(&self) -> Token {
        match keyword(&self.name) {
            Some(token) if self.escaped && token.is(TokenFlags::RESERVED) => {
                Token::EscapedReserved
            }
            Some(token) if self.escaped && token.is(TokenFlags::STRICT_RESERVED) => {
                Token::EscapedFutureReserved
            }
            Some(token) => token,
            None => Token::Identifier,
        }
    }

    ///
    /// The fast path: contiguous ASCII identifier characters.
    ///
    fn lex_ascii<S: Source>(input: &mut SourceStream<S>) {
        let start = input.index();
        while let Some(unit) = input.peek_unit() {
            let wanted = match input.index() == start {
                true => CharFlags::ID_START,
                false => CharFlags::ID_PART,
            };

            if !ascii_flags(unit).contains(wanted) {
                break;
            }

            input.advance();
        }
    }

    ///
    /// The slow path: escapes, and Unicode identifier characters.
    ///
    fn lex_unicode<S: Source>(
        input: &mut SourceStream<S>,
        name: &mut String,
        escaped: &mut bool,
    ) -> LexResult<()> {
        loop {
            let accepts = match name.is_empty() {
                true => is_id_start,
                false => is_id_continue,
            };

            match input.peek() {
                Some('\\') => {
                    let position = input.position();
                    input.advance();
                    if !input.eat('u') {
                        return Err(input.error(ErrorKind::InvalidUnicodeEscape));
                    }

                    let ch = char::from_u32(lex_unicode_escape(input)?)
                        .filter(|ch| accepts(*ch))
                        .ok_or(LexError::new(ErrorKind::InvalidIdentifierEscape, position))?;

                    name.push(ch);
                    *escaped = true;
                }
                Some(ch) if accepts(ch) => {
                    input.advance();
                    name.push(ch);
                }
                _ => return Ok(()),
            }
        }
    }
}

impl Lex for IdentifierName {
    fn peek<S: Source>(input: &SourceStream<S>) -> bool {
        match input.peek() {
            Some('\\') => true,
            Some(ch) => is_id_start(ch),
            None => false,
        }
    }

    fn lex<S: Source>(input: &mut SourceStream<S>, _: Context) -> LexResult<Self> {
        let start = input.position();
        Self::lex_ascii(input);

        let mut name = input.text_from(start.index);
        let mut escaped = false;
        let slow = match input.peek() {
            Some('\\') => true,
            Some(ch) => !ch.is_ascii(),
            None => false,
        };

        if slow {
            Self::lex_unicode(input, &mut name, &mut escaped)?;
        }

        if name.is_empty() {
            return Err(LexError::new(
                ErrorKind::IllegalCharacter(input.peek().unwrap_or('\0')),
                start,
            ));
        }

        Ok(Self {
            span: Span::new(start.index, input.index()),
            name,
            escaped,
        })
    }
}

///
/// `#name`, the name of a private class member.
///
#[ECMARef(
    "PrivateIdentifier",
    "https://tc39.es/ecma262/#prod-PrivateIdentifier"
)]
#[derive(Debug, Clone, Spanned)]
pub struct PrivateName {
    span: Span,
    name: IdentifierName,
}

impl PrivateName {
    ///
    /// The name, without its `#`.
    ///
    pub fn name(&self) -> &IdentifierName {
        &self.name
    }
}

impl Lex for PrivateName {
    fn peek<S: Source>(input: &SourceStream<S>) -> bool {
        input.upcoming("#")
    }

    fn lex<S: Source>(input: &mut SourceStream<S>, context: Context) -> LexResult<Self> {
        let start = input.index();
        input.advance();

        if !<IdentifierName as Lex>::peek(input) {
            return Err(input.error(ErrorKind::InvalidPrivateName));
        }

        let name = IdentifierName::lex(input, context)?;
        Ok(Self {
            span: Span::new(start, input.index()),
            name,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        common::{file::SourceFile, Source, Spanned},
        lexing::{
            tokens::Token,
            utils::{ErrorKind, Lex, LexResult},
            Context,
        },
    };

    use super::{IdentifierName, PrivateName};

    fn test_identifier(st: &str) -> LexResult<IdentifierName> {
        let source = SourceFile::dummy_file(st);
        let input = &mut source.stream();
        IdentifierName::lex(input, Context::empty())
    }

    #[test]
    fn ascii() {
        let ident = test_identifier("$_camelCase42 = 1").expect("Valid parse!");
        assert_eq!(ident.name(), "$_camelCase42");
        assert_eq!(ident.span().len(), 13);
        assert!(!ident.is_escaped());
        assert_eq!(ident.token(), Token::Identifier);
    }

    #[test]
    fn unicode() {
        assert_eq!(test_identifier("ʘ").expect("Valid parse!").name(), "ʘ");
        assert_eq!(test_identifier("ξ").expect("Valid parse!").name(), "ξ");
        assert_eq!(test_identifier("café-au-lait").expect("Valid parse!").name(), "café");
        assert_eq!(
            test_identifier("a\u{200D}b").expect("Valid parse!").name(),
            "a\u{200D}b"
        );

        // Astral: two code units.
        let ident = test_identifier("\u{1D4D0}x").expect("Valid parse!");
        assert_eq!(ident.name(), "\u{1D4D0}x");
        assert_eq!(ident.span().len(), 3);
    }

    #[test]
    fn escapes() {
        let ident = test_identifier("\\u0061b\\u{63}").expect("Valid parse!");
        assert_eq!(ident.name(), "abc");
        assert!(ident.is_escaped());

        assert_eq!(
            test_identifier("\\u0031").unwrap_err().kind(),
            &ErrorKind::InvalidIdentifierEscape
        );
        assert_eq!(
            test_identifier("a\\u002D").unwrap_err().kind(),
            &ErrorKind::InvalidIdentifierEscape
        );
        assert_eq!(
            test_identifier("a\\x41").unwrap_err().kind(),
            &ErrorKind::InvalidUnicodeEscape
        );
        assert_eq!(
            test_identifier("\\uD800").unwrap_err().kind(),
            &ErrorKind::InvalidIdentifierEscape
        );
    }

    #[test]
    fn keywords() {
        assert_eq!(test_identifier("while").unwrap().token(), Token::WhileKeyword);
        assert_eq!(test_identifier("whiles").unwrap().token(), Token::Identifier);
        assert_eq!(test_identifier("yield").unwrap().token(), Token::YieldKeyword);
        assert_eq!(test_identifier("eval").unwrap().token(), Token::EvalKeyword);

        assert_eq!(
            test_identifier("wh\\u0069le").unwrap().token(),
            Token::EscapedReserved
        );
        assert_eq!(
            test_identifier("l\\u0065t").unwrap().token(),
            Token::EscapedFutureReserved
        );
        assert_eq!(
            test_identifier("\\u0061sync").unwrap().token(),
            Token::AsyncKeyword
        );
    }

    #[test]
    fn private_names() {
        let source = SourceFile::dummy_file("#secret;");
        let input = &mut source.stream();
        let private = PrivateName::lex(input, Context::empty()).expect("Valid parse!");
        assert_eq!(private.name().name(), "secret");
        assert_eq!(private.span().len(), 7);

        let source = SourceFile::dummy_file("# x");
        let err = PrivateName::lex(&mut source.stream(), Context::empty()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidPrivateName);
        assert_eq!(err.position().index, 1);
    }
}
