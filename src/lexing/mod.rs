//!
//! The process of lexing involves converting [char]s
//! from source code into lexical tokens according to
//! the [lexical grammar](https://tc39.es/ecma262/#sec-ecmascript-language-lexical-grammar)
//! of ECMAScript.
//!
//! Which token comes next can depend on where the parser is
//! (is `/` a division or a regular expression?), so the [Scanner]
//! is driven one token at a time, with a [Context] each time.
//!

pub mod context;
pub mod regexp;
pub mod scanner;
pub mod tokens;
pub mod utils;

use avjs_macros::Spanned;

use crate::common::{Position, Source, Span};

pub use self::{
    context::Context,
    regexp::{HostRegExp, RegExpFlags, RegExpValidator},
    scanner::{Checkpoint, Scanner, TokenValue},
    tokens::{keyword, Token, TokenFlags, TokenKind},
    utils::{ErrorKind, LexError, LexResult},
};

///
/// A scanned token, along with everything the scanner knew about it.
///
#[derive(Debug, Clone, PartialEq, Spanned)]
pub struct Lexeme {
    pub token: Token,
    pub span: Span,
    pub start: Position,
    pub value: TokenValue,
    pub newline_before: bool,
}

///
/// Could a `{` after `previous` open a block, rather than an object literal?
///
/// This is a guess from one token of lookbehind. A block after
/// a label (`a: {}`) is still taken as an object literal.
///
fn opens_block(previous: Option<Token>) -> bool {
    matches!(
        previous,
        None | Some(
            Token::Semicolon
                | Token::LeftBrace
                | Token::RightBrace
                | Token::RightParen
                | Token::Arrow
                | Token::ElseKeyword
                | Token::DoKeyword
                | Token::TryKeyword
                | Token::FinallyKeyword
        )
    )
}

///
/// Scan a whole source, without a parser.
///
/// A `/` is taken as the start of a regular expression
/// wherever the previous token allows one. After a `}`, that
/// depends on whether its `{` looked like it opened a block.
/// Template substitutions are scanned as untagged.
///
pub fn tokenize<S: Source>(source: &S, context: Context) -> LexResult<Vec<Lexeme>> {
    let mut scanner = Scanner::new(source);
    let mut lexemes: Vec<Lexeme> = vec![];
    let mut braces = vec![];
    let mut allow_regex = true;

    loop {
        let context = match allow_regex {
            true => context | Context::ALLOW_REGEX,
            false => context - Context::ALLOW_REGEX,
        };

        let token = scanner.next_token(context)?;
        allow_regex = match token {
            Token::EndOfSource => return Ok(lexemes),
            Token::LeftBrace => {
                braces.push(opens_block(lexemes.last().map(|lexeme| lexeme.token)));
                true
            }
            Token::RightBrace => braces.pop().unwrap_or(true),
            _ => token.allows_regex_after(),
        };

        lexemes.push(scanner.lexeme());
    }
}
