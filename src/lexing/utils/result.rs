use thiserror::Error;

use crate::common::{Position, Source, Span, Spanned};

use super::SourceStream;

///
/// Everything that can go wrong whilst scanning.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated template literal")]
    UnterminatedTemplate,

    #[error("unterminated regular expression literal")]
    UnterminatedRegExp,

    #[error("unterminated block comment")]
    UnterminatedComment,

    #[error("invalid hexadecimal escape sequence")]
    InvalidHexEscape,

    #[error("invalid Unicode escape sequence")]
    InvalidUnicodeEscape,

    #[error("escape sequence does not form a valid identifier character")]
    InvalidIdentifierEscape,

    #[error("Unicode code point is out of range (max. U+10FFFF)")]
    CodePointOutOfRange,

    #[error("octal escape sequences are not allowed in strict mode")]
    OctalEscapeInStrict,

    #[error("octal escape sequences are not allowed in template literals")]
    OctalEscapeInTemplate,

    #[error("\\8 and \\9 are not allowed in strict mode or template literals")]
    InvalidEightOrNineEscape,

    #[error("illegal character {0:?}")]
    IllegalCharacter(char),

    #[error("duplicate regular expression flag {0:?}")]
    DuplicateRegExpFlag(char),

    #[error("unknown regular expression flag {0:?}")]
    UnknownRegExpFlag(char),

    #[error("invalid regular expression: {0}")]
    InvalidRegExp(String),

    #[error("HTML-like comments are only allowed in web-compatible scripts")]
    HtmlComment,

    #[error("numeric separators must sit between two digits")]
    NumericSeparator,

    #[error("expected digits")]
    MissingDigits,

    #[error("identifier starts immediately after numeric literal")]
    IdentifierAfterNumber,

    #[error("invalid BigInt literal")]
    InvalidBigInt,

    #[error("legacy octal literals are not allowed in strict mode")]
    LegacyOctalInStrict,

    #[error("invalid private name")]
    InvalidPrivateName,
}

///
/// An error, and the exact point in the source
/// where it was found.
///
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at {position}")]
pub struct LexError {
    kind: ErrorKind,
    position: Position,
}

impl LexError {
    pub fn new(kind: ErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

impl Spanned for LexError {
    fn span(&self) -> Span {
        self.position.span()
    }
}

impl<'a, S: Source> SourceStream<'a, S> {
    ///
    /// Make a new error at the stream's current location.
    ///
    pub fn error(&self, kind: ErrorKind) -> LexError {
        LexError::new(kind, self.position())
    }
}

///
/// The result of attempting to scan a token.
///
pub type LexResult<T> = Result<T, LexError>;
