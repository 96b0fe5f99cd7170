//!
//! ## Escape Codes
//!
//! Technically not tokens.
//! These are shared between strings, templates and identifiers.
//!

use avjs_macros::ECMARef;

use crate::{
    common::Source,
    lexing::{
        utils::{
            unicode::{is_decimal_digit, is_line_terminator},
            ErrorKind, LexResult, SourceStream,
        },
        Context,
    },
};

///
/// The UTF-16 code units a piece of source
/// stands for, once decoded.
///
pub trait CharacterValue {
    fn cv<'b>(&self, buf: &'b mut [u16; 2]) -> &'b [u16];
}

impl CharacterValue for char {
    fn cv<'b>(&self, buf: &'b mut [u16; 2]) -> &'b [u16] {
        self.encode_utf16(buf)
    }
}

///
/// Where an escape sequence is being read.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapePlace {
    String,
    Template,
}

impl EscapePlace {
    fn unterminated(self) -> ErrorKind {
        match self {
            EscapePlace::String => ErrorKind::UnterminatedString,
            EscapePlace::Template => ErrorKind::UnterminatedTemplate,
        }
    }
}

///
/// Any valid ECMAScript escape sequence:
///
/// ```javascript
/// '\n'        // Escaped character
/// '\y'        // Non-escaped character
/// '\0'        // Null character
/// '\x1A'      // Hex code escape
/// '\u0A1B'    // Unicode escape
/// '\u{1F600}' // Code point escape
/// '\101'      // Legacy octal escape (Annex B)
/// ```
///
#[ECMARef("EscapeSequence", "https://tc39.es/ecma262/#prod-EscapeSequence")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeSequence {
    Character(char),
    Null,
    Hex(u8),

    ///
    /// Either a single code unit (`\uXXXX`, possibly half a surrogate pair),
    /// or a whole code point (`\u{...}`).
    ///
    Unicode(u32),
    LegacyOctal(u8),

    ///
    /// A backslash before a line terminator, which stands for nothing.
    ///
    LineContinuation,
}

impl CharacterValue for EscapeSequence {
    fn cv<'b>(&self, buf: &'b mut [u16; 2]) -> &'b [u16] {
        match *self {
            EscapeSequence::Character(ch) => ch.encode_utf16(buf),
            EscapeSequence::Null => {
                buf[0] = 0;
                &buf[..1]
            }
            EscapeSequence::Hex(byte) | EscapeSequence::LegacyOctal(byte) => {
                buf[0] = byte as u16;
                &buf[..1]
            }
            EscapeSequence::Unicode(cp) if cp <= 0xFFFF => {
                buf[0] = cp as u16;
                &buf[..1]
            }
            EscapeSequence::Unicode(cp) => {
                let cp = cp - 0x10000;
                buf[0] = 0xD800 + (cp >> 10) as u16;
                buf[1] = 0xDC00 + (cp & 0x3FF) as u16;
                &buf[..]
            }
            EscapeSequence::LineContinuation => &buf[..0],
        }
    }
}

fn hex_digit<S: Source>(input: &SourceStream<S>) -> Option<u32> {
    input.peek().and_then(|ch| ch.to_digit(16))
}

fn octal_digit<S: Source>(input: &SourceStream<S>) -> Option<u8> {
    input
        .peek()
        .and_then(|ch| ch.to_digit(8))
        .map(|digit| digit as u8)
}

///
/// The rest of a unicode escape, after the `\u`:
/// either `XXXX` or `{X...}`.
///
#[ECMARef(
    "UnicodeEscapeSequence",
    "https://tc39.es/ecma262/#prod-UnicodeEscapeSequence"
)]
pub fn lex_unicode_escape<S: Source>(input: &mut SourceStream<S>) -> LexResult<u32> {
    if input.eat('{') {
        let mut cp: u32 = 0;
        let mut digits = 0;
        while let Some(digit) = hex_digit(input) {
            cp = (cp * 16 + digit).min(0x110000);
            digits += 1;
            input.advance();
        }

        if digits == 0 || !input.upcoming("}") {
            return Err(input.error(ErrorKind::InvalidUnicodeEscape));
        }

        if cp > 0x10FFFF {
            return Err(input.error(ErrorKind::CodePointOutOfRange));
        }

        input.advance();
        return Ok(cp);
    }

    let mut unit = 0;
    for _ in 0..4 {
        let digit = hex_digit(input).ok_or_else(|| input.error(ErrorKind::InvalidUnicodeEscape))?;
        unit = unit * 16 + digit;
        input.advance();
    }

    Ok(unit)
}

impl EscapeSequence {
    ///
    /// Scan an escape sequence, starting at its backslash.
    ///
    pub fn lex<S: Source>(
        input: &mut SourceStream<S>,
        context: Context,
        place: EscapePlace,
    ) -> LexResult<Self> {
        input.advance();

        let Some(ch) = input.peek() else {
            return Err(input.error(place.unterminated()));
        };

        if is_line_terminator(ch) {
            input.consume_line_terminator();
            return Ok(Self::LineContinuation);
        }

        let strict = context.contains(Context::STRICT);
        let escape = match ch {
            'b' => Self::Character('\u{0008}'),
            't' => Self::Character('\t'),
            'n' => Self::Character('\n'),
            'v' => Self::Character('\u{000B}'),
            'f' => Self::Character('\u{000C}'),
            'r' => Self::Character('\r'),
            'x' => {
                input.advance();
                let mut byte = 0;
                for _ in 0..2 {
                    let digit =
                        hex_digit(input).ok_or_else(|| input.error(ErrorKind::InvalidHexEscape))?;
                    byte = byte * 16 + digit as u8;
                    input.advance();
                }

                return Ok(Self::Hex(byte));
            }
            'u' => {
                input.advance();
                return lex_unicode_escape(input).map(Self::Unicode);
            }
            '0' if !input
                .peek_unit_at(1)
                .map(|unit| unit < 0x80 && is_decimal_digit(unit as u8 as char))
                .unwrap_or(false) =>
            {
                Self::Null
            }
            '0'..='7' => {
                if place == EscapePlace::Template {
                    return Err(input.error(ErrorKind::OctalEscapeInTemplate));
                }

                if strict {
                    return Err(input.error(ErrorKind::OctalEscapeInStrict));
                }

                return Ok(Self::LegacyOctal(lex_legacy_octal(input)));
            }
            '8' | '9' => {
                if place == EscapePlace::Template || strict {
                    return Err(input.error(ErrorKind::InvalidEightOrNineEscape));
                }

                Self::Character(ch)
            }
            ch => Self::Character(ch),
        };

        input.advance();
        Ok(escape)
    }
}

///
/// `\0` to `\377`: at most three digits, and
/// at most two unless the first one is `0` to `3`.
///
#[ECMARef(
    "LegacyOctalEscapeSequence",
    "https://tc39.es/ecma262/#prod-annexB-LegacyOctalEscapeSequence"
)]
fn lex_legacy_octal<S: Source>(input: &mut SourceStream<S>) -> u8 {
    let mut value = 0;
    let max_digits = match octal_digit(input) {
        Some(0..=3) => 3,
        _ => 2,
    };

    for _ in 0..max_digits {
        let Some(digit) = octal_digit(input) else {
            break;
        };

        value = value * 8 + digit;
        input.advance();
    }

    value
}

#[cfg(test)]
mod tests {
    use crate::{
        common::{file::SourceFile, Source},
        lexing::{utils::ErrorKind, Context},
    };

    use super::{CharacterValue, EscapePlace, EscapeSequence};

    fn escape(text: &str, context: Context, place: EscapePlace) -> Result<(Vec<u16>, String), ErrorKind> {
        let source = SourceFile::dummy_file(text);
        let input = &mut source.stream();
        let escape = EscapeSequence::lex(input, context, place).map_err(|err| err.kind().clone())?;
        let mut buf = [0; 2];
        Ok((escape.cv(&mut buf).to_vec(), input.left()))
    }

    fn string(text: &str) -> Result<(Vec<u16>, String), ErrorKind> {
        escape(text, Context::empty(), EscapePlace::String)
    }

    #[test]
    fn single_characters() {
        assert_eq!(string("\\n"), Ok((vec![0x0A], String::new())));
        assert_eq!(string("\\v!"), Ok((vec![0x0B], "!".to_string())));
        assert_eq!(string("\\'"), Ok((vec![0x27], String::new())));
        assert_eq!(string("\\y"), Ok((vec![b'y' as u16], String::new())));
        assert_eq!(string("\\0"), Ok((vec![0], String::new())));
    }

    #[test]
    fn hex_and_unicode() {
        assert_eq!(string("\\x41z"), Ok((vec![0x41], "z".to_string())));
        assert_eq!(string("\\u00e9"), Ok((vec![0xE9], String::new())));
        assert_eq!(string("\\uD83D"), Ok((vec![0xD83D], String::new())));
        assert_eq!(string("\\u{1F600}"), Ok((vec![0xD83D, 0xDE00], String::new())));
        assert_eq!(string("\\u{000000041}"), Ok((vec![0x41], String::new())));

        assert_eq!(string("\\x4"), Err(ErrorKind::InvalidHexEscape));
        assert_eq!(string("\\u12"), Err(ErrorKind::InvalidUnicodeEscape));
        assert_eq!(string("\\u{}"), Err(ErrorKind::InvalidUnicodeEscape));
        assert_eq!(string("\\u{41"), Err(ErrorKind::InvalidUnicodeEscape));
        assert_eq!(string("\\u{110000}"), Err(ErrorKind::CodePointOutOfRange));
    }

    #[test]
    fn line_continuation() {
        assert_eq!(string("\\\r\nx"), Ok((vec![], "x".to_string())));
        assert_eq!(string("\\\u{2028}x"), Ok((vec![], "x".to_string())));
    }

    #[test]
    fn legacy_octal() {
        assert_eq!(string("\\101"), Ok((vec![0o101], String::new())));
        assert_eq!(string("\\3777"), Ok((vec![0o377], "7".to_string())));
        assert_eq!(string("\\477"), Ok((vec![0o47], "7".to_string())));
        assert_eq!(string("\\08"), Ok((vec![0], "8".to_string())));
        assert_eq!(string("\\8"), Ok((vec![b'8' as u16], String::new())));

        assert_eq!(
            escape("\\101", Context::STRICT, EscapePlace::String),
            Err(ErrorKind::OctalEscapeInStrict)
        );
        assert_eq!(
            escape("\\9", Context::STRICT, EscapePlace::String),
            Err(ErrorKind::InvalidEightOrNineEscape)
        );
        assert_eq!(
            escape("\\1", Context::empty(), EscapePlace::Template),
            Err(ErrorKind::OctalEscapeInTemplate)
        );
        assert_eq!(
            escape("\\0", Context::STRICT, EscapePlace::Template).map(|(units, _)| units),
            Ok(vec![0])
        );
    }

    #[test]
    fn unterminated() {
        assert_eq!(string("\\"), Err(ErrorKind::UnterminatedString));
        assert_eq!(
            escape("\\", Context::empty(), EscapePlace::Template),
            Err(ErrorKind::UnterminatedTemplate)
        );
    }
}
