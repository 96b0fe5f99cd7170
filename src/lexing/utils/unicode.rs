//!
//! Character classification.
//!
//! ASCII goes through lookup tables, everything else
//! goes through the Unicode general categories.
//!

use bitflags::bitflags;
use finl_unicode::categories::{CharacterCategories, MinorCategory};

use crate::lexing::tokens::Token;

pub const LF: char = '\n';
pub const CR: char = '\r';
pub const LS: char = '\u{2028}';
pub const PS: char = '\u{2029}';
pub const ZWNJ: char = '\u{200C}';
pub const ZWJ: char = '\u{200D}';
pub const ZWNBSP: char = '\u{FEFF}';

bitflags! {
    ///
    /// What an ASCII character can be used for.
    ///
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CharFlags: u8 {
        const DECIMAL = 1 << 0;
        const HEX = 1 << 1;
        const OCTAL = 1 << 2;
        const ID_START = 1 << 3;
        const ID_PART = 1 << 4;
        const WHITESPACE = 1 << 5;
        const LINE_TERMINATOR = 1 << 6;
    }
}

static ASCII_FLAGS: [CharFlags; 128] = {
    let mut table = [CharFlags::empty(); 128];

    let ident = CharFlags::ID_START.union(CharFlags::ID_PART);
    let mut i = 0;
    while i < 128 {
        let ch = i as u8;
        table[i] = match ch {
            b'0'..=b'7' => CharFlags::DECIMAL
                .union(CharFlags::HEX)
                .union(CharFlags::OCTAL)
                .union(CharFlags::ID_PART),
            b'8' | b'9' => CharFlags::DECIMAL
                .union(CharFlags::HEX)
                .union(CharFlags::ID_PART),
            b'a'..=b'f' | b'A'..=b'F' => ident.union(CharFlags::HEX),
            b'g'..=b'z' | b'G'..=b'Z' | b'$' | b'_' => ident,
            b'\t' | 0x0B | 0x0C | b' ' => CharFlags::WHITESPACE,
            b'\n' | b'\r' => CharFlags::LINE_TERMINATOR,
            _ => CharFlags::empty(),
        };
        i += 1;
    }

    table
};

///
/// Provisional token kind of every ASCII character,
/// so the scanner can dispatch on a single lookup.
///
static ASCII_TOKENS: [Token; 128] = {
    let mut table = [Token::Illegal; 128];

    let mut i = 0;
    while i < 128 {
        table[i] = match i as u8 {
            b'\t' | 0x0B | 0x0C | b' ' => Token::WhiteSpace,
            b'\n' => Token::LineFeed,
            b'\r' => Token::CarriageReturn,
            b'a'..=b'z' | b'A'..=b'Z' | b'$' | b'_' | b'\\' => Token::Identifier,
            b'0'..=b'9' => Token::NumericLiteral,
            b'"' | b'\'' => Token::StringLiteral,
            b'`' => Token::Template,
            b'#' => Token::PrivateField,
            b'@' => Token::Decorator,
            b'(' => Token::LeftParen,
            b')' => Token::RightParen,
            b'{' => Token::LeftBrace,
            b'}' => Token::RightBrace,
            b'[' => Token::LeftBracket,
            b']' => Token::RightBracket,
            b'?' => Token::QuestionMark,
            b':' => Token::Colon,
            b';' => Token::Semicolon,
            b',' => Token::Comma,
            b'~' => Token::Complement,
            b'.' => Token::Period,
            b'!' => Token::Negate,
            b'%' => Token::Modulo,
            b'=' => Token::Assign,
            b'*' => Token::Multiply,
            b'^' => Token::BitwiseXor,
            b'+' => Token::Add,
            b'-' => Token::Subtract,
            b'/' => Token::Divide,
            b'<' => Token::LessThan,
            b'>' => Token::GreaterThan,
            b'|' => Token::BitwiseOr,
            b'&' => Token::BitwiseAnd,
            _ => Token::Illegal,
        };
        i += 1;
    }

    table
};

///
/// The classification of a code unit, if it is ASCII.
///
pub fn ascii_flags(unit: u16) -> CharFlags {
    ASCII_FLAGS
        .get(unit as usize)
        .copied()
        .unwrap_or(CharFlags::empty())
}

///
/// The provisional token of a code unit, if it is ASCII.
///
pub fn provisional_token(unit: u16) -> Option<Token> {
    ASCII_TOKENS.get(unit as usize).copied()
}

pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, LF | CR | LS | PS)
}

///
/// [WhiteSpace](https://tc39.es/ecma262/#prod-WhiteSpace),
/// not including line terminators.
///
pub fn is_whitespace(ch: char) -> bool {
    matches!(ch, '\t' | '\u{000B}' | '\u{000C}' | ' ' | '\u{00A0}' | ZWNBSP)
        || (!ch.is_ascii() && matches!(ch.get_minor_category(), MinorCategory::Zs))
}

pub fn is_decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

///
/// Code points with the `Other_ID_Start` property.
///
fn is_other_id_start(ch: char) -> bool {
    matches!(
        ch,
        '\u{1885}' | '\u{1886}' | '\u{2118}' | '\u{212E}' | '\u{309B}' | '\u{309C}'
    )
}

///
/// Code points with the `Other_ID_Continue` property.
///
fn is_other_id_continue(ch: char) -> bool {
    matches!(
        ch,
        '\u{00B7}' | '\u{0387}' | '\u{1369}'..='\u{1371}' | '\u{19DA}'
    )
}

///
/// [IdentifierStartChar](https://tc39.es/ecma262/#prod-IdentifierStartChar):
/// `ID_Start`, `$` and `_`.
///
pub fn is_id_start(ch: char) -> bool {
    if ch.is_ascii() {
        return ascii_flags(ch as u16).contains(CharFlags::ID_START);
    }

    use MinorCategory::*;
    matches!(ch.get_minor_category(), Lu | Ll | Lt | Lm | Lo | Nl) || is_other_id_start(ch)
}

///
/// [IdentifierPartChar](https://tc39.es/ecma262/#prod-IdentifierPartChar):
/// `ID_Continue`, `$`, `<ZWNJ>` and `<ZWJ>`.
///
pub fn is_id_continue(ch: char) -> bool {
    if ch.is_ascii() {
        return ascii_flags(ch as u16).contains(CharFlags::ID_PART);
    }

    use MinorCategory::*;
    matches!(ch, ZWNJ | ZWJ)
        || is_id_start(ch)
        || is_other_id_continue(ch)
        || matches!(ch.get_minor_category(), Mn | Mc | Nd | Pc)
}
