//!
//! ## Number literals
//!
//! Decimal, binary, octal and hexadecimal numbers,
//! their BigInt forms, and the legacy octal forms of Annex B.
//!

use avjs_macros::{ECMARef, Spanned};

use crate::{
    common::{Position, Source, Span},
    lexing::{
        utils::{unicode::is_id_start, ErrorKind, Lex, LexError, LexResult, SourceStream},
        Context,
    },
};

use super::Token;

///
/// The value of a numeric literal.
///
#[derive(Debug, Clone, PartialEq)]
pub enum NumericValue {
    Number(f64),

    ///
    /// The digits of a BigInt (radix prefix included, separators and `n` not).
    ///
    BigInt(String),
}

#[ECMARef(
    "NumericLiteral",
    "https://tc39.es/ecma262/#sec-literals-numeric-literals"
)]
#[derive(Debug, Clone, Spanned)]
pub struct NumericLiteral {
    span: Span,
    value: NumericValue,
}

impl NumericLiteral {
    pub fn value(&self) -> &NumericValue {
        &self.value
    }

    pub fn into_value(self) -> NumericValue {
        self.value
    }

    pub fn token(&self) -> Token {
        match self.value {
            NumericValue::Number(_) => Token::NumericLiteral,
            NumericValue::BigInt(_) => Token::BigIntLiteral,
        }
    }
}

///
/// Scan digits of some `radix` into `digits`, allowing
/// numeric separators only between two digits.
///
/// Returns how many digits there were.
///
fn lex_digits<S: Source>(
    input: &mut SourceStream<S>,
    radix: u32,
    separators: bool,
    digits: &mut String,
) -> LexResult<usize> {
    let mut count = 0;
    let mut separator: Option<Position> = None;

    loop {
        match input.peek() {
            Some('_') if separators => {
                if count == 0 || separator.is_some() {
                    return Err(input.error(ErrorKind::NumericSeparator));
                }

                separator = Some(input.position());
                input.advance();
            }
            Some(ch) if ch.is_digit(radix) => {
                digits.push(ch);
                count += 1;
                separator = None;
                input.advance();
            }
            _ => break,
        }
    }

    match separator {
        Some(position) => Err(LexError::new(ErrorKind::NumericSeparator, position)),
        None => Ok(count),
    }
}

fn radix_value(digits: &str, radix: u32) -> f64 {
    digits
        .chars()
        .filter_map(|ch| ch.to_digit(radix))
        .fold(0.0, |acc, digit| acc * radix as f64 + digit as f64)
}

impl NumericLiteral {
    ///
    /// `0x...`, `0o...` or `0b...`
    ///
    fn lex_radix<S: Source>(input: &mut SourceStream<S>, radix: u32) -> LexResult<NumericValue> {
        let start = input.index();
        input.advance();
        input.advance();

        let mut digits = String::new();
        if lex_digits(input, radix, true, &mut digits)? == 0 {
            return Err(input.error(ErrorKind::MissingDigits));
        }

        if input.eat('n') {
            let prefix = input.slice(Span::new(start, start + 2));
            return Ok(NumericValue::BigInt(format!("{prefix}{digits}")));
        }

        Ok(NumericValue::Number(radix_value(&digits, radix)))
    }

    ///
    /// A `0` followed by more digits: octal if they
    /// all are octal digits, otherwise decimal.
    ///
    #[ECMARef(
        "LegacyOctalIntegerLiteral",
        "https://tc39.es/ecma262/#prod-annexB-LegacyOctalIntegerLiteral"
    )]
    fn lex_legacy<S: Source>(
        input: &mut SourceStream<S>,
        context: Context,
        start: Position,
    ) -> LexResult<NumericValue> {
        if context.contains(Context::STRICT) {
            return Err(LexError::new(ErrorKind::LegacyOctalInStrict, start));
        }

        let mut digits = String::new();
        lex_digits(input, 10, false, &mut digits)?;
        if input.upcoming("_") {
            return Err(input.error(ErrorKind::NumericSeparator));
        }

        if digits.chars().all(|ch| ch.is_digit(8)) {
            if input.upcoming("n") {
                return Err(input.error(ErrorKind::InvalidBigInt));
            }

            return Ok(NumericValue::Number(radix_value(&digits, 8)));
        }

        Self::lex_decimal_tail(input, false, digits)
    }

    ///
    /// Fraction and exponent of a decimal literal,
    /// whose integer digits have already been read.
    ///
    fn lex_decimal_tail<S: Source>(
        input: &mut SourceStream<S>,
        separators: bool,
        mut text: String,
    ) -> LexResult<NumericValue> {
        let mut integer = true;

        if input.eat('.') {
            integer = false;
            text.push('.');
            lex_digits(input, 10, separators, &mut text)?;
        }

        if let Some(e @ ('e' | 'E')) = input.peek() {
            integer = false;
            input.advance();
            text.push(e);

            if let Some(sign @ ('+' | '-')) = input.peek() {
                input.advance();
                text.push(sign);
            }

            if lex_digits(input, 10, separators, &mut text)? == 0 {
                return Err(input.error(ErrorKind::MissingDigits));
            }
        }

        if input.upcoming("n") {
            if !integer || !separators {
                return Err(input.error(ErrorKind::InvalidBigInt));
            }

            input.advance();
            return Ok(NumericValue::BigInt(text));
        }

        text.parse()
            .map(NumericValue::Number)
            .map_err(|_| input.error(ErrorKind::MissingDigits))
    }
}

impl Lex for NumericLiteral {
    fn peek<S: Source>(input: &SourceStream<S>) -> bool {
        let digit = |unit: Option<u16>| matches!(unit, Some(0x30..=0x39));
        digit(input.peek_unit())
            || (input.upcoming(".") && digit(input.peek_unit_at(1)))
    }

    fn lex<S: Source>(input: &mut SourceStream<S>, context: Context) -> LexResult<Self> {
        let start = input.position();

        let next = input
            .peek_unit_at(1)
            .filter(|unit| *unit < 0x80)
            .map(|unit| unit as u8);

        let value = match (input.peek(), next) {
            (Some('0'), Some(b'x' | b'X')) => Self::lex_radix(input, 16)?,
            (Some('0'), Some(b'o' | b'O')) => Self::lex_radix(input, 8)?,
            (Some('0'), Some(b'b' | b'B')) => Self::lex_radix(input, 2)?,
            (Some('0'), Some(b'0'..=b'9')) => {
                input.advance();
                Self::lex_legacy(input, context, start)?
            }
            (Some('0'), Some(b'_')) => {
                input.advance();
                return Err(input.error(ErrorKind::NumericSeparator));
            }
            (Some('.'), _) => Self::lex_decimal_tail(input, true, String::new())?,
            _ => {
                let mut text = String::new();
                lex_digits(input, 10, true, &mut text)?;
                Self::lex_decimal_tail(input, true, text)?
            }
        };

        if let Some(ch) = input.peek() {
            if ch == '\\' || ch.is_ascii_digit() || is_id_start(ch) {
                return Err(input.error(ErrorKind::IdentifierAfterNumber));
            }
        }

        Ok(Self {
            span: Span::new(start.index, input.index()),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        common::{file::SourceFile, Source, Spanned},
        lexing::{
            tokens::Token,
            utils::{ErrorKind, Lex},
            Context,
        },
    };

    use super::{NumericLiteral, NumericValue};

    fn number_in(text: &str, context: Context) -> Result<NumericValue, ErrorKind> {
        let source = SourceFile::dummy_file(text);
        NumericLiteral::lex(&mut source.stream(), context)
            .map(NumericLiteral::into_value)
            .map_err(|err| err.kind().clone())
    }

    fn number(text: &str) -> Result<NumericValue, ErrorKind> {
        number_in(text, Context::empty())
    }

    fn float(value: f64) -> Result<NumericValue, ErrorKind> {
        Ok(NumericValue::Number(value))
    }

    fn bigint(digits: &str) -> Result<NumericValue, ErrorKind> {
        Ok(NumericValue::BigInt(digits.to_string()))
    }

    #[test]
    fn decimal() {
        assert_eq!(number("0"), float(0.0));
        assert_eq!(number("42"), float(42.0));
        assert_eq!(number("3.25"), float(3.25));
        assert_eq!(number(".5e-3"), float(0.0005));
        assert_eq!(number("5."), float(5.0));
        assert_eq!(number("1E+3"), float(1000.0));
        assert_eq!(number("1_000_000"), float(1_000_000.0));
        assert_eq!(number("1_0.0_1e1_0"), float(10.01e10));
    }

    #[test]
    fn radix() {
        assert_eq!(number("0x1F"), float(31.0));
        assert_eq!(number("0XfF"), float(255.0));
        assert_eq!(number("0o17"), float(15.0));
        assert_eq!(number("0b101"), float(5.0));
        assert_eq!(number("0b1_0"), float(2.0));

        assert_eq!(number("0x"), Err(ErrorKind::MissingDigits));
        assert_eq!(number("0b12"), Err(ErrorKind::IdentifierAfterNumber));
        assert_eq!(number("0xg"), Err(ErrorKind::MissingDigits));
    }

    #[test]
    fn bigints() {
        assert_eq!(number("0n"), bigint("0"));
        assert_eq!(number("123n"), bigint("123"));
        assert_eq!(number("1_0n"), bigint("10"));
        assert_eq!(number("0x1F_FFn"), bigint("0x1FFF"));

        assert_eq!(number("1.5n"), Err(ErrorKind::InvalidBigInt));
        assert_eq!(number("1e3n"), Err(ErrorKind::InvalidBigInt));
        assert_eq!(number("017n"), Err(ErrorKind::InvalidBigInt));
        assert_eq!(number("08n"), Err(ErrorKind::InvalidBigInt));

        let source = SourceFile::dummy_file("99n;");
        let literal = NumericLiteral::lex(&mut source.stream(), Context::empty()).unwrap();
        assert_eq!(literal.token(), Token::BigIntLiteral);
        assert_eq!(literal.span().len(), 3);
    }

    #[test]
    fn legacy_octal() {
        assert_eq!(number("017"), float(15.0));
        assert_eq!(number("08"), float(8.0));
        assert_eq!(number("019.5"), float(19.5));
        assert_eq!(number_in("017", Context::STRICT), Err(ErrorKind::LegacyOctalInStrict));
        assert_eq!(number_in("08", Context::STRICT), Err(ErrorKind::LegacyOctalInStrict));
        assert_eq!(number("01_7"), Err(ErrorKind::NumericSeparator));
    }

    #[test]
    fn separators() {
        assert_eq!(number("1__0"), Err(ErrorKind::NumericSeparator));
        assert_eq!(number("1_"), Err(ErrorKind::NumericSeparator));
        assert_eq!(number("0_1"), Err(ErrorKind::NumericSeparator));
        assert_eq!(number("1._5"), Err(ErrorKind::NumericSeparator));
        assert_eq!(number("0x_1"), Err(ErrorKind::NumericSeparator));

        let source = SourceFile::dummy_file("1_;");
        let err = NumericLiteral::lex(&mut source.stream(), Context::empty()).unwrap_err();
        assert_eq!(err.position().index, 1);
    }

    #[test]
    fn identifier_after() {
        assert_eq!(number("3in"), Err(ErrorKind::IdentifierAfterNumber));
        assert_eq!(number("1\\u0061"), Err(ErrorKind::IdentifierAfterNumber));
        assert_eq!(number("1e"), Err(ErrorKind::MissingDigits));
        assert_eq!(number("1.x"), Err(ErrorKind::IdentifierAfterNumber));
    }
}
