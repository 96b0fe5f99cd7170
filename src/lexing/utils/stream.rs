use crate::common::{Loc, Position, Source, Span, Spanned};

use super::unicode::{is_line_terminator, LF};

///
/// Things that [SourceStream] can
/// check are coming up.
///
pub trait Lookahead {
    fn upcoming<S: Source>(self, input: &SourceStream<S>) -> bool;
}

impl<'a> Lookahead for &'a str {
    fn upcoming<S: Source>(self, input: &SourceStream<S>) -> bool {
        let units = input.units();
        self.encode_utf16()
            .enumerate()
            .all(|(i, unit)| units.get(input.index + i) == Some(&unit))
    }
}

impl<F: Fn(&char) -> bool> Lookahead for F {
    fn upcoming<S: Source>(self, input: &SourceStream<S>) -> bool {
        input.peek().map(|ch| self(&ch)).unwrap_or(false)
    }
}

///
/// A cursor over the UTF-16 code units of a [Source],
/// tracking the index, line and column of the next unit to be read.
///
pub struct SourceStream<'a, S: Source> {
    source: &'a S,
    index: usize,
    line: u32,
    column: u32,

    ///
    /// Was the last consumed code point a `<CR>`?
    ///
    after_cr: bool,
}

impl<'a, S: Source> Clone for SourceStream<'a, S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            index: self.index,
            line: self.line,
            column: self.column,
            after_cr: self.after_cr,
        }
    }
}

///
/// Decode the code point starting at `index`, along with
/// how many code units it takes up.
///
/// Lone surrogates decode as `U+FFFD`, taking up one unit.
///
fn decode_at(units: &[u16], index: usize) -> Option<(char, usize)> {
    let lead = *units.get(index)?;
    match lead {
        0xD800..=0xDBFF => match units.get(index + 1) {
            Some(&trail) if (0xDC00..=0xDFFF).contains(&trail) => {
                let cp = 0x10000 + (((lead as u32) - 0xD800) << 10) + ((trail as u32) - 0xDC00);
                Some((char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER), 2))
            }
            _ => Some((char::REPLACEMENT_CHARACTER, 1)),
        },
        _ => Some((
            char::from_u32(lead as u32).unwrap_or(char::REPLACEMENT_CHARACTER),
            1,
        )),
    }
}

impl<'a, S: Source> SourceStream<'a, S> {
    ///
    /// Create a new stream from a source.
    ///
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            index: 0,
            line: 1,
            column: 0,
            after_cr: false,
        }
    }

    ///
    /// Returns the source where this [SourceStream]
    /// came from.
    ///
    pub fn source(&self) -> &'a S {
        self.source
    }

    pub fn units(&self) -> &'a [u16] {
        self.source.units()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    ///
    /// The position of the next code unit to be read.
    ///
    pub fn position(&self) -> Position {
        Position {
            index: self.index,
            line: self.line,
            column: self.column,
        }
    }

    pub fn at_end(&self) -> bool {
        self.index >= self.units().len()
    }

    ///
    /// Peeks at the next upcoming code point.
    ///
    pub fn peek(&self) -> Option<char> {
        decode_at(self.units(), self.index).map(|(ch, _)| ch)
    }

    ///
    /// Peeks at the code unit `offset` units ahead.
    ///
    pub fn peek_unit_at(&self, offset: usize) -> Option<u16> {
        self.units().get(self.index + offset).copied()
    }

    pub fn peek_unit(&self) -> Option<u16> {
        self.peek_unit_at(0)
    }

    ///
    /// Checks if a lookahead pattern is next in the stream.
    ///
    pub fn upcoming<L: Lookahead>(&self, lookahead: L) -> bool {
        lookahead.upcoming(self)
    }

    ///
    /// Consume one code point, taking both units of
    /// a surrogate pair at once.
    ///
    /// Line terminators move onto the next line,
    /// but `<LF>` directly after `<CR>` does not.
    ///
    pub fn advance(&mut self) -> Option<char> {
        let (ch, width) = decode_at(self.units(), self.index)?;
        self.index += width;

        if is_line_terminator(ch) {
            if !(ch == LF && self.after_cr) {
                self.line += 1;
            }

            self.column = 0;
            self.after_cr = ch == '\r';
        } else {
            self.column += 1;
            self.after_cr = false;
        }

        Some(ch)
    }

    ///
    /// Consume one code point, copying its code units into `buf`.
    ///
    pub fn advance_into(&mut self, buf: &mut Vec<u16>) -> Option<char> {
        let start = self.index;
        let ch = self.advance()?;
        buf.extend_from_slice(self.units().get(start..self.index).unwrap_or_default());
        Some(ch)
    }

    ///
    /// Consume one [LineTerminatorSequence](https://tc39.es/ecma262/#prod-LineTerminatorSequence),
    /// `<CR><LF>` included, returning whether one was there.
    ///
    pub fn consume_line_terminator(&mut self) -> bool {
        match self.peek() {
            Some('\r') => {
                self.advance();
                if self.peek() == Some(LF) {
                    self.advance();
                }
                true
            }
            Some(ch) if is_line_terminator(ch) => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    ///
    /// Consume the next code point only if it is `ch`.
    ///
    pub fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.advance();
            return true;
        }

        false
    }

    ///
    /// Take code points in this [SourceStream] whilst they
    /// satisfy some predicate.
    ///
    pub fn take_while(&mut self, pred: impl Fn(&char) -> bool) -> Span {
        let start = self.index;
        while self.upcoming(&pred) {
            self.advance();
        }

        Span::new(start, self.index)
    }

    ///
    /// The source text between `start` and the cursor.
    ///
    pub fn text_from(&self, start: usize) -> String {
        self.slice(Span::new(start, self.index))
    }

    pub fn slice(&self, span: impl Spanned) -> String {
        self.source.source_at(span).unwrap_or_default()
    }

    pub fn left(&self) -> String {
        String::from_utf16_lossy(self.units().get(self.index..).unwrap_or_default())
    }
}

impl<'a, S: Source> Spanned for SourceStream<'a, S> {
    fn span(&self) -> Span {
        Span::from(Loc(self.index))
    }
}
