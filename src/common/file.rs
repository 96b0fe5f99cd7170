//!
//! A source file.
//!

use std::fmt::Formatter;

use super::{Loc, Source, Span};

///
/// Line and column information for
/// a particular location in source code.
///
/// Follows the same convention as the scanner:
/// 1-based lines, 0-based columns counted in code points.
///
#[derive(Debug)]
pub struct LineColumn<'a> {
    pub file: &'a str,
    pub line: u32,
    pub column: u32,
}

///
/// Converting columns to 1-based only for display.
///
impl<'a> std::fmt::Display for LineColumn<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column + 1)
    }
}

///
/// Finds the starting code unit index of all
/// lines, using any [ECMAScript LineTerminatorSequence](https://tc39.es/ecma262/#sec-line-terminators)
/// to delimit lines.
///
fn line_starts(st: &[u16]) -> Vec<usize> {
    let mut v = vec![0];
    let mut i = 0;

    while i < st.len() {
        match st[i] {
            0x000A => v.push(i + 1), // <LF>
            0x2028 => v.push(i + 1), // <LS>
            0x2029 => v.push(i + 1), // <PS>
            0x000D => {
                if matches!(st.get(i + 1), Some(0x000A)) {
                    v.push(i + 2); // <CR><LF>
                    i += 1;
                } else {
                    v.push(i + 1); // <CR>
                }
            }
            _ => (),
        }

        i += 1;
    }

    v
}

///
/// A real source file.
///
/// Here, line-column information can be provided.
///
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: String,
    units: Vec<u16>,
    line_starts: Vec<usize>,
}

impl SourceFile {
    ///
    /// Make a source file from text already in memory.
    ///
    pub fn new(path: impl ToString, contents: &str) -> Self {
        Self::from_utf16(path, contents.encode_utf16().collect())
    }

    ///
    /// Make a source file straight from UTF-16 code units:
    /// these may contain lone surrogates.
    ///
    pub fn from_utf16(path: impl ToString, units: Vec<u16>) -> Self {
        let line_starts = line_starts(&units);

        Self {
            path: path.to_string(),
            units,
            line_starts,
        }
    }

    ///
    /// TESTING ONLY
    /// ***
    /// Create a dummy file with a fake path.
    ///
    #[cfg(test)]
    pub fn dummy_file(contents: &str) -> Self {
        Self::new("DUMMY.FILE", contents)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    ///
    /// Return the (1-based) line and (0-based) column information at a [Loc] in this file.
    ///
    fn line_col(&self, loc: Loc) -> Option<(u32, u32)> {
        // The last line start not after `loc` is the line `loc` sits on.
        let line = self.line_starts.partition_point(|&start| start <= loc.0);
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let column = char::decode_utf16(self.units.get(start..loc.0)?.iter().copied()).count();

        Some((line as u32, column as u32))
    }
}

impl Source for SourceFile {
    type Location<'a> = LineColumn<'a>
    where Self: 'a;

    fn locate(&self, span: Span) -> Option<Self::Location<'_>> {
        if self.in_bounds(&span) {
            let (line, column) = self.line_col(span.start)?;
            return Some(LineColumn {
                file: &self.path,
                line,
                column,
            });
        }

        None
    }

    fn units(&self) -> &[u16] {
        &self.units
    }
}

#[cfg(test)]
mod tests {
    use crate::common::{file::LineColumn, Source, Span};

    use super::{line_starts, SourceFile};

    fn utf16(st: &str) -> Vec<u16> {
        st.encode_utf16().collect()
    }

    #[test]
    fn lines() {
        assert_eq!(&line_starts(&utf16("ba\nb\nc"))[..], &[0, 3, 5]);

        assert_eq!(
            &line_starts(&utf16("babs\r\nbaaa\r__\u{2028}asagsgas\u{2029}a\nc\n"))[..],
            &[0, 6, 11, 14, 23, 25, 27]
        );
    }

    #[test]
    fn line_col() {
        let f = SourceFile::dummy_file("PEN\nPINEAPPLE\nAPPLE\nPEN");
        let ananas = Span::new(4, 13);
        assert_eq!(f.source_at(ananas), Some("PINEAPPLE".to_string()));
        assert!(matches!(
            f.locate(ananas),
            Some(LineColumn {
                line: 2,
                column: 0,
                ..
            })
        ));
    }

    #[test]
    fn astral_columns() {
        // U+1D4D0 takes two code units, but is a single column.
        let f = SourceFile::dummy_file("a\u{1D4D0}b");
        let b = Span::new(3, 4);
        assert_eq!(f.source_at(b), Some("b".to_string()));
        assert!(matches!(
            f.locate(b),
            Some(LineColumn {
                line: 1,
                column: 2,
                ..
            })
        ));
        assert_eq!(f.locate(b).unwrap().to_string(), "DUMMY.FILE:1:3");
    }
}
