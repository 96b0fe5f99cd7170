//!
//! Things that help trace errors and tokens: [Span], [Loc] and [Position].
//!

use std::{
    fmt::{Display, Formatter},
    ops::{Add, Range},
};

///
/// Represents the index of a UTF-16 code unit in source code.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Loc(pub(crate) usize);

impl From<usize> for Loc {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl From<Loc> for usize {
    fn from(value: Loc) -> Self {
        value.0
    }
}

impl<A> Add<A> for Loc
where
    usize: Add<A, Output = usize>,
{
    type Output = Loc;

    fn add(self, rhs: A) -> Self::Output {
        Self(self.0 + rhs)
    }
}

///
/// Represents the location of a token in source code.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Span {
    ///
    /// Start index: inclusive lower bound.
    ///
    pub(crate) start: Loc,

    ///
    /// End index: exclusive upper bound.
    ///
    pub(crate) end: Loc,
}

impl Span {
    pub fn new(start: impl Into<Loc>, end: impl Into<Loc>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    ///
    /// An empty span at the very start of a source.
    ///
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Loc {
        self.start
    }

    pub fn end(&self) -> Loc {
        self.end
    }

    ///
    /// Length of this span, in code units.
    ///
    pub fn len(&self) -> usize {
        self.end.0.saturating_sub(self.start.0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    ///
    /// Return the start and end bounds as a Rust [Range]
    ///
    pub fn as_range(&self) -> Range<usize> {
        self.start.0..self.end.0
    }
}

impl From<Loc> for Span {
    fn from(value: Loc) -> Self {
        Self {
            start: value,
            end: value + 1,
        }
    }
}

///
/// Returns the span attached to this
/// object.
///
pub trait Spanned {
    ///
    /// Returns the span attached to this
    /// object.
    ///
    fn span(&self) -> Span;
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

impl Spanned for Loc {
    fn span(&self) -> Span {
        Span::from(*self)
    }
}

///
/// A point in the source, as the scanner sees it.
///
/// * `index` counts UTF-16 code units from the start of the source,
/// * `line` is 1-based,
/// * `column` is 0-based, and counts code points from the start of the line.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub index: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn loc(&self) -> Loc {
        Loc(self.index)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            index: 0,
            line: 1,
            column: 0,
        }
    }
}

///
/// Columns are only converted to 1-based for display.
///
impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column + 1)
    }
}

impl Spanned for Position {
    fn span(&self) -> Span {
        Span::from(self.loc())
    }
}
