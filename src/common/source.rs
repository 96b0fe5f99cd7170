//!
//! Sources of source code.
//!

use std::ops::Range;

use super::{Loc, Span, Spanned};
use crate::lexing::utils::SourceStream;

///
/// Generic idea of source code: could be a file,
/// or a simple string.
///
/// This trait aims to abstract the gathering of the source
/// text and focus on the Source -> Lexing -> Parser pipeline.
///
/// ECMAScript source text is a sequence of UTF-16 code units,
/// so that is what a [Source] hands out.
///
pub trait Source {
    ///
    /// A friendly appropriate format to point
    /// to a location of a token.
    ///
    /// This could be line-column information, or simply an index.
    ///
    type Location<'a>
    where
        Self: 'a;

    ///
    /// Find the location of this span,
    /// and put it into a friendly appropriate format.
    ///
    fn locate(&self, span: Span) -> Option<Self::Location<'_>>;

    ///
    /// Get the UTF-16 code units in this [Source].
    ///
    fn units(&self) -> &[u16];

    ///
    /// Returns the start and (exclusive) end index of this source.
    ///
    fn bounds(&self) -> Range<Loc> {
        Loc(0)..Loc(self.units().len())
    }

    ///
    /// Checks if a given [Span] is within bounds.
    ///
    fn in_bounds(&self, span: &Span) -> bool {
        span.start <= span.end && self.bounds().end >= span.end
    }

    ///
    /// Returns the source code at a given [Span], if within bounds.
    ///
    /// Lone surrogates are replaced with `U+FFFD`.
    ///
    fn source_at(&self, span: impl Spanned) -> Option<String> {
        let span = span.span();
        if self.in_bounds(&span) {
            return Some(String::from_utf16_lossy(&self.units()[span.as_range()]));
        }

        None
    }

    ///
    /// Create a stream from this source.
    ///
    fn stream(&self) -> SourceStream<Self>
    where
        Self: Sized,
    {
        SourceStream::new(self)
    }
}
