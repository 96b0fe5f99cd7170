//!
//! Utilities for lexing.
//!

pub mod result;
pub mod stream;
pub mod unicode;

use crate::common::Source;

use super::Context;

pub use self::{
    result::{ErrorKind, LexError, LexResult},
    stream::SourceStream,
};

///
/// Operations on lexical tokens that can be
/// scanned on their own:
/// * Peeking,
/// * Lexing
///
pub trait Lex: Sized {
    ///
    /// Checks to see if this token is possibly upcoming.
    ///
    fn peek<S: Source>(input: &SourceStream<S>) -> bool;

    ///
    /// Given that the token is potentially present,
    /// start lexing.
    ///
    /// This function has guaranteed side-effects on the input [SourceStream] (advancing it).
    ///
    fn lex<S: Source>(input: &mut SourceStream<S>, context: Context) -> LexResult<Self>;
}
