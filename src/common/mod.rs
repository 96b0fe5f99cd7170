//!
//! Common utilities across lexing and the parser that drives it.
//!

pub mod file;
pub mod location;
pub mod source;

pub use file::*;
pub use location::*;
pub use source::*;
