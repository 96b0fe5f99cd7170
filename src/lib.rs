//!
//! ## AvJS
//! > A child of the [AvdanOS](https://github.com/Avdan-OS) project.
//!
//! A scanner for [ECMAScript](https://tc39.es/ecma262/).
//!

pub mod common;
pub mod lexing;

pub use common::{file::SourceFile, Position, Source, Span, Spanned};
pub use lexing::{tokenize, Context, Lexeme, Scanner, Token, TokenValue};
