//!
//! Context flags, passed in by the parser on every scan.
//!

use bitflags::bitflags;

bitflags! {
    ///
    /// Where in the grammar the scanner has been asked for the next token.
    ///
    /// The scanner only reads these: it is up to the parser
    /// to pass the right ones for each position.
    ///
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Context: u8 {
        ///
        /// A `/` here starts a regular expression literal, not a division.
        ///
        const ALLOW_REGEX = 1 << 0;

        ///
        /// Scanning module code: HTML-like comments are not recognised.
        ///
        const MODULE = 1 << 1;

        ///
        /// [Annex B](https://tc39.es/ecma262/#sec-additional-ecmascript-features-for-web-browsers)
        /// extensions are on.
        ///
        const WEB_COMPAT = 1 << 2;

        ///
        /// Scanning the quasis of a tagged template: bad escapes
        /// give no cooked value instead of failing.
        ///
        const TAGGED_TEMPLATE = 1 << 3;

        ///
        /// Keep the raw source text of each token.
        ///
        const RAW = 1 << 4;

        ///
        /// Strict mode code.
        ///
        const STRICT = 1 << 5;
    }
}

impl Context {
    ///
    /// A plain (sloppy mode, web compatible) script.
    ///
    pub fn script() -> Self {
        Self::WEB_COMPAT
    }

    ///
    /// Module code, which is always strict.
    ///
    pub fn module() -> Self {
        Self::MODULE | Self::STRICT
    }
}
