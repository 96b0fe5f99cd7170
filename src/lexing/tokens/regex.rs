//!
//! ## Regular expression literals
//!

use avjs_macros::{ECMARef, Spanned};
use bitflags::bitflags;
use regress::Regex;
use tracing::debug;

use crate::{
    common::{Source, Span},
    lexing::{
        regexp::{HostRegExp, RegExpFlags, RegExpValidator},
        utils::{
            unicode::{is_id_continue, is_line_terminator},
            ErrorKind, LexError, LexResult, SourceStream,
        },
    },
};

bitflags! {
    ///
    /// Where in the body of a regular expression we are.
    ///
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BodyState: u8 {
        ///
        /// The last character was an unescaped `\`.
        ///
        const ESCAPE = 1 << 0;

        ///
        /// Inside a character class `[...]`.
        ///
        const CLASS = 1 << 1;
    }
}

///
/// ```js
/// /pattern/flags
/// ```
///
#[ECMARef(
    "RegularExpressionLiteral",
    "https://tc39.es/ecma262/#sec-literals-regular-expression-literals"
)]
#[derive(Debug, Clone, PartialEq, Spanned)]
pub struct RegExpLiteral {
    span: Span,
    pattern: String,
    flags: RegExpFlags,
    flag_text: String,

    ///
    /// Did the pattern build with its flags?
    /// It always builds without them.
    ///
    validated: bool,
}

impl RegExpLiteral {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> RegExpFlags {
        self.flags
    }

    ///
    /// The flags as written in the source.
    ///
    pub fn flag_text(&self) -> &str {
        &self.flag_text
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    ///
    /// Build this literal with the [HostRegExp] engine.
    ///
    pub fn compile(&self) -> Result<Regex, regress::Error> {
        HostRegExp::compile(&self.pattern, self.flags)
    }

    ///
    /// Scan a regular expression literal, starting at its opening `/`.
    ///
    /// Duplicate and unknown flags don't stop the scan: they are
    /// pushed onto `errors`, and the literal is left unvalidated.
    ///
    pub fn lex<S: Source>(
        input: &mut SourceStream<S>,
        validator: &dyn RegExpValidator,
        errors: &mut Vec<LexError>,
    ) -> LexResult<Self> {
        let start = input.position();
        input.advance();

        let body = input.index();
        let mut state = BodyState::empty();
        loop {
            let ch = match input.peek() {
                Some(ch) if !is_line_terminator(ch) => ch,
                _ => return Err(LexError::new(ErrorKind::UnterminatedRegExp, start)),
            };

            if state.contains(BodyState::ESCAPE) {
                state.remove(BodyState::ESCAPE);
            } else {
                match ch {
                    '\\' => state.insert(BodyState::ESCAPE),
                    '[' => state.insert(BodyState::CLASS),
                    ']' => state &= BodyState::ESCAPE,
                    '/' if !state.contains(BodyState::CLASS) => break,
                    _ => (),
                }
            }

            input.advance();
        }

        let pattern = input.text_from(body);
        input.advance();

        let reported = errors.len();
        let flag_start = input.index();
        let mut flags = RegExpFlags::empty();
        while let Some(ch) = input.peek().filter(|ch| *ch == '\\' || is_id_continue(*ch)) {
            let position = input.position();
            input.advance();

            match RegExpFlags::from_char(ch) {
                Some(flag) if flags.contains(flag) => {
                    errors.push(LexError::new(ErrorKind::DuplicateRegExpFlag(ch), position))
                }
                Some(flag) => flags |= flag,
                None => errors.push(LexError::new(ErrorKind::UnknownRegExpFlag(ch), position)),
            }
        }

        let flag_text = input.text_from(flag_start);

        let validated = match errors.len() == reported {
            true => Self::validate(validator, &pattern, flags)
                .map_err(|err| LexError::new(err, start))?,
            false => false,
        };

        Ok(Self {
            span: Span::new(start.index, input.index()),
            pattern,
            flags,
            flag_text,
            validated,
        })
    }

    ///
    /// The pattern has to be valid on its own, but if it
    /// fails only with its flags, it is still accepted.
    ///
    fn validate(
        validator: &dyn RegExpValidator,
        pattern: &str,
        flags: RegExpFlags,
    ) -> Result<bool, ErrorKind> {
        validator
            .validate(pattern, RegExpFlags::empty())
            .map_err(ErrorKind::InvalidRegExp)?;

        if flags.is_empty() {
            return Ok(true);
        }

        match validator.validate(pattern, flags) {
            Ok(()) => Ok(true),
            Err(err) => {
                debug!(pattern, %flags, error = %err, "regular expression not valid with its flags");
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        common::{file::SourceFile, Source, Spanned},
        lexing::{
            regexp::{HostRegExp, RegExpFlags, RegExpValidator},
            utils::{ErrorKind, LexError, LexResult},
        },
    };

    use super::RegExpLiteral;

    ///
    /// Accepts any pattern at all.
    ///
    struct Anything;

    impl RegExpValidator for Anything {
        fn validate(&self, _: &str, _: RegExpFlags) -> Result<(), String> {
            Ok(())
        }
    }

    ///
    /// A host without sticky matching.
    ///
    struct NoSticky;

    impl RegExpValidator for NoSticky {
        fn validate(&self, pattern: &str, flags: RegExpFlags) -> Result<(), String> {
            if flags.contains(RegExpFlags::STICKY) {
                return Err("sticky matching is not supported".to_string());
            }

            HostRegExp.validate(pattern, flags)
        }
    }

    fn regex_with(
        text: &str,
        validator: &dyn RegExpValidator,
    ) -> (LexResult<RegExpLiteral>, Vec<LexError>) {
        let source = SourceFile::dummy_file(text);
        let mut errors = vec![];
        let literal = RegExpLiteral::lex(&mut source.stream(), validator, &mut errors);
        (literal, errors)
    }

    fn regex(text: &str) -> LexResult<RegExpLiteral> {
        let (literal, errors) = regex_with(text, &HostRegExp);
        assert!(errors.is_empty());
        literal
    }

    #[test]
    fn simple() {
        let literal = regex("/a+b/gi;").expect("Valid parse");
        assert_eq!(literal.pattern(), "a+b");
        assert_eq!(literal.flag_text(), "gi");
        assert_eq!(literal.flags(), RegExpFlags::GLOBAL | RegExpFlags::IGNORE_CASE);
        assert_eq!(literal.span().len(), 7);
        assert!(literal.is_validated());
        let re = literal.compile().expect("Valid pattern");
        assert!(re.find("xAAB").is_some());
    }

    #[test]
    fn escapes_and_classes() {
        let (literal, _) = regex_with("/a\\/b/", &Anything);
        assert_eq!(literal.unwrap().pattern(), "a\\/b");

        let (literal, _) = regex_with("/[/]]/", &Anything);
        assert_eq!(literal.unwrap().pattern(), "[/]]");

        let (literal, _) = regex_with("/[\\]/]/", &Anything);
        assert_eq!(literal.unwrap().pattern(), "[\\]/]");
    }

    #[test]
    fn bad_flags() {
        let (literal, errors) = regex_with("/x/gg", &HostRegExp);
        let literal = literal.expect("Flags errors are not fatal");
        assert_eq!(literal.span().len(), 5);
        assert!(!literal.is_validated());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind(), &ErrorKind::DuplicateRegExpFlag('g'));
        assert_eq!(errors[0].position().index, 4);

        let (_, errors) = regex_with("/x/gzg", &HostRegExp);
        assert_eq!(
            errors.iter().map(LexError::kind).collect::<Vec<_>>(),
            [
                &ErrorKind::UnknownRegExpFlag('z'),
                &ErrorKind::DuplicateRegExpFlag('g')
            ]
        );
    }

    #[test]
    fn unterminated() {
        for text in ["/abc", "/ab\nc/", "/[/", "/a\\/"] {
            let err = regex(text).unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::UnterminatedRegExp, "{text:?}");
            assert_eq!(err.position().index, 0);
        }
    }

    #[test]
    fn validation() {
        for text in ["/(/", "/)/", "/a)(/g"] {
            let err = regex(text).unwrap_err();
            assert!(matches!(err.kind(), ErrorKind::InvalidRegExp(_)), "{text:?}");
            assert_eq!(err.position().index, 0);
        }

        let (literal, errors) = regex_with("/a/y", &NoSticky);
        assert!(errors.is_empty());
        let literal = literal.expect("Only the flags were rejected");
        assert!(!literal.is_validated());
        assert_eq!(literal.flags(), RegExpFlags::STICKY);
    }

    #[test]
    fn ecmascript_only_syntax() {
        for text in [
            "/(a)\\1/",
            "/a(?=b)/",
            "/a(?!b)/",
            "/(?<=a)b/",
            "/(?<!a)b/",
            "/[^]/",
            "/(?<n>a)\\k<n>/g",
        ] {
            let literal = regex(text).expect(text);
            assert!(literal.is_validated(), "{text:?}");
        }

        let literal = regex("/(a)\\1/i").expect("Valid parse");
        let re = literal.compile().expect("Valid pattern");
        assert!(re.find("xAa").is_some());
    }
}
