//!
//! Checking regular expression literals against a
//! host regular expression engine.
//!

use std::fmt;

use bitflags::bitflags;
use regress::Regex;

bitflags! {
    ///
    /// Flags of a regular expression literal.
    ///
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RegExpFlags: u8 {
        const GLOBAL = 1 << 0;
        const IGNORE_CASE = 1 << 1;
        const MULTILINE = 1 << 2;
        const UNICODE = 1 << 3;
        const STICKY = 1 << 4;
        const DOT_ALL = 1 << 5;
    }
}

impl RegExpFlags {
    ///
    /// The flag for a given letter, if there is one.
    ///
    pub fn from_char(ch: char) -> Option<Self> {
        Some(match ch {
            'g' => Self::GLOBAL,
            'i' => Self::IGNORE_CASE,
            'm' => Self::MULTILINE,
            'u' => Self::UNICODE,
            'y' => Self::STICKY,
            's' => Self::DOT_ALL,
            _ => return None,
        })
    }
}

impl fmt::Display for RegExpFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, ch) in [
            (Self::GLOBAL, 'g'),
            (Self::IGNORE_CASE, 'i'),
            (Self::MULTILINE, 'm'),
            (Self::UNICODE, 'u'),
            (Self::STICKY, 'y'),
            (Self::DOT_ALL, 's'),
        ] {
            if self.contains(flag) {
                write!(f, "{ch}")?;
            }
        }

        Ok(())
    }
}

///
/// Something that can check the pattern and flags of a literal.
///
/// The scanner only needs a verdict: the literal itself keeps
/// its pattern and flags, for the host to build from later.
///
pub trait RegExpValidator {
    ///
    /// Does `pattern` build with `flags`? If not, why not.
    ///
    fn validate(&self, pattern: &str, flags: RegExpFlags) -> Result<(), String>;
}

///
/// [regress], an engine following the ECMAScript
/// regular expression grammar, as the host.
///
/// `g` and `y` only change how matching is driven,
/// so they don't take part in building a pattern.
///
#[derive(Debug, Default, Clone, Copy)]
pub struct HostRegExp;

impl HostRegExp {
    pub fn compile(pattern: &str, flags: RegExpFlags) -> Result<Regex, regress::Error> {
        let flags = flags - RegExpFlags::GLOBAL - RegExpFlags::STICKY;
        Regex::with_flags(pattern, flags.to_string().as_str())
    }
}

impl RegExpValidator for HostRegExp {
    fn validate(&self, pattern: &str, flags: RegExpFlags) -> Result<(), String> {
        Self::compile(pattern, flags)
            .map(drop)
            .map_err(|err| err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{HostRegExp, RegExpFlags, RegExpValidator};

    #[test]
    fn flags() {
        let flags = RegExpFlags::from_char('y').unwrap() | RegExpFlags::GLOBAL;
        assert_eq!(flags.to_string(), "gy");
        assert_eq!(RegExpFlags::from_char('x'), None);
    }

    #[test]
    fn host() {
        let re = HostRegExp::compile("^a.c$", RegExpFlags::IGNORE_CASE).unwrap();
        assert!(re.find("AbC").is_some());
        assert!(HostRegExp.validate("a(b", RegExpFlags::empty()).is_err());
        assert_eq!(
            HostRegExp.validate("a", RegExpFlags::GLOBAL | RegExpFlags::STICKY),
            Ok(())
        );
    }

    #[test]
    fn ecmascript_syntax() {
        for pattern in [
            "(a)\\1",
            "a(?=b)",
            "a(?!b)",
            "(?<=a)b",
            "(?<!a)b",
            "[^]",
            "(?<n>a)\\k<n>",
        ] {
            assert_eq!(
                HostRegExp.validate(pattern, RegExpFlags::empty()),
                Ok(()),
                "{pattern:?}"
            );
        }

        let re = HostRegExp::compile("(a)\\1", RegExpFlags::empty()).unwrap();
        assert!(re.find("xaa").is_some());
        assert!(re.find("ab").is_none());
    }
}
