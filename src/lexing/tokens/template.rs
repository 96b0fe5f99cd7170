//!
//! ## Template literals
//!
//! Only the literal text of a template (its quasis) is scanned here.
//! The expressions in between are ordinary tokens.
//!

use avjs_macros::{ECMARef, Spanned};
use tracing::debug;

use crate::{
    common::{Source, Span},
    lexing::{
        utils::{unicode::CR, ErrorKind, Lex, LexError, LexResult, SourceStream},
        Context,
    },
};

use super::{
    escapes::{CharacterValue, EscapePlace, EscapeSequence},
    Token,
};

const LF_UNIT: u16 = 0x000A;

///
/// One quasi of a template, including its delimiters:
///
/// ```js
/// `no substitutions`
/// `head ${
/// } middle ${
/// } tail`
/// ```
///
#[ECMARef("Template", "https://tc39.es/ecma262/#sec-template-literal-lexical-components")]
#[derive(Debug, Clone, Spanned)]
pub struct TemplatePart {
    span: Span,

    ///
    /// The decoded text, or [None] if a tagged template contained a bad escape.
    ///
    cooked: Option<String>,

    ///
    /// The source text, with `<CR><LF>` and `<CR>` normalised to `<LF>`.
    ///
    raw: String,

    ///
    /// Does this part end the template (with a backtick)?
    ///
    tail: bool,
}

impl TemplatePart {
    pub fn cooked(&self) -> Option<&str> {
        self.cooked.as_deref()
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_tail(&self) -> bool {
        self.tail
    }

    pub fn into_parts(self) -> (Option<String>, String) {
        (self.cooked, self.raw)
    }

    ///
    /// [Token::TemplateSpan] if this part ends the template,
    /// otherwise [Token::TemplateContinuation].
    ///
    pub fn token(&self) -> Token {
        match self.tail {
            true => Token::TemplateSpan,
            false => Token::TemplateContinuation,
        }
    }
}

impl Lex for TemplatePart {
    fn peek<S: Source>(input: &SourceStream<S>) -> bool {
        input.upcoming("`") || input.upcoming("}")
    }

    fn lex<S: Source>(input: &mut SourceStream<S>, context: Context) -> LexResult<Self> {
        let start = input.position();
        let tagged = context.contains(Context::TAGGED_TEMPLATE);
        input.advance();

        let mut cooked = Some(vec![]);
        let mut raw = vec![];
        let tail = loop {
            match input.peek() {
                None => return Err(LexError::new(ErrorKind::UnterminatedTemplate, start)),
                Some('`') => {
                    input.advance();
                    break true;
                }
                Some('$') if input.upcoming("${") => {
                    input.advance();
                    input.advance();
                    break false;
                }
                Some('\\') => {
                    let escape_start = input.index();
                    match EscapeSequence::lex(input, context, EscapePlace::Template) {
                        Ok(EscapeSequence::LineContinuation) => {
                            let terminator = input
                                .units()
                                .get(escape_start + 1)
                                .copied()
                                .unwrap_or(LF_UNIT);

                            raw.push(b'\\' as u16);
                            raw.push(match terminator == CR as u16 {
                                true => LF_UNIT,
                                false => terminator,
                            });
                        }
                        Ok(escape) => {
                            if let Some(cooked) = &mut cooked {
                                let mut buf = [0; 2];
                                cooked.extend_from_slice(escape.cv(&mut buf));
                            }

                            raw.extend_from_slice(
                                input
                                    .units()
                                    .get(escape_start..input.index())
                                    .unwrap_or_default(),
                            );
                        }
                        Err(err) if err.kind() == &ErrorKind::UnterminatedTemplate => {
                            return Err(LexError::new(ErrorKind::UnterminatedTemplate, start))
                        }
                        Err(err) if tagged => {
                            debug!(error = %err, "bad escape in tagged template");
                            cooked = None;
                            raw.extend_from_slice(
                                input
                                    .units()
                                    .get(escape_start..input.index())
                                    .unwrap_or_default(),
                            );
                        }
                        Err(err) => return Err(err),
                    }
                }
                Some(CR) => {
                    input.consume_line_terminator();
                    raw.push(LF_UNIT);
                    if let Some(cooked) = &mut cooked {
                        cooked.push(LF_UNIT);
                    }
                }
                Some(_) => {
                    let from = raw.len();
                    input.advance_into(&mut raw);
                    if let Some(cooked) = &mut cooked {
                        cooked.extend_from_slice(&raw[from..]);
                    }
                }
            }
        };

        Ok(Self {
            span: Span::new(start.index, input.index()),
            cooked: cooked.map(|units| String::from_utf16_lossy(&units)),
            raw: String::from_utf16_lossy(&raw),
            tail,
        })
    }
}
