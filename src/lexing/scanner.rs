//!
//! The scanner: its state, and the loop dispatching
//! on the next character to the right sub-scanner.
//!

use bitflags::bitflags;
use tracing::{debug, trace};

use crate::common::{Position, Source, Span};

use super::{
    regexp::{HostRegExp, RegExpValidator},
    tokens::{
        comment::{Comment, CommentKind},
        identifier::{IdentifierName, PrivateName},
        line_terminator::LineTerminatorSequence,
        number::{NumericLiteral, NumericValue},
        punctuator::Punctuator,
        regex::RegExpLiteral,
        string::StringLiteral,
        template::TemplatePart,
        whitespace::WhiteSpace,
        Token,
    },
    utils::{unicode::provisional_token, ErrorKind, Lex, LexError, LexResult, SourceStream},
    Context, Lexeme,
};

static HOST: HostRegExp = HostRegExp;

///
/// The decoded value of the last token.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TokenValue {
    #[default]
    None,

    ///
    /// Identifiers, keywords, and private names (without the `#`).
    ///
    Identifier(String),
    String(String),
    Number(f64),

    ///
    /// The digits of a BigInt, without the `n`.
    ///
    BigInt(String),
    Template {
        cooked: Option<String>,
        raw: String,
    },
    RegExp(RegExpLiteral),
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct ScanFlags: u8 {
        ///
        /// A line terminator came before the current token.
        ///
        const NEWLINE_BEFORE = 1 << 0;

        ///
        /// The current identifier was spelled with escapes.
        ///
        const ESCAPED = 1 << 1;

        ///
        /// At least one token has been produced.
        ///
        const EMITTED = 1 << 2;
    }
}

///
/// Everything needed to go back to an earlier token.
///
pub struct Checkpoint<'a, S: Source> {
    input: SourceStream<'a, S>,
    token: Token,
    start: Position,
    end: usize,
    value: TokenValue,
    raw: Option<String>,
    flags: ScanFlags,
    braces: Vec<u32>,
    comments: usize,
    errors: usize,
}

///
/// Turns source text into tokens, one at a time, as a parser asks for them.
///
/// After each call to [Scanner::next_token], the token's position,
/// decoded value, raw text and preceding newline are available
/// until the next call.
///
pub struct Scanner<'a, S: Source> {
    input: SourceStream<'a, S>,
    token: Token,
    start: Position,
    end: usize,
    value: TokenValue,
    raw: Option<String>,
    flags: ScanFlags,

    ///
    /// One counter of open `{` per template substitution we are in.
    ///
    braces: Vec<u32>,
    validator: &'a dyn RegExpValidator,
    collect_comments: bool,
    comments: Vec<Comment>,
    errors: Vec<LexError>,
}

impl<'a, S: Source> Scanner<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            input: source.stream(),
            token: Token::EndOfSource,
            start: Position::default(),
            end: 0,
            value: TokenValue::None,
            raw: None,
            flags: ScanFlags::empty(),
            braces: vec![],
            validator: &HOST,
            collect_comments: false,
            comments: vec![],
            errors: vec![],
        }
    }

    ///
    /// Use a different engine to check regular expression literals.
    ///
    pub fn with_validator(mut self, validator: &'a dyn RegExpValidator) -> Self {
        self.validator = validator;
        self
    }

    ///
    /// Keep every skipped comment, see [Scanner::comments].
    ///
    pub fn collect_comments(mut self, collect: bool) -> Self {
        self.collect_comments = collect;
        self
    }

    pub fn token(&self) -> Token {
        self.token
    }

    ///
    /// Where the current token starts.
    ///
    pub fn start(&self) -> Position {
        self.start
    }

    ///
    /// Index just past the current token.
    ///
    pub fn end(&self) -> usize {
        self.end
    }

    pub fn span(&self) -> Span {
        Span::new(self.start.index, self.end)
    }

    ///
    /// Where the next token will be looked for.
    ///
    pub fn position(&self) -> Position {
        self.input.position()
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    ///
    /// The source text of the current token,
    /// only kept when scanned with [Context::RAW].
    ///
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    ///
    /// Was there a line terminator between the previous token and this one?
    ///
    pub fn has_newline_before(&self) -> bool {
        self.flags.contains(ScanFlags::NEWLINE_BEFORE)
    }

    ///
    /// Was the current identifier spelled with escapes?
    ///
    pub fn has_escape(&self) -> bool {
        self.flags.contains(ScanFlags::ESCAPED)
    }

    ///
    /// Every error reported so far.
    ///
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    ///
    /// A copy of the current token, as a [Lexeme].
    ///
    pub fn lexeme(&self) -> Lexeme {
        Lexeme {
            token: self.token,
            span: self.span(),
            start: self.start,
            value: self.value.clone(),
            newline_before: self.has_newline_before(),
        }
    }

    pub fn checkpoint(&self) -> Checkpoint<'a, S> {
        Checkpoint {
            input: self.input.clone(),
            token: self.token,
            start: self.start,
            end: self.end,
            value: self.value.clone(),
            raw: self.raw.clone(),
            flags: self.flags,
            braces: self.braces.clone(),
            comments: self.comments.len(),
            errors: self.errors.len(),
        }
    }

    ///
    /// Go back to a [Checkpoint], forgetting all
    /// comments and errors found since.
    ///
    pub fn rewind(&mut self, checkpoint: Checkpoint<'a, S>) {
        self.input = checkpoint.input;
        self.token = checkpoint.token;
        self.start = checkpoint.start;
        self.end = checkpoint.end;
        self.value = checkpoint.value;
        self.raw = checkpoint.raw;
        self.flags = checkpoint.flags;
        self.braces = checkpoint.braces;
        self.comments.truncate(checkpoint.comments);
        self.errors.truncate(checkpoint.errors);
    }

    ///
    /// Scan the next token.
    ///
    /// On error, no token is produced: the error is
    /// returned, and kept in [Scanner::errors].
    ///
    pub fn next_token(&mut self, context: Context) -> LexResult<Token> {
        self.flags
            .remove(ScanFlags::NEWLINE_BEFORE | ScanFlags::ESCAPED);
        self.value = TokenValue::None;
        self.raw = None;

        let reported = self.errors.len();
        match self.scan(context) {
            Ok(token) => {
                self.token = token;
                self.end = self.input.index();
                self.flags.insert(ScanFlags::EMITTED);

                if context.contains(Context::RAW) {
                    self.raw = Some(self.input.text_from(self.start.index));
                }

                trace!(?token, start = %self.start, end = self.end, "scanned token");
                Ok(token)
            }
            Err(err) => {
                debug!(error = %err, "scanning failed");
                if self.errors.len() == reported {
                    self.errors.push(err.clone());
                }

                Err(err)
            }
        }
    }

    fn scan(&mut self, context: Context) -> LexResult<Token> {
        loop {
            self.start = self.input.position();

            let Some(unit) = self.input.peek_unit() else {
                return Ok(Token::EndOfSource);
            };

            let Some(provisional) = provisional_token(unit) else {
                if <LineTerminatorSequence as Lex>::peek(&self.input) {
                    self.skip_line_terminator(context)?;
                    continue;
                }

                if <IdentifierName as Lex>::peek(&self.input) {
                    return self.scan_identifier(context);
                }

                if <WhiteSpace as Lex>::peek(&self.input) {
                    WhiteSpace::lex(&mut self.input, context)?;
                    continue;
                }

                return Err(self.illegal());
            };

            match provisional {
                Token::WhiteSpace => {
                    WhiteSpace::lex(&mut self.input, context)?;
                }
                Token::LineFeed | Token::CarriageReturn => self.skip_line_terminator(context)?,
                Token::Identifier => return self.scan_identifier(context),
                Token::NumericLiteral => return self.scan_number(context),
                Token::StringLiteral => {
                    let literal = StringLiteral::lex(&mut self.input, context)?;
                    self.value = TokenValue::String(literal.into_value());
                    return Ok(Token::StringLiteral);
                }
                Token::Template => return self.scan_template(context),
                Token::PrivateField => {
                    if self.input.index() == 0 && self.input.upcoming("#!") {
                        let comment =
                            Comment::lex_line(&mut self.input, "#!", CommentKind::Hashbang);
                        self.comment(comment);
                        continue;
                    }

                    return self.scan_private_name(context);
                }
                Token::Period if <NumericLiteral as Lex>::peek(&self.input) => {
                    return self.scan_number(context)
                }
                Token::Divide => {
                    if <Comment as Lex>::peek(&self.input) {
                        let comment = Comment::lex(&mut self.input, context)?;
                        if comment.has_line_terminator() {
                            self.flags.insert(ScanFlags::NEWLINE_BEFORE);
                        }

                        self.comment(comment);
                        continue;
                    }

                    if context.contains(Context::ALLOW_REGEX) {
                        return self.scan_regex();
                    }

                    return self.scan_punctuator(context);
                }
                Token::LessThan
                    if !context.contains(Context::MODULE) && self.input.upcoming("<!--") =>
                {
                    self.html_comment(context, "<!--", CommentKind::HtmlOpen)?;
                }
                Token::Subtract
                    if !context.contains(Context::MODULE)
                        && self.input.upcoming("-->")
                        && (self.has_newline_before() || !self.flags.contains(ScanFlags::EMITTED)) =>
                {
                    self.html_comment(context, "-->", CommentKind::HtmlClose)?;
                }
                Token::LeftBrace => {
                    if let Some(depth) = self.braces.last_mut() {
                        *depth += 1;
                    }

                    return self.scan_punctuator(context);
                }
                Token::RightBrace => {
                    match self.braces.last().copied() {
                        Some(0) => {
                            self.braces.pop();
                            return self.scan_template(context);
                        }
                        Some(_) => {
                            if let Some(depth) = self.braces.last_mut() {
                                *depth -= 1;
                            }
                        }
                        None => (),
                    }

                    return self.scan_punctuator(context);
                }
                Token::Illegal => return Err(self.illegal()),
                _ => return self.scan_punctuator(context),
            }
        }
    }

    fn illegal(&self) -> LexError {
        let ch = self.input.peek().unwrap_or(char::REPLACEMENT_CHARACTER);
        self.input.error(ErrorKind::IllegalCharacter(ch))
    }

    fn comment(&mut self, comment: Comment) {
        trace!(kind = ?comment.kind(), span = ?comment.inner(), "skipped comment");
        if self.collect_comments {
            self.comments.push(comment);
        }
    }

    fn skip_line_terminator(&mut self, context: Context) -> LexResult<()> {
        LineTerminatorSequence::lex(&mut self.input, context)?;
        self.flags.insert(ScanFlags::NEWLINE_BEFORE);
        Ok(())
    }

    ///
    /// `<!--` and `-->` act as `//`, but only in web-compatible scripts.
    ///
    fn html_comment(
        &mut self,
        context: Context,
        opener: &str,
        kind: CommentKind,
    ) -> LexResult<()> {
        if !context.contains(Context::WEB_COMPAT) {
            return Err(self.input.error(ErrorKind::HtmlComment));
        }

        let comment = Comment::lex_line(&mut self.input, opener, kind);
        self.comment(comment);
        Ok(())
    }

    fn scan_punctuator(&mut self, context: Context) -> LexResult<Token> {
        Punctuator::lex(&mut self.input, context).map(|punct| punct.token())
    }

    fn scan_identifier(&mut self, context: Context) -> LexResult<Token> {
        let name = IdentifierName::lex(&mut self.input, context)?;
        if name.is_escaped() {
            self.flags.insert(ScanFlags::ESCAPED);
        }

        let token = name.token();
        self.value = TokenValue::Identifier(name.into_name());
        Ok(token)
    }

    fn scan_private_name(&mut self, context: Context) -> LexResult<Token> {
        let private = PrivateName::lex(&mut self.input, context)?;
        if private.name().is_escaped() {
            self.flags.insert(ScanFlags::ESCAPED);
        }

        self.value = TokenValue::Identifier(private.name().name().to_string());
        Ok(Token::PrivateField)
    }

    fn scan_number(&mut self, context: Context) -> LexResult<Token> {
        let literal = NumericLiteral::lex(&mut self.input, context)?;
        let token = literal.token();
        self.value = match literal.into_value() {
            NumericValue::Number(value) => TokenValue::Number(value),
            NumericValue::BigInt(digits) => TokenValue::BigInt(digits),
        };

        Ok(token)
    }

    ///
    /// A template part, from its opening backtick or
    /// from the `}` closing a substitution.
    ///
    fn scan_template(&mut self, context: Context) -> LexResult<Token> {
        let part = TemplatePart::lex(&mut self.input, context)?;
        if !part.is_tail() {
            self.braces.push(0);
        }

        let token = part.token();
        let (cooked, raw) = part.into_parts();
        self.value = TokenValue::Template { cooked, raw };
        Ok(token)
    }

    ///
    /// Bad flags are all reported, then the first is returned.
    ///
    fn scan_regex(&mut self) -> LexResult<Token> {
        let mut flag_errors = vec![];
        let literal = RegExpLiteral::lex(&mut self.input, self.validator, &mut flag_errors)?;
        self.value = TokenValue::RegExp(literal);

        if let Some(first) = flag_errors.first().cloned() {
            self.errors.extend(flag_errors);
            return Err(first);
        }

        Ok(Token::RegularExpression)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        common::{file::SourceFile, Position},
        lexing::{
            tokens::{comment::CommentKind, Token},
            utils::ErrorKind,
            Context,
        },
    };

    use super::{Scanner, TokenValue};

    fn tokens_in(text: &str, context: Context) -> Vec<Token> {
        let source = SourceFile::dummy_file(text);
        let mut scanner = Scanner::new(&source);
        let mut tokens = vec![];
        loop {
            match scanner.next_token(context).expect("Valid scan") {
                Token::EndOfSource => return tokens,
                token => tokens.push(token),
            }
        }
    }

    fn first_error(text: &str, context: Context) -> ErrorKind {
        let source = SourceFile::dummy_file(text);
        let mut scanner = Scanner::new(&source);
        loop {
            match scanner.next_token(context) {
                Ok(Token::EndOfSource) => panic!("No error in {text:?}"),
                Ok(_) => (),
                Err(err) => return err.kind().clone(),
            }
        }
    }

    #[test]
    fn simple_statement() {
        assert_eq!(
            tokens_in("let x = a >>>= 2;", Context::empty()),
            [
                Token::LetKeyword,
                Token::Identifier,
                Token::Assign,
                Token::Identifier,
                Token::LogicalShiftRightAssign,
                Token::NumericLiteral,
                Token::Semicolon
            ]
        );
    }

    #[test]
    fn positions() {
        let source = SourceFile::dummy_file("a\n  bc\r\n\u{2028}d");
        let mut scanner = Scanner::new(&source);

        assert_eq!(scanner.next_token(Context::empty()), Ok(Token::Identifier));
        assert!(!scanner.has_newline_before());

        assert_eq!(scanner.next_token(Context::empty()), Ok(Token::Identifier));
        assert_eq!(
            scanner.start(),
            Position {
                index: 4,
                line: 2,
                column: 2
            }
        );
        assert_eq!(scanner.end(), 6);
        assert!(scanner.has_newline_before());

        assert_eq!(scanner.next_token(Context::empty()), Ok(Token::Identifier));
        assert_eq!(scanner.start().line, 4);
        assert_eq!(scanner.start().column, 0);
        assert_eq!(scanner.value(), &TokenValue::Identifier("d".to_string()));

        assert_eq!(scanner.next_token(Context::empty()), Ok(Token::EndOfSource));
    }

    #[test]
    fn newline_in_block_comment() {
        let source = SourceFile::dummy_file("a /*\n*/ b /* */ c");
        let mut scanner = Scanner::new(&source);
        scanner.next_token(Context::empty()).unwrap();
        scanner.next_token(Context::empty()).unwrap();
        assert!(scanner.has_newline_before());
        scanner.next_token(Context::empty()).unwrap();
        assert!(!scanner.has_newline_before());
    }

    #[test]
    fn regex_or_divide() {
        assert_eq!(
            tokens_in("/a/g", Context::empty()),
            [
                Token::Divide,
                Token::Identifier,
                Token::Divide,
                Token::Identifier
            ]
        );
        assert_eq!(
            tokens_in("/a/g", Context::ALLOW_REGEX),
            [Token::RegularExpression]
        );
        assert_eq!(tokens_in("a /= b", Context::empty())[1], Token::DivideAssign);
    }

    #[test]
    fn regex_flag_errors() {
        let source = SourceFile::dummy_file("/x/gg;");
        let mut scanner = Scanner::new(&source);
        let err = scanner.next_token(Context::ALLOW_REGEX).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::DuplicateRegExpFlag('g'));
        assert_eq!(scanner.errors().len(), 1);

        let source = SourceFile::dummy_file("/x/gzg");
        let mut scanner = Scanner::new(&source);
        let err = scanner.next_token(Context::ALLOW_REGEX).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnknownRegExpFlag('z'));
        assert_eq!(scanner.errors().len(), 2);
        assert_eq!(scanner.errors()[0], err);
    }

    #[test]
    fn html_comments() {
        let web = Context::WEB_COMPAT;
        assert_eq!(tokens_in("a <!-- b\nc", web), [Token::Identifier, Token::Identifier]);
        assert_eq!(tokens_in("--> a\nb", web), [Token::Identifier]);
        assert_eq!(tokens_in("a\n --> b\nc", web), [Token::Identifier, Token::Identifier]);

        // Without a newline first, `-->` is `--` then `>`.
        assert_eq!(
            tokens_in("a --> b", web),
            [
                Token::Identifier,
                Token::Decrement,
                Token::GreaterThan,
                Token::Identifier
            ]
        );

        // Modules never have HTML-like comments.
        assert_eq!(
            tokens_in("a <!-- b", Context::MODULE | web),
            [
                Token::Identifier,
                Token::LessThan,
                Token::Negate,
                Token::Decrement,
                Token::Identifier
            ]
        );

        assert_eq!(first_error("a <!-- b", Context::empty()), ErrorKind::HtmlComment);
        assert_eq!(first_error("a\n--> b", Context::empty()), ErrorKind::HtmlComment);
    }

    #[test]
    fn hashbang() {
        let source = SourceFile::dummy_file("#!/usr/bin/env node\nfoo");
        let mut scanner = Scanner::new(&source).collect_comments(true);
        assert_eq!(scanner.next_token(Context::empty()), Ok(Token::Identifier));
        assert!(scanner.has_newline_before());
        assert_eq!(scanner.comments().len(), 1);
        assert_eq!(scanner.comments()[0].kind(), CommentKind::Hashbang);

        assert_eq!(first_error(" #!x", Context::empty()), ErrorKind::InvalidPrivateName);
    }

    #[test]
    fn private_names() {
        let source = SourceFile::dummy_file("this.#count");
        let mut scanner = Scanner::new(&source);
        scanner.next_token(Context::empty()).unwrap();
        scanner.next_token(Context::empty()).unwrap();
        assert_eq!(scanner.next_token(Context::empty()), Ok(Token::PrivateField));
        assert_eq!(scanner.value(), &TokenValue::Identifier("count".to_string()));
    }

    #[test]
    fn templates() {
        let source = SourceFile::dummy_file("`a${ {b: `c`} }d`");
        let mut scanner = Scanner::new(&source);
        let mut scan = || {
            let token = scanner.next_token(Context::empty()).expect("Valid scan");
            (token, scanner.value().clone())
        };

        let template = |cooked: &str| TokenValue::Template {
            cooked: Some(cooked.to_string()),
            raw: cooked.to_string(),
        };

        assert_eq!(scan(), (Token::TemplateContinuation, template("a")));
        assert_eq!(scan().0, Token::LeftBrace);
        assert_eq!(scan().0, Token::Identifier);
        assert_eq!(scan().0, Token::Colon);
        assert_eq!(scan(), (Token::TemplateSpan, template("c")));
        assert_eq!(scan().0, Token::RightBrace);
        assert_eq!(scan(), (Token::TemplateSpan, template("d")));
        assert_eq!(scan().0, Token::EndOfSource);
    }

    #[test]
    fn checkpoints() {
        let source = SourceFile::dummy_file("a b c");
        let mut scanner = Scanner::new(&source);
        scanner.next_token(Context::empty()).unwrap();

        let checkpoint = scanner.checkpoint();
        scanner.next_token(Context::empty()).unwrap();
        assert_eq!(scanner.value(), &TokenValue::Identifier("b".to_string()));

        scanner.rewind(checkpoint);
        assert_eq!(scanner.value(), &TokenValue::Identifier("a".to_string()));
        scanner.next_token(Context::empty()).unwrap();
        assert_eq!(scanner.value(), &TokenValue::Identifier("b".to_string()));
        assert_eq!(scanner.start().index, 2);
    }

    #[test]
    fn raw_capture() {
        let source = SourceFile::dummy_file("'a\\x41' 0x10");
        let mut scanner = Scanner::new(&source);
        scanner.next_token(Context::RAW).unwrap();
        assert_eq!(scanner.raw(), Some("'a\\x41'"));
        assert_eq!(scanner.value(), &TokenValue::String("aA".to_string()));

        scanner.next_token(Context::empty()).unwrap();
        assert_eq!(scanner.raw(), None);
        assert_eq!(scanner.value(), &TokenValue::Number(16.0));
    }

    #[test]
    fn escaped_keywords() {
        let source = SourceFile::dummy_file("\\u{69}f \\u0076ar_");
        let mut scanner = Scanner::new(&source);
        assert_eq!(scanner.next_token(Context::empty()), Ok(Token::EscapedReserved));
        assert!(scanner.has_escape());
        assert_eq!(scanner.next_token(Context::empty()), Ok(Token::Identifier));
        assert!(scanner.has_escape());
    }

    #[test]
    fn illegal_characters() {
        assert_eq!(
            first_error("a \u{0001}", Context::empty()),
            ErrorKind::IllegalCharacter('\u{0001}')
        );
        assert_eq!(
            first_error("\u{00A7}", Context::empty()),
            ErrorKind::IllegalCharacter('\u{00A7}')
        );
        assert_eq!(
            tokens_in("\u{00A0}a\u{3000}\u{FEFF}b", Context::empty()),
            [Token::Identifier, Token::Identifier]
        );
    }

    #[test]
    fn errors_are_kept() {
        let source = SourceFile::dummy_file("'abc");
        let mut scanner = Scanner::new(&source);
        let err = scanner.next_token(Context::empty()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnterminatedString);
        assert_eq!(scanner.errors(), [err]);
    }
}
