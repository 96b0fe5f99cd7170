//!
//! Lexical tokens.
//!
//! A [Token] packs its kind, binary operator precedence
//! and attribute [TokenFlags] into a single integer, so
//! most questions a parser asks are one bit test away.
//!

pub mod comment;
pub mod escapes;
pub mod identifier;
pub mod line_terminator;
pub mod number;
pub mod punctuator;
pub mod regex;
pub mod string;
pub mod template;
pub mod whitespace;

use std::{collections::HashMap, fmt};

use bitflags::bitflags;
use lazy_static::lazy_static;

bitflags! {
    ///
    /// Attributes shared between token kinds.
    ///
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TokenFlags: u64 {
        const IS_BINARY_OP = 1 << 12;
        const KEYWORD = 1 << 13;
        const RESERVED = 1 << 14;
        const STRICT_RESERVED = 1 << 15;
        const FUTURE_RESERVED = 1 << 16;
        const CONTEXTUAL = 1 << 17;
        const IS_IDENTIFIER = 1 << 18;
        const IS_EXPRESSION_START = 1 << 19;
        const IS_IN_OR_OF = 1 << 20;
        const IS_LOGICAL = 1 << 21;
        const IS_AUTO_SEMICOLON = 1 << 22;
        const IS_PATTERN_START = 1 << 23;
        const IS_ASSIGN_OP = 1 << 24;
        const IS_UPDATE_OP = 1 << 25;
        const IS_UNARY_OP = 1 << 26;
        const IS_MEMBER_OR_CALL = 1 << 27;
        const IS_STRING_OR_NUMBER = 1 << 28;
        const IS_VAR_DECL = 1 << 29;
        const IS_EVAL_OR_ARGUMENTS = 1 << 30;
        const IS_COMMA_OR_RPAREN = 1 << 31;
        const IS_CLASS_FIELD_END = 1 << 32;
    }
}

///
/// A token: kind ordinal in the low byte, precedence
/// in the next four bits, [TokenFlags] above that.
///
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(u64);

const KIND_MASK: u64 = 0xFF;
const PRECEDENCE_SHIFT: u64 = 8;
const PRECEDENCE_MASK: u64 = 0xF << PRECEDENCE_SHIFT;

impl Token {
    const fn pack(kind: TokenKind, precedence: u8, flags: TokenFlags) -> Self {
        Self(kind as u64 | ((precedence as u64) << PRECEDENCE_SHIFT) | flags.bits())
    }

    pub fn kind(self) -> TokenKind {
        TokenKind::ALL[(self.0 & KIND_MASK) as usize]
    }

    pub fn ordinal(self) -> u8 {
        (self.0 & KIND_MASK) as u8
    }

    ///
    /// Binary operator precedence, `0` for everything else.
    ///
    /// Ranges from `1` (`||`) to `11` (`**`).
    ///
    pub fn precedence(self) -> u8 {
        ((self.0 & PRECEDENCE_MASK) >> PRECEDENCE_SHIFT) as u8
    }

    pub fn flags(self) -> TokenFlags {
        TokenFlags::from_bits_truncate(self.0)
    }

    ///
    /// Does this token have any of these `flags`?
    ///
    pub fn is(self, flags: TokenFlags) -> bool {
        self.flags().intersects(flags)
    }

    ///
    /// The fixed source text of this token, empty for
    /// tokens whose text varies (literals, identifiers).
    ///
    pub fn text(self) -> &'static str {
        self.kind().text()
    }

    ///
    /// Would a `/` directly after this token start
    /// a regular expression, rather than divide?
    ///
    /// `}` is taken as closing an object literal. After a block
    /// a regular expression can follow, but telling the two apart
    /// needs the token before the matching `{`.
    ///
    pub fn allows_regex_after(self) -> bool {
        if self.is(TokenFlags::IS_STRING_OR_NUMBER) {
            return false;
        }

        match self {
            Token::Identifier
            | Token::RegularExpression
            | Token::TemplateSpan
            | Token::PrivateField
            | Token::EscapedReserved
            | Token::EscapedFutureReserved
            | Token::RightParen
            | Token::RightBracket
            | Token::RightBrace
            | Token::Increment
            | Token::Decrement
            | Token::ThisKeyword
            | Token::SuperKeyword
            | Token::NullKeyword
            | Token::TrueKeyword
            | Token::FalseKeyword => false,
            _ => !self.is(TokenFlags::IS_IDENTIFIER) || self.is(TokenFlags::STRICT_RESERVED),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            "" => write!(f, "{:?}", self.kind()),
            text => write!(f, "`{text}`"),
        }
    }
}

macro_rules! tokens {
    (@text) => { "" };
    (@text $text:literal) => { $text };
    (
        $(
            $(#[$meta:meta])*
            $kind:ident $( = $text:literal )? $( @ $prec:literal )? $( : $($flag:ident)|+ )? ;
        )*
    ) => {
        ///
        /// Every kind of token, without attributes.
        ///
        #[repr(u8)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum TokenKind {
            $( $(#[$meta])* $kind, )*
        }

        impl TokenKind {
            ///
            /// All kinds, indexed by ordinal.
            ///
            pub const ALL: &'static [TokenKind] = &[$( TokenKind::$kind, )*];

            pub const fn text(self) -> &'static str {
                match self {
                    $( Self::$kind => tokens!(@text $($text)?), )*
                }
            }

            pub const fn token(self) -> Token {
                match self {
                    $( Self::$kind => Token::$kind, )*
                }
            }
        }

        #[allow(non_upper_case_globals)]
        impl Token {
            $(
                pub const $kind: Token = Token::pack(
                    TokenKind::$kind,
                    0 $( + $prec )?,
                    TokenFlags::empty() $( $( .union(TokenFlags::$flag) )+ )?,
                );
            )*
        }
    };
}

tokens! {
    EndOfSource: IS_AUTO_SEMICOLON;

    // Tokens with variable text.
    Identifier: IS_IDENTIFIER | IS_EXPRESSION_START;
    NumericLiteral: IS_STRING_OR_NUMBER | IS_EXPRESSION_START;
    BigIntLiteral: IS_STRING_OR_NUMBER | IS_EXPRESSION_START;
    StringLiteral: IS_STRING_OR_NUMBER | IS_EXPRESSION_START;
    RegularExpression: IS_EXPRESSION_START;
    /// A template part ending in `${`.
    TemplateContinuation: IS_EXPRESSION_START | IS_MEMBER_OR_CALL;
    /// A template part ending in a backtick.
    TemplateSpan: IS_EXPRESSION_START | IS_MEMBER_OR_CALL;
    PrivateField: IS_MEMBER_OR_CALL;
    Decorator = "@";
    /// A reserved word spelled with escapes, like `\u{69}f`.
    EscapedReserved;
    /// A strict mode reserved word spelled with escapes.
    EscapedFutureReserved: IS_IDENTIFIER;

    // Provisional kinds, only ever seen by the dispatcher.
    WhiteSpace;
    LineFeed;
    CarriageReturn;
    Template;
    Illegal;

    // Punctuators.
    LeftBrace = "{": IS_EXPRESSION_START | IS_PATTERN_START;
    RightBrace = "}": IS_AUTO_SEMICOLON | IS_CLASS_FIELD_END;
    LeftParen = "(": IS_EXPRESSION_START | IS_MEMBER_OR_CALL;
    RightParen = ")": IS_COMMA_OR_RPAREN;
    LeftBracket = "[": IS_EXPRESSION_START | IS_PATTERN_START | IS_MEMBER_OR_CALL;
    RightBracket = "]";
    Period = ".": IS_MEMBER_OR_CALL;
    Ellipsis = "...";
    Semicolon = ";": IS_AUTO_SEMICOLON | IS_CLASS_FIELD_END;
    Comma = ",": IS_COMMA_OR_RPAREN;
    Colon = ":";
    QuestionMark = "?";
    OptionalChain = "?.": IS_MEMBER_OR_CALL;
    Arrow = "=>";
    Complement = "~": IS_UNARY_OP | IS_EXPRESSION_START;
    Negate = "!": IS_UNARY_OP | IS_EXPRESSION_START;
    Increment = "++": IS_UPDATE_OP | IS_EXPRESSION_START;
    Decrement = "--": IS_UPDATE_OP | IS_EXPRESSION_START;

    // Assignment operators.
    Assign = "=": IS_ASSIGN_OP;
    ShiftLeftAssign = "<<=": IS_ASSIGN_OP;
    ShiftRightAssign = ">>=": IS_ASSIGN_OP;
    LogicalShiftRightAssign = ">>>=": IS_ASSIGN_OP;
    ExponentiateAssign = "**=": IS_ASSIGN_OP;
    AddAssign = "+=": IS_ASSIGN_OP;
    SubtractAssign = "-=": IS_ASSIGN_OP;
    MultiplyAssign = "*=": IS_ASSIGN_OP;
    DivideAssign = "/=": IS_ASSIGN_OP;
    ModuloAssign = "%=": IS_ASSIGN_OP;
    BitwiseXorAssign = "^=": IS_ASSIGN_OP;
    BitwiseOrAssign = "|=": IS_ASSIGN_OP;
    BitwiseAndAssign = "&=": IS_ASSIGN_OP;
    LogicalOrAssign = "||=": IS_ASSIGN_OP;
    LogicalAndAssign = "&&=": IS_ASSIGN_OP;
    CoalesceAssign = "??=": IS_ASSIGN_OP;

    // Binary operators.
    Coalesce = "??" @ 1: IS_BINARY_OP | IS_LOGICAL;
    LogicalOr = "||" @ 1: IS_BINARY_OP | IS_LOGICAL;
    LogicalAnd = "&&" @ 2: IS_BINARY_OP | IS_LOGICAL;
    BitwiseOr = "|" @ 3: IS_BINARY_OP;
    BitwiseXor = "^" @ 4: IS_BINARY_OP;
    BitwiseAnd = "&" @ 5: IS_BINARY_OP;
    LooseEqual = "==" @ 6: IS_BINARY_OP;
    LooseNotEqual = "!=" @ 6: IS_BINARY_OP;
    StrictEqual = "===" @ 6: IS_BINARY_OP;
    StrictNotEqual = "!==" @ 6: IS_BINARY_OP;
    LessThan = "<" @ 7: IS_BINARY_OP;
    GreaterThan = ">" @ 7: IS_BINARY_OP;
    LessThanOrEqual = "<=" @ 7: IS_BINARY_OP;
    GreaterThanOrEqual = ">=" @ 7: IS_BINARY_OP;
    InstanceofKeyword = "instanceof" @ 7: IS_BINARY_OP | KEYWORD | RESERVED;
    InKeyword = "in" @ 7: IS_BINARY_OP | IS_IN_OR_OF | KEYWORD | RESERVED;
    ShiftLeft = "<<" @ 8: IS_BINARY_OP;
    ShiftRight = ">>" @ 8: IS_BINARY_OP;
    LogicalShiftRight = ">>>" @ 8: IS_BINARY_OP;
    Add = "+" @ 9: IS_BINARY_OP | IS_UNARY_OP | IS_EXPRESSION_START;
    Subtract = "-" @ 9: IS_BINARY_OP | IS_UNARY_OP | IS_EXPRESSION_START;
    Multiply = "*" @ 10: IS_BINARY_OP;
    Divide = "/" @ 10: IS_BINARY_OP;
    Modulo = "%" @ 10: IS_BINARY_OP;
    Exponentiate = "**" @ 11: IS_BINARY_OP;

    // Reserved words.
    BreakKeyword = "break": KEYWORD | RESERVED;
    CaseKeyword = "case": KEYWORD | RESERVED;
    CatchKeyword = "catch": KEYWORD | RESERVED;
    ClassKeyword = "class": KEYWORD | RESERVED | IS_EXPRESSION_START;
    ConstKeyword = "const": KEYWORD | RESERVED | IS_VAR_DECL;
    ContinueKeyword = "continue": KEYWORD | RESERVED;
    DebuggerKeyword = "debugger": KEYWORD | RESERVED;
    DefaultKeyword = "default": KEYWORD | RESERVED;
    DeleteKeyword = "delete": KEYWORD | RESERVED | IS_UNARY_OP | IS_EXPRESSION_START;
    DoKeyword = "do": KEYWORD | RESERVED;
    ElseKeyword = "else": KEYWORD | RESERVED;
    EnumKeyword = "enum": KEYWORD | RESERVED | FUTURE_RESERVED;
    ExportKeyword = "export": KEYWORD | RESERVED;
    ExtendsKeyword = "extends": KEYWORD | RESERVED;
    FalseKeyword = "false": KEYWORD | RESERVED | IS_EXPRESSION_START;
    FinallyKeyword = "finally": KEYWORD | RESERVED;
    ForKeyword = "for": KEYWORD | RESERVED;
    FunctionKeyword = "function": KEYWORD | RESERVED | IS_EXPRESSION_START;
    IfKeyword = "if": KEYWORD | RESERVED;
    ImportKeyword = "import": KEYWORD | RESERVED | IS_EXPRESSION_START;
    NewKeyword = "new": KEYWORD | RESERVED | IS_EXPRESSION_START;
    NullKeyword = "null": KEYWORD | RESERVED | IS_EXPRESSION_START;
    ReturnKeyword = "return": KEYWORD | RESERVED;
    SuperKeyword = "super": KEYWORD | RESERVED | IS_EXPRESSION_START;
    SwitchKeyword = "switch": KEYWORD | RESERVED;
    ThisKeyword = "this": KEYWORD | RESERVED | IS_EXPRESSION_START;
    ThrowKeyword = "throw": KEYWORD | RESERVED;
    TrueKeyword = "true": KEYWORD | RESERVED | IS_EXPRESSION_START;
    TryKeyword = "try": KEYWORD | RESERVED;
    TypeofKeyword = "typeof": KEYWORD | RESERVED | IS_UNARY_OP | IS_EXPRESSION_START;
    VarKeyword = "var": KEYWORD | RESERVED | IS_VAR_DECL;
    VoidKeyword = "void": KEYWORD | RESERVED | IS_UNARY_OP | IS_EXPRESSION_START;
    WhileKeyword = "while": KEYWORD | RESERVED;
    WithKeyword = "with": KEYWORD | RESERVED;

    // Reserved in strict mode code only.
    ImplementsKeyword = "implements": KEYWORD | STRICT_RESERVED | IS_IDENTIFIER;
    InterfaceKeyword = "interface": KEYWORD | STRICT_RESERVED | IS_IDENTIFIER;
    PackageKeyword = "package": KEYWORD | STRICT_RESERVED | IS_IDENTIFIER;
    PrivateKeyword = "private": KEYWORD | STRICT_RESERVED | IS_IDENTIFIER;
    ProtectedKeyword = "protected": KEYWORD | STRICT_RESERVED | IS_IDENTIFIER;
    PublicKeyword = "public": KEYWORD | STRICT_RESERVED | IS_IDENTIFIER;
    StaticKeyword = "static": KEYWORD | STRICT_RESERVED | IS_IDENTIFIER;
    LetKeyword = "let": KEYWORD | STRICT_RESERVED | IS_IDENTIFIER | IS_VAR_DECL | IS_EXPRESSION_START;
    YieldKeyword = "yield": KEYWORD | STRICT_RESERVED | IS_IDENTIFIER | IS_EXPRESSION_START;

    // Keywords only in some contexts, otherwise identifiers.
    AsKeyword = "as": CONTEXTUAL | IS_IDENTIFIER | IS_EXPRESSION_START;
    AsyncKeyword = "async": CONTEXTUAL | IS_IDENTIFIER | IS_EXPRESSION_START;
    AwaitKeyword = "await": CONTEXTUAL | IS_IDENTIFIER | IS_EXPRESSION_START;
    ConstructorKeyword = "constructor": CONTEXTUAL | IS_IDENTIFIER | IS_EXPRESSION_START;
    GetKeyword = "get": CONTEXTUAL | IS_IDENTIFIER | IS_EXPRESSION_START;
    SetKeyword = "set": CONTEXTUAL | IS_IDENTIFIER | IS_EXPRESSION_START;
    FromKeyword = "from": CONTEXTUAL | IS_IDENTIFIER | IS_EXPRESSION_START;
    OfKeyword = "of": CONTEXTUAL | IS_IDENTIFIER | IS_IN_OR_OF | IS_EXPRESSION_START;
    TargetKeyword = "target": CONTEXTUAL | IS_IDENTIFIER | IS_EXPRESSION_START;
    MetaKeyword = "meta": CONTEXTUAL | IS_IDENTIFIER | IS_EXPRESSION_START;
    EvalKeyword = "eval": CONTEXTUAL | IS_IDENTIFIER | IS_EVAL_OR_ARGUMENTS | IS_EXPRESSION_START;
    ArgumentsKeyword = "arguments": CONTEXTUAL | IS_IDENTIFIER | IS_EVAL_OR_ARGUMENTS | IS_EXPRESSION_START;
}

lazy_static! {
    ///
    /// Every keyword, contextual or not, by name.
    ///
    static ref KEYWORDS: HashMap<&'static str, Token> = TokenKind::ALL
        .iter()
        .map(|kind| kind.token())
        .filter(|token| token.is(TokenFlags::KEYWORD | TokenFlags::CONTEXTUAL))
        .map(|token| (token.text(), token))
        .collect();
}

///
/// Look up a keyword by name.
///
pub fn keyword(name: &str) -> Option<Token> {
    KEYWORDS.get(name).copied()
}
