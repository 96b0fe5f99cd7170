//!
//! ## Punctuators
//!
//! Pieces of punctuation and operators: `{ ( => >>>= ...`.
//!
//! Multi-character operators are fused greedily, so the
//! longest operator sharing a prefix always wins.
//!

use avjs_macros::{ECMARef, Spanned};

use crate::{
    common::{Source, Span},
    lexing::{
        utils::{ErrorKind, Lex, LexError, LexResult, SourceStream},
        Context,
    },
};

use super::Token;

#[ECMARef("Punctuator", "https://tc39.es/ecma262/#sec-punctuators")]
#[derive(Debug, Spanned)]
pub struct Punctuator {
    span: Span,
    token: Token,
}

impl Punctuator {
    pub fn token(&self) -> Token {
        self.token
    }
}

fn is_punctuator_lead(unit: u16) -> bool {
    unit < 0x80 && b"{}()[];,~?:@.!%=*^+-/<>|&".contains(&(unit as u8))
}

impl Lex for Punctuator {
    fn peek<S: Source>(input: &SourceStream<S>) -> bool {
        input.peek_unit().map(is_punctuator_lead).unwrap_or(false)
    }

    fn lex<S: Source>(input: &mut SourceStream<S>, _: Context) -> LexResult<Self> {
        let start = input.position();

        let token = match input.advance() {
            Some('{') => Token::LeftBrace,
            Some('}') => Token::RightBrace,
            Some('(') => Token::LeftParen,
            Some(')') => Token::RightParen,
            Some('[') => Token::LeftBracket,
            Some(']') => Token::RightBracket,
            Some(';') => Token::Semicolon,
            Some(',') => Token::Comma,
            Some('~') => Token::Complement,
            Some('?') => {
                if input.eat('?') {
                    if input.eat('=') {
                        Token::CoalesceAssign
                    } else {
                        Token::Coalesce
                    }
                } else if input.upcoming(".")
                    && !matches!(input.peek_unit_at(1), Some(0x30..=0x39))
                {
                    // `a?.5:b` is a conditional.
                    input.advance();
                    Token::OptionalChain
                } else {
                    Token::QuestionMark
                }
            }
            Some(':') => Token::Colon,
            Some('@') => Token::Decorator,
            Some('.') => {
                if input.upcoming("..") {
                    input.advance();
                    input.advance();
                    Token::Ellipsis
                } else {
                    Token::Period
                }
            }
            Some('!') => {
                if input.eat('=') {
                    if input.eat('=') {
                        Token::StrictNotEqual
                    } else {
                        Token::LooseNotEqual
                    }
                } else {
                    Token::Negate
                }
            }
            Some('%') => {
                if input.eat('=') {
                    Token::ModuloAssign
                } else {
                    Token::Modulo
                }
            }
            Some('=') => {
                if input.eat('=') {
                    if input.eat('=') {
                        Token::StrictEqual
                    } else {
                        Token::LooseEqual
                    }
                } else if input.eat('>') {
                    Token::Arrow
                } else {
                    Token::Assign
                }
            }
            Some('*') => {
                if input.eat('*') {
                    if input.eat('=') {
                        Token::ExponentiateAssign
                    } else {
                        Token::Exponentiate
                    }
                } else if input.eat('=') {
                    Token::MultiplyAssign
                } else {
                    Token::Multiply
                }
            }
            Some('^') => {
                if input.eat('=') {
                    Token::BitwiseXorAssign
                } else {
                    Token::BitwiseXor
                }
            }
            Some('+') => {
                if input.eat('+') {
                    Token::Increment
                } else if input.eat('=') {
                    Token::AddAssign
                } else {
                    Token::Add
                }
            }
            Some('-') => {
                if input.eat('-') {
                    Token::Decrement
                } else if input.eat('=') {
                    Token::SubtractAssign
                } else {
                    Token::Subtract
                }
            }
            Some('/') => {
                if input.eat('=') {
                    Token::DivideAssign
                } else {
                    Token::Divide
                }
            }
            Some('<') => {
                if input.eat('<') {
                    if input.eat('=') {
                        Token::ShiftLeftAssign
                    } else {
                        Token::ShiftLeft
                    }
                } else if input.eat('=') {
                    Token::LessThanOrEqual
                } else {
                    Token::LessThan
                }
            }
            Some('>') => {
                if input.eat('>') {
                    if input.eat('>') {
                        if input.eat('=') {
                            Token::LogicalShiftRightAssign
                        } else {
                            Token::LogicalShiftRight
                        }
                    } else if input.eat('=') {
                        Token::ShiftRightAssign
                    } else {
                        Token::ShiftRight
                    }
                } else if input.eat('=') {
                    Token::GreaterThanOrEqual
                } else {
                    Token::GreaterThan
                }
            }
            Some('|') => {
                if input.eat('|') {
                    if input.eat('=') {
                        Token::LogicalOrAssign
                    } else {
                        Token::LogicalOr
                    }
                } else if input.eat('=') {
                    Token::BitwiseOrAssign
                } else {
                    Token::BitwiseOr
                }
            }
            Some('&') => {
                if input.eat('&') {
                    if input.eat('=') {
                        Token::LogicalAndAssign
                    } else {
                        Token::LogicalAnd
                    }
                } else if input.eat('=') {
                    Token::BitwiseAndAssign
                } else {
                    Token::BitwiseAnd
                }
            }
            Some(ch) => return Err(LexError::new(ErrorKind::IllegalCharacter(ch), start)),
            None => return Err(LexError::new(ErrorKind::IllegalCharacter('\0'), start)),
        };

        Ok(Self {
            span: Span::new(start.index, input.index()),
            token,
        })
    }
}
