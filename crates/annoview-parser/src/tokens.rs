//! Token definitions for model and annotation text.

use std::fmt;

use crate::span::Span;

/// Token types for Modelica-like model text.
///
/// Keywords are not distinguished from identifiers; the few places that care
/// (`parameter`, `annotation`, `model`) compare identifier text.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    // Literals
    Identifier(&'src str),
    Number(f64),
    /// A quoted string with escapes resolved.
    StringLiteral(String),

    // Operators
    Equals, // =
    Plus,   // +
    Minus,  // -
    Star,   // *
    Slash,  // /
    Dot,    // .

    // Punctuation
    LeftParen,    // (
    RightParen,   // )
    LeftBrace,    // {
    RightBrace,   // }
    LeftBracket,  // [
    RightBracket, // ]
    Comma,        // ,
    Semicolon,    // ;
    Colon,        // :

    /// Any other single character, such as `<` or `^`.
    Symbol(char),
    /// Opening character of an unterminated string or block comment.
    Error(&'src str),

    // Trivia
    LineComment(&'src str),
    BlockComment(&'src str),
    Whitespace,
}

impl Token<'_> {
    /// Whitespace and comments, which never carry meaning.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::LineComment(_) | Token::BlockComment(_)
        )
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        matches!(self, Token::Identifier(ident) if *ident == name)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier `{name}`"),
            Token::Number(value) => write!(f, "number `{value}`"),
            Token::StringLiteral(value) => write!(f, "string {value:?}"),
            Token::Equals => write!(f, "`=`"),
            Token::Plus => write!(f, "`+`"),
            Token::Minus => write!(f, "`-`"),
            Token::Star => write!(f, "`*`"),
            Token::Slash => write!(f, "`/`"),
            Token::Dot => write!(f, "`.`"),
            Token::LeftParen => write!(f, "`(`"),
            Token::RightParen => write!(f, "`)`"),
            Token::LeftBrace => write!(f, "`{{`"),
            Token::RightBrace => write!(f, "`}}`"),
            Token::LeftBracket => write!(f, "`[`"),
            Token::RightBracket => write!(f, "`]`"),
            Token::Comma => write!(f, "`,`"),
            Token::Semicolon => write!(f, "`;`"),
            Token::Colon => write!(f, "`:`"),
            Token::Symbol(c) => write!(f, "`{c}`"),
            Token::Error(opener) => write!(f, "unterminated `{opener}`"),
            Token::LineComment(_) | Token::BlockComment(_) => write!(f, "comment"),
            Token::Whitespace => write!(f, "whitespace"),
        }
    }
}

/// A token with position information for winnow integration
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}
