use crate::interpreter::operator::Function;
use std::fmt;
use std::fmt::Formatter;

/// A discrete part of an expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    LiteralInteger(i64),
    Identifier(String),
    Function(Function),
    Plus,
    Dash,
    Asterisk,
    ForwardSlash,
    Caret,
    LeftParentheses,
    RightParentheses,
}

impl Token {
    /// A 'value' is a token that represents an operand on its own,
    /// i.e. a literal or an identifier.
    pub fn is_value(&self) -> bool {
        matches!(self, Token::LiteralInteger(_) | Token::Identifier(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Token::LiteralInteger(value) => write!(f, "{}", value),
            Token::Identifier(name) => write!(f, "{}", name),
            Token::Function(function) => write!(f, "{}", function),
            Token::Plus => write!(f, "+"),
            Token::Dash => write!(f, "-"),
            Token::Asterisk => write!(f, "*"),
            Token::ForwardSlash => write!(f, "/"),
            Token::Caret => write!(f, "^"),
            Token::LeftParentheses => write!(f, "("),
            Token::RightParentheses => write!(f, ")"),
        }
    }
}
