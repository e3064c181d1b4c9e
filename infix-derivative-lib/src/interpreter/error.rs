use crate::interpreter::operator::Function;
use thiserror::Error;

/// Why an expression could not be turned into a derivative.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ExpressionError {
    #[error("Malformed expression")]
    Malformed(#[from] Malformation),
    #[error("Can not differentiate {expression}: only x^n and a^x powers are supported")]
    UnsupportedDerivativeShape { expression: String },
    #[error("Expression is nested deeper than the limit of {limit}")]
    RecursionLimitExceeded { limit: usize },
}

/// The specific way an expression is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Malformation {
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("integer literal {literal} is out of range")]
    LiteralOutOfRange { literal: String },
    #[error("mismatched parenthesis")]
    MismatchedParenthesis,
    #[error("expected '(' after function {0}")]
    MissingFunctionArgument(Function),
    #[error("function {0} has an empty argument")]
    EmptyFunctionArgument(Function),
    #[error("operator {0} is missing an operand")]
    MissingOperand(String),
    #[error("operand {0} is not connected to the rest of the expression")]
    DanglingOperand(String),
    #[error("the expression is empty")]
    EmptyExpression,
    #[error("'{0}' can not be used as a variable")]
    InvalidVariable(String),
}
