use crate::interpreter::error::{ExpressionError, Malformation};
use crate::interpreter::operator::{Associativity, BinaryOperator, Function};
use crate::interpreter::token::Token;
use anyhow::{bail, Result};

/// Reorders infix tokens into postfix order using the shunting-yard algorithm.
///
/// The argument of a function is parsed on its own and emitted before the function
/// token, so that `sin(x^2)` becomes `x 2 ^ sin`.
pub(crate) fn infix_to_postfix(infix_tokens: &[Token], max_depth: usize) -> Result<Vec<Token>> {
    convert_span(infix_tokens, 0, max_depth)
}

fn convert_span(tokens: &[Token], depth: usize, max_depth: usize) -> Result<Vec<Token>> {
    if depth > max_depth {
        bail!(ExpressionError::RecursionLimitExceeded { limit: max_depth });
    }

    let mut operators: Vec<Token> = Vec::new();
    let mut output: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut position = 0;

    while let Some(token) = tokens.get(position) {
        position += 1;
        match token {
            token if token.is_value() => output.push(token.clone()),
            Token::Function(function) => {
                let argument = function_argument(tokens, &mut position, *function)?;
                let mut argument_postfix = convert_span(argument, depth + 1, max_depth)?;
                output.append(&mut argument_postfix);
                output.push(token.clone());
            }
            Token::LeftParentheses => operators.push(token.clone()),
            Token::RightParentheses => parse_closing_parenthesis_token(&mut operators, &mut output)?,
            _ => match BinaryOperator::from_token(token) {
                Some(operator) => parse_operator_token(&mut operators, &mut output, token, operator),
                None => bail!("Unexpected token {} in infix expression", token),
            },
        }
    }

    transfer_leftover_operators(&mut operators, &mut output)?;

    Ok(output)
}

/// Extracts the parenthesized argument following a function token, leaving
/// `position` just past its closing parenthesis.
fn function_argument<'a>(
    tokens: &'a [Token],
    position: &mut usize,
    function: Function,
) -> Result<&'a [Token]> {
    if tokens.get(*position) != Some(&Token::LeftParentheses) {
        bail!(ExpressionError::from(Malformation::MissingFunctionArgument(function)));
    }
    *position += 1;

    let start = *position;
    let mut balance = 1;
    while balance > 0 {
        match tokens.get(*position) {
            None => bail!(ExpressionError::from(Malformation::MismatchedParenthesis)),
            Some(Token::LeftParentheses) => balance += 1,
            Some(Token::RightParentheses) => balance -= 1,
            Some(_) => {}
        }
        *position += 1;
    }

    // Excludes the closing parenthesis.
    let argument = &tokens[start..*position - 1];
    if argument.is_empty() {
        bail!(ExpressionError::from(Malformation::EmptyFunctionArgument(function)));
    }
    Ok(argument)
}

fn transfer_leftover_operators(operators: &mut Vec<Token>, output: &mut Vec<Token>) -> Result<()> {
    while let Some(operator) = operators.pop() {
        match operator {
            Token::LeftParentheses | Token::RightParentheses => {
                bail!(ExpressionError::from(Malformation::MismatchedParenthesis));
            }
            operator => output.push(operator),
        }
    }
    Ok(())
}

fn parse_closing_parenthesis_token(operators: &mut Vec<Token>, output: &mut Vec<Token>) -> Result<()> {
    loop {
        match operators.pop() {
            None => bail!(ExpressionError::from(Malformation::MismatchedParenthesis)),
            // Discard the open parenthesis.
            Some(Token::LeftParentheses) => return Ok(()),
            Some(operator) => output.push(operator),
        }
    }
}

fn parse_operator_token(
    operators: &mut Vec<Token>,
    output: &mut Vec<Token>,
    token: &Token,
    operator: BinaryOperator,
) {
    while let Some(top_of_operator_stack) = operators.last() {
        if !should_pop(top_of_operator_stack, &operator, operator.associativity()) {
            break;
        }
        if let Some(other_operator_token) = operators.pop() {
            output.push(other_operator_token);
        }
    }

    operators.push(token.clone());
}

fn should_pop(
    top_of_operator_stack: &Token,
    incoming: &BinaryOperator,
    associativity: Associativity,
) -> bool {
    // An open parenthesis stays until its closing parenthesis arrives.
    let top = match BinaryOperator::from_token(top_of_operator_stack) {
        Some(top) => top,
        None => return false,
    };
    match associativity {
        Associativity::Left => top.precedence_ge(incoming),
        Associativity::Right => top.precedence_gt(incoming),
    }
}
