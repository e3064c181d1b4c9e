use crate::interpreter::error::{ExpressionError, Malformation};
use crate::interpreter::operator::Function;
use crate::interpreter::token::Token;
use anyhow::{bail, Result};
use itertools::Itertools;

/// Splits an infix expression into its tokens.
///
/// A run of digits becomes one integer literal and a run of letters becomes either
/// a function (if it names one) or an identifier. Whitespace is skipped.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use infix_derivative::interpreter::lexer::tokenize;
/// use infix_derivative::interpreter::token::Token;
///
/// let tokens = tokenize("x^12")?;
/// assert_eq!(
///     tokens,
///     vec![
///         Token::Identifier("x".to_string()),
///         Token::Caret,
///         Token::LiteralInteger(12),
///     ]
/// );
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokenize(expression: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut characters = expression.char_indices().peekable();

    while let Some(&(position, character)) = characters.peek() {
        if character.is_whitespace() {
            characters.next();
        } else if character.is_ascii_digit() {
            let digits: String = characters
                .peeking_take_while(|(_, character)| character.is_ascii_digit())
                .map(|(_, digit)| digit)
                .collect();
            let value = digits.parse::<i64>().map_err(|_| {
                ExpressionError::from(Malformation::LiteralOutOfRange { literal: digits.clone() })
            })?;
            tokens.push(Token::LiteralInteger(value));
        } else if character.is_ascii_alphabetic() {
            let word: String = characters
                .peeking_take_while(|(_, character)| character.is_ascii_alphabetic())
                .map(|(_, letter)| letter)
                .collect();
            let token = match Function::from_name(&word) {
                Some(function) => Token::Function(function),
                None => Token::Identifier(word),
            };
            tokens.push(token);
        } else {
            characters.next();
            let token = match character {
                '+' => Token::Plus,
                '-' => Token::Dash,
                '*' => Token::Asterisk,
                '/' => Token::ForwardSlash,
                '^' => Token::Caret,
                '(' => Token::LeftParentheses,
                ')' => Token::RightParentheses,
                _ => bail!(ExpressionError::from(Malformation::UnexpectedCharacter {
                    character,
                    position,
                })),
            };
            tokens.push(token);
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn simple_expression_is_tokenized() {
        let tokens = tokenize("x+y").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Identifier("x".to_string()),
                Token::Plus,
                Token::Identifier("y".to_string()),
            ]
        );
    }

    #[test]
    fn whitespace_is_skipped_and_runs_are_grouped() {
        let tokens = tokenize("  12 *ab -  (3)").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::LiteralInteger(12),
                Token::Asterisk,
                Token::Identifier("ab".to_string()),
                Token::Dash,
                Token::LeftParentheses,
                Token::LiteralInteger(3),
                Token::RightParentheses,
            ]
        );
    }

    #[test]
    fn function_names_become_function_tokens() {
        let tokens = tokenize("arcsin(x) / sinx").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Function(Function::ArcSine),
                Token::LeftParentheses,
                Token::Identifier("x".to_string()),
                Token::RightParentheses,
                Token::ForwardSlash,
                Token::Identifier("sinx".to_string()),
            ]
        );
    }

    #[test]
    fn digits_and_letters_split_into_separate_tokens() {
        let tokens = tokenize("2x").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::LiteralInteger(2),
                Token::Identifier("x".to_string()),
            ]
        );
    }

    #[test]
    fn unknown_character_returns_err() {
        let error = tokenize("x % y").unwrap_err();

        assert_eq!(
            error.downcast_ref::<ExpressionError>(),
            Some(&ExpressionError::Malformed(
                Malformation::UnexpectedCharacter {
                    character: '%',
                    position: 2,
                }
            ))
        );
    }

    #[test]
    fn too_large_literal_returns_err() {
        let error = tokenize("99999999999999999999").unwrap_err();

        assert!(matches!(
            error.downcast_ref::<ExpressionError>(),
            Some(ExpressionError::Malformed(
                Malformation::LiteralOutOfRange { .. }
            ))
        ));
    }

    #[test]
    fn empty_expression_has_no_tokens() {
        assert!(tokenize("   ").unwrap().is_empty());
    }
}
