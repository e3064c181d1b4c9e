pub mod config;
pub mod differentiator;
pub mod error;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod syntax;
pub mod token;

use crate::interpreter::config::{DifferentiationConfig, DEFAULT_MAX_DEPTH};
use crate::interpreter::differentiator::find_derivative;
use crate::interpreter::token::Token;
use anyhow::{Context, Result};
use itertools::Itertools;
use log::debug;
use string_builder::Builder;
use syntax::expression_tree::Node;

/// Calculates the derivative of the given expression with respect to the given variable.
///
/// # Arguments
///
/// * `expression`: A text expression in infix format.
/// * `with_respect_to`: Name of a variable present in the expression.
///
/// returns: The derivative of the expression, in text.
///
/// # Examples
///
/// ```
/// use infix_derivative::interpreter::differentiate;
///
/// let expression = "a^x";
/// let derivative = differentiate(expression.to_string(), "x".to_string()).unwrap();
/// assert_eq!(derivative, "ln(a) * a ^ x");
/// ```
pub fn differentiate(expression: String, with_respect_to: String) -> Result<String> {
    differentiate_with(expression, &DifferentiationConfig::with_respect_to(with_respect_to))
}

/// Same as [`differentiate`], with every setting taken from the given configuration.
pub fn differentiate_with(expression: String, config: &DifferentiationConfig) -> Result<String> {
    config.validate()?;
    let expression_tree = convert_with_limit(expression, config.max_depth)?;
    debug!("Expression tree:\n{}", expression_tree);
    let derivative = find_derivative(&expression_tree, config)?;
    debug!("Derivative tree:\n{}", derivative);
    render(&derivative)
}

/// Converts the given input string into an equivalent expression tree,
/// which is easier to manipulate than the original string.
///
/// # Arguments
///
/// * `expression`: The text-representation of the infix expression.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// use infix_derivative::interpreter::convert;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let expression = "x^2";
/// let tree = convert(expression.into())?;
/// let regenerated_tokens = tree.to_infix();
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn convert(expression: String) -> Result<Node> {
    convert_with_limit(expression, DEFAULT_MAX_DEPTH)
}

/// Same as [`convert`], but fails once the expression nests deeper than `max_depth`.
pub fn convert_with_limit(expression: String, max_depth: usize) -> Result<Node> {
    let tokens = lexer::tokenize(&expression)
        .with_context(|| format!("Could not read expression '{}'", expression))?;
    let expression_tree = parser::parse(tokens, max_depth)
        .with_context(|| format!("Could not parse expression '{}'", expression))?;
    Ok(expression_tree)
}

/// Converts the given input string into tokens in postfix (reverse Polish) order.
pub fn to_postfix(expression: String, max_depth: usize) -> Result<Vec<Token>> {
    let tokens = lexer::tokenize(&expression)?;
    parser::to_postfix(&tokens, max_depth)
}

/// Writes the given tree back as an infix expression.
pub fn render(tree: &Node) -> Result<String> {
    tokens_to_string(tree.to_infix())
}

/// Pretty-prints the given vector of infix tokens with added whitespace.
///
/// Tokens are separated by a single space, except directly inside parentheses and
/// between a function and its opening parenthesis.
///
/// # Arguments
///
/// * `tokens`: The tokens to print.
///
/// returns: A pretty-printed text-version of the given tokens.
///
/// # Examples
///
/// ```
/// use infix_derivative::interpreter::tokens_to_string;
/// use infix_derivative::interpreter::operator::Function;
/// use infix_derivative::interpreter::token::Token;
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let tokens = vec![
///     Token::Function(Function::NaturalLogarithm),
///     Token::LeftParentheses,
///     Token::Identifier("x".to_string()),
///     Token::RightParentheses,
///     Token::Caret,
///     Token::LiteralInteger(2),
/// ];
/// let pretty_printed_tokens = tokens_to_string(tokens)?;
/// assert_eq!(pretty_printed_tokens, "ln(x) ^ 2");
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn tokens_to_string(tokens: Vec<Token>) -> Result<String> {
    let mut builder = Builder::new(tokens.len() * 2);
    let mut previous: Option<&Token> = None;

    for token in &tokens {
        let separated = match previous {
            None | Some(Token::LeftParentheses) | Some(Token::Function(_)) => false,
            Some(_) => *token != Token::RightParentheses,
        };
        if separated {
            builder.append(" ");
        }
        builder.append(token.to_string());
        previous = Some(token);
    }

    builder.string().context("Failed to build token string")
}

/// Prints postfix tokens separated by single spaces.
pub fn postfix_to_string(tokens: &[Token]) -> String {
    tokens.iter().join(" ")
}

#[cfg(test)]
mod interpreter_tests {
    use super::*;
    use crate::interpreter::error::{ExpressionError, Malformation};
    use parameterized_macro::parameterized;

    #[test]
    fn simple_expression_regenerates_to_itself() {
        let expression = "a + b";

        let tree = convert(expression.into()).unwrap();
        let regenerated_expression = render(&tree).unwrap();

        assert_eq!(regenerated_expression, expression)
    }

    #[test]
    fn complex_expression_regenerates_to_itself() {
        let expression = "a + b * (c - d) / e ^ 2";

        let tree = convert(expression.into()).unwrap();
        let regenerated_expression = render(&tree).unwrap();

        assert_eq!(regenerated_expression, expression)
    }

    #[test]
    fn redundant_parentheses_are_stripped_when_regenerating() {
        let redundant_expression = "a + ((b) * ((c - d)) / (e^2))";
        let expected_expression = "a + b * (c - d) / e ^ 2";

        let tree = convert(redundant_expression.into()).unwrap();
        let regenerated_expression = render(&tree).unwrap();

        assert_eq!(regenerated_expression, expected_expression)
    }

    #[parameterized(
    expression = {
    "x - (y - z)",
    "a / (b * c)",
    "(a^b)^c",
    "a^(b^c)",
    "sqrt(1 - x^2) / (2 + ln(y))",
    "arcctg(arctg(x) * 3 - 1)",
    }
    )]
    fn regenerated_expression_parses_to_same_tree(expression: &str) {
        let tree = convert(expression.into()).unwrap();

        let regenerated_expression = render(&tree).unwrap();
        let regenerated_tree = convert(regenerated_expression).unwrap();

        assert_eq!(regenerated_tree, tree);
    }

    #[parameterized(
    expression = {
    "a^x",
    "x^3",
    "x",
    "3",
    "y",
    "x + x",
    "x * x",
    "x^y",
    "x + 7",
    "x * 5",
    "3 - x",
    "x / y",
    "sin(x^2)",
    "cos(x)",
    "sqrt(x)",
    "tan(x)",
    "arcsin(x)",
    "x - (x^2 + x)",
    "x^3 + 2 * x^2 - 4 * x + 3",
    },
    expected_derivative = {
    "ln(a) * a ^ x",
    "3 * x ^ 2",
    "1",
    "0",
    "0",
    "2 * 1",
    "1 * x + x * 1",
    "0",
    "1",
    "1 * 5",
    "0 - 1",
    "(1 * y - x * 0) / y ^ 2",
    "cos(x ^ 2) * 2 * x ^ 1",
    "-1 * sin(x) * 1",
    "1 / (2 * sqrt(x)) * 1",
    "1 / cos(x) ^ 2 * 1",
    "1 / sqrt(1 - x ^ 2) * 1",
    "1 - (2 * x ^ 1 + 1)",
    "3 * x ^ 2 + 2 * 2 * x ^ 1 - 4 * 1",
    }
    )]
    fn differentiate_expression_returns_correct_derivative(
        expression: &str,
        expected_derivative: &str,
    ) {
        let actual_derivative = differentiate(expression.to_string(), "x".to_string()).unwrap();
        assert_eq!(actual_derivative, expected_derivative);
    }

    #[test]
    fn strict_configuration_rejects_unsupported_power() {
        let config = DifferentiationConfig::default().strict();

        let error = differentiate_with("2 * x^x".to_string(), &config).unwrap_err();

        assert_eq!(
            error.downcast_ref::<ExpressionError>(),
            Some(&ExpressionError::UnsupportedDerivativeShape {
                expression: "x ^ x".to_string()
            })
        );
    }

    #[parameterized(
    expression = {
    "",
    "(x + y",
    "x +",
    "-x",
    "x y",
    "x $ 2",
    "sin x",
    }
    )]
    fn malformed_expression_returns_err(expression: &str) {
        let error = differentiate(expression.to_string(), "x".to_string()).unwrap_err();

        assert!(
            matches!(
                error.downcast_ref::<ExpressionError>(),
                Some(ExpressionError::Malformed(_))
            ),
            "{:?}",
            error
        );
    }

    #[test]
    fn parse_error_mentions_expression() {
        let error = convert("(x + y".to_string()).unwrap_err();

        assert_eq!(error.to_string(), "Could not parse expression '(x + y'");
        assert_eq!(
            error.downcast_ref::<ExpressionError>(),
            Some(&ExpressionError::Malformed(Malformation::MismatchedParenthesis))
        );
    }

    #[test]
    fn invalid_variable_returns_err() {
        let error = differentiate("x".to_string(), "cos".to_string()).unwrap_err();

        assert_eq!(
            error.downcast_ref::<ExpressionError>(),
            Some(&ExpressionError::Malformed(Malformation::InvalidVariable(
                "cos".to_string()
            )))
        );
    }

    #[test]
    fn deeply_nested_expression_returns_err() {
        let expression = format!("{}x{}", "sin(".repeat(40), ")".repeat(40));
        let config = DifferentiationConfig {
            max_depth: 16,
            ..DifferentiationConfig::default()
        };

        let error = differentiate_with(expression, &config).unwrap_err();

        assert_eq!(
            error.downcast_ref::<ExpressionError>(),
            Some(&ExpressionError::RecursionLimitExceeded { limit: 16 })
        );
    }

    #[test]
    fn postfix_is_printed_with_spaces() {
        let postfix = to_postfix("2 * sin(x) + y^3".to_string(), DEFAULT_MAX_DEPTH).unwrap();

        assert_eq!(postfix_to_string(&postfix), "2 x sin * y 3 ^ +");
    }
}
