use crate::interpreter::config::{DifferentiationConfig, UnsupportedPowerPolicy};
use crate::interpreter::error::{ExpressionError, Malformation};
use crate::interpreter::operator::{BinaryOperator, Function};
use crate::interpreter::syntax::expression_tree::Node;
use anyhow::{bail, Result};
use log::{trace, warn};

/// Differentiates the given expression tree with respect to the configured variable.
///
/// The input tree is left untouched; the derivative is built as a new tree. Only a
/// handful of local folds are applied (`0 + a -> a`, `a + a -> 2 * a`, `a - 0 -> a`,
/// dropping product terms with a zero factor), no further simplification is done.
///
/// # Arguments
///
/// * `tree`: The expression to differentiate, represented as an expression tree.
/// * `config`: Holds the variable to differentiate with respect to, and how to treat
///   powers that can not be differentiated.
///
/// returns: The derivative of the input expression tree represented as an expression tree.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use infix_derivative::interpreter::config::DifferentiationConfig;
/// use infix_derivative::interpreter::convert;
/// use infix_derivative::interpreter::differentiator::find_derivative;
///
/// let tree = convert("x^2".to_string())?;
/// let derivative = find_derivative(&tree, &DifferentiationConfig::default())?;
/// assert_eq!(derivative, convert("2 * x^1".to_string())?);
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn find_derivative(tree: &Node, config: &DifferentiationConfig) -> Result<Node> {
    differentiate_subtree(tree, config, 0)
}

fn differentiate_subtree(node: &Node, config: &DifferentiationConfig, depth: usize) -> Result<Node> {
    if depth > config.max_depth {
        bail!(ExpressionError::RecursionLimitExceeded {
            limit: config.max_depth
        });
    }
    let derive = |child: &Node| differentiate_subtree(child, config, depth + 1);

    match node {
        Node::LiteralInteger(_) => Ok(zero()),
        Node::Identifier(name) => {
            if *name == config.with_respect_to {
                Ok(Node::new_literal_integer(1))
            } else {
                Ok(zero())
            }
        }
        Node::BinaryOperation {
            operator,
            left_operand,
            right_operand,
        } => match operator {
            BinaryOperator::Add => {
                let left = derive(left_operand)?;
                let right = derive(right_operand)?;
                Ok(sum_rule(left, right))
            }
            BinaryOperator::Subtract => {
                let left = derive(left_operand)?;
                let right = derive(right_operand)?;
                if is_zero(&right) {
                    return Ok(left);
                }
                Ok(Node::new_binary_subtraction(left, right))
            }
            BinaryOperator::Multiply => {
                let left = derive(left_operand)?;
                let right = derive(right_operand)?;
                Ok(product_rule(left_operand, right_operand, left, right))
            }
            BinaryOperator::Divide => {
                // (f'g - fg') / g^2
                let left = derive(left_operand)?;
                let right = derive(right_operand)?;
                let numerator = Node::new_binary_subtraction(
                    Node::new_binary_multiplication(left, *right_operand.clone()),
                    Node::new_binary_multiplication(*left_operand.clone(), right),
                );
                let denominator = Node::new_binary_exponentiation(
                    *right_operand.clone(),
                    Node::new_literal_integer(2),
                );
                Ok(Node::new_binary_division(numerator, denominator))
            }
            BinaryOperator::Exponentiate => power_rule(node, left_operand, right_operand, config),
        },
        Node::FunctionCall { function, argument } => {
            // f(g(x))' = f'(g(x)) * g'(x)
            trace!("Applying chain rule to {:?}", node);
            let outer = function.derivative_at(*argument.clone());
            let inner = derive(argument)?;
            Ok(Node::new_binary_multiplication(outer, inner))
        }
    }
}

fn sum_rule(left: Node, right: Node) -> Node {
    if is_zero(&left) {
        right
    } else if is_zero(&right) {
        left
    } else if left == right {
        // f' + f' -> 2 * f'
        Node::new_binary_multiplication(Node::new_literal_integer(2), left)
    } else {
        Node::new_binary_addition(left, right)
    }
}

/// (fg)' = f'g + fg', where a term with a zero derivative factor is left out.
fn product_rule(
    left_operand: &Node,
    right_operand: &Node,
    left_derivative: Node,
    right_derivative: Node,
) -> Node {
    let left_term = (!is_zero(&left_derivative))
        .then(|| Node::new_binary_multiplication(left_derivative, right_operand.clone()));
    let right_term = (!is_zero(&right_derivative))
        .then(|| Node::new_binary_multiplication(left_operand.clone(), right_derivative));

    match (left_term, right_term) {
        (Some(left_term), Some(right_term)) => Node::new_binary_addition(left_term, right_term),
        (Some(term), None) | (None, Some(term)) => term,
        (None, None) => zero(),
    }
}

/// Only two shapes of powers are differentiated:
/// `x^n` -> `n * x^(n - 1)` and `a^x` -> `ln(a) * a^x`.
fn power_rule(
    node: &Node,
    base: &Node,
    exponent: &Node,
    config: &DifferentiationConfig,
) -> Result<Node> {
    let variable = config.with_respect_to.as_str();

    match (base, exponent) {
        (Node::Identifier(name), Node::LiteralInteger(power)) if name == variable => {
            trace!("Applying power rule to {:?}", node);
            let lowered_power = match power.checked_sub(1) {
                Some(lowered_power) => lowered_power,
                None => bail!(ExpressionError::from(Malformation::LiteralOutOfRange {
                    literal: power.to_string()
                })),
            };
            Ok(Node::new_binary_multiplication(
                Node::new_literal_integer(*power),
                Node::new_binary_exponentiation(
                    base.clone(),
                    Node::new_literal_integer(lowered_power),
                ),
            ))
        }
        (Node::Identifier(_) | Node::LiteralInteger(_), Node::Identifier(name))
            if name == variable && !base.is_identifier(variable) =>
        {
            trace!("Applying exponential rule to {:?}", node);
            Ok(Node::new_binary_multiplication(
                Node::new_function_call(Function::NaturalLogarithm, base.clone()),
                node.clone(),
            ))
        }
        _ if !node.mentions(variable) => Ok(zero()),
        _ => unsupported_power(node, config),
    }
}

fn unsupported_power(node: &Node, config: &DifferentiationConfig) -> Result<Node> {
    let expression = crate::interpreter::render(node)?;
    match config.unsupported_powers {
        UnsupportedPowerPolicy::Zero => {
            warn!("Can not differentiate {}, using 0 as its derivative", expression);
            Ok(zero())
        }
        UnsupportedPowerPolicy::Reject => {
            bail!(ExpressionError::UnsupportedDerivativeShape { expression })
        }
    }
}

fn zero() -> Node {
    Node::new_literal_integer(0)
}

fn is_zero(node: &Node) -> bool {
    node.is_literal_integer(0)
}
