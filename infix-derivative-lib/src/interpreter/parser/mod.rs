mod infix_converter;

use crate::interpreter::parser::infix_converter::infix_to_postfix;
use crate::interpreter::syntax::expression_tree;
use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;
use anyhow::Result;
use log::debug;

/// Parses the given infix tokens into an equivalent expression tree,
/// which is easier to manipulate than the original tokens.
///
/// # Arguments
///
/// * `infix_tokens`: The tokens to parse, in infix format.
/// * `max_depth`: How deeply the expression may nest before parsing is aborted.
///
/// returns: The equivalent expression tree.
///
/// # Examples
///
/// ```
/// # use anyhow::Result;
/// # fn main() -> Result<()> {
/// use infix_derivative::interpreter::parser::parse;
/// use infix_derivative::interpreter::token::Token;
///
/// let infix_tokens = vec![
///     Token::Identifier("x".to_string()),
///     Token::Caret,
///     Token::LiteralInteger(2),
/// ];
/// let tree = parse(infix_tokens, 64)?;
/// let regenerated_tokens = tree.to_infix();
/// # Ok::<(), anyhow::Error>(()) }
/// ```
pub fn parse(infix_tokens: Vec<Token>, max_depth: usize) -> Result<Node> {
    let postfix_tokens = to_postfix(&infix_tokens, max_depth)?;
    let tree = expression_tree::new_tree(postfix_tokens, max_depth)?;
    Ok(tree)
}

/// Reorders the given infix tokens into postfix (reverse Polish) order.
pub fn to_postfix(infix_tokens: &[Token], max_depth: usize) -> Result<Vec<Token>> {
    let postfix_tokens = infix_to_postfix(infix_tokens, max_depth)?;
    debug!("Postfix tokens: {:?}", postfix_tokens);
    Ok(postfix_tokens)
}
