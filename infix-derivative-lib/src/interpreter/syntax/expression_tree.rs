use crate::interpreter::error::{ExpressionError, Malformation};
use crate::interpreter::operator::{BinaryOperator, Function, FUNCTION_PRECEDENCE};
use crate::interpreter::syntax::syntax_visitor::{
    walk_binary_operation, walk_function_call, IdentifierSearchVisitor, SyntaxVisitor,
};
use crate::interpreter::token::Token;
use anyhow::{bail, Result};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Node {
    // Terminal symbols (leaves)
    LiteralInteger(i64),
    Identifier(String),
    // Non-terminal symbols (non-leaves)
    BinaryOperation {
        operator: BinaryOperator,
        left_operand: Box<Node>,
        right_operand: Box<Node>,
    },
    FunctionCall {
        function: Function,
        argument: Box<Node>,
    },
}

impl Node {
    pub fn new_literal_integer(value: i64) -> Node {
        Node::LiteralInteger(value)
    }

    pub fn new_identifier(name: String) -> Node {
        Node::Identifier(name)
    }

    pub fn new_binary_operation(
        operator: BinaryOperator,
        left_operand: Node,
        right_operand: Node,
    ) -> Node {
        Node::BinaryOperation {
            operator,
            left_operand: Box::new(left_operand),
            right_operand: Box::new(right_operand),
        }
    }

    pub fn new_binary_addition(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Add, left_operand, right_operand)
    }

    pub fn new_binary_subtraction(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Subtract, left_operand, right_operand)
    }

    pub fn new_binary_multiplication(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Multiply, left_operand, right_operand)
    }

    pub fn new_binary_division(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Divide, left_operand, right_operand)
    }

    pub fn new_binary_exponentiation(left_operand: Node, right_operand: Node) -> Node {
        Self::new_binary_operation(BinaryOperator::Exponentiate, left_operand, right_operand)
    }

    pub fn new_function_call(function: Function, argument: Node) -> Node {
        Node::FunctionCall {
            function,
            argument: Box::new(argument),
        }
    }

    pub fn is_literal_integer(&self, compare_to: i64) -> bool {
        match self {
            Node::LiteralInteger(value) => *value == compare_to,
            _ => false,
        }
    }

    pub fn is_identifier(&self, compare_to: &str) -> bool {
        match self {
            Node::Identifier(name) => *name == compare_to,
            _ => false,
        }
    }

    /// Whether the identifier occurs anywhere in this tree.
    pub fn mentions(&self, identifier: &str) -> bool {
        let mut visitor = IdentifierSearchVisitor {
            name: identifier,
            found: false,
        };
        self.accept(&mut visitor);
        visitor.found
    }

    /// The binding strength of the top operation, or `None` for leaves.
    fn precedence(&self) -> Option<u8> {
        match self {
            Node::LiteralInteger(_) | Node::Identifier(_) => None,
            Node::BinaryOperation { operator, .. } => Some(operator.precedence()),
            Node::FunctionCall { .. } => Some(FUNCTION_PRECEDENCE),
        }
    }

    /// Calls the correct visitor method for the node variant on the given visitor.
    pub(crate) fn accept(&self, visitor: &mut impl SyntaxVisitor) {
        match self {
            Node::LiteralInteger(value) => visitor.visit_literal_integer(*value),
            Node::Identifier(name) => visitor.visit_identifier(name),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => visitor.visit_binary_operation(operator, left_operand, right_operand),
            Node::FunctionCall { function, argument } => {
                visitor.visit_function_call(function, argument)
            }
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.format_tree(f)
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::LiteralInteger(value) => write!(f, "{:?}", value),
            Node::Identifier(name) => write!(f, "{:?}", name),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => write!(f, "({:?} {:?} {:?})", operator, left_operand, right_operand),
            Node::FunctionCall { function, argument } => {
                write!(f, "({:?} {:?})", function, argument)
            }
        }
    }
}

/// Generates an expression tree based off of the given tokens.
///
/// # Arguments
///
/// * `postfix_tokens`: Tokens, ordered in postfix notation, to convert to an expression tree.
/// * `max_depth`: The deepest tree that may be built.
///
/// returns: The root of the generated expression tree.
pub fn new_tree(mut tokens: Vec<Token>, max_depth: usize) -> Result<Node> {
    tokens.reverse();
    // Every operand is paired with the depth of its subtree.
    let mut operands: Vec<(Node, usize)> = Vec::new();

    while let Some(token) = tokens.pop() {
        let (node, depth) = match token {
            Token::LiteralInteger(value) => (Node::new_literal_integer(value), 1),
            Token::Identifier(name) => (Node::new_identifier(name), 1),
            Token::Function(function) => {
                let (argument, depth) = pop_operand(&mut operands, &token)?;
                (Node::new_function_call(function, argument), depth + 1)
            }
            Token::LeftParentheses | Token::RightParentheses => {
                bail!(ExpressionError::from(Malformation::MismatchedParenthesis))
            }
            _ => {
                let (operand_two, depth_two) = pop_operand(&mut operands, &token)?;
                let (operand_one, depth_one) = pop_operand(&mut operands, &token)?;

                let operator = match BinaryOperator::from_token(&token) {
                    Some(operator) => operator,
                    None => bail!("Should be unreachable. If this occurs, check the other match-arms above."),
                };
                let node = Node::new_binary_operation(operator, operand_one, operand_two);
                (node, depth_one.max(depth_two) + 1)
            }
        };

        if depth > max_depth {
            bail!(ExpressionError::RecursionLimitExceeded { limit: max_depth });
        }
        operands.push((node, depth));
    }

    let (root, _) = match operands.pop() {
        Some(root) => root,
        None => bail!(ExpressionError::from(Malformation::EmptyExpression)),
    };
    if let Some((dangling, _)) = operands.pop() {
        bail!(ExpressionError::from(Malformation::DanglingOperand(
            crate::interpreter::render(&dangling)?
        )));
    }
    Ok(root)
}

fn pop_operand(operands: &mut Vec<(Node, usize)>, operator: &Token) -> Result<(Node, usize)> {
    match operands.pop() {
        Some(operand) => Ok(operand),
        None => bail!(ExpressionError::from(Malformation::MissingOperand(
            operator.to_string()
        ))),
    }
}

impl Node {
    pub fn to_infix(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        self.build_expression(&mut tokens);
        tokens
    }

    fn build_expression(&self, tokens: &mut Vec<Token>) {
        match self {
            Node::LiteralInteger(value) => tokens.push(Token::LiteralInteger(*value)),
            Node::Identifier(name) => tokens.push(Token::Identifier(name.to_string())),
            Node::BinaryOperation {
                operator,
                left_operand,
                right_operand,
            } => {
                parenthesize_if(
                    tokens,
                    || left_operand.binds_looser_than(operator),
                    |tokens| left_operand.build_expression(tokens),
                );
                tokens.push(operator.token());
                parenthesize_if(
                    tokens,
                    || {
                        right_operand.binds_looser_than(operator)
                            || (!operator.is_associative()
                                && right_operand.shares_precedence_with(operator))
                    },
                    |tokens| right_operand.build_expression(tokens),
                );
            }
            Node::FunctionCall { function, argument } => {
                tokens.push(function.token());
                tokens.push(Token::LeftParentheses);
                argument.build_expression(tokens);
                tokens.push(Token::RightParentheses);
            }
        }
    }

    /// When a child operator has lower precedence than its parent, it and its operands
    /// need to be wrapped in parentheses.
    fn binds_looser_than(&self, parent_operator: &BinaryOperator) -> bool {
        self.precedence()
            .map_or(false, |precedence| precedence < parent_operator.precedence())
    }

    /// A right operand of `-`, `/` or `^` is also wrapped when its operator has the
    /// same precedence as the parent, which goes beyond the strictly-lower rule.
    /// Otherwise `a - (b - c)` would be printed as `a - b - c` and read back as
    /// `(a - b) - c`.
    fn shares_precedence_with(&self, parent_operator: &BinaryOperator) -> bool {
        match self {
            Node::BinaryOperation { operator, .. } => operator.precedence_eq(parent_operator),
            _ => false,
        }
    }

    fn format_tree(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut visitor = TreeBuilderVisitor {
            builder: TreeBuilder::new("expression".into()),
        };
        self.accept(&mut visitor);

        let mut buffer: Vec<u8> = Vec::new();
        match write_tree(&visitor.builder.build(), &mut buffer) {
            Ok(_) => {}
            Err(_) => return Err(fmt::Error),
        }
        let text = match std::str::from_utf8(&buffer) {
            Ok(text) => text,
            Err(_) => return Err(fmt::Error),
        };
        f.write_str(text)
    }
}

struct TreeBuilderVisitor {
    builder: TreeBuilder,
}

impl SyntaxVisitor for TreeBuilderVisitor {
    fn visit_literal_integer(&mut self, value: i64) {
        self.builder.add_empty_child(format!("{}", value));
    }
    fn visit_identifier(&mut self, name: &str) {
        self.builder.add_empty_child(name.to_string());
    }
    fn visit_binary_operation(
        &mut self,
        operator: &BinaryOperator,
        left_operand: &Node,
        right_operand: &Node,
    ) {
        self.builder.begin_child(format!("{}", operator));
        walk_binary_operation(self, left_operand, right_operand);
        self.builder.end_child();
    }
    fn visit_function_call(&mut self, function: &Function, argument: &Node) {
        self.builder.begin_child(format!("{}", function));
        walk_function_call(self, argument);
        self.builder.end_child();
    }
}

fn parenthesize_if(
    tokens: &mut Vec<Token>,
    predicate: impl Fn() -> bool,
    mut build_interior: impl FnMut(&mut Vec<Token>),
) {
    let mut close_parentheses = false;

    if predicate() {
        tokens.push(Token::LeftParentheses);
        close_parentheses = true;
    }

    build_interior(tokens);

    if close_parentheses {
        tokens.push(Token::RightParentheses);
    }
}
