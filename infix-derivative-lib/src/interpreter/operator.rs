use crate::interpreter::syntax::expression_tree::Node;
use crate::interpreter::token::Token;
use std::fmt;
use std::fmt::Formatter;

/// Function application binds tighter than any binary operator.
pub(crate) const FUNCTION_PRECEDENCE: u8 = 5;

/// A binary mathematical operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Exponentiate,
}

impl BinaryOperator {
    pub fn token(&self) -> Token {
        match self {
            BinaryOperator::Add => Token::Plus,
            BinaryOperator::Subtract => Token::Dash,
            BinaryOperator::Multiply => Token::Asterisk,
            BinaryOperator::Divide => Token::ForwardSlash,
            BinaryOperator::Exponentiate => Token::Caret,
        }
    }

    pub fn from_token(token: &Token) -> Option<BinaryOperator> {
        match token {
            Token::Plus => Some(BinaryOperator::Add),
            Token::Dash => Some(BinaryOperator::Subtract),
            Token::Asterisk => Some(BinaryOperator::Multiply),
            Token::ForwardSlash => Some(BinaryOperator::Divide),
            Token::Caret => Some(BinaryOperator::Exponentiate),
            _ => None,
        }
    }

    /// Exponentiation is deliberately left-associative: `a^b^c` is `(a^b)^c`.
    pub(crate) fn associativity(&self) -> Associativity {
        Associativity::Left
    }

    pub(crate) fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Subtract => 2,
            BinaryOperator::Multiply | BinaryOperator::Divide => 3,
            BinaryOperator::Exponentiate => 4,
        }
    }

    /// Whether `a op (b op c)` always equals `(a op b) op c`.
    pub(crate) fn is_associative(&self) -> bool {
        matches!(self, BinaryOperator::Add | BinaryOperator::Multiply)
    }

    pub(crate) fn precedence_eq(&self, other: &Self) -> bool {
        self.precedence().eq(&other.precedence())
    }

    pub(crate) fn precedence_gt(&self, other: &Self) -> bool {
        self.precedence().gt(&other.precedence())
    }

    pub(crate) fn precedence_ge(&self, other: &Self) -> bool {
        self.precedence().ge(&other.precedence())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// The catalogue of functions the parser recognizes and the differentiator knows
/// a derivative for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Function {
    Sine,
    Cosine,
    Tangent,
    Cotangent,
    ArcSine,
    ArcCosine,
    ArcTangent,
    ArcCotangent,
    NaturalLogarithm,
    PositiveSquareRoot,
}

impl Function {
    pub const ALL: [Function; 10] = [
        Function::Sine,
        Function::Cosine,
        Function::Tangent,
        Function::Cotangent,
        Function::ArcSine,
        Function::ArcCosine,
        Function::ArcTangent,
        Function::ArcCotangent,
        Function::NaturalLogarithm,
        Function::PositiveSquareRoot,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Function::Sine => "sin",
            Function::Cosine => "cos",
            Function::Tangent => "tan",
            Function::Cotangent => "ctg",
            Function::ArcSine => "arcsin",
            Function::ArcCosine => "arccos",
            Function::ArcTangent => "arctg",
            Function::ArcCotangent => "arcctg",
            Function::NaturalLogarithm => "ln",
            Function::PositiveSquareRoot => "sqrt",
        }
    }

    pub fn from_name(name: &str) -> Option<Function> {
        Function::ALL
            .into_iter()
            .find(|function| function.name() == name)
    }

    pub fn token(&self) -> Token {
        Token::Function(*self)
    }

    /// Builds f'(g) for this function f, where g is the given argument.
    ///
    /// The inner derivative g' is not included; the caller applies the chain rule.
    pub fn derivative_at(&self, argument: Node) -> Node {
        let one = || Node::new_literal_integer(1);
        let minus_one = || Node::new_literal_integer(-1);
        let squared = |node: Node| Node::new_binary_exponentiation(node, Node::new_literal_integer(2));

        match self {
            // cos(g)
            Function::Sine => Node::new_function_call(Function::Cosine, argument),
            // -1 * sin(g)
            Function::Cosine => Node::new_binary_multiplication(
                minus_one(),
                Node::new_function_call(Function::Sine, argument),
            ),
            // 1 / cos(g)^2
            Function::Tangent => Node::new_binary_division(
                one(),
                squared(Node::new_function_call(Function::Cosine, argument)),
            ),
            // -1 / sin(g)^2
            Function::Cotangent => Node::new_binary_division(
                minus_one(),
                squared(Node::new_function_call(Function::Sine, argument)),
            ),
            // 1 / sqrt(1 - g^2)
            Function::ArcSine => {
                Node::new_binary_division(one(), square_root_of_one_minus_square(argument))
            }
            // -1 / sqrt(1 - g^2)
            Function::ArcCosine => {
                Node::new_binary_division(minus_one(), square_root_of_one_minus_square(argument))
            }
            // 1 / (1 + g^2)
            Function::ArcTangent => Node::new_binary_division(
                one(),
                Node::new_binary_addition(one(), squared(argument)),
            ),
            // -1 / (1 + g^2)
            Function::ArcCotangent => Node::new_binary_division(
                minus_one(),
                Node::new_binary_addition(one(), squared(argument)),
            ),
            // 1 / g
            Function::NaturalLogarithm => Node::new_binary_division(one(), argument),
            // 1 / (2 * sqrt(g))
            Function::PositiveSquareRoot => Node::new_binary_division(
                one(),
                Node::new_binary_multiplication(
                    Node::new_literal_integer(2),
                    Node::new_function_call(Function::PositiveSquareRoot, argument),
                ),
            ),
        }
    }
}

fn square_root_of_one_minus_square(argument: Node) -> Node {
    let square = Node::new_binary_exponentiation(argument, Node::new_literal_integer(2));
    let difference = Node::new_binary_subtraction(Node::new_literal_integer(1), square);
    Node::new_function_call(Function::PositiveSquareRoot, difference)
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_equality_correspond_with_precedence() {
        let equal1 = BinaryOperator::Multiply;
        let equal2 = BinaryOperator::Divide;
        assert!(equal1.precedence_eq(&equal2))
    }

    #[test]
    fn operator_gt_correspond_with_precedence() {
        let greater = BinaryOperator::Exponentiate;
        let lesser = BinaryOperator::Multiply;
        assert!(greater.precedence_gt(&lesser))
    }

    #[test]
    fn operator_ge_correspond_with_precedence() {
        let equal1 = BinaryOperator::Add;
        let equal2 = BinaryOperator::Subtract;
        assert!(equal1.precedence_ge(&equal2))
    }

    #[test]
    fn functions_rank_above_every_operator() {
        let operators = [
            BinaryOperator::Add,
            BinaryOperator::Subtract,
            BinaryOperator::Multiply,
            BinaryOperator::Divide,
            BinaryOperator::Exponentiate,
        ];
        for operator in operators {
            assert!(operator.precedence() < FUNCTION_PRECEDENCE);
        }
    }

    #[test]
    fn exponentiation_is_left_associative() {
        assert_eq!(
            BinaryOperator::Exponentiate.associativity(),
            Associativity::Left
        );
    }

    #[test]
    fn every_function_is_found_by_its_name() {
        for function in Function::ALL {
            assert_eq!(Function::from_name(function.name()), Some(function));
        }
    }

    #[test]
    fn unknown_function_name_is_not_found() {
        assert_eq!(Function::from_name("sinh"), None);
        assert_eq!(Function::from_name("x"), None);
    }

    #[test]
    fn operator_token_converts_back_to_operator() {
        let operator = BinaryOperator::Divide;
        assert_eq!(BinaryOperator::from_token(&operator.token()), Some(operator));
        assert_eq!(BinaryOperator::from_token(&Token::LeftParentheses), None);
    }

    #[test]
    fn sine_derivative_is_cosine_of_same_argument() {
        let argument = Node::new_identifier("y".into());

        let derivative = Function::Sine.derivative_at(argument.clone());

        assert_eq!(
            derivative,
            Node::new_function_call(Function::Cosine, argument)
        );
    }

    #[test]
    fn square_root_derivative_keeps_argument_inside_root() {
        let argument = Node::new_binary_addition(
            Node::new_identifier("x".into()),
            Node::new_literal_integer(1),
        );

        let derivative = Function::PositiveSquareRoot.derivative_at(argument.clone());

        let expected = Node::new_binary_division(
            Node::new_literal_integer(1),
            Node::new_binary_multiplication(
                Node::new_literal_integer(2),
                Node::new_function_call(Function::PositiveSquareRoot, argument),
            ),
        );
        assert_eq!(derivative, expected);
    }
}
