use std::fmt::Display;

use super::{ast::NodeId, types::Type};

/// Binary operators, in the fixed set the language supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    And,
    Or,
    NotEqual,
    Equal,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::And => "&&",
            BinaryOperator::Or => "||",
            BinaryOperator::NotEqual => "!=",
            BinaryOperator::Equal => "==",
            BinaryOperator::Greater => ">",
            BinaryOperator::GreaterEqual => ">=",
            BinaryOperator::Less => "<",
            BinaryOperator::LessEqual => "<=",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    Not,
}

impl Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOperator::Negate => write!(f, "-"),
            UnaryOperator::Not => write!(f, "!"),
        }
    }
}

/// Literal value as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    Boolean(bool),
    String(String),
}

impl Literal {
    /// The static type of the literal.
    pub fn get_type(&self) -> Type {
        match self {
            Literal::Number(_) => Type::Number,
            Literal::Boolean(_) => Type::Boolean,
            Literal::String(_) => Type::String,
        }
    }
}

/// Identifier
///
/// A name in the source together with its node identity. The address the
/// resolver computes for it lives in `Resolutions`, keyed by `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub id: NodeId,
}

/// Expression Types
///
/// Defines the various kinds of expressions in the AST.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        left: Box<Expr>,
        operator: BinaryOperator,
        right: Box<Expr>,
    },
    Unary {
        operator: UnaryOperator,
        operand: Box<Expr>,
    },
    Assign {
        target: Identifier,
        value: Box<Expr>,
    },
    Literal(Literal),
    Identifier(Identifier),
    Call {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
}
