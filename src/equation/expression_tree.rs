//! Expression tree built from the postfix sequence and folded into a polynomial.
//!
//! # Build
//! Shift/reduce over the postfix tokens: literals are shifted onto the stack, an operator
//! reduces the top one (unary) or two (binary) nodes into a new node. Exactly one node must
//! remain at the end.
//!
//! # Evaluation
//! Bottom-up fold. Every node turns into a [`Polynomial`] once its children are folded:
//!
//! | node            | result                                             |
//! |-----------------|----------------------------------------------------|
//! | number `c`      | `c * x^0`                                          |
//! | variable        | `1 * x^1`                                          |
//! | unary `-` / `+` | every coefficient negated / unchanged              |
//! | `+` / `-`       | sorted merge, like powers combined                 |
//! | `*`             | monomial times polynomial                          |
//! | `/`             | polynomial divided by a monomial                   |
//! | `^`             | monomial raised to a constant integer              |
//!
//! Evaluation consumes the tree: each node is moved into the fold of its parent.
use crate::equation::errors::EquationError;
use crate::equation::polynomial::{Polynomial, Term};
use crate::equation::tokenizer::{Operator, Token, TokenKind};
use log::debug;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number {
        value: f64,
        position: usize,
    },
    Variable {
        multiplier: f64,
        position: usize,
    },
    UnaryOp {
        op: Operator,
        operand: Box<Node>,
        position: usize,
    },
    BinaryOp {
        op: Operator,
        left: Box<Node>,
        right: Box<Node>,
        position: usize,
    },
}

impl Node {
    pub fn position(&self) -> usize {
        match self {
            Node::Number { position, .. }
            | Node::Variable { position, .. }
            | Node::UnaryOp { position, .. }
            | Node::BinaryOp { position, .. } => *position,
        }
    }

    fn fold(self) -> Result<Polynomial, EquationError> {
        match self {
            Node::Number { value, .. } => Ok(Polynomial::constant(value)),
            Node::Variable { multiplier, .. } => Ok(Polynomial::variable(multiplier)),
            Node::UnaryOp {
                op,
                operand,
                position,
            } => {
                let operand = operand.fold()?;
                match op {
                    Operator::UnaryMinus => Ok(operand.negate()),
                    Operator::UnaryPlus => Ok(operand),
                    _ => Err(EquationError::tree(
                        format!("'{}' is not a unary operator", op),
                        Some(position),
                    )),
                }
            }
            Node::BinaryOp {
                op,
                left,
                right,
                position,
            } => {
                let left = left.fold()?;
                let right = right.fold()?;
                match op {
                    Operator::Add => Ok(left.add(right)),
                    Operator::Sub => Ok(left.sub(right)),
                    Operator::Mul => left.mul(right, position),
                    Operator::Div => left.div(right, position),
                    Operator::Pow => left.pow(right, position),
                    Operator::UnaryMinus | Operator::UnaryPlus => Err(EquationError::tree(
                        format!("'{}' is not a binary operator", op),
                        Some(position),
                    )),
                }
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Number { value, .. } => write!(f, "{}", value),
            Node::Variable { multiplier, .. } if *multiplier == 1.0 => write!(f, "X"),
            Node::Variable { multiplier, .. } => write!(f, "{}X", multiplier),
            Node::UnaryOp {
                op: Operator::UnaryMinus,
                operand,
                ..
            } => write!(f, "-{}", operand),
            Node::UnaryOp { operand, .. } => write!(f, "+{}", operand),
            Node::BinaryOp { op, left, right, .. } => write!(f, "({} {} {})", left, op, right),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionTree {
    root: Node,
}

impl ExpressionTree {
    /// Shift/reduce over a postfix sequence.
    pub fn build<I>(postfix: I) -> Result<Self, EquationError>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut stack: Vec<Node> = Vec::new();
        for token in postfix {
            let position = token.position;
            let node = match token.kind {
                TokenKind::Number(value) => Node::Number { value, position },
                TokenKind::Variable => Node::Variable {
                    multiplier: 1.0,
                    position,
                },
                TokenKind::Operator(op) if op.is_unary() => {
                    let operand = pop_operand(&mut stack, &token)?;
                    if let Node::UnaryOp { op: inner, .. } = &operand {
                        if *inner != op {
                            return Err(EquationError::tree(
                                "inconsistent adjacent unary operators",
                                Some(position),
                            ));
                        }
                    }
                    Node::UnaryOp {
                        op,
                        operand: Box::new(operand),
                        position,
                    }
                }
                TokenKind::Operator(op) => {
                    let right = pop_operand(&mut stack, &token)?;
                    let left = pop_operand(&mut stack, &token)?;
                    Node::BinaryOp {
                        op,
                        left: Box::new(left),
                        right: Box::new(right),
                        position,
                    }
                }
                _ => {
                    return Err(EquationError::tree(
                        format!("unrecognized token '{}'", token.text),
                        Some(position),
                    ));
                }
            };
            stack.push(node);
        }
        match stack.len() {
            1 => Ok(ExpressionTree {
                root: stack.remove(0),
            }),
            0 => Err(EquationError::tree("nothing to build a tree from", None)),
            _ => Err(EquationError::tree(
                "the postfix sequence leaves several nodes on the stack",
                Some(stack[1].position()),
            )),
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Folds the whole tree into one polynomial.
    pub fn evaluate(self) -> Result<Polynomial, EquationError> {
        let polynomial = self.root.fold()?;
        debug!("folded into {} term(s)", polynomial.terms().len());
        Ok(polynomial)
    }

    /// Folds the tree and flattens the result into descending terms.
    pub fn reduce(self) -> Result<Vec<Term>, EquationError> {
        Ok(self.evaluate()?.into_terms())
    }
}

fn pop_operand(stack: &mut Vec<Node>, operator: &Token) -> Result<Node, EquationError> {
    stack.pop().ok_or_else(|| {
        EquationError::tree(
            format!("operator '{}' is missing an operand", operator),
            Some(operator.position),
        )
    })
}
