//! Infix to postfix conversion for a whole equation.
//!
//! The converter is the classic shunting-yard algorithm with three additions:
//! - a `+`/`-` standing where a binary operator is impossible becomes a unary operator
//! - a `*` is synthesized for implicit products like `2x`, `xx`, `(x+1)x`, `(x)2`
//! - `left = right` is rewritten as `(left) - (right)` so the result always means "... = 0"
//!
//! The postfix sequence is checked for arity before it is handed out, so the tree builder
//! never sees a sequence with a missing or dangling operand.
use crate::equation::errors::EquationError;
use crate::equation::tokenizer::{Associativity, Operator, Token, TokenKind};
use log::debug;

/// Parser state threaded through every action
#[derive(Debug, Default)]
pub struct ShuntingYard {
    output: Vec<Token>,
    stack: Vec<Token>,
    /// a `+`/`-` seen now is a sign, not a binary operator
    unary_allowed: bool,
    /// kind of the last significant source token
    previous: Option<TokenKind>,
    /// furthest source position seen so far, used for synthesized tokens
    position: usize,
    /// the `=` has been processed, the right side is being collected
    moved_left: bool,
    /// stack index of the `(` opened after `=`; only the end of input closes it
    synthetic_paren: Option<usize>,
}

impl ShuntingYard {
    pub fn new() -> Self {
        ShuntingYard {
            unary_allowed: true,
            ..Default::default()
        }
    }

    /// Consumes a token stream and returns the validated postfix form of `(left) - (right)`.
    pub fn convert<I>(mut self, tokens: I) -> Result<Vec<Token>, EquationError>
    where
        I: IntoIterator<Item = Result<Token, EquationError>>,
    {
        for token in tokens {
            let token = token?;
            if token.is_whitespace() {
                continue;
            }
            let kind = token.kind;
            self.select_action(token)?;
            self.previous = Some(kind);
        }
        self.handle_end_of_input()?;
        self.remove_unary_pluses();
        self.remove_equality();
        self.validate_arity()?;
        debug!(
            "postfix: {}",
            self.output.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(" ")
        );
        Ok(self.output)
    }

    fn select_action(&mut self, token: Token) -> Result<(), EquationError> {
        self.position = self.position.max(token.position);
        match token.kind {
            TokenKind::Operator(op) => self.handle_operator(token, op),
            TokenKind::Whitespace => Ok(()),
            TokenKind::Number(_) => {
                if self.previous == Some(TokenKind::RightParen) {
                    self.implicit_multiplication()?;
                }
                self.output.push(token);
                self.unary_allowed = false;
                Ok(())
            }
            TokenKind::Variable => {
                if matches!(
                    self.previous,
                    Some(TokenKind::Number(_)) | Some(TokenKind::Variable) | Some(TokenKind::RightParen)
                ) {
                    self.implicit_multiplication()?;
                }
                self.output.push(token);
                self.unary_allowed = false;
                Ok(())
            }
            TokenKind::LeftParen => {
                self.stack.push(token);
                self.unary_allowed = true;
                Ok(())
            }
            TokenKind::RightParen => {
                if let Some(TokenKind::Operator(_)) = self.previous {
                    return Err(EquationError::validation(
                        "operator directly before a closing parenthesis",
                        Some(token.position),
                    ));
                }
                self.close_parenthesis(token.position)?;
                self.unary_allowed = false;
                Ok(())
            }
            TokenKind::Equals => {
                if self.moved_left {
                    return Err(EquationError::validation(
                        "no more than one equality sign allowed",
                        Some(token.position),
                    ));
                }
                self.flush_stack()?;
                self.move_to_left(token)?;
                self.unary_allowed = true;
                Ok(())
            }
        }
    }

    fn handle_operator(&mut self, mut token: Token, op: Operator) -> Result<(), EquationError> {
        let op = match op.to_unary() {
            Some(unary) if self.unary_allowed => unary,
            _ => op,
        };
        token.kind = TokenKind::Operator(op);
        while let Some(top) = self.stack.last() {
            if !Self::should_pop(top, op) {
                break;
            }
            self.stack_to_output();
        }
        self.stack.push(token);
        self.unary_allowed = true;
        Ok(())
    }

    /// Whether the operator on top of the stack binds tighter than the incoming one.
    fn should_pop(top: &Token, incoming: Operator) -> bool {
        let TokenKind::Operator(top) = top.kind else {
            return false;
        };
        // stacked signs apply right to left: `--x` is `-(-x)`
        if top.is_unary() && incoming.is_unary() && top.precedence() == incoming.precedence() {
            return false;
        }
        top.precedence() > incoming.precedence()
            || (top.precedence() == incoming.precedence()
                && incoming.associativity() == Associativity::Left)
    }

    fn implicit_multiplication(&mut self) -> Result<(), EquationError> {
        let star = Token::synthetic(TokenKind::Operator(Operator::Mul), self.position);
        self.select_action(star)
    }

    fn close_parenthesis(&mut self, position: usize) -> Result<(), EquationError> {
        while let Some(top) = self.stack.pop() {
            if top.kind == TokenKind::LeftParen {
                if self.synthetic_paren == Some(self.stack.len()) {
                    break;
                }
                return Ok(());
            }
            self.output.push(top);
        }
        Err(EquationError::validation(
            "unbalanced parentheses: no matching '('",
            Some(position),
        ))
    }

    fn stack_to_output(&mut self) {
        if let Some(top) = self.stack.pop() {
            self.output.push(top);
        }
    }

    /// Empties the operator stack; closes the parenthesis opened after `=` first.
    fn flush_stack(&mut self) -> Result<(), EquationError> {
        if let Some(depth) = self.synthetic_paren.take() {
            while self.stack.len() > depth + 1 {
                self.pop_unless_paren()?;
            }
            self.stack.pop();
        }
        while !self.stack.is_empty() {
            self.pop_unless_paren()?;
        }
        Ok(())
    }

    fn pop_unless_paren(&mut self) -> Result<(), EquationError> {
        if let Some(top) = self.stack.pop() {
            if top.kind == TokenKind::LeftParen {
                return Err(EquationError::validation(
                    "unbalanced parentheses: '(' is never closed",
                    Some(top.position),
                ));
            }
            self.output.push(top);
        }
        Ok(())
    }

    fn handle_end_of_input(&mut self) -> Result<(), EquationError> {
        self.flush_stack()
    }

    /// The left side is complete: everything after `=` becomes `- ( ... )`.
    fn move_to_left(&mut self, equals: Token) -> Result<(), EquationError> {
        if self.output.is_empty() {
            self.output
                .push(Token::synthetic(TokenKind::Number(0.0), equals.position));
        }
        let position = equals.position;
        self.output.push(equals);
        self.moved_left = true;
        self.unary_allowed = false;
        self.select_action(Token::synthetic(TokenKind::Operator(Operator::Sub), position))?;
        self.select_action(Token::synthetic(TokenKind::LeftParen, position + 1))?;
        self.synthetic_paren = Some(self.stack.len() - 1);
        Ok(())
    }

    fn remove_unary_pluses(&mut self) {
        let is_plus = |t: &Token| t.kind == TokenKind::Operator(Operator::UnaryPlus);
        self.output.dedup_by(|a, b| is_plus(a) && is_plus(b));
    }

    fn remove_equality(&mut self) {
        self.output.retain(|t| t.kind != TokenKind::Equals);
    }

    /// Simulates the operand stack of the postfix sequence.
    fn validate_arity(&self) -> Result<(), EquationError> {
        let mut counter: usize = 0;
        for token in &self.output {
            let consumed = match token.kind {
                TokenKind::Number(_) | TokenKind::Variable => {
                    counter += 1;
                    continue;
                }
                TokenKind::Operator(op) if op.is_unary() => 1,
                TokenKind::Operator(_) => 2,
                _ => {
                    return Err(EquationError::validation(
                        format!("unexpected token '{}'", token),
                        Some(token.position),
                    ));
                }
            };
            if counter < consumed {
                return Err(EquationError::validation(
                    format!("operator '{}' is missing an operand", token),
                    Some(token.position),
                ));
            }
            counter = counter - consumed + 1;
        }
        match counter {
            1 => Ok(()),
            0 => Err(EquationError::validation("the equation is empty", None)),
            _ => Err(EquationError::validation(
                "the equation is not well formed: operands without an operator",
                self.output.last().map(|t| t.position),
            )),
        }
    }
}

/// Convenience wrapper: postfix form of an equation string.
pub fn to_postfix(input: &str) -> Result<Vec<Token>, EquationError> {
    ShuntingYard::new().convert(crate::equation::tokenizer::Tokenizer::new(input))
}
