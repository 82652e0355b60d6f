use crate::equation::errors::EquationError;
use crate::equation::expression_tree::ExpressionTree;
use crate::equation::polynomial::Term;
use crate::equation::shunting_yard::ShuntingYard;
use crate::equation::solver::{EquationSolver, Solution};
use crate::equation::tokenizer::{Token, Tokenizer};
use log::{info, warn};

/// Everything the pipeline learned about one equation.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// postfix form of `(left) - (right)`
    pub postfix: Vec<Token>,
    /// infix rendering of the expression tree before folding
    pub tree: String,
    /// canonical terms: descending powers, no zero coefficient
    pub reduced: Vec<Term>,
    pub degree: Option<i32>,
    pub discriminant: Option<f64>,
    pub solution: Solution,
}

/// Runs tokenizer, converter, tree evaluator and solver on one equation.
pub struct Computor;

impl Computor {
    pub fn evaluate(equation: &str) -> Result<Report, EquationError> {
        info!("solving '{}'", equation);
        let report = Self::run(equation);
        if let Err(err) = &report {
            warn!("'{}' rejected: {}", equation, err);
        }
        report
    }

    fn run(equation: &str) -> Result<Report, EquationError> {
        let postfix = ShuntingYard::new().convert(Tokenizer::new(equation))?;
        let tree = ExpressionTree::build(postfix.iter().cloned())?;
        let rendered = tree.root().to_string();
        let folded = tree.reduce()?;

        let mut solver = EquationSolver::new(folded);
        let solution = solver.solve()?;
        Ok(Report {
            postfix,
            tree: rendered,
            degree: solver.degree(),
            discriminant: solver.discriminant(),
            reduced: solver.into_terms(),
            solution,
        })
    }
}
