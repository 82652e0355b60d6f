//! # Equation module
//!
//! Parses a single-variable polynomial equation, reduces it to `sum(c_i * x^i) = 0` and solves
//! it for degrees 0 to 2.
//!
//! The pipeline, leaves first:
//! 1) `tokenizer` - positioned tokens from the raw string
//! 2) `shunting_yard` - validated postfix form of `(left) - (right)`, with signs and implicit
//!    products resolved
//! 3) `expression_tree` - shift/reduce tree folded bottom-up into a `polynomial`
//! 4) `solver` - zero pruning, degree check, linear/quadratic roots
//!
//! `computor` chains the four stages, `display` formats their results for the console.
//!# Example
//! ```
//! use computor::equation::computor::Computor;
//! use computor::equation::solver::Solution;
//! let report = Computor::evaluate("x^2 = 4").unwrap();
//! assert_eq!(report.solution, Solution::TwoReal(-2.0, 2.0));
//! ```
pub mod computor;
pub mod display;
/// failure taxonomy shared by every stage
pub mod errors;
pub mod expression_tree;
pub mod polynomial;
pub mod shunting_yard;
pub mod solver;
pub mod tokenizer;

mod equation_tests;
