//! Solver for the reduced equation `sum(c_i * x^i) = 0`, degrees 0 to 2.
//!
//! The term list is normalized first: zero coefficients are dropped, then every remaining
//! power must lie in `[0, 2]`. Degenerate lists (no term or one term) are classified
//! directly, the rest goes to the linear or quadratic formula.
use crate::equation::errors::EquationError;
use crate::equation::polynomial::Term;
use log::{debug, info};
use num_complex::Complex64;

pub const MIN_POWER: i32 = 0;
pub const MAX_POWER: i32 = 2;

/// Real roots are in ascending order, complex roots have the negative imaginary part first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solution {
    /// `c = 0` with `c != 0`
    NoSolution,
    /// `0 = 0`
    AllReals,
    One(f64),
    TwoReal(f64, f64),
    TwoComplex(Complex64, Complex64),
}

#[derive(Debug, Clone)]
pub struct EquationSolver {
    terms: Vec<Term>,
    discriminant: Option<f64>,
}

impl EquationSolver {
    /// Takes the folded terms and drops the ones whose coefficient cancelled to zero.
    pub fn new(terms: Vec<Term>) -> Self {
        let terms: Vec<Term> = terms.into_iter().filter(|t| t.coefficient != 0.0).collect();
        EquationSolver {
            terms,
            discriminant: None,
        }
    }

    /// canonical terms: descending powers, no zero coefficient
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    pub fn degree(&self) -> Option<i32> {
        self.terms.iter().map(|t| t.power).max()
    }

    /// available after a quadratic has been solved
    pub fn discriminant(&self) -> Option<f64> {
        self.discriminant
    }

    fn coefficient(&self, power: i32) -> f64 {
        self.terms
            .iter()
            .find(|t| t.power == power)
            .map(|t| t.coefficient)
            .unwrap_or(0.0)
    }

    fn validate_coefficients(&self) -> Result<(), EquationError> {
        match self.terms.iter().find(|t| !t.coefficient.is_finite()) {
            Some(term) => Err(EquationError::validation(
                format!(
                    "coefficient of x^{} is out of the floating point range",
                    term.power
                ),
                None,
            )),
            None => Ok(()),
        }
    }

    fn validate_powers(&self) -> Result<(), EquationError> {
        match self
            .terms
            .iter()
            .find(|t| t.power < MIN_POWER || t.power > MAX_POWER)
        {
            Some(term) => Err(EquationError::validation(
                format!(
                    "powers from {} to {} only, found x^{}",
                    MIN_POWER, MAX_POWER, term.power
                ),
                None,
            )),
            None => Ok(()),
        }
    }

    pub fn solve(&mut self) -> Result<Solution, EquationError> {
        self.validate_coefficients()?;
        self.validate_powers()?;
        let solution = match self.terms.as_slice() {
            [] => Solution::AllReals,
            [term] if term.power == 0 => Solution::NoSolution,
            [_] => Solution::One(0.0),
            _ => match self.degree() {
                Some(1) => self.linear(),
                Some(2) => self.quadratic(),
                other => {
                    return Err(EquationError::validation(
                        format!("cannot solve an equation of degree {:?}", other),
                        None,
                    ));
                }
            },
        };
        info!("solution: {:?}", solution);
        Ok(solution)
    }

    fn linear(&self) -> Solution {
        let (b, c) = (self.coefficient(1), self.coefficient(0));
        debug!("linear equation {}x + {} = 0", b, c);
        Solution::One(positive_zero(-c / b))
    }

    fn quadratic(&mut self) -> Solution {
        let (a, b, c) = (self.coefficient(2), self.coefficient(1), self.coefficient(0));
        let d = b * b - 4.0 * a * c;
        self.discriminant = Some(d);
        debug!("quadratic equation, discriminant {}", d);
        if d < 0.0 {
            let re = positive_zero(-b / (2.0 * a));
            let im = (-d).sqrt() / (2.0 * a).abs();
            Solution::TwoComplex(Complex64::new(re, -im), Complex64::new(re, im))
        } else if d == 0.0 {
            Solution::One(positive_zero(-b / (2.0 * a)))
        } else {
            let root = d.sqrt();
            let first = positive_zero((-b - root) / (2.0 * a));
            let second = positive_zero((-b + root) / (2.0 * a));
            Solution::TwoReal(first.min(second), first.max(second))
        }
    }
}

/// `-0.0` becomes `0.0`
fn positive_zero(value: f64) -> f64 {
    value + 0.0
}
