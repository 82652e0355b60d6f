//! Working representation of a partially folded expression: a sum of monomials.
//!
//! Terms are kept sorted by strictly descending power with one term per power, so adding
//! two polynomials is a plain sorted merge. Terms whose coefficients cancel stay in the
//! list until the solver normalizes the result.
use crate::equation::errors::EquationError;
use itertools::{EitherOrBoth, Itertools};

/// `coefficient * x^power`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Term {
    pub power: i32,
    pub coefficient: f64,
}

impl Term {
    pub fn new(power: i32, coefficient: f64) -> Self {
        Term { power, coefficient }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    terms: Vec<Term>,
}

impl Polynomial {
    pub fn constant(value: f64) -> Self {
        Polynomial {
            terms: vec![Term::new(0, value)],
        }
    }

    pub fn variable(multiplier: f64) -> Self {
        Polynomial {
            terms: vec![Term::new(1, multiplier)],
        }
    }

    /// Builds a polynomial from terms in any order, combining terms of equal power.
    pub fn from_terms(mut terms: Vec<Term>) -> Self {
        terms.sort_by(|a, b| b.power.cmp(&a.power));
        let terms = terms
            .into_iter()
            .coalesce(|a, b| {
                if a.power == b.power {
                    Ok(Term::new(a.power, a.coefficient + b.coefficient))
                } else {
                    Err((a, b))
                }
            })
            .collect();
        Polynomial { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Flattens into the descending list of terms.
    pub fn into_terms(self) -> Vec<Term> {
        self.terms
    }

    /// A single term, whatever its power.
    pub fn is_monomial(&self) -> bool {
        self.terms.len() == 1
    }

    pub fn negate(mut self) -> Self {
        for term in &mut self.terms {
            term.coefficient = -term.coefficient;
        }
        self
    }

    pub fn add(self, other: Polynomial) -> Self {
        let terms = self
            .terms
            .into_iter()
            .merge_join_by(other.terms, |l, r| r.power.cmp(&l.power))
            .map(|pair| match pair {
                EitherOrBoth::Both(l, r) => Term::new(l.power, l.coefficient + r.coefficient),
                EitherOrBoth::Left(term) | EitherOrBoth::Right(term) => term,
            })
            .collect();
        Polynomial { terms }
    }

    pub fn sub(self, other: Polynomial) -> Self {
        self.add(other.negate())
    }

    /// Product of a polynomial and a monomial; two multi-term factors are refused.
    pub fn mul(self, other: Polynomial, position: usize) -> Result<Self, EquationError> {
        let (mut polynomial, monomial) = match (self.is_monomial(), other.is_monomial()) {
            (_, true) => (self, other.terms[0]),
            (true, false) => (other, self.terms[0]),
            (false, false) => {
                return Err(EquationError::simplification(
                    "multiplying two polynomials is not supported",
                    position,
                ));
            }
        };
        for term in &mut polynomial.terms {
            term.coefficient *= monomial.coefficient;
            term.power = shift_power(term.power, monomial.power, position)?;
        }
        polynomial.ensure_finite(position)
    }

    /// Division by a non-zero monomial, applied to every term of the dividend.
    pub fn div(mut self, divisor: Polynomial, position: usize) -> Result<Self, EquationError> {
        if !divisor.is_monomial() {
            return Err(EquationError::simplification(
                "dividing by a polynomial is not supported",
                position,
            ));
        }
        let divisor = divisor.terms[0];
        if divisor.coefficient == 0.0 {
            return Err(EquationError::simplification("division by zero", position));
        }
        for term in &mut self.terms {
            term.coefficient /= divisor.coefficient;
            term.power = shift_power(term.power, -divisor.power, position)?;
        }
        self.ensure_finite(position)
    }

    /// Raises a monomial to a constant integer exponent.
    pub fn pow(self, exponent: Polynomial, position: usize) -> Result<Self, EquationError> {
        if !exponent.is_monomial() || exponent.terms[0].power != 0 {
            return Err(EquationError::simplification(
                "the exponent must not depend on x",
                position,
            ));
        }
        let value = exponent.terms[0].coefficient;
        if value.fract() != 0.0 {
            return Err(EquationError::simplification(
                "fractional exponent is forbidden",
                position,
            ));
        }
        if value.abs() > i32::MAX as f64 {
            return Err(EquationError::simplification("exponent is too large", position));
        }
        let n = value as i32;
        if !self.is_monomial() {
            return Err(EquationError::simplification(
                "only a monomial can be raised to a power, (ax + b)^n is not supported",
                position,
            ));
        }
        let base = self.terms[0];
        if base.coefficient == 0.0 && n < 0 {
            return Err(EquationError::simplification(
                "zero raised to a negative power",
                position,
            ));
        }
        let power = base.power.checked_mul(n).ok_or_else(|| {
            EquationError::simplification("resulting power is out of range", position)
        })?;
        Polynomial {
            terms: vec![Term::new(power, base.coefficient.powi(n))],
        }
        .ensure_finite(position)
    }

    /// A coefficient that left the f64 range cannot be solved for.
    fn ensure_finite(self, position: usize) -> Result<Self, EquationError> {
        if self.terms.iter().all(|t| t.coefficient.is_finite()) {
            Ok(self)
        } else {
            Err(EquationError::simplification(
                "coefficient is out of the floating point range",
                position,
            ))
        }
    }
}

fn shift_power(power: i32, by: i32, position: usize) -> Result<i32, EquationError> {
    power
        .checked_add(by)
        .ok_or_else(|| EquationError::simplification("resulting power is out of range", position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equation::errors::ErrorKind;
    use approx::assert_relative_eq;

    fn poly(terms: &[(i32, f64)]) -> Polynomial {
        Polynomial::from_terms(terms.iter().map(|&(p, c)| Term::new(p, c)).collect())
    }

    fn pairs(p: &Polynomial) -> Vec<(i32, f64)> {
        p.terms().iter().map(|t| (t.power, t.coefficient)).collect()
    }

    #[test]
    fn test_from_terms_sorts_and_combines() {
        let p = poly(&[(0, 1.0), (2, 3.0), (0, 4.0), (1, -1.0)]);
        assert_eq!(pairs(&p), vec![(2, 3.0), (1, -1.0), (0, 5.0)]);
    }

    #[test]
    fn test_add_merges_like_powers() {
        let sum = poly(&[(2, 1.0), (0, 1.0)]).add(poly(&[(1, 2.0), (0, 3.0)]));
        assert_eq!(pairs(&sum), vec![(2, 1.0), (1, 2.0), (0, 4.0)]);
    }

    #[test]
    fn test_add_interleaves_disjoint_powers() {
        let sum = poly(&[(4, 1.0), (1, 1.0)]).add(poly(&[(3, 2.0), (0, 3.0)]));
        assert_eq!(pairs(&sum), vec![(4, 1.0), (3, 2.0), (1, 1.0), (0, 3.0)]);
    }

    #[test]
    fn test_cancelled_terms_stay() {
        let diff = Polynomial::variable(1.0).sub(Polynomial::variable(1.0));
        assert_eq!(pairs(&diff), vec![(1, 0.0)]);
    }

    #[test]
    fn test_sub_negates_whole_right_side() {
        // 11x^2 + 5x - (-x - 6) = 11x^2 + 6x + 6
        let diff = poly(&[(2, 11.0), (1, 5.0)]).sub(poly(&[(1, -1.0), (0, -6.0)]));
        assert_eq!(pairs(&diff), vec![(2, 11.0), (1, 6.0), (0, 6.0)]);
    }

    #[test]
    fn test_mul_monomial_into_every_term() {
        let product = poly(&[(1, 2.0), (0, 1.0)]).mul(poly(&[(1, 3.0)]), 0).unwrap();
        assert_eq!(pairs(&product), vec![(2, 6.0), (1, 3.0)]);
        let product = poly(&[(1, 3.0)]).mul(poly(&[(1, 2.0), (0, 1.0)]), 0).unwrap();
        assert_eq!(pairs(&product), vec![(2, 6.0), (1, 3.0)]);
    }

    #[test]
    fn test_mul_two_polynomials_is_refused() {
        let err = poly(&[(1, 1.0), (0, 1.0)])
            .mul(poly(&[(1, 1.0), (0, -1.0)]), 7)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::SimplificationError);
        assert_eq!(err.position, Some(7));
    }

    #[test]
    fn test_div_by_monomial() {
        let quotient = poly(&[(4, 11.0), (3, 5.0)]).div(poly(&[(2, 1.0)]), 0).unwrap();
        assert_eq!(pairs(&quotient), vec![(2, 11.0), (1, 5.0)]);
    }

    #[test]
    fn test_div_failures() {
        let err = Polynomial::variable(1.0)
            .div(poly(&[(1, 1.0), (0, 1.0)]), 3)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::SimplificationError);
        let err = Polynomial::variable(1.0)
            .div(Polynomial::constant(0.0), 3)
            .unwrap_err();
        assert_eq!(err.message, "division by zero");
    }

    #[test]
    fn test_pow_of_monomial() {
        let p = poly(&[(1, 2.0)]).pow(Polynomial::constant(2.0), 0).unwrap();
        assert_eq!(pairs(&p), vec![(2, 4.0)]);
        let p = Polynomial::variable(1.0).pow(Polynomial::constant(-1.0), 0).unwrap();
        assert_eq!(pairs(&p), vec![(-1, 1.0)]);
        let p = Polynomial::constant(5.0).pow(Polynomial::constant(-3.0), 0).unwrap();
        assert_eq!(p.terms()[0].power, 0);
        assert_relative_eq!(p.terms()[0].coefficient, 0.008, epsilon = 1e-15);
        let p = Polynomial::variable(1.0).pow(Polynomial::constant(0.0), 0).unwrap();
        assert_eq!(pairs(&p), vec![(0, 1.0)]);
    }

    #[test]
    fn test_coefficient_overflow() {
        let err = Polynomial::constant(10.0)
            .pow(Polynomial::constant(400.0), 2)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::SimplificationError);
        assert_eq!(err.position, Some(2));

        let err = poly(&[(1, 1e300)]).mul(poly(&[(0, 1e300)]), 4).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SimplificationError);

        let err = poly(&[(1, 1e300)]).div(poly(&[(0, 1e-300)]), 1).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SimplificationError);
    }

    #[test]
    fn test_pow_failures() {
        let x = || Polynomial::variable(1.0);
        let err = x().pow(x(), 2).unwrap_err();
        assert_eq!(err.kind, ErrorKind::SimplificationError);
        assert_eq!(err.position, Some(2));

        let err = x().pow(Polynomial::constant(0.5), 2).unwrap_err();
        assert_eq!(err.message, "fractional exponent is forbidden");

        let err = poly(&[(1, 1.0), (0, 1.0)])
            .pow(Polynomial::constant(2.0), 2)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::SimplificationError);

        let err = Polynomial::constant(0.0)
            .pow(Polynomial::constant(-1.0), 2)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::SimplificationError);
    }
}
