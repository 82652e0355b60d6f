//! Console formatting of the reduced form, the postfix sequence and the roots.
use crate::equation::polynomial::Term;
use crate::equation::solver::Solution;
use crate::equation::tokenizer::Token;
use itertools::Itertools;
use num_complex::Complex64;
use tabled::{builder::Builder, settings::Style};

pub const DEFAULT_PRECISION: usize = 2;

/// Rounds to `precision` decimals; whole numbers are printed without decimals.
pub fn format_number(value: f64, precision: usize) -> String {
    let scale = 10f64.powi(precision as i32);
    let rounded = (value * scale).round() / scale + 0.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded)
    } else {
        format!("{:.*}", precision, rounded)
    }
}

fn format_complex(value: Complex64, precision: usize) -> String {
    let sign = if value.im < 0.0 { '-' } else { '+' };
    format!(
        "{} {} {}i",
        format_number(value.re, precision),
        sign,
        format_number(value.im.abs(), precision)
    )
}

pub fn format_solution(solution: &Solution, precision: usize) -> String {
    match solution {
        Solution::NoSolution => "The equation has no solution".to_string(),
        Solution::AllReals => "Each real number is a solution".to_string(),
        Solution::One(x) => format!("X = {}", format_number(*x, precision)),
        Solution::TwoReal(x1, x2) => format!(
            "X1 = {}, X2 = {}",
            format_number(*x1, precision),
            format_number(*x2, precision)
        ),
        Solution::TwoComplex(x1, x2) => format!(
            "X1 = {}, X2 = {}",
            format_complex(*x1, precision),
            format_complex(*x2, precision)
        ),
    }
}

/// `3 * X^2 - 12 * X^1 + 4 * X^0 = 0`; coefficients keep their full value so the
/// printed form can be parsed again.
pub fn reduced_form(terms: &[Term]) -> String {
    if terms.is_empty() {
        return "0 = 0".to_string();
    }
    let mut form = String::new();
    for (i, term) in terms.iter().enumerate() {
        let magnitude = term.coefficient.abs();
        match (i, term.coefficient < 0.0) {
            (0, true) => form.push('-'),
            (0, false) => {}
            (_, true) => form.push_str(" - "),
            (_, false) => form.push_str(" + "),
        }
        form.push_str(&format!("{} * X^{}", magnitude, term.power));
    }
    form.push_str(" = 0");
    form
}

/// The equation as typed; ` = 0` is appended when it has no right side.
pub fn source_form(equation: &str) -> String {
    let equation = equation.trim();
    if equation.contains('=') {
        equation.to_string()
    } else {
        format!("{} = 0", equation)
    }
}

pub fn format_postfix(postfix: &[Token]) -> String {
    postfix.iter().map(|t| t.to_string()).join(" ")
}

pub fn term_table(terms: &[Term], precision: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(["power", "coefficient"]);
    for term in terms {
        builder.push_record([term.power.to_string(), format_number(term.coefficient, precision)]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// One-line commentary about the kind of equation, printed in normal mode.
pub fn describe(degree: Option<i32>, discriminant: Option<f64>) -> String {
    match (degree, discriminant) {
        (None, _) => "Polynomial degree: 0".to_string(),
        (Some(2), Some(d)) if d < 0.0 => {
            "Polynomial degree: 2\nDiscriminant is strictly negative, the two solutions are complex:"
                .to_string()
        }
        (Some(2), Some(d)) if d == 0.0 => {
            "Polynomial degree: 2\nDiscriminant is zero, the solution is:".to_string()
        }
        (Some(2), Some(_)) => {
            "Polynomial degree: 2\nDiscriminant is strictly positive, the two solutions are:"
                .to_string()
        }
        (Some(degree), _) => format!("Polynomial degree: {}", degree),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(-1.0 / 7.0, 2), "-0.14");
        assert_eq!(format_number(-1.0, 2), "-1");
        assert_eq!(format_number(0.2, 2), "0.20");
        assert_eq!(format_number(-0.001, 2), "0");
        assert_eq!(format_number(1.25, 2), "1.25");
        assert_eq!(format_number(2.0 / 3.0, 4), "0.6667");
    }

    #[test]
    fn test_format_solution() {
        assert_eq!(
            format_solution(&Solution::TwoReal(-3.632993, -0.367006), 2),
            "X1 = -3.63, X2 = -0.37"
        );
        let re = -0.25;
        let im = 7f64.sqrt() / 4.0;
        assert_eq!(
            format_solution(
                &Solution::TwoComplex(Complex64::new(re, -im), Complex64::new(re, im)),
                2
            ),
            "X1 = -0.25 - 0.66i, X2 = -0.25 + 0.66i"
        );
        assert_eq!(
            format_solution(&Solution::AllReals, 2),
            "Each real number is a solution"
        );
    }

    #[test]
    fn test_reduced_form() {
        let terms = vec![Term::new(2, -3.0), Term::new(1, 12.5), Term::new(0, -4.0)];
        assert_eq!(reduced_form(&terms), "-3 * X^2 + 12.5 * X^1 - 4 * X^0 = 0");
        assert_eq!(reduced_form(&[]), "0 = 0");
    }

    #[test]
    fn test_source_form() {
        assert_eq!(source_form(" x^2 - 4 "), "x^2 - 4 = 0");
        assert_eq!(source_form("x = 2"), "x = 2");
    }

    #[test]
    fn test_term_table_lists_every_term() {
        let table = term_table(&[Term::new(2, 1.0), Term::new(0, -0.5)], 2);
        assert!(table.contains("power"));
        assert!(table.contains("-0.50"));
        assert!(table.lines().count() >= 5);
    }
}
