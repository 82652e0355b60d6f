#[cfg(test)]
mod tests {
    use crate::equation::computor::Computor;
    use crate::equation::display::{DEFAULT_PRECISION, format_solution, reduced_form};
    use crate::equation::errors::ErrorKind;
    use crate::equation::polynomial::Term;
    use crate::equation::shunting_yard::to_postfix;
    use crate::equation::solver::Solution;
    use approx::assert_relative_eq;

    fn solved(equation: &str) -> String {
        let report = Computor::evaluate(equation).unwrap();
        format_solution(&report.solution, DEFAULT_PRECISION)
    }

    fn terms(equation: &str) -> Vec<Term> {
        Computor::evaluate(equation).unwrap().reduced
    }

    fn failure(equation: &str) -> ErrorKind {
        Computor::evaluate(equation).unwrap_err().kind
    }

    #[test]
    fn linear_equation() {
        assert_eq!(solved("5 * x^0 - 4 * x^0 + 7 * x^1"), "X = -0.14");
    }

    #[test]
    fn quadratic_with_two_real_roots() {
        let report = Computor::evaluate("5*x^0 + 13*x^1 + 3*x^2 = 1*x^0 + 1*x^1").unwrap();
        assert_eq!(
            reduced_form(&report.reduced),
            "3 * X^2 + 12 * X^1 + 4 * X^0 = 0"
        );
        assert_eq!(report.degree, Some(2));
        assert_eq!(report.discriminant, Some(96.0));
        assert_eq!(
            format_solution(&report.solution, DEFAULT_PRECISION),
            "X1 = -3.63, X2 = -0.37"
        );
    }

    #[test]
    fn leading_sign_binds_to_the_base() {
        assert_eq!(solved("-x^2 + x = 0"), "X1 = -1, X2 = 0");
    }

    #[test]
    fn quadratic_with_complex_roots() {
        assert_eq!(
            solved("x + 2x^2 + 1 = 0"),
            "X1 = -0.25 - 0.66i, X2 = -0.25 + 0.66i"
        );
    }

    #[test]
    fn division_and_negative_powers() {
        let report = Computor::evaluate("(11*x^4 + 5*x^3) / x^2 = -6*x^-1*x - 1*X^1").unwrap();
        assert_eq!(
            report.reduced,
            vec![Term::new(2, 11.0), Term::new(1, 6.0), Term::new(0, 6.0)]
        );
        match report.solution {
            Solution::TwoComplex(x1, x2) => {
                assert_relative_eq!(x1.re, -6.0 / 22.0, epsilon = 1e-12);
                assert_relative_eq!(x2.im, 228f64.sqrt() / 22.0, epsilon = 1e-12);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(
            format_solution(&report.solution, DEFAULT_PRECISION),
            "X1 = -0.27 - 0.69i, X2 = -0.27 + 0.69i"
        );
    }

    #[test]
    fn degenerate_equations() {
        let report = Computor::evaluate("0 * x^0 = 0").unwrap();
        assert_eq!(report.solution, Solution::AllReals);
        assert!(report.reduced.is_empty());
        assert_eq!(reduced_form(&report.reduced), "0 = 0");

        assert_eq!(Computor::evaluate("4 = 5").unwrap().solution, Solution::NoSolution);
        assert_eq!(Computor::evaluate("3x = 0").unwrap().solution, Solution::One(0.0));
    }

    #[test]
    fn supplementary_equations() {
        assert_eq!(solved("6*x^0 + 11*x^1 + 5*x^2 = 1*x^0 + 1*X^1"), "X = -1");
        assert_eq!(solved("11*x^1 - 5*x^1 = 1*x^0 + 1*X^1"), "X = 0.20");
        assert_eq!(solved("xx = 5^-3"), "X1 = -0.09, X2 = 0.09");
        assert_eq!(solved("(x^(2 + 5 - 4) 4) /x/x = 5 x ^ 0"), "X = 1.25");
    }

    #[test]
    fn missing_equals_means_zero_right_side() {
        assert_eq!(terms("x^2 - 4"), terms("x^2 - 4 = 0"));
    }

    #[test]
    fn sides_can_be_swapped() {
        let pairs = [
            ("5*x^0 + 13*x^1 + 3*x^2", "1*x^0 + 1*x^1"),
            ("x + 2x^2", "-1"),
            ("x^2", "4"),
            ("2 * (x + 3)", "x / 2"),
        ];
        for (left, right) in pairs {
            let direct = Computor::evaluate(&format!("{} = {}", left, right)).unwrap();
            let swapped = Computor::evaluate(&format!("{} = {}", right, left)).unwrap();
            assert_eq!(
                format_solution(&direct.solution, 6),
                format_solution(&swapped.solution, 6),
                "{} = {}",
                left,
                right
            );
        }
    }

    #[test]
    fn reduced_form_is_a_fixed_point() {
        for equation in [
            "5*x^0 + 13*x^1 + 3*x^2 = 1*x^0 + 1*x^1",
            "-x^2 + x = 0",
            "x + 2x^2 + 1 = 0",
            "(11*x^4 + 5*x^3) / x^2 = -6*x^-1*x - 1*X^1",
            "xx = 5^-3",
            "0 * x^0 = 0",
        ] {
            let first = terms(equation);
            let again = terms(&reduced_form(&first));
            assert_eq!(first, again, "{}", equation);
        }
    }

    #[test]
    fn powers_outside_the_range_are_rejected() {
        for equation in ["x^3 = 1", "x^-1 + 2 = 0", "x * x * x * x = x", "5 * X^4 = 0 + 1"] {
            assert_eq!(failure(equation), ErrorKind::ValidationError, "{}", equation);
        }
        // cancelled terms do not count
        assert_eq!(
            Computor::evaluate("x^3 + x = x^3").unwrap().solution,
            Solution::One(0.0)
        );
    }

    #[test]
    fn malformed_input_stops_before_the_tree() {
        for equation in ["x +", "* x", "x = = 2", "(x + 1", "x + 1)", "x = 1) + (2", ""] {
            assert!(to_postfix(equation).is_err(), "{}", equation);
            assert_eq!(failure(equation), ErrorKind::ValidationError, "{}", equation);
        }
        assert_eq!(failure("x & 2"), ErrorKind::LexError);
    }

    #[test]
    fn every_stage_reports_its_own_kind() {
        assert_eq!(failure("x # 1"), ErrorKind::LexError);
        assert_eq!(failure("x + * 1"), ErrorKind::ValidationError);
        assert_eq!(failure("-+x = 1"), ErrorKind::TreeError);
        assert_eq!(failure("x^x = 1"), ErrorKind::SimplificationError);
        assert_eq!(failure("x / 0 = 1"), ErrorKind::SimplificationError);
    }

    #[test]
    fn coefficients_out_of_float_range_are_rejected() {
        // overflow inside `^`
        let err = Computor::evaluate("x = 10^400").unwrap_err();
        assert_eq!(err.kind, ErrorKind::SimplificationError);
        assert_eq!(err.position, Some(6));
        assert_eq!(
            failure("x^2 + x = 10^400 - 10^400"),
            ErrorKind::SimplificationError
        );
        // a literal too long for f64 only surfaces in the solver
        let huge = "9".repeat(400);
        assert_eq!(failure(&format!("x = {}", huge)), ErrorKind::ValidationError);
        assert_eq!(
            failure(&format!("x^2 = {} - {}", huge, huge)),
            ErrorKind::ValidationError
        );
    }

    #[test]
    fn carets_count_characters() {
        let err = Computor::evaluate("x\u{a0}= 1)").unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValidationError);
        assert_eq!(err.position, Some(5));
        let err = Computor::evaluate("x\u{a0}+ $").unwrap_err();
        assert_eq!(err.position, Some(4));
    }

    #[test]
    fn errors_point_at_the_source() {
        let err = Computor::evaluate("2 * x + $").unwrap_err();
        assert_eq!(err.position, Some(8));
        assert_eq!(err.caret(), format!("{}^ {}", " ".repeat(8), err.message));
    }
}
