// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_snake_case)]

use crate::equation::computor::Computor;
use crate::equation::errors::EquationError;
use crate::equation::display::{
    DEFAULT_PRECISION, format_postfix, format_solution, reduced_form, term_table,
};
use crate::equation::expression_tree::ExpressionTree;
use crate::equation::shunting_yard::to_postfix;
use crate::equation::tokenizer::tokenize;

/// equations shown by `equation_examples`, also used by the benchmarks
pub const EXAMPLE_EQUATIONS: [&str; 10] = [
    "5 * x^0 - 4 * x^0 + 7 * x^1",
    "5*x^0 + 13*x^1 + 3*x^2 = 1*x^0 + 1*x^1",
    "-x^2 + x = 0",
    "x + 2x^2 + 1 = 0",
    "(11*x^4 + 5*x^3) / x^2 = -6*x^-1*x - 1*X^1",
    "0 * x^0 = 0",
    "6*x^0 + 11*x^1 + 5*x^2 = 1*x^0 + 1*X^1",
    "11*x^1 - 5*x^1 = 1*x^0 + 1*X^1",
    "xx = 5^-3",
    "(x^(2 + 5 - 4) 4) /x/x = 5 x ^ 0",
];

#[allow(dead_code)]
pub fn equation_examples(example: usize) {
    match example {
        0 => {
            // the whole pipeline in one call
            for equation in EXAMPLE_EQUATIONS {
                match Computor::evaluate(equation) {
                    Ok(report) => {
                        println!("{}", equation);
                        println!("  reduced form: {}", reduced_form(&report.reduced));
                        println!(
                            "  {}",
                            format_solution(&report.solution, DEFAULT_PRECISION)
                        );
                    }
                    Err(err) => println!("{}\n{}", equation, err.caret()),
                }
            }
        }
        1 => {
            // stage by stage: tokens, postfix, tree, terms
            let equation = "(11*x^4 + 5*x^3) / x^2 = -6*x^-1*x - 1*X^1";
            let stages = || -> Result<(), EquationError> {
                let tokens = tokenize(equation)?;
                println!("{} tokens", tokens.len());
                let postfix = to_postfix(equation)?;
                println!("postfix: {}", format_postfix(&postfix));
                let tree = ExpressionTree::build(postfix)?;
                println!("tree: {}", tree.root());
                let terms = tree.reduce()?;
                println!("{}", term_table(&terms, 4));
                Ok(())
            };
            if let Err(err) = stages() {
                println!("{}", err);
            }
        }
        2 => {
            // every failure carries a position that can be pointed at
            for equation in ["2 * x + $", "(x + 1", "-+x", "x^x = 2", "x^3 = 1"] {
                if let Err(err) = Computor::evaluate(equation) {
                    println!("{}\n{}\n{}", equation, err.caret(), err);
                }
            }
        }
        _ => println!("no such example"),
    }
}
