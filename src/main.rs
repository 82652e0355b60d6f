//! `computor` CLI: solve polynomial equations of degree 2 or lower.
#![allow(non_snake_case)]

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{LevelFilter, error, info};

use computor::Examples::equation_examples::equation_examples;
use computor::Utils::logger::{init_logger, parse_level, timestamped_log_name};
use computor::Utils::task_parser::{OutputMode, TaskConfig, TaskError};
use computor::equation::computor::{Computor, Report};
use computor::equation::display::{
    DEFAULT_PRECISION, describe, format_postfix, format_solution, reduced_form, source_form,
    term_table,
};

const EXIT_FAILED_EQUATION: i32 = 1;
const EXIT_USAGE: i32 = 2;

#[derive(Parser, Debug)]
#[command(version, about = "Solve polynomial equations of degree 2 or lower")]
struct Cli {
    /// Equation to solve, e.g. "5 * X^0 + 4 * X^1 = 4 * X^0"; without `=` the right side is 0
    equation: Option<String>,

    /// Also print the postfix sequence, the expression tree and a table of terms
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Print the solution only
    #[arg(short, long)]
    quiet: bool,

    /// Task file with a `solver` and an `equations` section
    #[arg(long, value_name = "FILE")]
    task: Option<PathBuf>,

    /// debug, info, warn, error or off
    #[arg(long)]
    loglevel: Option<String>,

    /// Write the log to FILE as well; "auto" picks a timestamped name
    #[arg(long = "log-file", value_name = "FILE")]
    log_file: Option<String>,

    /// Decimals printed for the roots
    #[arg(long)]
    precision: Option<usize>,

    /// Run a built-in example (0, 1 or 2)
    #[arg(long, hide = true)]
    example: Option<usize>,
}

/// Task file values with the command line applied on top.
#[derive(Debug, PartialEq)]
struct Settings {
    loglevel: LevelFilter,
    precision: usize,
    mode: OutputMode,
    log_file: Option<String>,
    equations: Vec<(String, String)>,
}

impl Settings {
    fn resolve(cli: &Cli) -> Result<Self, TaskError> {
        let task = match &cli.task {
            Some(path) => TaskConfig::from_file(path)?,
            None => TaskConfig::default(),
        };
        let loglevel = match &cli.loglevel {
            Some(level) => parse_level(level)?,
            None => task.loglevel.unwrap_or(LevelFilter::Error),
        };
        let mode = if cli.verbose {
            OutputMode::Verbose
        } else if cli.quiet {
            OutputMode::Quiet
        } else {
            task.mode.unwrap_or_default()
        };
        let log_file = cli.log_file.clone().or(task.log_file).map(|name| {
            if name == "auto" {
                timestamped_log_name()
            } else {
                name
            }
        });
        let equations = match &cli.equation {
            Some(equation) => vec![("equation".to_string(), equation.clone())],
            None => task.equations,
        };
        Ok(Settings {
            loglevel,
            precision: cli.precision.or(task.precision).unwrap_or(DEFAULT_PRECISION),
            mode,
            log_file,
            equations,
        })
    }
}

fn print_report(equation: &str, report: &Report, settings: &Settings) {
    let solution = format_solution(&report.solution, settings.precision);
    if settings.mode == OutputMode::Quiet {
        println!("{}", solution);
        return;
    }
    println!("Equation: {}", source_form(equation));
    println!("Reduced form: {}", reduced_form(&report.reduced));
    if settings.mode == OutputMode::Verbose {
        println!("Postfix: {}", format_postfix(&report.postfix));
        println!("Tree: {}", report.tree);
        println!("{}", term_table(&report.reduced, settings.precision));
    }
    println!("{}", describe(report.degree, report.discriminant));
    println!("{}", solution);
}

/// Returns false if the equation was rejected.
fn solve_one(equation: &str, settings: &Settings) -> bool {
    match Computor::evaluate(equation) {
        Ok(report) => {
            print_report(equation, &report, settings);
            true
        }
        Err(err) => {
            eprintln!("{}", equation);
            if err.position.is_some() {
                eprintln!("{}", err.caret());
            }
            eprintln!("Error: {}", err);
            false
        }
    }
}

fn run(cli: Cli) -> i32 {
    let settings = match Settings::resolve(&cli) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("Error: {}", err);
            return EXIT_USAGE;
        }
    };
    if let Err(err) = init_logger(settings.loglevel, settings.log_file.as_deref()) {
        eprintln!("Error: {}", err);
        return EXIT_USAGE;
    }
    if let Some(example) = cli.example {
        equation_examples(example);
        return 0;
    }
    if settings.equations.is_empty() {
        eprintln!("No equation or task file specified");
        return EXIT_USAGE;
    }

    let several = settings.equations.len() > 1;
    let mut failures = 0;
    for (name, equation) in &settings.equations {
        if several {
            println!("[{}]", name);
        }
        if !solve_one(equation, &settings) {
            failures += 1;
        }
    }
    info!(
        "{} equation(s) solved, {} rejected",
        settings.equations.len() - failures,
        failures
    );
    if failures > 0 {
        error!("{} equation(s) could not be solved", failures);
        EXIT_FAILED_EQUATION
    } else {
        0
    }
}

fn main() {
    let cli = Cli::parse();
    process::exit(run(cli));
}
