/*
 Task files: a sequence of sections, each one a title line followed by `key: value` lines.

 solver
   loglevel: info
   precision: 3
   mode: verbose
 equations
   first: 5 * x^0 + 4 * x^1 = 4 * x^0
   second: x^2 = 4

 A value is the rest of its line, so equations may contain spaces, `*` or `=`.
 Lines starting with //, #, % or ; are comments.
*/
use crate::Utils::logger::parse_level;
use log::LevelFilter;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_till},
    character::complete::{alpha1, alphanumeric1, line_ending, space0},
    combinator::{map, opt, recognize},
    multi::{many0, many1},
    sequence::{delimited, pair, separated_pair, terminated},
};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

pub type Section = Vec<(String, String)>;
pub type Document = Vec<(String, Section)>;

pub const SOLVER_SECTION: &str = "solver";
pub const EQUATIONS_SECTION: &str = "equations";

#[derive(Debug)]
pub enum TaskError {
    Io(std::io::Error),
    Parse(String),
    InvalidValue { key: String, value: String },
}

impl fmt::Display for TaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskError::Io(err) => write!(f, "cannot read task: {}", err),
            TaskError::Parse(rest) => write!(f, "cannot parse task near '{}'", rest),
            TaskError::InvalidValue { key, value } => {
                write!(f, "invalid value '{}' for '{}'", value, key)
            }
        }
    }
}

impl std::error::Error for TaskError {}

impl From<std::io::Error> for TaskError {
    fn from(err: std::io::Error) -> Self {
        TaskError::Io(err)
    }
}

/// How much of the pipeline is printed for every equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Normal,
    Verbose,
    Quiet,
}

/// Settings and equations read from a task file; `None` means "not set in the file".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskConfig {
    pub loglevel: Option<LevelFilter>,
    pub precision: Option<usize>,
    pub mode: Option<OutputMode>,
    pub log_file: Option<String>,
    /// (name, equation) in file order
    pub equations: Vec<(String, String)>,
}

impl TaskConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TaskError> {
        let content = std::fs::read_to_string(path)?;
        content.parse()
    }

    fn apply_solver_key(&mut self, key: &str, value: &str) -> Result<(), TaskError> {
        let invalid = || TaskError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        match key {
            "loglevel" => self.loglevel = Some(parse_level(value)?),
            "precision" => self.precision = Some(value.parse().map_err(|_| invalid())?),
            "mode" => self.mode = Some(OutputMode::from_str(value).map_err(|_| invalid())?),
            "log_file" if !value.is_empty() => self.log_file = Some(value.to_string()),
            _ => return Err(invalid()),
        }
        Ok(())
    }
}

impl FromStr for TaskConfig {
    type Err = TaskError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut config = TaskConfig::default();
        for (title, section) in parse_task(input)? {
            match title.as_str() {
                SOLVER_SECTION => {
                    for (key, value) in &section {
                        config.apply_solver_key(key, value)?;
                    }
                }
                EQUATIONS_SECTION => config.equations.extend(section),
                _ => {
                    return Err(TaskError::InvalidValue {
                        key: "section".to_string(),
                        value: title,
                    });
                }
            }
        }
        Ok(config)
    }
}

/// Parses an identifier (word characters without spaces)
fn parse_key(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// A title is an identifier alone on its line.
fn parse_title(input: &str) -> IResult<&str, String> {
    let mut parser = delimited(space0, parse_key, pair(space0, line_ending));
    parser.parse(input)
}

/// Everything up to the end of the line, trimmed.
fn parse_value(input: &str) -> IResult<&str, String> {
    let mut parser = map(take_till(|c: char| c == '\n' || c == '\r'), |s: &str| {
        s.trim().to_string()
    });
    parser.parse(input)
}

fn parse_key_value_pair(input: &str) -> IResult<&str, (String, String)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let mut parser = terminated(
        delimited(space0, separated_pair(parse_key, colon_separator, parse_value), space0),
        opt(line_ending),
    );
    parser.parse(input)
}

fn parse_section(input: &str) -> IResult<&str, (String, Section)> {
    let mut parser = pair(parse_title, many1(parse_key_value_pair));
    parser.parse(input)
}

/// Filters out comment lines (starting with //, #, %, or ;) and blank lines
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Parses the whole task into sections; any leftover text is an error.
pub fn parse_task(input: &str) -> Result<Document, TaskError> {
    let filtered = filter_comments(input);
    if filtered.is_empty() {
        return Ok(Vec::new());
    }
    match many1(parse_section).parse(filtered.as_str()) {
        Ok((remaining, sections)) if remaining.trim().is_empty() => Ok(sections),
        Ok((remaining, _)) => Err(TaskError::Parse(first_line(remaining))),
        Err(_) => Err(TaskError::Parse(first_line(&filtered))),
    }
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().trim().to_string()
}
