//! examples of usage of computor
/// polynomial equations: whole pipeline, single stages, error reporting
pub mod equation_examples;
