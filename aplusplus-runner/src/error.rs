use std::path::PathBuf;

use aplusplus_core::parser::ParseError;
use rustyline::error::ReadlineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("readline failed: {0}")]
    Readline(#[from] ReadlineError),
    #[error("parser errors:\n{}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),
}

pub fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|error| format!("\t{error}"))
        .collect::<Vec<_>>()
        .join("\n")
}
