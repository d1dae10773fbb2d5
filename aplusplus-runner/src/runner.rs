use std::path::Path;

use aplusplus_core::lexer::Lexer;
use aplusplus_core::parser::{ParseError, Parser};
use log::info;

use crate::error::RunnerError;
use crate::Mode;

/// Renders `source` in the requested mode. Parsing errors suppress the
/// rendered program.
pub fn render(source: &str, mode: Mode) -> Result<String, Vec<ParseError>> {
    match mode {
        Mode::Tokens => Ok(Lexer::new(source)
            .map(|token| format!("{token}\n"))
            .collect()),
        Mode::Ast => {
            let mut parser = Parser::new(Lexer::new(source));
            let program = parser.parse_program();
            if parser.errors().is_empty() {
                Ok(program.to_string())
            } else {
                Err(parser.errors().to_vec())
            }
        }
    }
}

pub fn execute(path: &Path, mode: Mode) -> Result<(), RunnerError> {
    info!("parsing {}", path.display());
    let source = std::fs::read_to_string(path).map_err(|source| RunnerError::Io {
        path: path.to_owned(),
        source,
    })?;

    let output = render(&source, mode).map_err(RunnerError::Parse)?;
    print!("{output}");
    Ok(())
}
