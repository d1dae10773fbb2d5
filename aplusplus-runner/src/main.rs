mod error;
mod repl;
mod runner;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Print the token stream
    Tokens,
    /// Print the parsed program, fully parenthesised
    Ast,
}

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, value_enum, default_value_t=Mode::Ast)]
    mode: Mode,
    /// Source file to parse. Starts a REPL when omitted.
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.path {
        None => repl::start(cli.mode),
        Some(path) => runner::execute(&path, cli.mode),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
