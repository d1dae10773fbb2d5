mod reader;

use rustyline::DefaultEditor;

use reader::{ReadOutput, Reader};

use crate::error::{format_parse_errors, RunnerError};
use crate::runner::render;
use crate::Mode;

struct Repl {
    reader: Reader,
    mode: Mode,
}

impl Repl {
    fn run(mut self) -> Result<(), RunnerError> {
        loop {
            match self.reader.read()? {
                ReadOutput::Exit => break,
                ReadOutput::Clear => continue,
                ReadOutput::Value(line) => match render(&line, self.mode) {
                    Ok(output) => print!("{output}"),
                    Err(errors) => println!("parser errors:\n{}", format_parse_errors(&errors)),
                },
            }
        }
        Ok(())
    }
}

pub fn start(mode: Mode) -> Result<(), RunnerError> {
    let rl = DefaultEditor::new()?;

    Repl {
        reader: Reader::new(rl),
        mode,
    }
    .run()
}
