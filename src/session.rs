//! Pipeline glue: scan → parse → resolve → interpret.
//!
//! A [`Lox`] session keeps one interpreter alive across runs so that a REPL
//! can define something on one line and use it on the next.

use std::io::{BufRead, Write};

use log::info;

use crate::config::Config;
use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner;

pub struct Lox {
    interpreter: Interpreter,
    config: Config,
    next_id: usize,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Lox {
    pub fn new(config: Config) -> Self {
        Self {
            interpreter: Interpreter::new(),
            config,
            next_id: 0,
        }
    }

    pub fn with_io(config: Config, output: Box<dyn Write>, input: Box<dyn BufRead>) -> Self {
        Self {
            interpreter: Interpreter::with_io(output, input),
            config,
            next_id: 0,
        }
    }

    /// Run one program. Stops at the first stage that reports errors and
    /// returns all of that stage's diagnostics; a runtime error comes back
    /// as a single [`LoxError::Runtime`].
    pub fn run(&mut self, source: &str) -> Result<(), Vec<LoxError>> {
        let tokens = scanner::scan(source)?;

        let mut parser = Parser::new(tokens)
            .with_config(self.config)
            .with_first_id(self.next_id);
        let parsed = parser.parse();
        self.next_id = parser.next_id();
        let statements = parsed?;

        info!("Parsed {} statements", statements.len());

        let resolutions = Resolver::new().resolve(&statements)?;
        self.interpreter.resolve(resolutions);

        self.interpreter
            .interpret(&statements)
            .map_err(|e| vec![e])
    }
}
