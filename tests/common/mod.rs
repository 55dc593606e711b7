#![allow(dead_code)]

use std::cell::RefCell;
use std::io::{self, Cursor, Write};
use std::rc::Rc;

use treelox as lox;

use lox::config::Config;
use lox::error::LoxError;
use lox::Lox;

/// In‑memory sink whose contents stay readable after the interpreter has
/// taken ownership of its `Box<dyn Write>`.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).expect("output is valid UTF-8")
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A session with captured output and the given text as stdin.
pub fn session_with_input(input: &str) -> (Lox, SharedBuffer) {
    let out = SharedBuffer::default();
    let lox = Lox::with_io(
        Config::default(),
        Box::new(out.clone()),
        Box::new(Cursor::new(input.as_bytes().to_vec())),
    );
    (lox, out)
}

pub fn session() -> (Lox, SharedBuffer) {
    session_with_input("")
}

/// Run `source` in a fresh session; returns everything printed and the
/// outcome.
pub fn run(source: &str) -> (String, Result<(), Vec<LoxError>>) {
    let (mut lox, out) = session();
    let result = lox.run(source);
    (out.contents(), result)
}

/// Run `source`, which must succeed, and return its output.
pub fn output_of(source: &str) -> String {
    let (out, result) = run(source);
    if let Err(errors) = result {
        panic!("program failed: {:?}\noutput so far:\n{}", errors, out);
    }
    out
}

/// Run `source`, which must fail with a runtime error; return the output
/// written before the error and the error message.
pub fn runtime_error_of(source: &str) -> (String, String) {
    let (out, result) = run(source);
    match result {
        Err(errors) => {
            assert_eq!(errors.len(), 1, "expected exactly one runtime error");
            match &errors[0] {
                LoxError::Runtime { message, .. } => (out, message.clone()),
                other => panic!("expected runtime error, got {:?}", other),
            }
        }
        Ok(()) => panic!("expected a runtime error, program succeeded with:\n{}", out),
    }
}
