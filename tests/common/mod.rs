use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use treelox::{Lox, RunOutcome};

/// `Write` sink whose bytes stay readable after the session took ownership.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
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

/// A session printing into a buffer, and that buffer.
#[allow(dead_code)]
pub fn session() -> (Lox, SharedBuffer) {
    let out = SharedBuffer::default();
    (Lox::with_output(Box::new(out.clone())), out)
}

/// Runs `source` in a fresh session; returns the outcome, printed lines and
/// rendered errors.
#[allow(dead_code)]
pub fn run(source: &str) -> (RunOutcome, Vec<String>, Vec<String>) {
    let (mut lox, out) = session();
    let outcome = lox.run(source);

    let printed = out.contents().lines().map(str::to_string).collect();
    let errors = lox
        .diagnostics()
        .errors()
        .iter()
        .map(|e| e.to_string())
        .collect();

    (outcome, printed, errors)
}
