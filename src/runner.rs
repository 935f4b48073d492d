//! Pipeline driver: scan → parse → resolve → interpret.
//!
//! A [`Lox`] session owns one interpreter, so globals and resolved scope
//! distances survive from one [`Lox::run`] to the next.  That is what lets the
//! REPL define a function on one line and call it on the following one.

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::diagnostics::Diagnostics;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;

/// How a single [`Lox::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Ok,
    /// Lexical, syntax or resolution error; nothing was executed.
    StaticError,
    /// Execution started and was aborted.
    RuntimeError,
}

impl RunOutcome {
    /// Process exit status for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            RunOutcome::Ok => 0,
            RunOutcome::StaticError => 65,
            RunOutcome::RuntimeError => 70,
        }
    }
}

pub struct Lox {
    interpreter: Interpreter,
    diagnostics: Diagnostics,
    next_expr_id: usize,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// A session whose `print` statements write to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::with_output(out),
            diagnostics: Diagnostics::new(),
            next_expr_id: 0,
        }
    }

    /// Errors reported by the most recent run.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn run(&mut self, source: &str) -> RunOutcome {
        self.diagnostics.clear();

        let tokens = Scanner::new(source).scan_tokens(&mut self.diagnostics);

        let statements = {
            let mut parser =
                Parser::new(tokens, &mut self.diagnostics).with_first_id(self.next_expr_id);
            let statements = parser.parse();
            self.next_expr_id = parser.next_free_id();
            statements
        };

        if self.diagnostics.had_error() {
            info!("Static errors before resolving, skipping execution");
            return RunOutcome::StaticError;
        }

        Resolver::new(&mut self.interpreter, &mut self.diagnostics).resolve(&statements);

        if self.diagnostics.had_error() {
            info!("Resolution failed, skipping execution");
            return RunOutcome::StaticError;
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => RunOutcome::Ok,
            Err(e) => {
                debug!("Runtime debug: {}", e);
                self.diagnostics.report_runtime_error(e);
                RunOutcome::RuntimeError
            }
        }
    }

    /// Read-eval-print loop over `input`.  Each line runs as its own program;
    /// errors go to `err_out` and never end the session.  Stops at EOF.
    pub fn run_prompt<R: BufRead>(
        &mut self,
        mut input: R,
        prompt_out: &mut dyn Write,
        err_out: &mut dyn Write,
    ) -> io::Result<()> {
        info!("Starting REPL");

        loop {
            write!(prompt_out, "> ")?;
            prompt_out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(prompt_out)?;
                break;
            }

            let outcome = self.run(&line);
            debug!("REPL line finished with {:?}", outcome);

            for error in self.diagnostics.drain() {
                writeln!(err_out, "{}", error)?;
            }
            self.diagnostics.clear();
        }

        info!("REPL finished");
        Ok(())
    }
}
