//! Error sink shared by every pipeline stage.
//!
//! Scanner, parser and resolver push static errors here and carry on; the
//! runner records the single runtime error that aborted a run.  The driver
//! inspects [`Diagnostics::had_error`] / [`Diagnostics::had_runtime_error`]
//! after each stage instead of consulting global flags.

use log::debug;

use crate::error::LoxError;
use crate::token::Token;

#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<LoxError>,
    had_error: bool,
    had_runtime_error: bool,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexical error: only a line is known.
    pub fn report_error(&mut self, line: usize, message: &str) {
        self.push(LoxError::lex(line, message));
    }

    /// Syntax error located at `token`.
    pub fn report_error_at(&mut self, token: &Token, message: &str) {
        self.push(LoxError::parse(token, message));
    }

    /// Static-semantic error located at `token`.
    pub fn report_resolve_error(&mut self, token: &Token, message: &str) {
        self.push(LoxError::resolve(token, message));
    }

    pub fn report_runtime_error(&mut self, error: LoxError) {
        self.push(error);
    }

    /// Records an already-built error, classifying it as static or runtime.
    pub fn push(&mut self, error: LoxError) {
        debug!("Diagnostic: {}", error);

        if error.is_static() {
            self.had_error = true;
        } else {
            self.had_runtime_error = true;
        }

        self.errors.push(error);
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn errors(&self) -> &[LoxError] {
        &self.errors
    }

    /// Takes the collected errors, leaving the flags untouched.
    pub fn drain(&mut self) -> Vec<LoxError> {
        std::mem::take(&mut self.errors)
    }

    /// Forgets everything; the REPL calls this between lines.
    pub fn clear(&mut self) {
        self.errors.clear();
        self.had_error = false;
        self.had_runtime_error = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    #[test]
    fn static_and_runtime_errors_set_separate_flags() {
        let mut diagnostics = Diagnostics::new();
        assert!(!diagnostics.had_error());

        diagnostics.report_error(3, "Unexpected character: #");
        assert!(diagnostics.had_error());
        assert!(!diagnostics.had_runtime_error());

        let token = Token::new(TokenType::SLASH, "/", 7);
        diagnostics.report_runtime_error(LoxError::runtime(&token, "Division by zero."));
        assert!(diagnostics.had_runtime_error());
        assert_eq!(diagnostics.errors().len(), 2);
        assert_eq!(diagnostics.errors()[1].line(), Some(7));
    }

    #[test]
    fn token_form_renders_location() {
        let mut diagnostics = Diagnostics::new();

        diagnostics.report_error_at(&Token::new(TokenType::EOF, "", 2), "Expect expression.");
        diagnostics.report_error_at(
            &Token::new(TokenType::IDENTIFIER, "foo", 4),
            "Expect ';' after value.",
        );

        let rendered: Vec<String> = diagnostics.errors().iter().map(|e| e.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "[line 2] Error at end: Expect expression.".to_string(),
                "[line 4] Error at 'foo': Expect ';' after value.".to_string(),
            ]
        );
    }

    #[test]
    fn clear_resets_flags() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report_error(1, "Unterminated string.");
        diagnostics.clear();

        assert!(!diagnostics.had_error());
        assert!(diagnostics.errors().is_empty());
    }
}
