//! Character source: the raw input as an indexed `char` buffer.
//!
//! Only a single `step_back` after a `read_char` is guaranteed to be
//! meaningful for the line counter; deeper backtracking happens one layer up,
//! over the materialized unit buffer.
use crate::error::{Result, SchemaError};

#[derive(Debug, Clone)]
pub struct CharSource {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl CharSource {
    pub fn new(input: &str) -> Self {
        Self { chars: input.chars().collect(), pos: 0, line: 1 }
    }

    pub fn read_char(&mut self) -> Result<char> {
        let Some(&ch) = self.chars.get(self.pos) else {
            return Err(SchemaError::Exhausted);
        };
        if ch == '\n' {
            self.line += 1;
        }
        self.pos += 1;
        Ok(ch)
    }

    pub fn step_back(&mut self) -> Result<()> {
        if self.pos == 0 {
            return Err(SchemaError::InvalidCursorOperation {
                operation: "step back before the start of input",
                position: 0,
            });
        }
        self.pos -= 1;
        if self.chars[self.pos] == '\n' {
            self.line -= 1;
        }
        Ok(())
    }

    pub fn position(&self) -> usize { self.pos }

    pub fn line(&self) -> usize { self.line }

    pub fn is_at_end(&self) -> bool { self.pos >= self.chars.len() }
}

// ------------------------------- Tests ------------------------------------ //
