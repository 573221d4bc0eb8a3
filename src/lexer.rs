//! Lexer: character source → fully materialized buffer of lexical units.
//!
//! Units are whitespace runs, identifier runs, or single punctuation
//! characters. Whitespace is *not* dropped here; the parser decides where it
//! is insignificant. The whole buffer is built before parsing starts so the
//! parser can backtrack by index.
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Result, SchemaError};
use crate::source::CharSource;

/// One lexical unit plus the nesting depth and line it was scanned at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    pub value: String,
    /// `<` minus `>` seen so far, including this unit.
    pub depth: i32,
    pub line: usize,
}

impl Unit {
    pub fn is_whitespace(&self) -> bool {
        self.value.chars().next().is_some_and(char::is_whitespace)
    }
}

/// Letters (Unicode `Alphabetic`), ASCII decimal digits, and `_`. Other
/// numeric characters such as `²` are punctuation units.
pub fn is_ident(ch: char) -> bool {
    ch.is_alphabetic() || ch.is_ascii_digit() || ch == '_'
}

pub struct Lexer {
    source: CharSource,
    depth: i32,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self { source: CharSource::new(input), depth: 0 }
    }

    /// Scan the next unit. `Exhausted` means no unit was produced at all.
    pub fn next_unit(&mut self) -> Result<Unit> {
        let first = self.source.read_char()?;
        let mut value = String::from(first);

        if first.is_whitespace() {
            self.take_while(&mut value, char::is_whitespace)?;
        } else if is_ident(first) {
            self.take_while(&mut value, is_ident)?;
        } else if first == '<' {
            self.depth += 1;
        } else if first == '>' {
            self.depth -= 1;
        }

        Ok(Unit { value, depth: self.depth, line: self.source.line() })
    }

    /// Append characters matching `pred`; end of input ends the run cleanly.
    fn take_while(&mut self, buf: &mut String, pred: impl Fn(char) -> bool) -> Result<()> {
        loop {
            match self.source.read_char() {
                Ok(ch) if pred(ch) => buf.push(ch),
                Ok(_) => return self.source.step_back(),
                Err(SchemaError::Exhausted) => return Ok(()),
                Err(error) => return Err(error),
            }
        }
    }

    /// Drain the source into the complete unit buffer.
    pub fn tokenize(mut self) -> Result<Vec<Unit>> {
        let mut units = Vec::new();
        loop {
            match self.next_unit() {
                Ok(unit) => {
                    trace!(value = %unit.value.escape_debug(), depth = unit.depth, line = unit.line, "unit");
                    units.push(unit);
                }
                Err(SchemaError::Exhausted) => break,
                Err(error) => return Err(error),
            }
        }
        debug!(units = units.len(), final_depth = self.depth, "lexed schema input");
        Ok(units)
    }
}

/// Convenience: lex a whole string.
pub fn lex(input: &str) -> Result<Vec<Unit>> {
    Lexer::new(input).tokenize()
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    fn values(units: &[Unit]) -> Vec<&str> {
        units.iter().map(|u| u.value.as_str()).collect()
    }

    #[test]
    fn splits_identifiers_punctuation_and_whitespace() {
        let units = lex("struct< created_time : bigint >").unwrap();
        assert_eq!(
            values(&units),
            vec!["struct", "<", " ", "created_time", " ", ":", " ", "bigint", " ", ">"]
        );
    }

    #[test]
    fn whitespace_runs_collapse_into_one_unit() {
        let units = lex("a \t\n  b").unwrap();
        assert_eq!(values(&units), vec!["a", " \t\n  ", "b"]);
        assert!(units[1].is_whitespace());
        assert!(!units[0].is_whitespace());
        assert_eq!(units[2].line, 2);
    }

    #[test]
    fn punctuation_is_one_char_per_unit() {
        let units = lex("<<,:>>").unwrap();
        assert_eq!(values(&units), vec!["<", "<", ",", ":", ">", ">"]);
        let depths: Vec<i32> = units.iter().map(|u| u.depth).collect();
        assert_eq!(depths, vec![1, 2, 2, 2, 1, 0]);
    }

    #[test]
    fn depth_tracks_brackets_for_nested_schema() {
        let units = lex("struct<a:array<int>>").unwrap();
        assert_eq!(units.last().unwrap().depth, 0);
        assert!(units.iter().all(|u| u.depth >= 0));
        let max = units.iter().map(|u| u.depth).max().unwrap();
        assert_eq!(max, 2);
    }

    #[test]
    fn depth_is_scoped_to_each_lexer() {
        let first = lex("struct<a:int").unwrap();
        assert_eq!(first.last().unwrap().depth, 1);
        // a fresh lexer starts at zero, whatever the previous one ended on
        let second = lex("<").unwrap();
        assert_eq!(second[0].depth, 1);
    }

    #[test]
    fn identifier_class_is_letters_digits_underscore() {
        assert!(is_ident('a') && is_ident('Ä') && is_ident('名'));
        assert!(is_ident('7') && is_ident('_'));
        assert!(!is_ident('²'));
        assert!(!is_ident('¼'));
        assert!(!is_ident('-'));
        let units = lex("col_1²x").unwrap();
        assert_eq!(values(&units), vec!["col_1", "²", "x"]);
    }

    #[test]
    fn empty_input_yields_no_units() {
        assert!(lex("").unwrap().is_empty());
        let mut lexer = Lexer::new("");
        assert!(lexer.next_unit().unwrap_err().is_exhausted());
    }

    #[test]
    fn unit_line_is_snapshot_after_scanning() {
        let units = lex("struct<\na:int>").unwrap();
        assert_eq!(units[1].line, 1); // `<`
        assert_eq!(units[2].line, 2); // "\n" run, newline consumed
        assert_eq!(units[3].line, 2); // `a`
    }
}
