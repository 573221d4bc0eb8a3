//! Replayable cursor over the lexed unit buffer.
//!
//! The cursor's reported depth/line always track the most recently *read*
//! unit, i.e. the one just behind `pos`. At position 0 they fall back to the
//! zero state.
use crate::error::{Result, SchemaError};
use crate::lexer::Unit;

#[derive(Debug, Clone)]
pub struct UnitCursor {
    units: Vec<Unit>,
    pos: usize,
    depth: i32,
    line: usize,
}

impl UnitCursor {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units, pos: 0, depth: 0, line: 0 }
    }

    pub fn read_unit(&mut self) -> Result<Unit> {
        let unit = self.units.get(self.pos).cloned().ok_or(SchemaError::Exhausted)?;
        self.depth = unit.depth;
        self.line = unit.line;
        self.pos += 1;
        Ok(unit)
    }

    pub fn unread_unit(&mut self) -> Result<()> {
        if self.pos == 0 {
            return Err(SchemaError::InvalidCursorOperation {
                operation: "unread before the start of the unit buffer",
                position: 0,
            });
        }
        self.pos -= 1;
        match self.pos.checked_sub(1).map(|prev| &self.units[prev]) {
            Some(prev) => {
                self.depth = prev.depth;
                self.line = prev.line;
            }
            None => {
                self.depth = 0;
                self.line = 0;
            }
        }
        Ok(())
    }

    /// Rewind to an earlier position (e.g. one saved with [`UnitCursor::position`]).
    pub fn unread_to(&mut self, position: usize) -> Result<()> {
        if position > self.pos {
            return Err(SchemaError::InvalidCursorOperation {
                operation: "rewind forward",
                position,
            });
        }
        while self.pos != position {
            self.unread_unit()?;
        }
        Ok(())
    }

    /// Look at the next unit without consuming it. Whitespace is reported as
    /// `"\n"` if the run holds a newline, otherwise as `" "`.
    pub fn peek(&mut self) -> Result<String> {
        let unit = self.read_unit()?;
        self.unread_unit()?;
        if unit.is_whitespace() {
            let canonical = if unit.value.contains('\n') { "\n" } else { " " };
            return Ok(canonical.to_string());
        }
        Ok(unit.value)
    }

    pub fn current_line(&self) -> usize { self.line }

    pub fn depth(&self) -> i32 { self.depth }

    pub fn position(&self) -> usize { self.pos }

    pub fn is_at_end(&self) -> bool { self.pos >= self.units.len() }

    pub fn units(&self) -> &[Unit] { &self.units }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn cursor(input: &str) -> UnitCursor {
        UnitCursor::new(lex(input).unwrap())
    }

    #[test]
    fn read_advances_and_reports_unit_state() {
        let mut c = cursor("struct<a:int>");
        assert_eq!(c.read_unit().unwrap().value, "struct");
        assert_eq!(c.read_unit().unwrap().value, "<");
        assert_eq!(c.depth(), 1);
        assert_eq!(c.current_line(), 1);
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn read_past_end_is_exhausted() {
        let mut c = cursor("a");
        c.read_unit().unwrap();
        assert!(c.is_at_end());
        assert!(c.read_unit().unwrap_err().is_exhausted());
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn unread_restores_previous_unit_state() {
        let mut c = cursor("a<b");
        c.read_unit().unwrap();
        c.read_unit().unwrap();
        c.read_unit().unwrap();
        assert_eq!(c.depth(), 1);
        c.unread_unit().unwrap();
        c.unread_unit().unwrap();
        assert_eq!(c.depth(), 0);
        assert_eq!(c.current_line(), 1);
        c.unread_unit().unwrap();
        assert_eq!(c.position(), 0);
        assert_eq!(c.current_line(), 0);
        assert_eq!(c.read_unit().unwrap().value, "a");
    }

    #[test]
    fn unread_at_start_fails() {
        let mut c = cursor("a");
        let err = c.unread_unit().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidCursorOperation { .. }));
    }

    #[test]
    fn unread_to_rewinds_arbitrarily_far() {
        let mut c = cursor("struct<a:array<int>>");
        let mark = c.position();
        for _ in 0..7 {
            c.read_unit().unwrap();
        }
        c.unread_to(mark).unwrap();
        assert_eq!(c.position(), 0);
        assert_eq!(c.peek().unwrap(), "struct");
    }

    #[test]
    fn unread_to_rejects_forward_target() {
        let mut c = cursor("a b");
        c.read_unit().unwrap();
        assert!(c.unread_to(3).is_err());
        assert_eq!(c.position(), 1);
    }

    #[test]
    fn peek_does_not_consume_and_canonicalizes_whitespace() {
        let mut c = cursor("a  \t b\n\n c");
        assert_eq!(c.peek().unwrap(), "a");
        assert_eq!(c.position(), 0);
        c.read_unit().unwrap();
        assert_eq!(c.peek().unwrap(), " ");
        c.read_unit().unwrap();
        c.read_unit().unwrap();
        assert_eq!(c.peek().unwrap(), "\n");
        assert_eq!(c.position(), 3);
    }

    #[test]
    fn peek_at_end_is_exhausted() {
        let mut c = cursor("");
        assert!(c.peek().unwrap_err().is_exhausted());
    }
}
