//! Recursive-descent parser over the unit cursor.
//!
//! Grammar:
//!
//! ```text
//! schema    := struct
//! struct    := "struct" "<" field ("," field)* ">"
//! field     := IDENT ":" type
//! type      := "array" "<" type ">" | struct | bare_type
//! bare_type := one unit naming an approved primitive
//! ```
//!
//! Whitespace units are skipped between any two terminals. The first error
//! aborts the parse; there is no recovery.
use tracing::{debug, trace};

use crate::cursor::UnitCursor;
use crate::error::{Result, SchemaError};
use crate::lexer::Unit;
use crate::schema::{Primitive, SchemaType, StructType};

const END_OF_INPUT: &str = "end of input";

/// Deepest `<` nesting accepted; each level costs a few stack frames.
pub const MAX_DEPTH: i32 = 128;

pub struct Parser {
    cursor: UnitCursor,
}

impl Parser {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { cursor: UnitCursor::new(units) }
    }

    pub fn units(&self) -> &[Unit] { self.cursor.units() }

    /// `schema := struct`, followed by nothing but whitespace.
    pub fn parse_schema(&mut self) -> Result<SchemaType> {
        let root = self.parse_struct()?;
        self.skip_whitespace()?;
        if !self.cursor.is_at_end() {
            let unit = self.cursor.read_unit()?;
            return Err(SchemaError::UnexpectedToken {
                expected: END_OF_INPUT.to_string(),
                actual: unit.value,
                position: self.cursor.position() - 1,
                line: self.cursor.current_line(),
                context: String::new(),
            });
        }
        debug!(fields = root.len(), "parsed schema");
        Ok(SchemaType::Struct(root))
    }

    pub fn parse_struct(&mut self) -> Result<StructType> {
        self.expect("struct")?;
        self.expect("<")?;
        self.check_depth()?;
        let mut out = StructType::new();
        loop {
            let field_name = self.next_significant("field name")?.value;
            let line = self.cursor.current_line();
            self.expect(":")?;

            let field_type = self.parse_type()?;
            trace!(field = %field_name, ty = %field_type, "field");
            if !out.add_field(field_name.clone(), field_type) {
                return Err(SchemaError::DuplicateField { name: field_name, line });
            }

            if self.peek_significant("\",\" or \">\"")? == ">" {
                self.expect(">")?;
                return Ok(out);
            }
            self.expect_with(",", &format!(", when parsing struct after parsing field {field_name}"))?;
        }
    }

    pub fn parse_array(&mut self) -> Result<SchemaType> {
        self.expect("array")?;
        self.expect("<")?;
        self.check_depth()?;
        let element = self.parse_type()?;
        self.expect(">")?;
        Ok(SchemaType::array(element))
    }

    /// Dispatch on the next significant unit without consuming it.
    fn parse_type(&mut self) -> Result<SchemaType> {
        match self.peek_significant("type")?.as_str() {
            "array" => self.parse_array(),
            "struct" => Ok(SchemaType::Struct(self.parse_struct()?)),
            _ => self.parse_bare_type(),
        }
    }

    fn parse_bare_type(&mut self) -> Result<SchemaType> {
        let unit = self.next_significant("type name")?;
        match unit.value.parse::<Primitive>() {
            Ok(p) => Ok(SchemaType::Primitive(p)),
            Err(name) => Err(SchemaError::UnknownType {
                name,
                position: self.cursor.position() - 1,
                line: self.cursor.current_line(),
            }),
        }
    }

    // ---------------------------- Primitives ---------------------------- //

    /// Called right after a `<`, whose depth the cursor now reports.
    fn check_depth(&self) -> Result<()> {
        if self.cursor.depth() > MAX_DEPTH {
            return Err(SchemaError::NestingTooDeep {
                limit: MAX_DEPTH,
                position: self.cursor.position() - 1,
                line: self.cursor.current_line(),
            });
        }
        Ok(())
    }

    fn expect(&mut self, expected: &str) -> Result<()> {
        self.expect_with(expected, "")
    }

    fn expect_with(&mut self, expected: &str, context: &str) -> Result<()> {
        let unit = self.next_significant(expected)?;
        if unit.value != expected {
            return Err(SchemaError::UnexpectedToken {
                expected: expected.to_string(),
                actual: unit.value,
                position: self.cursor.position() - 1,
                line: self.cursor.current_line(),
                context: context.to_string(),
            });
        }
        Ok(())
    }

    /// Consume whitespace units; stops quietly at end of input.
    fn skip_whitespace(&mut self) -> Result<()> {
        loop {
            match self.cursor.peek() {
                Ok(s) if s == " " || s == "\n" => {
                    self.cursor.read_unit()?;
                }
                Ok(_) => return Ok(()),
                Err(SchemaError::Exhausted) => return Ok(()),
                Err(error) => return Err(error),
            }
        }
    }

    /// Read the next non-whitespace unit. Running out here means the
    /// structure was left open, which is reported against `expected`.
    fn next_significant(&mut self, expected: &str) -> Result<Unit> {
        self.skip_whitespace()?;
        match self.cursor.read_unit() {
            Err(SchemaError::Exhausted) => Err(SchemaError::UnexpectedEnd {
                expected: expected.to_string(),
                position: self.cursor.position(),
                line: self.cursor.current_line(),
            }),
            other => other,
        }
    }

    /// Look past any whitespace, then rewind so nothing is consumed.
    fn peek_significant(&mut self, expected: &str) -> Result<String> {
        let mark = self.cursor.position();
        self.skip_whitespace()?;
        let next = self.cursor.peek();
        self.cursor.unread_to(mark)?;
        match next {
            Err(SchemaError::Exhausted) => Err(SchemaError::UnexpectedEnd {
                expected: expected.to_string(),
                position: self.cursor.position(),
                line: self.cursor.current_line(),
            }),
            other => other,
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
