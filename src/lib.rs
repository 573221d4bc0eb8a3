//! Catalog type-schema strings → JSON Schema.
//!
//! ```text
//! struct<created_time:bigint,tags:array<string>>
//!   → {"type": "object", "properties": {"created_time": {"type": "number"}, ...}}
//! ```
//!
//! Pipeline: [`source::CharSource`] → [`lexer::Lexer`] (whole input, eagerly)
//! → [`cursor::UnitCursor`] → [`parser::Parser`] → [`schema::SchemaType`].
pub mod source;
pub mod lexer;
pub mod cursor;
pub mod parser;
pub mod schema;
pub mod emit;
pub mod error;
pub mod diagnostics;

pub use error::{Result, SchemaError};
pub use schema::{Primitive, SchemaType, StructType};

/// Lex and parse one schema expression.
pub fn parse(input: &str) -> Result<SchemaType> {
    let units = lexer::lex(input)?;
    parser::Parser::new(units).parse_schema()
}

/// Parse and render as a single-line JSON Schema document.
pub fn convert(input: &str) -> Result<String> {
    parse(input)?.to_json_line()
}
