//! JSON Schema emission for [`SchemaType`].
use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use serde_json::{json, Map, Value};

use crate::error::Result;
use crate::schema::SchemaType;

impl SchemaType {
    /// Build the JSON Schema document. Struct properties keep declaration order
    /// (`serde_json` is built with `preserve_order`).
    pub fn to_json_schema(&self) -> Value {
        match self {
            SchemaType::Primitive(p) => json!({ "type": p.json_type() }),
            SchemaType::Array(item) => json!({
                "type": "array",
                "items": item.to_json_schema(),
            }),
            SchemaType::Struct(s) => {
                let mut props = Map::new();
                for (name, ty) in s.fields() {
                    props.insert(name.to_string(), ty.to_json_schema());
                }
                json!({ "type": "object", "properties": props })
            }
        }
    }

    /// Single-line rendering: `{"type": "object", "properties": {...}}`.
    pub fn to_json_line(&self) -> Result<String> {
        to_spaced_line(&self.to_json_schema())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json_schema())?)
    }
}

/// Serialize any JSON value on one line with `", "` and `": "` separators.
pub fn to_spaced_line(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Compact output, but with a space after every `,` and `:`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }
}

// ------------------------------- Tests ------------------------------------ //
