//! Typed schema tree produced by the parser.
//!
//! `Display` renders the compact catalog form (`struct<a:int,b:array<string>>`),
//! which the parser accepts back unchanged.
use std::fmt;
use std::str::FromStr;

use indexmap::map::Entry;
use indexmap::IndexMap;

// ------------------------------ Primitives -------------------------------- //

/// The approved leaf types. Anything else fails to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Int,
    Bigint,
    Double,
    String,
    Boolean,
}

impl Primitive {
    pub const ALL: [Primitive; 5] = [
        Primitive::Int,
        Primitive::Bigint,
        Primitive::Double,
        Primitive::String,
        Primitive::Boolean,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Primitive::Int => "int",
            Primitive::Bigint => "bigint",
            Primitive::Double => "double",
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
        }
    }

    /// JSON Schema `type` keyword for this primitive.
    pub fn json_type(self) -> &'static str {
        match self {
            Primitive::Int | Primitive::Bigint | Primitive::Double => "number",
            Primitive::String => "string",
            Primitive::Boolean => "boolean",
        }
    }
}

/// Error type is just the rejected name; the parser adds position info.
impl FromStr for Primitive {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Primitive::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --------------------------------- Tree ----------------------------------- //

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaType {
    Primitive(Primitive),
    Array(Box<SchemaType>),
    Struct(StructType),
}

/// Named fields in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructType {
    fields: IndexMap<String, SchemaType>,
}

impl StructType {
    pub fn new() -> Self { Self::default() }

    /// Append a field. Returns `false`, leaving the struct unchanged, if the
    /// name is already present.
    #[must_use]
    pub fn add_field(&mut self, name: impl Into<String>, ty: SchemaType) -> bool {
        match self.fields.entry(name.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(ty);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&SchemaType> { self.fields.get(name) }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &SchemaType)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize { self.fields.len() }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

impl SchemaType {
    pub fn array(element: SchemaType) -> Self {
        SchemaType::Array(Box::new(element))
    }

    /// Compact catalog form; same as `to_string()`.
    pub fn to_debug_string(&self) -> String {
        self.to_string()
    }

    pub fn as_struct(&self) -> Option<&StructType> {
        match self {
            SchemaType::Struct(s) => Some(s),
            _ => None,
        }
    }

    pub fn element(&self) -> Option<&SchemaType> {
        match self {
            SchemaType::Array(item) => Some(item),
            _ => None,
        }
    }
}

impl From<Primitive> for SchemaType {
    fn from(p: Primitive) -> Self { SchemaType::Primitive(p) }
}

impl From<StructType> for SchemaType {
    fn from(s: StructType) -> Self { SchemaType::Struct(s) }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::Primitive(p) => write!(f, "{p}"),
            SchemaType::Array(item) => write!(f, "array<{item}>"),
            SchemaType::Struct(s) => {
                f.write_str("struct<")?;
                for (i, (name, ty)) in s.fields().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{name}:{ty}")?;
                }
                f.write_str(">")
            }
        }
    }
}

// ------------------------------- Tests ------------------------------------ //
