//! Human-oriented dump of the unit buffer, printed under parse errors.
//!
//! ```text
//!  0      1 2            3 4      5
//!  struct < created_time : bigint >
//! ```
use crate::lexer::Unit;

/// Make control whitespace visible so the dump stays on two lines.
pub fn escape_unit(value: &str) -> String {
    value.replace('\n', "\\n").replace('\t', "\\t").replace('\r', "\\r")
}

/// Index row above, unit row below, each column as wide as its widest cell.
pub fn format_unit_buffer(units: &[Unit]) -> String {
    let mut indices = String::new();
    let mut values = String::new();
    for (i, unit) in units.iter().enumerate() {
        let value = escape_unit(&unit.value);
        let index = i.to_string();
        let width = value.chars().count().max(index.len());
        indices.push_str(&format!(" {index:<width$}"));
        values.push_str(&format!(" {value:>width$}"));
    }
    format!("{indices}\n{values}")
}
