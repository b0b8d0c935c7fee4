use super::error::FormatError;
use crate::core::models::connectivity::{
    ConnectivityRecord, LOOSE_SEPARATOR, RECORD_FIELD_COUNT,
};

const INDEX_SLOT_WIDTH: usize = 3;
const FIELD_SEPARATOR: &str = "  ";

/// Renders one loose connectivity line into the fixed-width bond row layout.
///
/// The input holds seven fields separated by exactly two spaces, the two atom indices
/// written without padding (e.g. `"120  113  1  0  0  0  0"`). Each index is
/// right-justified into its own 3-character slot, with the second slot directly after
/// the first, and the remaining five fields are copied verbatim, each after a
/// two-space separator:
///
/// ```text
/// [0:3] atom_index_1 | [3:6] atom_index_2 | "  " bond_type | "  " stereo | "  " ... x3
/// ```
///
/// # Errors
///
/// Returns [`FormatError::FieldCount`] when the line does not split into exactly seven
/// fields, and [`FormatError::IndexWidth`] or [`FormatError::NonNumericIndex`] when an
/// index is not a 1-3 digit decimal string. Indices of 1000 and above cannot be rendered.
pub fn render_connectivity_line(line: &str) -> Result<String, FormatError> {
    let fields: Vec<&str> = line.split(LOOSE_SEPARATOR).collect();
    if fields.len() != RECORD_FIELD_COUNT {
        return Err(FormatError::FieldCount {
            found: fields.len(),
            line: line.to_string(),
        });
    }

    let mut rendered = String::with_capacity(line.len() + 2 * INDEX_SLOT_WIDTH);
    push_index_slot(&mut rendered, "atom_index_1", fields[0])?;
    push_index_slot(&mut rendered, "atom_index_2", fields[1])?;
    for field in &fields[2..] {
        rendered.push_str(FIELD_SEPARATOR);
        rendered.push_str(field);
    }
    Ok(rendered)
}

/// Renders a decoded record in fixed width.
pub fn render_record(record: &ConnectivityRecord) -> Result<String, FormatError> {
    render_connectivity_line(&record.to_delimited())
}

fn push_index_slot(out: &mut String, field: &'static str, digits: &str) -> Result<(), FormatError> {
    if digits.is_empty() || digits.len() > INDEX_SLOT_WIDTH {
        return Err(FormatError::IndexWidth {
            field,
            value: digits.to_string(),
        });
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormatError::NonNumericIndex {
            field,
            value: digits.to_string(),
        });
    }
    out.push_str(&format!("{:>width$}", digits, width = INDEX_SLOT_WIDTH));
    Ok(())
}
