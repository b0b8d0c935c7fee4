use std::io;
use thiserror::Error;

/// Malformed input to the block or counts readers.
///
/// Line numbers are 1-based positions in the source text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Preamble of {skip} lines exceeds the {available} lines available")]
    TruncatedPreamble { skip: usize, available: usize },
    #[error("No terminator line follows the connectivity block (after line {after_line})")]
    MissingTerminator { after_line: usize },
    #[error("Invalid integer in field {field} on line {line} (value: '{value}')")]
    InvalidInteger {
        line: usize,
        field: usize,
        value: String,
    },
    #[error("Value {value} on line {line} does not fit field '{field}'")]
    OutOfRange {
        line: usize,
        field: &'static str,
        value: i64,
    },
    #[error("Line {line} carries {count} fields, at most 7 are allowed")]
    TooManyFields { line: usize, count: usize },
    #[error("Counts line is missing (the text has only {available} lines)")]
    MissingCountsLine { available: usize },
    #[error("Invalid {field} in counts line columns {columns} (value: '{value}')")]
    InvalidCount {
        field: &'static str,
        columns: &'static str,
        value: String,
    },
}

/// A merged index token the reader recognises as an overflow collision but cannot split.
///
/// Only 5- and 6-digit merges have a single unambiguous reading.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "Unsupported overflow collision on line {line}: merged value {value} has {digits} digits (only 5- and 6-digit merges can be split)"
)]
pub struct UnsupportedOverflowError {
    pub line: usize,
    pub value: i64,
    pub digits: usize,
}

/// Caller-supplied loose connectivity line that cannot be rendered.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("Expected 7 fields separated by two spaces, found {found} in '{line}'")]
    FieldCount { found: usize, line: String },
    #[error("{field} '{value}' must be 1 to 3 digits wide")]
    IndexWidth { field: &'static str, value: String },
    #[error("{field} '{value}' is not a decimal digit string")]
    NonNumericIndex { field: &'static str, value: String },
}

/// Failure of the connectivity block reader.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReadError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    UnsupportedOverflow(#[from] UnsupportedOverflowError),
}

/// Umbrella error for file-level operations built on the codec.
#[derive(Debug, Error)]
pub enum MolfileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    UnsupportedOverflow(#[from] UnsupportedOverflowError),
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<ReadError> for MolfileError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::Parse(e) => Self::Parse(e),
            ReadError::UnsupportedOverflow(e) => Self::UnsupportedOverflow(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_error_converts_into_matching_molfile_variant() {
        let parse: MolfileError = ReadError::Parse(ParseError::MissingTerminator {
            after_line: 4,
        })
        .into();
        assert!(matches!(
            parse,
            MolfileError::Parse(ParseError::MissingTerminator { after_line: 4 })
        ));

        let overflow: MolfileError = ReadError::UnsupportedOverflow(UnsupportedOverflowError {
            line: 9,
            value: 5103,
            digits: 4,
        })
        .into();
        assert!(matches!(
            overflow,
            MolfileError::UnsupportedOverflow(UnsupportedOverflowError { line: 9, .. })
        ));
    }

    #[test]
    fn messages_name_the_offending_value() {
        let err = ParseError::InvalidInteger {
            line: 12,
            field: 3,
            value: "x".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid integer in field 3 on line 12 (value: 'x')"
        );

        let err = FormatError::IndexWidth {
            field: "atom_index_1",
            value: "1024".into(),
        };
        assert_eq!(err.to_string(), "atom_index_1 '1024' must be 1 to 3 digits wide");
    }
}
