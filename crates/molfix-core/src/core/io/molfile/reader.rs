use super::error::{MolfileError, ParseError, ReadError, UnsupportedOverflowError};
use super::line::render_record;
use crate::core::io::traits::ConnectivityFile;
use crate::core::models::connectivity::{
    ConnectivityBlock, ConnectivityRecord, RECORD_FIELD_COUNT,
};
use std::io::{BufRead, Write};
use tracing::{debug, instrument, trace};

/// Fixed lines ahead of the atom block: title, program line, comment, counts line.
pub const PREAMBLE_HEADER_LINES: usize = 4;

/// A first token above this value can only be two index fields written without a gap.
///
/// `1` followed by `100` is the smallest pair that collides this way.
pub const OVERFLOW_THRESHOLD: i64 = 1100;

const MERGED_INDEX_SPLIT: i64 = 1000;

/// Largest atom index a 3-character slot can hold.
const MAX_SLOT_INDEX: i64 = 999;

/// Positions of the connectivity rows and of the terminator inside a split source text.
///
/// Line numbers are 1-based. Blank lines are neither rows nor the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlockLayout<'a> {
    pub rows: Vec<(usize, &'a str)>,
    pub terminator: (usize, &'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DecodedRow {
    pub record: ConnectivityRecord,
    pub overflow_repaired: bool,
}

pub(crate) fn locate_block<'a>(
    lines: &[&'a str],
    n_atoms: usize,
) -> Result<BlockLayout<'a>, ParseError> {
    let skip = n_atoms.saturating_add(PREAMBLE_HEADER_LINES);
    if skip > lines.len() {
        return Err(ParseError::TruncatedPreamble {
            skip,
            available: lines.len(),
        });
    }

    let mut rows: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .skip(skip)
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(idx, text)| (idx + 1, *text))
        .collect();

    let terminator = rows
        .pop()
        .ok_or(ParseError::MissingTerminator { after_line: skip })?;

    Ok(BlockLayout { rows, terminator })
}

pub(crate) fn decode_row(line: usize, text: &str) -> Result<DecodedRow, ReadError> {
    let tokens = tokenize(line, text)?;
    let (fields, overflow_repaired) = disambiguate(line, tokens)?;
    reject_wide_indices(line, &fields)?;
    let record = into_record(line, &fields)?;
    Ok(DecodedRow {
        record,
        overflow_repaired,
    })
}

fn tokenize(line: usize, text: &str) -> Result<Vec<i64>, ParseError> {
    text.split_whitespace()
        .enumerate()
        .map(|(idx, token)| {
            token.parse::<i64>().map_err(|_| ParseError::InvalidInteger {
                line,
                field: idx + 1,
                value: token.to_string(),
            })
        })
        .collect()
}

fn disambiguate(
    line: usize,
    tokens: Vec<i64>,
) -> Result<(Vec<i64>, bool), UnsupportedOverflowError> {
    let merged = match tokens.first().copied() {
        Some(value) if value > OVERFLOW_THRESHOLD => value,
        _ => return Ok((tokens, false)),
    };

    let (atom_index_1, atom_index_2) = split_merged_indices(line, merged)?;
    debug!(
        line,
        merged, atom_index_1, atom_index_2, "Split merged atom index pair"
    );

    let mut fields = Vec::with_capacity(tokens.len() + 1);
    fields.push(atom_index_1);
    fields.push(atom_index_2);
    fields.extend_from_slice(&tokens[1..]);
    Ok((fields, true))
}

fn split_merged_indices(line: usize, merged: i64) -> Result<(i64, i64), UnsupportedOverflowError> {
    // 5 digits: 2 + 3, 6 digits: 3 + 3. The second index always owns the last three.
    let digits = merged.to_string().len();
    match digits {
        5 | 6 => Ok((merged / MERGED_INDEX_SPLIT, merged % MERGED_INDEX_SPLIT)),
        _ => Err(UnsupportedOverflowError {
            line,
            value: merged,
            digits,
        }),
    }
}

// Indices of 1000..=1100 are collisions too (`  1100` is atoms 1 and 100), but their
// split is ambiguous, so they are reported instead of being read as one index.
fn reject_wide_indices(line: usize, fields: &[i64]) -> Result<(), UnsupportedOverflowError> {
    match fields.iter().take(2).find(|&&value| value > MAX_SLOT_INDEX) {
        Some(&value) => Err(UnsupportedOverflowError {
            line,
            value,
            digits: value.to_string().len(),
        }),
        None => Ok(()),
    }
}

fn into_record(line: usize, fields: &[i64]) -> Result<ConnectivityRecord, ParseError> {
    if fields.len() > RECORD_FIELD_COUNT {
        let surplus = &fields[RECORD_FIELD_COUNT..];
        if surplus.iter().any(|&value| value != 0) {
            return Err(ParseError::TooManyFields {
                line,
                count: fields.len(),
            });
        }
        trace!(
            line,
            dropped = surplus.len(),
            "Dropping zero-valued surplus fields"
        );
    }

    let mut padded = [0i64; RECORD_FIELD_COUNT];
    for (slot, &value) in padded.iter_mut().zip(fields) {
        *slot = value;
    }

    Ok(ConnectivityRecord {
        atom_index_1: narrow(line, "atom_index_1", padded[0])?,
        atom_index_2: narrow(line, "atom_index_2", padded[1])?,
        bond_type: narrow(line, "bond_type", padded[2])?,
        bond_stereochemistry: narrow(line, "bond_stereochemistry", padded[3])?,
        legacy_1: narrow(line, "legacy_1", padded[4])?,
        legacy_2: narrow(line, "legacy_2", padded[5])?,
        legacy_3: narrow(line, "legacy_3", padded[6])?,
    })
}

fn narrow<T: TryFrom<i64>>(line: usize, field: &'static str, value: i64) -> Result<T, ParseError> {
    T::try_from(value).map_err(|_| ParseError::OutOfRange { line, field, value })
}

/// Extracts the connectivity block from the full text of a MOL file.
///
/// The first `n_atoms + 4` lines (the four header lines and the atom block) are skipped.
/// Every remaining non-blank line except the last is decoded as one whitespace-delimited
/// bond row; the last one is the terminator (usually `M  END`) and is discarded whatever
/// it contains. Missing trailing fields read as zero.
///
/// A first token above [`OVERFLOW_THRESHOLD`] is taken to be two index fields that ran
/// together, and is split when it has 5 or 6 digits. The following tokens then shift one
/// field to the right. An index that still does not fit 3 characters afterwards cannot
/// be told apart from a collision and is rejected.
///
/// # Errors
///
/// Returns [`ReadError::Parse`] when the preamble is longer than the text, when no
/// terminator line remains, or when a row holds a non-integer, an out-of-range value or
/// more than seven non-zero fields. Returns [`ReadError::UnsupportedOverflow`] for a
/// merged token of any other width and for any atom index of 1000 or more.
#[instrument(level = "debug", skip(source))]
pub fn read_connectivity(source: &str, n_atoms: usize) -> Result<ConnectivityBlock, ReadError> {
    let lines: Vec<&str> = source.lines().collect();
    let layout = locate_block(&lines, n_atoms)?;
    trace!(
        line = layout.terminator.0,
        terminator = layout.terminator.1,
        "Discarding terminator line"
    );

    let mut repaired = 0usize;
    let records = layout
        .rows
        .iter()
        .map(|&(line, text)| {
            let row = decode_row(line, text)?;
            if row.overflow_repaired {
                repaired += 1;
            }
            Ok(row.record)
        })
        .collect::<Result<Vec<_>, ReadError>>()?;

    debug!(bonds = records.len(), repaired, "Decoded connectivity block");
    Ok(ConnectivityBlock::new(records))
}

/// [`ConnectivityFile`] implementation for V2000 MOL text.
pub struct MolConnectivity;

impl ConnectivityFile for MolConnectivity {
    type Error = MolfileError;

    fn read_from(
        reader: &mut impl BufRead,
        n_atoms: usize,
    ) -> Result<ConnectivityBlock, Self::Error> {
        let mut source = String::new();
        reader.read_to_string(&mut source)?;
        Ok(read_connectivity(&source, n_atoms)?)
    }

    fn write_to(block: &ConnectivityBlock, writer: &mut impl Write) -> Result<(), Self::Error> {
        for record in block {
            writeln!(writer, "{}", render_record(record)?)?;
        }
        Ok(())
    }
}
