use crate::core::io::molfile::{
    MolfileError, PREAMBLE_HEADER_LINES, ParseError, decode_row, locate_block, read_counts_line,
    render_record, rewrite_counts_line,
};
use crate::core::models::connectivity::ConnectivityBlock;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

const COUNTS_LINE_INDEX: usize = PREAMBLE_HEADER_LINES - 1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairOptions {
    /// Atom count to use instead of the one declared on the counts line.
    pub atom_count: Option<usize>,
    /// Drop the line terminator after the final line of the output.
    pub strip_final_newline: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub declared_atom_count: Option<usize>,
    pub declared_bond_count: Option<usize>,
    pub atom_count: usize,
    pub bond_count: usize,
    /// Rows whose first token held two merged atom indices.
    pub overflow_repairs: usize,
    /// Rows whose fixed-width rendering differs from the input text.
    pub rewritten_rows: usize,
}

impl RepairReport {
    pub fn counts_changed(&self) -> bool {
        self.declared_atom_count != Some(self.atom_count)
            || self.declared_bond_count != Some(self.bond_count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub text: String,
    pub block: ConnectivityBlock,
    pub report: RepairReport,
}

/// Rewrites the full text of a MOL file.
///
/// The counts line gets the atom count in use and the number of decoded bond rows; every
/// bond row is decoded (splitting merged index pairs) and rendered again in fixed width.
/// All other lines, including blank lines inside the block and the terminator, are kept
/// verbatim. Line endings follow the source (`\r\n` if it uses them anywhere).
///
/// # Errors
///
/// Fails when the text has no counts line, when the atom count is neither given nor
/// readable from the counts line, or when the block cannot be decoded or re-rendered.
#[instrument(level = "debug", skip(source))]
pub fn run(source: &str, options: &RepairOptions) -> Result<RepairOutcome, MolfileError> {
    let lines: Vec<&str> = source.lines().collect();
    let counts_line = *lines
        .get(COUNTS_LINE_INDEX)
        .ok_or(ParseError::MissingCountsLine {
            available: lines.len(),
        })?;

    let declared = read_counts_line(counts_line);
    let atom_count = match (options.atom_count, &declared) {
        (Some(n), _) => n,
        (None, Ok(header)) => header.atom_count,
        (None, Err(e)) => return Err(e.clone().into()),
    };
    if let (Some(n), Ok(header)) = (options.atom_count, &declared) {
        if n != header.atom_count {
            debug!(
                declared = header.atom_count,
                used = n,
                "Overriding declared atom count"
            );
        }
    }

    let layout = locate_block(&lines, atom_count)?;
    let mut rendered: Vec<Cow<'_, str>> = lines.iter().map(|&l| Cow::Borrowed(l)).collect();
    let mut records = Vec::with_capacity(layout.rows.len());
    let mut overflow_repairs = 0;
    let mut rewritten_rows = 0;

    for &(line, text) in &layout.rows {
        let row = decode_row(line, text)?;
        let fixed = render_record(&row.record)?;
        if row.overflow_repaired {
            overflow_repairs += 1;
        }
        if fixed != text {
            rewritten_rows += 1;
            debug!(line, from = text, to = %fixed, "Re-rendered bond row");
        }
        rendered[line - 1] = Cow::Owned(fixed);
        records.push(row.record);
    }

    let bond_count = records.len();
    rendered[COUNTS_LINE_INDEX] = Cow::Owned(rewrite_counts_line(counts_line, atom_count, bond_count));

    let report = RepairReport {
        declared_atom_count: declared.as_ref().ok().map(|h| h.atom_count),
        declared_bond_count: declared.as_ref().ok().map(|h| h.bond_count),
        atom_count,
        bond_count,
        overflow_repairs,
        rewritten_rows,
    };
    if report.counts_changed() {
        warn!(
            declared_atoms = ?report.declared_atom_count,
            declared_bonds = ?report.declared_bond_count,
            atoms = atom_count,
            bonds = bond_count,
            "Counts line disagrees with file content"
        );
    }

    let newline = if source.contains("\r\n") { "\r\n" } else { "\n" };
    let mut text = rendered.join(newline);
    if source.ends_with('\n') && !options.strip_final_newline {
        text.push_str(newline);
    }

    info!(
        atoms = atom_count,
        bonds = bond_count,
        overflow_repairs, rewritten_rows, "Repaired connectivity block"
    );

    Ok(RepairOutcome {
        text,
        block: ConnectivityBlock::new(records),
        report,
    })
}

/// Reads `input`, repairs it and writes the result to `output` (which may be `input`).
pub fn run_on_path(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    options: &RepairOptions,
) -> Result<RepairReport, MolfileError> {
    let source = fs::read_to_string(input.as_ref())?;
    let outcome = run(&source, options)?;
    fs::write(output.as_ref(), outcome.text)?;
    Ok(outcome.report)
}
