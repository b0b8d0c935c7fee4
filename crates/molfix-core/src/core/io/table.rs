//! Tabular export of a decoded connectivity block.

use crate::core::models::connectivity::ConnectivityBlock;
use std::io::Write;

/// Writes the block as CSV with a header row, one record per row, in block order.
pub fn write_csv(block: &ConnectivityBlock, writer: impl Write) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in block {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes the block as a right-aligned, whitespace-separated text table.
pub fn write_text_table(block: &ConnectivityBlock, mut writer: impl Write) -> std::io::Result<()> {
    writeln!(
        writer,
        "{:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "bond", "atom1", "atom2", "type", "stereo", "xxx", "rrr", "ccc"
    )?;
    for (idx, record) in block.iter().enumerate() {
        let [a1, a2, bond_type, stereo, l1, l2, l3] = record.fields();
        writeln!(
            writer,
            "{:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6} {:>6}",
            idx + 1,
            a1,
            a2,
            bond_type,
            stereo,
            l1,
            l2,
            l3
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::connectivity::ConnectivityRecord;

    fn sample_block() -> ConnectivityBlock {
        ConnectivityBlock::new(vec![
            ConnectivityRecord::new(56, 103, 2, 0),
            ConnectivityRecord::new(1, 2, 1, 6),
        ])
    }

    #[test]
    fn csv_has_header_and_rows_in_order() {
        let mut out = Vec::new();
        write_csv(&sample_block(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "atom_index_1,atom_index_2,bond_type,bond_stereochemistry,legacy_1,legacy_2,legacy_3"
        );
        assert_eq!(lines[1], "56,103,2,0,0,0,0");
        assert_eq!(lines[2], "1,2,1,6,0,0,0");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn empty_block_writes_no_csv_rows() {
        let mut out = Vec::new();
        write_csv(&ConnectivityBlock::default(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn text_table_numbers_bonds_from_one() {
        let mut out = Vec::new();
        write_text_table(&sample_block(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<Vec<&str>> = text
            .lines()
            .map(|l| l.split_whitespace().collect())
            .collect();
        assert_eq!(rows[0][0], "bond");
        assert_eq!(rows[1], vec!["1", "56", "103", "2", "0", "0", "0", "0"]);
        assert_eq!(rows[2], vec!["2", "1", "2", "1", "6", "0", "0", "0"]);
    }
}
