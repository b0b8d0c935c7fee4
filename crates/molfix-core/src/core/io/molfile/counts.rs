use super::error::ParseError;
use super::reader::PREAMBLE_HEADER_LINES;
use crate::core::models::counts::{COUNTS_STATIC_OFFSET, CountsHeaderLine};

const COUNT_SLOT_WIDTH: usize = 3;

/// Returns the part of `line` from character offset `offset` onward, or `""` when the
/// line is shorter.
fn tail_from_char(line: &str, offset: usize) -> &str {
    line.char_indices()
        .nth(offset)
        .map_or("", |(byte_idx, _)| &line[byte_idx..])
}

fn char_slice(line: &str, start: usize, end: usize) -> String {
    line.chars().skip(start).take(end - start).collect()
}

/// Rewrites the atom and bond counts of a counts line.
///
/// Each count is right-justified into 3 characters; counts of 1000 and above are
/// written in full with no padding and push the rest of the line to the right. The
/// remainder of `old_line`, from character offset 6 onward, is appended unchanged.
pub fn rewrite_counts_line(old_line: &str, n_atoms: usize, n_bonds: usize) -> String {
    format!(
        "{:>width$}{:>width$}{}",
        n_atoms,
        n_bonds,
        tail_from_char(old_line, COUNTS_STATIC_OFFSET),
        width = COUNT_SLOT_WIDTH
    )
}

/// Renders a [`CountsHeaderLine`] back into its textual form.
pub fn render_counts_header(header: &CountsHeaderLine) -> String {
    format!(
        "{:>width$}{:>width$}{}",
        header.atom_count,
        header.bond_count,
        header.static_part,
        width = COUNT_SLOT_WIDTH
    )
}

/// Reads the declared counts from columns `[0:3]` and `[3:6]` of a counts line.
///
/// Counts written past their 3-character slot (1000 and above) cannot be read back from
/// fixed columns; callers that know the atom count should pass it explicitly instead.
pub fn read_counts_line(line: &str) -> Result<CountsHeaderLine, ParseError> {
    let parse_slot = |field: &'static str, columns: &'static str, start: usize| {
        let raw = char_slice(line, start, start + COUNT_SLOT_WIDTH);
        raw.trim()
            .parse::<usize>()
            .map_err(|_| ParseError::InvalidCount {
                field,
                columns,
                value: raw.clone(),
            })
    };

    let atom_count = parse_slot("atom count", "1-3", 0)?;
    let bond_count = parse_slot("bond count", "4-6", COUNT_SLOT_WIDTH)?;

    Ok(CountsHeaderLine::new(
        atom_count,
        bond_count,
        tail_from_char(line, COUNTS_STATIC_OFFSET),
    ))
}

/// Locates the counts line (the fourth line) of a MOL text and reads it.
pub fn read_counts_header(source: &str) -> Result<CountsHeaderLine, ParseError> {
    let mut lines = source.lines();
    let counts_line = lines
        .nth(PREAMBLE_HEADER_LINES - 1)
        .ok_or(ParseError::MissingCountsLine {
            available: source.lines().count(),
        })?;
    read_counts_line(counts_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATIC: &str = "  0  0  0  0  0  0  0  0999 V2000";

    fn counts_line(atoms: &str, bonds: &str) -> String {
        format!("{}{}{}", atoms, bonds, STATIC)
    }

    #[test]
    fn padding_follows_digit_count_of_each_value() {
        let old = counts_line("  3", "  2");
        let cases = [
            (1, 1, "  1  1"),
            (12, 1, " 12  1"),
            (123, 12, "123 12"),
            (1234, 123, "1234123"),
            (1, 123, "  1123"),
            (12, 12, " 12 12"),
        ];
        for (atoms, bonds, prefix) in cases {
            let line = rewrite_counts_line(&old, atoms, bonds);
            assert_eq!(line, format!("{}{}", prefix, STATIC));
        }
    }

    #[test]
    fn static_part_is_byte_identical_for_every_combination() {
        let old = counts_line(" 15", " 14");
        for atoms in [1, 12, 123, 1234] {
            for bonds in [1, 12, 123] {
                let line = rewrite_counts_line(&old, atoms, bonds);
                let prefix_len = atoms.to_string().len().max(3) + bonds.to_string().len().max(3);
                assert_eq!(&line[prefix_len..], &old[6..]);
                assert_eq!(&line[..prefix_len], format!("{:>3}{:>3}", atoms, bonds));
            }
        }
    }

    #[test]
    fn short_old_line_has_empty_static_part() {
        assert_eq!(rewrite_counts_line("15", 15, 0), " 15  0");
        assert_eq!(rewrite_counts_line("", 1, 2), "  1  2");
    }

    #[test]
    fn static_part_is_measured_in_characters() {
        assert_eq!(rewrite_counts_line("ÄÄÄÄÄÄ tail", 1, 1), "  1  1 tail");
    }

    #[test]
    fn reads_counts_and_static_part() {
        let header = read_counts_line(&counts_line(" 24", " 25")).unwrap();
        assert_eq!(header.atom_count, 24);
        assert_eq!(header.bond_count, 25);
        assert_eq!(header.static_part, STATIC);
        assert_eq!(render_counts_header(&header), counts_line(" 24", " 25"));
    }

    #[test]
    fn reads_adjacent_three_digit_counts() {
        let header = read_counts_line("100105  0  0  0  0  0  0  0  0999 V2000").unwrap();
        assert_eq!((header.atom_count, header.bond_count), (100, 105));
    }

    #[test]
    fn invalid_count_reports_columns() {
        let err = read_counts_line("  a  2  0").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidCount {
                field: "atom count",
                columns: "1-3",
                value: "  a".into(),
            }
        );
        assert!(matches!(
            read_counts_line("  1"),
            Err(ParseError::InvalidCount {
                field: "bond count",
                ..
            })
        ));
    }

    #[test]
    fn rendering_a_header_with_new_counts_equals_rewriting_the_line() {
        let old = counts_line("  9", "  8");
        let header = read_counts_line(&old).unwrap().with_counts(101, 99);
        assert_eq!(render_counts_header(&header), rewrite_counts_line(&old, 101, 99));
    }

    #[test]
    fn counts_header_is_found_on_the_fourth_line() {
        let text = format!("name\n  prog\n\n{}\nM  END\n", counts_line("  0", "  0"));
        let header = read_counts_header(&text).unwrap();
        assert_eq!((header.atom_count, header.bond_count), (0, 0));

        assert_eq!(
            read_counts_header("name\n\n").unwrap_err(),
            ParseError::MissingCountsLine { available: 2 }
        );
    }
}
