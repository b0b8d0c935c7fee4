/// Character offset at which the opaque remainder of a counts line starts.
pub const COUNTS_STATIC_OFFSET: usize = 6;

/// The counts line of a MOL file, split into the two leading count fields and the
/// untouched remainder.
///
/// `static_part` holds everything from character offset 6 onward (chiral flag, the
/// obsolete fields, the `V2000` tag, ...) exactly as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountsHeaderLine {
    pub atom_count: usize,
    pub bond_count: usize,
    pub static_part: String,
}

impl CountsHeaderLine {
    pub fn new(atom_count: usize, bond_count: usize, static_part: impl Into<String>) -> Self {
        Self {
            atom_count,
            bond_count,
            static_part: static_part.into(),
        }
    }

    /// Returns a copy with new counts and the same static part.
    pub fn with_counts(&self, atom_count: usize, bond_count: usize) -> Self {
        Self {
            atom_count,
            bond_count,
            static_part: self.static_part.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_counts_keeps_static_part() {
        let header = CountsHeaderLine::new(3, 2, "  0  0  0  0  0  0  0  0999 V2000");
        let updated = header.with_counts(12, 11);
        assert_eq!(updated.atom_count, 12);
        assert_eq!(updated.bond_count, 11);
        assert_eq!(updated.static_part, header.static_part);
    }
}
