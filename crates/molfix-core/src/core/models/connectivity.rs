use serde::Serialize;
use std::fmt;
use std::ops::Index;
use std::slice;

/// Number of integer fields in one connectivity record.
pub const RECORD_FIELD_COUNT: usize = 7;

/// Separator used by the loose, two-space-delimited form of a record.
pub const LOOSE_SEPARATOR: &str = "  ";

/// One bond entry of the connectivity block.
///
/// The field layout mirrors a V2000 bond row: two 1-based atom indices, the bond type,
/// the stereo flag and three trailing legacy fields that are conventionally zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ConnectivityRecord {
    pub atom_index_1: u32,
    pub atom_index_2: u32,
    pub bond_type: i32,
    pub bond_stereochemistry: i32,
    pub legacy_1: i32,
    pub legacy_2: i32,
    pub legacy_3: i32,
}

impl ConnectivityRecord {
    /// Creates a record with the three legacy fields set to zero.
    pub fn new(
        atom_index_1: u32,
        atom_index_2: u32,
        bond_type: i32,
        bond_stereochemistry: i32,
    ) -> Self {
        Self {
            atom_index_1,
            atom_index_2,
            bond_type,
            bond_stereochemistry,
            legacy_1: 0,
            legacy_2: 0,
            legacy_3: 0,
        }
    }

    /// Returns all seven fields in file order.
    pub fn fields(&self) -> [i64; RECORD_FIELD_COUNT] {
        [
            i64::from(self.atom_index_1),
            i64::from(self.atom_index_2),
            i64::from(self.bond_type),
            i64::from(self.bond_stereochemistry),
            i64::from(self.legacy_1),
            i64::from(self.legacy_2),
            i64::from(self.legacy_3),
        ]
    }

    /// Renders the record in the loose intermediate form, every field separated by
    /// exactly two spaces and none of them padded (e.g. `"120  113  1  0  0  0  0"`).
    pub fn to_delimited(&self) -> String {
        self.fields()
            .iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join(LOOSE_SEPARATOR)
    }
}

impl fmt::Display for ConnectivityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} (type {}, stereo {})",
            self.atom_index_1, self.atom_index_2, self.bond_type, self.bond_stereochemistry
        )
    }
}

/// The ordered connectivity block of a single file.
///
/// Order is the order of the rows in the source file; bond numbering elsewhere in the
/// file depends on it, so the block never sorts or deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectivityBlock {
    records: Vec<ConnectivityRecord>,
}

impl ConnectivityBlock {
    pub fn new(records: Vec<ConnectivityRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ConnectivityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, ConnectivityRecord> {
        self.records.iter()
    }

    pub fn into_records(self) -> Vec<ConnectivityRecord> {
        self.records
    }
}

impl Index<usize> for ConnectivityBlock {
    type Output = ConnectivityRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl FromIterator<ConnectivityRecord> for ConnectivityBlock {
    fn from_iter<I: IntoIterator<Item = ConnectivityRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ConnectivityBlock {
    type Item = &'a ConnectivityRecord;
    type IntoIter = slice::Iter<'a, ConnectivityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for ConnectivityBlock {
    type Item = ConnectivityRecord;
    type IntoIter = std::vec::IntoIter<ConnectivityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
