use crate::core::models::connectivity::ConnectivityBlock;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for reading and writing the connectivity block of a file format.
///
/// Implementors handle format-specific decoding and rendering; the path-based methods
/// only open the file and delegate.
pub trait ConnectivityFile {
    /// The error type for I/O operations.
    type Error: Error + From<io::Error>;

    /// Reads the connectivity block from a buffered reader holding the whole file.
    ///
    /// # Arguments
    ///
    /// * `reader` - The buffered reader to read from.
    /// * `n_atoms` - Number of atom rows ahead of the block.
    ///
    /// # Errors
    ///
    /// Returns an error if decoding fails or I/O operations encounter issues.
    fn read_from(
        reader: &mut impl BufRead,
        n_atoms: usize,
    ) -> Result<ConnectivityBlock, Self::Error>;

    /// Writes the rendered rows of a block, one per line.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be rendered or writing fails.
    fn write_to(block: &ConnectivityBlock, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Reads the connectivity block from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or decoding fails.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
        n_atoms: usize,
    ) -> Result<ConnectivityBlock, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader, n_atoms)
    }

    /// Writes the rendered rows of a block to a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        block: &ConnectivityBlock,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(block, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
