//! Codec for the counts line and the connectivity block of a V2000 MOL file.
//!
//! The three responsibilities are independent leaf functions:
//!
//! - [`read_connectivity`] extracts and decodes the block, repairing merged index pairs.
//! - [`rewrite_counts_line`] re-renders the atom and bond counts of a counts line.
//! - [`render_connectivity_line`] renders one loose, two-space-delimited record in fixed
//!   width.

mod counts;
mod error;
mod line;
mod reader;

pub use counts::{
    read_counts_header, read_counts_line, render_counts_header, rewrite_counts_line,
};
pub use error::{FormatError, MolfileError, ParseError, ReadError, UnsupportedOverflowError};
pub use line::{render_connectivity_line, render_record};
pub use reader::{MolConnectivity, OVERFLOW_THRESHOLD, PREAMBLE_HEADER_LINES, read_connectivity};

pub(crate) use reader::{decode_row, locate_block};
