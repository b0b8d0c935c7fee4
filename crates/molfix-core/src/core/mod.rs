//! # Core Module
//!
//! The building blocks of the connectivity codec.
//!
//! - **Value types** ([`models`]) - `ConnectivityRecord`, `ConnectivityBlock` and
//!   `CountsHeaderLine`, plain data with no behaviour beyond rendering helpers.
//! - **File I/O** ([`io`]) - the block reader with overflow repair, the counts line
//!   reader and writer, the fixed-width bond line writer, and CSV export.

pub mod io;
pub mod models;
