//! Provides input/output functionality for MOL (V2000) connectivity data.
//!
//! The [`molfile`] module holds the codec itself: the connectivity block reader with
//! overflow repair, the counts line reader/writer and the fixed-width bond line writer.
//! [`traits`] offers a path-based interface over the reader, and [`table`] exports a
//! decoded block as tabular data.

pub mod molfile;
pub mod table;
pub mod traits;
