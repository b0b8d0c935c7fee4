//! # molfix Core Library
//!
//! A small, dependency-light codec for the parts of a legacy MDL MOL (V2000) file that
//! are most often damaged by hand edits and by writers that let atom indices outgrow
//! their fixed-width columns: the counts line and the connectivity (bond) block.
//!
//! ## Layout
//!
//! - **[`core`]: The Codec.** Immutable value types ([`core::models`]) and the pure
//!   reader/writer functions over them ([`core::io`]). Nothing here holds state between
//!   calls, so every function may be used from any number of threads at once.
//!
//! - **[`workflows`]: The Public API.** Whole-file procedures built from the codec, such
//!   as rewriting a MOL file with a corrected counts line and re-rendered bond rows.

pub mod core;
pub mod workflows;
