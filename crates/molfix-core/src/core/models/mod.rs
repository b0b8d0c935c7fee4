//! Immutable value types for the connectivity codec.
//!
//! Every type here is constructed per call and never shared mutably; they carry no
//! chemistry semantics, only the integer fields the file format stores.

pub mod connectivity;
pub mod counts;
