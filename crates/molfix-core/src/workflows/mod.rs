//! # Workflows Module
//!
//! Whole-file procedures assembled from the stateless codec in [`crate::core`].
//!
//! - [`repair`] - rewrite a MOL file with a counts line that matches its content and bond
//!   rows re-rendered in fixed width, recovering merged index pairs on the way.

pub mod repair;
