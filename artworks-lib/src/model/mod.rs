//! Typed models

mod artwork;
pub(crate) mod lenient;

pub use artwork::*;
