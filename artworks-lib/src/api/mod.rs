//! Paged artwork service operations

pub mod query;
mod source;

pub use source::*;
