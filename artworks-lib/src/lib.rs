//! Artwork browser library
//!
//! A client for a paged artwork service plus the state container that backs
//! a lazily paginated, filterable, multi-select artwork table.

pub mod api;
pub mod browser;
pub mod error;
pub mod model;

mod client;

pub use client::*;
