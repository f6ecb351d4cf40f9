//! Small reusable pieces of the terminal UI.

mod spinner;

pub use spinner::Spinner;
