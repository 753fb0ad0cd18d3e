//! Shared CLI presentation utilities.
//!
//! Keep this module format-only; anything that needs the catalog belongs
//! in a handler.

pub mod tables;

pub use tables::{format_optional, print_separator, truncate_string};
