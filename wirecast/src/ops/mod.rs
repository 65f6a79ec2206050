//! Core operations.
//!
//! This module contains the business logic for wirecast commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod parse;

pub use check::check;
pub use parse::{ParseOptions, parse};
