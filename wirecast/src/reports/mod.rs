//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod check;
mod output;

pub use check::CheckReport;
pub use output::{Report, TerminalOutput};
