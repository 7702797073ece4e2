//! CLI subcommand implementations.

pub mod check;
pub mod extract;
pub mod util;
