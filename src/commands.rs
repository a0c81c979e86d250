//! Management commands and the `manage` CLI runner.

pub use seedling_commands::*;
