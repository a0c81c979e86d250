//! Fixture management commands.

mod loaddata;

pub use loaddata::{FixtureInstaller, LoadDataArgs, LoadDataCommand, LoadDataOptions};
