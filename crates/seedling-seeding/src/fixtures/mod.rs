//! Fixture files: format, parsing, lookup and loading.

mod finder;
mod format;
mod loader;
mod parser;
mod registry;

pub use finder::FixtureFinder;
pub use format::{FixtureData, FixtureFormat, FixtureRecord};
pub use loader::{FixtureLoader, LoadOptions, LoadResult};
pub use parser::FixtureParser;
pub use registry::{ModelLoader, ModelRegistry, register_model_loader};
