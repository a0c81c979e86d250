//! Convenience re-exports for common usage.
//!
//! ```ignore
//! use seedling_seeding::prelude::*;
//! ```

// Error types
pub use crate::error::{SeedingError, SeedingResult};

// Fixture types
pub use crate::fixtures::{
	FixtureData, FixtureFinder, FixtureFormat, FixtureLoader, FixtureParser, FixtureRecord,
	LoadOptions, LoadResult, ModelLoader, ModelRegistry, register_model_loader,
};

// Initial data
pub use crate::initial_data::{
	InitialDataProducer, ProducerError, ProducerMap, ProducerRegistry, ProducerResult,
	discover_producers, producer_fn,
};
pub use crate::register_initial_data;

// Command types
pub use crate::commands::{FixtureInstaller, LoadDataArgs, LoadDataCommand, LoadDataOptions};
