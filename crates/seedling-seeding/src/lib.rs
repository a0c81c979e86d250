//! Fixtures and initial data for seedling applications.
//!
//! This crate provides:
//!
//! - **Fixture System**: Django-compatible JSON/YAML fixture files, looked up
//!   by name and written through per-model [`ModelLoader`](fixtures::ModelLoader)s
//! - **`loaddata`**: The [`LoadDataCommand`](commands::LoadDataCommand) that
//!   installs named fixtures
//! - **Initial Data**: Per-application [`InitialDataProducer`]s, registered
//!   with [`register_initial_data!`] and discovered against the installed
//!   applications
//!
//! # Features
//!
//! JSON fixtures are always supported.
//!
//! - `yaml` - YAML fixture format support
//! - `full` - All features enabled
//!
//! # Quick Start
//!
//! Declare how an application creates its default data:
//!
//! ```ignore
//! use seedling_seeding::prelude::*;
//!
//! async fn initial_data() -> ProducerResult {
//!     let boxes = create_default_boxes().await?;
//!     Ok(serde_json::json!({ "boxes": boxes }))
//! }
//!
//! register_initial_data!("boxes" => initial_data);
//! ```
//!
//! Load a fixture by name:
//!
//! ```ignore
//! let command = LoadDataCommand::new(FixtureFinder::new().with_dir("fixtures"));
//! let result = command.install("sitetree_menus", 0).await?;
//! println!("Loaded {} records", result.records_loaded);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod commands;
pub mod error;
pub mod fixtures;
pub mod initial_data;
pub mod prelude;

#[doc(hidden)]
pub use inventory;

pub use error::{SeedingError, SeedingResult};
pub use fixtures::{FixtureData, FixtureFormat, FixtureLoader, FixtureParser, FixtureRecord};
pub use initial_data::{InitialDataProducer, ProducerError, ProducerRegistry, ProducerResult};
