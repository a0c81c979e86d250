//! # Seedling
//!
//! Django-style initial data seeding for Rust applications.
//!
//! A project lists its installed applications in `settings/base.toml`. Each
//! application may register an initial data producer, and the project ships
//! an initial fixture (`sitetree_menus` by default). Running
//!
//! ```text
//! manage create_initial_data [--app_label LABEL] [-v 0..3]
//! ```
//!
//! asks for confirmation, installs the fixture, then runs every producer,
//! reporting each step as `DONE` or `Kind: message` without stopping at the
//! first failure.
//!
//! ## Feature Flags
//!
//! JSON fixtures are always supported.
//!
//! - `yaml` - YAML fixtures
//! - `full` - All features enabled
//!
//! ## Registering a producer
//!
//! ```rust,ignore
//! use seedling::seeding::prelude::*;
//!
//! async fn initial_data() -> ProducerResult {
//!     let boxes = create_default_boxes().await?;
//!     Ok(serde_json::json!({ "boxes": boxes }))
//! }
//!
//! register_initial_data!("boxes" => initial_data);
//! ```

pub mod apps;
pub mod commands;
pub mod seeding;

pub use seedling_apps::{AppConfig, AppError, Apps};
pub use seedling_commands::{CommandError, CommandResult, execute_from_command_line};
pub use seedling_seeding::{
	InitialDataProducer, ProducerError, ProducerRegistry, ProducerResult, SeedingError,
	register_initial_data,
};
