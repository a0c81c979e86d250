//! # Seedling Commands
//!
//! Django-style management commands for seedling projects.
//!
//! ## Commands
//!
//! - **create_initial_data**: installs the initial fixture, then runs every
//!   installed application's initial data producer
//! - **loaddata**: installs named fixtures
//!
//! ## Writing a `manage` binary
//!
//! ```rust,no_run
//! use seedling_commands::execute_from_command_line;
//! use seedling_seeding::ProducerRegistry;
//!
//! #[tokio::main]
//! async fn main() {
//!     if let Err(e) = execute_from_command_line(ProducerRegistry::from_inventory()).await {
//!         eprintln!("Error: {}", e);
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod base;
pub mod cli;
pub mod context;
pub mod create_initial_data;
pub mod error;
pub mod input;
pub mod loaddata;
pub mod output;
pub mod registry;
pub mod settings;

pub use base::{BaseCommand, CommandArgument, CommandOption};
pub use cli::{Cli, Commands, Project, execute_from_command_line, run_command};
pub use context::CommandContext;
pub use create_initial_data::{CreateInitialDataCommand, SeedReport, StepOutcome};
pub use error::{CommandError, CommandResult};
pub use input::{LineReader, ScriptedReader, StdinReader};
pub use loaddata::LoadDataManagementCommand;
pub use output::{OutputWrapper, Style};
pub use registry::CommandRegistry;
pub use settings::{SeedSettings, SourceError};
