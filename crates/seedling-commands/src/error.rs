//! Command error types

use seedling_apps::AppError;
use seedling_seeding::SeedingError;
use thiserror::Error;

use crate::settings::SourceError;

/// Errors that escape a management command.
#[derive(Debug, Error)]
pub enum CommandError {
	#[error("Unknown command: {0}")]
	NotFound(String),

	#[error("Invalid arguments: {0}")]
	InvalidArguments(String),

	#[error("Execution error: {0}")]
	ExecutionError(String),

	#[error(transparent)]
	App(#[from] AppError),

	#[error(transparent)]
	Seeding(#[from] SeedingError),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	#[error("Settings error: {0}")]
	Settings(#[from] SourceError),
}

pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_app_error_is_transparent() {
		let error: CommandError = AppError::NotFound("blog".to_string()).into();
		assert_eq!(error.to_string(), "No installed app with label 'blog'.");
	}

	#[rstest]
	fn test_seeding_error_is_transparent() {
		let error: CommandError = SeedingError::FixtureNotFound("menus".to_string()).into();
		assert_eq!(error.to_string(), "No fixture named 'menus' found.");
	}
}
