//! Error types for fixture loading.

use thiserror::Error;

/// Errors that can occur while locating, parsing or loading fixtures.
#[derive(Debug, Error)]
pub enum SeedingError {
	/// No loader is registered for the model.
	#[error("Model not found: {0}")]
	ModelNotFound(String),

	/// Error parsing fixture data.
	#[error("Parse error: {0}")]
	ParseError(String),

	/// A registered loader rejected a record.
	#[error("Could not load {model}: {message}")]
	LoadError {
		/// Model identifier of the rejected record.
		model: String,
		/// Loader error message.
		message: String,
	},

	/// I/O operation failed.
	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),

	/// Validation failed for a specific field.
	#[error("Validation error: {field}: {message}")]
	ValidationError {
		/// Field that failed validation.
		field: String,
		/// Validation error message.
		message: String,
	},

	/// JSON deserialization error.
	#[error("JSON error: {0}")]
	JsonError(#[from] serde_json::Error),

	/// YAML deserialization error (when yaml feature is enabled).
	#[cfg(feature = "yaml")]
	#[error("YAML error: {0}")]
	YamlError(#[from] serde_yaml::Error),

	/// Fixture file not found.
	#[error("Fixture file not found: {0}")]
	FileNotFound(String),

	/// No fixture with the given name in any fixture directory.
	#[error("No fixture named '{0}' found.")]
	FixtureNotFound(String),

	/// Unsupported file extension.
	#[error("Unsupported file extension: {0}")]
	UnsupportedExtension(String),
}

impl SeedingError {
	/// Short name of the error kind, used in operator-facing status lines.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::ModelNotFound(_) => "ModelNotFound",
			Self::ParseError(_) => "ParseError",
			Self::LoadError { .. } => "LoadError",
			Self::IoError(_) => "IoError",
			Self::ValidationError { .. } => "ValidationError",
			Self::JsonError(_) => "JsonError",
			#[cfg(feature = "yaml")]
			Self::YamlError(_) => "YamlError",
			Self::FileNotFound(_) => "FileNotFound",
			Self::FixtureNotFound(_) => "FixtureNotFound",
			Self::UnsupportedExtension(_) => "UnsupportedExtension",
		}
	}
}

/// Result type alias for seeding operations.
pub type SeedingResult<T> = Result<T, SeedingError>;
