//! Fixture parsing for JSON and YAML files.

use std::path::Path;

use super::{FixtureData, FixtureFormat, FixtureRecord};
use crate::error::{SeedingError, SeedingResult};

/// Parser for fixture files.
///
/// Accepts either a list of records or a single record object. YAML requires
/// the `yaml` feature.
#[derive(Debug, Default)]
pub struct FixtureParser;

impl FixtureParser {
	/// Creates a new fixture parser.
	pub fn new() -> Self {
		Self
	}

	/// Parses a fixture file, detecting the format from its extension.
	///
	/// # Errors
	///
	/// Returns an error if the extension is not recognized, the file cannot
	/// be read, or a record is malformed.
	pub fn parse_file(&self, path: &Path) -> SeedingResult<FixtureData> {
		let format = FixtureFormat::from_path(path).ok_or_else(|| {
			SeedingError::UnsupportedExtension(
				path.extension()
					.and_then(|e| e.to_str())
					.unwrap_or("(none)")
					.to_string(),
			)
		})?;

		let content = std::fs::read_to_string(path).map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				SeedingError::FileNotFound(path.display().to_string())
			} else {
				SeedingError::IoError(e)
			}
		})?;

		let mut data = self.parse_string(&content, format)?;
		data.source = Some(path.display().to_string());
		Ok(data)
	}

	/// Parses fixture data from a string.
	pub fn parse_string(&self, content: &str, format: FixtureFormat) -> SeedingResult<FixtureData> {
		let records = match format {
			FixtureFormat::Json => self.parse_json(content)?,
			FixtureFormat::Yaml => self.parse_yaml(content)?,
		};

		Ok(FixtureData::from_records(records, format))
	}

	fn parse_json(&self, content: &str) -> SeedingResult<Vec<FixtureRecord>> {
		let value: serde_json::Value = serde_json::from_str(content)?;

		match value {
			serde_json::Value::Array(items) => items
				.into_iter()
				.enumerate()
				.map(|(idx, item)| -> SeedingResult<FixtureRecord> {
					let record: FixtureRecord = serde_json::from_value(item).map_err(|e| {
						SeedingError::ParseError(format!("Invalid record at index {}: {}", idx, e))
					})?;
					self.validate_record(&record)?;
					Ok(record)
				})
				.collect(),
			serde_json::Value::Object(_) => {
				let record: FixtureRecord = serde_json::from_value(value)?;
				self.validate_record(&record)?;
				Ok(vec![record])
			}
			_ => Err(SeedingError::ParseError(
				"Expected array or object".to_string(),
			)),
		}
	}

	#[cfg(feature = "yaml")]
	fn parse_yaml(&self, content: &str) -> SeedingResult<Vec<FixtureRecord>> {
		let value: serde_yaml::Value = serde_yaml::from_str(content)?;

		match value {
			serde_yaml::Value::Sequence(items) => items
				.into_iter()
				.enumerate()
				.map(|(idx, item)| -> SeedingResult<FixtureRecord> {
					let record: FixtureRecord = serde_yaml::from_value(item).map_err(|e| {
						SeedingError::ParseError(format!("Invalid record at index {}: {}", idx, e))
					})?;
					self.validate_record(&record)?;
					Ok(record)
				})
				.collect(),
			serde_yaml::Value::Mapping(_) => {
				let record: FixtureRecord = serde_yaml::from_value(value)?;
				self.validate_record(&record)?;
				Ok(vec![record])
			}
			_ => Err(SeedingError::ParseError(
				"Expected sequence or mapping".to_string(),
			)),
		}
	}

	#[cfg(not(feature = "yaml"))]
	fn parse_yaml(&self, _content: &str) -> SeedingResult<Vec<FixtureRecord>> {
		Err(SeedingError::UnsupportedExtension(
			"YAML support requires the 'yaml' feature".to_string(),
		))
	}

	fn validate_record(&self, record: &FixtureRecord) -> SeedingResult<()> {
		if record.app_label().is_none_or(str::is_empty) {
			return Err(SeedingError::ValidationError {
				field: "model".to_string(),
				message: format!(
					"Model identifier '{}' must be in 'app.Model' format",
					record.model
				),
			});
		}

		if !record.fields.is_object() {
			return Err(SeedingError::ValidationError {
				field: "fields".to_string(),
				message: "Fields must be a JSON object".to_string(),
			});
		}

		Ok(())
	}
}
