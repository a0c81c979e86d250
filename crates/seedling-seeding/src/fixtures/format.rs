//! Fixture format definitions.
//!
//! Records follow the Django fixture layout so existing fixture files can be
//! reused unchanged.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Django-compatible fixture record.
///
/// # Example
///
/// ```json
/// {
///   "model": "sitetree.Tree",
///   "pk": 1,
///   "fields": {
///     "alias": "main_menu",
///     "title": "Main menu"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FixtureRecord {
	/// Model identifier in format "app.Model" (e.g., "sitetree.Tree").
	pub model: String,

	/// Primary key value. Optional for auto-increment fields.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pk: Option<Value>,

	/// Field values as a JSON object.
	pub fields: Value,
}

impl FixtureRecord {
	/// Creates a new fixture record.
	pub fn new(model: impl Into<String>, fields: Value) -> Self {
		Self {
			model: model.into(),
			pk: None,
			fields,
		}
	}

	/// Creates a new fixture record with a primary key.
	pub fn with_pk(model: impl Into<String>, pk: Value, fields: Value) -> Self {
		Self {
			model: model.into(),
			pk: Some(pk),
			fields,
		}
	}

	/// Returns the app label portion of the model identifier.
	///
	/// ```
	/// # use seedling_seeding::fixtures::FixtureRecord;
	/// # use serde_json::json;
	/// let record = FixtureRecord::new("sitetree.TreeItem", json!({}));
	/// assert_eq!(record.app_label(), Some("sitetree"));
	/// ```
	pub fn app_label(&self) -> Option<&str> {
		self.model.split_once('.').map(|(app, _)| app)
	}

	/// Returns the model name portion of the model identifier.
	pub fn model_name(&self) -> Option<&str> {
		self.model.split_once('.').map(|(_, model)| model)
	}
}

/// Supported fixture file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FixtureFormat {
	/// JSON format (default).
	#[default]
	Json,

	/// YAML format (requires `yaml` feature).
	Yaml,
}

impl FixtureFormat {
	/// Extensions tried, in order, when a fixture is looked up by name.
	pub const SEARCH_EXTENSIONS: [&'static str; 3] = ["json", "yaml", "yml"];

	/// Determines the fixture format from a file extension.
	///
	/// ```
	/// # use seedling_seeding::fixtures::FixtureFormat;
	/// assert_eq!(FixtureFormat::from_extension("json"), Some(FixtureFormat::Json));
	/// assert_eq!(FixtureFormat::from_extension("yml"), Some(FixtureFormat::Yaml));
	/// assert_eq!(FixtureFormat::from_extension("xml"), None);
	/// ```
	pub fn from_extension(ext: &str) -> Option<Self> {
		match ext.to_lowercase().as_str() {
			"json" => Some(Self::Json),
			"yaml" | "yml" => Some(Self::Yaml),
			_ => None,
		}
	}

	/// Determines the fixture format from a file path.
	pub fn from_path(path: &Path) -> Option<Self> {
		path.extension()
			.and_then(|ext| ext.to_str())
			.and_then(Self::from_extension)
	}
}

/// Parsed fixture data containing multiple records.
#[derive(Debug, Clone)]
pub struct FixtureData {
	/// Collection of fixture records, in file order.
	pub records: Vec<FixtureRecord>,

	/// Format the data was parsed from.
	pub format: FixtureFormat,

	/// Optional source file path.
	pub source: Option<String>,
}

impl FixtureData {
	/// Creates fixture data from a vector of records.
	pub fn from_records(records: Vec<FixtureRecord>, format: FixtureFormat) -> Self {
		Self {
			records,
			format,
			source: None,
		}
	}

	/// Returns the number of records.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Returns true if there are no records.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Splits the records into runs of consecutive records of one model.
	///
	/// Concatenating the runs gives back the records in file order.
	pub fn model_runs(&self) -> Vec<(&str, Vec<&FixtureRecord>)> {
		let mut runs: Vec<(&str, Vec<&FixtureRecord>)> = Vec::new();
		for record in &self.records {
			match runs.last_mut() {
				Some((model, run)) if *model == record.model => run.push(record),
				_ => runs.push((record.model.as_str(), vec![record])),
			}
		}
		runs
	}

	/// Keeps only records whose app label is in `app_labels`.
	///
	/// An empty filter keeps everything.
	pub fn retain_apps(&mut self, app_labels: &[String]) {
		if app_labels.is_empty() {
			return;
		}
		self.records.retain(|record| {
			record
				.app_label()
				.map(|app| app_labels.iter().any(|label| label == app))
				.unwrap_or(false)
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_fixture_record_parts() {
		let record = FixtureRecord::with_pk("sitetree.TreeItem", json!(3), json!({}));
		assert_eq!(record.app_label(), Some("sitetree"));
		assert_eq!(record.model_name(), Some("TreeItem"));
		assert_eq!(record.pk, Some(json!(3)));

		let malformed = FixtureRecord::new("Tree", json!({}));
		assert_eq!(malformed.app_label(), None);
	}

	#[rstest]
	#[case("json", Some(FixtureFormat::Json))]
	#[case("JSON", Some(FixtureFormat::Json))]
	#[case("yaml", Some(FixtureFormat::Yaml))]
	#[case("yml", Some(FixtureFormat::Yaml))]
	#[case("xml", None)]
	fn test_fixture_format_from_extension(
		#[case] ext: &str,
		#[case] expected: Option<FixtureFormat>,
	) {
		assert_eq!(FixtureFormat::from_extension(ext), expected);
	}

	#[rstest]
	fn test_fixture_format_from_path() {
		assert_eq!(
			FixtureFormat::from_path(Path::new("fixtures/sitetree_menus.json")),
			Some(FixtureFormat::Json)
		);
		assert_eq!(FixtureFormat::from_path(Path::new("sitetree_menus")), None);
	}

	#[rstest]
	fn test_model_runs_keep_file_order() {
		let data = FixtureData::from_records(
			vec![
				FixtureRecord::new("sitetree.Tree", json!({"id": 1})),
				FixtureRecord::new("sitetree.TreeItem", json!({"id": 1})),
				FixtureRecord::new("sitetree.Tree", json!({"id": 2})),
			],
			FixtureFormat::Json,
		);

		let runs = data.model_runs();
		let models: Vec<_> = runs.iter().map(|(model, run)| (*model, run.len())).collect();
		assert_eq!(
			models,
			vec![
				("sitetree.Tree", 1),
				("sitetree.TreeItem", 1),
				("sitetree.Tree", 1)
			]
		);
		assert_eq!(runs[2].1[0].fields, json!({"id": 2}));
	}

	#[rstest]
	fn test_retain_apps() {
		let mut data = FixtureData::from_records(
			vec![
				FixtureRecord::new("sitetree.Tree", json!({})),
				FixtureRecord::new("boxes.Box", json!({})),
				FixtureRecord::new("sitetree.TreeItem", json!({})),
			],
			FixtureFormat::Json,
		);

		data.retain_apps(&[]);
		assert_eq!(data.len(), 3);

		data.retain_apps(&["sitetree".to_string()]);
		assert_eq!(data.len(), 2);
		assert!(data.records.iter().all(|r| r.app_label() == Some("sitetree")));
	}
}
