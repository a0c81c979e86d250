//! Fixture loading into registered model loaders.

use std::path::Path;

use super::{FixtureData, FixtureParser, ModelRegistry};
use crate::error::{SeedingError, SeedingResult};

/// Options controlling how fixtures are loaded.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
	/// Only load records belonging to these applications. Empty loads all.
	pub app_labels: Vec<String>,

	/// Skip records whose model has no registered loader instead of failing.
	pub ignore_missing: bool,

	/// Output verbosity (0-3).
	pub verbosity: u8,
}

impl LoadOptions {
	/// Creates default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Restricts loading to one application.
	pub fn with_app(mut self, app_label: impl Into<String>) -> Self {
		self.app_labels.push(app_label.into());
		self
	}

	/// Sets whether models without a loader are skipped.
	pub fn with_ignore_missing(mut self, ignore: bool) -> Self {
		self.ignore_missing = ignore;
		self
	}

	/// Sets the verbosity.
	pub fn with_verbosity(mut self, verbosity: u8) -> Self {
		self.verbosity = verbosity;
		self
	}
}

/// Summary of a load operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadResult {
	/// Number of records written.
	pub records_loaded: usize,

	/// Number of fixture files processed.
	pub fixtures_loaded: usize,

	/// Models skipped because no loader was registered.
	pub skipped_models: Vec<String>,
}

impl LoadResult {
	/// Folds another result into this one.
	pub fn merge(&mut self, other: LoadResult) {
		self.records_loaded += other.records_loaded;
		self.fixtures_loaded += other.fixtures_loaded;
		for model in other.skipped_models {
			if !self.skipped_models.contains(&model) {
				self.skipped_models.push(model);
			}
		}
	}
}

/// Loads parsed fixtures through the [`ModelRegistry`].
#[derive(Debug, Default)]
pub struct FixtureLoader {
	parser: FixtureParser,
	registry: ModelRegistry,
	options: LoadOptions,
}

impl FixtureLoader {
	/// Creates a loader with default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a loader with the given options.
	pub fn with_options(options: LoadOptions) -> Self {
		Self {
			options,
			..Self::default()
		}
	}

	/// Returns the active options.
	pub fn options(&self) -> &LoadOptions {
		&self.options
	}

	/// Parses and loads a single fixture file.
	pub async fn load_file(&self, path: &Path) -> SeedingResult<LoadResult> {
		let data = self.parser.parse_file(path)?;
		self.load_data(data).await
	}

	/// Loads already-parsed fixture data.
	///
	/// Records are written in file order. Consecutive records of one model
	/// go to its loader as a single batch.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ModelNotFound`] for a model with no loader
	/// unless `ignore_missing` is set, or the first loader failure.
	pub async fn load_data(&self, mut data: FixtureData) -> SeedingResult<LoadResult> {
		data.retain_apps(&self.options.app_labels);

		let mut result = LoadResult {
			fixtures_loaded: 1,
			..LoadResult::default()
		};

		for (model, records) in data.model_runs() {
			if !self.registry.has_loader(model) {
				if self.options.ignore_missing {
					tracing::warn!(model, "no loader registered, skipping records");
					if !result.skipped_models.iter().any(|m| m == model) {
						result.skipped_models.push(model.to_string());
					}
					continue;
				}
				return Err(SeedingError::ModelNotFound(model.to_string()));
			}

			let count = self
				.registry
				.load_records(model, &records)
				.await
				.map_err(|e| match e {
					SeedingError::LoadError { .. } => e,
					other => SeedingError::LoadError {
						model: model.to_string(),
						message: other.to_string(),
					},
				})?;
			tracing::debug!(model, count, "loaded records");
			result.records_loaded += count;
		}

		tracing::info!(
			source = data.source.as_deref().unwrap_or("<inline>"),
			records = result.records_loaded,
			"fixture loaded"
		);
		Ok(result)
	}
}
