//! loaddata command implementation.
//!
//! Resolves fixture names through a [`FixtureFinder`] and installs them via
//! the registered model loaders.

use async_trait::async_trait;

use crate::error::{SeedingError, SeedingResult};
use crate::fixtures::{FixtureFinder, FixtureLoader, LoadOptions, LoadResult};

/// Installs a named fixture.
///
/// `create_initial_data` depends on this seam rather than on
/// [`LoadDataCommand`] directly so that tests can substitute a fake.
#[async_trait]
pub trait FixtureInstaller: Send + Sync {
	/// Installs the fixture named `fixture` at the given verbosity.
	async fn install(&self, fixture: &str, verbosity: u8) -> SeedingResult<LoadResult>;
}

/// Arguments for the loaddata command.
#[derive(Debug, Clone, Default)]
pub struct LoadDataArgs {
	/// Fixture names or paths to load.
	pub fixture_labels: Vec<String>,
}

impl LoadDataArgs {
	/// Creates arguments for the given fixture labels.
	pub fn new<I, S>(labels: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			fixture_labels: labels.into_iter().map(Into::into).collect(),
		}
	}
}

/// Options for the loaddata command.
#[derive(Debug, Clone, Default)]
pub struct LoadDataOptions {
	/// Filter by app labels.
	pub app_labels: Vec<String>,

	/// Continue even if a model has no loader.
	pub ignore_missing: bool,

	/// Verbosity level.
	pub verbosity: u8,
}

impl LoadDataOptions {
	/// Creates new default options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets app labels filter.
	pub fn with_app_labels(mut self, labels: Vec<String>) -> Self {
		self.app_labels = labels;
		self
	}

	/// Sets ignore missing flag.
	pub fn with_ignore_missing(mut self, ignore: bool) -> Self {
		self.ignore_missing = ignore;
		self
	}

	/// Sets verbosity level.
	pub fn with_verbosity(mut self, level: u8) -> Self {
		self.verbosity = level;
		self
	}
}

/// The loaddata command.
///
/// Equivalent to Django's `manage.py loaddata`.
///
/// # Example
///
/// ```ignore
/// let command = LoadDataCommand::new(FixtureFinder::new().with_dir("fixtures"));
/// let result = command
///     .execute(LoadDataArgs::new(["sitetree_menus"]), LoadDataOptions::new())
///     .await?;
/// println!("{}", LoadDataCommand::summary(&result));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoadDataCommand {
	finder: FixtureFinder,
}

impl LoadDataCommand {
	/// Creates a loaddata command that resolves names with `finder`.
	pub fn new(finder: FixtureFinder) -> Self {
		Self { finder }
	}

	/// Returns the command name.
	pub fn name(&self) -> &str {
		"loaddata"
	}

	/// Returns the command description.
	pub fn description(&self) -> &str {
		"Installs the named fixture(s) in the database"
	}

	/// Returns the finder used to resolve fixture names.
	pub fn finder(&self) -> &FixtureFinder {
		&self.finder
	}

	/// Executes the loaddata command.
	///
	/// Every label is resolved before anything is loaded, so a misspelled
	/// fixture name leaves the datastore untouched.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ValidationError`] when no labels are given,
	/// [`SeedingError::FixtureNotFound`] for an unresolvable label, or the
	/// first load failure.
	pub async fn execute(
		&self,
		args: LoadDataArgs,
		options: LoadDataOptions,
	) -> SeedingResult<LoadResult> {
		if args.fixture_labels.is_empty() {
			return Err(SeedingError::ValidationError {
				field: "fixture_labels".to_string(),
				message: "At least one fixture must be specified".to_string(),
			});
		}

		let paths = args
			.fixture_labels
			.iter()
			.map(|label| self.finder.find(label))
			.collect::<SeedingResult<Vec<_>>>()?;

		let loader = FixtureLoader::with_options(LoadOptions {
			app_labels: options.app_labels,
			ignore_missing: options.ignore_missing,
			verbosity: options.verbosity,
		});

		let mut total = LoadResult::default();
		for path in &paths {
			total.merge(loader.load_file(path).await?);
		}

		Ok(total)
	}

	/// Formats the summary line printed after a load.
	pub fn summary(result: &LoadResult) -> String {
		let mut summary = format!(
			"Installed {} object(s) from {} fixture(s)",
			result.records_loaded, result.fixtures_loaded
		);
		if !result.skipped_models.is_empty() {
			summary.push_str(&format!(
				"\nSkipped models: {}",
				result.skipped_models.join(", ")
			));
		}
		summary
	}
}

#[async_trait]
impl FixtureInstaller for LoadDataCommand {
	async fn install(&self, fixture: &str, verbosity: u8) -> SeedingResult<LoadResult> {
		self.execute(
			LoadDataArgs::new([fixture]),
			LoadDataOptions::new().with_verbosity(verbosity),
		)
		.await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serial_test::serial;

	use crate::fixtures::{FixtureRecord, ModelLoader, ModelRegistry, register_model_loader};
	use serde_json::json;

	struct TestLoader {
		model_id: String,
	}

	#[async_trait]
	impl ModelLoader for TestLoader {
		fn model_id(&self) -> &str {
			&self.model_id
		}

		async fn load_record(&self, record: &FixtureRecord) -> SeedingResult<serde_json::Value> {
			Ok(record.pk.clone().unwrap_or(json!(1)))
		}
	}

	#[rstest]
	fn test_command_metadata() {
		let cmd = LoadDataCommand::default();
		assert_eq!(cmd.name(), "loaddata");
		assert!(!cmd.description().is_empty());
	}

	#[rstest]
	fn test_options_builder() {
		let options = LoadDataOptions::new()
			.with_app_labels(vec!["sitetree".to_string()])
			.with_ignore_missing(true)
			.with_verbosity(2);

		assert_eq!(options.app_labels, vec!["sitetree".to_string()]);
		assert!(options.ignore_missing);
		assert_eq!(options.verbosity, 2);
	}

	#[rstest]
	fn test_summary() {
		let result = LoadResult {
			records_loaded: 5,
			fixtures_loaded: 1,
			skipped_models: vec!["boxes.Box".to_string()],
		};
		assert_eq!(
			LoadDataCommand::summary(&result),
			"Installed 5 object(s) from 1 fixture(s)\nSkipped models: boxes.Box"
		);
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_without_labels() {
		let cmd = LoadDataCommand::default();
		let result = cmd
			.execute(LoadDataArgs::default(), LoadDataOptions::new())
			.await;
		assert!(matches!(result, Err(SeedingError::ValidationError { .. })));
	}

	#[rstest]
	#[tokio::test]
	async fn test_execute_unknown_fixture() {
		let dir = tempfile::tempdir().unwrap();
		let cmd = LoadDataCommand::new(FixtureFinder::new().with_dir(dir.path()));

		let result = cmd.install("sitetree_menus", 0).await;
		assert!(matches!(result, Err(SeedingError::FixtureNotFound(_))));
	}

	#[rstest]
	#[serial(model_registry)]
	#[tokio::test]
	async fn test_install_named_fixture() {
		let registry = ModelRegistry::new();
		registry.clear();
		register_model_loader(TestLoader {
			model_id: "sitetree.Tree".to_string(),
		});

		let dir = tempfile::tempdir().unwrap();
		std::fs::write(
			dir.path().join("sitetree_menus.json"),
			r#"[{"model": "sitetree.Tree", "pk": 1, "fields": {"alias": "main"}}]"#,
		)
		.unwrap();

		let cmd = LoadDataCommand::new(FixtureFinder::new().with_dir(dir.path()));
		let result = cmd.install("sitetree_menus", 0).await.unwrap();
		assert_eq!(result.records_loaded, 1);
		assert_eq!(result.fixtures_loaded, 1);
	}
}
