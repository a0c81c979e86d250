//! # Application Registry
//!
//! Django-inspired application configuration and registry.
//!
//! Applications are enumerated in the order they were installed, which is the
//! order every management command walks them in.

use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

/// Errors that can occur when working with the application registry
#[derive(Debug, Error)]
pub enum AppError {
	/// Lookup of an application label that the registry does not know.
	#[error("No installed app with label '{0}'.")]
	NotFound(String),

	#[error("Invalid application label: {0}")]
	InvalidLabel(String),

	#[error("Duplicate application label: {0}")]
	DuplicateLabel(String),

	#[error("Duplicate application name: {0}")]
	DuplicateName(String),

	#[error("Application configuration error: {0}")]
	ConfigError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Configuration for a single application
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
	/// Full dotted name of the application (e.g., "cms.boxes")
	pub name: String,

	/// Short label for the application (e.g., "boxes")
	pub label: String,

	/// Filesystem path to the application, relative to the project root
	pub path: Option<String>,
}

impl AppConfig {
	/// Create a new AppConfig with required fields
	pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			label: label.into(),
			path: None,
		}
	}

	/// Create an AppConfig whose label is the last segment of the dotted name.
	///
	/// # Examples
	///
	/// ```rust
	/// use seedling_apps::AppConfig;
	///
	/// let config = AppConfig::from_name("cms.boxes");
	/// assert_eq!(config.label, "boxes");
	/// ```
	pub fn from_name(name: impl Into<String>) -> Self {
		let name = name.into();
		let label = name.rsplit('.').next().unwrap_or(&name).to_string();
		Self::new(name, label)
	}

	/// Set the path for the application.
	///
	/// The path must be relative and must not contain `..` components,
	/// null bytes or control characters, since it is later joined onto the
	/// project root to locate fixture directories.
	///
	/// # Errors
	///
	/// Returns [`AppError::ConfigError`] if the path contains disallowed
	/// sequences.
	pub fn with_path(mut self, path: impl Into<String>) -> AppResult<Self> {
		let path = path.into();
		Self::validate_path(&path)?;
		self.path = Some(path);
		Ok(self)
	}

	fn validate_path(path: &str) -> AppResult<()> {
		if path.is_empty() {
			return Err(AppError::ConfigError(
				"application path cannot be empty".to_string(),
			));
		}

		if path.contains('\0') {
			return Err(AppError::ConfigError(
				"application path must not contain null bytes".to_string(),
			));
		}

		if path.chars().any(|c| c.is_control()) {
			return Err(AppError::ConfigError(
				"application path must not contain control characters".to_string(),
			));
		}

		if path.starts_with('/') || path.starts_with('\\') {
			return Err(AppError::ConfigError(
				"application path must be relative, not absolute".to_string(),
			));
		}

		// Windows drive letters (C:\, D:/)
		if path.len() >= 2 && path.as_bytes()[0].is_ascii_alphabetic() && path.as_bytes()[1] == b':'
		{
			return Err(AppError::ConfigError(
				"application path must be relative, not absolute".to_string(),
			));
		}

		if path.split(['/', '\\']).any(|component| component == "..") {
			return Err(AppError::ConfigError(
				"application path must not contain path traversal sequences".to_string(),
			));
		}

		Ok(())
	}

	/// Validate the application label
	pub fn validate_label(&self) -> AppResult<()> {
		if self.label.is_empty() {
			return Err(AppError::InvalidLabel("Label cannot be empty".to_string()));
		}

		if !self
			.label
			.chars()
			.next()
			.map(|c| c.is_alphabetic() || c == '_')
			.unwrap_or(false)
		{
			return Err(AppError::InvalidLabel(format!(
				"Label '{}' must start with a letter or underscore",
				self.label
			)));
		}

		if !self.label.chars().all(|c| c.is_alphanumeric() || c == '_') {
			return Err(AppError::InvalidLabel(format!(
				"Label '{}' must contain only alphanumeric characters and underscores",
				self.label
			)));
		}

		Ok(())
	}
}

/// Trait for providing fixture directories
///
/// `loaddata` searches every installed application's fixture directory when
/// resolving a fixture by name.
pub trait FixturesProvider {
	/// Get the fixtures directory for this app
	///
	/// Returns None if the app does not ship fixtures
	fn fixtures_dir(&self) -> Option<PathBuf> {
		None
	}
}

impl FixturesProvider for AppConfig {
	fn fixtures_dir(&self) -> Option<PathBuf> {
		// Default: {app_path}/fixtures/
		let path = self.path.as_ref()?;
		let fixtures_path = PathBuf::from(path).join("fixtures");
		fixtures_path.is_dir().then_some(fixtures_path)
	}
}

/// Main application registry
///
/// Central registry of installed applications. Cloning the registry yields a
/// handle onto the same underlying state.
#[derive(Clone, Debug)]
pub struct Apps {
	/// Installed application names, in installation order
	installed_apps: Vec<String>,

	/// Application labels to configurations, in registration order
	app_configs: Arc<Mutex<IndexMap<String, AppConfig>>>,

	/// Application names to labels
	app_names: Arc<Mutex<IndexMap<String, String>>>,

	/// Whether the registry has been populated
	ready: Arc<Mutex<bool>>,
}

impl Apps {
	/// Create a new application registry
	pub fn new(installed_apps: Vec<String>) -> Self {
		Self {
			installed_apps,
			app_configs: Arc::new(Mutex::new(IndexMap::new())),
			app_names: Arc::new(Mutex::new(IndexMap::new())),
			ready: Arc::new(Mutex::new(false)),
		}
	}

	/// Check if the registry has been populated
	pub fn is_ready(&self) -> bool {
		*self.ready.lock().unwrap_or_else(PoisonError::into_inner)
	}

	/// Register an application configuration
	pub fn register(&self, config: AppConfig) -> AppResult<()> {
		config.validate_label()?;

		let mut configs = self
			.app_configs
			.lock()
			.unwrap_or_else(PoisonError::into_inner);
		let mut names = self
			.app_names
			.lock()
			.unwrap_or_else(PoisonError::into_inner);

		if configs.contains_key(&config.label) {
			return Err(AppError::DuplicateLabel(config.label.clone()));
		}

		if names.contains_key(&config.name) {
			return Err(AppError::DuplicateName(config.name.clone()));
		}

		tracing::debug!(app = %config.label, name = %config.name, "registered application");
		names.insert(config.name.clone(), config.label.clone());
		configs.insert(config.label.clone(), config);

		Ok(())
	}

	/// Get an application configuration by label
	///
	/// # Errors
	///
	/// Returns [`AppError::NotFound`] if no application with that label is
	/// registered.
	pub fn get_app_config(&self, label: &str) -> AppResult<AppConfig> {
		self.app_configs
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.get(label)
			.cloned()
			.ok_or_else(|| AppError::NotFound(label.to_string()))
	}

	/// Get all registered application configurations, in registration order
	pub fn get_app_configs(&self) -> Vec<AppConfig> {
		self.app_configs
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.values()
			.cloned()
			.collect()
	}

	/// Populate the registry from the installed application names
	///
	/// Every installed name without an explicitly registered configuration
	/// gets a default [`AppConfig`] whose label is the last dotted segment.
	/// Calling this more than once is a no-op.
	///
	/// # Examples
	///
	/// ```rust
	/// use seedling_apps::Apps;
	///
	/// let apps = Apps::new(vec!["cms.boxes".to_string()]);
	/// apps.populate().expect("Failed to populate apps");
	/// assert!(apps.get_app_config("boxes").is_ok());
	/// ```
	pub fn populate(&self) -> AppResult<()> {
		if self.is_ready() {
			return Ok(());
		}

		for app_name in &self.installed_apps {
			let already_registered = self
				.app_names
				.lock()
				.unwrap_or_else(PoisonError::into_inner)
				.contains_key(app_name);
			if already_registered {
				continue;
			}
			self.register(AppConfig::from_name(app_name.clone()))?;
		}

		*self.ready.lock().unwrap_or_else(PoisonError::into_inner) = true;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_from_name_derives_label() {
		let config = AppConfig::from_name("cms.pages");
		assert_eq!(config.name, "cms.pages");
		assert_eq!(config.label, "pages");

		let plain = AppConfig::from_name("boxes");
		assert_eq!(plain.label, "boxes");
	}

	#[rstest]
	#[case("")]
	#[case("1boxes")]
	#[case("box-es")]
	fn test_invalid_labels(#[case] label: &str) {
		let config = AppConfig::new("cms.boxes", label);
		assert!(matches!(
			config.validate_label(),
			Err(AppError::InvalidLabel(_))
		));
	}

	#[rstest]
	#[case("apps/boxes")]
	#[case("boxes")]
	fn test_valid_paths(#[case] path: &str) {
		let config = AppConfig::new("cms.boxes", "boxes").with_path(path).unwrap();
		assert_eq!(config.path.as_deref(), Some(path));
	}

	#[rstest]
	#[case("")]
	#[case("/etc/boxes")]
	#[case("C:\\boxes")]
	#[case("apps/../secrets")]
	#[case("apps/\0boxes")]
	fn test_rejected_paths(#[case] path: &str) {
		let result = AppConfig::new("cms.boxes", "boxes").with_path(path);
		assert!(matches!(result, Err(AppError::ConfigError(_))));
	}

	#[rstest]
	fn test_register_and_lookup() {
		let apps = Apps::new(vec![]);
		apps.register(AppConfig::new("cms.boxes", "boxes")).unwrap();

		let config = apps.get_app_config("boxes").unwrap();
		assert_eq!(config.name, "cms.boxes");
		assert_eq!(apps.get_app_configs(), vec![config]);
	}

	#[rstest]
	fn test_unknown_label_is_not_found() {
		let apps = Apps::new(vec![]);
		let err = apps.get_app_config("missing").unwrap_err();
		assert!(matches!(err, AppError::NotFound(ref label) if label == "missing"));
		assert_eq!(err.to_string(), "No installed app with label 'missing'.");
	}

	#[rstest]
	fn test_duplicate_registration_rejected() {
		let apps = Apps::new(vec![]);
		apps.register(AppConfig::new("cms.boxes", "boxes")).unwrap();

		assert!(matches!(
			apps.register(AppConfig::new("other.boxes", "boxes")),
			Err(AppError::DuplicateLabel(_))
		));
		assert!(matches!(
			apps.register(AppConfig::new("cms.boxes", "boxes2")),
			Err(AppError::DuplicateName(_))
		));
	}

	#[rstest]
	fn test_populate_preserves_installation_order() {
		let apps = Apps::new(vec![
			"cms.pages".to_string(),
			"cms.boxes".to_string(),
			"cms.accounts".to_string(),
		]);
		apps.populate().unwrap();

		let labels: Vec<_> = apps
			.get_app_configs()
			.into_iter()
			.map(|config| config.label)
			.collect();
		assert_eq!(labels, vec!["pages", "boxes", "accounts"]);
		assert!(apps.is_ready());
	}

	#[rstest]
	fn test_populate_keeps_explicit_configs() {
		let apps = Apps::new(vec!["cms.boxes".to_string()]);
		apps.register(
			AppConfig::new("cms.boxes", "boxes")
				.with_path("apps/boxes")
				.unwrap(),
		)
		.unwrap();
		apps.populate().unwrap();

		let configs = apps.get_app_configs();
		assert_eq!(configs.len(), 1);
		assert_eq!(configs[0].path.as_deref(), Some("apps/boxes"));
	}

	#[rstest]
	fn test_populate_twice_is_noop() {
		let apps = Apps::new(vec!["cms.boxes".to_string()]);
		apps.populate().unwrap();
		apps.populate().unwrap();
		assert_eq!(apps.get_app_configs().len(), 1);
	}

	#[rstest]
	fn test_fixtures_dir_requires_existing_directory() {
		let config = AppConfig::new("cms.boxes", "boxes")
			.with_path("definitely/not/here")
			.unwrap();
		assert!(config.fixtures_dir().is_none());

		let no_path = AppConfig::new("cms.pages", "pages");
		assert!(no_path.fixtures_dir().is_none());
	}
}
