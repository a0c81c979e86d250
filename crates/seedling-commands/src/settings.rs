//! Layered project settings.
//!
//! Sources are merged in priority order, later sources overriding earlier
//! ones for the same key:
//!
//! 1. built-in defaults (priority 0)
//! 2. `<settings_dir>/base.toml` (50)
//! 3. `<settings_dir>/<profile>.toml` (50), profile from `SEEDLING_ENV`
//! 4. `SEEDLING_*` environment variables (100)

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Prefix of environment variables read as settings.
pub const ENV_PREFIX: &str = "SEEDLING_";

/// Environment variable selecting the settings profile.
pub const PROFILE_VAR: &str = "SEEDLING_ENV";

/// Keys whose environment values are comma-separated lists.
const LIST_KEYS: [&str; 2] = ["installed_apps", "fixture_dirs"];

/// Keys whose environment values are booleans.
const BOOL_KEYS: [&str; 1] = ["color"];

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync {
	/// Load configuration from this source
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError>;

	/// Get the priority of this source (higher = more important)
	fn priority(&self) -> u8;

	/// Get a description of this source
	fn description(&self) -> String;
}

/// Error type for configuration sources
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("Parse error: {0}")]
	Parse(String),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Environment variable configuration source
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Reads variables starting with `prefix`, with the prefix stripped and
	/// the remainder lowercased.
	pub fn with_prefix(prefix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
		}
	}

	fn parse_value(key: &str, value: String) -> Value {
		if LIST_KEYS.contains(&key) {
			return Value::Array(
				value
					.split(',')
					.map(str::trim)
					.filter(|s| !s.is_empty())
					.map(|s| Value::String(s.to_string()))
					.collect(),
			);
		}
		if !BOOL_KEYS.contains(&key) {
			return Value::String(value);
		}
		match value.trim().to_lowercase().as_str() {
			"true" | "1" | "yes" | "on" => Value::Bool(true),
			"false" | "0" | "no" | "off" => Value::Bool(false),
			_ => Value::String(value),
		}
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(std::env::vars()
			.filter_map(|(key, value)| {
				let key = key.strip_prefix(&self.prefix)?.to_lowercase();
				let value = Self::parse_value(&key, value);
				Some((key, value))
			})
			.collect())
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("Environment variables (prefix: {})", self.prefix)
	}
}

/// TOML file configuration source
///
/// A missing file contributes nothing.
pub struct TomlFileSource {
	path: PathBuf,
}

impl TomlFileSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		if !self.path.exists() {
			return Ok(IndexMap::new());
		}

		let content = std::fs::read_to_string(&self.path)?;
		let toml_value: toml::Value = toml::from_str(&content)?;
		let json_value = serde_json::to_value(toml_value)?;

		match json_value {
			Value::Object(map) => Ok(map.into_iter().collect()),
			_ => Err(SourceError::Parse("Expected table at root".to_string())),
		}
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// Default values configuration source
#[derive(Default)]
pub struct DefaultSource {
	values: IndexMap<String, Value>,
}

impl DefaultSource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
		self.values.insert(key.into(), value);
		self
	}
}

impl ConfigSource for DefaultSource {
	fn load(&self) -> Result<IndexMap<String, Value>, SourceError> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		0
	}

	fn description(&self) -> String {
		"Default values".to_string()
	}
}

/// Merges [`ConfigSource`]s by priority.
///
/// Sources with equal priority are applied in the order they were added.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merges every source into one map.
	pub fn build_map(mut self) -> Result<IndexMap<String, Value>, SourceError> {
		self.sources.sort_by_key(|source| source.priority());

		let mut merged = IndexMap::new();
		for source in &self.sources {
			let values = source.load()?;
			tracing::debug!(source = %source.description(), keys = values.len(), "loaded settings source");
			merged.extend(values);
		}
		Ok(merged)
	}

	/// Merges every source and deserializes the result.
	pub fn build<T: DeserializeOwned>(self) -> Result<T, SourceError> {
		let merged = self.build_map()?;
		Ok(serde_json::from_value(Value::Object(merged.into_iter().collect()))?)
	}
}

/// Settings read by the `manage` binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
	/// Dotted application names, in installation order.
	pub installed_apps: Vec<String>,

	/// Extra fixture directories searched before application directories.
	pub fixture_dirs: Vec<PathBuf>,

	/// Fixture installed at the start of `create_initial_data`.
	pub initial_fixture: String,

	/// Whether terminal output is styled.
	pub color: bool,
}

impl Default for SeedSettings {
	fn default() -> Self {
		Self {
			installed_apps: Vec::new(),
			fixture_dirs: Vec::new(),
			initial_fixture: "sitetree_menus".to_string(),
			color: true,
		}
	}
}

impl SeedSettings {
	/// Loads settings from `settings_dir` and the environment.
	///
	/// Setting `NO_COLOR` to any non-empty value turns colour off regardless
	/// of the other sources.
	pub fn load(settings_dir: &Path) -> Result<Self, SourceError> {
		let profile = std::env::var(PROFILE_VAR).unwrap_or_else(|_| "local".to_string());
		let defaults = SeedSettings::default();

		let mut settings: SeedSettings = SettingsBuilder::new()
			.add_source(
				DefaultSource::new()
					.with_value("initial_fixture", Value::String(defaults.initial_fixture))
					.with_value("color", Value::Bool(defaults.color)),
			)
			.add_source(TomlFileSource::new(settings_dir.join("base.toml")))
			.add_source(TomlFileSource::new(
				settings_dir.join(format!("{}.toml", profile)),
			))
			.add_source(EnvSource::with_prefix(ENV_PREFIX))
			.build()?;

		if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
			settings.color = false;
		}

		tracing::debug!(profile = %profile, apps = settings.installed_apps.len(), "settings loaded");
		Ok(settings)
	}
}
