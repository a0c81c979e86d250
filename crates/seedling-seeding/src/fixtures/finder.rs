//! Fixture lookup by name.
//!
//! `loaddata sitetree_menus` searches the configured fixture directories
//! first, then each installed application's `fixtures/` directory.

use std::path::{Path, PathBuf};

use seedling_apps::{Apps, FixturesProvider};

use super::FixtureFormat;
use crate::error::{SeedingError, SeedingResult};

/// Resolves fixture labels to fixture files.
#[derive(Debug, Clone, Default)]
pub struct FixtureFinder {
	dirs: Vec<PathBuf>,
}

impl FixtureFinder {
	/// Creates a finder with no search directories.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a directory to the search path.
	pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.dirs.push(dir.into());
		self
	}

	/// Adds several directories to the search path.
	pub fn with_dirs<I, P>(mut self, dirs: I) -> Self
	where
		I: IntoIterator<Item = P>,
		P: Into<PathBuf>,
	{
		self.dirs.extend(dirs.into_iter().map(Into::into));
		self
	}

	/// Appends the fixture directory of every installed application.
	pub fn with_app_dirs(mut self, apps: &Apps) -> Self {
		self.dirs
			.extend(apps.get_app_configs().iter().filter_map(|app| app.fixtures_dir()));
		self
	}

	/// Returns the search directories, in search order.
	pub fn dirs(&self) -> &[PathBuf] {
		&self.dirs
	}

	/// Resolves a fixture label to a file.
	///
	/// A label that names an existing file is returned as is. Otherwise each
	/// search directory is tried in order with `<label>`, then
	/// `<label>.json`, `<label>.yaml` and `<label>.yml`.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::FixtureNotFound`] if nothing matches.
	pub fn find(&self, label: &str) -> SeedingResult<PathBuf> {
		let direct = Path::new(label);
		if direct.is_file() {
			return Ok(direct.to_path_buf());
		}

		for dir in &self.dirs {
			if let Some(path) = Self::find_in_dir(dir, label) {
				tracing::debug!(fixture = label, path = %path.display(), "resolved fixture");
				return Ok(path);
			}
		}

		Err(SeedingError::FixtureNotFound(label.to_string()))
	}

	fn find_in_dir(dir: &Path, label: &str) -> Option<PathBuf> {
		let candidate = dir.join(label);
		if FixtureFormat::from_path(&candidate).is_some() && candidate.is_file() {
			return Some(candidate);
		}

		FixtureFormat::SEARCH_EXTENSIONS
			.iter()
			.map(|ext| dir.join(format!("{}.{}", label, ext)))
			.find(|path| path.is_file())
	}
}
