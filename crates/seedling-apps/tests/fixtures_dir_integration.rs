//! Integration tests for application fixture directory discovery

use rstest::rstest;
use seedling_apps::{AppConfig, Apps, FixturesProvider};

#[rstest]
fn test_fixtures_dir_found_relative_to_working_directory() {
	// AppConfig paths are relative to the working directory, so the
	// temporary tree has to live underneath it.
	let root = tempfile::tempdir_in(".").unwrap();
	let root_name = root.path().file_name().unwrap().to_string_lossy().into_owned();
	std::fs::create_dir_all(root.path().join("boxes").join("fixtures")).unwrap();

	let config = AppConfig::new("cms.boxes", "boxes")
		.with_path(format!("{}/boxes", root_name))
		.unwrap();

	let dir = config.fixtures_dir().expect("fixtures dir should be found");
	assert!(dir.ends_with("boxes/fixtures"));
}

#[rstest]
fn test_fixtures_dir_missing_when_app_ships_none() {
	let root = tempfile::tempdir_in(".").unwrap();
	let root_name = root.path().file_name().unwrap().to_string_lossy().into_owned();
	std::fs::create_dir_all(root.path().join("pages")).unwrap();

	let config = AppConfig::new("cms.pages", "pages")
		.with_path(format!("{}/pages", root_name))
		.unwrap();

	assert!(config.fixtures_dir().is_none());
}

#[rstest]
fn test_registry_lookup_after_populate() {
	let apps = Apps::new(vec!["cms.pages".to_string(), "cms.boxes".to_string()]);
	apps.populate().unwrap();

	assert_eq!(apps.get_app_config("pages").unwrap().name, "cms.pages");
	assert!(apps.get_app_config("sitetree").is_err());
}
