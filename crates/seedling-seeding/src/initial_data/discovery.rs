//! Discovery of the producers to run for a seeding pass.

use std::sync::Arc;

use indexmap::IndexMap;
use seedling_apps::{AppResult, Apps};

use super::{InitialDataProducer, ProducerRegistry};

/// Producers selected for one run, keyed by application label in run order.
///
/// The label, not the dotted name, is the key: `cms.boxes` runs as `boxes`,
/// the same identifier `--app_label` and registration use.
pub type ProducerMap = IndexMap<String, Arc<dyn InitialDataProducer>>;

/// Selects the producers to run.
///
/// With `app_label`, only that application is considered and it must be
/// installed. Without it, every installed application is visited in the
/// order the [`Apps`] registry lists them. Applications without a registered
/// producer are left out, as are producers registered for applications that
/// are not installed.
///
/// # Errors
///
/// Returns [`AppError::NotFound`](seedling_apps::AppError::NotFound) when
/// `app_label` is not an installed application.
pub fn discover_producers(
	apps: &Apps,
	registry: &ProducerRegistry,
	app_label: Option<&str>,
) -> AppResult<ProducerMap> {
	let candidates = match app_label {
		Some(label) => vec![apps.get_app_config(label)?],
		None => apps.get_app_configs(),
	};

	let mut producers = ProducerMap::new();
	for app in candidates {
		match registry.get(&app.label) {
			Some(producer) => {
				producers.insert(app.label, producer);
			}
			None => tracing::trace!(app = %app.label, "no initial data producer"),
		}
	}

	tracing::debug!(count = producers.len(), "discovered initial data producers");
	Ok(producers)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::initial_data::{ProducerResult, producer_fn};
	use rstest::{fixture, rstest};
	use seedling_apps::{AppConfig, AppError};
	use serde_json::json;

	async fn noop() -> ProducerResult {
		Ok(json!(null))
	}

	#[fixture]
	fn apps() -> Apps {
		let apps = Apps::new(vec![]);
		apps.register(AppConfig::new("cms.pages", "pages")).unwrap();
		apps.register(AppConfig::new("cms.boxes", "boxes")).unwrap();
		apps.register(AppConfig::new("cms.users", "users")).unwrap();
		apps.populate().unwrap();
		apps
	}

	#[fixture]
	fn registry() -> ProducerRegistry {
		let mut registry = ProducerRegistry::new();
		registry.register("boxes", producer_fn(noop));
		registry.register("pages", producer_fn(noop));
		registry.register("not_installed", producer_fn(noop));
		registry
	}

	#[rstest]
	fn test_all_apps_in_registry_order(apps: Apps, registry: ProducerRegistry) {
		let producers = discover_producers(&apps, &registry, None).unwrap();
		let labels: Vec<_> = producers.keys().cloned().collect();
		assert_eq!(labels, vec!["pages", "boxes"]);
	}

	#[rstest]
	fn test_dotted_names_are_keyed_by_label(apps: Apps, registry: ProducerRegistry) {
		let producers = discover_producers(&apps, &registry, None).unwrap();
		assert!(producers.contains_key("boxes"));
		assert!(!producers.contains_key("cms.boxes"));
	}

	#[rstest]
	fn test_single_app(apps: Apps, registry: ProducerRegistry) {
		let producers = discover_producers(&apps, &registry, Some("boxes")).unwrap();
		assert_eq!(producers.len(), 1);
		assert!(producers.contains_key("boxes"));
	}

	#[rstest]
	fn test_single_app_without_producer(apps: Apps, registry: ProducerRegistry) {
		let producers = discover_producers(&apps, &registry, Some("users")).unwrap();
		assert!(producers.is_empty());
	}

	#[rstest]
	fn test_unknown_app_label(apps: Apps, registry: ProducerRegistry) {
		let result = discover_producers(&apps, &registry, Some("not_installed"));
		assert!(matches!(result, Err(AppError::NotFound(ref label)) if label == "not_installed"));
	}
}
