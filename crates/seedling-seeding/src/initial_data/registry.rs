//! Registration of initial data producers.
//!
//! Applications declare their producer once with [`register_initial_data!`]
//! and the `manage` binary collects every declaration through
//! [`ProducerRegistry::from_inventory`]. Tests build a [`ProducerRegistry`]
//! by hand instead.
//!
//! [`register_initial_data!`]: crate::register_initial_data

use std::sync::Arc;

use indexmap::IndexMap;

use super::InitialDataProducer;

/// Compile-time declaration of an application's producer.
///
/// Created by [`register_initial_data!`](crate::register_initial_data).
pub struct InitialDataRegistration {
	/// Label of the application the producer belongs to.
	pub app_label: &'static str,
	/// Constructor for the producer.
	pub producer: fn() -> Box<dyn InitialDataProducer>,
}

inventory::collect!(InitialDataRegistration);

/// Register the initial data producer of an application.
///
/// Takes either a constructor returning a boxed [`InitialDataProducer`] or,
/// after `=>`, the path of an async function returning a
/// [`ProducerResult`](crate::initial_data::ProducerResult).
///
/// # Example
///
/// ```rust,ignore
/// use seedling_seeding::register_initial_data;
///
/// async fn initial_data() -> ProducerResult {
///     let created = create_default_boxes().await?;
///     Ok(serde_json::json!({ "boxes": created }))
/// }
///
/// register_initial_data!("boxes" => initial_data);
/// register_initial_data!("pages", || Box::new(PagesProducer::default()));
/// ```
#[macro_export]
macro_rules! register_initial_data {
	($app_label:expr => $func:path) => {
		$crate::inventory::submit! {
			$crate::initial_data::InitialDataRegistration {
				app_label: $app_label,
				producer: || ::std::boxed::Box::new($crate::initial_data::producer_fn($func)),
			}
		}
	};
	($app_label:expr, $producer_fn:expr) => {
		$crate::inventory::submit! {
			$crate::initial_data::InitialDataRegistration {
				app_label: $app_label,
				producer: $producer_fn,
			}
		}
	};
}

/// Producers keyed by application label.
///
/// Each label holds at most one producer. The first registration for a label
/// wins and later ones are ignored with a warning.
#[derive(Clone, Default)]
pub struct ProducerRegistry {
	producers: IndexMap<String, Arc<dyn InitialDataProducer>>,
}

impl std::fmt::Debug for ProducerRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProducerRegistry")
			.field("labels", &self.labels())
			.finish()
	}
}

impl ProducerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a registry from every [`InitialDataRegistration`] linked into
	/// the binary.
	pub fn from_inventory() -> Self {
		let mut registry = Self::new();
		for registration in inventory::iter::<InitialDataRegistration>() {
			registry.register_boxed(registration.app_label, (registration.producer)());
		}
		registry
	}

	/// Registers a producer for `app_label`.
	///
	/// Returns `false` if the label already had a producer, in which case the
	/// existing one is kept.
	pub fn register<P>(&mut self, app_label: impl Into<String>, producer: P) -> bool
	where
		P: InitialDataProducer + 'static,
	{
		self.insert(app_label.into(), Arc::new(producer))
	}

	/// Registers an already boxed producer.
	pub fn register_boxed(
		&mut self,
		app_label: impl Into<String>,
		producer: Box<dyn InitialDataProducer>,
	) -> bool {
		self.insert(app_label.into(), Arc::from(producer))
	}

	fn insert(&mut self, app_label: String, producer: Arc<dyn InitialDataProducer>) -> bool {
		if self.producers.contains_key(&app_label) {
			tracing::warn!(app = %app_label, "initial data producer already registered, ignoring");
			return false;
		}
		tracing::debug!(app = %app_label, "registered initial data producer");
		self.producers.insert(app_label, producer);
		true
	}

	/// Gets the producer registered for `app_label`.
	pub fn get(&self, app_label: &str) -> Option<Arc<dyn InitialDataProducer>> {
		self.producers.get(app_label).cloned()
	}

	/// Returns true if `app_label` has a producer.
	pub fn contains(&self, app_label: &str) -> bool {
		self.producers.contains_key(app_label)
	}

	/// Registered labels in registration order.
	pub fn labels(&self) -> Vec<&str> {
		self.producers.keys().map(String::as_str).collect()
	}

	/// Number of registered producers.
	pub fn len(&self) -> usize {
		self.producers.len()
	}

	/// Returns true if nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.producers.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::initial_data::{ProducerResult, producer_fn};
	use async_trait::async_trait;
	use rstest::rstest;
	use serde_json::json;

	struct Fixed(&'static str);

	#[async_trait]
	impl InitialDataProducer for Fixed {
		async fn create(&self) -> ProducerResult {
			Ok(json!(self.0))
		}
	}

	async fn footer_links() -> ProducerResult {
		Ok(json!({"links": 2}))
	}

	register_initial_data!("registry_test_links" => footer_links);
	register_initial_data!("registry_test_fixed", || Box::new(Fixed("fixed")));

	#[rstest]
	#[tokio::test]
	async fn test_first_registration_wins() {
		let mut registry = ProducerRegistry::new();
		assert!(registry.register("boxes", Fixed("first")));
		assert!(!registry.register("boxes", Fixed("second")));

		assert_eq!(registry.len(), 1);
		let value = registry.get("boxes").unwrap().create().await.unwrap();
		assert_eq!(value, json!("first"));
	}

	#[rstest]
	fn test_labels_keep_registration_order() {
		let mut registry = ProducerRegistry::new();
		registry.register("pages", Fixed("p"));
		registry.register("boxes", Fixed("b"));
		registry.register_boxed("menus", Box::new(producer_fn(footer_links)));

		assert_eq!(registry.labels(), vec!["pages", "boxes", "menus"]);
		assert!(registry.contains("menus"));
		assert!(!registry.contains("users"));
	}

	#[rstest]
	#[tokio::test]
	async fn test_from_inventory_collects_macro_registrations() {
		let registry = ProducerRegistry::from_inventory();

		let links = registry.get("registry_test_links").unwrap();
		assert_eq!(links.create().await.unwrap(), json!({"links": 2}));

		let fixed = registry.get("registry_test_fixed").unwrap();
		assert_eq!(fixed.create().await.unwrap(), json!("fixed"));
	}
}
