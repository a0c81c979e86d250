//! Model loader registry.
//!
//! Applications register one [`ModelLoader`] per model so that fixture
//! records can be written to whatever storage the application uses.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::FixtureRecord;
use crate::error::{SeedingError, SeedingResult};

/// Trait for loading fixture records into the datastore.
#[async_trait]
pub trait ModelLoader: Send + Sync {
	/// Returns the model identifier (e.g., "sitetree.Tree").
	fn model_id(&self) -> &str;

	/// Loads a single fixture record, returning the stored primary key.
	async fn load_record(&self, record: &FixtureRecord) -> SeedingResult<serde_json::Value>;

	/// Loads multiple fixture records for this model.
	///
	/// The default implementation loads records sequentially and stops at
	/// the first failure.
	async fn load_records(&self, records: &[&FixtureRecord]) -> SeedingResult<usize> {
		for record in records {
			self.load_record(record).await?;
		}
		Ok(records.len())
	}
}

static MODEL_REGISTRY: Lazy<RwLock<HashMap<String, Arc<dyn ModelLoader>>>> =
	Lazy::new(|| RwLock::new(HashMap::new()));

/// Registers a model loader in the global registry.
///
/// A later registration for the same model identifier replaces the earlier
/// one.
///
/// ```ignore
/// struct TreeLoader;
///
/// #[async_trait]
/// impl ModelLoader for TreeLoader {
///     fn model_id(&self) -> &str { "sitetree.Tree" }
///     async fn load_record(&self, record: &FixtureRecord) -> SeedingResult<serde_json::Value> {
///         insert_tree(record).await
///     }
/// }
///
/// register_model_loader(TreeLoader);
/// ```
pub fn register_model_loader<L: ModelLoader + 'static>(loader: L) {
	let model_id = loader.model_id().to_string();
	tracing::debug!(model = %model_id, "registered model loader");
	MODEL_REGISTRY.write().insert(model_id, Arc::new(loader));
}

/// Handle onto the global model loader registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelRegistry;

impl ModelRegistry {
	/// Creates a new registry handle.
	pub fn new() -> Self {
		Self
	}

	/// Gets the loader for a model identifier.
	pub fn get_loader(&self, model_id: &str) -> Option<Arc<dyn ModelLoader>> {
		MODEL_REGISTRY.read().get(model_id).cloned()
	}

	/// Checks if a loader is registered for the model identifier.
	pub fn has_loader(&self, model_id: &str) -> bool {
		MODEL_REGISTRY.read().contains_key(model_id)
	}

	/// Returns all registered model identifiers.
	pub fn model_ids(&self) -> Vec<String> {
		MODEL_REGISTRY.read().keys().cloned().collect()
	}

	/// Returns the number of registered loaders.
	pub fn len(&self) -> usize {
		MODEL_REGISTRY.read().len()
	}

	/// Returns true if no loaders are registered.
	pub fn is_empty(&self) -> bool {
		MODEL_REGISTRY.read().is_empty()
	}

	/// Clears all registered loaders.
	///
	/// This is primarily useful for testing.
	pub fn clear(&self) {
		MODEL_REGISTRY.write().clear();
	}

	/// Loads records for one model using its registered loader.
	///
	/// # Errors
	///
	/// Returns [`SeedingError::ModelNotFound`] if no loader is registered.
	pub async fn load_records(
		&self,
		model_id: &str,
		records: &[&FixtureRecord],
	) -> SeedingResult<usize> {
		let loader = self
			.get_loader(model_id)
			.ok_or_else(|| SeedingError::ModelNotFound(model_id.to_string()))?;
		loader.load_records(records).await
	}
}
