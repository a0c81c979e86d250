//! Initial data producers.
//!
//! A producer is the per-application routine that creates an app's default
//! records. It returns a JSON description of what it created, which
//! `create_initial_data` pretty-prints at high verbosity.

use std::any::Any;
use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

/// Failure reported by an initial data producer.
///
/// Any standard error converts into a `ProducerError` with `?`, keeping the
/// error's type name as [`kind`](Self::kind). It must not implement
/// [`std::error::Error`] itself or the blanket conversion would overlap with
/// `From<T> for T`.
pub struct ProducerError {
	kind: String,
	message: String,
}

impl ProducerError {
	/// Creates an error with an explicit kind.
	pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			message: message.into(),
		}
	}

	/// Creates an error of kind `Error` from a plain message.
	pub fn msg(message: impl Into<String>) -> Self {
		Self::new("Error", message)
	}

	/// Converts a panic payload caught while running a producer.
	pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
		let message = if let Some(s) = payload.downcast_ref::<&str>() {
			(*s).to_string()
		} else if let Some(s) = payload.downcast_ref::<String>() {
			s.clone()
		} else {
			"producer panicked".to_string()
		};
		Self::new("Panic", message)
	}

	/// Short name of the failure category.
	pub fn kind(&self) -> &str {
		&self.kind
	}

	/// Human-readable message.
	pub fn message(&self) -> &str {
		&self.message
	}
}

impl<E> From<E> for ProducerError
where
	E: std::error::Error + Send + Sync + 'static,
{
	fn from(error: E) -> Self {
		Self::new(short_type_name::<E>(), error.to_string())
	}
}

impl fmt::Display for ProducerError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.kind, self.message)
	}
}

impl fmt::Debug for ProducerError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ProducerError")
			.field("kind", &self.kind)
			.field("message", &self.message)
			.finish()
	}
}

/// `std::any::type_name` without module path or generic arguments.
fn short_type_name<T: ?Sized>() -> &'static str {
	let full = std::any::type_name::<T>();
	let base = full.split('<').next().unwrap_or(full);
	base.rsplit("::").next().unwrap_or(base)
}

/// Result of running a producer.
pub type ProducerResult = Result<Value, ProducerError>;

/// Creates the initial data of one application.
#[async_trait]
pub trait InitialDataProducer: Send + Sync {
	/// Creates the data, returning a description of what was created.
	async fn create(&self) -> ProducerResult;
}

/// Adapter turning an async function into an [`InitialDataProducer`].
pub struct FnProducer<F> {
	func: F,
}

impl<F> fmt::Debug for FnProducer<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnProducer").finish_non_exhaustive()
	}
}

/// Wraps an async function as a producer.
///
/// ```ignore
/// let producer = producer_fn(|| async { Ok(serde_json::json!({"boxes": 3})) });
/// assert_eq!(producer.create().await?["boxes"], 3);
/// ```
pub fn producer_fn<F, Fut>(func: F) -> FnProducer<F>
where
	F: Fn() -> Fut + Send + Sync + 'static,
	Fut: Future<Output = ProducerResult> + Send + 'static,
{
	FnProducer { func }
}

#[async_trait]
impl<F, Fut> InitialDataProducer for FnProducer<F>
where
	F: Fn() -> Fut + Send + Sync + 'static,
	Fut: Future<Output = ProducerResult> + Send + 'static,
{
	async fn create(&self) -> ProducerResult {
		(self.func)().await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::SeedingError;
	use rstest::rstest;
	use serde_json::json;

	#[derive(Debug, thiserror::Error)]
	#[error("menu '{0}' already exists")]
	struct DuplicateMenu(String);

	fn insert_menu() -> Result<Value, DuplicateMenu> {
		Err(DuplicateMenu("main".to_string()))
	}

	fn create_menu() -> ProducerResult {
		Ok(insert_menu()?)
	}

	#[rstest]
	fn test_from_error_keeps_type_name() {
		let error = create_menu().unwrap_err();
		assert_eq!(error.kind(), "DuplicateMenu");
		assert_eq!(error.message(), "menu 'main' already exists");
		assert_eq!(error.to_string(), "DuplicateMenu: menu 'main' already exists");
	}

	#[rstest]
	fn test_from_seeding_error() {
		let error: ProducerError = SeedingError::ModelNotFound("boxes.Box".to_string()).into();
		assert_eq!(error.kind(), "SeedingError");
		assert_eq!(error.message(), "Model not found: boxes.Box");
	}

	#[rstest]
	fn test_from_io_error() {
		let error: ProducerError =
			std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into();
		assert_eq!(error.kind(), "Error");
		assert_eq!(error.message(), "read-only");
	}

	#[rstest]
	#[case(Box::new("boom") as Box<dyn Any + Send>, "boom")]
	#[case(Box::new(String::from("kaboom")) as Box<dyn Any + Send>, "kaboom")]
	#[case(Box::new(42_u8) as Box<dyn Any + Send>, "producer panicked")]
	fn test_from_panic(#[case] payload: Box<dyn Any + Send>, #[case] expected: &str) {
		let error = ProducerError::from_panic(payload);
		assert_eq!(error.kind(), "Panic");
		assert_eq!(error.message(), expected);
	}

	#[rstest]
	#[tokio::test]
	async fn test_producer_fn() {
		let producer = producer_fn(|| async { Ok(json!(["header", "footer"])) });
		assert_eq!(producer.create().await.unwrap(), json!(["header", "footer"]));

		let failing = producer_fn(|| async { Err(ProducerError::msg("no site configured")) });
		let error = failing.create().await.unwrap_err();
		assert_eq!(error.kind(), "Error");
		assert_eq!(error.message(), "no site configured");
	}
}
