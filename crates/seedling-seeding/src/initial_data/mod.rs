//! Per-application initial data.

mod discovery;
mod producer;
mod registry;

pub use discovery::{ProducerMap, discover_producers};
pub use producer::{FnProducer, InitialDataProducer, ProducerError, ProducerResult, producer_fn};
pub use registry::{InitialDataRegistration, ProducerRegistry};
