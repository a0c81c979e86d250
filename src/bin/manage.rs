//! `manage` entry point.
//!
//! Producers registered with `register_initial_data!` in any crate linked
//! into this binary are picked up automatically.

use seedling::{ProducerRegistry, execute_from_command_line};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(std::io::stderr)
		.init();

	if let Err(e) = execute_from_command_line(ProducerRegistry::from_inventory()).await {
		eprintln!("Error: {}", e);
		std::process::exit(1);
	}
}
