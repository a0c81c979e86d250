//! Command lookup by name

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{BaseCommand, CommandError, CommandResult};

/// Registered management commands, with aliases.
#[derive(Default, Clone)]
pub struct CommandRegistry {
	commands: IndexMap<String, Arc<dyn BaseCommand>>,
	aliases: IndexMap<String, String>,
}

impl CommandRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `command` under its own name, replacing any previous one.
	pub fn register<C: BaseCommand + 'static>(&mut self, command: C) {
		let name = command.name().to_string();
		tracing::debug!(command = %name, "registered command");
		self.commands.insert(name, Arc::new(command));
	}

	/// Makes `alias` resolve to the command called `name`.
	pub fn alias(&mut self, alias: impl Into<String>, name: impl Into<String>) {
		self.aliases.insert(alias.into(), name.into());
	}

	/// Looks up a command by name or alias.
	pub fn get(&self, name: &str) -> CommandResult<Arc<dyn BaseCommand>> {
		let name = self.aliases.get(name).map(String::as_str).unwrap_or(name);
		self.commands
			.get(name)
			.cloned()
			.ok_or_else(|| CommandError::NotFound(name.to_string()))
	}

	/// Command names in registration order.
	pub fn names(&self) -> Vec<&str> {
		self.commands.keys().map(String::as_str).collect()
	}
}
