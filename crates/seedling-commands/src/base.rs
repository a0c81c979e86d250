//! Base command trait and argument descriptors

use async_trait::async_trait;

use crate::{CommandContext, CommandResult};

/// Positional argument accepted by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgument {
	pub name: String,
	pub description: String,
	pub required: bool,
	pub multiple: bool,
}

impl CommandArgument {
	pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			description: description.into(),
			required: true,
			multiple: false,
		}
	}

	pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			required: false,
			..Self::required(name, description)
		}
	}

	/// Accept the argument more than once.
	pub fn multiple(mut self) -> Self {
		self.multiple = true;
		self
	}
}

/// Named option accepted by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
	pub short: Option<char>,
	pub long: String,
	pub description: String,
	pub takes_value: bool,
	pub default: Option<String>,
}

impl CommandOption {
	/// Boolean switch.
	pub fn flag(short: Option<char>, long: impl Into<String>, description: impl Into<String>) -> Self {
		Self {
			short,
			long: long.into(),
			description: description.into(),
			takes_value: false,
			default: None,
		}
	}

	/// Option taking a value.
	pub fn option(
		short: Option<char>,
		long: impl Into<String>,
		description: impl Into<String>,
	) -> Self {
		Self {
			takes_value: true,
			..Self::flag(short, long, description)
		}
	}

	pub fn with_default(mut self, default: impl Into<String>) -> Self {
		self.default = Some(default.into());
		self
	}
}

/// A management command.
#[async_trait]
pub trait BaseCommand: Send + Sync {
	fn name(&self) -> &str;

	fn description(&self) -> &str;

	fn arguments(&self) -> Vec<CommandArgument> {
		Vec::new()
	}

	fn options(&self) -> Vec<CommandOption> {
		Vec::new()
	}

	/// One-line usage synopsis built from [`arguments`](Self::arguments) and
	/// [`options`](Self::options).
	fn usage(&self) -> String {
		let mut usage = self.name().to_string();
		for opt in self.options() {
			let mut part = format!("--{}", opt.long);
			if opt.takes_value {
				part.push_str(&format!(" <{}>", opt.long.to_uppercase()));
			}
			usage.push_str(&format!(" [{}]", part));
		}
		for arg in self.arguments() {
			let mut part = arg.name.to_uppercase();
			if arg.multiple {
				part.push_str("...");
			}
			if arg.required {
				usage.push_str(&format!(" {}", part));
			} else {
				usage.push_str(&format!(" [{}]", part));
			}
		}
		usage
	}

	async fn execute(&self, ctx: &CommandContext) -> CommandResult<()>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	struct Sample;

	#[async_trait]
	impl BaseCommand for Sample {
		fn name(&self) -> &str {
			"loaddata"
		}

		fn description(&self) -> &str {
			"Installs fixtures"
		}

		fn arguments(&self) -> Vec<CommandArgument> {
			vec![CommandArgument::required("fixture", "Fixture name").multiple()]
		}

		fn options(&self) -> Vec<CommandOption> {
			vec![
				CommandOption::option(Some('a'), "app", "Only load this app"),
				CommandOption::flag(None, "ignore-missing", "Skip unknown models"),
			]
		}

		async fn execute(&self, _ctx: &CommandContext) -> CommandResult<()> {
			Ok(())
		}
	}

	#[rstest]
	fn test_usage() {
		assert_eq!(
			Sample.usage(),
			"loaddata [--app <APP>] [--ignore-missing] FIXTURE..."
		);
	}

	#[rstest]
	fn test_option_builders() {
		let option = CommandOption::option(Some('v'), "verbosity", "Verbosity").with_default("1");
		assert!(option.takes_value);
		assert_eq!(option.default.as_deref(), Some("1"));

		let arg = CommandArgument::optional("app_label", "App label");
		assert!(!arg.required);
		assert!(!arg.multiple);
	}
}
