//! `loaddata` as a management command.

use async_trait::async_trait;
use seedling_seeding::commands::{LoadDataArgs, LoadDataCommand, LoadDataOptions};

use crate::{BaseCommand, CommandArgument, CommandContext, CommandError, CommandOption, CommandResult};

/// Installs the fixtures named on the command line.
#[derive(Debug, Clone)]
pub struct LoadDataManagementCommand {
	inner: LoadDataCommand,
}

impl LoadDataManagementCommand {
	pub fn new(inner: LoadDataCommand) -> Self {
		Self { inner }
	}
}

#[async_trait]
impl BaseCommand for LoadDataManagementCommand {
	fn name(&self) -> &str {
		self.inner.name()
	}

	fn description(&self) -> &str {
		self.inner.description()
	}

	fn arguments(&self) -> Vec<CommandArgument> {
		vec![CommandArgument::required("fixture", "Fixture name or path").multiple()]
	}

	fn options(&self) -> Vec<CommandOption> {
		vec![
			CommandOption::option(Some('a'), "app", "Only load records of this app"),
			CommandOption::flag(None, "ignore-missing", "Skip models without a loader"),
		]
	}

	async fn execute(&self, ctx: &CommandContext) -> CommandResult<()> {
		if ctx.args.is_empty() {
			return Err(CommandError::InvalidArguments(
				"loaddata requires at least one fixture".to_string(),
			));
		}

		let options = LoadDataOptions::new()
			.with_app_labels(ctx.option_values("app").unwrap_or_default())
			.with_ignore_missing(ctx.has_option("ignore-missing"))
			.with_verbosity(ctx.verbosity());

		let result = self
			.inner
			.execute(LoadDataArgs::new(ctx.args.iter().cloned()), options)
			.await?;

		ctx.info(&LoadDataCommand::summary(&result))?;
		Ok(())
	}
}
