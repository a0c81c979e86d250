//! The `create_initial_data` command.
//!
//! After an interactive confirmation, installs the project's initial fixture
//! and then runs the initial data producer of every installed application
//! (or of one application, with `--app_label`). Each step is isolated: a
//! failing fixture or producer is reported and the run moves on.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use indexmap::IndexMap;
use seedling_apps::Apps;
use seedling_seeding::commands::FixtureInstaller;
use seedling_seeding::initial_data::{
	InitialDataProducer, ProducerError, ProducerRegistry, discover_producers,
};
use serde_json::{Value, json};

use crate::output::Style;
use crate::{BaseCommand, CommandContext, CommandOption, CommandResult};

/// Fixture installed before any producer runs, unless configured otherwise.
pub const DEFAULT_INITIAL_FIXTURE: &str = "sitetree_menus";

const PROMPT: &str = "Note that this command won't cleanup the database before creating new data.\n\
	Type 'y' or 'yes' to continue, 'n' or 'no' to cancel: ";

/// Outcome of one seeding step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
	/// The step completed; `value` describes what it created.
	Done { value: Value },
	/// The step failed with an error of the given kind.
	Failed { kind: String, message: String },
}

impl StepOutcome {
	fn failed(kind: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Failed {
			kind: kind.into(),
			message: message.into(),
		}
	}

	pub fn is_done(&self) -> bool {
		matches!(self, Self::Done { .. })
	}
}

/// Everything a confirmed run did.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
	/// Outcome of the initial fixture install.
	pub fixture: StepOutcome,
	/// Outcome per application, in the order the producers ran.
	pub apps: IndexMap<String, StepOutcome>,
}

impl SeedReport {
	/// True when the fixture and every producer succeeded.
	pub fn is_success(&self) -> bool {
		self.fixture.is_done() && self.apps.values().all(StepOutcome::is_done)
	}

	/// Labels of the applications whose producer failed.
	pub fn failed_apps(&self) -> Vec<&str> {
		self.apps
			.iter()
			.filter(|(_, outcome)| !outcome.is_done())
			.map(|(label, _)| label.as_str())
			.collect()
	}
}

/// Seeds the initial fixture and per-application initial data.
#[derive(Clone)]
pub struct CreateInitialDataCommand {
	apps: Apps,
	producers: ProducerRegistry,
	installer: Arc<dyn FixtureInstaller>,
	fixture: String,
}

impl CreateInitialDataCommand {
	pub fn new(
		apps: Apps,
		producers: ProducerRegistry,
		installer: Arc<dyn FixtureInstaller>,
	) -> Self {
		Self {
			apps,
			producers,
			installer,
			fixture: DEFAULT_INITIAL_FIXTURE.to_string(),
		}
	}

	/// Installs `fixture` instead of the default initial fixture.
	pub fn with_fixture(mut self, fixture: impl Into<String>) -> Self {
		self.fixture = fixture.into();
		self
	}

	/// Name the fixture step is announced under: the fixture name up to its
	/// first underscore (`sitetree_menus` is announced as `sitetree`).
	pub fn fixture_label(&self) -> &str {
		self.fixture.split('_').next().unwrap_or(&self.fixture)
	}

	/// Runs the command.
	///
	/// Returns `Ok(None)` when the operator does not confirm. Otherwise every
	/// step runs and `Ok(Some(report))` describes their outcomes; step
	/// failures are reported, not returned.
	///
	/// # Errors
	///
	/// Fails before anything is written to the datastore if the `app_label`
	/// option names an application that is not installed. Terminal I/O
	/// errors are also returned.
	pub async fn run(&self, ctx: &CommandContext) -> CommandResult<Option<SeedReport>> {
		if !self.confirm(ctx)? {
			tracing::debug!("create_initial_data cancelled by operator");
			return Ok(None);
		}

		let app_label = ctx.option("app_label").map(String::as_str);
		let producers = discover_producers(&self.apps, &self.producers, app_label)?;

		let fixture = self.install_fixture(ctx).await?;

		let mut apps = IndexMap::new();
		for (label, producer) in producers {
			let outcome = self.run_producer(ctx, &label, producer.as_ref()).await?;
			apps.insert(label, outcome);
		}

		Ok(Some(SeedReport { fixture, apps }))
	}

	fn confirm(&self, ctx: &CommandContext) -> CommandResult<bool> {
		let answer = ctx.input().ask(ctx.output(), PROMPT)?;
		Ok(matches!(
			answer.as_deref().map(str::trim),
			Some("y") | Some("yes")
		))
	}

	async fn install_fixture(&self, ctx: &CommandContext) -> CommandResult<StepOutcome> {
		announce(ctx, self.fixture_label())?;

		let outcome = match self.installer.install(&self.fixture, 0).await {
			Ok(result) => StepOutcome::Done {
				value: json!({
					"records_loaded": result.records_loaded,
					"fixtures_loaded": result.fixtures_loaded,
				}),
			},
			Err(e) => {
				tracing::warn!(fixture = %self.fixture, error = %e, "initial fixture failed");
				StepOutcome::failed(e.kind(), e.to_string())
			}
		};

		report(ctx, &outcome, false)?;
		Ok(outcome)
	}

	async fn run_producer(
		&self,
		ctx: &CommandContext,
		label: &str,
		producer: &dyn InitialDataProducer,
	) -> CommandResult<StepOutcome> {
		announce(ctx, label)?;

		let outcome = match AssertUnwindSafe(producer.create()).catch_unwind().await {
			Ok(Ok(value)) => StepOutcome::Done { value },
			Ok(Err(e)) => failure(label, e),
			Err(panic) => failure(label, ProducerError::from_panic(panic)),
		};

		report(ctx, &outcome, true)?;
		Ok(outcome)
	}
}

fn failure(label: &str, error: ProducerError) -> StepOutcome {
	tracing::warn!(app = label, error = %error, "initial data producer failed");
	StepOutcome::failed(error.kind(), error.message())
}

fn announce(ctx: &CommandContext, label: &str) -> std::io::Result<()> {
	if ctx.verbosity() == 0 {
		return Ok(());
	}
	ctx.output()
		.write_inline(&format!("Creating initial data for '{}'... ", label))
}

fn report(ctx: &CommandContext, outcome: &StepOutcome, show_value: bool) -> std::io::Result<()> {
	let output = ctx.output();
	match outcome {
		StepOutcome::Failed { kind, message } => {
			output.write(&output.style(Style::Error, &format!("{}: {}", kind, message)))
		}
		StepOutcome::Done { value } => {
			if ctx.verbosity() == 0 {
				return Ok(());
			}
			output.write(&output.style(Style::Success, "DONE"))?;
			if show_value && ctx.verbosity() >= 2 {
				let pretty =
					serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
				output.write(&pretty)?;
			}
			Ok(())
		}
	}
}

#[async_trait]
impl BaseCommand for CreateInitialDataCommand {
	fn name(&self) -> &str {
		"create_initial_data"
	}

	fn description(&self) -> &str {
		"Create initial data by using factories"
	}

	fn options(&self) -> Vec<CommandOption> {
		vec![
			CommandOption::option(None, "app_label", "Only create data for this app"),
			CommandOption::option(Some('v'), "verbosity", "Verbosity level (0-3)")
				.with_default("1"),
		]
	}

	async fn execute(&self, ctx: &CommandContext) -> CommandResult<()> {
		self.run(ctx).await.map(|_| ())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use seedling_seeding::fixtures::LoadResult;
	use seedling_seeding::SeedingResult;

	struct NoopInstaller;

	#[async_trait]
	impl FixtureInstaller for NoopInstaller {
		async fn install(&self, _fixture: &str, _verbosity: u8) -> SeedingResult<LoadResult> {
			Ok(LoadResult::default())
		}
	}

	fn command() -> CreateInitialDataCommand {
		CreateInitialDataCommand::new(
			Apps::new(vec![]),
			ProducerRegistry::new(),
			Arc::new(NoopInstaller),
		)
	}

	#[rstest]
	#[case(DEFAULT_INITIAL_FIXTURE, "sitetree")]
	#[case("menus", "menus")]
	#[case("blog_posts_2024", "blog")]
	fn test_fixture_label(#[case] fixture: &str, #[case] expected: &str) {
		assert_eq!(command().with_fixture(fixture).fixture_label(), expected);
	}

	#[rstest]
	fn test_report_helpers() {
		let mut apps = IndexMap::new();
		apps.insert("pages".to_string(), StepOutcome::Done { value: Value::Null });
		apps.insert("boxes".to_string(), StepOutcome::failed("Panic", "boom"));
		let report = SeedReport {
			fixture: StepOutcome::Done { value: Value::Null },
			apps,
		};

		assert!(!report.is_success());
		assert_eq!(report.failed_apps(), vec!["boxes"]);
	}

	#[rstest]
	fn test_metadata() {
		let cmd = command();
		assert_eq!(cmd.name(), "create_initial_data");
		assert_eq!(
			cmd.usage(),
			"create_initial_data [--app_label <APP_LABEL>] [--verbosity <VERBOSITY>]"
		);
	}
}
