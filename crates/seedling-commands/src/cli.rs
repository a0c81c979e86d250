//! CLI runner for seedling management commands
//!
//! Parses the command line, loads settings, builds the application registry
//! and dispatches to the registered command.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use seedling_apps::{AppConfig, AppResult, Apps};
use seedling_seeding::commands::LoadDataCommand;
use seedling_seeding::fixtures::FixtureFinder;
use seedling_seeding::initial_data::ProducerRegistry;

use crate::input::{LineReader, StdinReader};
use crate::loaddata::LoadDataManagementCommand;
use crate::output::OutputWrapper;
use crate::settings::SeedSettings;
use crate::{CommandContext, CommandRegistry, CommandResult, CreateInitialDataCommand};

/// seedling management CLI
#[derive(Debug, Parser)]
#[command(name = "manage")]
#[command(about = "seedling management interface", long_about = None)]
#[command(version)]
pub struct Cli {
	/// Subcommand to execute
	#[command(subcommand)]
	pub command: Commands,

	/// Directory holding base.toml and per-profile settings files
	#[arg(long, global = true, value_name = "DIR", default_value = "settings")]
	pub settings_dir: PathBuf,
}

/// Management commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
	/// Create initial data by using factories
	#[command(name = "create_initial_data", alias = "create-initial-data")]
	CreateInitialData {
		/// Only create initial data for this application
		#[arg(long = "app_label", alias = "app-label", value_name = "APP_LABEL")]
		app_label: Option<String>,

		/// Verbosity level: 0 errors only, 1 progress, 2 and up also created values
		#[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=3))]
		verbosity: u8,
	},

	/// Install the named fixture(s)
	Loaddata {
		/// Fixture names or paths
		#[arg(value_name = "FIXTURE", required = true)]
		fixtures: Vec<String>,

		/// Only load records of this application (repeatable)
		#[arg(short, long = "app", value_name = "APP_LABEL")]
		app_labels: Vec<String>,

		/// Skip models without a registered loader
		#[arg(long)]
		ignore_missing: bool,

		/// Verbosity level (0-3)
		#[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(0..=3))]
		verbosity: u8,
	},
}

/// Everything a command invocation needs besides its arguments.
pub struct Project {
	pub settings: SeedSettings,
	pub apps: Apps,
	pub producers: ProducerRegistry,
	pub output: Arc<OutputWrapper>,
	pub input: Arc<dyn LineReader>,
}

impl Project {
	/// Assembles a project from loaded settings.
	///
	/// Each installed application `a.b` is registered with path `a/b`, where
	/// its `fixtures/` directory is looked up.
	pub fn from_settings(settings: SeedSettings, producers: ProducerRegistry) -> AppResult<Self> {
		let apps = apps_from_settings(&settings)?;
		let output = Arc::new(OutputWrapper::stdout().with_color(settings.color));
		Ok(Self {
			settings,
			apps,
			producers,
			output,
			input: Arc::new(StdinReader),
		})
	}

	pub fn with_output(mut self, output: Arc<OutputWrapper>) -> Self {
		self.output = output;
		self
	}

	pub fn with_input(mut self, input: Arc<dyn LineReader>) -> Self {
		self.input = input;
		self
	}

	/// Builds the command registry for this project.
	pub fn commands(&self) -> CommandRegistry {
		let finder = FixtureFinder::new()
			.with_dirs(self.settings.fixture_dirs.iter().cloned())
			.with_app_dirs(&self.apps);
		let loaddata = LoadDataCommand::new(finder);

		let mut registry = CommandRegistry::new();
		registry.register(
			CreateInitialDataCommand::new(
				self.apps.clone(),
				self.producers.clone(),
				Arc::new(loaddata.clone()),
			)
			.with_fixture(self.settings.initial_fixture.clone()),
		);
		registry.register(LoadDataManagementCommand::new(loaddata));
		registry.alias("create-initial-data", "create_initial_data");
		registry
	}

	fn context(&self) -> CommandContext {
		CommandContext::default()
			.with_output(Arc::clone(&self.output))
			.with_input(Arc::clone(&self.input))
	}
}

fn apps_from_settings(settings: &SeedSettings) -> AppResult<Apps> {
	let apps = Apps::new(settings.installed_apps.clone());
	for name in &settings.installed_apps {
		apps.register(AppConfig::from_name(name.clone()).with_path(name.replace('.', "/"))?)?;
	}
	apps.populate()?;
	Ok(apps)
}

/// Execute commands from command-line arguments
///
/// This is the entry point of the `manage` binary.
///
/// # Examples
///
/// ```rust,no_run
/// use seedling_commands::execute_from_command_line;
/// use seedling_seeding::ProducerRegistry;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = execute_from_command_line(ProducerRegistry::from_inventory()).await {
///         eprintln!("Error: {}", e);
///         std::process::exit(1);
///     }
/// }
/// ```
pub async fn execute_from_command_line(producers: ProducerRegistry) -> CommandResult<()> {
	let cli = Cli::parse();
	let settings = SeedSettings::load(&cli.settings_dir)?;
	let project = Project::from_settings(settings, producers)?;
	run_command(cli.command, &project).await
}

/// Execute a parsed command against a project
pub async fn run_command(command: Commands, project: &Project) -> CommandResult<()> {
	let registry = project.commands();
	let mut ctx = project.context();

	let name = match command {
		Commands::CreateInitialData {
			app_label,
			verbosity,
		} => {
			ctx.set_verbosity(verbosity);
			if let Some(label) = app_label {
				ctx.set_option("app_label".to_string(), label);
			}
			"create_initial_data"
		}
		Commands::Loaddata {
			fixtures,
			app_labels,
			ignore_missing,
			verbosity,
		} => {
			ctx.set_verbosity(verbosity);
			for fixture in fixtures {
				ctx.add_arg(fixture);
			}
			if !app_labels.is_empty() {
				ctx.set_option_multi("app".to_string(), app_labels);
			}
			if ignore_missing {
				ctx.set_option("ignore-missing".to_string(), "true".to_string());
			}
			"loaddata"
		}
	};

	tracing::debug!(command = name, verbosity = ctx.verbosity(), "running command");
	registry.get(name)?.execute(&ctx).await
}
