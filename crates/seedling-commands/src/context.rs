//! Command execution context

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::input::{LineReader, StdinReader};
use crate::output::{OutputWrapper, Style};

#[derive(Clone)]
pub struct CommandContext {
	pub args: Vec<String>,
	pub options: HashMap<String, Vec<String>>,
	pub verbosity: u8,
	output: Arc<OutputWrapper>,
	input: Arc<dyn LineReader>,
}

impl CommandContext {
	/// Context writing to stdout and reading from stdin, at verbosity 1.
	pub fn new(args: Vec<String>) -> Self {
		Self {
			args,
			options: HashMap::new(),
			verbosity: 1,
			output: Arc::new(OutputWrapper::stdout()),
			input: Arc::new(StdinReader),
		}
	}

	pub fn with_args(mut self, args: Vec<String>) -> Self {
		self.args = args;
		self
	}

	pub fn with_options(mut self, options: HashMap<String, Vec<String>>) -> Self {
		self.options = options;
		self
	}

	pub fn with_output(mut self, output: Arc<OutputWrapper>) -> Self {
		self.output = output;
		self
	}

	pub fn with_input(mut self, input: Arc<dyn LineReader>) -> Self {
		self.input = input;
		self
	}

	pub fn with_verbosity(mut self, level: u8) -> Self {
		self.verbosity = level;
		self
	}

	pub fn arg(&self, index: usize) -> Option<&String> {
		self.args.get(index)
	}

	pub fn option(&self, key: &str) -> Option<&String> {
		self.options.get(key).and_then(|v| v.first())
	}

	pub fn option_values(&self, key: &str) -> Option<Vec<String>> {
		self.options.get(key).cloned()
	}

	pub fn has_option(&self, key: &str) -> bool {
		self.options.contains_key(key)
	}

	pub fn set_option(&mut self, key: String, value: String) {
		self.options.insert(key, vec![value]);
	}

	pub fn set_option_multi(&mut self, key: String, values: Vec<String>) {
		self.options.insert(key, values);
	}

	/// Add an argument to the context
	pub fn add_arg(&mut self, arg: String) {
		self.args.push(arg);
	}

	/// Set the verbosity level
	pub fn set_verbosity(&mut self, level: u8) {
		self.verbosity = level;
	}

	/// Get the verbosity level
	pub fn verbosity(&self) -> u8 {
		self.verbosity
	}

	pub fn output(&self) -> &OutputWrapper {
		&self.output
	}

	pub fn input(&self) -> &dyn LineReader {
		self.input.as_ref()
	}

	/// Writes a notice line when verbosity is above 0.
	pub fn info(&self, message: &str) -> std::io::Result<()> {
		if self.verbosity == 0 {
			return Ok(());
		}
		self.output.write(&self.output.style(Style::Notice, message))
	}

	/// Writes an error line regardless of verbosity.
	pub fn error(&self, message: &str) -> std::io::Result<()> {
		self.output.write(&self.output.style(Style::Error, message))
	}
}

impl Default for CommandContext {
	fn default() -> Self {
		Self::new(Vec::new())
	}
}

impl fmt::Debug for CommandContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CommandContext")
			.field("args", &self.args)
			.field("options", &self.options)
			.field("verbosity", &self.verbosity)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_options() {
		let mut ctx = CommandContext::default();
		ctx.set_option("app_label".to_string(), "boxes".to_string());
		ctx.set_option_multi(
			"app".to_string(),
			vec!["boxes".to_string(), "pages".to_string()],
		);
		ctx.add_arg("sitetree_menus".to_string());

		assert_eq!(ctx.option("app_label").map(String::as_str), Some("boxes"));
		assert_eq!(ctx.option_values("app").map(|v| v.len()), Some(2));
		assert!(!ctx.has_option("ignore-missing"));
		assert_eq!(ctx.arg(0).map(String::as_str), Some("sitetree_menus"));
	}

	#[rstest]
	fn test_info_respects_verbosity_but_error_does_not() {
		let output = Arc::new(OutputWrapper::buffer());
		let ctx = CommandContext::default()
			.with_output(Arc::clone(&output))
			.with_verbosity(0);

		ctx.info("Installed 3 object(s)").unwrap();
		ctx.error("ModelNotFound: boxes.Box").unwrap();

		assert_eq!(output.contents(), "ModelNotFound: boxes.Box\n");
	}
}
