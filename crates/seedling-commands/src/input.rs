//! Line-oriented operator input.

use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal};
use std::sync::{Mutex, PoisonError};

use dialoguer::Input;

use crate::output::{OutputWrapper, Style};

/// Source of operator answers.
pub trait LineReader: Send + Sync {
	/// Reads one line without its terminator.
	///
	/// Returns `Ok(None)` at end of input.
	fn read_line(&self) -> io::Result<Option<String>>;

	/// Shows `prompt` on `output` and reads the answer.
	fn ask(&self, output: &OutputWrapper, prompt: &str) -> io::Result<Option<String>> {
		output.write_inline(&output.style(Style::Warning, prompt))?;
		self.read_line()
	}
}

/// Reads from standard input.
///
/// On a terminal the answer is read through a `dialoguer` text prompt.
/// Piped input is read line by line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinReader;

impl StdinReader {
	fn interact(&self, output: &OutputWrapper, prompt: &str) -> io::Result<Option<String>> {
		let (preamble, question) = split_prompt(prompt);
		if !preamble.is_empty() {
			output.write(&output.style(Style::Warning, preamble))?;
		}

		match Input::<String>::new()
			.with_prompt(question)
			.allow_empty(true)
			.interact_text()
		{
			Ok(answer) => Ok(Some(answer)),
			Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
			Err(e) => Err(io::Error::other(e)),
		}
	}
}

/// Splits a prompt into the lines shown before the question and the question
/// itself, without the trailing `": "` the prompt theme adds back.
fn split_prompt(prompt: &str) -> (&str, &str) {
	let (preamble, question) = prompt.rsplit_once('\n').unwrap_or(("", prompt));
	(preamble, question.trim_end().trim_end_matches(':'))
}

impl LineReader for StdinReader {
	fn ask(&self, output: &OutputWrapper, prompt: &str) -> io::Result<Option<String>> {
		if io::stdin().is_terminal() {
			return self.interact(output, prompt);
		}
		output.write_inline(&output.style(Style::Warning, prompt))?;
		self.read_line()
	}

	fn read_line(&self) -> io::Result<Option<String>> {
		let mut line = String::new();
		if io::stdin().lock().read_line(&mut line)? == 0 {
			return Ok(None);
		}
		let trimmed = line.trim_end_matches(['\n', '\r']).len();
		line.truncate(trimmed);
		Ok(Some(line))
	}
}

/// Replays a fixed list of answers, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedReader {
	lines: Mutex<VecDeque<String>>,
}

impl ScriptedReader {
	/// Creates a reader that answers with `lines` in order.
	pub fn new<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			lines: Mutex::new(lines.into_iter().map(Into::into).collect()),
		}
	}

	/// Number of answers not yet consumed.
	pub fn remaining(&self) -> usize {
		self.lines
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.len()
	}
}

impl LineReader for ScriptedReader {
	fn read_line(&self) -> io::Result<Option<String>> {
		Ok(self
			.lines
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.pop_front())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_scripted_reader_replays_then_ends() {
		let reader = ScriptedReader::new(["yes", "no"]);
		assert_eq!(reader.read_line().unwrap().as_deref(), Some("yes"));
		assert_eq!(reader.remaining(), 1);
		assert_eq!(reader.read_line().unwrap().as_deref(), Some("no"));
		assert_eq!(reader.read_line().unwrap(), None);
	}

	#[rstest]
	fn test_ask_writes_prompt_then_reads() {
		let output = OutputWrapper::buffer();
		let reader = ScriptedReader::new(["y"]);

		let answer = reader.ask(&output, "Continue? ").unwrap();

		assert_eq!(answer.as_deref(), Some("y"));
		assert_eq!(output.contents(), "Continue? ");
	}

	#[rstest]
	#[case("Note.\nType 'y' to continue: ", "Note.", "Type 'y' to continue")]
	#[case("Type 'y' to continue: ", "", "Type 'y' to continue")]
	#[case("One.\nTwo.\nAnswer", "One.\nTwo.", "Answer")]
	fn test_split_prompt(#[case] prompt: &str, #[case] preamble: &str, #[case] question: &str) {
		assert_eq!(split_prompt(prompt), (preamble, question));
	}
}
