//! Terminal output for management commands.
//!
//! Commands never print directly. Everything operator-facing goes through an
//! [`OutputWrapper`], which writes to stdout in the `manage` binary and to an
//! in-memory buffer in tests.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use colored::Colorize;

/// Semantic style of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
	/// Confirmation prompts and cautions.
	Warning,
	/// Failures.
	Error,
	/// Completed steps.
	Success,
	/// Informational notes.
	Notice,
}

#[derive(Debug)]
enum Sink {
	Stdout,
	Buffer(Vec<u8>),
}

/// Styled writer shared by the commands of one invocation.
#[derive(Debug)]
pub struct OutputWrapper {
	sink: Mutex<Sink>,
	color: bool,
}

impl OutputWrapper {
	/// Writes to standard output, with colour.
	pub fn stdout() -> Self {
		Self {
			sink: Mutex::new(Sink::Stdout),
			color: true,
		}
	}

	/// Collects output in memory, without colour.
	pub fn buffer() -> Self {
		Self {
			sink: Mutex::new(Sink::Buffer(Vec::new())),
			color: false,
		}
	}

	/// Enables or disables ANSI styling.
	pub fn with_color(mut self, color: bool) -> Self {
		self.color = color;
		self
	}

	/// Returns true if styling is applied.
	pub fn color(&self) -> bool {
		self.color
	}

	/// Writes `msg` followed by a newline.
	pub fn write(&self, msg: &str) -> io::Result<()> {
		self.emit(msg, true)
	}

	/// Writes `msg` without a line terminator and flushes, so the text is
	/// visible before a long-running step starts.
	pub fn write_inline(&self, msg: &str) -> io::Result<()> {
		self.emit(msg, false)
	}

	/// Applies `style` to `msg`.
	pub fn style(&self, style: Style, msg: &str) -> String {
		if !self.color {
			return msg.to_string();
		}
		match style {
			Style::Warning => msg.yellow().bold().to_string(),
			Style::Error => msg.red().bold().to_string(),
			Style::Success => msg.green().bold().to_string(),
			Style::Notice => msg.cyan().to_string(),
		}
	}

	/// Returns everything written so far to a buffer sink.
	///
	/// Always empty for [`stdout`](Self::stdout).
	pub fn contents(&self) -> String {
		match &*self.sink.lock().unwrap_or_else(PoisonError::into_inner) {
			Sink::Stdout => String::new(),
			Sink::Buffer(buf) => String::from_utf8_lossy(buf).into_owned(),
		}
	}

	fn emit(&self, msg: &str, newline: bool) -> io::Result<()> {
		let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
		match &mut *sink {
			Sink::Stdout => {
				let mut out = io::stdout().lock();
				out.write_all(msg.as_bytes())?;
				if newline {
					out.write_all(b"\n")?;
				}
				out.flush()
			}
			Sink::Buffer(buf) => {
				buf.extend_from_slice(msg.as_bytes());
				if newline {
					buf.push(b'\n');
				}
				Ok(())
			}
		}
	}
}
