use std::process::{ExitStatus, Output};

use itertools::Itertools;

use crate::types::Table;

/// Runs the device bridge tool
pub trait CommandRunner {
	/// Runs the bridge with `args` and captures its output
	fn output(&self, args: Vec<String>) -> crate::Result<Output>;

	/// Runs the bridge with `args` attached to the current terminal and
	/// waits for it to exit
	fn attach(&self, args: Vec<String>) -> crate::Result<ExitStatus>;
}

/// Interactive terminal used to render tables and collect answers
pub trait Terminal {
	fn print_table(&mut self, table: &Table) -> crate::Result<()>;

	fn say(&mut self, message: &str) -> crate::Result<()>;

	/// Asks a free-form question. Returns [crate::errors::AdbError::InputClosedError] once the input is exhausted.
	fn ask(&mut self, prompt: &str) -> crate::Result<String>;

	/// Keeps asking `prompt` until the answer is one of `limited_to`
	fn ask_limited(&mut self, prompt: &str, limited_to: &[String]) -> crate::Result<String> {
		loop {
			let answer = self.ask(prompt)?;
			if limited_to.iter().any(|choice| *choice == answer) {
				return Ok(answer);
			}
			self.say(&format!(
				"Your response must be one of: [{}]. Please try again.",
				limited_to.iter().join(", ")
			))?;
		}
	}
}

