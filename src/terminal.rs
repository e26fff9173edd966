use std::fmt::{Display, Formatter};
use std::io::{BufRead, BufReader, Stdin, Stdout, Write};

use itertools::Itertools;

use crate::errors::AdbError;
use crate::traits::Terminal;
use crate::types::Table;

impl Table {
	pub fn new<I, T>(header: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: ToString,
	{
		Table {
			header: header.into_iter().map(|h| h.to_string()).collect(),
			rows: vec![],
		}
	}

	pub fn add_row<I, T>(&mut self, row: I)
	where
		I: IntoIterator<Item = T>,
		T: ToString,
	{
		self.rows.push(row.into_iter().map(|cell| cell.to_string()).collect());
	}

	pub fn push_header<T: ToString>(&mut self, column: T) {
		self.header.push(column.to_string());
	}

	pub fn rows(&self) -> &[Vec<String>] {
		&self.rows
	}

	fn widths(&self) -> Vec<usize> {
		let columns = self.rows.iter().map(Vec::len).chain([self.header.len()]).max().unwrap_or(0);
		(0..columns)
			.map(|index| {
				std::iter::once(&self.header)
					.chain(self.rows.iter())
					.filter_map(|row| row.get(index))
					.map(|cell| cell.chars().count())
					.max()
					.unwrap_or(0)
			})
			.collect()
	}
}

impl Display for Table {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let widths = self.widths();
		let separator = format!("+{}+", widths.iter().map(|w| "-".repeat(w + 2)).join("+"));
		let line = |row: &Vec<String>| {
			let cells = widths
				.iter()
				.enumerate()
				.map(|(index, width)| format!(" {:<width$} ", row.get(index).map(String::as_str).unwrap_or(""), width = *width))
				.join("|");
			format!("|{cells}|")
		};

		writeln!(f, "{separator}")?;
		writeln!(f, "{}", line(&self.header))?;
		writeln!(f, "{separator}")?;
		for row in &self.rows {
			writeln!(f, "{}", line(row))?;
		}
		write!(f, "{separator}")
	}
}

/// [Terminal] over a reader and a writer
#[derive(Debug)]
pub struct Console<I, O> {
	input: I,
	output: O,
}

impl Console<BufReader<Stdin>, Stdout> {
	pub fn stdio() -> Self {
		Console::new(BufReader::new(std::io::stdin()), std::io::stdout())
	}
}

impl<I: BufRead, O: Write> Console<I, O> {
	pub fn new(input: I, output: O) -> Self {
		Console { input, output }
	}

	pub fn into_output(self) -> O {
		self.output
	}
}

impl<I: BufRead, O: Write> Terminal for Console<I, O> {
	fn print_table(&mut self, table: &Table) -> crate::Result<()> {
		writeln!(self.output, "{table}")?;
		Ok(())
	}

	fn say(&mut self, message: &str) -> crate::Result<()> {
		writeln!(self.output, "{message}")?;
		Ok(())
	}

	fn ask(&mut self, prompt: &str) -> crate::Result<String> {
		write!(self.output, "{prompt} ")?;
		self.output.flush()?;

		let mut answer = String::new();
		if self.input.read_line(&mut answer)? == 0 {
			return Err(AdbError::InputClosedError);
		}
		Ok(answer.trim().to_string())
	}
}

/// Asks for a 1-based index in `1..=count`
pub fn select_index<T: Terminal + ?Sized>(terminal: &mut T, prompt: &str, count: usize) -> crate::Result<usize> {
	let choices = (1..=count).map(|i| i.to_string()).collect::<Vec<_>>();
	let answer = terminal.ask_limited(prompt, &choices)?;
	answer.parse::<usize>().map_err(|_| AdbError::InvalidSelectionError(0, count))
}
