use std::process::Output;

use crate::traits::CommandRunner;
use crate::types::{KeyCode, Shell};

/// Single-quotes `text` for the device shell, which re-parses the joined
/// command line. Embedded quotes become `'\''`.
pub(crate) fn quote(text: &str) -> String {
	format!("'{}'", text.replace('\'', "'\\''"))
}

impl<'a, R: CommandRunner> Shell<'a, R> {
	/// executes custom command over the shell interface
	pub fn exec<I, T>(&self, args: I) -> crate::Result<Output>
	where
		I: IntoIterator<Item = T>,
		T: Into<String>,
	{
		let mut shell_args = vec!["shell".to_string()];
		shell_args.extend(args.into_iter().map(Into::into));
		self.parent.exec(shell_args)
	}

	/// Runs `dumpsys <service>` and returns its output lines
	pub fn dumpsys(&self, service: &str) -> crate::Result<Vec<String>> {
		let output = self.exec(["dumpsys", service])?;
		Ok(String::from_utf8_lossy(&output.stdout).lines().map(str::to_string).collect())
	}

	/// Process list of the device
	pub fn ps(&self) -> crate::Result<String> {
		let output = self.exec(["ps"])?;
		Ok(String::from_utf8_lossy(&output.stdout).into_owned())
	}

	pub fn send_tap(&self, position: (i32, i32)) -> crate::Result<()> {
		self.exec([
			"input".to_string(),
			"tap".to_string(),
			position.0.to_string(),
			position.1.to_string(),
		])?;
		Ok(())
	}

	pub fn send_text(&self, text: &str) -> crate::Result<()> {
		self.exec(["input".to_string(), "text".to_string(), quote(text)])?;
		Ok(())
	}

	pub fn send_keyevent(&self, keycode: KeyCode) -> crate::Result<()> {
		self.exec(["input", "keyevent", keycode.into()])?;
		Ok(())
	}

	pub fn save_screencap(&self, path: &str) -> crate::Result<Output> {
		self.exec(["/system/bin/screencap", path])
	}

	pub fn rm(&self, path: &str) -> crate::Result<Output> {
		self.exec(["rm", path])
	}
}

#[cfg(test)]
mod test {
	use std::process::Command;

	use crate::shell::quote;
	use crate::test::test::MockRunner;
	use crate::types::{Client, KeyCode};

	#[test]
	fn test_dumpsys() {
		let runner = MockRunner::new().with_stdout("dumpsys battery", "Current Battery Service state:\n  level: 42\n");
		let client = Client::new(&runner, "ABC123");
		let lines = client.shell().dumpsys("battery").unwrap();
		assert_eq!(vec!["Current Battery Service state:", "  level: 42"], lines);
	}

	#[test]
	fn test_input() {
		let runner = MockRunner::new();
		let client = Client::new(&runner, "emulator-5554");
		let shell = client.shell();
		shell.send_tap((10, 20)).unwrap();
		shell.send_text("hello world").unwrap();
		shell.send_keyevent(KeyCode::KEYCODE_ENTER).unwrap();

		assert_eq!(
			vec![
				"-s emulator-5554 shell input tap 10 20",
				"-s emulator-5554 shell input text 'hello world'",
				"-s emulator-5554 shell input keyevent KEYCODE_ENTER",
			],
			runner.commands()
		);
	}

	#[test]
	fn test_send_text_is_not_expanded() {
		let password = "pa$$w0rd `id` it's \\ $HOME";
		let runner = MockRunner::new();
		let client = Client::new(&runner, "ABC123");
		client.shell().send_text(password).unwrap();
		assert_eq!(
			vec!["-s ABC123 shell input text 'pa$$w0rd `id` it'\\''s \\ $HOME'"],
			runner.commands()
		);

		// the device shell sees the same text
		let output = Command::new("/bin/sh")
			.args(["-c", format!("printf %s {}", quote(password)).as_str()])
			.output()
			.unwrap();
		assert_eq!(password, String::from_utf8_lossy(&output.stdout));
	}
}
