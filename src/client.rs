use std::path::Path;
use std::process::{Command, ExitStatus, Output};
use std::thread::sleep;
use std::time::Duration;

use simple_cmd::debug::CommandDebug;
use tracing::{debug, warn};
use which::which;

use crate::dump_util;
use crate::errors::{check_output, AdbError};
use crate::traits::CommandRunner;
use crate::types::{Client, Credential, KeyCode, LogcatLevel, Shell};

/// Screen position tapped to focus the first login field
pub static LOGIN_TAP: (i32, i32) = (0, 500);

/// Pause after each injection sequence
pub static INJECTION_DELAY: Duration = Duration::from_millis(100);

static DEVICE_SCREENCAP: &str = "/sdcard/screen.png";

impl<'a, R: CommandRunner> Client<'a, R> {
	pub fn new(runner: &'a R, serial: &str) -> Self {
		Client {
			runner,
			serial: serial.to_string(),
		}
	}

	pub fn serial(&self) -> &str {
		&self.serial
	}

	/// return the client shell interface
	pub fn shell(&self) -> Shell<'_, R> {
		Shell { parent: self }
	}

	pub(crate) fn args<I, T>(&self, args: I) -> Vec<String>
	where
		I: IntoIterator<Item = T>,
		T: Into<String>,
	{
		let mut result = vec!["-s".to_string(), self.serial.clone()];
		result.extend(args.into_iter().map(Into::into));
		result
	}

	pub fn exec<I, T>(&self, args: I) -> crate::Result<Output>
	where
		I: IntoIterator<Item = T>,
		T: Into<String>,
	{
		let args = self.args(args);
		check_output(&args, self.runner.output(args.clone())?)
	}

	/// Opens an interactive shell on the device
	pub fn interactive_shell(&self) -> crate::Result<ExitStatus> {
		self.runner.attach(self.args(["shell"]))
	}

	/// Installs (or replaces) the given apk
	pub fn install(&self, path: &Path) -> crate::Result<Output> {
		self.exec(["install".to_string(), "-r".to_string(), path.to_string_lossy().to_string()])
	}

	pub fn uninstall(&self, package_name: &str) -> crate::Result<Output> {
		self.exec(["uninstall", package_name])
	}

	pub fn pull(&self, src: &str, dst: &Path) -> crate::Result<Output> {
		self.exec(["pull".to_string(), src.to_string(), dst.to_string_lossy().to_string()])
	}

	/// Current battery level, as reported by `dumpsys battery`
	pub fn battery_level(&self) -> crate::Result<String> {
		let lines = self.shell().dumpsys("battery")?;
		let level = dump_util::battery_level(lines.iter().map(String::as_str))
			.ok_or_else(|| AdbError::BatteryLevelNotFound(self.serial.clone()))?;
		debug!("battery level of {}: {}", self.serial, level);
		Ok(level)
	}

	/// Pid of the running process for `package_name`.
	/// Returns [AdbError::AppNotRunningError] when no process matches.
	pub fn pid_of(&self, package_name: &str) -> crate::Result<String> {
		let ps = self.shell().ps()?;
		dump_util::pid_of(&ps, package_name)?.ok_or_else(|| AdbError::AppNotRunningError(package_name.to_string()))
	}

	/// Streams the device log at the given level, optionally restricted to a process
	pub fn logcat(&self, level: LogcatLevel, pid: Option<&str>) -> crate::Result<ExitStatus> {
		let mut args = vec!["logcat".to_string()];
		if let Some(pid) = pid {
			args.push(format!("--pid={pid}"));
		}
		args.push(format!("*:{level}"));
		self.runner.attach(self.args(args))
	}

	/// Streams the log through the external `pidcat` script
	pub fn pidcat(&self, level: LogcatLevel, package_name: Option<&str>) -> crate::Result<ExitStatus> {
		let pidcat = which("pidcat")?;
		let mut command = Command::new(pidcat);
		command.args(["-s", self.serial.as_str(), "-l", level.to_string().as_str()]);
		if let Some(package_name) = package_name {
			command.arg(package_name);
		}
		Ok(command.debug().status()?)
	}

	/// Takes a screenshot and pulls it to `dst`
	pub fn screencap(&self, dst: &Path) -> crate::Result<Output> {
		self.shell().save_screencap(DEVICE_SCREENCAP)?;
		let output = self.pull(DEVICE_SCREENCAP, dst)?;
		self.shell().rm(DEVICE_SCREENCAP)?;
		Ok(output)
	}

	/// Types `text` in the focused field of the login screen, followed by
	/// a tab (or an enter key when `submit` is set).
	/// Failures are logged and otherwise ignored.
	pub fn enter_text(&self, text: &str, submit: bool) {
		let shell = self.shell();
		let keycode = if submit { KeyCode::KEYCODE_ENTER } else { KeyCode::KEYCODE_TAB };
		if let Err(err) = shell.send_text(text).and_then(|_| shell.send_keyevent(keycode)) {
			warn!("failed to enter text on {}: {}", self.serial, err);
		}
	}

	/// Fills the login screen with the given credential
	pub fn enter_credential(&self, credential: &Credential) {
		if let Err(err) = self.shell().send_tap(LOGIN_TAP) {
			warn!("failed to tap on {}: {}", self.serial, err);
		}
		self.enter_text(&credential.username, false);
		self.enter_text(&credential.password, true);
		sleep(INJECTION_DELAY);
	}
}
