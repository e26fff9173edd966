use std::process::{ExitStatus, Output};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdbError {
	#[error(transparent)]
	WhichError(#[from] which::Error),

	#[error(transparent)]
	CommandError(#[from] simple_cmd::Error),

	#[error(transparent)]
	IoError(#[from] std::io::Error),

	#[error(transparent)]
	SerdeError(#[from] serde_json::Error),

	#[error("`adb {command}` failed ({status}): {message}")]
	FailedCommandError {
		command: String,
		status: ExitStatus,
		message: String,
	},

	#[error("No devices found")]
	NoDevicesError,

	#[error("Application not running")]
	AppNotRunningError(String),

	#[error("malformed line `{line}`: expected at least {expected} fields, found {found}")]
	MalformedOutputError { line: String, expected: usize, found: usize },

	#[error("device {serial} is {state}")]
	DeviceStateError { serial: String, state: String },

	#[error("missing `{key}` in `{line}`")]
	MissingFieldError { key: &'static str, line: String },

	#[error("battery level not reported by `{0}`")]
	BatteryLevelNotFound(String),

	#[error("selection {0} is not in range 1 - {1}")]
	InvalidSelectionError(usize, usize),

	#[error("input closed")]
	InputClosedError,

	#[error("unable to find the user home directory")]
	HomeDirNotFound,
}

impl AdbError {
	/// Conditions reported to the user on stdout instead of as failures
	pub fn is_user_facing(&self) -> bool {
		matches!(self, AdbError::NoDevicesError | AdbError::AppNotRunningError(_))
	}
}

/// Turns a non-zero exit status into [AdbError::FailedCommandError].
/// The message is the trimmed stderr, or stdout when stderr is empty.
pub(crate) fn check_output(args: &[String], output: Output) -> crate::Result<Output> {
	if output.status.success() {
		return Ok(output);
	}

	let stderr = String::from_utf8_lossy(&output.stderr);
	let message = match stderr.trim() {
		"" => String::from_utf8_lossy(&output.stdout).trim().to_string(),
		stderr => stderr.to_string(),
	};
	Err(AdbError::FailedCommandError {
		command: args.join(" "),
		status: output.status,
		message,
	})
}
