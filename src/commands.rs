//! One function per command line subcommand.
//!
//! Every command resolves its target through [DeviceDirectory] and then runs
//! the device-scoped [Client] operations, one device at a time.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::credentials::CredentialStore;
use crate::directory::{device_table, select, DeviceDirectory};
use crate::errors::AdbError;
use crate::traits::{CommandRunner, Terminal};
use crate::types::{Client, Device, LogcatLevel};

fn all_devices<R: CommandRunner>(runner: &R) -> crate::Result<Vec<Device>> {
	let devices = DeviceDirectory::new(runner).list()?;
	if devices.is_empty() {
		return Err(AdbError::NoDevicesError);
	}
	Ok(devices)
}

fn say_output<T: Terminal + ?Sized>(terminal: &mut T, stdout: &[u8]) -> crate::Result<()> {
	let text = String::from_utf8_lossy(stdout);
	let text = text.trim_end();
	if !text.is_empty() {
		terminal.say(text)?;
	}
	Ok(())
}

/// Prints the attached devices, optionally with their battery level
pub fn devices<R, T>(runner: &R, terminal: &mut T, battery: bool, select_device: bool) -> crate::Result<()>
where
	R: CommandRunner,
	T: Terminal + ?Sized,
{
	let directory = DeviceDirectory::new(runner);
	let devices = directory.list()?;

	let mut table = device_table(&devices);
	if battery {
		table.push_header("Battery");
		for (row, device) in table.rows.iter_mut().zip(&devices) {
			let level = directory.battery_level(&device.serial).unwrap_or_else(|err| {
				warn!("unable to read the battery level of {}: {}", device.serial, err);
				"?".to_string()
			});
			row.push(level);
		}
	}
	terminal.print_table(&table)?;

	if select_device {
		let serial = select(&devices, terminal)?;
		terminal.say(&serial)?;
	}
	Ok(())
}

/// Opens an interactive shell on the chosen device
pub fn ashell<R, T>(runner: &R, terminal: &mut T) -> crate::Result<()>
where
	R: CommandRunner,
	T: Terminal + ?Sized,
{
	let serial = DeviceDirectory::new(runner).pick(terminal)?;
	Client::new(runner, &serial).interactive_shell()?;
	Ok(())
}

/// Picks (or creates) a stored credential and types it in the login screen
/// of the chosen device, or of every device when `all` is set
pub fn login<R, T>(runner: &R, terminal: &mut T, store: &mut CredentialStore, all: bool) -> crate::Result<()>
where
	R: CommandRunner,
	T: Terminal + ?Sized,
{
	let credential = store.choose(terminal)?;

	let serials: Vec<String> = if all {
		all_devices(runner)?.into_iter().map(|device| device.serial).collect()
	} else {
		vec![DeviceDirectory::new(runner).pick(terminal)?]
	};

	for serial in serials {
		info!("logging in {} on {}", credential.username, serial);
		Client::new(runner, &serial).enter_credential(&credential);
	}
	Ok(())
}

/// Streams the log of the chosen device, restricted to `package` when given
pub fn logcat<R, T>(runner: &R, terminal: &mut T, level: LogcatLevel, package: Option<&str>) -> crate::Result<()>
where
	R: CommandRunner,
	T: Terminal + ?Sized,
{
	let serial = DeviceDirectory::new(runner).pick(terminal)?;
	let client = Client::new(runner, &serial);
	let pid = match package {
		Some(package) => Some(client.pid_of(package)?),
		None => None,
	};
	client.logcat(level, pid.as_deref())?;
	Ok(())
}

/// Streams the log of the chosen device through `pidcat`
pub fn pidcat<R, T>(runner: &R, terminal: &mut T, level: LogcatLevel, package: Option<&str>) -> crate::Result<()>
where
	R: CommandRunner,
	T: Terminal + ?Sized,
{
	let serial = DeviceDirectory::new(runner).pick(terminal)?;
	Client::new(runner, &serial).pidcat(level, package)?;
	Ok(())
}

pub fn install<R, T>(runner: &R, terminal: &mut T, path: &Path, all: bool) -> crate::Result<()>
where
	R: CommandRunner,
	T: Terminal + ?Sized,
{
	if all {
		for device in all_devices(runner)? {
			terminal.say(&format!("Installing on {}", device.model))?;
			let output = Client::new(runner, &device.serial).install(path)?;
			say_output(terminal, &output.stdout)?;
		}
	} else {
		let serial = DeviceDirectory::new(runner).pick(terminal)?;
		let output = Client::new(runner, &serial).install(path)?;
		say_output(terminal, &output.stdout)?;
	}
	Ok(())
}

pub fn uninstall<R, T>(runner: &R, terminal: &mut T, package: &str, all: bool) -> crate::Result<()>
where
	R: CommandRunner,
	T: Terminal + ?Sized,
{
	if all {
		for device in all_devices(runner)? {
			terminal.say(&format!("Uninstalling from {}", device.model))?;
			let output = Client::new(runner, &device.serial).uninstall(package)?;
			say_output(terminal, &output.stdout)?;
		}
	} else {
		let serial = DeviceDirectory::new(runner).pick(terminal)?;
		let output = Client::new(runner, &serial).uninstall(package)?;
		say_output(terminal, &output.stdout)?;
	}
	Ok(())
}

/// `screen-<timestamp>.png`, or `screen-<timestamp>-<model>.png` when a model is given
pub fn screencap_file_name(timestamp: &DateTime<Local>, model: Option<&str>) -> String {
	let timestamp = timestamp.format("%Y%m%d-%H%M%S");
	match model {
		Some(model) => format!("screen-{timestamp}-{model}.png"),
		None => format!("screen-{timestamp}.png"),
	}
}

/// Takes a screenshot of the chosen device (or of every device) and saves it in `output_dir`.
/// Returns the written files.
pub fn screencap<R, T>(
	runner: &R,
	terminal: &mut T,
	output_dir: &Path,
	all: bool,
	timestamp: DateTime<Local>,
) -> crate::Result<Vec<PathBuf>>
where
	R: CommandRunner,
	T: Terminal + ?Sized,
{
	let mut files = vec![];
	if all {
		for device in all_devices(runner)? {
			terminal.say(&format!("Taking screenshot on {}", device.model))?;
			let file = output_dir.join(screencap_file_name(&timestamp, Some(&device.model)));
			let output = Client::new(runner, &device.serial).screencap(&file)?;
			say_output(terminal, &output.stdout)?;
			files.push(file);
		}
	} else {
		let serial = DeviceDirectory::new(runner).pick(terminal)?;
		let file = output_dir.join(screencap_file_name(&timestamp, None));
		let output = Client::new(runner, &serial).screencap(&file)?;
		say_output(terminal, &output.stdout)?;
		files.push(file);
	}
	Ok(files)
}
