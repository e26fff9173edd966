use tracing::debug;

use crate::dump_util;
use crate::errors::{check_output, AdbError};
use crate::terminal::select_index;
use crate::traits::{CommandRunner, Terminal};
use crate::types::{Client, Device, Table};

/// Discovers the attached devices and picks one of them
#[derive(Debug)]
pub struct DeviceDirectory<'a, R> {
	runner: &'a R,
}

impl<'a, R: CommandRunner> DeviceDirectory<'a, R> {
	pub fn new(runner: &'a R) -> Self {
		DeviceDirectory { runner }
	}

	/// Attached devices, in the order reported by `adb devices -l`.
	/// An empty list means no device is attached.
	pub fn list(&self) -> crate::Result<Vec<Device>> {
		let args = vec!["devices".to_string(), "-l".to_string()];
		let output = check_output(&args, self.runner.output(args.clone())?)?;
		let devices = dump_util::devices(&String::from_utf8_lossy(&output.stdout))?;
		debug!("found {} devices", devices.len());
		Ok(devices)
	}

	/// Battery level of the device with the given serial
	pub fn battery_level(&self, serial: &str) -> crate::Result<String> {
		Client::new(self.runner, serial).battery_level()
	}

	/// Lists the devices and lets the user choose one of them
	pub fn pick<T: Terminal + ?Sized>(&self, terminal: &mut T) -> crate::Result<String> {
		let devices = self.list()?;
		select(&devices, terminal)
	}
}

/// Table with the `# Model Serial` columns
pub fn device_table(devices: &[Device]) -> Table {
	let mut table = Table::new(["#", "Model", "Serial"]);
	for (index, device) in devices.iter().enumerate() {
		table.add_row([(index + 1).to_string(), device.model.clone(), device.serial.clone()]);
	}
	table
}

/// Returns the serial of the only device, or asks the user to choose one.
/// Fails with [AdbError::NoDevicesError] when `devices` is empty.
pub fn select<T: Terminal + ?Sized>(devices: &[Device], terminal: &mut T) -> crate::Result<String> {
	match devices {
		[] => Err(AdbError::NoDevicesError),
		[device] => Ok(device.serial.clone()),
		_ => {
			terminal.print_table(&device_table(devices))?;
			let prompt = format!("Select a device (1 - {}):", devices.len());
			let index = select_index(terminal, &prompt, devices.len())?;
			devices
				.get(index - 1)
				.map(|device| device.serial.clone())
				.ok_or(AdbError::InvalidSelectionError(index, devices.len()))
		}
	}
}
