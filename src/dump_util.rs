use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::AdbError;
use crate::types::Device;

static DEVICES_HEADER: &str = "List of devices attached";
static DEVICE_FIELDS: usize = 6;

lazy_static! {
	static ref RE_WHITESPACES: Regex = Regex::new("\\s+").unwrap();
}

/// Collapses every whitespace run into a single space and splits on it
fn columns(line: &str) -> Vec<&str> {
	let line = line.trim();
	if line.is_empty() {
		return vec![];
	}
	RE_WHITESPACES.split(line).collect()
}

/// Parses the output of `adb devices -l`
pub(crate) fn devices(output: &str) -> crate::Result<Vec<Device>> {
	output
		.lines()
		.filter(|line| !line.trim().is_empty())
		.filter(|line| !line.starts_with('*'))
		.filter(|line| line.trim() != DEVICES_HEADER)
		.map(device)
		.collect()
}

/// Parses a single device line:
/// `ABC123  device usb:1-1 product:sunfish model:Pixel_4a transport_id:1`
///
/// An incomplete line of a device which is not ready (`unauthorized`,
/// `offline`, ...) is reported as [AdbError::DeviceStateError].
pub(crate) fn device(line: &str) -> crate::Result<Device> {
	let fields = columns(line);
	let state = fields.iter().skip(1).take_while(|field| !field.contains(':')).join(" ");
	device_fields(line, &fields).map_err(|err| {
		if state.is_empty() || state == "device" {
			err
		} else {
			AdbError::DeviceStateError {
				serial: fields[0].to_string(),
				state,
			}
		}
	})
}

fn device_fields(line: &str, fields: &[&str]) -> crate::Result<Device> {
	if fields.len() < DEVICE_FIELDS {
		return Err(AdbError::MalformedOutputError {
			line: line.to_string(),
			expected: DEVICE_FIELDS,
			found: fields.len(),
		});
	}

	let properties = &fields[2..];
	let value = |key: &'static str| properties.iter().find_map(|field| field.strip_prefix(key)).map(str::to_string);
	let required = |key: &'static str| {
		value(key).ok_or_else(|| AdbError::MissingFieldError {
			key,
			line: line.to_string(),
		})
	};

	Ok(Device {
		serial: fields[0].to_string(),
		kind: fields[1].to_string(),
		usb: value("usb:"),
		product: required("product:")?,
		model: required("model:")?,
		transport_id: required("transport_id:")?,
	})
}

/// Extracts the battery level from the output of `dumpsys battery`
pub(crate) fn battery_level<'a, I>(lines: I) -> Option<String>
where
	I: IntoIterator<Item = &'a str>,
{
	lines
		.into_iter()
		.find(|line| line.contains("level"))
		.map(|line| line.trim().replacen("level:", "", 1).trim().to_string())
}

/// Finds the pid of `package` in the output of `ps`.
/// The pid is the second column of the first line mentioning the package.
pub(crate) fn pid_of(ps: &str, package: &str) -> crate::Result<Option<String>> {
	match ps.lines().find(|line| line.contains(package)) {
		None => Ok(None),
		Some(line) => {
			let fields = columns(line);
			match fields.get(1) {
				Some(pid) => Ok(Some(pid.to_string())),
				None => Err(AdbError::MalformedOutputError {
					line: line.to_string(),
					expected: 2,
					found: fields.len(),
				}),
			}
		}
	}
}

#[cfg(test)]
mod test {
	use crate::errors::AdbError;
	use crate::types::Device;

	static DEVICES_OUTPUT: &str = "List of devices attached
ABC123  device usb:1-1 product:sunfish model:Pixel_4a transport_id:1
emulator-5554          device usb:2-3 product:sdk_gphone64 model:sdk_gphone64_arm64 device:emu64a transport_id:7

";

	#[test]
	fn test_single_device() {
		let devices = super::devices(
			"List of devices attached\nABC123  device usb:1-1 product:sunfish model:Pixel_4a transport_id:1\n",
		)
		.unwrap();
		assert_eq!(
			vec![Device {
				serial: "ABC123".to_string(),
				kind: "device".to_string(),
				usb: Some("1-1".to_string()),
				product: "sunfish".to_string(),
				model: "Pixel_4a".to_string(),
				transport_id: "1".to_string(),
			}],
			devices
		);
	}

	#[test]
	fn test_devices() {
		let devices = super::devices(DEVICES_OUTPUT).unwrap();
		assert_eq!(2, devices.len());

		let emulator = &devices[1];
		assert_eq!("emulator-5554", emulator.serial);
		assert_eq!(Some("2-3"), emulator.usb.as_deref());
		assert_eq!("sdk_gphone64", emulator.product);
		assert_eq!("sdk_gphone64_arm64", emulator.model);
		assert_eq!("7", emulator.transport_id);
	}

	#[test]
	fn test_no_devices() {
		assert!(super::devices("List of devices attached\n\n").unwrap().is_empty());
		assert!(super::devices("").unwrap().is_empty());
	}

	#[test]
	fn test_daemon_notices() {
		let output = "* daemon not running; starting now at tcp:5037
* daemon started successfully
List of devices attached
ABC123 device usb:1-1 product:sunfish model:Pixel_4a transport_id:1
";
		let devices = super::devices(output).unwrap();
		assert_eq!(1, devices.len());
		assert_eq!("ABC123", devices[0].serial);
	}

	#[test]
	fn test_tcpip_device() {
		let device =
			super::device("192.168.1.24:5555 device product:sunfish model:Pixel_4a device:sunfish transport_id:3").unwrap();
		assert_eq!("192.168.1.24:5555", device.serial);
		assert_eq!(None, device.usb);
		assert_eq!("3", device.transport_id);
	}

	#[test]
	fn test_short_line() {
		let result = super::device("ABC123 device usb:1-1 transport_id:2");
		match result {
			Err(AdbError::MalformedOutputError { expected, found, .. }) => {
				assert_eq!(6, expected);
				assert_eq!(4, found);
			}
			other => panic!("unexpected result: {other:?}"),
		}

		let result = super::devices("List of devices attached\nABC123 device usb:1-1 product:sunfish model:Pixel_4a\n");
		assert!(matches!(result, Err(AdbError::MalformedOutputError { found: 5, .. })));
	}

	#[test]
	fn test_device_not_ready() {
		let result = super::device("ABC123 unauthorized usb:1-1 transport_id:2");
		assert!(matches!(
			result,
			Err(AdbError::DeviceStateError { serial, state }) if serial == "ABC123" && state == "unauthorized"
		));

		let result = super::devices(
			"List of devices attached\nABC123  device usb:1-1 product:sunfish model:Pixel_4a transport_id:1\nemulator-5556 offline transport_id:4\n",
		);
		match result {
			Err(err) => assert_eq!("device emulator-5556 is offline", err.to_string()),
			other => panic!("unexpected result: {other:?}"),
		}

		// a complete line keeps its state
		let device =
			super::device("ABC123 recovery usb:1-1 product:sunfish model:Pixel_4a device:sunfish transport_id:1").unwrap();
		assert_eq!("recovery", device.kind);
	}

	#[test]
	fn test_missing_key() {
		let result = super::device("ABC123 device usb:1-1 product:sunfish name:Pixel_4a transport_id:1");
		assert!(matches!(result, Err(AdbError::MissingFieldError { key: "model:", .. })));
	}

	#[test]
	fn test_battery_level() {
		let lines = vec![
			"Current Battery Service state:",
			"  AC powered: false",
			"  level: 85",
			"  scale: 100",
		];
		assert_eq!(Some("85".to_string()), super::battery_level(lines));
		assert_eq!(None, super::battery_level(vec!["  scale: 100"]));
	}

	#[test]
	fn test_pid_of() {
		let ps = "USER           PID  PPID     VSZ    RSS WCHAN            ADDR S NAME
root             1     0 10913484 12800 0                   0 S init
u0_a212      12034   612 14567232 98112 0                   0 S com.example.app
";
		assert_eq!(Some("12034".to_string()), super::pid_of(ps, "com.example.app").unwrap());
		assert_eq!(None, super::pid_of(ps, "com.example.missing").unwrap());
		assert!(super::pid_of("com.example.app", "com.example.app").is_err());
	}
}
