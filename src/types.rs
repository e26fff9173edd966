use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

/// Path of the `adb` executable
#[derive(Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Adb(pub(crate) PathBuf);

/// A device line of `adb devices -l`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Device {
	pub serial: String,
	/// connection state, usually `device`
	pub kind: String,
	/// usb port id. Devices connected over tcp/ip do not report one.
	pub usb: Option<String>,
	pub product: String,
	pub model: String,
	pub transport_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Credential {
	pub username: String,
	pub password: String,
}

/// Device-scoped commands, issued with `-s <serial>`
#[derive(Debug)]
pub struct Client<'a, R> {
	pub(crate) runner: &'a R,
	pub(crate) serial: String,
}

#[derive(Debug)]
pub struct Shell<'a, R> {
	pub(crate) parent: &'a Client<'a, R>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Display, ValueEnum)]
pub enum LogcatLevel {
	#[value(name = "V")]
	#[strum(serialize = "V")]
	Verbose,
	#[value(name = "D")]
	#[strum(serialize = "D")]
	Debug,
	#[value(name = "I")]
	#[strum(serialize = "I")]
	Info,
	#[value(name = "W")]
	#[strum(serialize = "W")]
	Warn,
	#[value(name = "E")]
	#[strum(serialize = "E")]
	Error,
	#[value(name = "F")]
	#[strum(serialize = "F")]
	Fatal,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, IntoStaticStr)]
#[allow(non_camel_case_types)]
pub enum KeyCode {
	/// moves the focus to the next field
	KEYCODE_TAB,
	/// submits the form
	KEYCODE_ENTER,
}

/// A bordered text table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
	pub(crate) header: Vec<String>,
	pub(crate) rows: Vec<Vec<String>>,
}

/// Where the credentials file and future settings live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub home: PathBuf,
	pub adb: Option<PathBuf>,
}
