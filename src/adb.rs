use std::ffi::OsStr;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};

use simple_cmd::debug::CommandDebug;
use simple_cmd::Cmd;
use tracing::trace;
use which::which;

use crate::errors::AdbError;
use crate::traits::CommandRunner;
use crate::types::Adb;

impl Adb {
	/// Locates `adb` in the PATH
	pub fn new() -> crate::Result<Adb> {
		let adb = which("adb")?;
		Ok(Adb(adb))
	}

	pub fn from(path: &Path) -> crate::Result<Adb> {
		if !path.exists() {
			return Err(AdbError::WhichError(which::Error::CannotFindBinaryPath));
		}
		Ok(Adb(path.to_path_buf()))
	}

	pub fn as_os_str(&self) -> &OsStr {
		self.as_ref()
	}
}

impl CommandRunner for Adb {
	fn output(&self, args: Vec<String>) -> crate::Result<Output> {
		let output = Cmd::builder(self.0.as_path()).args(args).with_debug(true).build().output()?;
		trace!("output: {:?}", output);
		Ok(output)
	}

	fn attach(&self, args: Vec<String>) -> crate::Result<ExitStatus> {
		Ok(Command::new(self.as_os_str()).args(args).debug().status()?)
	}
}

impl std::fmt::Display for Adb {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.0.to_str())
	}
}

impl Debug for Adb {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		self.0.fmt(f)
	}
}

impl AsRef<OsStr> for Adb {
	fn as_ref(&self) -> &OsStr {
		self.0.as_ref()
	}
}

impl From<Adb> for PathBuf {
	fn from(value: Adb) -> Self {
		value.0
	}
}

#[cfg(test)]
mod test {
	use std::path::{Path, PathBuf};

	use crate::errors::AdbError;
	use crate::traits::CommandRunner;
	use crate::types::Adb;

	#[test]
	fn test_from_missing_path() {
		let result = Adb::from(Path::new("/this/path/does/not/exist/adb"));
		assert!(matches!(result, Err(AdbError::WhichError(_))));
	}

	#[test]
	fn test_debug_display() {
		let exe = std::env::current_exe().unwrap();
		let adb = Adb::from(exe.as_path()).unwrap();

		assert_eq!(exe.to_str(), adb.as_ref().to_str());
		assert_eq!(format!("{:?}", exe.to_str()), adb.to_string());
		assert_eq!(format!("{exe:#?}"), format!("{adb:#?}"));
		assert_eq!(exe, adb.as_os_str());

		let path: PathBuf = adb.into();
		assert_eq!(exe, path);
	}

	#[test]
	fn test_output() {
		crate::test::test::init_log();
		let echo = Adb::from(Path::new("/bin/echo")).unwrap();
		let output = echo.output(vec!["devices".to_string(), "-l".to_string()]).unwrap();
		assert_eq!("devices -l\n", String::from_utf8_lossy(&output.stdout));
	}

	#[test]
	fn test_attach() {
		let adb = Adb::from(Path::new("/bin/sh")).unwrap();
		let status = adb.attach(vec!["-c".to_string(), "exit 3".to_string()]).unwrap();
		assert_eq!(Some(3), status.code());
	}
}
