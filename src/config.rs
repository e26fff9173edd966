use std::path::{Path, PathBuf};

use crate::errors::AdbError;
use crate::types::{Adb, Config};

/// Default configuration directory name, inside the user home
pub static CONFIG_DIR_NAME: &str = ".adb_extended";

/// Environment variable overriding the configuration directory
pub static CONFIG_DIR_ENV: &str = "ADB_EXTENDED_HOME";

pub static CREDENTIALS_FILE_NAME: &str = "app_users.json";

impl Config {
	pub fn new<P: Into<PathBuf>>(home: P) -> Self {
		Config {
			home: home.into(),
			adb: None,
		}
	}

	/// `~/.adb_extended`
	pub fn default_home() -> crate::Result<PathBuf> {
		dirs::home_dir()
			.map(|home| home.join(CONFIG_DIR_NAME))
			.ok_or(AdbError::HomeDirNotFound)
	}

	/// Uses the given adb executable instead of looking it up in the PATH
	pub fn with_adb<P: Into<PathBuf>>(mut self, adb: Option<P>) -> Self {
		self.adb = adb.map(Into::into);
		self
	}

	pub fn home(&self) -> &Path {
		&self.home
	}

	pub fn credentials_file(&self) -> PathBuf {
		self.home.join(CREDENTIALS_FILE_NAME)
	}

	pub fn adb(&self) -> crate::Result<Adb> {
		match &self.adb {
			Some(path) => Adb::from(path),
			None => Adb::new(),
		}
	}
}
