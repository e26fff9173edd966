use std::path::PathBuf;

use clap::{Parser, Subcommand};

use adb_extended::config::CONFIG_DIR_ENV;
use adb_extended::types::LogcatLevel;

/// A few adb shortcuts: device picker, credentials injection, multi-device install and screenshots
#[derive(Parser, Debug)]
#[command(name = "adb-extended", version)]
pub(crate) struct Cli {
	/// Configuration directory (default: ~/.adb_extended)
	#[arg(long, global = true, env = CONFIG_DIR_ENV, value_name = "DIR")]
	pub config_dir: Option<PathBuf>,

	/// adb executable to use instead of the one in the PATH
	#[arg(long, global = true, value_name = "PATH")]
	pub adb: Option<PathBuf>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
	/// Lists the Android devices with a little more info
	Devices {
		/// Show the battery level of each device
		#[arg(long)]
		battery: bool,

		/// Choose one of the devices and print its serial
		#[arg(long)]
		select_device: bool,
	},

	/// Lists the devices and allows you to choose one to run the shell on
	Ashell,

	/// Allows entry of usernames and passwords and will inject it into the login screen of the selected device
	Login {
		/// Inject on every attached device
		#[arg(long)]
		all: bool,
	},

	/// Lists the devices and allows you to choose one to run with pidcat
	Pidcat {
		package: Option<String>,

		#[arg(short, long, value_enum, ignore_case = true, default_value = "D")]
		level: LogcatLevel,
	},

	/// Lists the devices and allows you to choose one to run with logcat
	Logcat {
		package: Option<String>,

		#[arg(short, long, value_enum, default_value = "D")]
		level: LogcatLevel,
	},

	/// Installs the provided apk on the selected device
	Install {
		path: PathBuf,

		/// Install on every attached device
		#[arg(long)]
		all: bool,
	},

	/// Uninstalls the provided package on the selected device
	Uninstall {
		package: String,

		/// Uninstall from every attached device
		#[arg(long)]
		all: bool,
	},

	/// Takes a screenshot on the selected device (or all devices)
	Screencap {
		/// Take a screenshot on every attached device
		#[arg(long)]
		all: bool,

		/// Directory where the screenshots are saved
		#[arg(short, long, value_name = "DIR", default_value = ".")]
		output: PathBuf,
	},
}

#[cfg(test)]
mod test {
	use clap::{CommandFactory, Parser};

	use adb_extended::types::LogcatLevel;

	use crate::cli::{Cli, Commands};

	#[test]
	fn test_verify() {
		Cli::command().debug_assert();
	}

	#[test]
	fn test_pidcat_level_ignores_case() {
		let cli = Cli::try_parse_from(["adb-extended", "pidcat", "com.example.app", "-l", "w"]).unwrap();
		match cli.command {
			Commands::Pidcat { package, level } => {
				assert_eq!(Some("com.example.app".to_string()), package);
				assert_eq!(LogcatLevel::Warn, level);
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn test_logcat_level_is_uppercase() {
		assert!(Cli::try_parse_from(["adb-extended", "logcat", "-l", "w"]).is_err());
		let cli = Cli::try_parse_from(["adb-extended", "logcat"]).unwrap();
		assert!(matches!(cli.command, Commands::Logcat { package: None, level: LogcatLevel::Debug }));
	}

	#[test]
	fn test_global_flags() {
		let cli = Cli::try_parse_from(["adb-extended", "install", "app.apk", "--all", "--config-dir", "/tmp/x", "-v"]).unwrap();
		assert!(cli.verbose);
		assert_eq!(Some(std::path::PathBuf::from("/tmp/x")), cli.config_dir);
		assert!(matches!(cli.command, Commands::Install { all: true, .. }));
	}
}
