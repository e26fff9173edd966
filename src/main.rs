use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

use adb_extended::commands;
use adb_extended::errors::AdbError;
use adb_extended::prelude::*;

use crate::cli::{Cli, Commands};

mod cli;

fn init_logging(verbose: bool) {
	// RUST_LOG wins over the -v flag
	let default_level = if verbose { "debug" } else { "warn" };
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
	let home = match cli.config_dir {
		Some(dir) => dir,
		None => Config::default_home()?,
	};
	let config = Config::new(home).with_adb(cli.adb);
	debug!("config: {:?}", config);

	let adb = config.adb().context("adb not found")?;
	let mut terminal = Console::stdio();

	match cli.command {
		Commands::Devices { battery, select_device } => commands::devices(&adb, &mut terminal, battery, select_device)?,
		Commands::Ashell => commands::ashell(&adb, &mut terminal)?,
		Commands::Login { all } => {
			let mut store = CredentialStore::load(config.credentials_file())
				.with_context(|| format!("unable to load {:?}", config.credentials_file()))?;
			commands::login(&adb, &mut terminal, &mut store, all)?
		}
		Commands::Pidcat { package, level } => commands::pidcat(&adb, &mut terminal, level, package.as_deref())?,
		Commands::Logcat { package, level } => commands::logcat(&adb, &mut terminal, level, package.as_deref())?,
		Commands::Install { path, all } => commands::install(&adb, &mut terminal, &path, all)?,
		Commands::Uninstall { package, all } => commands::uninstall(&adb, &mut terminal, &package, all)?,
		Commands::Screencap { all, output } => {
			let files = commands::screencap(&adb, &mut terminal, &output, all, Local::now())?;
			debug!("saved {:?}", files);
		}
	}
	Ok(())
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			match err.downcast_ref::<AdbError>() {
				Some(adb_error) if adb_error.is_user_facing() => println!("{adb_error}"),
				_ => eprintln!("Error: {err:#}"),
			}
			ExitCode::FAILURE
		}
	}
}
