#![doc = include_str!("../README.md")]

pub mod commands;
pub mod config;
pub mod credentials;
pub mod directory;
pub mod errors;
pub mod prelude;
pub mod terminal;
pub mod traits;
pub mod types;

pub(crate) mod adb;
pub(crate) mod client;
pub(crate) mod dump_util;
pub(crate) mod shell;

pub type Result<T> = std::result::Result<T, errors::AdbError>;
