pub use crate::credentials::CredentialStore;
pub use crate::directory::DeviceDirectory;
pub use crate::errors::AdbError;
pub use crate::terminal::Console;
pub use crate::traits::{CommandRunner, Terminal};
pub use crate::types::{Adb, Client, Config, Credential, Device, LogcatLevel, Table};
