use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::errors::AdbError;
use crate::terminal::select_index;
use crate::traits::Terminal;
use crate::types::{Credential, Table};

pub static ADD_NEW_USER: &str = "Add new user";

/// Usernames and passwords used to fill login screens, persisted as json
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialStore {
	path: PathBuf,
	users: IndexMap<String, Credential>,
}

impl CredentialStore {
	/// Loads the store at `path`, creating an empty file (and its parent
	/// directory) when missing
	pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
		let path = path.as_ref();
		if let Some(parent) = path.parent() {
			create_dir_all(parent)?;
		}

		let mut contents = String::new();
		OpenOptions::new()
			.read(true)
			.append(true)
			.create(true)
			.open(path)?
			.read_to_string(&mut contents)?;

		let users = if contents.trim().is_empty() {
			IndexMap::new()
		} else {
			serde_json::from_str(&contents)?
		};
		debug!("loaded {} credentials from {:?}", users.len(), path);

		Ok(CredentialStore {
			path: path.to_path_buf(),
			users,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn len(&self) -> usize {
		self.users.len()
	}

	pub fn is_empty(&self) -> bool {
		self.users.is_empty()
	}

	/// Credential at the 1-based `index`
	pub fn get(&self, index: usize) -> Option<&Credential> {
		index.checked_sub(1).and_then(|i| self.users.get_index(i)).map(|(_, credential)| credential)
	}

	/// 1-based index of the synthetic "add new user" entry
	pub fn add_new_index(&self) -> usize {
		self.users.len() + 1
	}

	/// Stored usernames with their 1-based index, followed by the
	/// "add new user" entry
	pub fn list(&self) -> Vec<(usize, String)> {
		self.users
			.values()
			.enumerate()
			.map(|(index, credential)| (index + 1, credential.username.clone()))
			.chain([(self.add_new_index(), ADD_NEW_USER.to_string())])
			.collect()
	}

	pub fn table(&self) -> Table {
		let mut table = Table::new(["#", "Username"]);
		for (index, username) in self.list() {
			table.add_row([index.to_string(), username]);
		}
		table
	}

	/// Adds or replaces the credential for its username and rewrites the file
	pub fn insert(&mut self, credential: Credential) -> crate::Result<()> {
		self.users.insert(credential.username.clone(), credential);
		self.save()
	}

	pub fn save(&self) -> crate::Result<()> {
		let mut file = File::create(&self.path)?;
		serde_json::to_writer_pretty(&mut file, &self.users)?;
		file.write_all(b"\n")?;
		trace!("saved {} credentials to {:?}", self.users.len(), self.path);
		Ok(())
	}

	/// Returns the credential at `index`, or asks for a new one when `index`
	/// is the "add new user" entry
	pub fn select_or_create<T: Terminal + ?Sized>(&mut self, index: usize, terminal: &mut T) -> crate::Result<Credential> {
		if let Some(credential) = self.get(index) {
			return Ok(credential.clone());
		}

		if index != self.add_new_index() {
			return Err(AdbError::InvalidSelectionError(index, self.add_new_index()));
		}

		let username = terminal.ask("Enter a username:")?;
		let password = terminal.ask("Enter a password:")?;
		let credential = Credential { username, password };
		self.insert(credential.clone())?;
		Ok(credential)
	}

	/// Shows the stored accounts and lets the user pick or add one
	pub fn choose<T: Terminal + ?Sized>(&mut self, terminal: &mut T) -> crate::Result<Credential> {
		terminal.print_table(&self.table())?;
		let count = self.add_new_index();
		let index = select_index(terminal, &format!("Select an account to login (1 - {count}):"), count)?;
		self.select_or_create(index, terminal)
	}
}
