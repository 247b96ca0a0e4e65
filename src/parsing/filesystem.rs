/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::config::config_file::Config;
use crate::error::WasteError;
use crate::gl::store::LedgerFile;
use anyhow::{anyhow, Error};
use dirs::home_dir;
use log::debug;
use std::fs;
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct Filesystem;

impl Filesystem {
	/// Fetches the config from the given path, or default path if none. The
	/// default file is created empty the first time it is looked for.
	pub fn get_config(
		custom_config_path: Option<&String>,
	) -> Result<Config, Error> {
		let config_path = match &custom_config_path {
			None => {
				let home_dir = home_dir().ok_or_else(|| {
					anyhow!("Unable to determine home directory")
				})?;
				home_dir.join(".config/wastelog/config.toml")
			},
			Some(p) => PathBuf::from(p),
		};

		// create empty config file if it doesn't exist
		if !config_path.exists() && custom_config_path.is_none() {
			if let Some(parent) = config_path.parent() {
				fs::create_dir_all(parent)?;
			}
			File::create(config_path.clone())?;
		}

		debug!("reading config from {}", config_path.display());
		let content = fs::read_to_string(&config_path).map_err(|e| {
			anyhow!("failed to read {}: {}", config_path.display(), e)
		})?;
		toml::from_str(&content)
			.map_err(|e| anyhow!("failed to parse config: {}", e))
	}
}

/// The ledger as a file on disk. Saves go to a temporary file in the same
/// directory which is then renamed over the old one, so a failed save never
/// leaves a half-written ledger behind.
pub struct DiskFile {
	path: PathBuf,
}

impl DiskFile {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	fn directory(&self) -> &Path {
		match self.path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent,
			_ => Path::new("."),
		}
	}
}

impl LedgerFile for DiskFile {
	fn read(&self) -> Result<Option<Vec<u8>>, WasteError> {
		match fs::read(&self.path) {
			Ok(contents) => Ok(Some(contents)),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
			Err(e) => Err(WasteError::LedgerCorrupt(format!(
				"cannot read {}: {}",
				self.path.display(),
				e
			))),
		}
	}

	fn commit(&self, contents: &[u8]) -> Result<(), WasteError> {
		let failed = |e: std::io::Error| {
			WasteError::LedgerWriteFailed(format!(
				"{}: {}",
				self.path.display(),
				e
			))
		};

		let mut tmp =
			NamedTempFile::new_in(self.directory()).map_err(failed)?;
		tmp.write_all(contents).map_err(failed)?;
		tmp.as_file().sync_all().map_err(failed)?;
		tmp.persist(&self.path).map_err(|e| failed(e.error))?;

		debug!("saved {} bytes to {}", contents.len(), self.path.display());
		Ok(())
	}
}
