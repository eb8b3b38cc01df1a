//! Access to game files by their path relative to the game folder.
//!
//! Importers never touch the file system directly; they ask a
//! [`ResourceProvider`]. `uwadv_vfs` provides the on-disk implementation,
//! [`MemoryResources`] keeps everything in memory.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::file::{ByteSource, FileType, UwFileError};

/// Which game the data files belong to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
	/// Ultima Underworld 1 (including the demo)
	#[default]
	Uw1,
	/// Ultima Underworld 2
	Uw2,
}

impl fmt::Display for GameType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Uw1 => write!(f, "uw1"),
			Self::Uw2 => write!(f, "uw2"),
		}
	}
}

/// Maps a relative game file name to the form it is looked up with.
///
/// Game files are matched case-insensitively with `/` as separator.
pub fn normalize_path(relative_path: &str) -> String {
	relative_path.replace('\\', "/").to_lowercase()
}

/// Source of game files.
pub trait ResourceProvider {
	/// Returns `true` if the file exists.
	fn is_available(&self, relative_path: &str) -> bool;

	/// Opens a file. A missing file is a [`UwFileError::NotFound`] error.
	fn open(&self, relative_path: &str) -> Result<ByteSource, UwFileError>;

	/// Game the files belong to.
	fn game(&self) -> GameType;

	/// Returns `true` for the uw1 demo data set.
	fn is_uw_demo(&self) -> bool;

	/// Returns `true` if the files belong to uw2.
	fn is_uw2(&self) -> bool {
		self.game() == GameType::Uw2
	}

	/// Opens a file, mapping "not found" to `None`.
	fn try_open(&self, relative_path: &str) -> Result<Option<ByteSource>, UwFileError> {
		if !self.is_available(relative_path) {
			return Ok(None);
		}
		self.open(relative_path).map(Some)
	}
}

/// Game files held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
	files: HashMap<String, Vec<u8>>,
	game: GameType,
	uw_demo: bool,
}

impl MemoryResources {
	/// Creates an empty uw1 file set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the game type.
	pub fn with_game(mut self, game: GameType) -> Self {
		self.game = game;
		self
	}

	/// Marks the file set as uw1 demo data.
	pub fn with_uw_demo(mut self, uw_demo: bool) -> Self {
		self.uw_demo = uw_demo;
		self
	}

	/// Adds or replaces a file.
	pub fn insert(&mut self, relative_path: &str, data: Vec<u8>) {
		self.files.insert(normalize_path(relative_path), data);
	}

	/// Builder-style variant of [`MemoryResources::insert`].
	pub fn with_file(mut self, relative_path: &str, data: Vec<u8>) -> Self {
		self.insert(relative_path, data);
		self
	}

	/// Number of files.
	pub fn len(&self) -> usize {
		self.files.len()
	}

	/// Returns `true` if there are no files.
	pub fn is_empty(&self) -> bool {
		self.files.is_empty()
	}
}

impl ResourceProvider for MemoryResources {
	fn is_available(&self, relative_path: &str) -> bool {
		self.files.contains_key(&normalize_path(relative_path))
	}

	fn open(&self, relative_path: &str) -> Result<ByteSource, UwFileError> {
		let key = normalize_path(relative_path);
		let data = self
			.files
			.get(&key)
			.ok_or_else(|| UwFileError::not_found(FileType::Other, relative_path))?;

		let name = key.rsplit('/').next().unwrap_or(&key).to_string();
		Ok(ByteSource::from_bytes(name, data.clone()))
	}

	fn game(&self) -> GameType {
		self.game
	}

	fn is_uw_demo(&self) -> bool {
		self.uw_demo
	}
}
