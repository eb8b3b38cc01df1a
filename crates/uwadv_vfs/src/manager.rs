//! On-disk game file lookup.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use uwadv_types::file::{ByteSource, FileType, UwFileError};
use uwadv_types::resource::{GameType, ResourceProvider, normalize_path};

use crate::{Settings, VfsError};

/// File only present in uw2
const UW2_PROBE_FILE: &str = "data/scd.ark";

/// Opens game files below the configured game folder.
///
/// Names are looked up case-insensitively, so `data/pals.dat` finds
/// `DATA/PALS.DAT` on case-sensitive file systems.
#[derive(Debug, Clone)]
pub struct ResourceManager {
	root: PathBuf,
	game: GameType,
	uw_demo: bool,
}

impl ResourceManager {
	/// Creates a manager for the folder named in `settings`.
	///
	/// # Errors
	///
	/// Fails if the folder does not exist.
	pub fn new(settings: &Settings) -> Result<Self, VfsError> {
		let root = settings.underworld_path.clone();
		if !root.is_dir() {
			return Err(VfsError::MissingRoot {
				path: root,
			});
		}

		info!("using game folder {} ({})", root.display(), settings.game);
		Ok(Self {
			root,
			game: settings.game,
			uw_demo: settings.uw1_is_uwdemo,
		})
	}

	/// Game folder.
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Guesses the game from the folder contents.
	pub fn detect_game(&self) -> GameType {
		if self.is_available(UW2_PROBE_FILE) {
			GameType::Uw2
		} else {
			GameType::Uw1
		}
	}

	/// Full path of a game file, if it exists.
	pub fn resolve(&self, relative_path: &str) -> Option<PathBuf> {
		let mut path = self.root.clone();
		for component in normalize_path(relative_path).split('/').filter(|c| !c.is_empty()) {
			path = find_entry(&path, component)?;
		}
		path.is_file().then_some(path)
	}
}

/// Finds `name` in `dir`, ignoring ASCII case.
fn find_entry(dir: &Path, name: &str) -> Option<PathBuf> {
	let exact = dir.join(name);
	if exact.exists() {
		return Some(exact);
	}

	fs::read_dir(dir)
		.ok()?
		.filter_map(Result::ok)
		.find(|entry| entry.file_name().to_string_lossy().eq_ignore_ascii_case(name))
		.map(|entry| entry.path())
}

impl ResourceProvider for ResourceManager {
	fn is_available(&self, relative_path: &str) -> bool {
		self.resolve(relative_path).is_some()
	}

	fn open(&self, relative_path: &str) -> Result<ByteSource, UwFileError> {
		let path = self.resolve(relative_path).ok_or_else(|| UwFileError::not_found(FileType::Other, relative_path))?;
		debug!("opening {}", path.display());
		Ok(ByteSource::open(path)?)
	}

	fn game(&self) -> GameType {
		self.game
	}

	fn is_uw_demo(&self) -> bool {
		self.uw_demo
	}
}
