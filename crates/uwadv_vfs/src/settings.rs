//! Settings needed to find and identify the game files.
//!
//! Values are layered, later sources override earlier ones:
//!
//! 1. built-in defaults
//! 2. an optional TOML file
//! 3. environment variables prefixed with `UWADV_`
//!
//! ```toml
//! underworld_path = "/games/uw1"
//! game = "uw1"
//! uw1_is_uwdemo = false
//! ```

use std::path::{Path, PathBuf};

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use uwadv_types::resource::GameType;

use crate::VfsError;

/// Prefix of environment variables that override settings
pub const ENV_PREFIX: &str = "UWADV";

/// Game folder settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Folder the game is installed in
	pub underworld_path: PathBuf,

	/// Which game the folder contains
	pub game: GameType,

	/// The folder holds the uw1 demo
	pub uw1_is_uwdemo: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			underworld_path: PathBuf::from("."),
			game: GameType::Uw1,
			uw1_is_uwdemo: false,
		}
	}
}

impl Settings {
	/// Creates settings for a game folder.
	pub fn new(underworld_path: impl Into<PathBuf>, game: GameType) -> Self {
		Self {
			underworld_path: underworld_path.into(),
			game,
			uw1_is_uwdemo: false,
		}
	}

	/// Builder-style setter for the demo flag.
	pub fn with_uwdemo(mut self, uw1_is_uwdemo: bool) -> Self {
		self.uw1_is_uwdemo = uw1_is_uwdemo;
		self
	}

	/// Loads settings from defaults, `config_file` (if given and present) and
	/// the environment.
	pub fn load(config_file: Option<&Path>) -> Result<Self, VfsError> {
		let mut builder = Config::builder();
		if let Some(path) = config_file {
			builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
		}
		Self::finish(builder.add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true)))
	}

	/// Parses settings from TOML text, without looking at the environment.
	pub fn from_toml_str(text: &str) -> Result<Self, VfsError> {
		Self::finish(Config::builder().add_source(File::from_str(text, FileFormat::Toml)))
	}

	fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, VfsError> {
		let settings: Self = builder.build()?.try_deserialize()?;
		log::debug!(
			"settings: {} at {}{}",
			settings.game,
			settings.underworld_path.display(),
			if settings.uw1_is_uwdemo {
				" (demo)"
			} else {
				""
			}
		);
		Ok(settings)
	}
}
