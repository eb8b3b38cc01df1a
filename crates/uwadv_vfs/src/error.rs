//! Error type for game folder access.

use std::path::PathBuf;

use thiserror::Error;
use uwadv_types::file::UwFileError;

/// Errors raised while locating the game folder.
#[derive(Debug, Error)]
pub enum VfsError {
	/// Settings could not be read or parsed
	#[error("invalid settings: {0}")]
	Config(#[from] config::ConfigError),

	/// The configured game folder does not exist
	#[error("underworld folder not found: {}", path.display())]
	MissingRoot {
		/// Configured folder
		path: PathBuf,
	},

	/// Error from a game file
	#[error(transparent)]
	File(#[from] UwFileError),
}
