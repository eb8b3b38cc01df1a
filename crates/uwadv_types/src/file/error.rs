//! Error types for file format parsing.

use std::fmt;

use thiserror::Error;

/// Kind of game file an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
	/// Main palettes, `data/pals.dat`
	Palette,
	/// Auxiliary palettes, `data/allpals.dat`
	AuxPalette,
	/// `.gr` image container
	Gr,
	/// `.byt` raw image
	Byt,
	/// Critter animation page file, `<base>.nNN`
	CritterPage,
	/// Critter association table, `crit/assoc.anm`
	Assoc,
	/// Anything else
	Other,
}

impl fmt::Display for FileType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Palette => write!(f, "palette"),
			Self::AuxPalette => write!(f, "auxiliary palette"),
			Self::Gr => write!(f, "GR image"),
			Self::Byt => write!(f, "BYT image"),
			Self::CritterPage => write!(f, "critter page file"),
			Self::Assoc => write!(f, "critter association table"),
			Self::Other => write!(f, "file"),
		}
	}
}

/// Unified error type for all Underworld file formats.
///
/// Only files the game cannot run without produce one of these. Damaged
/// image data is repaired or skipped while decoding and never shows up here.
#[derive(Debug, Error)]
pub enum UwFileError {
	/// A required file does not exist
	#[error("could not open {file_type}: {path}")]
	NotFound {
		/// Kind of file that was requested
		file_type: FileType,
		/// Relative path as requested
		path: String,
	},

	/// A required file is shorter than its fixed layout
	#[error("insufficient {file_type} data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Kind of file being parsed
		file_type: FileType,
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Functionality the original game data needs but which is not available
	#[error("not implemented: {feature}")]
	NotImplemented {
		/// Short description of the missing feature
		feature: &'static str,
	},

	/// IO error
	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl UwFileError {
	/// Shorthand for a [`UwFileError::NotFound`] error.
	pub fn not_found(file_type: FileType, path: impl Into<String>) -> Self {
		Self::NotFound {
			file_type,
			path: path.into(),
		}
	}

	/// Returns `true` if the error means "the data ended early".
	pub fn is_eof(&self) -> bool {
		matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
	}
}
