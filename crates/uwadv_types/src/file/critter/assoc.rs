//! Critter association table (`crit/assoc.anm`).
//!
//! ```text
//! Size    Field
//! ------  ------------------------------------------------
//! 32 × 8  animation names, NUL padded; empty = no animation
//! 64 × 2  per critter: animation number, auxiliary palette
//! ```

use crate::file::{ByteSource, FileType, UwFileError};

/// Number of animation names
pub const ANIMATION_COUNT: usize = 32;

/// Number of critters
pub const CRITTER_COUNT: usize = 64;

const NAME_LEN: usize = 8;

/// Retail file name
pub const FILE_NAME: &str = "crit/assoc.anm";

/// Demo file name
pub const DEMO_FILE_NAME: &str = "crit/dassoc.anm";

/// Animation used by one critter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AssocEntry {
	/// Animation number, also the page file number
	pub animation: u8,
	/// Auxiliary palette the frames are decoded with
	pub aux_palette: u8,
}

/// Parsed association table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssocFile {
	names: [[u8; NAME_LEN]; ANIMATION_COUNT],
	entries: [AssocEntry; CRITTER_COUNT],
}

impl AssocFile {
	/// Size of the file in bytes
	pub const FILE_SIZE: usize = ANIMATION_COUNT * NAME_LEN + CRITTER_COUNT * 2;

	/// Name of the table for the retail game or the demo.
	pub fn file_name(uw_demo: bool) -> &'static str {
		if uw_demo {
			DEMO_FILE_NAME
		} else {
			FILE_NAME
		}
	}

	/// Parses the table. A short file is an error.
	pub fn from_source(src: &mut ByteSource) -> Result<Self, UwFileError> {
		let data = src.read_buffer(Self::FILE_SIZE);
		if data.len() < Self::FILE_SIZE {
			return Err(UwFileError::InsufficientData {
				file_type: FileType::Assoc,
				expected: Self::FILE_SIZE,
				actual: data.len(),
			});
		}

		let (name_data, entry_data) = data.split_at(ANIMATION_COUNT * NAME_LEN);

		let mut names = [[0u8; NAME_LEN]; ANIMATION_COUNT];
		for (name, chunk) in names.iter_mut().zip(name_data.chunks_exact(NAME_LEN)) {
			name.copy_from_slice(chunk);
		}

		let mut entries = [AssocEntry::default(); CRITTER_COUNT];
		for (entry, pair) in entries.iter_mut().zip(entry_data.chunks_exact(2)) {
			*entry = AssocEntry {
				animation: pair[0],
				aux_palette: pair[1],
			};
		}

		Ok(Self {
			names,
			entries,
		})
	}

	/// Returns `true` if the animation has a name and so has page files.
	pub fn has_animation(&self, animation: u8) -> bool {
		self.names.get(usize::from(animation)).is_some_and(|name| name[0] != 0)
	}

	/// Animation name without padding.
	pub fn animation_name(&self, animation: u8) -> Option<String> {
		let name = self.names.get(usize::from(animation))?;
		let len = name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
		(len > 0).then(|| String::from_utf8_lossy(&name[..len]).into_owned())
	}

	/// All critter entries.
	pub fn entries(&self) -> &[AssocEntry; CRITTER_COUNT] {
		&self.entries
	}
}

/// Page file base name of an animation, e.g. `crit/cr10page` for 8.
///
/// The number is written in octal.
pub fn page_file_base(animation: u8) -> String {
	format!("crit/cr{animation:02o}page")
}
