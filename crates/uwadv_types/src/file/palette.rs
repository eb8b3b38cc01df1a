//! Main and auxiliary palette support.
//!
//! # Main palettes (`data/pals.dat`)
//!
//! Eight palettes of 256 colours each, stored as VGA DAC triples:
//!
//! ```text
//! 8 × 256 × (R, G, B)   each component 6 bits (0..=63)
//! ```
//!
//! Components are scaled by a plain left shift (`v << 2`, so 63 becomes 252).
//! Index 0 is transparent in every palette.
//!
//! # Auxiliary palettes (`data/allpals.dat`)
//!
//! Thirty-two tables of 16 bytes. Each byte is an index into a main palette;
//! compressed images store 4-bit values that are mapped through one of these.

use std::fmt;
use std::sync::Arc;

use crate::file::{ByteSource, FileType, UwFileError};

/// Number of main palettes in `pals.dat`
pub const MAIN_PALETTE_COUNT: usize = 8;

/// Number of auxiliary palettes in `allpals.dat`
pub const AUX_PALETTE_COUNT: usize = 32;

/// Entries per auxiliary palette
pub const AUX_PALETTE_SIZE: usize = 16;

/// RGBA color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
	/// Red component (0-255)
	pub r: u8,
	/// Green component (0-255)
	pub g: u8,
	/// Blue component (0-255)
	pub b: u8,
	/// Alpha component (0-255)
	pub a: u8,
}

impl Color {
	/// Creates a new RGBA color.
	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self {
			r,
			g,
			b,
			a,
		}
	}

	/// Creates a transparent black color.
	pub const fn transparent() -> Self {
		Self::new(0, 0, 0, 0)
	}

	/// Converts a 6-bit VGA triple. Alpha is 0 for `index` 0, 255 otherwise.
	pub const fn from_vga(index: u8, r: u8, g: u8, b: u8) -> Self {
		Self::new(r << 2, g << 2, b << 2, if index == 0 { 0 } else { 255 })
	}

	/// Returns the color as `[r, g, b, a]`.
	pub const fn to_array(self) -> [u8; 4] {
		[self.r, self.g, self.b, self.a]
	}
}

impl Default for Color {
	fn default() -> Self {
		Self::transparent()
	}
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "RGBA({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

/// 256-color palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	colors: [Color; 256],
}

impl Palette {
	/// Total palette size
	pub const PALETTE_SIZE: usize = 256;

	/// Size of one palette in `pals.dat` (256 RGB triples)
	pub const VGA_SIZE: usize = Self::PALETTE_SIZE * 3;

	/// Creates a palette with all colors transparent black.
	pub fn new() -> Self {
		Self {
			colors: [Color::transparent(); 256],
		}
	}

	/// Builds a palette from 768 bytes of 6-bit VGA triples.
	pub fn from_vga(data: &[u8]) -> Result<Self, UwFileError> {
		if data.len() < Self::VGA_SIZE {
			return Err(UwFileError::InsufficientData {
				file_type: FileType::Palette,
				expected: Self::VGA_SIZE,
				actual: data.len(),
			});
		}

		let mut palette = Self::new();
		for (i, (color, rgb)) in palette.colors.iter_mut().zip(data.chunks_exact(3)).enumerate() {
			*color = Color::from_vga(i as u8, rgb[0], rgb[1], rgb[2]);
		}
		Ok(palette)
	}

	/// Gets a color by index.
	#[inline]
	pub fn get(&self, index: u8) -> Color {
		self.colors[index as usize]
	}

	/// Returns a reference to the color array.
	#[inline]
	pub fn colors(&self) -> &[Color; 256] {
		&self.colors
	}

	/// The whole palette as 1024 packed RGBA bytes.
	pub fn to_rgba_bytes(&self) -> Vec<u8> {
		self.colors.iter().flat_map(|color| color.to_array()).collect()
	}

	/// Expands palette indices into packed RGBA bytes.
	pub fn expand(&self, indices: &[u8]) -> Vec<u8> {
		let mut out = Vec::with_capacity(indices.len() * 4);
		for &index in indices {
			out.extend_from_slice(&self.get(index).to_array());
		}
		out
	}
}

impl Default for Palette {
	fn default() -> Self {
		Self::new()
	}
}

impl std::ops::Index<u8> for Palette {
	type Output = Color;

	fn index(&self, index: u8) -> &Self::Output {
		&self.colors[index as usize]
	}
}

/// The eight main palettes, shared by every image that uses them.
#[derive(Debug, Clone)]
pub struct Palettes {
	palettes: [Arc<Palette>; MAIN_PALETTE_COUNT],
}

impl Palettes {
	/// Size of `pals.dat` in bytes
	pub const FILE_SIZE: usize = MAIN_PALETTE_COUNT * Palette::VGA_SIZE;

	/// Loads all main palettes. A short source is fatal.
	pub fn from_source(src: &mut ByteSource) -> Result<Self, UwFileError> {
		let data = src.read_buffer(Self::FILE_SIZE);
		if data.len() < Self::FILE_SIZE {
			return Err(UwFileError::InsufficientData {
				file_type: FileType::Palette,
				expected: Self::FILE_SIZE,
				actual: data.len(),
			});
		}

		let mut chunks = data.chunks_exact(Palette::VGA_SIZE);
		let mut next = || -> Result<Arc<Palette>, UwFileError> {
			let chunk = chunks.next().unwrap_or_default();
			Palette::from_vga(chunk).map(Arc::new)
		};

		Ok(Self {
			palettes: [next()?, next()?, next()?, next()?, next()?, next()?, next()?, next()?],
		})
	}

	/// Returns a shared handle to palette `index`, or `None` if out of range.
	pub fn get(&self, index: usize) -> Option<Arc<Palette>> {
		self.palettes.get(index).cloned()
	}

	/// Like [`Palettes::get`], falling back to palette 0.
	pub fn get_or_first(&self, index: usize) -> Arc<Palette> {
		Arc::clone(self.palettes.get(index).unwrap_or(&self.palettes[0]))
	}

	/// Iterates over all main palettes.
	pub fn iter(&self) -> impl Iterator<Item = &Arc<Palette>> {
		self.palettes.iter()
	}
}

impl std::ops::Index<usize> for Palettes {
	type Output = Palette;

	fn index(&self, index: usize) -> &Self::Output {
		&self.palettes[index]
	}
}

/// One auxiliary palette: 16 indices into a main palette.
pub type AuxPalette = [u8; AUX_PALETTE_SIZE];

/// All 32 auxiliary palettes from `allpals.dat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuxPalettes {
	tables: [AuxPalette; AUX_PALETTE_COUNT],
}

impl AuxPalettes {
	/// Size of `allpals.dat` in bytes
	pub const FILE_SIZE: usize = AUX_PALETTE_COUNT * AUX_PALETTE_SIZE;

	/// Loads all auxiliary palettes. A short source is fatal.
	pub fn from_source(src: &mut ByteSource) -> Result<Self, UwFileError> {
		let data = src.read_buffer(Self::FILE_SIZE);
		if data.len() < Self::FILE_SIZE {
			return Err(UwFileError::InsufficientData {
				file_type: FileType::AuxPalette,
				expected: Self::FILE_SIZE,
				actual: data.len(),
			});
		}

		let mut tables = [[0u8; AUX_PALETTE_SIZE]; AUX_PALETTE_COUNT];
		for (table, chunk) in tables.iter_mut().zip(data.chunks_exact(AUX_PALETTE_SIZE)) {
			table.copy_from_slice(chunk);
		}
		Ok(Self {
			tables,
		})
	}

	/// Identity tables, mostly useful in tests and tools.
	pub fn identity() -> Self {
		let mut table = [0u8; AUX_PALETTE_SIZE];
		for (i, entry) in table.iter_mut().enumerate() {
			*entry = i as u8;
		}
		Self {
			tables: [table; AUX_PALETTE_COUNT],
		}
	}

	/// Returns table `id`; ids above 31 fall back to table 0.
	pub fn get(&self, id: u8) -> &AuxPalette {
		self.tables.get(id as usize).unwrap_or(&self.tables[0])
	}

	/// Returns all tables.
	pub fn tables(&self) -> &[AuxPalette; AUX_PALETTE_COUNT] {
		&self.tables
	}
}
