//! `.gr` image container support.
//!
//! # File Structure
//!
//! ```text
//! Offset  Size        Field
//! ------  ----------  --------------------------------------
//! 0x00    1           format id, always 1
//! 0x01    2           number of entries
//! 0x03    4 × count   absolute offset of every entry
//! ```
//!
//! Every entry starts with a small header:
//!
//! ```text
//! Size  Field
//! ----  ------------------------------------------------------
//! 1     image type (0x04, 0x08 or 0x0A)
//! 1     width
//! 1     height
//! 1     auxiliary palette id, only for types 0x08 and 0x0A
//! 2     payload length (bytes for 0x04 and 0x0A, symbols for 0x08)
//! ```
//!
//! `panels.gr` has the offset table but no entry headers; all its entries are
//! uncompressed 83×114 images (79×112 in uw2).
//!
//! # Damaged data
//!
//! Legacy installs are often incomplete. An out-of-range index falls back to
//! entry 0, an offset past the end of the file means the image is absent and
//! unknown image types decode to an all-zero image. None of these are errors.

use std::io::{self, SeekFrom};

use log::{debug, warn};

use crate::file::rle::{RleDecoder, SymbolWidth};
use crate::file::{AuxPalettes, ByteSource, IndexedImage, UwFileError};
use crate::resource::GameType;

/// Format id stored in the first byte
pub const FORMAT_ID: u8 = 1;

/// Largest chunk copied at once for uncompressed images
const COPY_CHUNK: usize = 1024;

/// Image type stored in an entry header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
	/// 8 bits per pixel, uncompressed
	Raw8,
	/// 4-bit run-length encoded
	Rle4,
	/// 4 bits per pixel, uncompressed
	Raw4,
	/// Anything else; decodes to an empty image
	Unknown(u8),
}

impl ImageType {
	/// Parses the type byte.
	pub const fn from_u8(value: u8) -> Self {
		match value {
			0x04 => Self::Raw8,
			0x08 => Self::Rle4,
			0x0A => Self::Raw4,
			other => Self::Unknown(other),
		}
	}

	/// Returns `true` if the header carries an auxiliary palette id.
	pub const fn has_aux_palette(self) -> bool {
		matches!(self, Self::Rle4 | Self::Raw4)
	}
}

/// Shape of the per-entry header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrLayout {
	/// Entries start with a type/size header
	Standard,
	/// Entries are headerless uncompressed images of a fixed size
	Panels {
		/// Width of every entry
		width: u8,
		/// Height of every entry
		height: u8,
	},
}

impl GrLayout {
	/// Picks the layout for a file name; only `panels.gr` is special.
	pub fn for_file(file_name: &str, game: GameType) -> Self {
		if !file_name.to_ascii_lowercase().ends_with("panels.gr") {
			return Self::Standard;
		}

		match game {
			GameType::Uw1 => Self::Panels {
				width: 83,
				height: 114,
			},
			GameType::Uw2 => Self::Panels {
				width: 79,
				height: 112,
			},
		}
	}
}

/// Decoded entry header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryHeader {
	/// Image type
	pub image_type: ImageType,
	/// Width in pixels
	pub width: u8,
	/// Height in pixels
	pub height: u8,
	/// Auxiliary palette id, already clamped to 0..=31
	pub aux_palette: u8,
	/// Payload length
	pub data_len: u16,
}

impl EntryHeader {
	/// Reads the header at the current position.
	pub fn from_source(src: &mut ByteSource, layout: GrLayout) -> io::Result<Self> {
		if let GrLayout::Panels {
			width,
			height,
		} = layout
		{
			return Ok(Self {
				image_type: ImageType::Raw8,
				width,
				height,
				aux_palette: 0,
				data_len: u16::from(width) * u16::from(height),
			});
		}

		let image_type = ImageType::from_u8(src.read_u8()?);
		let width = src.read_u8()?;
		let height = src.read_u8()?;

		let mut aux_palette = 0;
		if image_type.has_aux_palette() {
			aux_palette = src.read_u8()?;
			if aux_palette > 0x1F {
				warn!("{}: auxiliary palette {} out of range, using 0", src.name(), aux_palette);
				aux_palette = 0;
			}
		}

		let data_len = src.read_u16()?;

		Ok(Self {
			image_type,
			width,
			height,
			aux_palette,
			data_len,
		})
	}

	/// Number of pixels the image holds.
	pub fn pixel_count(&self) -> usize {
		usize::from(self.width) * usize::from(self.height)
	}
}

/// Table of contents at the start of a `.gr` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc {
	/// Format id, expected to be [`FORMAT_ID`]
	pub format_id: u8,
	/// Absolute entry offsets
	pub offsets: Vec<u32>,
}

impl Toc {
	/// Reads the complete table of contents from the start of `src`.
	pub fn from_source(src: &mut ByteSource) -> io::Result<Self> {
		let (format_id, count) = read_toc_header(src)?;
		let offsets = (0..count).map(|_| src.read_u32()).collect::<io::Result<Vec<_>>>()?;

		Ok(Self {
			format_id,
			offsets,
		})
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.offsets.len()
	}

	/// Returns `true` if the file has no entries.
	pub fn is_empty(&self) -> bool {
		self.offsets.is_empty()
	}
}

fn read_toc_header(src: &mut ByteSource) -> io::Result<(u8, usize)> {
	src.seek(SeekFrom::Start(0))?;
	let format_id = src.read_u8()?;
	if format_id != FORMAT_ID {
		warn!("{}: unexpected format id {}", src.name(), format_id);
	}
	let count = src.read_u16()?;
	Ok((format_id, usize::from(count)))
}

/// Turns "ran out of data" into `None`, keeping other I/O errors.
fn eof_as_none<T>(result: io::Result<T>) -> io::Result<Option<T>> {
	match result {
		Ok(value) => Ok(Some(value)),
		Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
		Err(e) => Err(e),
	}
}

/// Decodes entry `index`; `Ok(None)` means the image is absent.
///
/// An index past the last entry silently decodes entry 0 instead.
pub fn decode_image(
	src: &mut ByteSource,
	index: usize,
	layout: GrLayout,
	aux_palettes: &AuxPalettes,
) -> Result<Option<IndexedImage>, UwFileError> {
	let file_len = src.len();

	let Some((_, count)) = eof_as_none(read_toc_header(src))? else {
		warn!("{}: truncated table of contents", src.name());
		return Ok(None);
	};

	let index = if index >= count {
		debug!("{}: image {} out of range ({} entries), using 0", src.name(), index, count);
		0
	} else {
		index
	};

	src.seek(SeekFrom::Current(4 * index as i64))?;
	let Some(offset) = eof_as_none(src.read_u32())? else {
		warn!("{}: truncated table of contents", src.name());
		return Ok(None);
	};

	if u64::from(offset) >= file_len {
		return Ok(None);
	}

	src.seek(SeekFrom::Start(u64::from(offset)))?;
	decode_entry(src, layout, aux_palettes)
}

/// Decodes entries `from..to`, skipping absent ones.
///
/// `to == 0` means "up to the last entry"; `to` is clamped to the entry
/// count. An empty list is returned if `from` is out of range or `to < from`.
pub fn decode_image_list(
	src: &mut ByteSource,
	from: usize,
	to: usize,
	layout: GrLayout,
	aux_palettes: &AuxPalettes,
) -> Result<Vec<IndexedImage>, UwFileError> {
	let file_len = src.len();

	let Some(toc) = eof_as_none(Toc::from_source(src))? else {
		warn!("{}: truncated table of contents", src.name());
		return Ok(Vec::new());
	};

	let to = if to == 0 {
		toc.len()
	} else {
		to.min(toc.len())
	};

	if from >= toc.len() || to < from {
		return Ok(Vec::new());
	}

	let mut images = Vec::with_capacity(to - from);
	for &offset in &toc.offsets[from..to] {
		if u64::from(offset) >= file_len {
			continue;
		}

		src.seek(SeekFrom::Start(u64::from(offset)))?;
		if let Some(image) = decode_entry(src, layout, aux_palettes)? {
			images.push(image);
		}
	}

	debug!("{}: decoded {} images", src.name(), images.len());
	Ok(images)
}

/// Decodes the entry at the current position.
fn decode_entry(
	src: &mut ByteSource,
	layout: GrLayout,
	aux_palettes: &AuxPalettes,
) -> Result<Option<IndexedImage>, UwFileError> {
	let Some(header) = eof_as_none(EntryHeader::from_source(src, layout))? else {
		warn!("{}: truncated image header at {}", src.name(), src.tell());
		return Ok(None);
	};

	let mut image = IndexedImage::new(u32::from(header.width), u32::from(header.height));
	let pixels = image.pixels_mut();
	let data_len = usize::from(header.data_len);

	match header.image_type {
		ImageType::Raw8 => {
			let mut copied = 0;
			let mut remaining = data_len.min(pixels.len());
			while remaining > 0 {
				let size = remaining.min(COPY_CHUNK);
				let read = src.read_into(&mut pixels[copied..copied + size]);
				copied += read;
				remaining -= size;
				if read < size {
					break;
				}
			}
		}

		ImageType::Rle4 => {
			let max_pixels = pixels.len();
			RleDecoder::new(SymbolWidth::Four, aux_palettes.get(header.aux_palette))
				.data_len(data_len)
				.max_pixels(max_pixels)
				.decode(src.bytes(), pixels);
		}

		ImageType::Raw4 => {
			let palette = aux_palettes.get(header.aux_palette);
			let max_pixels = pixels.len();
			let mut written = 0;

			for byte in src.bytes().take(data_len) {
				for nibble in [byte >> 4, byte & 0x0F] {
					if written >= max_pixels {
						break;
					}
					pixels[written] = palette[usize::from(nibble)];
					written += 1;
				}
				if written >= max_pixels {
					break;
				}
			}
		}

		ImageType::Unknown(value) => {
			warn!("{}: unknown image type {:#04x}, leaving image empty", src.name(), value);
		}
	}

	Ok(Some(image))
}
