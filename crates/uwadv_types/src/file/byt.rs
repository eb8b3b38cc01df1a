//! `.byt` full-screen images.
//!
//! A `.byt` file is a headerless 320×200 block of palette indices. The file
//! does not say which main palette to use; [`palette_index_for`] knows the
//! palette of every image shipped with the games.

use log::debug;

use crate::file::{ByteSource, FileType, IndexedImage, UwFileError};

/// Image width
pub const WIDTH: u32 = 320;

/// Image height
pub const HEIGHT: u32 = 200;

/// Number of bytes in a `.byt` image
pub const IMAGE_SIZE: usize = WIDTH as usize * HEIGHT as usize;

/// Known images and the main palette they are drawn with.
///
/// uw2 keeps its screens in `byt.ark`; those are keyed as `byt.ark:<index>`.
const PALETTE_INDICES: &[(&str, usize)] = &[
	// uw1 demo
	("dmain.byt", 0),
	("presd.byt", 5),
	// uw1
	("blnkmap.byt", 1),
	("chargen.byt", 3),
	("conv.byt", 0),
	("main.byt", 0),
	("opscr.byt", 2),
	("pres1.byt", 5),
	("pres2.byt", 5),
	("win1.byt", 7),
	("win2.byt", 7),
	// uw2
	("byt.ark:0", 1),
	("byt.ark:1", 0),
	("byt.ark:2", 0),
	("byt.ark:3", 0),
	("byt.ark:4", 0),
	("byt.ark:5", 0),
	("byt.ark:6", 5),
	("byt.ark:7", 5),
	("byt.ark:8", 0),
	("byt.ark:9", 0),
	("byt.ark:10", 0),
	("lback000.byt", 0),
	("lback001.byt", 0),
	("lback002.byt", 0),
	("lback003.byt", 0),
	("lback004.byt", 0),
	("lback005.byt", 0),
	("lback006.byt", 0),
	("lback007.byt", 0),
];

/// Decodes a `.byt` image from the current position.
///
/// # Errors
///
/// Returns [`UwFileError::InsufficientData`] if fewer than 320×200 bytes are
/// left.
pub fn decode(src: &mut ByteSource) -> Result<IndexedImage, UwFileError> {
	let pixels = src.read_buffer(IMAGE_SIZE);
	if pixels.len() < IMAGE_SIZE {
		return Err(UwFileError::InsufficientData {
			file_type: FileType::Byt,
			expected: IMAGE_SIZE,
			actual: pixels.len(),
		});
	}

	debug!("{}: decoded {}×{} image", src.name(), WIDTH, HEIGHT);
	Ok(IndexedImage::from_pixels(WIDTH, HEIGHT, pixels))
}

/// Main palette index for a known `.byt` image.
///
/// Accepts a bare file name or a relative path in any case.
pub fn palette_index_for(file_name: &str) -> Option<usize> {
	let file_name = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name).to_ascii_lowercase();

	PALETTE_INDICES.iter().find(|(name, _)| *name == file_name).map(|&(_, index)| index)
}
