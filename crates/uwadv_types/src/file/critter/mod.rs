//! Critter animation support.
//!
//! Every critter's frames are spread over a chain of *page files*
//! (`crit/crXXpage.n00`, `.n01`, ...). Each page file carries part of the
//! animation tables and a batch of RLE-compressed frames:
//!
//! ```text
//! Size              Field
//! ----------------  -------------------------------------------------
//! 1                 slot base
//! 1                 slot count
//! slot count        segment index per slot (0xFF = unused)
//! 1                 segment count
//! 8 × count         frame index per segment position (0xFF = end)
//! 1                 auxiliary palette count
//! 32 × count        auxiliary palettes
//! 1                 frame count
//! 1                 unknown
//! 2 × frame count   absolute offset of every frame
//! ```
//!
//! Every frame starts with `width, height, hotspot x, hotspot y, type`
//! followed by a 16-bit symbol count and the RLE data (5-bit symbols for
//! type 6, 4-bit otherwise).
//!
//! Slot, segment and frame indices are local to their page file. Loading
//! turns them into one address space across all page files, see
//! [`load_critter_frames`].
//!
//! All frames share one pixel buffer. Every frame gets an `xres × yres` slot,
//! where `xres`/`yres` are the largest frame dimensions of the critter.

mod assoc;
mod loader;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use assoc::{ANIMATION_COUNT, AssocEntry, AssocFile, CRITTER_COUNT, page_file_base};
pub use loader::load_critter_frames;

use crate::file::{IndexedImage, Palette};

/// Animation rate used for all critters
pub const CRITTER_FRAMES_PER_SECOND: f64 = 3.0;

/// Number of frame positions in a segment
pub const FRAMES_PER_SEGMENT: usize = 8;

/// Marks an unused slot or the end of a segment
pub const NO_ENTRY: u8 = 0xFF;

/// Size of a critter auxiliary palette; type 6 frames use all 32 entries
pub const CRITTER_AUX_PALETTE_SIZE: usize = 32;

/// One segment: frame indices for each position, [`NO_ENTRY`] terminated.
pub type Segment = [u8; FRAMES_PER_SEGMENT];

/// Size and hotspot of one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FrameInfo {
	/// Frame width
	pub width: u32,
	/// Frame height
	pub height: u32,
	/// Hotspot x coordinate
	pub hotspot_x: u32,
	/// Hotspot y coordinate
	pub hotspot_y: u32,
}

/// All animation frames of one critter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CritterAnimation {
	xres: u32,
	yres: u32,
	max_frames: usize,
	frames: Vec<FrameInfo>,
	frame_bytes: Vec<u8>,
	slots: Vec<u8>,
	segments: Vec<Segment>,
	palette: Option<Arc<Palette>>,
}

impl CritterAnimation {
	/// Creates an animation without frames.
	pub fn new() -> Self {
		Self::default()
	}

	/// Width of every frame slot in the pixel buffer.
	#[inline]
	pub fn xres(&self) -> u32 {
		self.xres
	}

	/// Height of every frame slot in the pixel buffer.
	#[inline]
	pub fn yres(&self) -> u32 {
		self.yres
	}

	/// Number of frames.
	#[inline]
	pub fn max_frames(&self) -> usize {
		self.max_frames
	}

	/// Alias for [`CritterAnimation::max_frames`].
	#[inline]
	pub fn frame_count(&self) -> usize {
		self.max_frames
	}

	/// Returns `true` if no page file could be loaded.
	pub fn is_empty(&self) -> bool {
		self.max_frames == 0
	}

	/// Segment index for every animation state.
	pub fn slots(&self) -> &[u8] {
		&self.slots
	}

	/// All segments.
	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Shared pixel buffer of `max_frames × xres × yres` palette indices.
	pub fn frame_bytes(&self) -> &[u8] {
		&self.frame_bytes
	}

	/// Size and hotspot of a frame.
	pub fn frame_info(&self, frame: usize) -> Option<&FrameInfo> {
		self.frames.get(frame)
	}

	/// Pixels of a frame slot, `xres × yres` bytes.
	///
	/// [`NO_ENTRY`] selects frame 0 so that a terminated segment still shows
	/// something.
	pub fn frame_pixels(&self, frame: usize) -> Option<&[u8]> {
		let frame = if frame == usize::from(NO_ENTRY) {
			0
		} else {
			frame
		};
		if frame >= self.max_frames {
			return None;
		}

		let size = self.frame_size();
		self.frame_bytes.get(frame * size..(frame + 1) * size)
	}

	/// Copies a frame slot into an image carrying the critter palette.
	pub fn frame_image(&self, frame: usize) -> Option<IndexedImage> {
		let pixels = self.frame_pixels(frame)?;
		let mut image = IndexedImage::from_pixels(self.xres, self.yres, pixels.to_vec());
		if let Some(palette) = &self.palette {
			image.set_palette(Arc::clone(palette));
		}
		Some(image)
	}

	/// Segment played for an animation state, `None` for unused states.
	pub fn segment_for_slot(&self, state: usize) -> Option<usize> {
		match self.slots.get(state) {
			Some(&NO_ENTRY) | None => None,
			Some(&segment) => Some(usize::from(segment)),
		}
	}

	/// Frame index at position `n` of a segment; may be [`NO_ENTRY`].
	pub fn frame_in_segment(&self, segment: usize, n: usize) -> Option<u8> {
		self.segments.get(segment)?.get(n).copied()
	}

	/// Position following `n` in a segment.
	///
	/// Wraps to 0 at the end of the segment or at a [`NO_ENTRY`] terminator.
	pub fn next_frame_position(&self, segment: usize, n: usize) -> usize {
		let next = n + 1;
		match self.frame_in_segment(segment, next) {
			Some(frame) if frame != NO_ENTRY => next,
			_ => 0,
		}
	}

	/// Hotspot of a frame in texture coordinates of its `xres × yres` slot.
	pub fn hotspot_uv(&self, frame: usize) -> Option<(f64, f64)> {
		if self.xres == 0 || self.yres == 0 {
			return None;
		}

		let info = self.frame_info(frame)?;
		Some((
			f64::from(info.hotspot_x) / f64::from(self.xres),
			f64::from(info.hotspot_y) / f64::from(self.yres),
		))
	}

	/// Palette the frames are drawn with.
	pub fn palette(&self) -> Option<&Arc<Palette>> {
		self.palette.as_ref()
	}

	/// Sets the palette the frames are drawn with.
	pub fn set_palette(&mut self, palette: Arc<Palette>) {
		self.palette = Some(palette);
	}

	#[inline]
	fn frame_size(&self) -> usize {
		self.xres as usize * self.yres as usize
	}
}
