//! Palette-indexed images.

use std::fmt;
use std::sync::Arc;

use super::Palette;

/// An image of palette indices with an optional shared palette.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexedImage {
	width: u32,
	height: u32,
	pixels: Vec<u8>,
	palette: Option<Arc<Palette>>,
}

impl IndexedImage {
	/// Creates a zero-filled image.
	pub fn new(width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			pixels: vec![0; width as usize * height as usize],
			palette: None,
		}
	}

	/// Creates an image from existing pixels.
	///
	/// The buffer is resized to `width * height`, padding with zeros.
	pub fn from_pixels(width: u32, height: u32, mut pixels: Vec<u8>) -> Self {
		pixels.resize(width as usize * height as usize, 0);
		Self {
			width,
			height,
			pixels,
			palette: None,
		}
	}

	/// Image width in pixels.
	#[inline]
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Image height in pixels.
	#[inline]
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Palette indices, row by row.
	#[inline]
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}

	/// Mutable palette indices.
	#[inline]
	pub fn pixels_mut(&mut self) -> &mut [u8] {
		&mut self.pixels
	}

	/// Palette attached to this image, if any.
	pub fn palette(&self) -> Option<&Arc<Palette>> {
		self.palette.as_ref()
	}

	/// Attaches a shared palette.
	pub fn set_palette(&mut self, palette: Arc<Palette>) {
		self.palette = Some(palette);
	}

	/// Builder-style variant of [`IndexedImage::set_palette`].
	pub fn with_palette(mut self, palette: Arc<Palette>) -> Self {
		self.palette = Some(palette);
		self
	}

	/// Gives this image its own copy of the palette so it can be changed
	/// without affecting other images.
	pub fn clone_palette(&mut self) -> Option<&mut Palette> {
		self.palette.as_mut().map(Arc::make_mut)
	}

	/// Sets every pixel to `index`.
	pub fn clear(&mut self, index: u8) {
		self.pixels.fill(index);
	}

	/// Fills a rectangle, clipped to the image.
	pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, index: u8) {
		let x_end = x.saturating_add(width).min(self.width) as usize;
		let y_end = y.saturating_add(height).min(self.height) as usize;
		let stride = self.width as usize;

		for row in (y as usize)..y_end {
			let start = row * stride + x as usize;
			let end = row * stride + x_end;
			if start < end {
				self.pixels[start..end].fill(index);
			}
		}
	}

	/// Copies a rectangle of `from` into this image.
	///
	/// The rectangle is clipped to both images. With `transparent` set,
	/// index 0 in the source leaves the destination pixel untouched.
	#[allow(clippy::too_many_arguments)]
	pub fn paste_rect(
		&mut self,
		from: &IndexedImage,
		from_x: u32,
		from_y: u32,
		width: u32,
		height: u32,
		dest_x: u32,
		dest_y: u32,
		transparent: bool,
	) {
		let width = width
			.min(from.width.saturating_sub(from_x))
			.min(self.width.saturating_sub(dest_x)) as usize;
		let height = height
			.min(from.height.saturating_sub(from_y))
			.min(self.height.saturating_sub(dest_y)) as usize;

		let src_stride = from.width as usize;
		let dest_stride = self.width as usize;

		for row in 0..height {
			let src_start = (from_y as usize + row) * src_stride + from_x as usize;
			let dest_start = (dest_y as usize + row) * dest_stride + dest_x as usize;
			let src = &from.pixels[src_start..src_start + width];
			let dest = &mut self.pixels[dest_start..dest_start + width];

			if transparent {
				for (d, &s) in dest.iter_mut().zip(src) {
					if s != 0 {
						*d = s;
					}
				}
			} else {
				dest.copy_from_slice(src);
			}
		}
	}

	/// Converts to packed RGBA through the attached palette.
	pub fn to_rgba(&self) -> Option<Vec<u8>> {
		self.palette.as_ref().map(|palette| palette.expand(&self.pixels))
	}
}

impl fmt::Display for IndexedImage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}×{} indexed image", self.width, self.height)
	}
}
