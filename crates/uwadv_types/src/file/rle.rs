//! Underworld nibble-packed run-length decoder.
//!
//! ## Bitstream
//!
//! The stream is a sequence of *symbols*, each 4 or 5 bits wide, packed
//! MSB-first across byte boundaries. At most 7 bits are carried over between
//! symbols; when fewer than a full symbol are left, exactly one more byte is
//! pulled in and the symbol is stitched together from both.
//!
//! ## Counts
//!
//! Counts have variable length:
//!
//! | Symbols            | Count                                   |
//! |--------------------|-----------------------------------------|
//! | `n` (n ≠ 0)        | `n`                                     |
//! | `0 a b`            | `a << 4 | b`, if that is non-zero       |
//! | `0 0 0 c d e`      | `((c << 4 | d) << 4) | e`               |
//!
//! The shift is always 4, also for 5-bit symbols.
//!
//! ## Records
//!
//! Decoding alternates between *repeat* and *run* records, starting with a
//! repeat record:
//!
//! - **Repeat**: read a count.
//!   - `1`: no repeat here, a run record follows.
//!   - `2`: the next count says how many repeat records follow in a row.
//!   - otherwise: the next symbol is a color written `count` times.
//! - **Run**: read a count, then that many symbols, one pixel each.
//!
//! Every symbol written to the output goes through the auxiliary palette.
//! Decoding stops once `data_len` symbols have been consumed, `max_pixels`
//! pixels have been written, or the input runs out.

/// Width of a single symbol in the bitstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolWidth {
	/// 4-bit symbols, used by `.gr` images and most critter frames
	Four,
	/// 5-bit symbols, used by critter frames of type 6
	Five,
}

impl SymbolWidth {
	/// Number of bits per symbol.
	#[inline]
	pub const fn bits(self) -> u32 {
		match self {
			Self::Four => 4,
			Self::Five => 5,
		}
	}
}

/// Reads fixed-width symbols MSB-first from a byte iterator.
#[derive(Debug)]
struct BitReader<I> {
	bytes: I,
	bits: u32,
	mask: u32,
	/// Left-aligned leftover bits of the last byte
	raw: u32,
	available: u32,
}

impl<I: Iterator<Item = u8>> BitReader<I> {
	fn new(bytes: I, width: SymbolWidth) -> Self {
		let bits = width.bits();
		Self {
			bytes,
			bits,
			mask: ((1 << bits) - 1) << (8 - bits),
			raw: 0,
			available: 0,
		}
	}

	fn next_symbol(&mut self) -> Option<u32> {
		if self.available >= self.bits {
			let symbol = (self.raw & self.mask) >> (8 - self.bits);
			self.available -= self.bits;
			self.raw = (self.raw << self.bits) & 0xFF;
			return Some(symbol);
		}

		// top up with exactly one byte
		let mut symbol = if self.available > 0 {
			((self.raw & self.mask) >> (8 - self.available)) << (self.bits - self.available)
		} else {
			0
		};

		let byte = u32::from(self.bytes.next()?);
		let shift = 8 - (self.bits - self.available);

		symbol |= byte >> shift;
		self.raw = (byte << (8 - shift)) & 0xFF;
		self.available = shift;

		Some(symbol)
	}
}

/// Progress of the variable-length count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CountStage {
	/// Nothing read yet
	First,
	/// First symbol was zero
	Second,
	/// Two symbols read after the zero
	Third,
	/// Escalated; this many symbols are still absorbed
	Extended(u8),
}

#[derive(Debug)]
struct CountAssembler {
	stage: CountStage,
	count: u32,
}

impl CountAssembler {
	const fn new() -> Self {
		Self {
			stage: CountStage::First,
			count: 0,
		}
	}

	/// Feeds one symbol; returns the count once it is complete.
	fn push(&mut self, symbol: u32) -> Option<u32> {
		match self.stage {
			CountStage::First => {
				if symbol != 0 {
					return self.finish(symbol);
				}
				self.stage = CountStage::Second;
			}
			CountStage::Second => {
				self.count = symbol;
				self.stage = CountStage::Third;
			}
			CountStage::Third => {
				self.count = (self.count << 4) | symbol;
				if self.count != 0 {
					return self.finish(self.count);
				}
				self.stage = CountStage::Extended(3);
			}
			CountStage::Extended(left) => {
				self.count = (self.count << 4) | symbol;
				if left == 1 {
					return self.finish(self.count);
				}
				self.stage = CountStage::Extended(left - 1);
			}
		}
		None
	}

	fn finish(&mut self, count: u32) -> Option<u32> {
		*self = Self::new();
		Some(count)
	}
}

/// What the next symbol means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Record {
	/// Assembling the count of a repeat record
	Repeat,
	/// Next symbol is the color to repeat `count` times
	RepeatColor {
		count: u32,
	},
	/// Assembling the number of repeat records that follow
	MultipleRepeat,
	/// Assembling the count of a run record
	Run,
	/// Next `remaining` symbols are pixels
	RunPixels {
		remaining: u32,
	},
}

/// Pixel writer with optional line stride.
struct Destination<'a> {
	pixels: &'a mut [u8],
	pos: usize,
	written: usize,
	line_count: usize,
	padding: usize,
	line_width: usize,
}

impl Destination<'_> {
	/// Writes one pixel; returns `false` if the buffer is exhausted.
	#[inline]
	fn put(&mut self, value: u8) -> bool {
		let Some(slot) = self.pixels.get_mut(self.pos) else {
			return false;
		};
		*slot = value;
		self.pos += 1;
		self.written += 1;

		if self.padding != 0 {
			self.line_count += 1;
			if self.line_count >= self.line_width {
				self.line_count = 0;
				self.pos += self.padding;
			}
		}
		true
	}
}

/// Decoder configuration for one compressed image.
///
/// # Example
///
/// ```
/// use uwadv_types::file::rle::{RleDecoder, SymbolWidth};
///
/// let identity: Vec<u8> = (0..16).collect();
/// let mut pixels = [0u8; 8];
///
/// // repeat 5 × color 3, then a run of 1, 2, 3
/// let written = RleDecoder::new(SymbolWidth::Four, &identity)
/// 	.data_len(6)
/// 	.max_pixels(8)
/// 	.decode([0x53, 0x31, 0x23], &mut pixels);
///
/// assert_eq!(written, 8);
/// assert_eq!(pixels, [3, 3, 3, 3, 3, 1, 2, 3]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RleDecoder<'a> {
	width: SymbolWidth,
	aux_palette: &'a [u8],
	data_len: usize,
	max_pixels: usize,
	padding: usize,
	line_width: usize,
}

impl<'a> RleDecoder<'a> {
	/// Creates a decoder mapping symbols through `aux_palette`.
	///
	/// Symbols without an entry in `aux_palette` are written as 0.
	pub fn new(width: SymbolWidth, aux_palette: &'a [u8]) -> Self {
		Self {
			width,
			aux_palette,
			data_len: usize::MAX,
			max_pixels: usize::MAX,
			padding: 0,
			line_width: 0,
		}
	}

	/// Number of symbols to consume at most.
	pub fn data_len(mut self, symbols: usize) -> Self {
		self.data_len = symbols;
		self
	}

	/// Number of pixels to write at most.
	pub fn max_pixels(mut self, pixels: usize) -> Self {
		self.max_pixels = pixels;
		self
	}

	/// Skips `padding` destination bytes after every `line_width` pixels.
	///
	/// Used to decode a narrow frame into a wider shared canvas.
	pub fn stride(mut self, padding: usize, line_width: usize) -> Self {
		self.padding = padding;
		self.line_width = line_width;
		self
	}

	#[inline]
	fn remap(&self, symbol: u32) -> u8 {
		self.aux_palette.get(symbol as usize).copied().unwrap_or_default()
	}

	/// Decodes `bytes` into `pixels` and returns the number of pixels written.
	///
	/// Never writes more than `max_pixels` pixels and never panics on short
	/// input or a short destination; both simply end decoding.
	pub fn decode<I>(&self, bytes: I, pixels: &mut [u8]) -> usize
	where
		I: IntoIterator<Item = u8>,
	{
		let mut reader = BitReader::new(bytes.into_iter(), self.width);
		let mut counter = CountAssembler::new();
		let mut record = Record::Repeat;
		let mut pending_repeats: u32 = 0;
		let mut data_len = self.data_len;

		let mut dest = Destination {
			pixels,
			pos: 0,
			written: 0,
			line_count: 0,
			padding: self.padding,
			line_width: self.line_width,
		};

		while data_len > 0 && dest.written < self.max_pixels {
			let Some(symbol) = reader.next_symbol() else {
				break;
			};
			data_len -= 1;

			record = match record {
				Record::Repeat | Record::MultipleRepeat | Record::Run => {
					let Some(count) = counter.push(symbol) else {
						continue;
					};

					match record {
						Record::Repeat => match count {
							1 => Record::Run,
							2 => Record::MultipleRepeat,
							_ => Record::RepeatColor {
								count,
							},
						},
						Record::MultipleRepeat => {
							pending_repeats = count.wrapping_sub(1);
							Record::Repeat
						}
						_ => Record::RunPixels {
							remaining: count,
						},
					}
				}

				Record::RepeatColor {
					count,
				} => {
					let value = self.remap(symbol);
					for _ in 0..count {
						if !dest.put(value) {
							return dest.written;
						}
						if dest.written >= self.max_pixels {
							break;
						}
					}

					if pending_repeats == 0 {
						Record::Run
					} else {
						pending_repeats -= 1;
						Record::Repeat
					}
				}

				Record::RunPixels {
					remaining,
				} => {
					if !dest.put(self.remap(symbol)) {
						return dest.written;
					}

					match remaining.wrapping_sub(1) {
						0 => Record::Repeat,
						remaining => Record::RunPixels {
							remaining,
						},
					}
				}
			};
		}

		dest.written
	}
}
