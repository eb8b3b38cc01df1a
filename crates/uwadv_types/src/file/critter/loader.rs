//! Two-pass critter page file loader.
//!
//! The first pass walks all page files to find the number of frames and the
//! largest frame size, without decoding anything. The second pass allocates
//! the shared pixel buffer once and fills it.
//!
//! Both passes stop at the first page file that does not exist. A page file
//! whose tables or frame headers are cut short is dropped and ends the chain,
//! at the same point in both passes, so the measured sizes always match what
//! the second pass writes.

use std::io::{self, SeekFrom};

use log::{debug, trace, warn};

use super::{CRITTER_AUX_PALETTE_SIZE, CritterAnimation, FRAMES_PER_SEGMENT, FrameInfo, NO_ENTRY, Segment};
use crate::file::rle::{RleDecoder, SymbolWidth};
use crate::file::{ByteSource, UwFileError};
use crate::resource::ResourceProvider;

/// Frame type stored with 5-bit symbols
const FIVE_BIT_FRAME_TYPE: u8 = 6;

/// Name of page file `page` of a chain.
fn page_file_name(base: &str, page: usize) -> String {
	format!("{base}.n{page:02}")
}

/// Header in front of every frame.
#[derive(Debug, Clone, Copy)]
struct FrameHeader {
	width: u8,
	height: u8,
	hotspot_x: u8,
	hotspot_y: u8,
	frame_type: u8,
	data_len: u16,
}

impl FrameHeader {
	/// Header size in bytes
	const SIZE: u64 = 7;

	fn from_source(src: &mut ByteSource) -> io::Result<Self> {
		Ok(Self {
			width: src.read_u8()?,
			height: src.read_u8()?,
			hotspot_x: src.read_u8()?,
			hotspot_y: src.read_u8()?,
			frame_type: src.read_u8()?,
			data_len: src.read_u16()?,
		})
	}

	fn symbol_width(&self) -> SymbolWidth {
		if self.frame_type == FIVE_BIT_FRAME_TYPE {
			SymbolWidth::Five
		} else {
			SymbolWidth::Four
		}
	}
}

/// Reads the frame offset table at the current position.
fn read_frame_offsets(src: &mut ByteSource) -> io::Result<Vec<u16>> {
	let count = src.read_u8()?;
	let _unknown = src.read_u8()?;
	(0..count).map(|_| src.read_u16()).collect()
}

/// Running state of the second pass across page files.
///
/// Page files number their segments and frames from 0; these offsets turn
/// them into indices into the critter-wide tables. The auxiliary palette id
/// stays reset once a page file lacks it.
#[derive(Debug)]
struct Chain {
	segment_offset: usize,
	frame_offset: usize,
	aux_palette: u8,
}

impl Chain {
	fn new(aux_palette: u8) -> Self {
		Self {
			segment_offset: 0,
			frame_offset: 0,
			aux_palette,
		}
	}
}

/// Adds `offset` to a table entry, leaving [`NO_ENTRY`] alone.
#[inline]
fn rebase(value: u8, offset: usize) -> u8 {
	if value == NO_ENTRY {
		value
	} else {
		value.wrapping_add(offset as u8)
	}
}

/// Loads all page files `<base>.n00`, `<base>.n01`, ...
///
/// `aux_palette` selects the auxiliary palette in each page file. An id
/// above a page file's palette count is reset to 0 for that page file and
/// every later one. A missing first page file gives an animation without
/// frames.
///
/// # Errors
///
/// Only I/O errors other than running out of data are returned.
pub fn load_critter_frames<P>(
	provider: &P,
	base: &str,
	aux_palette: u8,
) -> Result<CritterAnimation, UwFileError>
where
	P: ResourceProvider + ?Sized,
{
	let mut critter = CritterAnimation::new();

	// pass 0: measure
	let mut page = 0;
	while let Some(mut src) = open_page(provider, base, page)? {
		match measure_page(&mut src, &mut critter) {
			Ok(()) => {}
			Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
				warn!("{}: truncated page file, ending chain", src.name());
				break;
			}
			Err(e) => return Err(e.into()),
		}
		page += 1;
	}

	debug!(
		"{}: {} page files, {} frames of {}×{}",
		base, page, critter.max_frames, critter.xres, critter.yres
	);

	// pass 1: fill
	critter.frame_bytes = vec![0; critter.max_frames * critter.frame_size()];
	critter.frames = vec![FrameInfo::default(); critter.max_frames];

	let mut chain = Chain::new(aux_palette);
	let mut page = 0;
	while let Some(mut src) = open_page(provider, base, page)? {
		match fill_page(&mut src, &mut critter, &mut chain) {
			Ok(()) => {}
			Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
			Err(e) => return Err(e.into()),
		}
		page += 1;
	}

	Ok(critter)
}

fn open_page<P>(provider: &P, base: &str, page: usize) -> Result<Option<ByteSource>, UwFileError>
where
	P: ResourceProvider + ?Sized,
{
	provider.try_open(&page_file_name(base, page))
}

/// Skips the tables of one page file and records frame count and sizes.
///
/// Nothing is recorded unless every frame header of the page can be read.
fn measure_page(src: &mut ByteSource, critter: &mut CritterAnimation) -> io::Result<()> {
	// slot base is not needed for measuring
	src.read_u8()?;
	let slot_count = src.read_u8()?;
	src.seek(SeekFrom::Current(i64::from(slot_count)))?;

	let segment_count = src.read_u8()?;
	src.seek(SeekFrom::Current(i64::from(segment_count) * FRAMES_PER_SEGMENT as i64))?;

	let aux_count = src.read_u8()?;
	src.seek(SeekFrom::Current(i64::from(aux_count) * CRITTER_AUX_PALETTE_SIZE as i64))?;

	let offsets = read_frame_offsets(src)?;
	let headers = read_frame_headers(src, &offsets)?;

	// page files follow each other, so this page's frames start at the old total
	critter.max_frames += headers.len();
	for header in headers {
		critter.xres = critter.xres.max(u32::from(header.width));
		critter.yres = critter.yres.max(u32::from(header.height));
	}

	Ok(())
}

/// Reads the header of every frame in the offset table.
fn read_frame_headers(src: &mut ByteSource, offsets: &[u16]) -> io::Result<Vec<FrameHeader>> {
	offsets
		.iter()
		.map(|&offset| {
			src.seek(SeekFrom::Start(u64::from(offset)))?;
			FrameHeader::from_source(src)
		})
		.collect()
}

/// Reads the tables of one page file and decodes its frames.
///
/// The page is taken as a whole: tables are only committed once every frame
/// header has been read.
fn fill_page(src: &mut ByteSource, critter: &mut CritterAnimation, chain: &mut Chain) -> io::Result<()> {
	// slots
	let slot_base = usize::from(src.read_u8()?);
	let slot_count = usize::from(src.read_u8()?);
	let slots = src.read_buffer(slot_count);
	if slots.len() < slot_count {
		return Err(io::ErrorKind::UnexpectedEof.into());
	}

	// segments
	let segment_count = usize::from(src.read_u8()?);
	let mut segments = Vec::with_capacity(segment_count);
	for _ in 0..segment_count {
		let mut segment: Segment = [0; FRAMES_PER_SEGMENT];
		src.read_exact_into(&mut segment)?;
		segments.push(segment.map(|frame| rebase(frame, chain.frame_offset)));
	}

	// auxiliary palette; the frame table follows the whole palette table
	let aux_count = src.read_u8()?;
	if chain.aux_palette > aux_count {
		warn!("{}: auxiliary palette {} out of range, using 0", src.name(), chain.aux_palette);
		chain.aux_palette = 0;
	}

	let after_table = src.tell() + u64::from(aux_count) * CRITTER_AUX_PALETTE_SIZE as u64;
	if chain.aux_palette > 0 {
		src.seek(SeekFrom::Current(i64::from(chain.aux_palette) * CRITTER_AUX_PALETTE_SIZE as i64))?;
	}
	let mut aux = [0u8; CRITTER_AUX_PALETTE_SIZE];
	src.read_into(&mut aux);
	src.seek(SeekFrom::Start(after_table))?;

	let offsets = read_frame_offsets(src)?;
	let headers = read_frame_headers(src, &offsets)?;

	// the whole page is readable, commit its tables
	critter.slots.resize(slot_base + slot_count, NO_ENTRY);
	for (i, &segment) in slots.iter().enumerate() {
		critter.slots[slot_base + i] = rebase(segment, chain.segment_offset);
	}
	critter.segments.extend(segments);
	chain.segment_offset += segment_count;

	// frames
	let xres = critter.xres as usize;
	let frame_size = critter.frame_size();

	for (n, (offset, header)) in offsets.iter().zip(&headers).enumerate() {
		let frame = chain.frame_offset + n;
		let Some(info) = critter.frames.get_mut(frame) else {
			break;
		};
		*info = FrameInfo {
			width: u32::from(header.width),
			height: u32::from(header.height),
			hotspot_x: u32::from(header.hotspot_x),
			hotspot_y: u32::from(header.hotspot_y),
		};

		src.seek(SeekFrom::Start(u64::from(*offset) + FrameHeader::SIZE))?;

		let width = usize::from(header.width);
		let start = frame * frame_size;
		let pixels = &mut critter.frame_bytes[start..start + frame_size];

		let written = RleDecoder::new(header.symbol_width(), &aux)
			.data_len(usize::from(header.data_len))
			.max_pixels(width * usize::from(header.height))
			.stride(xres.saturating_sub(width), width)
			.decode(src.bytes(), pixels);

		trace!(
			"{}: frame {} {}×{} type {}, {} pixels",
			src.name(),
			frame,
			header.width,
			header.height,
			header.frame_type,
			written
		);
	}

	chain.frame_offset += headers.len();
	Ok(())
}
