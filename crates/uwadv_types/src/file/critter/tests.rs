//! Critter loader tests on synthetic page files

use super::*;
use crate::resource::MemoryResources;

const BASE: &str = "crit/cr01page";

#[derive(Clone)]
struct TestFrame {
	width: u8,
	height: u8,
	hotspot: (u8, u8),
	frame_type: u8,
	data_len: u16,
	data: Vec<u8>,
}

impl TestFrame {
	/// Frame filled with one color through a single repeat record.
	fn filled(width: u8, height: u8, color: u8) -> Self {
		let count = width * height;
		assert!(count >= 3, "counts 1 and 2 have special meanings");
		// symbols 0, count >> 4, count & 15, color
		Self {
			width,
			height,
			hotspot: (width / 2, height),
			frame_type: 0,
			data_len: 4,
			data: vec![count >> 4, ((count & 0x0F) << 4) | color],
		}
	}
}

#[derive(Clone, Default)]
struct TestPage {
	slot_base: u8,
	slots: Vec<u8>,
	segments: Vec<Segment>,
	aux_palettes: Vec<[u8; CRITTER_AUX_PALETTE_SIZE]>,
	frames: Vec<TestFrame>,
}

impl TestPage {
	/// Position of the first frame offset in the built page.
	fn offsets_position(&self) -> usize {
		2 + self.slots.len()
			+ 1 + self.segments.len() * FRAMES_PER_SEGMENT
			+ 1 + self.aux_palettes.len() * CRITTER_AUX_PALETTE_SIZE
			+ 2
	}

	/// Builds the page with the offset of frame `n` replaced.
	fn build_with_offset(&self, n: usize, offset: u16) -> Vec<u8> {
		let mut data = self.build();
		let pos = self.offsets_position() + 2 * n;
		data[pos..pos + 2].copy_from_slice(&offset.to_le_bytes());
		data
	}

	fn build(&self) -> Vec<u8> {
		let mut data = vec![self.slot_base, self.slots.len() as u8];
		data.extend_from_slice(&self.slots);
		data.push(self.segments.len() as u8);
		for segment in &self.segments {
			data.extend_from_slice(segment);
		}
		data.push(self.aux_palettes.len() as u8);
		for aux in &self.aux_palettes {
			data.extend_from_slice(aux);
		}

		data.push(self.frames.len() as u8);
		data.push(0);

		let mut offset = data.len() + 2 * self.frames.len();
		for frame in &self.frames {
			data.extend_from_slice(&(offset as u16).to_le_bytes());
			offset += 7 + frame.data.len();
		}
		for frame in &self.frames {
			data.extend_from_slice(&[frame.width, frame.height, frame.hotspot.0, frame.hotspot.1, frame.frame_type]);
			data.extend_from_slice(&frame.data_len.to_le_bytes());
			data.extend_from_slice(&frame.data);
		}
		data
	}
}

fn aux_table(base: u8) -> [u8; CRITTER_AUX_PALETTE_SIZE] {
	let mut table = [0u8; CRITTER_AUX_PALETTE_SIZE];
	for (i, entry) in table.iter_mut().enumerate() {
		*entry = base + i as u8;
	}
	table
}

fn segment(frames: &[u8]) -> Segment {
	let mut segment = [NO_ENTRY; FRAMES_PER_SEGMENT];
	segment[..frames.len()].copy_from_slice(frames);
	segment
}

fn two_pages() -> Vec<TestPage> {
	vec![
		TestPage {
			slot_base: 0,
			slots: vec![0, 1, NO_ENTRY],
			segments: vec![segment(&[0, 1]), segment(&[1, 0])],
			aux_palettes: vec![aux_table(0), aux_table(0x40)],
			frames: vec![TestFrame::filled(3, 2, 5), TestFrame::filled(4, 1, 6)],
		},
		TestPage {
			slot_base: 3,
			slots: vec![0, NO_ENTRY],
			segments: vec![segment(&[0])],
			aux_palettes: vec![aux_table(0x80), aux_table(0x20)],
			frames: vec![TestFrame::filled(2, 3, 7)],
		},
	]
}

fn resources(pages: &[TestPage]) -> MemoryResources {
	let mut res = MemoryResources::new();
	for (i, page) in pages.iter().enumerate() {
		res.insert(&format!("{BASE}.n{i:02}"), page.build());
	}
	res
}

#[test]
fn test_sizes_across_pages() {
	let critter = load_critter_frames(&resources(&two_pages()), BASE, 1).unwrap();

	assert_eq!(critter.max_frames(), 3);
	assert_eq!((critter.xres(), critter.yres()), (4, 3));
	assert_eq!(critter.frame_bytes().len(), 3 * 4 * 3);
}

#[test]
fn test_frames_decoded_into_slots() {
	let critter = load_critter_frames(&resources(&two_pages()), BASE, 1).unwrap();

	#[rustfmt::skip]
	let frame0: [u8; 12] = [
		0x45, 0x45, 0x45, 0,
		0x45, 0x45, 0x45, 0,
		0, 0, 0, 0,
	];
	assert_eq!(critter.frame_pixels(0).unwrap(), &frame0);

	let frame1 = critter.frame_pixels(1).unwrap();
	assert_eq!(&frame1[..4], &[0x46; 4]);
	assert!(frame1[4..].iter().all(|&p| p == 0));

	// second page uses its own auxiliary palette 1
	#[rustfmt::skip]
	let frame2: [u8; 12] = [
		0x27, 0x27, 0, 0,
		0x27, 0x27, 0, 0,
		0x27, 0x27, 0, 0,
	];
	assert_eq!(critter.frame_pixels(2).unwrap(), &frame2);
	assert!(critter.frame_pixels(3).is_none());
}

#[test]
fn test_tables_rebased() {
	let critter = load_critter_frames(&resources(&two_pages()), BASE, 1).unwrap();

	assert_eq!(critter.slots(), &[0, 1, NO_ENTRY, 2, NO_ENTRY]);
	assert_eq!(critter.segments(), &[segment(&[0, 1]), segment(&[1, 0]), segment(&[2])]);

	assert_eq!(critter.segment_for_slot(3), Some(2));
	assert_eq!(critter.segment_for_slot(2), None);
	assert_eq!(critter.segment_for_slot(40), None);
	assert_eq!(critter.frame_in_segment(2, 0), Some(2));
	assert_eq!(critter.frame_in_segment(2, 1), Some(NO_ENTRY));
}

#[test]
fn test_no_entry_survives_any_offset() {
	// many frames on the first page push later offsets high enough to wrap
	let mut first = TestPage {
		slot_base: 0,
		slots: vec![0],
		segments: vec![segment(&[0])],
		aux_palettes: vec![aux_table(0)],
		frames: Vec::new(),
	};
	first.frames = vec![TestFrame::filled(1, 3, 1); 255];

	let second = TestPage {
		slot_base: 1,
		slots: vec![NO_ENTRY, 0],
		segments: vec![[NO_ENTRY, 0, 1, NO_ENTRY, 0, NO_ENTRY, 0, 0]],
		aux_palettes: vec![aux_table(0)],
		frames: vec![TestFrame::filled(1, 3, 2)],
	};

	let critter = load_critter_frames(&resources(&[first, second]), BASE, 0).unwrap();

	assert_eq!(critter.max_frames(), 256);
	assert_eq!(critter.slots(), &[0, NO_ENTRY, 1]);

	let rebased = critter.segments()[1];
	assert_eq!(rebased[0], NO_ENTRY);
	assert_eq!(rebased[3], NO_ENTRY);
	assert_eq!(rebased[5], NO_ENTRY);
	// 0 + 255 and 1 + 255 in byte arithmetic
	assert_eq!(rebased[1], 255);
	assert_eq!(rebased[2], 0);
}

#[test]
fn test_missing_first_page() {
	let critter = load_critter_frames(&MemoryResources::new(), BASE, 0).unwrap();

	assert!(critter.is_empty());
	assert_eq!(critter.frame_count(), 0);
	assert!(critter.frame_bytes().is_empty());
	assert!(critter.slots().is_empty());
	assert!(critter.frame_pixels(0).is_none());
	assert!(critter.hotspot_uv(0).is_none());
}

#[test]
fn test_chain_stops_at_gap() {
	// .n00 and .n02 exist, .n02 is never reached
	let pages = two_pages();
	let mut res = MemoryResources::new();
	res.insert(&format!("{BASE}.n00"), pages[0].build());
	res.insert(&format!("{BASE}.n02"), pages[1].build());

	let critter = load_critter_frames(&res, BASE, 1).unwrap();
	assert_eq!(critter.max_frames(), 2);
	assert_eq!((critter.xres(), critter.yres()), (4, 2));
}

#[test_log::test]
fn test_truncated_page_ends_chain() {
	let pages = two_pages();
	let mut res = resources(&pages[..1]);
	let mut cut = pages[1].build();
	cut.truncate(5);
	res.insert(&format!("{BASE}.n01"), cut);

	let critter = load_critter_frames(&res, BASE, 1).unwrap();

	assert_eq!(critter.max_frames(), 2);
	assert_eq!((critter.xres(), critter.yres()), (4, 2));
	// nothing of the broken page is kept
	assert_eq!(critter.slots(), &[0, 1, NO_ENTRY]);
	assert_eq!(critter.segments().len(), 2);
}

#[test_log::test]
fn test_frame_header_past_end_drops_page() {
	let pages = two_pages();
	let broken = TestPage {
		slot_base: 3,
		slots: vec![0],
		segments: vec![segment(&[0, 1])],
		aux_palettes: vec![aux_table(0)],
		frames: vec![TestFrame::filled(6, 5, 3), TestFrame::filled(2, 2, 3)],
	};

	let mut res = resources(&pages[..1]);
	res.insert(&format!("{BASE}.n01"), broken.build_with_offset(1, 0xFFF0));
	res.insert(&format!("{BASE}.n02"), pages[1].build());

	let critter = load_critter_frames(&res, BASE, 1).unwrap();

	// the readable first frame of .n01 is not counted either
	assert_eq!(critter.max_frames(), 2);
	assert_eq!((critter.xres(), critter.yres()), (4, 2));
	assert_eq!(critter.slots(), &[0, 1, NO_ENTRY]);
	assert_eq!(critter.segments().len(), 2);
	for frame in 0..critter.frame_count() {
		assert_ne!(critter.frame_info(frame).unwrap().width, 0);
	}
}

#[test_log::test]
fn test_out_of_range_aux_palette_uses_first() {
	let critter = load_critter_frames(&resources(&two_pages()), BASE, 3).unwrap();
	assert_eq!(critter.frame_pixels(0).unwrap()[0], 0x05);
	assert_eq!(critter.frame_pixels(2).unwrap()[0], 0x87);
}

#[test_log::test]
fn test_aux_palette_reset_carries_to_later_pages() {
	let pages = vec![
		TestPage {
			slot_base: 0,
			slots: vec![0],
			segments: vec![segment(&[0])],
			aux_palettes: vec![aux_table(0)],
			frames: vec![TestFrame::filled(3, 2, 5)],
		},
		TestPage {
			slot_base: 1,
			slots: vec![0],
			segments: vec![segment(&[0])],
			aux_palettes: vec![aux_table(0x80), aux_table(0x20), aux_table(0x40), aux_table(0x60)],
			frames: vec![TestFrame::filled(2, 3, 7)],
		},
	];

	let critter = load_critter_frames(&resources(&pages), BASE, 3).unwrap();
	assert_eq!(critter.frame_pixels(0).unwrap()[0], 0x05);
	// .n01 has palette 3, but the id was already reset
	assert_eq!(critter.frame_pixels(1).unwrap()[0], 0x87);
}

#[test]
fn test_aux_palette_equal_to_count_reads_past_table() {
	let page = TestPage {
		slot_base: 0,
		slots: vec![0],
		segments: vec![segment(&[0])],
		aux_palettes: vec![aux_table(0x40)],
		frames: vec![TestFrame::filled(3, 2, 5)],
	};

	let critter = load_critter_frames(&resources(&[page]), BASE, 1).unwrap();

	// the entry after the table starts with the frame table: 1, 0, offset,
	// then the frame header, so color 5 maps to the frame height
	assert_eq!(critter.frame_pixels(0).unwrap(), &[2; 6]);
}

#[test]
fn test_later_page_resizes_slot_list() {
	let mut pages = two_pages();
	pages[1].slot_base = 1;
	pages[1].slots = vec![0];

	let critter = load_critter_frames(&resources(&pages), BASE, 1).unwrap();
	assert_eq!(critter.slots(), &[0, 2]);
}

#[test]
fn test_five_bit_frames() {
	// symbols 3, 20 => three pixels of aux entry 20
	let frame = TestFrame {
		width: 1,
		height: 3,
		hotspot: (0, 0),
		frame_type: 6,
		data_len: 2,
		data: vec![0x1D, 0x00],
	};
	let page = TestPage {
		slot_base: 0,
		slots: vec![0],
		segments: vec![segment(&[0])],
		aux_palettes: vec![aux_table(0x60)],
		frames: vec![frame],
	};

	let critter = load_critter_frames(&resources(&[page]), BASE, 0).unwrap();
	assert_eq!(critter.frame_pixels(0).unwrap(), &[0x74, 0x74, 0x74]);
}

#[test]
fn test_measured_sizes_match_decoded_frames() {
	let mut seed: u32 = 0xC0FF_EE11;
	let mut next = |limit: u32| {
		seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		(seed >> 24) % limit
	};

	for _ in 0..16 {
		let page_count = 1 + next(4) as usize;
		let pages: Vec<TestPage> = (0..page_count)
			.map(|_| TestPage {
				slot_base: next(8) as u8,
				slots: vec![0],
				segments: vec![segment(&[0])],
				aux_palettes: vec![aux_table(0)],
				frames: (0..next(5))
					.map(|_| TestFrame::filled(3 + next(12) as u8, 1 + next(10) as u8, 1 + next(15) as u8))
					.collect(),
			})
			.collect();

		let critter = load_critter_frames(&resources(&pages), BASE, 0).unwrap();

		let frames: Vec<&TestFrame> = pages.iter().flat_map(|page| &page.frames).collect();
		assert_eq!(critter.max_frames(), frames.len());

		let infos: Vec<FrameInfo> = (0..frames.len()).map(|i| *critter.frame_info(i).unwrap()).collect();
		let max_width = infos.iter().map(|info| info.width).max().unwrap_or(0);
		let max_height = infos.iter().map(|info| info.height).max().unwrap_or(0);
		assert_eq!((critter.xres(), critter.yres()), (max_width, max_height));

		for (info, frame) in infos.iter().zip(&frames) {
			assert_eq!((info.width, info.height), (u32::from(frame.width), u32::from(frame.height)));
		}
	}
}

#[test]
fn test_animation_helpers() {
	let mut critter = load_critter_frames(&resources(&two_pages()), BASE, 1).unwrap();

	// segment 0 is [0, 1, end]
	assert_eq!(critter.next_frame_position(0, 0), 1);
	assert_eq!(critter.next_frame_position(0, 1), 0);
	assert_eq!(critter.next_frame_position(0, 7), 0);
	assert_eq!(critter.next_frame_position(9, 0), 0);

	assert_eq!(critter.frame_pixels(usize::from(NO_ENTRY)), critter.frame_pixels(0));

	let info = critter.frame_info(0).unwrap();
	assert_eq!((info.hotspot_x, info.hotspot_y), (1, 2));
	let (u, v) = critter.hotspot_uv(0).unwrap();
	assert!((u - 0.25).abs() < 1e-9);
	assert!((v - 2.0 / 3.0).abs() < 1e-9);

	assert!(critter.frame_image(1).unwrap().palette().is_none());
	critter.set_palette(Arc::new(Palette::new()));
	let image = critter.frame_image(1).unwrap();
	assert_eq!((image.width(), image.height()), (4, 3));
	assert!(image.palette().is_some());
}
