//! Benchmark helper utilities for uwadv-rs
//!
//! This module generates synthetic run-length encoded images and `.gr`
//! containers so the benchmarks run without game data.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Packs 4-bit symbols MSB-first, zero-padding the last byte.
pub fn pack_nibbles(symbols: &[u8]) -> Vec<u8> {
	symbols.chunks(2).map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0)).collect()
}

/// Generates a 4-bit RLE stream for `pixel_count` pixels.
///
/// Alternates repeat records of 3 to 15 pixels with runs of 1 to 15 pixels,
/// which is roughly what the game's images look like. Returns the packed
/// bytes and the number of symbols.
pub fn generate_rle_stream(pixel_count: usize, seed: u64) -> (Vec<u8>, usize) {
	let mut rng = SmallRng::seed_from_u64(seed);
	let mut next = |limit: u8| rng.random_range(0..limit);

	let mut symbols = Vec::new();
	let mut pixels = 0;
	while pixels < pixel_count {
		// repeat record
		let count = 3 + next(13);
		symbols.push(count);
		symbols.push(next(16));
		pixels += usize::from(count);

		// run record
		let count = 1 + next(15);
		symbols.push(count);
		for _ in 0..count {
			symbols.push(next(16));
		}
		pixels += usize::from(count);
	}

	let len = symbols.len();
	(pack_nibbles(&symbols), len)
}

/// Generates a `.gr` file with `count` RLE images of `width × height`.
pub fn generate_gr_data(count: usize, width: u8, height: u8) -> Vec<u8> {
	let entries: Vec<Vec<u8>> = (0..count)
		.map(|i| {
			let (data, symbols) = generate_rle_stream(usize::from(width) * usize::from(height), i as u64);
			let mut entry = vec![0x08, width, height, (i % 32) as u8];
			entry.extend_from_slice(&(symbols as u16).to_le_bytes());
			entry.extend_from_slice(&data);
			entry
		})
		.collect();

	let mut data = vec![1];
	data.extend_from_slice(&(count as u16).to_le_bytes());
	let mut offset = 3 + 4 * count;
	for entry in &entries {
		data.extend_from_slice(&(offset as u32).to_le_bytes());
		offset += entry.len();
	}
	for entry in &entries {
		data.extend_from_slice(entry);
	}
	data
}

/// Common benchmark sizes
pub mod sizes {
	/// Inventory object icon: 16x16
	pub const OBJECT: (u8, u8) = (16, 16);
	/// Large critter frame: 95x73
	pub const CRITTER: (u8, u8) = (95, 73);
	/// Character panel: 83x114
	pub const PANEL: (u8, u8) = (83, 114);
}

#[cfg(test)]
mod tests {
	use super::*;
	use uwadv_types::file::rle::{RleDecoder, SymbolWidth};

	#[test]
	fn test_stream_covers_all_pixels() {
		let identity: Vec<u8> = (0..16).collect();
		let (data, symbols) = generate_rle_stream(1000, 7);

		let mut pixels = vec![0u8; 1000];
		let written = RleDecoder::new(SymbolWidth::Four, &identity)
			.data_len(symbols)
			.max_pixels(1000)
			.decode(data, &mut pixels);
		assert_eq!(written, 1000);
	}

	#[test]
	fn test_gr_header() {
		let data = generate_gr_data(3, 4, 4);
		assert_eq!(data[0], 1);
		assert_eq!(u16::from_le_bytes([data[1], data[2]]), 3);
		assert_eq!(u32::from_le_bytes([data[3], data[4], data[5], data[6]]), 15);
	}
}
