//! Benchmark suite for RLE and `.gr` decoding
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use uwadv_benches::{generate_gr_data, generate_rle_stream, sizes};
use uwadv_types::file::rle::{RleDecoder, SymbolWidth};
use uwadv_types::file::{AuxPalettes, ByteSource, GrLayout, gr};

/// Benchmark the bare RLE decoder
fn bench_rle_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_decode");
	let identity: Vec<u8> = (0..16).collect();

	for (name, (width, height)) in [("object", sizes::OBJECT), ("critter", sizes::CRITTER), ("panel", sizes::PANEL)] {
		let pixel_count = usize::from(width) * usize::from(height);
		let (data, symbols) = generate_rle_stream(pixel_count, 42);

		group.throughput(Throughput::Elements(pixel_count as u64));
		group.bench_with_input(BenchmarkId::new("decode", name), &data, |b, data| {
			let mut pixels = vec![0u8; pixel_count];
			b.iter(|| {
				let written = RleDecoder::new(SymbolWidth::Four, &identity)
					.data_len(symbols)
					.max_pixels(pixel_count)
					.decode(black_box(data).iter().copied(), &mut pixels);
				black_box(written)
			});
		});
	}

	group.finish();
}

/// Benchmark decoding into a wider canvas, as critter frames do
fn bench_rle_decode_strided(c: &mut Criterion) {
	let mut group = c.benchmark_group("rle_decode_strided");
	let identity: Vec<u8> = (0..32).collect();

	let (width, height) = (60usize, 50usize);
	let (data, symbols) = generate_rle_stream(width * height, 3);
	let (xres, yres) = (usize::from(sizes::CRITTER.0), usize::from(sizes::CRITTER.1));

	group.throughput(Throughput::Elements((width * height) as u64));
	group.bench_function("critter_frame", |b| {
		let mut pixels = vec![0u8; xres * yres];
		b.iter(|| {
			let written = RleDecoder::new(SymbolWidth::Four, &identity)
				.data_len(symbols)
				.max_pixels(width * height)
				.stride(xres - width, width)
				.decode(black_box(&data).iter().copied(), &mut pixels);
			black_box(written)
		});
	});

	group.finish();
}

/// Benchmark full `.gr` container decoding
fn bench_gr_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("gr_decode");
	let aux = AuxPalettes::identity();

	let data = generate_gr_data(64, sizes::OBJECT.0, sizes::OBJECT.1);
	group.throughput(Throughput::Elements(64));
	group.bench_function("object_list", |b| {
		b.iter(|| {
			let mut src = ByteSource::from_bytes("objects.gr", black_box(&data).clone());
			let images = gr::decode_image_list(&mut src, 0, 0, GrLayout::Standard, &aux);
			black_box(images)
		});
	});

	group.bench_function("single_image", |b| {
		b.iter(|| {
			let mut src = ByteSource::from_bytes("objects.gr", black_box(&data).clone());
			let image = gr::decode_image(&mut src, 63, GrLayout::Standard, &aux);
			black_box(image)
		});
	});

	group.finish();
}

criterion_group!(benches, bench_rle_decode, bench_rle_decode_strided, bench_gr_decode);

criterion_main!(benches);
