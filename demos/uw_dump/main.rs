//! Underworld image and critter dump utility.
//!
//! Exports game images to PNG so they can be checked by eye.
//!
//! # Usage
//!
//! ```bash
//! # Show what the settings resolve to
//! cargo run --example uw_dump -- --path ~/games/uw1 info
//!
//! # Export all images of data/objects.gr with palette 0
//! cargo run --example uw_dump -- --path ~/games/uw1 gr objects -o dump/objects
//!
//! # Export a full-screen image, picking its palette automatically
//! cargo run --example uw_dump -- --path ~/games/uw1 byt data/opscr.byt
//!
//! # Export every critter frame plus a JSON file with sizes and hotspots
//! cargo run --example uw_dump -- --path ~/games/uw1 critters -o dump/critters
//! ```
//!
//! Settings can also come from a TOML file (`--config`) or `UWADV_*`
//! environment variables.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use image::RgbaImage;
use log::{info, warn};
use serde::Serialize;
use uwadv_rs::prelude::*;
use uwadv_rs::uwadv_types::file::byt;

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let settings = cli.game.settings()?;
	let resources = ResourceManager::new(&settings)?;

	match cli.command {
		Command::Info => run_info(&settings, &resources),
		Command::Gr(opts) => run_gr(&resources, opts),
		Command::Byt(opts) => run_byt(&resources, opts),
		Command::Critters(opts) => run_critters(&resources, opts),
	}
}

#[derive(Parser)]
#[command(name = "uw_dump")]
#[command(author = "uwadv-rs project")]
#[command(version)]
#[command(about = "Export Underworld images and critter animations to PNG", long_about = None)]
struct Cli {
	#[command(flatten)]
	game: GameArgs,

	#[command(subcommand)]
	command: Command,
}

#[derive(Args)]
struct GameArgs {
	/// TOML settings file
	#[arg(short, long, value_name = "FILE", global = true)]
	config: Option<PathBuf>,

	/// Game folder, overrides the settings
	#[arg(short, long, value_name = "DIR", global = true)]
	path: Option<PathBuf>,

	/// Treat the folder as the uw1 demo
	#[arg(long, global = true)]
	demo: bool,
}

impl GameArgs {
	fn settings(&self) -> Result<Settings> {
		let mut settings = Settings::load(self.config.as_deref()).context("failed to load settings")?;
		if let Some(path) = &self.path {
			settings.underworld_path = path.clone();
		}
		if self.demo {
			settings.uw1_is_uwdemo = true;
		}
		Ok(settings)
	}
}

#[derive(Subcommand)]
enum Command {
	/// Print settings and the detected game
	Info,
	/// Export images of a .gr file
	Gr(GrArgs),
	/// Export a .byt image
	Byt(BytArgs),
	/// Export all critter frames
	Critters(OutputArgs),
}

#[derive(Args)]
struct GrArgs {
	/// Base name below `data/`, e.g. `objects`
	#[arg(value_name = "NAME")]
	name: String,

	/// Main palette to use
	#[arg(long, default_value_t = 0)]
	palette: usize,

	/// First image
	#[arg(long, default_value_t = 0)]
	from: usize,

	/// Image after the last one, 0 for all
	#[arg(long, default_value_t = 0)]
	to: usize,

	#[command(flatten)]
	output: OutputArgs,
}

#[derive(Args)]
struct BytArgs {
	/// Relative path, e.g. `data/opscr.byt`
	#[arg(value_name = "PATH")]
	path: String,

	/// Main palette to use; known images pick their own
	#[arg(long)]
	palette: Option<usize>,

	#[command(flatten)]
	output: OutputArgs,
}

#[derive(Args)]
struct OutputArgs {
	/// Output directory
	#[arg(short, long, value_name = "DIR", default_value = "dump")]
	output: PathBuf,
}

/// Per-frame critter metadata
#[derive(Debug, Serialize)]
struct FrameMetadata {
	index: usize,
	width: u32,
	height: u32,
	hotspot_x: u32,
	hotspot_y: u32,
	filename: String,
}

/// Critter metadata written next to the frames
#[derive(Debug, Serialize)]
struct CritterMetadata {
	critter: usize,
	xres: u32,
	yres: u32,
	slots: Vec<u8>,
	segments: Vec<[u8; 8]>,
	frames: Vec<FrameMetadata>,
}

fn run_info(settings: &Settings, resources: &ResourceManager) -> Result<()> {
	println!("game folder:   {}", resources.root().display());
	println!("configured:    {}", settings.game);
	println!("detected:      {}", resources.detect_game());
	println!("uw1 demo:      {}", settings.uw1_is_uwdemo);
	Ok(())
}

fn run_gr(resources: &ResourceManager, opts: GrArgs) -> Result<()> {
	let images = ImageManager::new(resources).context("failed to load palettes")?;
	let list = images.load_gr_list(&opts.name, opts.from, opts.to, opts.palette)?;

	let dir = opts.output.output;
	fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

	for (i, image) in list.iter().enumerate() {
		save_png(image, &dir.join(format!("{}_{:03}.png", opts.name, opts.from + i)))?;
	}

	info!("exported {} images to {}", list.len(), dir.display());
	Ok(())
}

fn run_byt(resources: &ResourceManager, opts: BytArgs) -> Result<()> {
	let palette = match opts.palette {
		Some(palette) => palette,
		None => byt::palette_index_for(&opts.path).unwrap_or_else(|| {
			warn!("unknown image {}, using palette 0", opts.path);
			0
		}),
	};

	let images = ImageManager::new(resources).context("failed to load palettes")?;
	let image = images.load_byt(&opts.path, palette)?;

	let dir = opts.output.output;
	fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;

	let stem = Path::new(&opts.path).file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
	save_png(&image, &dir.join(format!("{stem}.png")))?;

	info!("exported {} with palette {}", opts.path, palette);
	Ok(())
}

fn run_critters(resources: &ResourceManager, opts: OutputArgs) -> Result<()> {
	let images = ImageManager::new(resources).context("failed to load palettes")?;
	let palette = images.palette(0).context("palette 0 missing")?;
	let critters = CritterLoader::new(resources).load_critters(palette)?;

	let dir = opts.output;
	let mut exported = 0;

	for (index, critter) in critters.iter().enumerate().filter(|(_, critter)| !critter.is_empty()) {
		let critter_dir = dir.join(format!("critter_{index:02x}"));
		fs::create_dir_all(&critter_dir).with_context(|| format!("failed to create {}", critter_dir.display()))?;

		let mut frames = Vec::with_capacity(critter.frame_count());
		for frame in 0..critter.frame_count() {
			let Some(image) = critter.frame_image(frame) else {
				continue;
			};
			let filename = format!("frame_{frame:03}.png");
			save_png(&image, &critter_dir.join(&filename))?;

			let info = critter.frame_info(frame).copied().unwrap_or_default();
			frames.push(FrameMetadata {
				index: frame,
				width: info.width,
				height: info.height,
				hotspot_x: info.hotspot_x,
				hotspot_y: info.hotspot_y,
				filename,
			});
		}

		let metadata = CritterMetadata {
			critter: index,
			xres: critter.xres(),
			yres: critter.yres(),
			slots: critter.slots().to_vec(),
			segments: critter.segments().to_vec(),
			frames,
		};
		fs::write(critter_dir.join("critter.json"), serde_json::to_string_pretty(&metadata)?)?;
		exported += 1;
	}

	info!("exported {} critters to {}", exported, dir.display());
	Ok(())
}

/// Saves an indexed image through its palette as RGBA PNG
fn save_png(image: &IndexedImage, path: &Path) -> Result<()> {
	let rgba = image.to_rgba().context("image has no palette")?;
	let png = RgbaImage::from_raw(image.width(), image.height(), rgba).context("failed to create image buffer")?;
	png.save(path).with_context(|| format!("failed to write {}", path.display()))?;
	Ok(())
}
