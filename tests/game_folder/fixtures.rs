use std::fs;
use std::path::Path;

use tempfile::TempDir;
use uwadv_rs::prelude::*;

/// Writes `data` to `relative_path` below `root`, creating folders.
pub(crate) fn write(root: &Path, relative_path: &str, data: &[u8]) {
	let path = root.join(relative_path);
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	fs::write(path, data).unwrap();
}

/// Main palette `p` has every component set to `p`.
pub(crate) fn pals() -> Vec<u8> {
	(0..Palettes::FILE_SIZE).map(|i| (i / Palette::VGA_SIZE) as u8).collect()
}

/// Auxiliary palette `n` maps nibble `i` to `16 * n + i`.
pub(crate) fn allpals() -> Vec<u8> {
	(0..AuxPalettes::FILE_SIZE).map(|i| i as u8).collect()
}

/// `.gr` file with an uncompressed 2×2 and a 4-bit RLE 4×4 image.
pub(crate) fn objects_gr() -> Vec<u8> {
	let raw = [0x04, 2, 2, 4, 0, 1, 2, 3, 4];
	// 16 pixels of nibble 5 through aux palette 2
	let rle = [0x08, 4, 4, 2, 4, 0, 0x01, 0x05];

	let mut data = vec![1, 2, 0];
	let first = data.len() + 8;
	data.extend_from_slice(&(first as u32).to_le_bytes());
	data.extend_from_slice(&((first + raw.len()) as u32).to_le_bytes());
	data.extend_from_slice(&raw);
	data.extend_from_slice(&rle);
	data
}

/// Association table giving critter 2 animation 1 with auxiliary palette 1.
pub(crate) fn assoc() -> Vec<u8> {
	let mut data = vec![0u8; AssocFile::FILE_SIZE];
	data[8..12].copy_from_slice(b"rat\0");
	let entries = 32 * 8;
	data[entries + 2 * 2] = 1;
	data[entries + 2 * 2 + 1] = 1;
	data
}

/// Page file with one 4×4 frame of nibble 3 and two auxiliary palettes.
pub(crate) fn critter_page() -> Vec<u8> {
	// slot 0 plays segment 0
	let mut data = vec![0, 1, 0];
	data.push(1);
	data.extend_from_slice(&[0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
	data.push(2);
	data.extend((0..32).map(|i| 0x40 + i as u8));
	data.extend((0..32).map(|i| 0x60 + i as u8));
	data.extend_from_slice(&[1, 0]);
	let offset = data.len() as u16 + 2;
	data.extend_from_slice(&offset.to_le_bytes());
	// 4×4, hotspot (2, 4), type 0, 4 symbols: 0 1 0 3
	data.extend_from_slice(&[4, 4, 2, 4, 0, 4, 0, 0x01, 0x03]);
	data
}

/// uw1 game folder with upper-case file names, as found on DOS installs.
pub(crate) fn game_folder() -> TempDir {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path();
	write(root, "DATA/PALS.DAT", &pals());
	write(root, "DATA/ALLPALS.DAT", &allpals());
	write(root, "DATA/OBJECTS.GR", &objects_gr());
	write(root, "DATA/OPSCR.BYT", &vec![5; 320 * 200]);
	write(root, "CRIT/ASSOC.ANM", &assoc());
	write(root, "CRIT/CR01PAGE.N00", &critter_page());
	dir
}

pub(crate) fn resources(dir: &TempDir) -> ResourceManager {
	ResourceManager::new(&Settings::new(dir.path(), GameType::Uw1)).unwrap()
}
