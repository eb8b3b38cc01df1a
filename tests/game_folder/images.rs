use uwadv_rs::prelude::*;
use uwadv_rs::uwadv_types::file::byt;

use crate::fixtures::{game_folder, resources};

#[test_log::test]
fn test_gr_images_from_disk() {
	let dir = game_folder();
	let res = resources(&dir);
	let images = ImageManager::new(&res).unwrap();

	let list = images.load_gr_list("objects", 0, 0, 2).unwrap();
	assert_eq!(list.len(), 2);

	assert_eq!(list[0].pixels(), &[1, 2, 3, 4]);
	let rgba = list[0].to_rgba().unwrap();
	// palette 2 components are 2 << 2
	assert_eq!(&rgba[..4], &[8, 8, 8, 255]);

	assert_eq!((list[1].width(), list[1].height()), (4, 4));
	assert!(list[1].pixels().iter().all(|&p| p == 0x25));
}

#[test]
fn test_byt_image_uses_its_palette() {
	let dir = game_folder();
	let res = resources(&dir);
	let images = ImageManager::new(&res).unwrap();

	let palette = byt::palette_index_for("data/opscr.byt").unwrap();
	let image = images.load_byt("data/opscr.byt", palette).unwrap();

	assert_eq!(image.pixels().len(), byt::IMAGE_SIZE);
	let rgba = image.to_rgba().unwrap();
	assert_eq!(&rgba[..4], &[palette as u8 * 4, palette as u8 * 4, palette as u8 * 4, 255]);
}

#[test]
fn test_settings_file_points_at_game() {
	let dir = game_folder();
	let config = dir.path().join("uwadv.toml");
	std::fs::write(&config, format!("underworld_path = {:?}\ngame = \"uw1\"\n", dir.path().display().to_string()))
		.unwrap();

	let settings = Settings::load(Some(&config)).unwrap();
	let res = ResourceManager::new(&settings).unwrap();
	assert_eq!(res.detect_game(), GameType::Uw1);
	assert!(res.is_available("data/objects.gr"));
}

#[test]
fn test_missing_palettes() {
	let dir = tempfile::tempdir().unwrap();
	let res = resources(&dir);
	assert!(matches!(
		ImageManager::new(&res),
		Err(UwFileError::NotFound {
			file_type: FileType::Palette,
			..
		})
	));
}
