use uwadv_rs::prelude::*;

use crate::fixtures::{game_folder, resources};

#[test_log::test]
fn test_critters_from_disk() {
	let dir = game_folder();
	let res = resources(&dir);
	let images = ImageManager::new(&res).unwrap();
	let palette = images.palette(0).unwrap();

	let critters = CritterLoader::new(&res).load_critters(palette).unwrap();
	assert_eq!(critters.len(), 64);
	assert_eq!(critters.iter().filter(|c| !c.is_empty()).count(), 1);

	let rat = &critters[2];
	assert_eq!((rat.xres(), rat.yres()), (4, 4));
	assert_eq!(rat.frame_count(), 1);
	// nibble 3 through the second auxiliary palette
	assert!(rat.frame_pixels(0).unwrap().iter().all(|&p| p == 0x63));
	assert_eq!(rat.hotspot_uv(0), Some((0.5, 1.0)));

	assert_eq!(rat.segment_for_slot(0), Some(0));
	assert_eq!(rat.frame_in_segment(0, 0), Some(0));
	assert_eq!(rat.next_frame_position(0, 0), 0);

	let image = rat.frame_image(0).unwrap();
	assert_eq!(image.to_rgba().unwrap().len(), 4 * 4 * 4);
}

#[test]
fn test_demo_folder_without_demo_table() {
	let dir = game_folder();
	let settings = Settings::new(dir.path(), GameType::Uw1).with_uwdemo(true);
	let res = ResourceManager::new(&settings).unwrap();

	let err = CritterLoader::new(&res).load_critters(std::sync::Arc::new(Palette::new())).unwrap_err();
	assert!(matches!(
		err,
		UwFileError::NotFound {
			file_type: FileType::Assoc,
			..
		}
	));
}
