//! Loading of all critter animations.

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};

use crate::file::critter::{self, AssocFile, CRITTER_COUNT, CritterAnimation};
use crate::file::{FileType, Palette, UwFileError};
use crate::resource::{GameType, ResourceProvider};

/// Loads the animations of every critter listed in the association table.
#[derive(Debug)]
pub struct CritterLoader<'a, P: ResourceProvider + ?Sized> {
	provider: &'a P,
}

impl<'a, P: ResourceProvider + ?Sized> CritterLoader<'a, P> {
	/// Creates a loader reading from `provider`.
	pub fn new(provider: &'a P) -> Self {
		Self {
			provider,
		}
	}

	/// Loads all critters of the current game.
	///
	/// The result has one entry per critter; critters without an animation
	/// are left empty. Every loaded critter is drawn with `palette`.
	///
	/// # Errors
	///
	/// Fails if the association table is missing or too short. uw2 critters
	/// are not supported yet.
	pub fn load_critters(&self, palette: Arc<Palette>) -> Result<Vec<CritterAnimation>, UwFileError> {
		match self.provider.game() {
			GameType::Uw1 => self.load_critters_uw1(palette),
			GameType::Uw2 => Err(UwFileError::NotImplemented {
				feature: "uw2 critter animations",
			}),
		}
	}

	fn load_critters_uw1(&self, palette: Arc<Palette>) -> Result<Vec<CritterAnimation>, UwFileError> {
		info!("loading all uw1 critter animations");
		let start = Instant::now();

		let assoc_name = AssocFile::file_name(self.provider.is_uw_demo());
		let mut src = self
			.provider
			.try_open(assoc_name)?
			.ok_or_else(|| UwFileError::not_found(FileType::Assoc, assoc_name))?;
		let assoc = AssocFile::from_source(&mut src)?;

		let mut critters = vec![CritterAnimation::new(); CRITTER_COUNT];
		for (index, (entry, critter)) in assoc.entries().iter().zip(critters.iter_mut()).enumerate() {
			if !assoc.has_animation(entry.animation) {
				continue;
			}

			let base = critter::page_file_base(entry.animation);
			debug!("critter {:#04x}: {}, auxiliary palette {}", index, base, entry.aux_palette);

			*critter = critter::load_critter_frames(self.provider, &base, entry.aux_palette)?;
			critter.set_palette(Arc::clone(&palette));
		}

		info!("done, needed {} ms", start.elapsed().as_millis());
		Ok(critters)
	}
}
