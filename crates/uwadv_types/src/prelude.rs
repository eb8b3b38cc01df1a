//! Prelude module for `uwadv_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use uwadv_types::prelude::*;
//!
//! let resources = MemoryResources::new().with_game(GameType::Uw1);
//! let loader = CritterLoader::new(&resources);
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	AssocFile,
	// Palettes
	AuxPalettes,
	ByteSource,
	Color,

	// Critters
	CritterAnimation,
	FileType,
	FrameInfo,

	// Images
	GrLayout,
	IndexedImage,
	Palette,
	Palettes,

	UwFileError,
};

#[doc(inline)]
pub use crate::file::critter::CRITTER_FRAMES_PER_SECOND;

// Loaders
#[doc(inline)]
pub use crate::import::{CritterLoader, ImageManager};

// Resources
#[doc(inline)]
pub use crate::resource::{GameType, MemoryResources, ResourceProvider};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
