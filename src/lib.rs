#![allow(clippy::single_component_path_imports)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `uwadv-rs` loads the images and critter animations of Ultima Underworld 1
//! and 2 from an installed game folder.
//!
//! ```no_run
//! use uwadv_rs::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resources = ResourceManager::new(&Settings::new("/games/uw1", GameType::Uw1))?;
//! let images = ImageManager::new(&resources)?;
//! let objects = images.load_gr_list("objects", 0, 0, 0)?;
//! println!("{} object images", objects.len());
//! # Ok(())
//! # }
//! ```
pub use uwadv_internal::*;

#[cfg(all(feature = "dynamic_linking", not(target_family = "wasm")))]
#[allow(unused_imports)]
use uwadv_dylib;
