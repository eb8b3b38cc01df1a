//! This crate provides core data types and file format support for the `uwadv-rs` project.
//!
//! # File Formats
//!
//! - **Palettes**: `pals.dat` main palettes and `allpals.dat` auxiliary palettes
//! - **GR**: Image containers with raw, 4-bit and run-length encoded images
//! - **BYT**: Raw 320×200 full-screen images
//! - **Critters**: Multi-file critter animations and the association table
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use uwadv_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resources = MemoryResources::new();
//! let images = ImageManager::new(&resources)?;
//!
//! if let Some(image) = images.load_gr("objects", 0, 0)? {
//!     println!("{image}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or decode a single file directly:
//!
//! ```no_run
//! use uwadv_types::file::{ByteSource, byt};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut src = ByteSource::open("UWDATA/OPSCR.BYT")?;
//! let image = byt::decode(&mut src)?;
//! # Ok(())
//! # }
//! ```

pub mod file;
pub mod import;
pub mod resource;

/// `use uwadv_types::prelude::*;` to import commonly used items.
pub mod prelude;
