//! File type support for `uwadv-rs` project.

mod error;

pub mod byt;
pub mod critter;
pub mod gr;
pub mod image;
pub mod palette;
pub mod rle;
pub mod source;

// Re-export unified error type
pub use error::{FileType, UwFileError};

// Re-export main file types
pub use critter::{AssocEntry, AssocFile, CritterAnimation, FrameInfo};
pub use gr::GrLayout;
pub use image::IndexedImage;
pub use palette::{AuxPalette, AuxPalettes, Color, Palette, Palettes};
pub use source::ByteSource;
