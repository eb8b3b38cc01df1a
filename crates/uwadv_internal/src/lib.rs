//! This module is separated into its own crate to enable simple dynamic linking for `uwadv`, and should not be used directly.

/// `use uwadv::prelude::*;` to import commonly used items.
pub mod prelude;

// Re-export member crates for convenience
pub use uwadv_types;
pub use uwadv_vfs;

// Re-export commonly used types at crate root
pub use uwadv_types::file::{ByteSource, CritterAnimation, IndexedImage, Palette, UwFileError};
pub use uwadv_vfs::{ResourceManager, Settings, VfsError};
