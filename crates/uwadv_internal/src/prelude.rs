//! Prelude module for `uwadv_internal`.
//!
//! This module provides a convenient way to import commonly used types and traits.
//!
//! # Examples
//!
//! ```rust
//! use uwadv_internal::prelude::*;
//!
//! // Now you can use all common types directly
//! let settings = Settings::new("uw1", GameType::Uw1);
//! let resources = MemoryResources::new().with_game(settings.game);
//! let image = IndexedImage::new(320, 200);
//! assert_eq!(image.pixels().len(), 64_000);
//! ```

// Re-export everything from uwadv_types::prelude
#[doc(inline)]
pub use uwadv_types::prelude::*;

// Game folder access
#[doc(inline)]
pub use uwadv_vfs::{ResourceManager, Settings, VfsError};

// Re-export the entire uwadv_types module for advanced usage
#[doc(inline)]
pub use uwadv_types;
