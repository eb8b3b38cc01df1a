//! Game folder access for `uwadv-rs`.
//!
//! [`Settings`] says where the game lives and which game it is;
//! [`ResourceManager`] opens files below that folder for the importers in
//! `uwadv_types`.

mod error;
mod manager;
mod settings;

pub use error::VfsError;
pub use manager::ResourceManager;
pub use settings::{ENV_PREFIX, Settings};
