//! Loaders that combine several game files into ready-to-use assets.
//!
//! | Loader            | Files                                              |
//! |-------------------|----------------------------------------------------|
//! | [`ImageManager`]  | `data/pals.dat`, `data/allpals.dat`, `*.gr`, `*.byt` |
//! | [`CritterLoader`] | `crit/assoc.anm`, `crit/crXXpage.nYY`               |

mod critters;
mod images;

pub use critters::CritterLoader;
pub use images::ImageManager;
