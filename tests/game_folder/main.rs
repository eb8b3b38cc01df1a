//! End-to-end loading from a game folder on disk

mod critters;
mod fixtures;
mod images;
