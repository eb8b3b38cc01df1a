//! Image loading with palettes.

use std::sync::Arc;

use log::debug;

use crate::file::{AuxPalettes, ByteSource, FileType, GrLayout, IndexedImage, Palette, Palettes, UwFileError, byt, gr};
use crate::resource::ResourceProvider;

/// Main palettes file
pub const PALETTES_FILE: &str = "data/pals.dat";

/// Auxiliary palettes file
pub const AUX_PALETTES_FILE: &str = "data/allpals.dat";

/// Loads `.gr` and `.byt` images and attaches main palettes.
#[derive(Debug)]
pub struct ImageManager<'a, P: ResourceProvider + ?Sized> {
	provider: &'a P,
	palettes: Palettes,
	aux_palettes: AuxPalettes,
}

impl<'a, P: ResourceProvider + ?Sized> ImageManager<'a, P> {
	/// Loads both palette files.
	///
	/// # Errors
	///
	/// Fails if either palette file is missing or too short.
	pub fn new(provider: &'a P) -> Result<Self, UwFileError> {
		let palettes = Palettes::from_source(&mut open_required(provider, PALETTES_FILE, FileType::Palette)?)?;
		let aux_palettes =
			AuxPalettes::from_source(&mut open_required(provider, AUX_PALETTES_FILE, FileType::AuxPalette)?)?;

		debug!("loaded main and auxiliary palettes");
		Ok(Self {
			provider,
			palettes,
			aux_palettes,
		})
	}

	/// Main palettes.
	pub fn palettes(&self) -> &Palettes {
		&self.palettes
	}

	/// Shared handle to main palette `index`.
	pub fn palette(&self, index: usize) -> Option<Arc<Palette>> {
		self.palettes.get(index)
	}

	/// Auxiliary palettes.
	pub fn aux_palettes(&self) -> &AuxPalettes {
		&self.aux_palettes
	}

	/// Loads image `index` of `data/<basename>.gr`.
	///
	/// `Ok(None)` means the image is absent from the file. Palette indices
	/// above 7 fall back to palette 0.
	pub fn load_gr(
		&self,
		basename: &str,
		index: usize,
		palette: usize,
	) -> Result<Option<IndexedImage>, UwFileError> {
		let path = gr_path(basename);
		let mut src = open_required(self.provider, &path, FileType::Gr)?;
		let layout = GrLayout::for_file(&path, self.provider.game());

		let image = gr::decode_image(&mut src, index, layout, &self.aux_palettes)?;
		Ok(image.map(|image| image.with_palette(self.select_palette(palette))))
	}

	/// Loads images `from..to` of `data/<basename>.gr`; `to == 0` loads
	/// through the last image.
	pub fn load_gr_list(
		&self,
		basename: &str,
		from: usize,
		to: usize,
		palette: usize,
	) -> Result<Vec<IndexedImage>, UwFileError> {
		let path = gr_path(basename);
		let mut src = open_required(self.provider, &path, FileType::Gr)?;
		let layout = GrLayout::for_file(&path, self.provider.game());

		let palette = self.select_palette(palette);
		let images = gr::decode_image_list(&mut src, from, to, layout, &self.aux_palettes)?;
		Ok(images.into_iter().map(|image| image.with_palette(Arc::clone(&palette))).collect())
	}

	/// Loads a `.byt` image by its full relative path.
	pub fn load_byt(&self, relative_path: &str, palette: usize) -> Result<IndexedImage, UwFileError> {
		let mut src = open_required(self.provider, relative_path, FileType::Byt)?;
		let image = byt::decode(&mut src)?;
		Ok(image.with_palette(self.select_palette(palette)))
	}

	fn select_palette(&self, index: usize) -> Arc<Palette> {
		self.palettes.get_or_first(index)
	}
}

fn gr_path(basename: &str) -> String {
	format!("data/{basename}.gr")
}

/// Opens a file, labelling a missing file with `file_type`.
fn open_required<P>(
	provider: &P,
	relative_path: &str,
	file_type: FileType,
) -> Result<ByteSource, UwFileError>
where
	P: ResourceProvider + ?Sized,
{
	provider.try_open(relative_path)?.ok_or_else(|| UwFileError::not_found(file_type, relative_path))
}
