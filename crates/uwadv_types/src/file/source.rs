//! Seekable, length-bounded byte reader used by every decoder.
//!
//! All legacy files are small, so a [`ByteSource`] always holds the complete
//! file in memory. Multi-byte values are little-endian.

use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

/// In-memory byte reader with a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteSource {
	/// File name used in diagnostics
	name: String,

	/// File contents and current position
	cursor: Cursor<Vec<u8>>,
}

impl ByteSource {
	/// Opens a file and reads it completely.
	pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
		let path = path.as_ref();
		let data = std::fs::read(path)?;
		let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();

		Ok(Self::from_bytes(name, data))
	}

	/// Creates a source over data already in memory.
	pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
		Self {
			name: name.into(),
			cursor: Cursor::new(data),
		}
	}

	/// Reads everything from `reader` into a new source.
	pub fn from_reader<R: Read>(name: impl Into<String>, reader: &mut R) -> io::Result<Self> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Ok(Self::from_bytes(name, data))
	}

	/// File name this source was created with.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Total length in bytes.
	#[inline]
	pub fn len(&self) -> u64 {
		self.cursor.get_ref().len() as u64
	}

	/// Returns `true` if the source holds no data at all.
	#[inline]
	pub fn is_empty(&self) -> bool {
		self.cursor.get_ref().is_empty()
	}

	/// Current read position.
	#[inline]
	pub fn tell(&self) -> u64 {
		self.cursor.position()
	}

	/// Number of bytes left after the current position.
	#[inline]
	pub fn remaining(&self) -> u64 {
		self.len().saturating_sub(self.tell())
	}

	/// Moves the read position. Seeking past the end is allowed; later reads
	/// then fail with [`io::ErrorKind::UnexpectedEof`].
	pub fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
		self.cursor.seek(pos)
	}

	/// Reads one byte.
	#[inline]
	pub fn read_u8(&mut self) -> io::Result<u8> {
		let mut buf = [0u8; 1];
		self.cursor.read_exact(&mut buf)?;
		Ok(buf[0])
	}

	/// Reads a little-endian `u16`.
	pub fn read_u16(&mut self) -> io::Result<u16> {
		let mut buf = [0u8; 2];
		self.cursor.read_exact(&mut buf)?;
		Ok(u16::from_le_bytes(buf))
	}

	/// Reads a little-endian `u32`.
	pub fn read_u32(&mut self) -> io::Result<u32> {
		let mut buf = [0u8; 4];
		self.cursor.read_exact(&mut buf)?;
		Ok(u32::from_le_bytes(buf))
	}

	/// Fills `buf` completely or fails with `UnexpectedEof`.
	pub fn read_exact_into(&mut self, buf: &mut [u8]) -> io::Result<()> {
		self.cursor.read_exact(buf)
	}

	/// Reads up to `n` bytes; fewer are returned at the end of the data.
	pub fn read_buffer(&mut self, n: usize) -> Vec<u8> {
		let start = self.tell().min(self.len()) as usize;
		let end = start.saturating_add(n).min(self.len() as usize);
		let bytes = self.cursor.get_ref()[start..end].to_vec();
		self.cursor.set_position(end as u64);
		bytes
	}

	/// Reads into `buf` as far as data is available and returns the count.
	pub fn read_into(&mut self, buf: &mut [u8]) -> usize {
		let mut filled = 0;
		while filled < buf.len() {
			match self.cursor.read(&mut buf[filled..]) {
				Ok(0) | Err(_) => break,
				Ok(n) => filled += n,
			}
		}
		filled
	}

	/// Iterator over the bytes from the current position onwards.
	///
	/// Every byte yielded advances the position, so a decoder that stops
	/// early leaves the source right behind the last byte it used.
	pub fn bytes(&mut self) -> Bytes<'_> {
		Bytes {
			source: self,
		}
	}
}

/// Byte iterator returned by [`ByteSource::bytes`].
#[derive(Debug)]
pub struct Bytes<'a> {
	source: &'a mut ByteSource,
}

impl Iterator for Bytes<'_> {
	type Item = u8;

	fn next(&mut self) -> Option<u8> {
		self.source.read_u8().ok()
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let remaining = self.source.remaining() as usize;
		(remaining, Some(remaining))
	}
}
