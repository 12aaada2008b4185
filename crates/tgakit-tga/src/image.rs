//! Owned RGB pixel buffer with TGA output.
//!
//! A [`TgaImage`] is immutable once built. Writing it never changes its
//! state, so the same image can be written any number of times, from any
//! number of threads, to distinct paths.
//!
//! Pixels are emitted in stored order; no vertical flip is applied. With a
//! zero image descriptor readers treat the first stored row as the bottom
//! row, so callers wanting a top-down file must supply rows bottom-up.

use crate::header::{TgaHeader, HEADER_LEN};
use crate::pixel::Rgb;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tgakit_common::error::{KitError, KitResult};
use tracing::{debug, warn};

/// Rectangular RGB image ready to be encoded as uncompressed TGA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgaImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl TgaImage {
    /// Build an image from a flat, row-major RGB byte source.
    ///
    /// With `Some(source)` exactly `width * height * 3` bytes are copied;
    /// trailing bytes are ignored. With `None` the pixel buffer stays empty
    /// whatever the dimensions, and a later [`TgaImage::write`] emits a
    /// header with no pixel records after it.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::SourceTooShort`] if `source` holds fewer bytes
    /// than the dimensions require, or [`KitError::DimensionOverflow`] if
    /// the byte count does not fit in `usize`.
    pub fn new(source: Option<&[u8]>, width: usize, height: usize) -> KitResult<Self> {
        let pixels = match source {
            Some(bytes) => {
                let expected = width
                    .checked_mul(height)
                    .and_then(|n| n.checked_mul(Rgb::CHANNELS))
                    .ok_or(KitError::DimensionOverflow { width, height })?;
                if bytes.len() < expected {
                    return Err(KitError::SourceTooShort {
                        expected,
                        actual: bytes.len(),
                    });
                }
                bytes[..expected]
                    .chunks_exact(Rgb::CHANNELS)
                    .map(|c| Rgb::new(c[0], c[1], c[2]))
                    .collect()
            }
            None => Vec::new(),
        };

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build an image from already-typed pixels.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::PixelCountMismatch`] unless
    /// `pixels.len() == width * height`.
    pub fn from_pixels(pixels: Vec<Rgb>, width: usize, height: usize) -> KitResult<Self> {
        let expected = width
            .checked_mul(height)
            .ok_or(KitError::DimensionOverflow { width, height })?;
        if pixels.len() != expected {
            return Err(KitError::PixelCountMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width recorded at construction.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height recorded at construction.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Stored pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// True when no pixels are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Size of the encoded file in bytes.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.pixels.len() * Rgb::CHANNELS
    }

    /// Header describing this image.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::DimensionOverflow`] if a dimension exceeds 65535.
    pub fn header(&self) -> KitResult<TgaHeader> {
        TgaHeader::true_color(self.width, self.height)
    }

    /// Encode header and pixel records into `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::DimensionOverflow`] before writing anything if
    /// the dimensions cannot be encoded, or [`KitError::Write`] if
    /// `writer` fails.
    pub fn encode_to<W: Write>(&self, writer: &mut W) -> KitResult<()> {
        let header = self.header()?;
        self.write_records(&header, writer).map_err(KitError::Write)
    }

    /// Encode the whole file into memory.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::DimensionOverflow`] if the dimensions cannot be
    /// encoded.
    pub fn to_bytes(&self) -> KitResult<Vec<u8>> {
        let mut out = Vec::with_capacity(self.encoded_len());
        self.encode_to(&mut out)?;
        Ok(out)
    }

    /// Write the image to `path`, truncating any existing file.
    ///
    /// The write is not atomic: a failure part way through leaves a
    /// truncated file behind.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::DimensionOverflow`] without touching the file
    /// system if the dimensions cannot be encoded, or [`KitError::Io`] if
    /// the file cannot be created or written.
    pub fn write(&self, path: impl AsRef<Path>) -> KitResult<()> {
        let path = path.as_ref();
        let header = self.header()?;

        if self.pixels.len() != header.pixel_data_len() / Rgb::CHANNELS {
            warn!(
                path = %path.display(),
                width = self.width,
                height = self.height,
                stored_pixels = self.pixels.len(),
                "Header describes more pixels than the buffer holds"
            );
        }

        let file = File::create(path).map_err(|e| KitError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        self.write_records(&header, &mut writer)
            .and_then(|()| writer.flush())
            .map_err(|e| KitError::io(path, e))?;

        debug!(
            path = %path.display(),
            width = self.width,
            height = self.height,
            bytes = self.encoded_len(),
            "Wrote TGA image"
        );
        Ok(())
    }

    fn write_records<W: Write>(&self, header: &TgaHeader, writer: &mut W) -> std::io::Result<()> {
        header.write_to(writer)?;
        for px in &self.pixels {
            writer.write_all(&px.to_bgr())?;
        }
        Ok(())
    }
}
