//! The fixed 18-byte TGA file header.
//!
//! Fields are serialized one at a time in file order, multi-byte fields
//! little-endian. The in-memory layout of [`TgaHeader`] plays no part in
//! the encoding.
//!
//! ```text
//! offset size field
//!      0    1 id length
//!      1    1 colour-map type
//!      2    1 image type
//!      3    2 colour-map origin
//!      5    2 colour-map length
//!      7    1 colour-map entry size
//!      8    2 x-origin
//!     10    2 y-origin
//!     12    2 width
//!     14    2 height
//!     16    1 bits per pixel
//!     17    1 image descriptor
//! ```

use std::io::{self, Write};
use tgakit_common::error::{KitError, KitResult};

/// Encoded header size in bytes.
pub const HEADER_LEN: usize = 18;

/// Bits per pixel for 8-bit-per-channel BGR records.
pub const TRUE_COLOR_BPP: u8 = 24;

/// Uncompressed TGA image types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ImageType {
    /// Header only, no image data.
    NoImage = 0,
    /// Palette indices.
    ColorMapped = 1,
    /// Direct BGR(A) pixel records.
    TrueColor = 2,
    /// Single-channel intensity.
    Grayscale = 3,
}

impl From<ImageType> for u8 {
    fn from(kind: ImageType) -> Self {
        kind as u8
    }
}

/// TGA header fields in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TgaHeader {
    /// Length of the image-ID field that follows the header.
    pub id_length: u8,
    /// 0 when no colour map is present.
    pub color_map_type: u8,
    /// Pixel data encoding.
    pub image_type: ImageType,
    /// First colour-map entry index.
    pub color_map_origin: u16,
    /// Number of colour-map entries.
    pub color_map_length: u16,
    /// Bits per colour-map entry.
    pub color_map_entry_size: u8,
    /// Horizontal screen origin.
    pub x_origin: u16,
    /// Vertical screen origin.
    pub y_origin: u16,
    /// Image width in pixels.
    pub width: u16,
    /// Image height in pixels.
    pub height: u16,
    /// Bits per pixel record.
    pub bits_per_pixel: u8,
    /// Alpha depth and origin flags.
    pub image_descriptor: u8,
}

impl TgaHeader {
    /// Header for an uncompressed 24-bit image with no ID or colour map.
    ///
    /// # Errors
    ///
    /// Returns [`KitError::DimensionOverflow`] if either dimension exceeds
    /// `u16::MAX`.
    pub fn true_color(width: usize, height: usize) -> KitResult<Self> {
        let overflow = || KitError::DimensionOverflow { width, height };
        Ok(Self {
            id_length: 0,
            color_map_type: 0,
            image_type: ImageType::TrueColor,
            color_map_origin: 0,
            color_map_length: 0,
            color_map_entry_size: 0,
            x_origin: 0,
            y_origin: 0,
            width: u16::try_from(width).map_err(|_| overflow())?,
            height: u16::try_from(height).map_err(|_| overflow())?,
            bits_per_pixel: TRUE_COLOR_BPP,
            image_descriptor: 0,
        })
    }

    /// Serialize to the on-disk byte layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0] = self.id_length;
        out[1] = self.color_map_type;
        out[2] = self.image_type.into();
        out[3..5].copy_from_slice(&self.color_map_origin.to_le_bytes());
        out[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        out[7] = self.color_map_entry_size;
        out[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        out[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        out[12..14].copy_from_slice(&self.width.to_le_bytes());
        out[14..16].copy_from_slice(&self.height.to_le_bytes());
        out[16] = self.bits_per_pixel;
        out[17] = self.image_descriptor;
        out
    }

    /// Write the serialized header to `writer`.
    ///
    /// # Errors
    ///
    /// Propagates any error from `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())
    }

    /// Number of pixel-record bytes the header promises.
    #[must_use]
    pub fn pixel_data_len(&self) -> usize {
        usize::from(self.width) * usize::from(self.height) * usize::from(self.bits_per_pixel / 8)
    }
}
