//! Uncompressed true-colour TGA encoder.
//!
//! - **Header** ([`header`]): the fixed 18-byte TGA header
//! - **Pixels** ([`pixel`]): in-memory RGB triples and their BGR disk order
//! - **Image** ([`image`]): an owned pixel buffer that writes itself to disk
//!
//! # Example
//!
//! ```no_run
//! use tgakit_tga::TgaImage;
//!
//! let rgb = [10u8, 20, 30];
//! let image = TgaImage::new(Some(rgb.as_slice()), 1, 1)?;
//! image.write("out.tga")?;
//! # Ok::<(), tgakit_common::KitError>(())
//! ```

pub mod header;
pub mod image;
pub mod pixel;

pub use header::{ImageType, TgaHeader, HEADER_LEN};
pub use image::TgaImage;
pub use pixel::Rgb;
