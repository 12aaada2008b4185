//! Common utilities for acceptance tests.
//!
//! Decodes written files field by field against the TGA header table so
//! the checks do not share code with the encoder under test.

use std::path::Path;

/// Header fields as read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_origin: u16,
    pub color_map_length: u16,
    pub color_map_entry_size: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub image_descriptor: u8,
}

/// A written file split into header and pixel bytes.
#[derive(Debug, Clone)]
pub struct ParsedTga {
    pub header: ParsedHeader,
    pub pixel_bytes: Vec<u8>,
}

fn le16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

/// Split raw file bytes at the 18-byte header boundary.
pub fn parse(bytes: &[u8]) -> ParsedTga {
    assert!(bytes.len() >= 18, "file shorter than a header: {} bytes", bytes.len());
    ParsedTga {
        header: ParsedHeader {
            id_length: bytes[0],
            color_map_type: bytes[1],
            image_type: bytes[2],
            color_map_origin: le16(bytes, 3),
            color_map_length: le16(bytes, 5),
            color_map_entry_size: bytes[7],
            x_origin: le16(bytes, 8),
            y_origin: le16(bytes, 10),
            width: le16(bytes, 12),
            height: le16(bytes, 14),
            bits_per_pixel: bytes[16],
            image_descriptor: bytes[17],
        },
        pixel_bytes: bytes[18..].to_vec(),
    }
}

/// Read and parse a file from disk.
pub fn read_tga(path: &Path) -> ParsedTga {
    let bytes = std::fs::read(path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()));
    parse(&bytes)
}

/// Header every uncompressed 24-bit image should carry.
pub fn expected_header(width: u16, height: u16) -> ParsedHeader {
    ParsedHeader {
        id_length: 0,
        color_map_type: 0,
        image_type: 2,
        color_map_origin: 0,
        color_map_length: 0,
        color_map_entry_size: 0,
        x_origin: 0,
        y_origin: 0,
        width,
        height,
        bits_per_pixel: 24,
        image_descriptor: 0,
    }
}
