//! Test pattern generators.
//!
//! Each generator fills a flat, row-major RGB byte buffer of
//! `width * height * 3` bytes.

use tgakit_common::config::{KitConfig, PatternKind};

/// Render the configured pattern.
pub fn generate(config: &KitConfig) -> Vec<u8> {
    let (w, h) = (config.width, config.height);
    match config.pattern {
        PatternKind::Gradient => fill(w, h, |x, y| [ramp(x, w), ramp(y, h), 128]),
        PatternKind::Checkerboard => {
            let cell = config.cell_size.max(1);
            fill(w, h, |x, y| {
                if (x / cell + y / cell) % 2 == 0 {
                    config.color
                } else {
                    [0, 0, 0]
                }
            })
        }
        PatternKind::Solid => fill(w, h, |_, _| config.color),
    }
}

fn fill(width: usize, height: usize, mut shade: impl FnMut(usize, usize) -> [u8; 3]) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            out.extend_from_slice(&shade(x, y));
        }
    }
    out
}

/// Scale `pos` in `0..len` onto `0..=255`.
fn ramp(pos: usize, len: usize) -> u8 {
    let span = len.saturating_sub(1).max(1);
    u8::try_from(pos * 255 / span).unwrap_or(u8::MAX)
}
