//! Byte-exact output checks for the TGA encoder.

use super::common::{expected_header, read_tga};
use tgakit_common::KitError;
use tgakit_tga::{Rgb, TgaImage};

#[test]
fn test_single_pixel_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.tga");

    let image = TgaImage::new(Some([10, 20, 30].as_slice()), 1, 1).unwrap();
    image.write(&path).unwrap();

    let tga = read_tga(&path);
    assert_eq!(tga.header, expected_header(1, 1));
    assert_eq!(tga.pixel_bytes, vec![30, 20, 10]);
}

#[test]
fn test_two_by_two_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.tga");
    let source: [u8; 12] = [
        200, 100, 50, //
        1, 2, 3, //
        0, 255, 127, //
        9, 8, 7,
    ];

    TgaImage::new(Some(source.as_slice()), 2, 2)
        .unwrap()
        .write(&path)
        .unwrap();

    let tga = read_tga(&path);
    assert_eq!(tga.header, expected_header(2, 2));
    assert_eq!(
        tga.pixel_bytes,
        vec![50, 100, 200, 3, 2, 1, 127, 255, 0, 7, 8, 9]
    );
}

#[test]
fn test_missing_source_writes_header_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.tga");

    let image = TgaImage::new(None, 3, 2).unwrap();
    assert!(image.is_empty());
    image.write(&path).unwrap();

    let tga = read_tga(&path);
    assert_eq!(tga.header, expected_header(3, 2));
    assert!(tga.pixel_bytes.is_empty());
}

#[test]
fn test_wide_dimensions_little_endian() {
    let width = 300;
    let height = 2;
    let pixels = vec![Rgb::new(1, 2, 3); width * height];
    let bytes = TgaImage::from_pixels(pixels, width, height)
        .unwrap()
        .to_bytes()
        .unwrap();

    let tga = super::common::parse(&bytes);
    assert_eq!(tga.header.width, 300);
    assert_eq!(&bytes[12..14], &[0x2c, 0x01]);
    assert_eq!(tga.pixel_bytes.len(), width * height * 3);
    assert!(tga.pixel_bytes.chunks_exact(3).all(|px| px == [3, 2, 1]));
}

#[test]
fn test_concurrent_writes_to_distinct_paths() {
    let dir = tempfile::tempdir().unwrap();
    let image = TgaImage::new(Some([5, 6, 7, 8, 9, 10].as_slice()), 2, 1).unwrap();
    let expected = image.to_bytes().unwrap();

    std::thread::scope(|s| {
        for i in 0..4 {
            let image = &image;
            let path = dir.path().join(format!("copy-{i}.tga"));
            s.spawn(move || image.write(path).unwrap());
        }
    });

    for i in 0..4 {
        let written = std::fs::read(dir.path().join(format!("copy-{i}.tga"))).unwrap();
        assert_eq!(written, expected);
    }
}

#[test]
fn test_write_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    // A directory cannot be opened as a file
    let image = TgaImage::new(Some([1, 1, 1].as_slice()), 1, 1).unwrap();
    let err = image.write(dir.path()).unwrap_err();
    assert!(matches!(err, KitError::Io { .. }), "{err:?}");
}
