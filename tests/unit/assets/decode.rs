use std::io::Cursor;

use super::*;

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_garbage_fails() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn unpremultiply_restores_straight_channels() {
    let mut px = vec![200u8, 100, 0, 255, 50, 25, 0, 128, 9, 9, 9, 0];
    let orig = px.clone();
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &orig[..4]);
    for (a, b) in px[4..7].iter().zip(&orig[4..7]) {
        assert!(a.abs_diff(*b) <= 1);
    }
    assert_eq!(&px[8..], &[0, 0, 0, 0]);
}

#[test]
fn flatten_to_white_keeps_alpha() {
    let img = PreparedImage {
        width: 2,
        height: 1,
        rgba8_premul: Arc::new(vec![10, 20, 30, 255, 5, 5, 5, 64]),
    };
    let white = flatten_to_white(&img);
    assert_eq!(white.rgba8_premul.as_slice(), &[255, 255, 255, 255, 64, 64, 64, 64]);
}
