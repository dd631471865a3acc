use std::io::Cursor;
use std::path::PathBuf;

use super::*;

fn png_bytes() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn png_payload_is_accepted_with_mime() {
    let p = Photo::from_bytes(png_bytes()).unwrap();
    assert_eq!(p.mime(), "image/png");
    assert!(p.data_url().starts_with("data:image/png;base64,iVBORw0KGgo"));
}

#[test]
fn non_image_payload_is_a_file_read_error() {
    let err = Photo::from_bytes(b"hello, world".to_vec()).unwrap_err();
    assert!(matches!(err, PosterError::FileRead(_)));
}

#[test]
fn missing_file_is_a_file_read_error() {
    let err = Photo::read(&PathBuf::from("target/does-not-exist/photo.png")).unwrap_err();
    assert!(matches!(err, PosterError::FileRead(_)));
}

#[test]
fn read_from_disk_round_trips_bytes() {
    let dir = PathBuf::from("target").join("unit_photo");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("p.png");
    let bytes = png_bytes();
    std::fs::write(&path, &bytes).unwrap();

    let p = Photo::read(&path).unwrap();
    assert_eq!(p.bytes(), bytes.as_slice());
    assert!(format!("{p:?}").contains("image/png"));
}
