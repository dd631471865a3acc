use std::io::Cursor;
use std::path::PathBuf;

use super::*;

fn write_png(name: &str, rgba: [u8; 4]) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_state");
    std::fs::create_dir_all(&dir).unwrap();
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    let path = dir.join(name);
    std::fs::write(&path, buf).unwrap();
    path
}

#[test]
fn new_state_has_defaults() {
    let s = PosterState::new();
    assert_eq!(s.selected_template_id(), "festive-gold");
    assert_eq!(s.name(), "");
    assert_eq!(s.designation(), "");
    assert!(s.photo().is_none());
}

#[test]
fn unknown_template_is_rejected_without_mutation() {
    let mut s = PosterState::new();
    s.select_template("sky-blue").unwrap();
    assert!(s.select_template("no-such-template").is_err());
    assert_eq!(s.selected_template_id(), "sky-blue");
}

#[test]
fn validation_requires_two_characters() {
    let mut s = PosterState::new();
    let errs = s.validate();
    assert_eq!(errs.len(), 2);
    assert_eq!(errs[0].message, "Name must be at least 2 characters");
    assert_eq!(errs[1].field, Field::Designation);

    s.set_name("A");
    s.set_designation("CEO");
    assert_eq!(s.validate().len(), 1);

    s.set_name("Aé");
    assert!(s.is_valid());
}

#[test]
fn no_selection_is_a_silent_noop() {
    let mut s = PosterState::new();
    assert!(!s.apply_upload(None).unwrap());
    assert!(s.photo().is_none());
}

#[test]
fn upload_overwrites_and_failed_read_keeps_previous_photo() {
    let mut s = PosterState::new();
    let first = write_png("first.png", [255, 0, 0, 255]);
    let second = write_png("second.png", [0, 255, 0, 255]);

    assert!(s.apply_upload(Some(&first)).unwrap());
    let first_bytes = s.photo().unwrap().bytes().to_vec();

    assert!(s.apply_upload(Some(&second)).unwrap());
    let second_bytes = s.photo().unwrap().bytes().to_vec();
    assert_ne!(first_bytes, second_bytes);

    let bogus = PathBuf::from("target").join("unit_state").join("bogus.txt");
    std::fs::write(&bogus, b"not an image").unwrap();
    let err = s.apply_upload(Some(&bogus)).unwrap_err();
    assert!(matches!(err, PosterError::FileRead(_)));
    assert_eq!(s.photo().unwrap().bytes(), second_bytes.as_slice());
}

#[test]
fn switching_templates_preserves_photo() {
    let mut s = PosterState::new();
    let p = write_png("keep.png", [1, 2, 3, 255]);
    s.apply_upload(Some(&p)).unwrap();
    s.select_template("nature-green").unwrap();
    assert!(s.photo().is_some());
}
