use std::convert::Infallible;

use super::*;

fn mono(s: &str) -> Result<f32, Infallible> {
    Ok(s.chars().count() as f32 * 10.0)
}

#[test]
fn fitting_text_is_borrowed_unchanged() {
    let out = ellipsize("Ayesha", 60.0, mono).unwrap();
    assert!(matches!(out, Cow::Borrowed("Ayesha")));
}

#[test]
fn overflowing_text_is_cut_with_ellipsis() {
    let out = ellipsize("Ayesha Khan", 60.0, mono).unwrap();
    assert_eq!(out, "Ayesh\u{2026}");
    assert!(mono(&out).unwrap() <= 60.0);
}

#[test]
fn trailing_space_before_ellipsis_is_trimmed() {
    let out = ellipsize("Ali Raza Khan", 50.0, mono).unwrap();
    assert_eq!(out, "Ali\u{2026}");
}

#[test]
fn multibyte_text_splits_on_char_boundaries() {
    let out = ellipsize("ÄÖÜßéèêë", 40.0, mono).unwrap();
    assert_eq!(out, "ÄÖÜ\u{2026}");
}

#[test]
fn nothing_fits_leaves_only_the_ellipsis() {
    let out = ellipsize("Long", 5.0, mono).unwrap();
    assert_eq!(out, "\u{2026}");
}

#[test]
fn measure_errors_propagate() {
    let r = ellipsize("abc", 1.0, |_| Err::<f32, &str>("no font"));
    assert_eq!(r.unwrap_err(), "no font");
}

#[test]
fn font_book_falls_back_to_body() {
    let face = FontFace::from_bytes(vec![0, 1, 2], 0);
    let book = FontBook::single(face);
    assert!(book.face(FontClass::Display).is_some());
    assert!(book.face(FontClass::Script).is_some());
    assert!(FontBook::empty().face(FontClass::Body).is_none());
    assert!(FontBook::empty().is_empty());
}

#[test]
fn engine_without_faces_skips_layout() {
    let mut engine = TextLayoutEngine::new(&FontBook::empty()).unwrap();
    let out = engine
        .layout_line("hi", FontClass::Body, 12.0, 0.0, TextBrushRgba8::default())
        .unwrap();
    assert!(out.is_none());
    assert!(engine.layout_line("hi", FontClass::Body, 0.0, 0.0, TextBrushRgba8::default()).is_err());
}
