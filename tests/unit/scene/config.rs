use std::path::PathBuf;

use super::*;

#[test]
fn empty_object_uses_defaults() {
    let cfg = PosterConfig::from_json("{}").unwrap();
    assert_eq!(cfg.template, None);
    assert_eq!(cfg.brand, Brand::default());
    assert_eq!(cfg.surface_size().unwrap(), SurfaceSize::POSTER);
}

#[test]
fn unknown_fields_are_rejected() {
    let err = PosterConfig::from_json(r#"{ "colour": "red" }"#).unwrap_err();
    assert!(matches!(err, PosterError::Serde(_)));
}

#[test]
fn partial_brand_keeps_other_defaults() {
    let cfg = PosterConfig::from_json(r#"{ "brand": { "website": "example.org" }, "width": 300 }"#)
        .unwrap();
    assert_eq!(cfg.brand.website, "example.org");
    assert_eq!(cfg.brand.headline, "#26");
    let size = cfg.surface_size().unwrap();
    assert_eq!((size.width, size.height), (300, 400));
}

#[test]
fn relative_paths_resolve_against_config_dir() {
    let dir = PathBuf::from("target").join("unit_config");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("poster.json");
    std::fs::write(
        &path,
        r#"{ "template": "sky-blue", "photo": "me.png", "fonts": { "body": "/abs/font.ttf" } }"#,
    )
    .unwrap();

    let cfg = PosterConfig::from_path(&path).unwrap();
    assert_eq!(cfg.template.as_deref(), Some("sky-blue"));
    assert_eq!(cfg.photo, Some(dir.join("me.png")));
    assert_eq!(cfg.fonts.body, Some(PathBuf::from("/abs/font.ttf")));
}
