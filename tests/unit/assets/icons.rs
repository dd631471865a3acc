use super::*;

#[test]
fn every_icon_parses() {
    for icon in [Icon::User, Icon::Globe, Icon::Instagram, Icon::Phone] {
        let svg = icon_svg(icon, Rgba8::WHITE);
        usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
    }
}

#[test]
fn stroke_color_and_opacity_are_inlined() {
    let svg = icon_svg(Icon::User, Rgba8::WHITE.with_alpha(0.5));
    assert!(svg.contains(r##"stroke="#ffffff""##));
    assert!(svg.contains(r#"stroke-opacity="0.5020""#));
}

#[test]
fn rasterized_icon_has_coverage() {
    let px = rasterize_icon(Icon::Globe, Rgba8::hex(0xfbbf24), 48, 48).unwrap();
    assert_eq!(px.len(), 48 * 48 * 4);
    assert!(px.chunks_exact(4).any(|p| p[3] > 0));
    assert!(px.chunks_exact(4).any(|p| p[3] == 0));
}

#[test]
fn zero_sized_icon_is_rejected() {
    assert!(rasterize_icon(Icon::Phone, Rgba8::WHITE, 0, 10).is_err());
}
