use super::*;

#[test]
fn portrait_size_keeps_three_by_four() {
    let s = SurfaceSize::portrait_3x4(300).unwrap();
    assert_eq!((s.width, s.height), (300, 400));
    assert_eq!(SurfaceSize::default(), SurfaceSize::POSTER);
}

#[test]
fn zero_sized_surface_is_rejected() {
    assert!(SurfaceSize::new(0, 10).is_err());
    assert!(SurfaceSize::new(10, 0).is_err());
}

#[test]
fn scaled_multiplies_both_sides() {
    let s = SurfaceSize::new(123, 45).unwrap().scaled(3).unwrap();
    assert_eq!((s.width, s.height), (369, 135));
    assert!(SurfaceSize::new(u32::MAX, 1).unwrap().scaled(3).is_err());
}

#[test]
fn hex_and_alpha_helpers() {
    let c = Rgba8::hex(0xb45309);
    assert_eq!((c.r, c.g, c.b, c.a), (0xb4, 0x53, 0x09, 255));
    assert_eq!(Rgba8::WHITE.with_alpha(0.2).a, 51);
    assert_eq!(Rgba8::WHITE.with_alpha(0.2).to_css_hex(), "#ffffff33");
    assert_eq!(c.to_css_hex(), "#b45309");
}

#[test]
fn premul_scales_color_channels() {
    let p = Rgba8::WHITE.with_alpha(0.5).premul();
    assert_eq!(p.a, 128);
    assert_eq!(p.r, 128);
    assert_eq!(Rgba8::TRANSPARENT.premul(), Rgba8Premul::transparent());
}
