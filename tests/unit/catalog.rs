use super::*;

#[test]
fn ids_are_unique_and_default_exists() {
    let ids: Vec<&str> = catalog().iter().map(|t| t.id).collect();
    for (i, id) in ids.iter().enumerate() {
        assert!(!ids[i + 1..].contains(id), "duplicate template id {id}");
    }
    assert!(find(DEFAULT_TEMPLATE_ID).is_some());
    assert_eq!(catalog().len(), 6);
}

#[test]
fn unknown_id_resolves_to_fallback() {
    assert!(find("neon-dreams").is_none());
    let t = resolve("neon-dreams");
    assert_eq!(t.id, FALLBACK_TEMPLATE.id);
    assert_eq!(t.text_mode, TextColorMode::LightOnDark);
    assert!(t.layers.is_empty());
}

#[test]
fn only_pure_white_is_dark_on_light() {
    for t in catalog() {
        let expected = if t.id == "pure-white" {
            TextColorMode::DarkOnLight
        } else {
            TextColorMode::LightOnDark
        };
        assert_eq!(t.text_mode, expected, "{}", t.id);
    }
}

#[test]
fn festive_gold_has_gold_gradient_and_overlay_texture() {
    let t = resolve("festive-gold");
    let Fill::Linear { direction, stops } = t.layers[0].fill else {
        panic!("first festive-gold layer should be a linear gradient");
    };
    assert_eq!(direction, GradientDirection::ToTopRight);
    assert_eq!(stops.last().map(|s| s.color), Some(Rgba8::hex(0xfbbf24)));
    assert_eq!(t.layers[1].blend, BlendMode::Overlay);
    assert_eq!(t.sparkles, 12);
    assert_eq!(t.palette().avatar_border, Rgba8::hex(0xfde68a).with_alpha(0.5));
}

#[test]
fn layer_opacities_are_in_unit_range() {
    for t in catalog() {
        for l in t.layers.iter().chain(t.swatch) {
            assert!((0.0..=1.0).contains(&l.opacity), "{}", t.id);
        }
    }
}

#[test]
fn palettes_differ_by_mode() {
    let light = Palette::for_mode(TextColorMode::LightOnDark);
    let dark = Palette::for_mode(TextColorMode::DarkOnLight);
    assert_eq!(light.text, Rgba8::WHITE);
    assert_eq!(dark.text, Rgba8::hex(0x0f172a));
    assert!(light.headline_shadow.is_some());
    assert!(dark.headline_shadow.is_none());
    assert!(light.logo_tint_white && !dark.logo_tint_white);
}
