use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("meta_images").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

const HTML: &str = r#"<head><meta property="og:image" content="/opengraph.jpg"><meta name="twitter:image" content="/opengraph.jpg"></head>"#;

#[test]
fn rewrites_every_placeholder_to_the_hashed_asset() {
    let dist = scratch("hashed");
    std::fs::write(dist.join("index.html"), HTML).unwrap();
    std::fs::create_dir_all(dist.join("assets")).unwrap();
    std::fs::write(dist.join("assets").join("opengraph-3fa9c1.jpg"), b"jpg").unwrap();
    std::fs::write(dist.join("opengraph.jpg"), b"jpg").unwrap();

    let out = patch_opengraph_meta(&dist).unwrap();
    assert_eq!(
        out,
        MetaPatch::Patched {
            url: "/assets/opengraph-3fa9c1.jpg".to_string(),
            replacements: 2,
        }
    );
    let html = std::fs::read_to_string(dist.join("index.html")).unwrap();
    assert!(!html.contains(PLACEHOLDER_ATTR));
    assert_eq!(html.matches(r#"content="/assets/opengraph-3fa9c1.jpg""#).count(), 2);
}

#[test]
fn missing_entry_html_is_a_no_op() {
    let dist = scratch("no_index");
    std::fs::write(dist.join("opengraph-1.jpg"), b"jpg").unwrap();
    assert_eq!(patch_opengraph_meta(&dist).unwrap(), MetaPatch::NoEntryHtml);
}

#[test]
fn missing_asset_leaves_html_untouched() {
    let dist = scratch("no_asset");
    std::fs::write(dist.join("index.html"), HTML).unwrap();
    std::fs::write(dist.join("logo.png"), b"png").unwrap();
    assert_eq!(patch_opengraph_meta(&dist).unwrap(), MetaPatch::NoAsset);
    assert_eq!(std::fs::read_to_string(dist.join("index.html")).unwrap(), HTML);
}

#[test]
fn html_without_placeholder_reports_zero_replacements() {
    let dist = scratch("no_placeholder");
    std::fs::write(dist.join("index.html"), "<head></head>").unwrap();
    std::fs::write(dist.join("opengraph-abc.png"), b"png").unwrap();
    let out = patch_opengraph_meta(&dist).unwrap();
    assert_eq!(
        out,
        MetaPatch::Patched {
            url: "/opengraph-abc.png".to_string(),
            replacements: 0,
        }
    );
}

#[test]
fn candidates_are_chosen_deterministically() {
    let dist = scratch("ordering");
    std::fs::write(dist.join("index.html"), HTML).unwrap();
    std::fs::write(dist.join("opengraph-b.jpg"), b"b").unwrap();
    std::fs::write(dist.join("opengraph-a.jpg"), b"a").unwrap();
    let out = patch_opengraph_meta(&dist).unwrap();
    assert!(matches!(out, MetaPatch::Patched { url, .. } if url == "/opengraph-a.jpg"));
}
