use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PosterError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PosterError::capture("x")
            .to_string()
            .contains("capture error:")
    );
    assert!(PosterError::encode("x").to_string().contains("encode error:"));
    assert!(PosterError::save("x").to_string().contains("save error:"));
    assert!(
        PosterError::file_read("x")
            .to_string()
            .contains("file read error:")
    );
    assert!(PosterError::build("x").to_string().contains("build error:"));
    assert!(
        PosterError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert_eq!(PosterError::Busy.to_string(), "export already in progress");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PosterError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
