use super::*;

#[test]
fn dir_sink_creates_the_directory_and_writes() {
    let dir = PathBuf::from("target").join("dir_sink").join("nested");
    let _ = std::fs::remove_dir_all(dir.parent().unwrap());

    let sink = DirSink::new(&dir);
    let path = sink.save("a.png", b"abc").unwrap();
    assert_eq!(path, dir.join("a.png"));
    assert_eq!(std::fs::read(&path).unwrap(), b"abc");
}

#[test]
fn memory_sink_keeps_save_order() {
    let sink = MemorySink::new();
    sink.save("one", b"1").unwrap();
    sink.save("two", b"2").unwrap();
    let names: Vec<_> = sink.files().into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["one", "two"]);
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn dir_sink_leaves_only_the_final_file() {
    let dir = PathBuf::from("target").join("dir_sink_final");
    let _ = std::fs::remove_dir_all(&dir);

    DirSink::new(&dir).save("poster.png", b"png").unwrap();
    assert_eq!(entries(&dir), ["poster.png"]);
}

#[test]
fn failed_save_leaves_no_partial_file() {
    let dir = PathBuf::from("target").join("dir_sink_failure");
    let _ = std::fs::remove_dir_all(&dir);
    // A non-empty directory already owns the final name, so the rename fails.
    std::fs::create_dir_all(dir.join("poster.png")).unwrap();
    std::fs::write(dir.join("poster.png").join("keep"), b"x").unwrap();

    let err = DirSink::new(&dir).save("poster.png", b"png").unwrap_err();
    assert!(matches!(err, PosterError::Save(_)));
    assert_eq!(entries(&dir), ["poster.png"]);
    assert!(dir.join("poster.png").is_dir());
}
