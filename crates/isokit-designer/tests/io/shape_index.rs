use isokit_designer::{ShapeKind, ShapeLibrary, ShapeLibraryError};
use tempfile::TempDir;

use crate::common::{CUBE, TAG};

#[test]
fn test_index_reads_files_relative_to_itself() {
    let dir = TempDir::new().expect("tempdir");
    std::fs::create_dir(dir.path().join("svg")).expect("mkdir");
    std::fs::write(dir.path().join("svg").join("cube.svg"), CUBE).expect("write cube");
    let index = dir.path().join("index.json");
    std::fs::write(
        &index,
        format!(
            r#"[
                {{"name": "cube", "type": "3D", "svgFile": "svg/cube.svg"}},
                {{"name": "tag", "type": "2D", "attachTo": "attach-center", "svgContent": {}}}
            ]"#,
            serde_json::to_string(TAG).expect("quote")
        ),
    )
    .expect("write index");

    let library = ShapeLibrary::load_index(&index).expect("load");
    assert_eq!(library.names(), vec!["cube", "tag"]);
    assert_eq!(library.get("cube").map(|s| s.svg_content.as_str()), Some(CUBE));
    assert_eq!(library.shapes_of_kind(ShapeKind::Block).len(), 1);
}

#[test]
fn test_missing_svg_file_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let index = dir.path().join("index.json");
    std::fs::write(&index, r#"[{"name": "cube", "type": "3D", "svgFile": "gone.svg"}]"#)
        .expect("write index");

    assert!(matches!(
        ShapeLibrary::load_index(&index),
        Err(ShapeLibraryError::Io(_))
    ));
}
