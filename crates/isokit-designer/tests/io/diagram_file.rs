use isokit_designer::{
    compile_diagram, deserialize_components, serialize_components, Attached2DShape, CanvasSize,
    DesignerState, DiagramError, DiagramFile,
};
use tempfile::TempDir;

use crate::common::{abc, library};

#[test]
fn test_round_trip_keeps_layout() {
    let mut scene = abc();
    scene[2]
        .attached_2d_shapes
        .push(Attached2DShape::new("tag", "front-left"));

    let json = serialize_components(&scene).expect("serialize");
    assert!(!json.contains("absolutePosition"));
    let restored = deserialize_components(&json).expect("deserialize");
    assert_eq!(restored, scene);

    let lib = library();
    let before = compile_diagram(&scene, CanvasSize::default(), &lib, false);
    let after = compile_diagram(&restored, CanvasSize::default(), &lib, false);
    assert_eq!(before.content, after.content);
}

#[test]
fn test_malformed_documents_rejected() {
    assert!(matches!(
        deserialize_components("{not json"),
        Err(DiagramError::InvalidJson { .. })
    ));
    assert_eq!(deserialize_components("{}"), Err(DiagramError::NotAnArray));
    assert_eq!(
        deserialize_components(r#"[{"id": "a", "shape": "cube", "position": "center", "relativeToId": 7, "attached2DShapes": []}]"#),
        Err(DiagramError::InvalidField {
            index: 0,
            field: "relativeToId".to_string()
        })
    );
    assert!(matches!(
        deserialize_components(
            r#"[{"id": "a", "shape": "cube", "position": "center", "relativeToId": "b", "attached2DShapes": []}]"#
        ),
        Err(DiagramError::InvalidRoot { .. }) | Err(DiagramError::DanglingReference { .. })
    ));
}

#[test]
fn test_file_save_and_load() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("stack.json");

    let mut state = DesignerState::new(library());
    state.components = abc();
    state.design_name = "Stack".to_string();
    state.save_to_file(&path).expect("save");
    assert!(!state.is_modified);
    assert_eq!(state.current_file_path.as_deref(), Some(path.as_path()));

    let mut loaded = DesignerState::new(library());
    loaded.load_from_file(&path).expect("load");
    assert_eq!(loaded.components, abc());
    assert_eq!(loaded.design_name, "Stack");
    assert!(!loaded.can_undo());

    let file = DiagramFile::load_from_file(&path).expect("file");
    assert_eq!(file.version, "1.0");
    assert_eq!(file.components.len(), 3);
}

#[test]
fn test_bare_array_is_accepted() {
    let json = serialize_components(&abc()).expect("serialize");
    let file = DiagramFile::from_json(&json).expect("bare array");
    assert_eq!(file.to_components(), abc());
    assert_eq!(file.metadata.name, "Untitled");
}

#[test]
fn test_failed_load_leaves_session_untouched() {
    let dir = TempDir::new().expect("tempdir");
    let bad = dir.path().join("bad.json");
    std::fs::write(
        &bad,
        r#"[{"id": "x", "shape": "cube", "position": "center", "relativeToId": null}]"#,
    )
    .expect("write");

    let mut state = DesignerState::new(library());
    state.components = abc();
    state.select(Some("B"));

    assert!(state.load_from_file(&bad).is_err());
    assert!(state.load_from_file(dir.path().join("missing.json")).is_err());
    assert_eq!(state.components, abc());
    assert_eq!(state.selected_id.as_deref(), Some("B"));
    assert!(state.current_file_path.is_none());
}
