use isokit_designer::{compile_diagram, Attached2DShape, CanvasSize, DesignerState};

use crate::common::{abc, library, node};

#[test]
fn test_anchor_visibility_follows_flag() {
    let mut state = DesignerState::new(library());
    state.components = abc();

    let hidden = state.render_document();
    assert!(hidden.contains(r#"visibility="hidden""#));
    assert!(!hidden.contains(r#"visibility="visible""#));

    state.show_anchors = true;
    let shown = state.render_document();
    assert!(shown.contains(r#"visibility="visible""#));
    assert!(!shown.contains(r#"visibility="hidden""#));
    assert!(shown.starts_with("<svg"));
    assert!(shown.contains(r#"width="1200" height="800""#));
}

#[test]
fn test_painter_order_matches_list_order() {
    let out = compile_diagram(&abc(), CanvasSize::default(), &library(), false);
    let a = out.content.find(r#"<g id="A""#).expect("A");
    let b = out.content.find(r#"<g id="B""#).expect("B");
    let c = out.content.find(r#"<g id="C""#).expect("C");
    assert!(a < b && b < c);
    assert!(out.content.contains(r#"<g id="B" data-shape="cube" transform="translate(580, 420)">"#));
}

#[test]
fn test_decorations_follow_their_anchor() {
    let mut root = node("A", "cube", "center", None);
    root.attached_2d_shapes = vec![
        Attached2DShape::new("tag", "front-left"),
        Attached2DShape::new("tag", "nowhere"),
        Attached2DShape::new("ghost", "top"),
    ];
    let out = compile_diagram(&[root], CanvasSize::default(), &library(), false);

    // tag's attach-center (5,3) onto the cube's front-left (10,30)
    assert!(out
        .content
        .contains(r#"<g data-decoration="tag" transform="translate(5, 27)">"#));
    // unknown anchor falls back to the owner origin
    assert!(out
        .content
        .contains(r#"<g data-decoration="tag" transform="translate(-5, -3)">"#));
    assert!(!out.content.contains("ghost"));
}

#[test]
fn test_unknown_shape_keeps_dependents_compiling() {
    let scene = vec![
        node("A", "cube", "center", None),
        node("B", "pyramid", "top", Some("A")),
        node("C", "cube", "top", Some("B")),
    ];
    let out = compile_diagram(&scene, CanvasSize::default(), &library(), false);
    assert_eq!(out.processed_components.len(), 3);
    assert!(out.processed_components[1].absolute_position.is_none());
    assert!(out.component("C").and_then(|c| c.absolute_position).is_some());
    assert!(!out.content.contains("pyramid"));
}

#[test]
fn test_nested_library_components() {
    let mut state = DesignerState::new(library());
    let root = state.add_3d_shape("cube", "center", None).expect("root");
    state.select(Some(&root));
    state.add_3d_shape("cube", "top", None);
    let pair = state
        .save_selection_as_component("pair", "", false)
        .expect("pair");

    state.new_diagram();
    let base = state.add_3d_shape(&pair, "center", None).expect("pair root");
    state.select(Some(&base));
    state.add_3d_shape("cube", "front-left", None);
    let quad = state
        .save_selection_as_component("pair-plus", "", false)
        .expect("nested");

    state.new_diagram();
    state.add_3d_shape(&quad, "center", None).expect("instance");
    let doc = state.render_document();
    assert!(doc.contains(&format!(r#"data-shape="{quad}""#)));
    // library internals are inlined without their ids
    assert!(!doc.contains(&format!(r#"id="{root}""#)));
    assert!(doc.contains("<path"));
}
