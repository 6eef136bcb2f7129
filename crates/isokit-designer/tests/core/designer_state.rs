use isokit_designer::{DesignerState, LibraryError, Point};

use crate::common::{assert_close, library};

/// Cube root with a second cube on top; the top cube is selected.
fn stacked() -> (DesignerState, String, String) {
    let mut state = DesignerState::new(library());
    let root = state.add_3d_shape("cube", "center", None).expect("root");
    state.select(Some(&root));
    let top = state.add_3d_shape("cube", "top", None).expect("top");
    state.select(Some(&top));
    (state, root, top)
}

#[test]
fn test_add_requires_selection_after_root() {
    let mut state = DesignerState::new(library());
    assert!(state.add_3d_shape("cube", "center", None).is_some());
    assert!(state.add_3d_shape("cube", "top", None).is_none());
    assert_eq!(state.components.len(), 1);
}

#[test]
fn test_undo_redo_round_trip() {
    let (mut state, root, _) = stacked();
    assert!(state.is_modified);
    assert_eq!(state.components.len(), 2);

    assert!(state.undo());
    assert_eq!(state.components.len(), 1);
    assert!(state.selected_id.is_none(), "selection of an undone node is dropped");

    assert!(state.redo());
    assert_eq!(state.components.len(), 2);

    state.select(Some(&root));
    assert!(state.remove_selected());
    assert!(state.components.is_empty());
    assert!(!state.can_redo());
    assert!(state.undo());
    assert_eq!(state.components.len(), 2);
}

#[test]
fn test_noop_edits_record_no_history() {
    let (mut state, root, _) = stacked();
    let before = state.components.clone();
    assert!(!state.cut(&root), "root cannot be cut");
    assert!(!state.remove_3d_shape("missing"));
    assert_eq!(state.components, before);
    assert!(state.undo());
    assert!(state.undo());
    assert!(!state.undo());
}

#[test]
fn test_history_depth_is_bounded() {
    let mut state = DesignerState::new(library()).with_history_depth(2);
    let root = state.add_3d_shape("cube", "center", None).expect("root");
    state.select(Some(&root));
    for _ in 0..4 {
        state.add_3d_shape("cube", "top", None);
    }
    assert!(state.undo());
    assert!(state.undo());
    assert!(!state.undo());
    assert_eq!(state.components.len(), 3);
}

#[test]
fn test_available_points_follow_markup_order() {
    let (state, root, _) = stacked();
    assert_eq!(
        state.available_attachment_points(&root),
        vec![
            "none",
            "top",
            "bottom",
            "front-left",
            "front-right",
            "back-left",
            "back-right"
        ]
    );
    assert_eq!(state.available_attachment_points("missing"), vec!["none"]);
}

#[test]
fn test_attach_at_click_skips_hidden_faces() {
    let (state, root, _) = stacked();
    let choice = state.attach_at_click(&root, Point::new(29.0, 31.0));
    assert_eq!(choice.position, "front-right");
    assert_eq!(choice.attachment_point, "front-right");

    // Nearest overall is the bottom anchor, which is never offered
    let choice = state.attach_at_click(&root, Point::new(20.0, 40.0));
    assert_ne!(choice.position, "bottom");

    let fallback = state.attach_at_click("missing", Point::ORIGIN);
    assert_eq!(fallback.position, "top");
    assert_eq!(fallback.attachment_point, "none");
}

#[test]
fn test_cut_and_paste_through_state() {
    let (mut state, root, top) = stacked();
    state.select(Some(&root));
    let side = state.add_3d_shape("cube", "front-right", None).expect("side");

    assert!(state.cut(&top));
    assert!(state.paste(&side, "top", None));
    let moved = state.components.iter().find(|c| c.id == top).expect("moved");
    assert_eq!(moved.relative_to_id.as_deref(), Some(side.as_str()));
    assert!(state.components.iter().all(|c| !c.cut));
}

#[test]
fn test_copy_cancels_pending_cut() {
    let (mut state, root, top) = stacked();
    assert!(state.cut(&top));
    assert!(state.copy(&root));
    assert!(state.components.iter().all(|c| !c.cut));
    assert_eq!(state.clipboard.len(), 2);

    assert!(state.paste(&top, "top", None));
    assert!(state.paste(&top, "top", None));
    assert_eq!(state.components.len(), 6);
}

#[test]
fn test_save_selection_requires_selection() {
    let mut state = DesignerState::new(library());
    assert!(matches!(
        state.save_selection_as_component("tower", "", false),
        Err(LibraryError::EmptyComponent)
    ));
}

#[test]
fn test_library_component_round_trip() {
    let (mut state, root, _) = stacked();
    state.select(Some(&root));
    let tower = state
        .save_selection_as_component("tower", "two stacked cubes", false)
        .expect("saved");

    let saved = state.component_library.get(&tower).expect("stored");
    assert_eq!(saved.diagram_components.len(), 2);
    let top = saved
        .attachment_points
        .iter()
        .find(|a| a.name == "attach-top")
        .expect("top");
    assert_close(top.point(), Point::new(20.0, -40.0));

    assert!(matches!(
        state.save_selection_as_component("tower", "", false),
        Err(LibraryError::DuplicateName { .. })
    ));
    let again = state
        .save_selection_as_component("tower", "updated", true)
        .expect("overwrite");
    assert_eq!(again, tower);

    // Instantiate the tower on the selected root
    let instance = state.add_3d_shape(&tower, "top", None).expect("instance");
    let compiled = state.compile();
    let placed = compiled
        .component(&instance)
        .and_then(|c| c.absolute_position)
        .expect("placed");
    let parent = compiled
        .component(&root)
        .and_then(|c| c.absolute_position)
        .expect("parent");
    // seats the tower's aggregated bottom (20, 40) on the root's top (20, 0)
    assert_close(placed, Point::new(parent.x, parent.y - 40.0));
    assert!(state.render_document().contains(&format!("data-shape=\"{tower}\"")));
}

#[test]
fn test_new_diagram_resets_session() {
    let (mut state, _, _) = stacked();
    state.new_diagram();
    assert!(state.components.is_empty());
    assert!(!state.can_undo());
    assert!(!state.is_modified);
    assert_eq!(state.design_name, "Untitled");
}
