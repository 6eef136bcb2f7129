//! Scene graph edit operation tests

use isokit_designer::{
    add_2d_shape, add_3d_shape, cancel_cut, copy_3d_shape, cut_3d_shape, find_dependent_shapes,
    paste_copied_3d_shapes, paste_cut_3d_shapes, remove_2d_shape, remove_3d_shape,
    validate_order, Attached2DShape,
};

use crate::common::{abc, ids, node};

#[test]
fn test_first_shape_becomes_root() {
    let list = add_3d_shape(&[], "cube", "top", None, None);
    assert_eq!(list.len(), 1);
    assert!(list[0].relative_to_id.is_none());
    assert_eq!(list[0].position, "top");
}

#[test]
fn test_add_requires_selection() {
    let list = abc();
    assert_eq!(add_3d_shape(&list, "cube", "top", None, None), list);
    assert_eq!(add_3d_shape(&list, "cube", "top", None, Some("missing")), list);
}

#[test]
fn test_add_inserts_after_last_dependent() {
    let mut list = abc();
    list.push(node("D", "cube", "front-right", Some("A")));
    let next = add_3d_shape(&list, "cube", "back-left", None, Some("B"));
    assert_eq!(next.len(), 5);
    // B's subtree is [B, C]; the new node lands right after C
    assert_eq!(&ids(&next)[..3], ["A", "B", "C"]);
    assert_eq!(next[3].relative_to_id.as_deref(), Some("B"));
    assert_eq!(next[4].id, "D");
    assert!(validate_order(&next).is_ok());
}

#[test]
fn test_explicit_attachment_point_wins() {
    let list = abc();
    let next = add_3d_shape(&list, "cube", "top", Some("attach-front-right"), Some("C"));
    assert_eq!(next.last().map(|c| c.position.as_str()), Some("front-right"));
    let next = add_3d_shape(&list, "cube", "top", Some("none"), Some("C"));
    assert_eq!(next.last().map(|c| c.position.as_str()), Some("top"));
}

#[test]
fn test_remove_takes_dependents() {
    let list = abc();
    let next = remove_3d_shape(&list, "B");
    assert_eq!(ids(&next), ["A"]);
    assert_eq!(remove_3d_shape(&list, "missing"), list);
}

#[test]
fn test_two_d_decorations() {
    let list = abc();
    assert_eq!(add_2d_shape(&list, "tag", "top", None), list);

    let next = add_2d_shape(&list, "tag", "top", Some("C"));
    let next = add_2d_shape(&next, "tag", "front-left", Some("C"));
    assert_eq!(
        next[2].attached_2d_shapes,
        vec![
            Attached2DShape::new("tag", "top"),
            Attached2DShape::new("tag", "front-left")
        ]
    );

    let next = remove_2d_shape(&next, "C", 0);
    assert_eq!(next[2].attached_2d_shapes, vec![Attached2DShape::new("tag", "front-left")]);
    assert_eq!(remove_2d_shape(&next, "C", 5), next);
}

#[test]
fn test_root_cannot_be_cut() {
    let list = abc();
    assert_eq!(cut_3d_shape(&list, "A"), list);
}

#[test]
fn test_second_cut_cancels_first() {
    let mut list = abc();
    list.push(node("D", "cube", "front-right", Some("A")));
    let staged = cut_3d_shape(&list, "B");
    assert!(staged[1].cut && staged[2].cut && !staged[3].cut);

    let restaged = cut_3d_shape(&staged, "D");
    let cut: Vec<&str> = restaged.iter().filter(|c| c.cut).map(|c| c.id.as_str()).collect();
    assert_eq!(cut, ["D"]);

    let cleared = cancel_cut(&restaged, None);
    assert!(cleared.iter().all(|c| !c.cut));
}

#[test]
fn test_cancel_cut_by_id_clears_only_that_subtree() {
    let mut list = abc();
    list.push(node("D", "cube", "front-right", Some("A")));
    let mut staged = cut_3d_shape(&list, "B");
    // A stale flag outside B's subtree
    staged[3].cut = true;

    let cleared = cancel_cut(&staged, Some("B"));
    let cut: Vec<&str> = cleared.iter().filter(|c| c.cut).map(|c| c.id.as_str()).collect();
    assert_eq!(cut, ["D"]);
    assert_eq!(ids(&cleared), ids(&staged));

    let cleared = cancel_cut(&staged, Some("C"));
    let cut: Vec<&str> = cleared.iter().filter(|c| c.cut).map(|c| c.id.as_str()).collect();
    assert_eq!(cut, ["B", "D"]);

    assert_eq!(cancel_cut(&staged, Some("missing")), staged);
}

#[test]
fn test_paste_cut_moves_subtree() {
    let mut list = abc();
    list.push(node("D", "cube", "front-right", Some("A")));
    let staged = cut_3d_shape(&list, "B");
    let moved = paste_cut_3d_shapes(&staged, "D", "top", Some("none"));

    assert_eq!(ids(&moved), ["A", "D", "B", "C"]);
    assert_eq!(moved[2].relative_to_id.as_deref(), Some("D"));
    assert_eq!(moved[2].position, "top");
    assert!(moved.iter().all(|c| !c.cut));
    assert!(validate_order(&moved).is_ok());
}

#[test]
fn test_paste_cut_into_itself_rejected() {
    let staged = cut_3d_shape(&abc(), "B");
    assert_eq!(paste_cut_3d_shapes(&staged, "C", "top", None), staged);
    let nothing = abc();
    assert_eq!(paste_cut_3d_shapes(&nothing, "A", "top", None), nothing);
}

#[test]
fn test_copy_is_non_destructive() {
    let list = abc();
    let copy = copy_3d_shape(&list, "B");
    assert_eq!(list, abc());
    assert_eq!(copy.len(), 2);
    assert!(copy.iter().all(|c| !["A", "B", "C"].contains(&c.id.as_str())));
    // internal reference remapped, external one kept
    assert_eq!(copy[0].relative_to_id.as_deref(), Some("A"));
    assert_eq!(copy[1].relative_to_id.as_deref(), Some(copy[0].id.as_str()));
}

#[test]
fn test_paste_same_copy_twice_yields_disjoint_ids() {
    let list = abc();
    let copy = copy_3d_shape(&list, "B");
    let once = paste_copied_3d_shapes(&list, &copy, "C", "top", None);
    let twice = paste_copied_3d_shapes(&once, &copy, "C", "top", None);

    assert_eq!(twice.len(), 7);
    let mut unique = ids(&twice);
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), 7);
    assert!(validate_order(&twice).is_ok());

    let under_c = find_dependent_shapes(&twice, "C");
    assert_eq!(under_c.ids.len(), 5);
}
