use isokit_designer::{
    add_3d_shape, compile_diagram, remove_3d_shape, CanvasSize, DiagramComponent, Point,
};

use crate::common::{abc, assert_close, library, node};

fn positions(components: &[DiagramComponent]) -> Vec<Point> {
    compile_diagram(components, CanvasSize::default(), &library(), false)
        .processed_components
        .iter()
        .map(|c| c.absolute_position.unwrap_or(Point::ORIGIN))
        .collect()
}

#[test]
fn test_stacked_positions() {
    let resolved = positions(&abc());
    assert_close(resolved[0], Point::new(600.0, 400.0));
    assert_close(resolved[1], Point::new(580.0, 420.0));
    assert_close(resolved[2], Point::new(580.0, 380.0));
}

#[test]
fn test_remove_then_readd_reproduces_layout() {
    let original = abc();
    let pruned = remove_3d_shape(&original, "B");
    assert_eq!(pruned.len(), 1);

    let with_b = add_3d_shape(&pruned, "cube", "front-left", None, Some("A"));
    let b_id = with_b[1].id.clone();
    let rebuilt = add_3d_shape(&with_b, "cube", "top", None, Some(&b_id));

    let before = positions(&original);
    let after = positions(&rebuilt);
    for (a, b) in before.iter().zip(&after) {
        assert_close(*b, *a);
    }
}

#[test]
fn test_all_placements_meet_complementary_anchor() {
    // parent at (600, 400); cube anchors: top(20,0) bottom(20,40)
    // front-left(10,30) front-right(30,30) back-left(10,10) back-right(30,10)
    let cases = [
        ("top", Point::new(600.0, 360.0)),
        ("bottom", Point::new(600.0, 440.0)),
        ("front-left", Point::new(580.0, 420.0)),
        ("front-right", Point::new(620.0, 420.0)),
        ("back-left", Point::new(580.0, 380.0)),
        ("back-right", Point::new(620.0, 380.0)),
    ];
    for (position, expected) in cases {
        let scene = vec![
            node("A", "cube", "center", None),
            node("B", "cube", position, Some("A")),
        ];
        let resolved = positions(&scene);
        assert_close(resolved[1], expected);
    }
}

#[test]
fn test_custom_anchor_seats_child_bottom() {
    let scene = vec![
        node("A", "shelf", "center", None),
        node("B", "cube", "shelf", Some("A")),
    ];
    // shelf anchor (20,10) + (600,400), minus the child's bottom (20,40)
    assert_close(positions(&scene)[1], Point::new(600.0, 370.0));
}

#[test]
fn test_missing_anchor_falls_back_to_parent() {
    let scene = vec![
        node("A", "cube", "center", None),
        node("B", "cube", "nowhere", Some("A")),
    ];
    assert_close(positions(&scene)[1], Point::new(600.0, 400.0));
}

#[test]
fn test_canvas_size_moves_root() {
    let compiled = compile_diagram(&abc(), CanvasSize::new(400.0, 300.0), &library(), false);
    let root = compiled.component("A").and_then(|c| c.absolute_position);
    assert_eq!(root, Some(Point::new(200.0, 150.0)));
}
