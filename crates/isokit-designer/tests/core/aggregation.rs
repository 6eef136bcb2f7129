use std::collections::HashSet;

use isokit_designer::{
    aggregate_attachment_points, compile_diagram, AggregationOptions, AttachmentPoint, CanvasSize,
    DiagramComponent,
};

use crate::common::{library, node};

fn aggregate(scene: &[DiagramComponent]) -> Vec<AttachmentPoint> {
    let compiled = compile_diagram(scene, CanvasSize::default(), &library(), false);
    aggregate_attachment_points(&compiled.processed_components, &AggregationOptions::default())
}

fn named<'a>(points: &'a [AttachmentPoint], name: &str) -> Option<&'a AttachmentPoint> {
    points.iter().find(|a| a.name == name)
}

#[test]
fn test_single_custom_anchor_keeps_base_name() {
    let points = aggregate(&[node("A", "shelf", "center", None)]);
    let shelf = named(&points, "attach-shelf").expect("shelf anchor");
    assert_eq!((shelf.x, shelf.y), (620.0, 410.0));
    assert!(points.iter().all(|a| !a.name.starts_with("attach-shelf-")));
}

#[test]
fn test_custom_anchor_grid_names_are_distinct() {
    let scene = vec![
        node("A", "shelf", "center", None),
        node("B", "shelf", "front-right", Some("A")),
        node("C", "shelf", "front-left", Some("A")),
    ];
    let points = aggregate(&scene);

    let shelves: Vec<&str> = points
        .iter()
        .filter(|a| a.name.starts_with("attach-shelf-"))
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(shelves.len(), 3);
    let unique: HashSet<&str> = points.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(unique.len(), points.len());
}

#[test]
fn test_joint_anchors_are_not_exposed() {
    let scene = vec![
        node("A", "cube", "center", None),
        node("B", "cube", "top", Some("A")),
    ];
    let points = aggregate(&scene);

    // A's top and B's bottom are glued together; only B's top and A's
    // bottom remain for the vertical classes.
    let top = named(&points, "attach-top").expect("top");
    assert_eq!((top.x, top.y), (620.0, 360.0));
    let bottom = named(&points, "attach-bottom").expect("bottom");
    assert_eq!((bottom.x, bottom.y), (620.0, 440.0));
}

#[test]
fn test_every_standard_class_once() {
    let scene = vec![
        node("A", "cube", "center", None),
        node("B", "cube", "front-right", Some("A")),
    ];
    let points = aggregate(&scene);
    for class in [
        "attach-top",
        "attach-bottom",
        "attach-front-left",
        "attach-front-right",
        "attach-back-left",
        "attach-back-right",
    ] {
        assert_eq!(
            points.iter().filter(|a| a.name == class).count(),
            1,
            "{class}"
        );
    }
}
