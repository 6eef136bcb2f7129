//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use isokit_designer::{DiagramComponent, Point, Shape, ShapeLibrary};

/// 40x40 isometric block with all six standard anchors.
pub const CUBE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="40">
  <path d="M20 0 L40 10 L40 30 L20 40 L0 30 L0 10 Z" fill="#9ab"/>
  <circle id="attach-top" cx="20" cy="0" r="2"/>
  <circle id="attach-bottom" cx="20" cy="40" r="2"/>
  <circle id="attach-front-left" cx="10" cy="30" r="2"/>
  <circle id="attach-front-right" cx="30" cy="30" r="2"/>
  <circle id="attach-back-left" cx="10" cy="10" r="2"/>
  <circle id="attach-back-right" cx="30" cy="10" r="2"/>
</svg>"##;

/// Same block with an extra non-standard `shelf` anchor.
pub const SHELF: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="40">
  <path d="M20 0 L40 10 L40 30 L20 40 L0 30 L0 10 Z" fill="#cb9"/>
  <circle id="attach-top" cx="20" cy="0" r="2"/>
  <circle id="attach-bottom" cx="20" cy="40" r="2"/>
  <circle id="attach-front-left" cx="10" cy="30" r="2"/>
  <circle id="attach-front-right" cx="30" cy="30" r="2"/>
  <circle id="attach-back-left" cx="10" cy="10" r="2"/>
  <circle id="attach-back-right" cx="30" cy="10" r="2"/>
  <circle id="attach-shelf" cx="20" cy="10" r="2"/>
</svg>"##;

/// Flat badge attached by its center.
pub const TAG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="6">
  <rect width="10" height="6" fill="#333"/>
  <circle id="attach-center" cx="5" cy="3" r="1"/>
</svg>"##;

pub fn library() -> ShapeLibrary {
    ShapeLibrary::from_shapes([
        Shape::block("cube", CUBE),
        Shape::block("shelf", SHELF),
        Shape::flat("tag", TAG).with_attach_to("attach-center"),
    ])
    .expect("fixture library")
}

pub fn node(id: &str, shape: &str, position: &str, parent: Option<&str>) -> DiagramComponent {
    DiagramComponent::with_id(id, shape, position, parent.map(str::to_string))
}

/// `[A(root), B(front-left of A), C(top of B)]`
pub fn abc() -> Vec<DiagramComponent> {
    vec![
        node("A", "cube", "center", None),
        node("B", "cube", "front-left", Some("A")),
        node("C", "cube", "top", Some("B")),
    ]
}

pub fn ids(components: &[DiagramComponent]) -> Vec<&str> {
    components.iter().map(|c| c.id.as_str()).collect()
}

pub fn assert_close(actual: Point, expected: Point) {
    assert!(
        actual.distance_to(&expected) < 1e-6,
        "expected {expected:?}, got {actual:?}"
    );
}
