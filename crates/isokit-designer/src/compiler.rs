//! Diagram compiler.
//!
//! Walks the ordered scene graph once, resolving every component against
//! the components already processed. The parent-before-dependents order
//! guarantees a component's reference has always been handled by the time
//! the component itself is reached.

use isokit_core::{AttachmentPoint, CanvasSize, Point, Shape};

use crate::attachment::{extract_attachment_points, find_anchor};
use crate::component::{Attached2DShape, DiagramComponent};
use crate::markup;
use crate::scene_graph::{calculate_absolute_position, PositionMemo};
use crate::shape_library::ShapeSource;

/// Output of one compile pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledDiagram {
    /// Composed markup fragments, in painter's order
    pub content: String,
    /// Input components with fresh anchors and absolute positions
    pub processed_components: Vec<DiagramComponent>,
}

impl CompiledDiagram {
    /// Standalone document sized to the canvas.
    pub fn to_document(&self, canvas: CanvasSize) -> String {
        markup::wrap_document(&self.content, canvas)
    }

    pub fn component(&self, id: &str) -> Option<&DiagramComponent> {
        self.processed_components.iter().find(|c| c.id == id)
    }
}

/// Compiles the scene graph into composed markup.
///
/// A component whose template is missing is logged, kept unchanged in
/// `processed_components` and contributes no markup.
pub fn compile_diagram(
    components: &[DiagramComponent],
    canvas: CanvasSize,
    shapes: &dyn ShapeSource,
    show_anchors: bool,
) -> CompiledDiagram {
    let mut compiled = CompiledDiagram::default();
    let mut memo = PositionMemo::new();

    for component in components {
        let Some(shape) = shapes.shape(&component.shape) else {
            tracing::warn!(
                component = %component.id,
                shape = %component.shape,
                "Shape template not found, skipping component"
            );
            compiled.processed_components.push(component.clone());
            continue;
        };

        let body = markup::strip_svg_wrapper(&shape.svg_content);
        let mut processed = component.clone();
        processed.attachment_points = extract_attachment_points(body);

        let reference = match processed.relative_to_id.as_deref() {
            None => None,
            Some(parent_id) => {
                let found = compiled
                    .processed_components
                    .iter()
                    .find(|c| c.id == parent_id);
                if found.is_none() {
                    tracing::warn!(
                        component = %processed.id,
                        parent = parent_id,
                        "Reference not processed yet, placing component at canvas center"
                    );
                }
                found
            }
        };
        let position = calculate_absolute_position(
            &processed,
            reference,
            canvas,
            &compiled.processed_components,
            &mut memo,
        );
        processed.absolute_position = Some(position);

        let mut group = format!(
            "<g id=\"{}\" data-shape=\"{}\" transform=\"{}\">",
            markup::escape_attr(&processed.id),
            markup::escape_attr(&processed.shape),
            markup::translate(position)
        );
        group.push_str(&markup::set_anchor_visibility(body, show_anchors));
        for decoration in &processed.attached_2d_shapes {
            if let Some(fragment) =
                render_decoration(decoration, &processed, shapes, show_anchors)
            {
                group.push_str(&fragment);
            }
        }
        group.push_str("</g>");

        compiled.content.push_str(&group);
        compiled.processed_components.push(processed);
    }

    compiled
}

/// The decoration's own anchor: one matching the target group, then the
/// template's declared `attachTo`, then its first anchor.
fn decoration_anchor(
    anchors: &[AttachmentPoint],
    attached_to: &str,
    template: &Shape,
) -> Point {
    find_anchor(anchors, attached_to)
        .or_else(|| {
            template
                .attach_to
                .as_deref()
                .and_then(|name| find_anchor(anchors, name))
        })
        .or_else(|| anchors.first())
        .map_or(Point::ORIGIN, AttachmentPoint::point)
}

fn render_decoration(
    decoration: &Attached2DShape,
    owner: &DiagramComponent,
    shapes: &dyn ShapeSource,
    show_anchors: bool,
) -> Option<String> {
    let Some(template) = shapes.shape(&decoration.name) else {
        tracing::warn!(
            component = %owner.id,
            decoration = %decoration.name,
            "2D shape template not found, skipping decoration"
        );
        return None;
    };

    let body = markup::strip_svg_wrapper(&template.svg_content);
    let own_anchor = decoration_anchor(&extract_attachment_points(body), &decoration.attached_to, &template);
    let target = match find_anchor(&owner.attachment_points, &decoration.attached_to) {
        Some(anchor) => anchor.point(),
        None => {
            tracing::warn!(
                component = %owner.id,
                decoration = %decoration.name,
                anchor = %decoration.attached_to,
                "Anchor for 2D shape not found, placing it at the component origin"
            );
            Point::ORIGIN
        }
    };

    Some(format!(
        "<g data-decoration=\"{}\" transform=\"{}\">{}</g>",
        markup::escape_attr(&decoration.name),
        markup::translate(target - own_anchor),
        markup::set_anchor_visibility(body, show_anchors)
    ))
}
