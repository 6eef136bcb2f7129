//! # Label Layout Engine
//!
//! Places text annotations around a compiled diagram so they do not
//! overlap each other. Two strategies are available:
//! - Rectangular: project outward from the diagram center onto its
//!   bounding rectangle, then push clashing labels further out.
//! - Hull: follow an offset, smoothed concave hull of every component's
//!   bounding box and hand out its vertices first-fit by distance.
//!
//! Both are greedy; neither backtracks.

mod hull;
mod rect;
mod text;

pub use text::{wrap_text, FixedWidthMetrics, TextMetrics};

use std::collections::HashMap;

use isokit_core::{BoundingBox, Point};
use serde::{Deserialize, Serialize};

use crate::compiler::CompiledDiagram;
use crate::markup;
use crate::shape_library::ShapeSource;

/// Placement strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    #[default]
    Rectangular,
    Hull,
}

/// Which side of its anchor point a label's text extends to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Text starts at the point and runs right
    Left,
    /// Text ends at the point
    Right,
}

/// Layout tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelLayoutOptions {
    pub strategy: LayoutStrategy,
    /// Distance between the diagram outline and the placement path
    pub placement_distance: f64,
    /// Minimum center distance between two labels (rectangular)
    pub min_spacing: f64,
    /// Minimum horizontal separation between two labels (hull)
    pub min_spacing_x: f64,
    /// Minimum vertical separation between two labels (hull)
    pub min_spacing_y: f64,
    /// Push-out attempts before accepting an overlap (rectangular)
    pub max_adjust_attempts: usize,
    /// Turn angle in degrees above which hull vertices are smoothed away
    pub smoothing_angle: f64,
    /// Spacing of candidate vertices along the placement path
    pub smoothing_step: f64,
    pub concavity: f64,
    pub label_max_width: f64,
    pub font_size: f64,
    pub line_height: f64,
}

impl Default for LabelLayoutOptions {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::Rectangular,
            placement_distance: 40.0,
            min_spacing: 24.0,
            min_spacing_x: 80.0,
            min_spacing_y: 24.0,
            max_adjust_attempts: 10,
            smoothing_angle: 135.0,
            smoothing_step: 20.0,
            concavity: 2.0,
            label_max_width: 160.0,
            font_size: 12.0,
            line_height: 1.2,
        }
    }
}

/// A label to place next to one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelRequest {
    pub component_id: String,
    pub text: String,
}

impl LabelRequest {
    pub fn new(component_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            text: text.into(),
        }
    }
}

/// A label after layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedLabel {
    pub component_id: String,
    pub position: Point,
    pub align: Align,
    /// Center of the owning component, for leader lines
    pub target: Point,
    pub lines: Vec<String>,
    pub width: f64,
    pub height: f64,
}

/// A label whose owner has a known box, ready for a strategy.
#[derive(Debug, Clone)]
pub(crate) struct Pending<'a> {
    pub request: &'a LabelRequest,
    pub bounds: BoundingBox,
}

/// Screen-space boxes of every compiled component that has a position.
///
/// The box spans the template's declared `<svg>` size when it has one,
/// and its anchors otherwise.
pub fn component_bounds(
    compiled: &CompiledDiagram,
    shapes: &dyn ShapeSource,
) -> HashMap<String, BoundingBox> {
    let mut bounds = HashMap::new();
    for component in &compiled.processed_components {
        let Some(origin) = component.absolute_position else {
            continue;
        };
        let declared = shapes
            .shape(&component.shape)
            .and_then(|shape| markup::svg_size(&shape.svg_content));
        let bbox = match declared {
            Some((width, height)) => BoundingBox::new(origin.x, origin.y, width, height),
            None => {
                let anchors: Vec<Point> = component
                    .global_attachment_points()
                    .iter()
                    .map(|a| a.point())
                    .collect();
                BoundingBox::from_points(&anchors)
                    .unwrap_or_else(|| BoundingBox::new(origin.x, origin.y, 0.0, 0.0))
            }
        };
        bounds.insert(component.id.clone(), bbox);
    }
    bounds
}

/// Lays out labels with the configured strategy.
///
/// Results come back in request order. Requests for components without a
/// bounding box are logged and dropped.
pub fn layout_labels(
    requests: &[LabelRequest],
    bounds: &HashMap<String, BoundingBox>,
    options: &LabelLayoutOptions,
    metrics: &dyn TextMetrics,
) -> Vec<PlacedLabel> {
    let pending: Vec<Pending<'_>> = requests
        .iter()
        .filter_map(|request| match bounds.get(&request.component_id) {
            Some(&bbox) => Some(Pending {
                request,
                bounds: bbox,
            }),
            None => {
                tracing::warn!(
                    component = %request.component_id,
                    "No bounds for labelled component, skipping label"
                );
                None
            }
        })
        .collect();
    if pending.is_empty() {
        return Vec::new();
    }

    let anchors = match options.strategy {
        LayoutStrategy::Rectangular => rect::place(&pending, bounds, options),
        LayoutStrategy::Hull => hull::place(&pending, bounds, options),
    };

    pending
        .iter()
        .zip(anchors)
        .map(|(p, (position, align))| {
            let lines = wrap_text(
                &p.request.text,
                options.label_max_width,
                options.font_size,
                metrics,
            );
            let width = lines
                .iter()
                .map(|line| metrics.text_width(line, options.font_size))
                .fold(0.0, f64::max);
            let height = lines.len() as f64 * options.font_size * options.line_height;
            PlacedLabel {
                component_id: p.request.component_id.clone(),
                position,
                align,
                target: p.bounds.center(),
                lines,
                width,
                height,
            }
        })
        .collect()
}

/// Left-aligned when the point lies right of (or on) the reference x.
pub(crate) fn align_for(point: Point, reference_x: f64) -> Align {
    if point.x >= reference_x {
        Align::Left
    } else {
        Align::Right
    }
}
