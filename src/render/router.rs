// src/render/router.rs
//
// Per-render edge geometry. Anchor sides follow the dominant axis of the
// center-to-center delta, so an edge only flips sides when the nodes'
// relative arrangement actually changes and never pierces a node body.
// Nothing here is cached: node positions move interactively.

use serde::Serialize;

pub const DEFAULT_NODE_WIDTH: f64 = 150.0;
pub const DEFAULT_NODE_HEIGHT: f64 = 40.0;

const CURVATURE: f64 = 0.25;

/// Live bounding box of a rendered node: top-left position plus measured
/// size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NodeBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Box for a node that has not been measured yet.
    pub fn unmeasured(x: f64, y: f64) -> Self {
        Self::new(x, y, DEFAULT_NODE_WIDTH, DEFAULT_NODE_HEIGHT)
    }

    fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Everything the renderer needs to draw one bezier edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGeometry {
    pub source_point: (f64, f64),
    pub target_point: (f64, f64),
    pub source_side: Side,
    pub target_side: Side,
    pub source_control: (f64, f64),
    pub target_control: (f64, f64),
}

impl EdgeGeometry {
    /// Midpoint of the curve, where the renderer centers the edge label.
    pub fn label_anchor(&self) -> (f64, f64) {
        // cubic bezier at t = 0.5
        let b = |p0: f64, c0: f64, c1: f64, p1: f64| {
            0.125 * p0 + 0.375 * c0 + 0.375 * c1 + 0.125 * p1
        };
        (
            b(
                self.source_point.0,
                self.source_control.0,
                self.target_control.0,
                self.target_point.0,
            ),
            b(
                self.source_point.1,
                self.source_control.1,
                self.target_control.1,
                self.target_point.1,
            ),
        )
    }
}

/// Distance a control point extends away from its anchor, toward the
/// opposite endpoint. Negative distances (anchors facing away from each
/// other) still get a small bulge so the curve stays readable.
fn control_offset(distance: f64) -> f64 {
    if distance >= 0.0 {
        0.5 * distance
    } else {
        CURVATURE * 25.0 * (-distance).sqrt()
    }
}

fn control_point(anchor: (f64, f64), side: Side, toward: (f64, f64)) -> (f64, f64) {
    match side {
        Side::Right => (anchor.0 + control_offset(toward.0 - anchor.0), anchor.1),
        Side::Left => (anchor.0 - control_offset(anchor.0 - toward.0), anchor.1),
        Side::Bottom => (anchor.0, anchor.1 + control_offset(toward.1 - anchor.1)),
        Side::Top => (anchor.0, anchor.1 - control_offset(anchor.1 - toward.1)),
    }
}

/// Select anchor sides and control geometry for an edge between two live
/// boxes. Horizontal when |dx| >= |dy|, vertical otherwise.
pub fn route_edge(source: &NodeBox, target: &NodeBox) -> EdgeGeometry {
    let (scx, scy) = source.center();
    let (tcx, tcy) = target.center();
    let dx = tcx - scx;
    let dy = tcy - scy;

    let (source_point, source_side, target_point, target_side) = if dx.abs() >= dy.abs() {
        if dx >= 0.0 {
            (
                (source.x + source.width, scy),
                Side::Right,
                (target.x, tcy),
                Side::Left,
            )
        } else {
            (
                (source.x, scy),
                Side::Left,
                (target.x + target.width, tcy),
                Side::Right,
            )
        }
    } else if dy >= 0.0 {
        (
            (scx, source.y + source.height),
            Side::Bottom,
            (tcx, target.y),
            Side::Top,
        )
    } else {
        (
            (scx, source.y),
            Side::Top,
            (tcx, target.y + target.height),
            Side::Bottom,
        )
    };

    EdgeGeometry {
        source_point,
        target_point,
        source_side,
        target_side,
        source_control: control_point(source_point, source_side, target_point),
        target_control: control_point(target_point, target_side, source_point),
    }
}
