// Copyright 2008 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use arrayvec::ArrayVec;

use crate::flatten::flatten_path;
use crate::scalar::{Scalar, SCALAR_NEARLY_ZERO};
use crate::{Path, Point};

const PI: f64 = core::f64::consts::PI;
const FRAC_PI_2: f64 = core::f64::consts::FRAC_PI_2;
const FRAC_PI_4: f64 = core::f64::consts::FRAC_PI_4;

/// Draws at the beginning and end of an open path contour.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineCap {
    /// No stroke extension.
    Butt,
    /// Adds a semicircle.
    Round,
    /// Adds a square.
    Square,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

/// Specifies how corners are drawn when a shape is stroked.
///
/// Join affects the four corners of a stroked rectangle, and the connected
/// segments in a stroked path.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LineJoin {
    /// Extends to the miter limit, then falls back to bevel.
    Miter,
    /// Adds a circular arc.
    Round,
    /// Connects the outside edges.
    Bevel,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

/// Stroke properties.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Stroke {
    /// A stroke thickness.
    ///
    /// Must be > 0. Widths up to 1 render at one pixel wide with opacity
    /// scaled by the width instead.
    ///
    /// Default: 1.0
    pub width: f64,

    /// The limit at which a sharp corner is drawn beveled.
    ///
    /// Must be > 0.
    ///
    /// Default: 10.0
    pub miter_limit: f64,

    /// A stroke line cap.
    ///
    /// Default: Butt
    pub line_cap: LineCap,

    /// A stroke line join.
    ///
    /// Default: Miter
    pub line_join: LineJoin,
}

impl Default for Stroke {
    fn default() -> Self {
        Stroke {
            width: 1.0,
            miter_limit: 10.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
        }
    }
}

/// A geometric stroke, ready for non-zero filling.
///
/// The polygon union encodes segment bodies, joins and caps. `coverage` is
/// the opacity factor produced by the sub-pixel width rule; it is 1.0 for
/// widths above one pixel.
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeOutline {
    /// Filled polygons whose union is the stroke.
    pub polygons: Vec<Vec<Point>>,
    /// Multiplier for the stroke color's alpha, in `(0, 1]`.
    pub coverage: f64,
}

// A maximally-flattened stroke segment with its precomputed frame.
#[derive(Copy, Clone, Debug)]
struct Segment {
    p1: Point,
    p2: Point,
    tangent: Point,
    normal: Point,
}

/// Expands a path into the polygons of its geometric stroke.
///
/// The path is flattened first; each resulting polyline with at least two
/// points is stroked independently. A polyline whose first and last points
/// coincide (within 1e-10) is treated as closed: it gets a join between its
/// last and first segments instead of caps.
pub fn stroke_outline(path: &Path, stroke: &Stroke) -> StrokeOutline {
    let mut width = stroke.width;
    let mut coverage = 1.0;
    if width <= 1.0 {
        // Sub-pixel strokes keep one-pixel geometry and scale opacity
        // instead. This is the only anti-aliasing in the renderer.
        coverage = if width > 0.0 { width } else { 1.0 };
        width = 1.0;
    }
    let radius = width.half();

    let mut polygons = Vec::new();
    for polyline in flatten_path(path) {
        stroke_polyline(&polyline, radius, stroke, &mut polygons);
    }

    StrokeOutline { polygons, coverage }
}

fn stroke_polyline(polyline: &[Point], radius: f64, stroke: &Stroke, out: &mut Vec<Vec<Point>>) {
    if polyline.len() < 2 {
        return;
    }

    let closed =
        polyline.len() >= 3 && polyline[0].distance(polyline[polyline.len() - 1]) < SCALAR_NEARLY_ZERO;

    // For a closed polyline the duplicated end point is dropped and the ring
    // is closed by an explicit wrap-around segment.
    let ring = if closed {
        &polyline[..polyline.len() - 1]
    } else {
        polyline
    };

    let mut segments = Vec::with_capacity(ring.len());
    for w in ring.windows(2) {
        if let Some(segment) = Segment::new(w[0], w[1]) {
            segments.push(segment);
        }
    }
    if closed {
        if let Some(segment) = Segment::new(ring[ring.len() - 1], ring[0]) {
            segments.push(segment);
        }
    }

    if segments.is_empty() {
        return;
    }

    for s in &segments {
        let offset = s.normal.scaled(radius);
        out.push(vec![s.p1 + offset, s.p2 + offset, s.p2 - offset, s.p1 - offset]);
    }

    let join_count = if closed {
        segments.len()
    } else {
        segments.len() - 1
    };
    for i in 0..join_count {
        let s1 = segments[i];
        let s2 = segments[(i + 1) % segments.len()];
        add_join(s1, s2, radius, stroke, out);
    }

    if !closed {
        let first = segments[0];
        let last = segments[segments.len() - 1];
        add_cap(last.p2, last.tangent, radius, stroke.line_cap, out);
        add_cap(first.p1, first.tangent.scaled(-1.0), radius, stroke.line_cap, out);
    }
}

impl Segment {
    fn new(p1: Point, p2: Point) -> Option<Self> {
        let len = p1.distance(p2);
        if len.is_nearly_zero() {
            return None;
        }

        let tangent = (p2 - p1).scaled(len.invert());
        Some(Segment {
            p1,
            p2,
            tangent,
            normal: tangent.left_normal(),
        })
    }
}

fn add_join(s1: Segment, s2: Segment, radius: f64, stroke: &Stroke, out: &mut Vec<Vec<Point>>) {
    let cross = s1.tangent.cross(s2.tangent);
    if cross.abs() < SCALAR_NEARLY_ZERO {
        // Collinear segments, the bodies already meet flush.
        return;
    }

    let j = s2.p1;

    // On a left turn (cross > 0) the outer side of the corner is the right
    // side of both segments, otherwise the left side.
    let (n1, n2) = if cross > 0.0 {
        (s1.normal.scaled(-1.0), s2.normal.scaled(-1.0))
    } else {
        (s1.normal, s2.normal)
    };

    let o1 = s1.p2 + n1.scaled(radius);
    let o2 = s2.p1 + n2.scaled(radius);
    let i1 = s1.p2 - n1.scaled(radius);
    let i2 = s2.p1 - n2.scaled(radius);

    match stroke.line_join {
        LineJoin::Miter => {
            // Where the outer body edges would meet when extended.
            let u = (o2 - o1).cross(s2.tangent) / cross;
            let miter = o1 + s1.tangent.scaled(u);
            if miter.distance(j) / radius <= stroke.miter_limit {
                out.push(vec![o1, miter, o2]);
                out.push(vec![o1, o2, i2, i1]);
            } else {
                out.push(vec![o1, o2, i2, i1]);
            }
        }
        LineJoin::Bevel => {
            out.push(vec![o1, o2, i2, i1]);
        }
        LineJoin::Round => {
            let a0 = (o1.y - j.y).atan2(o1.x - j.x);
            let a1 = (o2.y - j.y).atan2(o2.x - j.x);
            let mut delta = a1 - a0;
            // The convex way around is the shorter one.
            if delta > PI {
                delta -= 2.0 * PI;
            }
            if delta < -PI {
                delta += 2.0 * PI;
            }
            add_fan(j, a0, delta, radius, out);
        }
    }
}

fn add_cap(end: Point, outgoing: Point, radius: f64, cap: LineCap, out: &mut Vec<Vec<Point>>) {
    match cap {
        LineCap::Butt => {}
        LineCap::Square => {
            let normal = outgoing.left_normal();
            let a = end + normal.scaled(radius);
            let b = end - normal.scaled(radius);
            let ext = outgoing.scaled(radius);
            out.push(vec![a, a + ext, b + ext, b]);
        }
        LineCap::Round => {
            let mid = outgoing.y.atan2(outgoing.x);
            add_fan(end, mid - FRAC_PI_2, PI, radius, out);
        }
    }
}

// Emits a triangular fan around `center` covering the arc from `a0` over
// `delta` radians at the given radius.
fn add_fan(center: Point, a0: f64, delta: f64, radius: f64, out: &mut Vec<Vec<Point>>) {
    let triangles = ((delta.abs() / FRAC_PI_4).ceil() as usize).max(2);
    let step = delta / triangles as f64;

    // |delta| never exceeds pi, so at most 4 triangles and 5 arc points.
    let mut arc = ArrayVec::<Point, 8>::new();
    for k in 0..=triangles {
        let theta = a0 + step * k as f64;
        arc.push(Point::from_xy(
            center.x + radius * theta.cos(),
            center.y + radius * theta.sin(),
        ));
    }

    for w in arc.windows(2) {
        out.push(vec![center, w[0], w[1]]);
    }
}
