// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::path::PathCommand;
use crate::scalar::Scalar;
use crate::{Path, Point};

/// The flattening tolerance: the maximum allowed perpendicular distance
/// between an approximating polyline and the original curve, in input
/// coordinate units.
///
/// This single constant is the sole source of curve-output determinism.
/// It is never adjusted for device space.
pub const FLATTEN_TOLERANCE: f64 = 0.25;

/// Hard guard against runaway subdivision on pathological curves.
const MAX_CURVE_POINTS: usize = 1000;

/// An arc whose first point is further than this from the current pen
/// position gets a connecting line segment first.
const ARC_JOIN_EPSILON: f64 = 0.01;

const PI_2: f64 = core::f64::consts::PI * 2.0;

/// Flattens a path into a list of contours.
///
/// Every closed subpath and every open subpath becomes one contour: an
/// ordered point chain. Contours with fewer than three points are produced
/// as-is; consumers discard what they cannot use.
pub fn flatten_path(path: &Path) -> Vec<Vec<Point>> {
    let mut flattener = Flattener::default();
    for command in path.commands() {
        flattener.apply(command);
    }
    flattener.finish()
}

// The fold state: (pen, subpath start, current contour) carried over the
// command log.
#[derive(Default)]
struct Flattener {
    polygons: Vec<Vec<Point>>,
    contour: Vec<Point>,
    start: Option<Point>,
    pen: Option<Point>,
}

impl Flattener {
    fn apply(&mut self, command: &PathCommand) {
        match *command {
            PathCommand::MoveTo { x, y } => self.move_to(Point::from_xy(x, y)),
            PathCommand::LineTo { x, y } => self.line_to(Point::from_xy(x, y)),
            PathCommand::QuadTo { x1, y1, x, y } => {
                let p1 = Point::from_xy(x1, y1);
                let p2 = Point::from_xy(x, y);
                let p0 = self.ensure_contour(p1);
                let mut points = 0;
                flatten_quad(p0, p1, p2, &mut points, &mut self.contour);
                self.pen = Some(p2);
            }
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let p1 = Point::from_xy(x1, y1);
                let p2 = Point::from_xy(x2, y2);
                let p3 = Point::from_xy(x, y);
                let p0 = self.ensure_contour(p1);
                let mut points = 0;
                flatten_cubic(p0, p1, p2, p3, &mut points, &mut self.contour);
                self.pen = Some(p3);
            }
            PathCommand::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
                ccw,
            } => {
                if radius <= 0.0 {
                    return;
                }

                let center = Point::from_xy(cx, cy);
                self.sweep(start_angle, end_angle, ccw, radius, |theta| {
                    Point::from_xy(
                        center.x + radius * theta.cos(),
                        center.y + radius * theta.sin(),
                    )
                });
            }
            PathCommand::Ellipse {
                cx,
                cy,
                rx,
                ry,
                rotation,
                start_angle,
                end_angle,
                ccw,
            } => {
                if rx <= 0.0 || ry <= 0.0 {
                    return;
                }

                let center = Point::from_xy(cx, cy);
                let (rot_sin, rot_cos) = rotation.sin_cos();
                self.sweep(start_angle, end_angle, ccw, rx.min(ry), |theta| {
                    let x = rx * theta.cos();
                    let y = ry * theta.sin();
                    Point::from_xy(
                        center.x + x * rot_cos - y * rot_sin,
                        center.y + x * rot_sin + y * rot_cos,
                    )
                });
            }
            PathCommand::Close => self.close(),
        }
    }

    fn move_to(&mut self, p: Point) {
        self.finalize_contour();
        self.contour.push(p);
        self.start = Some(p);
        self.pen = Some(p);
    }

    fn line_to(&mut self, p: Point) {
        self.ensure_contour(p);
        self.contour.push(p);
        self.pen = Some(p);
    }

    fn close(&mut self) {
        if self.contour.is_empty() {
            return;
        }

        if let (Some(start), Some(last)) = (self.start, self.contour.last().copied()) {
            if last != start {
                self.contour.push(start);
            }
        }

        self.finalize_contour();
        // The pen returns to the contour start; a following command without
        // an explicit MoveTo continues from there.
        self.pen = self.start;
    }

    /// Makes sure a contour is in progress and returns the effective pen
    /// position. A command issued before any MoveTo starts the contour at
    /// `fallback`, mirroring the Canvas "ensure subpath" rule.
    fn ensure_contour(&mut self, fallback: Point) -> Point {
        if let Some(last) = self.contour.last().copied() {
            return last;
        }

        let start = self.pen.unwrap_or(fallback);
        self.contour.push(start);
        self.start = Some(start);
        start
    }

    /// Emits uniformly sampled points of an arc/ellipse sweep.
    fn sweep<F: Fn(f64) -> Point>(
        &mut self,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
        step_radius: f64,
        point_at: F,
    ) {
        let (a0, a1) = normalize_sweep(start_angle, end_angle, ccw);
        let segments = sweep_segments(a0, a1, step_radius);
        let step = (a1 - a0) / segments as f64;

        let first = point_at(a0);
        if self.contour.is_empty() {
            let start = self.pen.unwrap_or(first);
            self.contour.push(start);
            self.start = Some(start);
            if start.distance(first) > ARC_JOIN_EPSILON {
                self.contour.push(first);
            }
        } else if let Some(last) = self.contour.last().copied() {
            if last.distance(first) > ARC_JOIN_EPSILON {
                self.contour.push(first);
            }
        }

        let mut last = first;
        for i in 1..=segments {
            last = point_at(a0 + step * i as f64);
            self.contour.push(last);
        }

        self.pen = Some(last);
    }

    fn finalize_contour(&mut self) {
        if !self.contour.is_empty() {
            self.polygons.push(core::mem::take(&mut self.contour));
        }
    }

    fn finish(mut self) -> Vec<Vec<Point>> {
        self.finalize_contour();
        self.polygons
    }
}

/// Normalizes a sweep so that clockwise runs forward and counter-clockwise
/// runs backward, each by at most a full turn per winding.
fn normalize_sweep(start_angle: f64, end_angle: f64, ccw: bool) -> (f64, f64) {
    let mut a0 = start_angle;
    let mut a1 = end_angle;
    if !ccw && a1 < a0 {
        a1 += PI_2;
    }
    if ccw && a0 < a1 {
        a0 += PI_2;
    }
    (a0, a1)
}

fn sweep_segments(a0: f64, a1: f64, radius: f64) -> usize {
    let delta = (a1 - a0).abs();
    let max_step = 2.0 * (1.0 - FLATTEN_TOLERANCE / radius).max(0.0).acos();
    if max_step > 0.0 {
        let n = (delta / max_step).ceil();
        if n >= 1.0 {
            return n as usize;
        }
    }
    1
}

fn flatten_quad(p0: Point, p1: Point, p2: Point, points: &mut usize, out: &mut Vec<Point>) {
    if *points >= MAX_CURVE_POINTS {
        out.push(p2);
        *points += 1;
        return;
    }

    let chord = p2 - p0;
    let len = chord.length();
    if len.is_nearly_zero() {
        out.push(p2);
        *points += 1;
        return;
    }

    let d = (p1 - p0).cross(chord).abs() / len;
    if d <= FLATTEN_TOLERANCE {
        out.push(p2);
        *points += 1;
        return;
    }

    // Split at t = 0.5 via de Casteljau.
    let q0 = midpoint(p0, p1);
    let q1 = midpoint(p1, p2);
    let mid = midpoint(q0, q1);
    flatten_quad(p0, q0, mid, points, out);
    flatten_quad(mid, q1, p2, points, out);
}

fn flatten_cubic(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    points: &mut usize,
    out: &mut Vec<Point>,
) {
    if *points >= MAX_CURVE_POINTS {
        out.push(p3);
        *points += 1;
        return;
    }

    let chord = p3 - p0;
    let len = chord.length();
    if len.is_nearly_zero() {
        out.push(p3);
        *points += 1;
        return;
    }

    let d1 = (p1 - p0).cross(chord).abs() / len;
    let d2 = (p2 - p0).cross(chord).abs() / len;
    if d1 + d2 <= FLATTEN_TOLERANCE {
        out.push(p3);
        *points += 1;
        return;
    }

    let ab = midpoint(p0, p1);
    let bc = midpoint(p1, p2);
    let cd = midpoint(p2, p3);
    let abc = midpoint(ab, bc);
    let bcd = midpoint(bc, cd);
    let mid = midpoint(abc, bcd);
    flatten_cubic(p0, ab, abc, mid, points, out);
    flatten_cubic(mid, bcd, cd, p3, points, out);
}

#[inline]
fn midpoint(a: Point, b: Point) -> Point {
    Point::from_xy((a.x + b.x) * 0.5, (a.y + b.y) * 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PathBuilder;

    fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
        let ab = b - a;
        let len2 = ab.dot(ab);
        if len2 == 0.0 {
            return p.distance(a);
        }
        let t = ((p - a).dot(ab) / len2).max(0.0).min(1.0);
        p.distance(a + ab.scaled(t))
    }

    fn distance_to_polyline(p: Point, polyline: &[Point]) -> f64 {
        polyline
            .windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn lines_only() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(10.0, 0.0);
        pb.line_to(10.0, 10.0);
        let polygons = flatten_path(&pb.finish().unwrap());

        assert_eq!(polygons.len(), 1);
        assert_eq!(
            polygons[0],
            vec![
                Point::from_xy(0.0, 0.0),
                Point::from_xy(10.0, 0.0),
                Point::from_xy(10.0, 10.0),
            ]
        );
    }

    #[test]
    fn leading_line_starts_contour() {
        let mut pb = PathBuilder::new();
        pb.line_to(10.0, 0.0);
        pb.line_to(10.0, 10.0);
        let polygons = flatten_path(&pb.finish().unwrap());

        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0][0], Point::from_xy(10.0, 0.0));
    }

    #[test]
    fn close_appends_start() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(10.0, 0.0);
        pb.line_to(10.0, 10.0);
        pb.close();
        let polygons = flatten_path(&pb.finish().unwrap());

        assert_eq!(polygons.len(), 1);
        assert_eq!(polygons[0].len(), 4);
        assert_eq!(polygons[0][3], Point::from_xy(0.0, 0.0));
    }

    #[test]
    fn close_does_not_duplicate_start() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.line_to(10.0, 0.0);
        pb.line_to(0.0, 0.0);
        pb.close();
        let polygons = flatten_path(&pb.finish().unwrap());

        assert_eq!(polygons[0].len(), 3);
    }

    #[test]
    fn quad_within_tolerance() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.quad_to(50.0, 80.0, 100.0, 0.0);
        let polygons = flatten_path(&pb.finish().unwrap());
        let polyline = &polygons[0];
        assert!(polyline.len() > 2);

        for i in 0..=1000 {
            let t = i as f64 / 1000.0;
            let mt = 1.0 - t;
            let p = Point::from_xy(
                mt * mt * 0.0 + 2.0 * mt * t * 50.0 + t * t * 100.0,
                mt * mt * 0.0 + 2.0 * mt * t * 80.0 + t * t * 0.0,
            );
            assert!(distance_to_polyline(p, polyline) <= FLATTEN_TOLERANCE + 1e-6);
        }
    }

    #[test]
    fn cubic_within_tolerance() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.cubic_to(0.0, 60.0, 100.0, 60.0, 100.0, 0.0);
        let polygons = flatten_path(&pb.finish().unwrap());
        let polyline = &polygons[0];
        assert!(polyline.len() > 2);

        for i in 0..=1000 {
            let t = i as f64 / 1000.0;
            let mt = 1.0 - t;
            let b0 = mt * mt * mt;
            let b1 = 3.0 * mt * mt * t;
            let b2 = 3.0 * mt * t * t;
            let b3 = t * t * t;
            let p = Point::from_xy(
                b0 * 0.0 + b1 * 0.0 + b2 * 100.0 + b3 * 100.0,
                b0 * 0.0 + b1 * 60.0 + b2 * 60.0 + b3 * 0.0,
            );
            assert!(distance_to_polyline(p, polyline) <= FLATTEN_TOLERANCE + 1e-6);
        }
    }

    #[test]
    fn curve_point_guard() {
        // Needs far more than a thousand points at the fixed tolerance;
        // the guard has to kick in instead of subdividing forever.
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.quad_to(5e8, 1e9, 1e9, 0.0);
        let polygons = flatten_path(&pb.finish().unwrap());
        let n = polygons[0].len();
        assert!(n >= MAX_CURVE_POINTS);
        assert!(n < MAX_CURVE_POINTS + 100);
    }

    #[test]
    fn full_circle_segment_count() {
        let mut pb = PathBuilder::new();
        pb.arc(50.0, 50.0, 30.0, 0.0, PI_2, false);
        let polygons = flatten_path(&pb.finish().unwrap());

        let polyline = &polygons[0];
        // max_step = 2*acos(1 - 0.25/30) ~= 0.2583 rad -> 25 segments.
        assert_eq!(polyline.len(), 26);
        assert_eq!(polyline[0], Point::from_xy(80.0, 50.0));

        for p in polyline {
            let r = p.distance(Point::from_xy(50.0, 50.0));
            assert!((r - 30.0).abs() < 1e-9);
        }
    }

    #[test]
    fn ccw_arc_runs_backward() {
        let mut pb = PathBuilder::new();
        pb.arc(0.0, 0.0, 10.0, 0.0, core::f64::consts::FRAC_PI_2, true);
        let polygons = flatten_path(&pb.finish().unwrap());
        let polyline = &polygons[0];

        // Counter-clockwise from 0 to pi/2 goes the long way: 3/2 pi sweep,
        // from (10, 0) backward to (0, 10).
        assert!(polyline[0].distance(Point::from_xy(10.0, 0.0)) < 1e-9);
        let last = polyline[polyline.len() - 1];
        assert!(last.distance(Point::from_xy(0.0, 10.0)) < 1e-9);
    }

    #[test]
    fn arc_connects_to_pen() {
        let mut pb = PathBuilder::new();
        pb.move_to(0.0, 0.0);
        pb.arc(10.0, 0.0, 5.0, core::f64::consts::PI, PI_2, false);
        let polygons = flatten_path(&pb.finish().unwrap());
        let polyline = &polygons[0];

        // The pen at (0, 0) is 5 units away from the arc start (5, 0):
        // a connecting segment is inserted.
        assert_eq!(polyline[0], Point::from_xy(0.0, 0.0));
        assert!(polyline[1].distance(Point::from_xy(5.0, 0.0)) < 1e-9);
    }

    #[test]
    fn arc_skips_connecting_segment_when_close() {
        let mut pb = PathBuilder::new();
        pb.move_to(5.0, 0.0);
        pb.arc(10.0, 0.0, 5.0, core::f64::consts::PI, PI_2, false);
        let polygons = flatten_path(&pb.finish().unwrap());
        let polyline = &polygons[0];

        assert_eq!(polyline[0], Point::from_xy(5.0, 0.0));
        assert_ne!(polyline[1], Point::from_xy(5.0, 0.0));
    }

    #[test]
    fn zero_radius_emits_nothing() {
        let mut pb = PathBuilder::new();
        pb.arc(10.0, 10.0, 0.0, 0.0, PI_2, false);
        pb.ellipse(10.0, 10.0, 0.0, 5.0, 0.0, 0.0, PI_2, false);
        let polygons = flatten_path(&pb.finish().unwrap());
        assert!(polygons.is_empty());
    }

    #[test]
    fn rotated_ellipse() {
        let mut pb = PathBuilder::new();
        pb.ellipse(
            0.0,
            0.0,
            20.0,
            10.0,
            core::f64::consts::FRAC_PI_2,
            0.0,
            PI_2,
            false,
        );
        let polygons = flatten_path(&pb.finish().unwrap());
        let polyline = &polygons[0];

        // Rotated by 90 degrees, the major axis is vertical: theta = 0
        // samples at (0, 20).
        assert!((polyline[0].x - 0.0).abs() < 1e-9);
        assert!((polyline[0].y - 20.0).abs() < 1e-9);

        for p in polyline {
            // On the rotated ellipse: (y/20)^2 + (x/10)^2 = 1.
            let v = (p.y / 20.0).sqr() + (p.x / 10.0).sqr();
            assert!((v - 1.0).abs() < 1e-9);
        }
    }
}
