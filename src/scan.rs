// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use golden_canvas_path::{Point, Transform};

use crate::blitter::Blitter;

// Edges flatter than this are horizontal and never cross a sample line.
const EDGE_EPSILON: f64 = 1e-10;

/// A winding rule: how self-intersecting polygons classify interior points.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum FillRule {
    /// A point is inside when the signed crossing count is non-zero.
    NonZero,
    /// A point is inside when the crossing count is odd.
    EvenOdd,
}

impl Default for FillRule {
    #[inline]
    fn default() -> Self {
        FillRule::NonZero
    }
}

impl FillRule {
    #[inline]
    fn is_inside(self, winding: i32) -> bool {
        match self {
            FillRule::NonZero => winding != 0,
            FillRule::EvenOdd => winding % 2 != 0,
        }
    }
}

/// Scanline-fills polygons into a blitter.
///
/// Every vertex is mapped by `transform` into device space first. Each
/// scanline is sampled at `y + 0.5`; edges are active over the half-open
/// interval `[min_y, max_y)`, so a vertex shared by two chained edges is
/// counted exactly once. The crossings are walked left to right carrying a
/// winding number, and every interior gap `[x_i, x_{i+1}]` becomes the pixel
/// run `ceil(x_i) ..= floor(x_{i+1})`, clamped to the target width.
///
/// Polygons are implicitly closed; ones with fewer than three points are
/// discarded.
pub(crate) fn fill_polygons(
    polygons: &[Vec<Point>],
    transform: &Transform,
    rule: FillRule,
    width: u32,
    height: u32,
    blitter: &mut dyn Blitter,
) {
    let mut device: Vec<Vec<Point>> = Vec::with_capacity(polygons.len());
    for polygon in polygons {
        if polygon.len() < 3 {
            continue;
        }

        let mut mapped = polygon.clone();
        transform.map_points(&mut mapped);
        device.push(mapped);
    }

    if device.is_empty() {
        return;
    }

    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for polygon in &device {
        for p in polygon {
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
    }

    let start = (min_y.floor() as i64).max(0);
    let stop = (max_y.ceil() as i64).min(i64::from(height) - 1);
    if start > stop {
        return;
    }

    // (x, winding) crossings, reused across scanlines.
    let mut crossings: Vec<(f64, i32)> = Vec::new();

    for y in start..=stop {
        let sample = y as f64 + 0.5;
        crossings.clear();

        for polygon in &device {
            let n = polygon.len();
            for i in 0..n {
                let p1 = polygon[i];
                let p2 = polygon[(i + 1) % n];

                if (p2.y - p1.y).abs() < EDGE_EPSILON {
                    continue;
                }

                let (edge_min, edge_max) = if p1.y < p2.y { (p1.y, p2.y) } else { (p2.y, p1.y) };
                if sample < edge_min || sample >= edge_max {
                    continue;
                }

                let t = (sample - p1.y) / (p2.y - p1.y);
                let x = p1.x + t * (p2.x - p1.x);
                let winding = if p2.y > p1.y { 1 } else { -1 };
                crossings.push((x, winding));
            }
        }

        crossings.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(core::cmp::Ordering::Equal));

        let mut winding = 0;
        for i in 0..crossings.len() {
            winding += crossings[i].1;
            if !rule.is_inside(winding) {
                continue;
            }

            if let Some(next) = crossings.get(i + 1) {
                let x_start = (crossings[i].0.ceil() as i64).max(0);
                let x_stop = (next.0.floor() as i64).min(i64::from(width) - 1);
                if x_start <= x_stop {
                    blitter.blit_h(x_start as u32, y as u32, (x_stop - x_start + 1) as u32);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SpanRecorder {
        spans: Vec<(u32, u32, u32)>,
    }

    impl SpanRecorder {
        fn new() -> Self {
            SpanRecorder { spans: Vec::new() }
        }
    }

    impl Blitter for SpanRecorder {
        fn blit_h(&mut self, x: u32, y: u32, width: u32) {
            self.spans.push((x, y, width));
        }
    }

    fn square(x0: f64, y0: f64, x1: f64, y1: f64, clockwise: bool) -> Vec<Point> {
        let mut points = vec![
            Point::from_xy(x0, y0),
            Point::from_xy(x1, y0),
            Point::from_xy(x1, y1),
            Point::from_xy(x0, y1),
        ];
        if !clockwise {
            points.reverse();
        }
        points
    }

    #[test]
    fn square_spans() {
        let mut recorder = SpanRecorder::new();
        fill_polygons(
            &[square(2.0, 2.0, 8.0, 8.0, true)],
            &Transform::identity(),
            FillRule::NonZero,
            10,
            10,
            &mut recorder,
        );

        // Rows sampled at y + 0.5 within [2, 8): rows 2..=7.
        assert_eq!(recorder.spans.len(), 6);
        assert_eq!(recorder.spans[0], (2, 2, 7));
        assert_eq!(recorder.spans[5], (2, 7, 7));
    }

    #[test]
    fn spans_clamp_to_width() {
        let mut recorder = SpanRecorder::new();
        fill_polygons(
            &[square(-5.0, 0.0, 15.0, 1.0, true)],
            &Transform::identity(),
            FillRule::NonZero,
            10,
            10,
            &mut recorder,
        );

        assert_eq!(recorder.spans, vec![(0, 0, 10)]);
    }

    #[test]
    fn offscreen_polygon_is_ignored() {
        let mut recorder = SpanRecorder::new();
        fill_polygons(
            &[square(20.0, 20.0, 30.0, 30.0, true)],
            &Transform::identity(),
            FillRule::NonZero,
            10,
            10,
            &mut recorder,
        );
        fill_polygons(
            &[square(0.0, -30.0, 10.0, -20.0, true)],
            &Transform::identity(),
            FillRule::NonZero,
            10,
            10,
            &mut recorder,
        );

        assert!(recorder.spans.is_empty());
    }

    #[test]
    fn degenerate_polygons_are_discarded() {
        let mut recorder = SpanRecorder::new();
        fill_polygons(
            &[
                vec![Point::from_xy(1.0, 1.0)],
                vec![Point::from_xy(1.0, 1.0), Point::from_xy(8.0, 8.0)],
            ],
            &Transform::identity(),
            FillRule::NonZero,
            10,
            10,
            &mut recorder,
        );

        assert!(recorder.spans.is_empty());
    }

    #[test]
    fn even_odd_ring() {
        let polygons = vec![
            square(0.0, 0.0, 10.0, 10.0, true),
            square(2.0, 2.0, 8.0, 8.0, true),
        ];

        let mut recorder = SpanRecorder::new();
        fill_polygons(
            &polygons,
            &Transform::identity(),
            FillRule::EvenOdd,
            10,
            10,
            &mut recorder,
        );

        // In the ring rows the inner square is a hole.
        let row: Vec<_> = recorder.spans.iter().filter(|s| s.1 == 5).collect();
        assert_eq!(row, vec![&(0u32, 5u32, 3u32), &(8u32, 5u32, 2u32)]);
    }

    #[test]
    fn non_zero_same_direction_is_solid() {
        let polygons = vec![
            square(0.0, 0.0, 10.0, 10.0, true),
            square(2.0, 2.0, 8.0, 8.0, true),
        ];

        let mut recorder = SpanRecorder::new();
        fill_polygons(
            &polygons,
            &Transform::identity(),
            FillRule::NonZero,
            10,
            10,
            &mut recorder,
        );

        // The whole row stays covered; the inner square only splits the
        // spans.
        let covered: u32 = recorder
            .spans
            .iter()
            .filter(|s| s.1 == 5)
            .map(|s| {
                let end = s.0 + s.2;
                end.min(10) - s.0
            })
            .sum();
        assert!(covered >= 10);
    }

    #[test]
    fn non_zero_opposite_direction_is_a_ring() {
        let polygons = vec![
            square(0.0, 0.0, 10.0, 10.0, true),
            square(2.0, 2.0, 8.0, 8.0, false),
        ];

        let mut recorder = SpanRecorder::new();
        fill_polygons(
            &polygons,
            &Transform::identity(),
            FillRule::NonZero,
            10,
            10,
            &mut recorder,
        );

        let row: Vec<_> = recorder.spans.iter().filter(|s| s.1 == 5).collect();
        assert_eq!(row, vec![&(0u32, 5u32, 3u32), &(8u32, 5u32, 2u32)]);
    }

    #[test]
    fn transform_is_applied() {
        let mut recorder = SpanRecorder::new();
        fill_polygons(
            &[square(1.0, 1.0, 4.0, 4.0, true)],
            &Transform::from_translate(2.0, 3.0).unwrap(),
            FillRule::NonZero,
            10,
            10,
            &mut recorder,
        );

        // Device-space square [3, 6) x [4, 7).
        assert_eq!(recorder.spans[0].1, 4);
        assert_eq!(recorder.spans[0].0, 3);
        assert_eq!(recorder.spans.len(), 3);
    }
}
