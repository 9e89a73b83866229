// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::scalar::SCALAR_NEARLY_ZERO;
use crate::Point;

/// An affine transformation matrix.
///
/// The six values represent
///
/// ```text
/// | a  c  e |
/// | b  d  f |
/// | 0  0  1 |
/// ```
///
/// so a point `(x, y)` maps to `(a*x + c*y + e, b*x + d*y + f)`.
///
/// # Guarantees
///
/// - All values are finite.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    #[inline]
    fn default() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }
}

impl Transform {
    /// Creates an identity transform.
    #[inline]
    pub fn identity() -> Self {
        Transform::default()
    }

    /// Creates a new `Transform`.
    ///
    /// # Checks
    ///
    /// - All values must be finite.
    #[inline]
    pub fn from_row(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Option<Self> {
        let all_finite = a.is_finite()
            && b.is_finite()
            && c.is_finite()
            && d.is_finite()
            && e.is_finite()
            && f.is_finite();
        if all_finite {
            Some(Transform { a, b, c, d, e, f })
        } else {
            None
        }
    }

    /// Creates a new translating `Transform`.
    #[inline]
    pub fn from_translate(tx: f64, ty: f64) -> Option<Self> {
        Transform::from_row(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Creates a new scaling `Transform`.
    #[inline]
    pub fn from_scale(sx: f64, sy: f64) -> Option<Self> {
        Transform::from_row(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Creates a new rotating `Transform`, `angle` in radians.
    #[inline]
    pub fn from_rotate(angle: f64) -> Option<Self> {
        let (sin, cos) = angle.sin_cos();
        Transform::from_row(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Checks that the transform is identity.
    #[inline]
    pub fn is_identity(&self) -> bool {
        *self == Transform::default()
    }

    /// Checks that the transform maps axis-aligned rectangles to
    /// axis-aligned rectangles.
    ///
    /// True when there is no skew and no rotation, i.e. `b == 0 && c == 0`.
    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        self.b == 0.0 && self.c == 0.0
    }

    /// Returns the determinant `a*d - b*c`.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Concatenates `other` before `self`.
    ///
    /// The result applies `other` first and `self` second, which is the
    /// matrix product `self * other` in column-vector convention. This is
    /// what a Canvas-style `transform()` call performs on the current matrix.
    ///
    /// Returns `None` when the product overflows to a non-finite value.
    #[must_use]
    pub fn pre_concat(&self, other: &Self) -> Option<Self> {
        Transform::from_row(
            self.a * other.a + self.c * other.b,
            self.b * other.a + self.d * other.b,
            self.a * other.c + self.c * other.d,
            self.b * other.c + self.d * other.d,
            self.a * other.e + self.c * other.f + self.e,
            self.b * other.e + self.d * other.f + self.f,
        )
    }

    /// Concatenates `other` after `self`.
    #[inline]
    #[must_use]
    pub fn post_concat(&self, other: &Self) -> Option<Self> {
        other.pre_concat(self)
    }

    /// Maps a single point.
    #[inline]
    pub fn map_point(&self, p: Point) -> Point {
        Point::from_xy(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Maps a slice of points in-place.
    pub fn map_points(&self, points: &mut [Point]) {
        if self.is_identity() {
            return;
        }

        for p in points {
            *p = self.map_point(*p);
        }
    }

    /// Returns an inverted transform.
    ///
    /// The transform is treated as non-invertible when `|determinant| < 1e-10`.
    pub fn invert(&self) -> Option<Self> {
        // Allow the trivial case to be inlined.
        if self.is_identity() {
            return Some(*self);
        }

        let det = self.determinant();
        if det.abs() < SCALAR_NEARLY_ZERO {
            return None;
        }

        let inv_det = 1.0 / det;
        Transform::from_row(
            self.d * inv_det,
            -self.b * inv_det,
            -self.c * inv_det,
            self.a * inv_det,
            (self.c * self.f - self.d * self.e) * inv_det,
            (self.b * self.e - self.a * self.f) * inv_det,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate() {
        assert_eq!(
            Transform::identity(),
            Transform::from_row(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).unwrap()
        );
        assert!(Transform::from_row(f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0).is_none());
        assert!(Transform::from_row(1.0, 0.0, f64::INFINITY, 1.0, 0.0, 0.0).is_none());

        assert!(Transform::identity().is_axis_aligned());
        assert!(Transform::from_scale(2.0, 3.0).unwrap().is_axis_aligned());
        assert!(Transform::from_translate(2.0, 3.0).unwrap().is_axis_aligned());
        assert!(!Transform::from_rotate(0.3).unwrap().is_axis_aligned());
    }

    #[test]
    fn concat_order() {
        // `pre_concat` applies the other transform first.
        let scale = Transform::from_scale(2.0, 2.0).unwrap();
        let translate = Transform::from_translate(10.0, 0.0).unwrap();

        // Translate by 10, then scale by 2: (1, 0) -> (11, 0) -> (22, 0).
        let ts = scale.pre_concat(&translate).unwrap();
        assert_eq!(ts.map_point(Point::from_xy(1.0, 0.0)), Point::from_xy(22.0, 0.0));

        // Scale by 2, then translate by 10: (1, 0) -> (2, 0) -> (12, 0).
        let ts = scale.post_concat(&translate).unwrap();
        assert_eq!(ts.map_point(Point::from_xy(1.0, 0.0)), Point::from_xy(12.0, 0.0));
    }

    #[test]
    fn invert_round_trip() {
        let ts = Transform::from_row(1.2, 3.4, -5.6, -7.8, 1.2, 3.4).unwrap();
        let inv = ts.invert().unwrap();

        let points = [
            Point::from_xy(0.0, 0.0),
            Point::from_xy(10.0, -20.0),
            Point::from_xy(-3.25, 7.5),
        ];
        for p in &points {
            let back = inv.map_point(ts.map_point(*p));
            assert!((back.x - p.x).abs() < 1e-6);
            assert!((back.y - p.y).abs() < 1e-6);
        }
    }

    #[test]
    fn invert_degenerate() {
        // Collapses everything onto a line.
        let ts = Transform::from_row(2.0, 4.0, 1.0, 2.0, 5.0, 6.0).unwrap();
        assert!(ts.invert().is_none());

        // Determinant just below the threshold.
        let ts = Transform::from_row(1e-6, 0.0, 0.0, 1e-6, 0.0, 0.0).unwrap();
        assert!(ts.invert().is_none());
    }
}
