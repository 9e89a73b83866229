// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::path::PathCommand;
use crate::{Path, Rect};

/// A path builder.
///
/// The builder is an append-only command recorder. Coordinates are not
/// validated while recording; [`finish`] rejects the whole path when any
/// recorded coordinate is non-finite, so a `Path` can never carry NaN or
/// infinity into rendering.
///
/// [`finish`]: PathBuilder::finish
#[derive(Clone, Default, Debug)]
pub struct PathBuilder {
    pub(crate) commands: Vec<PathCommand>,
}

impl PathBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        PathBuilder {
            commands: Vec::new(),
        }
    }

    /// Creates a new builder with a specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        PathBuilder {
            commands: Vec::with_capacity(capacity),
        }
    }

    /// Creates a new `Path` from `Rect`.
    ///
    /// Never fails since `Rect` is always valid.
    ///
    /// Segments are created clockwise: TopLeft -> TopRight -> BottomRight -> BottomLeft
    ///
    /// The contour is closed.
    pub fn from_rect(rect: Rect) -> Path {
        Path {
            commands: vec![
                PathCommand::MoveTo {
                    x: rect.left(),
                    y: rect.top(),
                },
                PathCommand::LineTo {
                    x: rect.right(),
                    y: rect.top(),
                },
                PathCommand::LineTo {
                    x: rect.right(),
                    y: rect.bottom(),
                },
                PathCommand::LineTo {
                    x: rect.left(),
                    y: rect.bottom(),
                },
                PathCommand::Close,
            ],
        }
    }

    /// Returns the current number of commands in the builder.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Checks if the builder has any commands added.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Adds the beginning of a contour.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::MoveTo { x, y });
    }

    /// Adds a line from the last point.
    ///
    /// When the path is empty, the line target also starts the contour.
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(PathCommand::LineTo { x, y });
    }

    /// Adds a quadratic curve from the last point to `x`, `y`.
    pub fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) {
        self.commands.push(PathCommand::QuadTo { x1, y1, x, y });
    }

    /// Adds a cubic curve from the last point to `x`, `y`.
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.commands.push(PathCommand::CubicTo {
            x1,
            y1,
            x2,
            y2,
            x,
            y,
        });
    }

    /// Adds a circular arc around `(cx, cy)`, angles in radians.
    ///
    /// When the arc does not start a new contour and its first point is
    /// further than 0.01 units from the current pen position, a connecting
    /// line is produced during flattening.
    pub fn arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    ) {
        self.commands.push(PathCommand::Arc {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
            ccw,
        });
    }

    /// Adds an elliptical arc around `(cx, cy)`, angles in radians.
    pub fn ellipse(
        &mut self,
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    ) {
        self.commands.push(PathCommand::Ellipse {
            cx,
            cy,
            rx,
            ry,
            rotation,
            start_angle,
            end_angle,
            ccw,
        });
    }

    /// Adds a closed rectangular contour.
    pub fn push_rect(&mut self, rect: Rect) {
        self.move_to(rect.left(), rect.top());
        self.line_to(rect.right(), rect.top());
        self.line_to(rect.right(), rect.bottom());
        self.line_to(rect.left(), rect.bottom());
        self.close();
    }

    /// Closes the current contour.
    ///
    /// A closed contour connects the first and the last point with a line,
    /// forming a continuous loop.
    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Finishes the builder and returns a `Path`.
    ///
    /// Returns `None` when the path is empty or any recorded coordinate is
    /// non-finite.
    pub fn finish(self) -> Option<Path> {
        if self.commands.is_empty() {
            return None;
        }

        if !self.commands.iter().all(PathCommand::is_finite) {
            return None;
        }

        Some(Path {
            commands: self.commands,
        })
    }
}
