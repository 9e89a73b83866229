// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use crate::path_builder::PathBuilder;

/// A single path command.
///
/// The command log is a sum type over the seven command kinds; angles are in
/// radians and sweeps are resolved by the flattener, not at build time.
#[allow(missing_docs)]
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    QuadTo {
        x1: f64,
        y1: f64,
        x: f64,
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
        rotation: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    },
    Close,
}

impl PathCommand {
    pub(crate) fn is_finite(&self) -> bool {
        match *self {
            PathCommand::MoveTo { x, y } => x.is_finite() && y.is_finite(),
            PathCommand::LineTo { x, y } => x.is_finite() && y.is_finite(),
            PathCommand::QuadTo { x1, y1, x, y } => {
                x1.is_finite() && y1.is_finite() && x.is_finite() && y.is_finite()
            }
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                x1.is_finite()
                    && y1.is_finite()
                    && x2.is_finite()
                    && y2.is_finite()
                    && x.is_finite()
                    && y.is_finite()
            }
            PathCommand::Arc {
                cx,
                cy,
                radius,
                start_angle,
                end_angle,
                ccw: _,
            } => {
                cx.is_finite()
                    && cy.is_finite()
                    && radius.is_finite()
                    && start_angle.is_finite()
                    && end_angle.is_finite()
            }
            PathCommand::Ellipse {
                cx,
                cy,
                rx,
                ry,
                rotation,
                start_angle,
                end_angle,
                ccw: _,
            } => {
                cx.is_finite()
                    && cy.is_finite()
                    && rx.is_finite()
                    && ry.is_finite()
                    && rotation.is_finite()
                    && start_angle.is_finite()
                    && end_angle.is_finite()
            }
            PathCommand::Close => true,
        }
    }
}

/// An immutable path.
///
/// Can be created via [`PathBuilder`]. A path is an append-only command log;
/// rendering never mutates it, it is only read by the flattener and the
/// stroke outliner.
///
/// # Guarantees
///
/// - Is not empty.
/// - All coordinates are finite.
#[derive(Clone, PartialEq)]
pub struct Path {
    pub(crate) commands: Vec<PathCommand>,
}

impl Path {
    /// Returns the number of commands in the path.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Return if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Returns the command log.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Clears the path and returns a `PathBuilder` that will reuse the
    /// allocated memory.
    pub fn clear(mut self) -> PathBuilder {
        self.commands.clear();
        PathBuilder {
            commands: self.commands,
        }
    }
}

impl core::fmt::Debug for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use core::fmt::Write;

        let mut s = String::new();
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo { x, y } => s.write_fmt(format_args!("M {} {} ", x, y))?,
                PathCommand::LineTo { x, y } => s.write_fmt(format_args!("L {} {} ", x, y))?,
                PathCommand::QuadTo { x1, y1, x, y } => {
                    s.write_fmt(format_args!("Q {} {} {} {} ", x1, y1, x, y))?
                }
                PathCommand::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => s.write_fmt(format_args!("C {} {} {} {} {} {} ", x1, y1, x2, y2, x, y))?,
                PathCommand::Arc {
                    cx,
                    cy,
                    radius,
                    start_angle,
                    end_angle,
                    ccw,
                } => s.write_fmt(format_args!(
                    "arc({} {} {} {} {} {}) ",
                    cx, cy, radius, start_angle, end_angle, ccw
                ))?,
                PathCommand::Ellipse {
                    cx,
                    cy,
                    rx,
                    ry,
                    rotation,
                    start_angle,
                    end_angle,
                    ccw,
                } => s.write_fmt(format_args!(
                    "ellipse({} {} {} {} {} {} {} {}) ",
                    cx, cy, rx, ry, rotation, start_angle, end_angle, ccw
                ))?,
                PathCommand::Close => s.write_str("Z ")?,
            }
        }

        s.pop(); // ' '

        write!(f, "Path({})", s)
    }
}

#[cfg(test)]
mod tests {
    use crate::PathBuilder;

    #[test]
    fn debug_fmt() {
        let mut pb = PathBuilder::new();
        pb.move_to(1.0, 2.0);
        pb.line_to(3.0, 4.0);
        pb.close();
        let path = pb.finish().unwrap();

        assert_eq!(format!("{:?}", path), "Path(M 1 2 L 3 4 Z)");
    }
}
