// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use golden_canvas_path::{LineCap, LineJoin, PathBuilder, Rect, Stroke, Transform};
use strict_num::NormalizedF64;

use crate::color::ColorU8;
use crate::composite::CompositeMode;
use crate::error::{DrawError, DrawResult};
use crate::image::Image;
use crate::mask::ClipMask;
use crate::painter::{self, DrawOp};
use crate::scan::FillRule;
use crate::surface::Surface;

/// The full mutable drawing configuration; one save/restore frame.
#[derive(Clone)]
struct DrawingState {
    transform: Transform,
    global_alpha: NormalizedF64,
    composite: CompositeMode,
    fill_color: ColorU8,
    stroke_color: ColorU8,
    stroke: Stroke,
    clip: Option<ClipMask>,
}

impl Default for DrawingState {
    fn default() -> Self {
        DrawingState {
            transform: Transform::identity(),
            global_alpha: NormalizedF64::ONE,
            composite: CompositeMode::default(),
            fill_color: ColorU8::from_rgba(0, 0, 0, 255),
            stroke_color: ColorU8::from_rgba(0, 0, 0, 255),
            stroke: Stroke::default(),
            clip: None,
        }
    }
}

fn op_from<'a>(state: &'a DrawingState) -> DrawOp<'a> {
    DrawOp {
        transform: state.transform,
        composite: state.composite,
        global_alpha: state.global_alpha,
        clip: state.clip.as_ref(),
    }
}

fn check_finite(values: &[f64]) -> DrawResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(DrawError::NonFiniteArgument)
    }
}

/// An immediate-mode drawing context bound to a [`Surface`].
///
/// The context owns the drawing state, the save/restore stack and the
/// current path; the surface is only borrowed and never retained past a
/// draw call. Drawing is single-threaded and synchronous: every call
/// completes before returning, and operations take effect in program order.
///
/// Methods that receive numbers validate them at entry and leave both the
/// surface and the drawing state unchanged on error.
pub struct Context<'a> {
    surface: &'a mut Surface,
    state: DrawingState,
    stack: Vec<DrawingState>,
    path: PathBuilder,
}

impl<'a> Context<'a> {
    /// Creates a new context over a surface.
    pub fn new(surface: &'a mut Surface) -> Self {
        Context {
            surface,
            state: DrawingState::default(),
            stack: Vec::new(),
            path: PathBuilder::new(),
        }
    }

    /// Returns the width of the bound surface.
    #[inline]
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    /// Returns the height of the bound surface.
    #[inline]
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    // State.

    /// Pushes a deep copy of the current state onto the stack.
    ///
    /// The frame holds the transform, global alpha, composition mode, both
    /// colors, the stroke configuration and a deep copy of the clip mask.
    pub fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    /// Pops and restores the most recently saved state.
    ///
    /// Does nothing when the stack is empty.
    pub fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    // Transform.

    /// Replaces the current transform.
    pub fn set_transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> DrawResult<()> {
        self.state.transform =
            Transform::from_row(a, b, c, d, e, f).ok_or(DrawError::NonFiniteArgument)?;
        Ok(())
    }

    /// Post-multiplies the current transform: the new matrix is applied to
    /// coordinates before the current one.
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> DrawResult<()> {
        let ts = Transform::from_row(a, b, c, d, e, f).ok_or(DrawError::NonFiniteArgument)?;
        self.state.transform = self
            .state
            .transform
            .pre_concat(&ts)
            .ok_or(DrawError::NonFiniteArgument)?;
        Ok(())
    }

    /// Resets the current transform to identity.
    pub fn reset_transform(&mut self) {
        self.state.transform = Transform::identity();
    }

    /// Translates the current transform.
    pub fn translate(&mut self, tx: f64, ty: f64) -> DrawResult<()> {
        self.transform(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Scales the current transform.
    pub fn scale(&mut self, sx: f64, sy: f64) -> DrawResult<()> {
        self.transform(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Rotates the current transform by `angle` radians.
    pub fn rotate(&mut self, angle: f64) -> DrawResult<()> {
        check_finite(&[angle])?;
        let (sin, cos) = angle.sin_cos();
        self.transform(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Returns the current transform.
    #[inline]
    pub fn current_transform(&self) -> Transform {
        self.state.transform
    }

    // Styles.

    /// Sets the fill color.
    pub fn set_fill_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.state.fill_color = ColorU8::from_rgba(r, g, b, a);
    }

    /// Returns the fill color.
    #[inline]
    pub fn fill_color(&self) -> ColorU8 {
        self.state.fill_color
    }

    /// Sets the stroke color.
    pub fn set_stroke_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.state.stroke_color = ColorU8::from_rgba(r, g, b, a);
    }

    /// Returns the stroke color.
    #[inline]
    pub fn stroke_color(&self) -> ColorU8 {
        self.state.stroke_color
    }

    /// Sets the global alpha. Must be in `0..=1`.
    pub fn set_global_alpha(&mut self, alpha: f64) -> DrawResult<()> {
        self.state.global_alpha = NormalizedF64::new(alpha).ok_or(DrawError::InvalidAlpha)?;
        Ok(())
    }

    /// Returns the global alpha.
    #[inline]
    pub fn global_alpha(&self) -> f64 {
        self.state.global_alpha.get()
    }

    /// Sets the composition mode.
    pub fn set_composite_mode(&mut self, mode: CompositeMode) {
        self.state.composite = mode;
    }

    /// Returns the composition mode.
    #[inline]
    pub fn composite_mode(&self) -> CompositeMode {
        self.state.composite
    }

    /// Sets the stroke width. Must be positive and finite.
    ///
    /// Widths up to one pixel render one pixel wide with proportionally
    /// reduced opacity.
    pub fn set_line_width(&mut self, width: f64) -> DrawResult<()> {
        if !width.is_finite() || !(width > 0.0) {
            return Err(DrawError::InvalidLineWidth);
        }
        self.state.stroke.width = width;
        Ok(())
    }

    /// Returns the stroke width.
    #[inline]
    pub fn line_width(&self) -> f64 {
        self.state.stroke.width
    }

    /// Sets the stroke line join.
    pub fn set_line_join(&mut self, join: LineJoin) {
        self.state.stroke.line_join = join;
    }

    /// Returns the stroke line join.
    #[inline]
    pub fn line_join(&self) -> LineJoin {
        self.state.stroke.line_join
    }

    /// Sets the stroke line cap.
    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.stroke.line_cap = cap;
    }

    /// Returns the stroke line cap.
    #[inline]
    pub fn line_cap(&self) -> LineCap {
        self.state.stroke.line_cap
    }

    /// Sets the miter limit. Must be positive and finite.
    pub fn set_miter_limit(&mut self, limit: f64) -> DrawResult<()> {
        if !limit.is_finite() || !(limit > 0.0) {
            return Err(DrawError::InvalidMiterLimit);
        }
        self.state.stroke.miter_limit = limit;
        Ok(())
    }

    /// Returns the miter limit.
    #[inline]
    pub fn miter_limit(&self) -> f64 {
        self.state.stroke.miter_limit
    }

    /// Returns the current clip mask, if any clip has been applied.
    #[inline]
    pub fn clip_mask(&self) -> Option<&ClipMask> {
        self.state.clip.as_ref()
    }

    // Path building.

    /// Starts a fresh path, discarding the current one.
    pub fn begin_path(&mut self) {
        self.path = PathBuilder::new();
    }

    /// Begins a new subpath at `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) -> DrawResult<()> {
        check_finite(&[x, y])?;
        self.path.move_to(x, y);
        Ok(())
    }

    /// Adds a line to `(x, y)`.
    pub fn line_to(&mut self, x: f64, y: f64) -> DrawResult<()> {
        check_finite(&[x, y])?;
        self.path.line_to(x, y);
        Ok(())
    }

    /// Adds a quadratic curve with control `(x1, y1)` to `(x, y)`.
    pub fn quad_to(&mut self, x1: f64, y1: f64, x: f64, y: f64) -> DrawResult<()> {
        check_finite(&[x1, y1, x, y])?;
        self.path.quad_to(x1, y1, x, y);
        Ok(())
    }

    /// Adds a cubic curve with controls `(x1, y1)`, `(x2, y2)` to `(x, y)`.
    pub fn cubic_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> DrawResult<()> {
        check_finite(&[x1, y1, x2, y2, x, y])?;
        self.path.cubic_to(x1, y1, x2, y2, x, y);
        Ok(())
    }

    /// Adds a closed rectangular subpath, then starts a new subpath at
    /// `(x, y)`.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> DrawResult<()> {
        check_finite(&[x, y, w, h])?;
        let rect = Rect::from_xywh(x, y, w, h).ok_or(DrawError::InvalidRect)?;
        self.path.push_rect(rect);
        self.path.move_to(x, y);
        Ok(())
    }

    /// Adds a circular arc, angles in radians.
    pub fn arc(
        &mut self,
        cx: f64,
        cy: f64,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        ccw: bool,
    ) -> DrawResult<()> {
        check_finite(&[cx, cy, radius, start_angle, end_angle])?;
        if radius < 0.0 {
            return Err(DrawError::InvalidRadius);
        }
        self.path.arc(cx, cy, radius, start_angle, end_angle, ccw);
        Ok(())
    }

    /// Adds an elliptical arc, angles in radians.
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
    ) -> DrawResult<()> {
        check_finite(&[cx, cy, rx, ry, rotation, start_angle, end_angle])?;
        if rx < 0.0 || ry < 0.0 {
            return Err(DrawError::InvalidRadius);
        }
        self.path
            .ellipse(cx, cy, rx, ry, rotation, start_angle, end_angle, ccw);
        Ok(())
    }

    /// Closes the current subpath.
    pub fn close_path(&mut self) {
        self.path.close();
    }

    // Drawing.

    /// Fills the current path with the non-zero rule.
    pub fn fill(&mut self) {
        self.fill_with_rule(FillRule::NonZero);
    }

    /// Fills the current path with the given rule.
    pub fn fill_with_rule(&mut self, rule: FillRule) {
        let path = match self.path.clone().finish() {
            Some(path) => path,
            None => return,
        };

        let op = op_from(&self.state);
        painter::fill_path(self.surface, &path, rule, self.state.fill_color, &op);
    }

    /// Strokes the current path.
    pub fn stroke(&mut self) {
        let path = match self.path.clone().finish() {
            Some(path) => path,
            None => return,
        };

        let op = op_from(&self.state);
        painter::stroke_path(
            self.surface,
            &path,
            &self.state.stroke,
            self.state.stroke_color,
            &op,
        );
    }

    /// Intersects the clip region with the current path under the non-zero
    /// rule.
    pub fn clip(&mut self) {
        self.clip_with_rule(FillRule::NonZero);
    }

    /// Intersects the clip region with the current path.
    ///
    /// Clipping is monotonic within a state scope: the visible region can
    /// only shrink. An empty path clips everything out. The current path is
    /// kept.
    pub fn clip_with_rule(&mut self, rule: FillRule) {
        let path = self.path.clone().finish();
        let mask = ClipMask::from_path(
            self.surface.width(),
            self.surface.height(),
            path.as_ref(),
            rule,
            &self.state.transform,
        );

        match self.state.clip.take() {
            Some(mut current) => {
                // Same dimensions by construction.
                let _ = current.intersect(&mask);
                self.state.clip = Some(current);
            }
            None => self.state.clip = Some(mask),
        }
    }

    /// Fills a rectangle with the fill color.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> DrawResult<()> {
        check_finite(&[x, y, w, h])?;
        let rect = Rect::from_xywh(x, y, w, h).ok_or(DrawError::InvalidRect)?;
        if rect.is_empty() {
            return Ok(());
        }

        let op = op_from(&self.state);
        painter::fill_rect(self.surface, rect, self.state.fill_color, &op);
        Ok(())
    }

    /// Strokes a rectangle outline with the stroke color.
    ///
    /// Does not touch the current path.
    pub fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> DrawResult<()> {
        check_finite(&[x, y, w, h])?;
        let rect = Rect::from_xywh(x, y, w, h).ok_or(DrawError::InvalidRect)?;

        let path = PathBuilder::from_rect(rect);
        let op = op_from(&self.state);
        painter::stroke_path(
            self.surface,
            &path,
            &self.state.stroke,
            self.state.stroke_color,
            &op,
        );
        Ok(())
    }

    /// Clears a rectangle to transparent black.
    ///
    /// Equivalent to filling it with `(0, 0, 0, 0)` in `Copy` mode at
    /// global alpha 1.0, ignoring the current composition mode and global
    /// alpha. The transform and clip still apply.
    pub fn clear_rect(&mut self, x: f64, y: f64, w: f64, h: f64) -> DrawResult<()> {
        check_finite(&[x, y, w, h])?;
        let rect = Rect::from_xywh(x, y, w, h).ok_or(DrawError::InvalidRect)?;
        if rect.is_empty() {
            return Ok(());
        }

        let op = DrawOp {
            transform: self.state.transform,
            composite: CompositeMode::Copy,
            global_alpha: NormalizedF64::ONE,
            clip: self.state.clip.as_ref(),
        };
        painter::fill_rect(self.surface, rect, ColorU8::TRANSPARENT, &op);
        Ok(())
    }

    /// Draws the whole image with its top-left corner at `(dx, dy)`.
    pub fn draw_image(&mut self, image: &Image, dx: f64, dy: f64) -> DrawResult<()> {
        let (w, h) = (f64::from(image.width()), f64::from(image.height()));
        self.draw_image_sub_rect(image, 0.0, 0.0, w, h, dx, dy, w, h)
    }

    /// Draws the whole image scaled into the destination rectangle.
    pub fn draw_image_rect(
        &mut self,
        image: &Image,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) -> DrawResult<()> {
        let (w, h) = (f64::from(image.width()), f64::from(image.height()));
        self.draw_image_sub_rect(image, 0.0, 0.0, w, h, dx, dy, dw, dh)
    }

    /// Draws a sub-rectangle of the image scaled into the destination
    /// rectangle.
    ///
    /// The source rectangle must lie inside the image bounds. Fails with
    /// [`DrawError::NonInvertibleTransform`] when the current transform
    /// cannot be inverted.
    pub fn draw_image_sub_rect(
        &mut self,
        image: &Image,
        sx: f64,
        sy: f64,
        sw: f64,
        sh: f64,
        dx: f64,
        dy: f64,
        dw: f64,
        dh: f64,
    ) -> DrawResult<()> {
        check_finite(&[sx, sy, sw, sh, dx, dy, dw, dh])?;

        let src = Rect::from_xywh(sx, sy, sw, sh).ok_or(DrawError::InvalidSourceRect)?;
        if src.left() < 0.0
            || src.top() < 0.0
            || src.right() > f64::from(image.width())
            || src.bottom() > f64::from(image.height())
        {
            return Err(DrawError::InvalidSourceRect);
        }

        let dst = Rect::from_xywh(dx, dy, dw, dh).ok_or(DrawError::InvalidRect)?;

        let op = op_from(&self.state);
        painter::draw_image(self.surface, image, src, dst, &op)
    }
}

impl std::fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("width", &self.surface.width())
            .field("height", &self.surface.height())
            .field("saved_states", &self.stack.len())
            .finish()
    }
}
