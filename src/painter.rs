// Copyright 2006 The Android Open Source Project
// Copyright 2020 Yevhenii Reizner
//
// Use of this source code is governed by a BSD-style license that can be
// found in the LICENSE file.

use golden_canvas_path::{flatten_path, stroke_outline, Path, Point, Rect, Stroke, Transform};
use strict_num::NormalizedF64;

use crate::blitter::{Blitter, PixelBlitter};
use crate::color::ColorU8;
use crate::composite::{composite_pixel, CompositeMode};
use crate::error::{DrawError, DrawResult};
use crate::image::Image;
use crate::mask::ClipMask;
use crate::scan::{self, FillRule};
use crate::surface::Surface;

/// A short-lived drawing-operation descriptor.
///
/// Packaged by the context for every draw call and discarded afterwards;
/// the clip mask is only borrowed for the duration of the call.
pub(crate) struct DrawOp<'a> {
    pub transform: Transform,
    pub composite: CompositeMode,
    pub global_alpha: NormalizedF64,
    pub clip: Option<&'a ClipMask>,
}

/// The effective source alpha: color alpha scaled by the global alpha and
/// the stroke coverage, rounded half away from zero.
fn effective_alpha(alpha: u8, op: &DrawOp, coverage: f64) -> u8 {
    (f64::from(alpha) * op.global_alpha.get() * coverage).round() as u8
}

/// Fills a rectangle under the current transform.
///
/// An axis-aligned transform keeps the rectangle axis-aligned in device
/// space, so its pixels are written directly with pixel-center coverage
/// and the clip stencil tested per pixel; clip state never changes which
/// pixels a rectangle fill touches. Only a rotated or skewed rectangle
/// goes through the polygon filler.
pub(crate) fn fill_rect(surface: &mut Surface, rect: Rect, color: ColorU8, op: &DrawOp) {
    log::trace!("fill_rect {:?}", rect);

    if op.transform.is_axis_aligned() {
        fill_rect_direct(surface, rect, color, op);
    } else {
        composite_polygons(surface, &[rect.corners().to_vec()], FillRule::NonZero, color, 1.0, op);
    }
}

fn fill_rect_direct(surface: &mut Surface, rect: Rect, color: ColorU8, op: &DrawOp) {
    let p0 = op.transform.map_point(Point::from_xy(rect.left(), rect.top()));
    let p1 = op.transform.map_point(Point::from_xy(rect.right(), rect.bottom()));
    let (x0, x1) = if p0.x <= p1.x { (p0.x, p1.x) } else { (p1.x, p0.x) };
    let (y0, y1) = if p0.y <= p1.y { (p0.y, p1.y) } else { (p1.y, p0.y) };

    // Pixels whose centers lie inside the half-open device rectangle.
    let x_start = ((x0 - 0.5).ceil() as i64).max(0);
    let x_stop = ((x1 - 0.5).ceil() as i64).min(i64::from(surface.width()));
    let y_start = ((y0 - 0.5).ceil() as i64).max(0);
    let y_stop = ((y1 - 0.5).ceil() as i64).min(i64::from(surface.height()));
    if x_start >= x_stop || y_start >= y_stop {
        return;
    }

    let alpha = effective_alpha(color.alpha(), op, 1.0);
    if op.composite == CompositeMode::SourceOver && alpha == 0 {
        return;
    }

    let width = (x_stop - x_start) as u32;
    let mut blitter = PixelBlitter::new(surface, op.clip, color, alpha, op.composite);
    for y in y_start..y_stop {
        blitter.blit_h(x_start as u32, y as u32, width);
    }
}

/// Flattens and fills a path.
pub(crate) fn fill_path(
    surface: &mut Surface,
    path: &Path,
    rule: FillRule,
    color: ColorU8,
    op: &DrawOp,
) {
    log::trace!("fill_path with {} commands", path.len());

    let polygons = flatten_path(path);
    composite_polygons(surface, &polygons, rule, color, 1.0, op);
}

/// Expands a path into its stroke polygons and fills them.
pub(crate) fn stroke_path(
    surface: &mut Surface,
    path: &Path,
    stroke: &Stroke,
    color: ColorU8,
    op: &DrawOp,
) {
    log::trace!("stroke_path with {} commands, width {}", path.len(), stroke.width);

    let outline = stroke_outline(path, stroke);
    composite_polygons(
        surface,
        &outline.polygons,
        FillRule::NonZero,
        color,
        outline.coverage,
        op,
    );
}

fn composite_polygons(
    surface: &mut Surface,
    polygons: &[Vec<Point>],
    rule: FillRule,
    color: ColorU8,
    coverage: f64,
    op: &DrawOp,
) {
    let alpha = effective_alpha(color.alpha(), op, coverage);
    if op.composite == CompositeMode::SourceOver && alpha == 0 {
        return;
    }

    let width = surface.width();
    let height = surface.height();
    let mut blitter = PixelBlitter::new(surface, op.clip, color, alpha, op.composite);
    scan::fill_polygons(polygons, &op.transform, rule, width, height, &mut blitter);
}

/// Draws `src` of `image` into `dst` of the surface by per-pixel inverse
/// mapping with nearest-neighbor sampling.
///
/// The source rectangle is assumed to be validated against the image
/// bounds already. Fails when the current transform is not invertible.
pub(crate) fn draw_image(
    surface: &mut Surface,
    image: &Image,
    src: Rect,
    dst: Rect,
    op: &DrawOp,
) -> DrawResult<()> {
    log::trace!("draw_image {}x{} into {:?}", image.width(), image.height(), dst);

    if src.is_empty() || dst.is_empty() {
        return Ok(());
    }

    let inverse = op.transform.invert().ok_or(DrawError::NonInvertibleTransform)?;

    // The device-space bounding box of the transformed destination.
    let mut corners = dst.corners();
    op.transform.map_points(&mut corners);
    let mut min = corners[0];
    let mut max = corners[0];
    for p in &corners[1..] {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    let x_start = (min.x.floor() as i64).max(0);
    let x_stop = (max.x.ceil() as i64).min(i64::from(surface.width()) - 1);
    let y_start = (min.y.floor() as i64).max(0);
    let y_stop = (max.y.ceil() as i64).min(i64::from(surface.height()) - 1);
    if x_start > x_stop || y_start > y_stop {
        return Ok(());
    }

    let global_alpha = op.global_alpha.get();
    let surface_width = surface.width();

    for y in y_start..=y_stop {
        for x in x_start..=x_stop {
            if let Some(clip) = op.clip {
                if !clip.get(x as u32, y as u32) {
                    continue;
                }
            }

            let p = inverse.map_point(Point::from_xy(x as f64, y as f64));
            if !dst.contains(p.x, p.y) {
                continue;
            }

            let sx = (src.left() + ((p.x - dst.left()) / dst.width()) * src.width()).floor();
            let sy = (src.top() + ((p.y - dst.top()) / dst.height()) * src.height()).floor();
            if sx < 0.0 || sy < 0.0 || sx >= f64::from(image.width()) || sy >= f64::from(image.height())
            {
                continue;
            }

            let sample = image.pixel(sx as u32, sy as u32);
            let alpha = (f64::from(sample[3]) * global_alpha).round() as u8;
            if op.composite == CompositeMode::SourceOver && alpha == 0 {
                continue;
            }

            let index = (y as u32 * surface_width + x as u32) as usize;
            let dst_pixel = surface.pixels()[index];
            surface.pixels_mut()[index] = composite_pixel(
                dst_pixel,
                sample[0],
                sample[1],
                sample[2],
                alpha,
                op.composite,
            );
        }
    }

    Ok(())
}
